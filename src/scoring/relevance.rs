// SPDX-License-Identifier: Apache-2.0

//! Dirichlet+ per-term-per-field relevance score (§4.7).

/// Default Dirichlet prior (overridable via `EngineConfig::mu`).
pub const DEFAULT_MU: f64 = 2000.0;
/// Default lower-bound smoothing constant (overridable via `EngineConfig::delta`).
pub const DEFAULT_DELTA: f64 = 0.05;

/// Everything `score_term_in_field` needs for one (doc, term, field)
/// contribution, already pulled out of the index's internal maps.
pub struct TermFieldContribution {
    /// `correlationWeightFor(t) or 0.1`, already doubled by 1.5 by the caller
    /// when `t` is a mandatory term.
    pub term_weight: f64,
    pub tf_in_doc: u64,
    /// `TermEntry.timesAppeared[(propertyName, f.name)] / max(f.totalTokensSeen, 500)`.
    pub term_prob: f64,
    pub doc_len: u64,
    /// Distinct term count of the original, pre-correlation-expansion query.
    pub query_len: usize,
    pub field_weight: f64,
    pub field_length_weight: f64,
    pub document_weight: f64,
}

/// `termWeight × [ log2(1 + tfInDoc/(μ·termProb)) + log2(1 + δ/(μ·termProb))
/// + queryLen · log2(μ/(docLen+μ)) ] × fieldWeight × fieldLengthWeight × documentWeight`.
///
/// Returns 0 when `term_prob` is 0 (division-by-zero degenerates to no
/// contribution, per §7).
pub fn score_term_in_field(c: &TermFieldContribution, mu: f64, delta: f64) -> f64 {
    if c.term_prob == 0.0 {
        return 0.0;
    }

    let denom = mu * c.term_prob;
    let core = (1.0 + c.tf_in_doc as f64 / denom).log2()
        + (1.0 + delta / denom).log2()
        + c.query_len as f64 * (mu / (c.doc_len as f64 + mu)).log2();

    c.term_weight * core * c.field_weight * c.field_length_weight * c.document_weight
}

/// `termWeight = correlationWeightFor(t) or 0.1`, multiplied by 1.5 when `t`
/// is a mandatory term (checked against the caller-supplied mandatory-term
/// set using the original, unstemmed query term).
pub fn term_weight(correlation_weight: Option<f64>, is_mandatory: bool) -> f64 {
    let base = correlation_weight.unwrap_or(0.1);
    if is_mandatory {
        base * 1.5
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(tf_in_doc: u64, term_prob: f64, doc_len: u64, query_len: usize) -> TermFieldContribution {
        TermFieldContribution {
            term_weight: 1.0,
            tf_in_doc,
            term_prob,
            doc_len,
            query_len,
            field_weight: 1.0,
            field_length_weight: 1.0,
            document_weight: 1.0,
        }
    }

    #[test]
    fn zero_term_prob_yields_zero_contribution() {
        let c = contribution(3, 0.0, 10, 1);
        assert_eq!(score_term_in_field(&c, DEFAULT_MU, DEFAULT_DELTA), 0.0);
    }

    #[test]
    fn higher_term_frequency_increases_score() {
        let low = score_term_in_field(&contribution(1, 0.01, 100, 1), DEFAULT_MU, DEFAULT_DELTA);
        let high = score_term_in_field(&contribution(10, 0.01, 100, 1), DEFAULT_MU, DEFAULT_DELTA);
        assert!(high > low);
    }

    #[test]
    fn term_weight_applies_mandatory_multiplier() {
        assert_eq!(term_weight(Some(0.9), false), 0.9);
        assert_eq!(term_weight(Some(0.9), true), 1.35);
        assert_eq!(term_weight(None, false), 0.1);
        assert_eq!(term_weight(None, true), 0.15);
    }
}
