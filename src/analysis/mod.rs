// SPDX-License-Identifier: Apache-2.0

//! Text analyzer: tokenize, drop stop words, apply the correlation-prefix
//! rule or stem (§4.1).

pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use stemmer::stem;
pub use stopwords::is_stop_word;
pub use tokenizer::tokenize;

/// What the correlation-prefix / stemming rule produced for one raw token
/// (already tokenized, lowercased, prefix-preserving).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedToken {
    /// The form stored in / looked up against postings.
    pub stored: String,
    /// Set for `%%x`, `$x`, `%x` tokens: the plain word to hand to
    /// `CorrelationStore::correlate_word` as the `word` argument (it does
    /// its own tokenize+stem per §4.5), the verbatim prefixed token as the
    /// `synonym` argument, and the fixed closeness `0.9`.
    pub auto_correlation: Option<(String, String, f64)>,
}

const AUTO_CORRELATION_CLOSENESS: f64 = 0.9;

/// Apply the correlation-prefix rule or stemming to one already-tokenized,
/// lowercased word (§4.1).
///
/// Run this after `is_stop_word` has already let the token through - stop
/// words are filtered on the raw token, before this rule applies (§4.3 step
/// 3 orders "skip if stop word" before "apply correlation-prefix rule or
/// stem").
/// Tokenize `raw_text` (prefix-preserving), drop stop words, and apply the
/// correlation-prefix/stemming rule to every surviving token, in order.
///
/// This is the whole per-field analysis pipeline up to the point where the
/// caller needs to know about document ids or positions, which is why
/// `Index::add_batch` can run it per document per field across a `rayon`
/// thread pool before folding the results into postings single-threaded
/// (§5 "Concurrency").
pub fn analyze_field(raw_text: &str) -> Vec<ProcessedToken> {
    tokenize(raw_text, true)
        .into_iter()
        .filter(|raw| !is_stop_word(raw))
        .map(|raw| process_token(&raw))
        .collect()
}

pub fn process_token(raw: &str) -> ProcessedToken {
    if let Some(word) = raw.strip_prefix("%%") {
        if !word.is_empty() {
            return ProcessedToken {
                stored: raw.to_string(),
                auto_correlation: Some((word.to_string(), raw.to_string(), AUTO_CORRELATION_CLOSENESS)),
            };
        }
    }
    if let Some(word) = raw.strip_prefix('$').or_else(|| raw.strip_prefix('%')) {
        if !word.is_empty() {
            return ProcessedToken {
                stored: raw.to_string(),
                auto_correlation: Some((word.to_string(), raw.to_string(), AUTO_CORRELATION_CLOSENESS)),
            };
        }
    }
    ProcessedToken { stored: stem(raw), auto_correlation: None }
}
