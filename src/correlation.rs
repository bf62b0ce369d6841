// SPDX-License-Identifier: Apache-2.0

//! Synonym/correlation expansion: a single token or token bigram maps to a
//! weighted list of synonym tokens (§4.5).

use std::collections::HashMap;

use crate::analysis::{stem, tokenize};

/// One weighted synonym registered under a correlation key.
#[derive(Debug, Clone, PartialEq)]
struct Correlation {
    synonym: String,
    weight: f64,
}

/// Maps a correlation key (a stemmed word, or a stemmed two-token bigram
/// joined by a single space) to the list of synonyms registered under it.
#[derive(Default)]
pub struct CorrelationStore {
    entries: HashMap<String, Vec<Correlation>>,
}

impl CorrelationStore {
    pub fn new() -> Self {
        CorrelationStore::default()
    }

    /// Register `synonym` as an implication of `word` with the given
    /// `closeness` weight. `word` may be multi-token: it is tokenized
    /// prefix-sensitively, each token stemmed, then rejoined with single
    /// spaces to form the key. `synonym` is stemmed. Registrations append;
    /// repeated calls with the same key and synonym are not deduplicated.
    pub fn correlate_word(&mut self, word: &str, synonym: &str, closeness: f64) {
        let key = Self::key_for(word);
        let synonym = stem(synonym);
        self.entries.entry(key).or_default().push(Correlation { synonym, weight: closeness });
    }

    fn key_for(word: &str) -> String {
        tokenize(word, true).iter().map(|tok| stem(tok)).collect::<Vec<_>>().join(" ")
    }

    /// Expand `query_terms` (already lowercased, unstemmed originals) into a
    /// `term -> weight` mapping per §4.5: seed each stemmed query term at
    /// 1.0, probe unigram and bigram keys built from adjacent terms, fold in
    /// correlations found under either key (keeping the max weight seen per
    /// synonym), then run one more pass over the expanded set to fold in
    /// single-hop transitive correlations (bigram hops are not chased
    /// recursively in that second pass).
    pub fn collect_correlations(&self, query_terms: &[String]) -> HashMap<String, f64> {
        let stems: Vec<String> = query_terms.iter().map(|t| stem(t)).collect();

        let mut weights: HashMap<String, f64> = HashMap::new();
        for s in &stems {
            let entry = weights.entry(s.clone()).or_insert(1.0);
            if *entry < 1.0 {
                *entry = 1.0;
            }
        }

        for i in 0..stems.len() {
            self.probe_into(&stems[i], &mut weights);
            if i + 1 < stems.len() {
                let bigram = format!("{} {}", stems[i], stems[i + 1]);
                self.probe_into(&bigram, &mut weights);
            }
        }

        let first_pass_terms: Vec<String> = weights.keys().cloned().collect();
        for term in &first_pass_terms {
            self.probe_into(term, &mut weights);
        }

        weights
    }

    fn probe_into(&self, key: &str, weights: &mut HashMap<String, f64>) {
        let Some(correlations) = self.entries.get(key) else { return };
        for correlation in correlations {
            let entry = weights.entry(correlation.synonym.clone()).or_insert(0.0);
            if correlation.weight > *entry {
                *entry = correlation.weight;
            }
        }
    }
}
