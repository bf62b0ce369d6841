// SPDX-License-Identifier: Apache-2.0

//! The search driver: orchestrates the trie, correlation store, inverted
//! index, and scorer into a ranked result list (§2 "Search driver", §4).

use std::collections::{HashMap, HashSet};

use crate::analysis::stem;
use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::field::FieldName;
use crate::index::Index;
use crate::query::Query;
use crate::scoring::hits::rank_with_hits;
use crate::scoring::phrase::satisfies_all_phrases;
use crate::scoring::relevance::{score_term_in_field, term_weight, TermFieldContribution};
use crate::scoring::{rank_by_relevance, Match};

const FIELD_SLOTS: [FieldName; 4] = [FieldName::Title, FieldName::Tags, FieldName::Headings, FieldName::Text];

/// Run `raw_query` against `index`. `use_hits` selects HITS re-ranking over
/// plain relevance ordering (§4.9). Mirrors `Index::search` in design terms
/// (§6); exposed as a free function because it needs both `&mut Index`
/// (for the neighbor cache and field length-weight memoization) and
/// `&EngineConfig`.
pub fn search(index: &mut Index, config: &EngineConfig, raw_query: &str, use_hits: bool) -> Result<Vec<Match>, SearchError> {
    let query = Query::parse(raw_query)?;
    run(index, config, &query, use_hits)
}

/// Same as [`search`] but takes an already-parsed [`Query`] (e.g. one with a
/// custom filter installed via [`Query::with_filter`]).
pub fn run(index: &mut Index, config: &EngineConfig, query: &Query, use_hits: bool) -> Result<Vec<Match>, SearchError> {
    if query.terms.is_empty() {
        return Ok(Vec::new());
    }

    let expanded = index.correlations().collect_correlations(&query.original_terms);
    let mandatory_stems: HashSet<String> =
        query.original_terms.iter().filter(|t| config.mandatory_terms.contains(*t)).map(|t| stem(t)).collect();
    let query_len = query.terms.len();

    let mut relevancy: HashMap<usize, f64> = HashMap::new();
    let mut matched_terms: HashMap<usize, HashSet<String>> = HashMap::new();

    for (query_term, weight) in &expanded {
        let candidates = index.trie().search(query_term, true);
        let term_weight_value = term_weight(Some(*weight), mandatory_stems.contains(query_term));

        for (doc_id, actual_terms) in candidates {
            if !query.filter.accepts(doc_id) {
                continue;
            }

            for actual_term in &actual_terms {
                let contribution = score_across_fields(index, doc_id, actual_term, term_weight_value, query_len, config);
                *relevancy.entry(doc_id).or_insert(0.0) += contribution;
                matched_terms.entry(doc_id).or_default().insert(actual_term.clone());
            }
        }
    }

    let mut matches: Vec<Match> = relevancy
        .into_iter()
        .map(|(doc_id, relevancy_score)| Match::new(doc_id, relevancy_score, matched_terms.remove(&doc_id).unwrap_or_default()))
        .collect();

    if !query.phrases.is_empty() {
        matches.retain(|m| {
            let positions = phrase_positions(index, m.id, &query.phrases);
            satisfies_all_phrases(&positions, &query.phrases)
        });
    }

    let ranked = if use_hits {
        rank_with_hits(
            matches,
            |doc_id| index.link_graph_mut().neighbors(doc_id),
            config.hits_epsilon,
            config.hits_max_iterations,
            config.max_matches,
        )
    } else {
        rank_by_relevance(matches, config.max_matches)
    };

    Ok(ranked)
}

/// Dirichlet+ contribution of `actual_term` to `doc_id`, summed across every
/// configured field the term actually occurs in for that document (§4.7).
fn score_across_fields(
    index: &mut Index,
    doc_id: usize,
    actual_term: &str,
    term_weight_value: f64,
    query_len: usize,
    config: &EngineConfig,
) -> f64 {
    let known = index.term(actual_term).is_some_and(|e| e.docs.contains(&doc_id));
    if !known {
        return 0.0;
    }

    let mut total = 0.0;
    for field_name in FIELD_SLOTS {
        let extracted = {
            let Some(field) = index.field(field_name) else { continue };
            let Some(doc_entry) = field.entries.get(&doc_id) else { continue };
            let Some(&tf_in_doc) = doc_entry.term_frequencies.get(actual_term) else { continue };
            (doc_entry.property_name.clone(), doc_entry.len as u64, tf_in_doc as u64, field.total_tokens_seen.max(500), field.weight)
        };
        let (property_name, doc_len, tf_in_doc, total_tokens_seen, field_weight) = extracted;

        let term_prob = index
            .term(actual_term)
            .map(|e| e.times_appeared_for(&property_name, field_name) as f64 / total_tokens_seen as f64)
            .unwrap_or(0.0);

        let field_length_weight = index.field_mut(field_name).expect("checked above").length_weight();
        let document_weight = index.document_weight(doc_id);

        let contribution = TermFieldContribution {
            term_weight: term_weight_value,
            tf_in_doc,
            term_prob,
            doc_len,
            query_len,
            field_weight,
            field_length_weight,
            document_weight,
        };
        total += score_term_in_field(&contribution, config.mu, config.delta);
    }
    total
}

/// Literal (unexpanded) positions for every term used across the query's
/// phrases, within `doc_id`, read straight from each `TermEntry` (§4.8).
fn phrase_positions(index: &Index, doc_id: usize, phrases: &[Vec<String>]) -> HashMap<String, Vec<u64>> {
    let mut positions = HashMap::new();
    for phrase in phrases {
        for term in phrase {
            if positions.contains_key(term) {
                continue;
            }
            if let Some(entry) = index.term(term) {
                if let Some(doc_positions) = entry.positions.get(&doc_id) {
                    positions.insert(term.clone(), doc_positions.clone());
                }
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn canonical_index() -> Index {
        Index::new(&[("text", 1.0), ("headings", 5.0), ("title", 10.0), ("tags", 10.0)]).unwrap()
    }

    #[test]
    fn single_document_matches_with_positive_relevance() {
        let mut index = canonical_index();
        let doc = Document {
            title: "mongodb atlas".to_string(),
            text: "cloud database".to_string(),
            url: Some("/a".to_string()),
            links: Some(vec![]),
            ..Default::default()
        };
        index.add("corpus", &doc, None);

        let config = EngineConfig::default();
        let results = search(&mut index, &config, "mongodb", false).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 0);
        assert!(results[0].relevancy_score > 0.0);
    }

    #[test]
    fn linked_document_gets_at_least_as_much_authority_as_the_linking_document() {
        let mut index = canonical_index();
        // Occupy doc-id 0 with an unrelated document first so `a`/`b` below
        // don't land on id 0 themselves - `linkgraph::compute_neighbors`
        // treats doc-id 0 as absent (§4.6, §9), which would otherwise make
        // b's incoming-neighbor list empty regardless of the link and pass
        // the assertion below vacuously instead of exercising HITS.
        index.add("corpus", &Document { title: "unrelated placeholder".to_string(), ..Default::default() }, None);
        let a = Document { title: "driver".to_string(), url: Some("/a".to_string()), links: Some(vec!["/b".to_string()]), ..Default::default() };
        let b = Document { title: "driver".to_string(), url: Some("/b".to_string()), links: Some(vec![]), ..Default::default() };
        index.add("corpus", &a, None);
        index.add("corpus", &b, None);

        let config = EngineConfig::default();
        let results = search(&mut index, &config, "driver", true).unwrap();
        assert_eq!(results.len(), 2);
        let a_match = results.iter().find(|m| m.id == 1).unwrap();
        let b_match = results.iter().find(|m| m.id == 2).unwrap();
        assert!(b_match.authority >= a_match.authority);
    }

    #[test]
    fn correlated_term_surfaces_the_synonym_document() {
        let mut index = canonical_index();
        index.correlate_word("k8s", "kubernetes", 0.9);
        let doc = Document { text: "kubernetes cluster".to_string(), ..Default::default() };
        index.add("corpus", &doc, None);

        let config = EngineConfig::default();
        let results = search(&mut index, &config, "k8s", false).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].relevancy_score > 0.0);
    }

    #[test]
    fn phrase_query_requires_contiguous_positions() {
        let mut index = canonical_index();
        let contiguous = Document { text: "full text search engine".to_string(), ..Default::default() };
        let scattered = Document { text: "full coverage with eventual text then search later".to_string(), ..Default::default() };
        index.add("corpus", &contiguous, None);
        index.add("corpus", &scattered, None);

        let config = EngineConfig::default();
        let results = search(&mut index, &config, "\"full text search\"", false).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 0);
    }

    #[test]
    fn eleven_distinct_terms_fail_with_query_too_long() {
        let mut index = canonical_index();
        let config = EngineConfig::default();
        let err = search(&mut index, &config, "one two three four five six seven eight nine ten eleven", false).unwrap_err();
        assert_eq!(err, SearchError::QueryTooLong { found: 11 });
    }

    #[test]
    fn filter_predicate_is_honored() {
        let mut index = canonical_index();
        let a = Document { text: "database".to_string(), ..Default::default() };
        let b = Document { text: "database".to_string(), ..Default::default() };
        index.add("corpus", &a, None);
        index.add("corpus", &b, None);

        let config = EngineConfig::default();
        let query = Query::parse("database").unwrap().with_filter(crate::query::Filter::new(|id| id == 1));
        let results = run(&mut index, &config, &query, false).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn empty_query_returns_no_matches() {
        let mut index = canonical_index();
        let doc = Document { text: "database".to_string(), ..Default::default() };
        index.add("corpus", &doc, None);

        let config = EngineConfig::default();
        let results = search(&mut index, &config, "", false).unwrap();
        assert!(results.is_empty());
    }
}
