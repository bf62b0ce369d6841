// SPDX-License-Identifier: Apache-2.0

//! Scoring pipeline: Dirichlet+ relevance, phrase validation, and the HITS
//! authority/hub re-ranking (§4.7-§4.9).

pub mod hits;
pub mod phrase;
pub mod relevance;

use std::collections::HashSet;

/// Final result cap, applied only at the last step of `search` (§5).
pub const MAX_MATCHES: usize = 150;

/// Ephemeral per-query record for one document id (§3 "Match"). Allocated
/// for the duration of a single `search` call.
#[derive(Debug, Clone)]
pub struct Match {
    pub id: usize,
    pub relevancy_score: f64,
    pub matched_terms: HashSet<String>,
    pub score: f64,
    pub authority: f64,
    pub hub: f64,
}

impl Match {
    pub fn new(id: usize, relevancy_score: f64, matched_terms: HashSet<String>) -> Self {
        Match { id, relevancy_score, matched_terms, score: relevancy_score, authority: 1.0, hub: 1.0 }
    }

    fn placeholder(id: usize) -> Self {
        Match::new(id, 0.0, HashSet::new())
    }
}

/// Sort by `relevancyScore` descending and cap at `max_matches` - the
/// ranking used whenever HITS is switched off.
pub fn rank_by_relevance(mut matches: Vec<Match>, max_matches: usize) -> Vec<Match> {
    matches.sort_by(|a, b| b.relevancy_score.partial_cmp(&a.relevancy_score).unwrap_or(std::cmp::Ordering::Equal));
    matches.truncate(max_matches);
    matches
}
