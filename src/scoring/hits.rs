// SPDX-License-Identifier: Apache-2.0

//! HITS (Hyperlink-Induced Topic Search) re-ranking over the matched
//! documents' link neighborhood (§4.9).

use std::collections::HashMap;

use super::Match;

/// Default HITS convergence threshold (overridable via `EngineConfig::hits_epsilon`).
pub const DEFAULT_EPSILON: f64 = 1e-5;
/// Default HITS iteration cap (overridable via `EngineConfig::hits_max_iterations`).
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Expand `root` into a base set (root plus one-hop link neighbors,
/// `resolve_neighbors(doc_id) -> (incoming, outgoing)`), run authority/hub
/// iteration to convergence, then rank and cap at `max_matches`.
///
/// Neighbors are resolved once per member of the base set, so edges that
/// would reach beyond root's immediate neighbors are simply not followed -
/// the base set never grows past that single hop, matching §4.9's "attach
/// its incoming and outgoing neighbor Matches" (no recursive expansion).
pub fn rank_with_hits(
    root: Vec<Match>,
    mut resolve_neighbors: impl FnMut(usize) -> (Vec<usize>, Vec<usize>),
    epsilon: f64,
    max_iterations: usize,
    max_matches: usize,
) -> Vec<Match> {
    if root.is_empty() {
        return root;
    }

    let mut arena: Vec<Match> = root;
    let mut index_of: HashMap<usize, usize> = arena.iter().enumerate().map(|(i, m)| (m.id, i)).collect();

    let root_ids: Vec<usize> = arena.iter().map(|m| m.id).collect();
    for id in &root_ids {
        let (incoming, outgoing) = resolve_neighbors(*id);
        for neighbor_id in incoming.into_iter().chain(outgoing) {
            index_of.entry(neighbor_id).or_insert_with(|| {
                arena.push(Match::placeholder(neighbor_id));
                arena.len() - 1
            });
        }
    }

    let base_ids: Vec<usize> = arena.iter().map(|m| m.id).collect();
    let mut incoming_edges: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    let mut outgoing_edges: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    for (i, id) in base_ids.iter().enumerate() {
        let (incoming, outgoing) = resolve_neighbors(*id);
        incoming_edges[i] = incoming.into_iter().filter_map(|n| index_of.get(&n).copied()).collect();
        outgoing_edges[i] = outgoing.into_iter().filter_map(|n| index_of.get(&n).copied()).collect();
    }

    iterate(&mut arena, &incoming_edges, &outgoing_edges, epsilon, max_iterations);

    finalize(arena, max_matches)
}

fn iterate(arena: &mut [Match], incoming_edges: &[Vec<usize>], outgoing_edges: &[Vec<usize>], epsilon: f64, max_iterations: usize) {
    let mut prev_authority_norm = 0.0;
    let mut prev_hub_norm = 0.0;

    for _ in 0..max_iterations {
        let hubs: Vec<f64> = arena.iter().map(|m| m.hub).collect();
        let mut authorities: Vec<f64> =
            incoming_edges.iter().map(|neighbors| neighbors.iter().map(|&n| hubs[n]).sum()).collect();
        let authority_norm = l2_norm(&authorities);
        normalize(&mut authorities, authority_norm);
        for (m, a) in arena.iter_mut().zip(authorities.iter()) {
            m.authority = *a;
        }

        let authorities_for_hub: Vec<f64> = arena.iter().map(|m| m.authority).collect();
        let mut hubs_next: Vec<f64> =
            outgoing_edges.iter().map(|neighbors| neighbors.iter().map(|&n| authorities_for_hub[n]).sum()).collect();
        let hub_norm = l2_norm(&hubs_next);
        normalize(&mut hubs_next, hub_norm);
        for (m, h) in arena.iter_mut().zip(hubs_next.iter()) {
            m.hub = *h;
        }

        if (authority_norm - prev_authority_norm).abs() < epsilon && (hub_norm - prev_hub_norm).abs() < epsilon {
            break;
        }
        prev_authority_norm = authority_norm;
        prev_hub_norm = hub_norm;
    }
}

fn l2_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

fn normalize(values: &mut [f64], norm: f64) {
    if norm == 0.0 {
        return;
    }
    for v in values.iter_mut() {
        *v /= norm;
    }
}

fn finalize(arena: Vec<Match>, max_matches: usize) -> Vec<Match> {
    let mut survivors: Vec<Match> = arena
        .into_iter()
        .filter(|m| m.relevancy_score > 0.0)
        .map(|mut m| {
            if m.authority.is_nan() {
                m.authority = 1e-10;
            }
            m
        })
        .collect();

    if survivors.is_empty() {
        return survivors;
    }

    let tau = sample_stddev(&survivors.iter().map(|m| m.relevancy_score).collect::<Vec<_>>());

    let above_tau: Vec<&Match> = survivors.iter().filter(|m| m.relevancy_score >= tau).collect();
    let max_rel = above_tau.iter().map(|m| m.relevancy_score).fold(f64::MIN, f64::max);
    let max_auth = above_tau.iter().map(|m| m.authority).fold(f64::MIN, f64::max);

    for m in &mut survivors {
        let mut score = (m.relevancy_score / max_rel + 1.0).log2() + (m.authority / max_auth + 1.0).log2() * (1.0 / 4f64.log2());
        if m.relevancy_score < 2.5 * tau {
            score -= tau / m.relevancy_score;
        }
        m.score = score;
    }

    survivors.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    survivors.truncate(max_matches);
    survivors
}

/// Sample standard deviation (divisor `n-1`), 0.0 for fewer than two samples.
fn sample_stddev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
