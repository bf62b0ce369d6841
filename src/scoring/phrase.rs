// SPDX-License-Identifier: Apache-2.0

//! Phrase validation: do a document's matched positions contain the phrase's
//! terms at strictly increasing, consecutive positions (§4.8)?

use std::collections::HashMap;

/// True when some starting position `p` exists in `positions[phrase[0]]`
/// such that `p + i` is present in `positions[phrase[i]]` for every `i`.
/// False if any phrase term has no recorded positions at all.
pub fn phrase_matches(positions: &HashMap<String, Vec<u64>>, phrase: &[String]) -> bool {
    if phrase.is_empty() {
        return false;
    }

    let Some(first_positions) = positions.get(&phrase[0]) else { return false };
    for term in &phrase[1..] {
        if !positions.contains_key(term) {
            return false;
        }
    }

    first_positions.iter().any(|&start| {
        phrase.iter().enumerate().all(|(i, term)| {
            let offset = start + i as u64;
            positions[term].contains(&offset)
        })
    })
}

/// A candidate match is kept iff every phrase in the query is satisfied
/// by `positions` (§4.8: "matches failing all phrase checks are filtered
/// out" — when there are no phrases this is vacuously true).
pub fn satisfies_all_phrases(positions: &HashMap<String, Vec<u64>>, phrases: &[Vec<String>]) -> bool {
    phrases.iter().all(|phrase| phrase_matches(positions, phrase))
}
