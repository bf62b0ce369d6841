// SPDX-License-Identifier: Apache-2.0

//! `TermEntry`: everything the index knows about one token (§3).

use std::collections::HashMap;

use crate::field::FieldName;

/// Key into `TermEntry::times_appeared`: one registration per first
/// occurrence of a term in a given (property, field) pair (§3, §4.3).
pub type RegistrationKey = (String, FieldName);

/// Per-token posting data.
///
/// `docs` is append-only and may contain duplicate doc ids when a token
/// occurs in more than one field of the same document (§3, "Match" ties
/// these back together at query time rather than deduplicating here).
#[derive(Debug, Clone, Default)]
pub struct TermEntry {
    pub docs: Vec<usize>,
    /// doc_id -> ordered global token positions within that document.
    pub positions: HashMap<usize, Vec<u64>>,
    /// (property_name, field_name) -> number of distinct (doc, field)
    /// registrations. Used as the term-in-language probability numerator
    /// in §4.7's `term_prob`.
    pub times_appeared: HashMap<RegistrationKey, u64>,
}

impl TermEntry {
    /// Record an occurrence at `doc_id`/`position`. `first_in_doc_field`
    /// controls whether this call also bumps the registration and trie
    /// insertion per §4.3 step 3 ("on first occurrence in this (doc,
    /// field)...").
    pub fn record_occurrence(
        &mut self,
        doc_id: usize,
        position: u64,
        property_name: &str,
        field_name: FieldName,
        first_in_doc_field: bool,
    ) {
        self.docs.push(doc_id);
        self.positions.entry(doc_id).or_default().push(position);

        if first_in_doc_field {
            let key = (property_name.to_string(), field_name);
            *self.times_appeared.entry(key).or_insert(0) += 1;
        }
    }

    pub fn times_appeared_for(&self, property_name: &str, field_name: FieldName) -> u64 {
        self.times_appeared
            .get(&(property_name.to_string(), field_name))
            .copied()
            .unwrap_or(0)
    }
}
