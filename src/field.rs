// SPDX-License-Identifier: Apache-2.0

//! Fields: the named text channels documents are indexed under (§3 "Field").
//!
//! Each field owns a per-document entry (token count + frequency map) and a
//! lazily computed length-weight that the scorer multiplies in. The cache is
//! a plain `Option<f64>` cleared on every `add` to the field, rather than a
//! dirty flag plus stale data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The canonical field names (§3). Unknown names are rejected at
/// `Index::new` and silently ignored at ingest (§6, §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Title,
    Tags,
    Headings,
    Text,
}

impl FieldName {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Tags => "tags",
            FieldName::Headings => "headings",
            FieldName::Text => "text",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(FieldName::Title),
            "tags" => Some(FieldName::Tags),
            "headings" => Some(FieldName::Headings),
            "text" => Some(FieldName::Text),
            _ => None,
        }
    }
}

/// Per-document, per-field record (§3 "DocumentEntry").
#[derive(Debug, Clone, Default)]
pub struct DocumentEntry {
    /// Caller-supplied opaque tag (e.g. a corpus/product identifier).
    pub property_name: String,
    /// Token count of this field in this document, after stop-word removal.
    pub len: usize,
    /// token -> frequency in this field for this document.
    pub term_frequencies: HashMap<String, u32>,
}

/// One named text channel with a static weight, and everything ingest has
/// accumulated in it so far (§3).
#[derive(Debug, Clone)]
pub struct Field {
    pub name: FieldName,
    pub weight: f64,
    /// doc_id -> DocumentEntry, only present for docs that had this field.
    pub entries: HashMap<usize, DocumentEntry>,
    /// Cumulative non-stop tokens this field has ever absorbed.
    pub total_tokens_seen: u64,
    length_weight: Option<f64>,
}

impl Field {
    pub fn new(name: FieldName, weight: f64) -> Self {
        Field {
            name,
            weight,
            entries: HashMap::new(),
            total_tokens_seen: 0,
            length_weight: None,
        }
    }

    /// Invalidate the cached length-weight. Called once per `add` to this
    /// field, before the new document's tokens are folded in (§4.3 step 1).
    pub fn invalidate_length_weight(&mut self) {
        self.length_weight = None;
    }

    /// `(#docs with an entry) / (Σ distinct tokens per entry)`, memoized.
    pub fn length_weight(&mut self) -> f64 {
        if let Some(cached) = self.length_weight {
            return cached;
        }
        let doc_count = self.entries.len();
        let distinct_token_sum: usize =
            self.entries.values().map(|e| e.term_frequencies.len()).sum();
        let weight = if distinct_token_sum == 0 {
            0.0
        } else {
            doc_count as f64 / distinct_token_sum as f64
        };
        self.length_weight = Some(weight);
        weight
    }
}
