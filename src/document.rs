// SPDX-License-Identifier: Apache-2.0

//! Public ingest-time document shape (§3, §6).

use serde::{Deserialize, Serialize};

/// One document handed to [`crate::index::Index::add`]. Per-field text is
/// plain; absent fields (empty strings) contribute nothing and are skipped
/// during ingest (§4.3 step 2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub headings: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<String>>,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_all_optional_fields_absent() {
        let doc: Document = serde_json::from_str(r#"{"title":"mongodb atlas","text":"cloud database"}"#).unwrap();
        assert_eq!(doc.title, "mongodb atlas");
        assert_eq!(doc.text, "cloud database");
        assert_eq!(doc.tags, "");
        assert!(doc.url.is_none());
        assert!(doc.links.is_none());
        assert!(doc.weight.is_none());
    }
}
