// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! There's no dedicated config-file crate here, same as upstream: the one
//! configuration surface is a plain JSON document loaded with `serde_json`,
//! the way a custom ranking override file is loaded elsewhere in this
//! family of crates. `EngineConfig::default()` reproduces every constant
//! named in the spec; `EngineConfig::load` lets a caller override field
//! weights or the Dirichlet+/HITS constants from a file without recompiling.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::field::FieldName;

/// One field's name and static weight (§3 "Field").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldWeight {
    pub name: FieldName,
    pub weight: f64,
}

/// Dirichlet+, phrase, and HITS tunables, plus the canonical field table.
///
/// All defaults reproduce §4.7's `μ = 2000, δ = 0.05`, §4.9's
/// `MAX_MATCHES = 150`, convergence threshold `1e-5` and iteration cap
/// `200`, and §3's canonical field set
/// `{text:1, headings:5, title:10, tags:10}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub fields: Vec<FieldWeight>,
    /// Dirichlet prior `μ` (§4.7).
    pub mu: f64,
    /// Lower-bound smoothing term `δ` (§4.7).
    pub delta: f64,
    /// Result cap applied at the final ranking step only (§5, §9).
    pub max_matches: usize,
    /// HITS convergence threshold on `|Δ norm|` (§4.9).
    pub hits_epsilon: f64,
    /// HITS iteration cap (§4.9, §5).
    pub hits_max_iterations: usize,
    /// Operator-like tokens whose mandatory-term weight multiplier (1.5x,
    /// §4.7) applies. Membership is checked against the caller-supplied,
    /// un-stemmed query term.
    pub mandatory_terms: HashSet<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fields: vec![
                FieldWeight { name: FieldName::Text, weight: 1.0 },
                FieldWeight { name: FieldName::Headings, weight: 5.0 },
                FieldWeight { name: FieldName::Title, weight: 10.0 },
                FieldWeight { name: FieldName::Tags, weight: 10.0 },
            ],
            mu: 2000.0,
            delta: 0.05,
            max_matches: 150,
            hits_epsilon: 1e-5,
            hits_max_iterations: 200,
            mandatory_terms: HashSet::new(),
        }
    }
}

impl EngineConfig {
    /// Load an override file, falling back to defaults for any field the
    /// JSON omits (`#[serde(default)]` on every member above).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SearchError::InvalidConfig(e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| SearchError::InvalidConfig(e.to_string()))
    }

    pub(crate) fn field_names(&self) -> Vec<(FieldName, f64)> {
        self.fields.iter().map(|f| (f.name, f.weight)).collect()
    }

    /// `(name, weight)` pairs suitable for [`crate::index::Index::new`],
    /// e.g. for a CLI or other caller that wants to build an index matching
    /// this config's field table without reaching into `FieldName` itself.
    pub fn field_name_weight_pairs(&self) -> Vec<(&'static str, f64)> {
        self.fields.iter().map(|f| (f.name.as_str(), f.weight)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_canonical_set() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.fields.len(), 4);
        assert_eq!(cfg.mu, 2000.0);
        assert_eq!(cfg.delta, 0.05);
        assert_eq!(cfg.max_matches, 150);
        assert_eq!(cfg.hits_max_iterations, 200);
    }

    #[test]
    fn load_overrides_only_specified_fields() {
        let dir = std::env::temp_dir().join(format!("corpusdex-cfg-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"mu": 500.0}"#).unwrap();

        let cfg = EngineConfig::load(&path).unwrap();
        assert_eq!(cfg.mu, 500.0);
        assert_eq!(cfg.delta, 0.05);
        assert_eq!(cfg.fields.len(), 4);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_reports_missing_file_as_invalid_config() {
        let err = EngineConfig::load("/nonexistent/corpusdex-config.json").unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }

    #[test]
    fn load_reports_malformed_json_as_invalid_config() {
        let dir = std::env::temp_dir().join(format!("corpusdex-cfg-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
