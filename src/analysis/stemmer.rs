// SPDX-License-Identifier: Apache-2.0

//! Porter-family stemming, shared between the ingest and query paths.

use std::sync::OnceLock;

use rust_stemmers::{Algorithm, Stemmer};

fn stemmer() -> &'static Stemmer {
    static STEMMER: OnceLock<Stemmer> = OnceLock::new();
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// `stem(token) -> token`, deterministic and idempotent (§4.1, §8).
pub fn stem(token: &str) -> String {
    stemmer().stem(token).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_common_suffixes() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("databases"), "databas");
    }

    #[test]
    fn is_idempotent() {
        for word in ["running", "databases", "mongodb", "clusters", "indexing"] {
            let once = stem(word);
            let twice = stem(&once);
            assert_eq!(once, twice, "stem not idempotent for {word:?}");
        }
    }
}
