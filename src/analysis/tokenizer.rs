// SPDX-License-Identifier: Apache-2.0

//! Splits text into lowercased tokens on non-alphanumeric runs (§4.1).
//!
//! The `keep_prefixes` flag controls whether `$`, `%`, and `%%` are treated
//! as separator punctuation (the default - everywhere except ingest/query
//! analysis proper) or preserved as part of the following word when they
//! immediately precede one (the correlation-prefix markers). Both the
//! ingest and query paths must call this with the same flag for a given
//! purpose, or stored and looked-up keys silently diverge.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip diacritics (when the `unicode-normalization` feature
/// is enabled) so "café" and "cafe" tokenize identically.
#[cfg(feature = "unicode-normalization")]
fn fold_case(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(not(feature = "unicode-normalization"))]
fn fold_case(text: &str) -> String {
    text.to_string()
}

#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{1DC0}'..='\u{1DFF}' | '\u{20D0}'..='\u{20FF}' | '\u{FE20}'..='\u{FE2F}')
}

fn is_prefix_char(c: char) -> bool {
    c == '$' || c == '%'
}

/// Tokenize `text`. With `keep_prefixes`, a run of `$`/`%`/`%%` immediately
/// followed by alphanumerics is kept as a single token (e.g. `%%x`, `$x`);
/// otherwise those characters are plain separators like any other
/// punctuation.
pub fn tokenize(text: &str, keep_prefixes: bool) -> Vec<String> {
    let folded = fold_case(text).to_lowercase();
    let chars: Vec<char> = folded.chars().collect();
    let n = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < n {
        if keep_prefixes && is_prefix_char(chars[i]) {
            let prefix_len = if chars[i] == '%' && i + 1 < n && chars[i + 1] == '%' { 2 } else { 1 };
            let word_start = i + prefix_len;
            let mut j = word_start;
            while j < n && chars[j].is_alphanumeric() {
                j += 1;
            }
            if j > word_start {
                tokens.push(chars[i..j].iter().collect());
                i = j;
                continue;
            }
            // Prefix char not followed by a word: fall through, treat as
            // ordinary separator below.
        }

        if chars[i].is_alphanumeric() {
            let start = i;
            while i < n && chars[i].is_alphanumeric() {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        } else {
            i += 1;
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphanumeric_runs() {
        assert_eq!(tokenize("full-text search!!", false), vec!["full", "text", "search"]);
    }

    #[test]
    fn lowercases() {
        assert_eq!(tokenize("MongoDB Atlas", false), vec!["mongodb", "atlas"]);
    }

    #[test]
    fn keeps_correlation_prefixes_when_requested() {
        assert_eq!(tokenize("%%kubernetes and $aws or %gcp", true), vec!["%%kubernetes", "and", "$aws", "or", "%gcp"]);
    }

    #[test]
    fn drops_prefixes_when_not_requested() {
        assert_eq!(tokenize("%%kubernetes", false), vec!["kubernetes"]);
    }

    #[test]
    fn lone_prefix_char_is_ignored() {
        assert_eq!(tokenize("cost is $ 5", true), vec!["cost", "is", "5"]);
    }

    #[test]
    fn idempotent_on_already_tokenized_input() {
        let once = tokenize("full text search", false);
        let joined = once.join(" ");
        let twice = tokenize(&joined, false);
        assert_eq!(once, twice);
    }
}
