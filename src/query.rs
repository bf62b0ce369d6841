// SPDX-License-Identifier: Apache-2.0

//! Parses a raw query string into a term set, phrase list, and optional
//! document filter (§4.2).

use std::collections::HashSet;
use std::fmt;

use crate::analysis::{is_stop_word, stem, tokenize};
use crate::error::{SearchError, MAX_QUERY_TERMS};

/// Opaque caller-supplied `doc-id -> bool` predicate (§9 "runtime-polymorphic
/// filter"). The default filter accepts every document id.
pub struct Filter(Box<dyn Fn(usize) -> bool + Send + Sync>);

impl Filter {
    pub fn new(predicate: impl Fn(usize) -> bool + Send + Sync + 'static) -> Self {
        Filter(Box::new(predicate))
    }

    pub fn accepts(&self, doc_id: usize) -> bool {
        (self.0)(doc_id)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::new(|_| true)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// A parsed query: the stemmed term set actually looked up against the
/// index, the original (lowercased, unstemmed) terms for mandatory-term and
/// `queryLen` bookkeeping (§4.7), the phrase list (each phrase a sequence of
/// stemmed terms), and the document filter.
#[derive(Debug)]
pub struct Query {
    pub terms: HashSet<String>,
    pub original_terms: Vec<String>,
    pub phrases: Vec<Vec<String>>,
    pub filter: Filter,
}

impl Query {
    /// Accept every document id.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Parse a raw query string (§4.2). Quoted runs become phrases and their
    /// tokens are folded into the term set too. Fails with
    /// `SearchError::QueryTooLong` when the distinct-term count exceeds
    /// [`MAX_QUERY_TERMS`].
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let mut terms: HashSet<String> = HashSet::new();
        let mut original_terms: Vec<String> = Vec::new();
        let mut phrases: Vec<Vec<String>> = Vec::new();

        let mut rest = raw;
        while let Some(open) = rest.find('"') {
            let before = &rest[..open];
            push_plain_terms(before, &mut terms, &mut original_terms);

            let after_open = &rest[open + 1..];
            match after_open.find('"') {
                Some(close) => {
                    let phrase_text = &after_open[..close];
                    let phrase_terms = push_plain_terms(phrase_text, &mut terms, &mut original_terms);
                    if !phrase_terms.is_empty() {
                        phrases.push(phrase_terms);
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    // Unterminated quote: treat the remainder as plain text.
                    push_plain_terms(after_open, &mut terms, &mut original_terms);
                    rest = "";
                }
            }
        }
        push_plain_terms(rest, &mut terms, &mut original_terms);

        if terms.len() > MAX_QUERY_TERMS {
            return Err(SearchError::QueryTooLong { found: terms.len() });
        }

        Ok(Query { terms, original_terms, phrases, filter: Filter::default() })
    }
}

/// Tokenize `text`, drop stop words, stem survivors, and fold them into
/// `terms`/`original_terms`. Returns the stemmed sequence in order, so phrase
/// callers can record it positionally.
fn push_plain_terms(text: &str, terms: &mut HashSet<String>, original_terms: &mut Vec<String>) -> Vec<String> {
    let mut stemmed = Vec::new();
    for raw in tokenize(text, true) {
        if is_stop_word(&raw) {
            continue;
        }
        original_terms.push(raw.clone());
        let s = stem(&raw);
        terms.insert(s.clone());
        stemmed.push(s);
    }
    stemmed
}
