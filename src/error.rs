// SPDX-License-Identifier: Apache-2.0

//! Errors the core surfaces to callers.
//!
//! Per the error-handling design: precondition violations are the only thing
//! that becomes an `Err`. Degenerate numerical cases (division by zero in
//! `term_prob`, `NaN` authority scores) and silent data skips (missing
//! fields, unresolved URLs) are handled inline and never reach here.

use thiserror::Error;

/// Maximum number of distinct terms accepted in a single query (§4.2).
pub const MAX_QUERY_TERMS: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    /// The query's distinct-term count exceeded [`MAX_QUERY_TERMS`].
    #[error("query has {found} distinct terms, more than the allowed {MAX_QUERY_TERMS}")]
    QueryTooLong { found: usize },

    /// A `search` was attempted before the index completed its first `sync`.
    ///
    /// The core itself never returns this - it has no notion of "not yet
    /// synced" - but the variant is part of the public contract because the
    /// worker-plumbing caller (out of scope, §1) is documented to enforce it
    /// at the collaborator boundary and needs a shared vocabulary for it.
    #[error("search attempted before the index finished its first sync")]
    StillIndexing,

    /// `Index::new` was given a field name outside the canonical set.
    #[error("unknown field name: {0:?}")]
    UnknownField(String),

    /// `Index::new` was given a field whose weight was not a static positive
    /// number (§3 "Field": "a named text channel with a static positive
    /// weight").
    #[error("field {name:?} has non-positive weight {weight}")]
    InvalidFieldWeight { name: String, weight: f64 },

    /// An `EngineConfig::load` override file could not be read as UTF-8 text
    /// or parsed as JSON.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
