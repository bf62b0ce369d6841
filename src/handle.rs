// SPDX-License-Identifier: Apache-2.0

//! Thread-safe wrapper around [`Index`] implementing the single-writer,
//! single-reader execution model of §5.
//!
//! `search` needs `&mut Index` itself - the link-graph neighbor cache and
//! each field's length-weight cache are both lazily populated on first use
//! - so a plain reader/writer split where readers only ever take a shared
//! reference doesn't fit. Instead every operation (`add`, `add_batch`,
//! `search`) takes the handle's single write lock, same as the reference's
//! documented rule that ingest and query must not interleave. What the lock
//! buys is `sync`: a fresh `Index` is built out-of-band by the caller (no
//! lock held during the expensive rebuild) and then swapped in with one
//! short write-lock acquisition, so in-flight callers always see either the
//! whole old index or the whole new one, never a partial rebuild.

use parking_lot::RwLock;

use crate::config::EngineConfig;
use crate::document::Document;
use crate::error::SearchError;
use crate::index::Index;
use crate::query::Query;
use crate::scoring::Match;
use crate::search;
use crate::sink::NewWordSink;

/// Owns one live [`Index`] and the [`EngineConfig`] it's queried with.
pub struct IndexHandle {
    index: RwLock<Index>,
    config: EngineConfig,
}

impl IndexHandle {
    pub fn new(index: Index, config: EngineConfig) -> Self {
        IndexHandle { index: RwLock::new(index), config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of distinct terms currently indexed.
    pub fn term_count(&self) -> usize {
        self.index.read().term_count()
    }

    /// Ingest one document (§4.3). Blocks until any in-flight `add`,
    /// `add_batch`, or `search` on this handle has finished.
    pub fn add(&self, property_name: &str, document: &Document, sink: Option<&dyn NewWordSink>) -> usize {
        self.index.write().add(property_name, document, sink)
    }

    /// Ingest a batch of documents (§4.3, §5). Tokenization is parallelized
    /// internally under the `parallel` feature; the write lock is held for
    /// the whole call, so callers wanting the old index to stay queryable
    /// during a large batch load should build a fresh [`Index`] and swap it
    /// in with [`IndexHandle::sync`] instead.
    pub fn add_batch(&self, documents: &[(String, Document)], sink: Option<&dyn NewWordSink>) -> Vec<usize> {
        self.index.write().add_batch(documents, sink)
    }

    /// Run `raw_query` against the current index (§4, §6).
    pub fn search(&self, raw_query: &str, use_hits: bool) -> Result<Vec<Match>, SearchError> {
        search::search(&mut self.index.write(), &self.config, raw_query, use_hits)
    }

    /// Run an already-parsed [`Query`] (e.g. one with a custom filter).
    pub fn search_query(&self, query: &Query, use_hits: bool) -> Result<Vec<Match>, SearchError> {
        search::run(&mut self.index.write(), &self.config, query, use_hits)
    }

    /// Atomically replace the live index with `new_index`, built out-of-band
    /// by the caller (the documented `sync` pattern, §5). Blocks until any
    /// in-flight `add`/`search` finishes, then the swap itself is a single
    /// move - no rebuild work happens while the lock is held.
    pub fn sync(&self, new_index: Index) {
        *self.index.write() = new_index;
    }
}
