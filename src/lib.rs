// SPDX-License-Identifier: Apache-2.0

//! `corpusdex`: an in-memory full-text search engine for documentation
//! corpora.
//!
//! Ingest batches of documents - each with a URL, outbound links, and
//! several weighted text fields - into an inverted index, then answer
//! ranked queries combining Dirichlet+ language-model relevance,
//! synonym/correlation expansion, optional phrase filtering, and optional
//! HITS link-analysis re-ranking over the hyperlink graph of matched
//! documents.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────┐   ┌─────────────┐
//! │  analysis  │──▶│ index │◀──│  linkgraph  │
//! │ (tokenize, │   │(trie, │   │  (forward/  │
//! │  stem)     │   │postings)  │  inverse)   │
//! └────────────┘   └───┬───┘   └─────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼              ▼             ▼
//!   ┌─────────┐   ┌──────────┐  ┌──────────┐
//!   │  query  │   │correlation│  │ scoring  │
//!   │ (parse) │   │  (synonym)│  │(Dirichlet│
//!   └─────────┘   └──────────┘  │ +, HITS) │
//!                                └────┬─────┘
//!                                     ▼
//!                                 search (driver)
//! ```
//!
//! # Usage
//!
//! ```
//! use corpusdex::{Document, EngineConfig, Index};
//! use corpusdex::search::search;
//!
//! let mut index = Index::new(&[("text", 1.0), ("headings", 5.0), ("title", 10.0), ("tags", 10.0)]).unwrap();
//! index.add("docs", &Document { title: "MongoDB Atlas".into(), text: "cloud database".into(), ..Default::default() }, None);
//!
//! let config = EngineConfig::default();
//! let results = search(&mut index, &config, "mongodb", false).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod analysis;
pub mod config;
pub mod correlation;
pub mod document;
pub mod error;
pub mod field;
pub mod handle;
pub mod index;
pub mod linkgraph;
pub mod query;
pub mod scoring;
pub mod search;
pub mod sink;
pub mod term;
pub mod trie;

pub use config::EngineConfig;
pub use document::Document;
pub use error::SearchError;
pub use handle::IndexHandle;
pub use index::Index;
pub use query::{Filter, Query};
pub use scoring::Match;
pub use sink::NewWordSink;
