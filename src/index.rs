// SPDX-License-Identifier: Apache-2.0

//! The inverted index: the single owner of postings, field data, the trie,
//! the link graph, and the correlation store (§5 "Memory ownership").

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::analysis::{analyze_field, ProcessedToken};
use crate::correlation::CorrelationStore;
use crate::document::Document;
use crate::error::SearchError;
use crate::field::{DocumentEntry, Field, FieldName};
use crate::linkgraph::LinkGraph;
use crate::sink::NewWordSink;
use crate::term::TermEntry;
use crate::trie::Trie;

/// Document-field (text, property-name) pairs walked in ingest order, so
/// `add` applies the same field ordering to every document.
const FIELD_SLOTS: [FieldName; 4] = [FieldName::Title, FieldName::Tags, FieldName::Headings, FieldName::Text];

/// The engine's index. Owns every posting, field, and the link graph;
/// nothing about a query outlives `search` (§5).
pub struct Index {
    fields: HashMap<FieldName, Field>,
    terms: HashMap<String, TermEntry>,
    trie: Trie,
    link_graph: LinkGraph,
    correlations: CorrelationStore,
    document_weights: HashMap<usize, f64>,
    next_doc_id: usize,
    global_position: u64,
}

impl Index {
    /// `fields` must name only `{"title","tags","text","headings"}`, each
    /// with a static positive weight (§3 "Field"); either is a
    /// construction-time error (§6). Document fields outside the configured
    /// set are silently ignored at ingest, not here.
    pub fn new(fields: &[(&str, f64)]) -> Result<Self, SearchError> {
        let mut table = HashMap::new();
        for (name, weight) in fields {
            let parsed = FieldName::parse(name).ok_or_else(|| SearchError::UnknownField((*name).to_string()))?;
            if *weight <= 0.0 {
                return Err(SearchError::InvalidFieldWeight { name: (*name).to_string(), weight: *weight });
            }
            table.insert(parsed, Field::new(parsed, *weight));
        }

        Ok(Index {
            fields: table,
            terms: HashMap::new(),
            trie: Trie::new(),
            link_graph: LinkGraph::new(),
            correlations: CorrelationStore::new(),
            document_weights: HashMap::new(),
            next_doc_id: 0,
            global_position: 0,
        })
    }

    pub fn correlate_word(&mut self, word: &str, synonym: &str, closeness: f64) {
        self.correlations.correlate_word(word, synonym, closeness);
    }

    pub fn correlations(&self) -> &CorrelationStore {
        &self.correlations
    }

    pub fn link_graph_mut(&mut self) -> &mut LinkGraph {
        &mut self.link_graph
    }

    pub fn configured_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field_mut(&mut self, name: FieldName) -> Option<&mut Field> {
        self.fields.get_mut(&name)
    }

    pub fn field(&self, name: FieldName) -> Option<&Field> {
        self.fields.get(&name)
    }

    pub fn term(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    /// Number of distinct stemmed/prefixed terms currently indexed.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn document_weight(&self, doc_id: usize) -> f64 {
        self.document_weights.get(&doc_id).copied().unwrap_or(1.0)
    }

    /// Ingest one document under `property_name`, returning its assigned id
    /// (§4.3). `sink`, if given, is told about every token newly observed by
    /// the trie (first occurrence in this (doc, field) - a proxy for "new to
    /// the vocabulary" that an external spelling dictionary can use).
    ///
    /// A thin single-document wrapper over [`Index::add_batch`]; ingest a
    /// whole batch through that method instead when `document` analysis
    /// should run across the `parallel` feature's thread pool.
    pub fn add(&mut self, property_name: &str, document: &Document, sink: Option<&dyn NewWordSink>) -> usize {
        let batch = [(property_name.to_string(), document.clone())];
        self.add_batch(&batch, sink)[0]
    }

    /// Ingest `documents` in order, returning one assigned id per document
    /// in the same order (§4.3, §5 "Concurrency").
    ///
    /// Tokenization/stemming of every configured field - the CPU-bound half
    /// of ingest - is computed for the whole batch first, in parallel across
    /// documents under the `parallel` feature (serially otherwise). The
    /// result is then folded into postings/trie/link-graph/correlation-store
    /// one document at a time, in the caller's order, so doc-id assignment
    /// and the global position counter stay deterministic regardless of how
    /// analysis was parallelized.
    pub fn add_batch(&mut self, documents: &[(String, Document)], sink: Option<&dyn NewWordSink>) -> Vec<usize> {
        let prepared = self.prepare_batch(documents);
        documents
            .iter()
            .zip(prepared)
            .map(|((property_name, document), fields)| self.fold_document(property_name, document, fields, sink))
            .collect()
    }

    fn prepare_batch(&self, documents: &[(String, Document)]) -> Vec<Vec<PreparedField>> {
        let analyze_one = |document: &Document| -> Vec<PreparedField> {
            FIELD_SLOTS
                .iter()
                .filter_map(|&field_name| {
                    if !self.fields.contains_key(&field_name) {
                        return None;
                    }
                    let raw_text = field_text(document, field_name);
                    if raw_text.is_empty() {
                        return None;
                    }
                    Some((field_name, analyze_field(raw_text)))
                })
                .collect()
        };

        #[cfg(feature = "parallel")]
        {
            documents.par_iter().map(|(_, document)| analyze_one(document)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            documents.iter().map(|(_, document)| analyze_one(document)).collect()
        }
    }

    fn fold_document(
        &mut self,
        property_name: &str,
        document: &Document,
        fields: Vec<PreparedField>,
        sink: Option<&dyn NewWordSink>,
    ) -> usize {
        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;
        self.document_weights.insert(doc_id, document.weight.unwrap_or(1.0));

        if let (Some(url), Some(links)) = (&document.url, &document.links) {
            self.link_graph.register(doc_id, url, links);
        }

        for (field_name, tokens) in fields {
            self.fields.get_mut(&field_name).expect("field existed during prepare").invalidate_length_weight();
            self.ingest_prepared_field(doc_id, property_name, field_name, tokens, sink);
            self.global_position += 1;
        }

        doc_id
    }

    fn ingest_prepared_field(
        &mut self,
        doc_id: usize,
        property_name: &str,
        field_name: FieldName,
        tokens: Vec<ProcessedToken>,
        sink: Option<&dyn NewWordSink>,
    ) {
        let mut entry = DocumentEntry { property_name: property_name.to_string(), len: 0, term_frequencies: HashMap::new() };

        for processed in tokens {
            if let Some((word, synonym, closeness)) = &processed.auto_correlation {
                self.correlations.correlate_word(word, synonym, *closeness);
            }
            let stored = processed.stored;

            let position = self.global_position;
            self.global_position += 1;

            entry.len += 1;
            let frequency = entry.term_frequencies.entry(stored.clone()).or_insert(0);
            *frequency += 1;
            let first_in_doc_field = *frequency == 1;

            if first_in_doc_field {
                self.trie.insert(&stored, doc_id);
                if let Some(sink) = sink {
                    sink.observe(&stored);
                }
            }

            let term_entry = self.terms.entry(stored).or_default();
            term_entry.record_occurrence(doc_id, position, property_name, field_name, first_in_doc_field);
        }

        let field = self.fields.get_mut(&field_name).expect("field existence checked by caller");
        field.total_tokens_seen += entry.len as u64;
        field.entries.insert(doc_id, entry);
    }
}

/// `(field, analyzed tokens)` for one document, produced by
/// [`Index::prepare_batch`] ahead of the sequential fold in
/// [`Index::fold_document`].
type PreparedField = (FieldName, Vec<ProcessedToken>);

fn field_text<'a>(document: &'a Document, field_name: FieldName) -> &'a str {
    match field_name {
        FieldName::Title => &document.title,
        FieldName::Tags => &document.tags,
        FieldName::Headings => &document.headings,
        FieldName::Text => &document.text,
    }
}
