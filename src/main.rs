// SPDX-License-Identifier: Apache-2.0

//! `corpusdex` CLI: build an in-memory index from a JSON corpus file and
//! either summarize it or run a single query against it.
//!
//! ```bash
//! # Build an index and print a summary
//! corpusdex build --input docs.json
//!
//! # Build an index and run a query, optionally with HITS re-ranking
//! corpusdex search --input docs.json "full text search" --hits --limit 5
//! ```
//!
//! There is no on-disk index format (§1 Non-goals: no persistence) - every
//! invocation rebuilds the index in memory from the input file.

use std::fs;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Deserialize;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use corpusdex::{Document, EngineConfig, Index, IndexHandle};

#[derive(Parser)]
#[command(name = "corpusdex", about = "In-memory full-text search engine for documentation corpora", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a JSON corpus file and print a summary.
    Build {
        /// Path to a JSON array of corpus entries.
        #[arg(short, long)]
        input: String,
    },
    /// Build an index from a JSON corpus file and run one query against it.
    Search {
        /// Path to a JSON array of corpus entries.
        #[arg(short, long)]
        input: String,
        /// Raw query string; quote phrases with `"..."`.
        query: String,
        /// Re-rank the result set with HITS over the link graph (§4.9).
        #[arg(long)]
        hits: bool,
        /// Maximum number of results to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Optional path to an `EngineConfig` JSON override file.
        #[arg(long)]
        config: Option<String>,
    },
}

/// One row of the input corpus file: a caller-chosen `property` tag plus the
/// document fields themselves (§6 "property-name").
#[derive(Deserialize)]
struct CorpusEntry {
    #[serde(default = "default_property")]
    property: String,
    #[serde(flatten)]
    document: Document,
}

fn default_property() -> String {
    "default".to_string()
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build { input } => build(&input),
        Commands::Search { input, query, hits, limit, config } => run_search(&input, &query, hits, limit, config.as_deref()),
    }
}

fn load_corpus(path: &str) -> Vec<CorpusEntry> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {path}: {e}");
        std::process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("error: failed to parse {path} as a JSON corpus array: {e}");
        std::process::exit(1);
    })
}

fn build(input: &str) {
    let entries = load_corpus(input);
    let config = EngineConfig::default();

    let start = Instant::now();
    let (handle, doc_count) = ingest(&entries, &config);
    let elapsed = start.elapsed();

    println!("✓ indexed {doc_count} document(s), {} distinct term(s) in {elapsed:?}", handle.term_count());
}

fn run_search(input: &str, query: &str, use_hits: bool, limit: usize, config_path: Option<&str>) {
    let entries = load_corpus(input);
    let config = match config_path {
        Some(path) => EngineConfig::load(path).unwrap_or_else(|e| {
            eprintln!("error: failed to load config {path}: {e}");
            std::process::exit(1);
        }),
        None => EngineConfig::default(),
    };

    let (handle, doc_count) = ingest(&entries, &config);
    println!("✓ indexed {doc_count} document(s)");

    match handle.search(query, use_hits) {
        Ok(results) => {
            if results.is_empty() {
                println!("no matches for {query:?}");
                return;
            }
            for (rank, m) in results.iter().take(limit).enumerate() {
                println!(
                    "{:>3}. doc #{:<6} score={:.4} relevance={:.4} authority={:.4} terms={:?}",
                    rank + 1,
                    m.id,
                    m.score,
                    m.relevancy_score,
                    m.authority,
                    m.matched_terms
                );
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Build an [`IndexHandle`] from `entries` and return it alongside the
/// document count, showing a progress spinner under the `parallel` feature
/// while the batch ingest runs.
fn ingest(entries: &[CorpusEntry], config: &EngineConfig) -> (IndexHandle, usize) {
    #[cfg(feature = "parallel")]
    let spinner = {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap());
        pb.set_message(format!("indexing {} document(s)...", entries.len()));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    };

    let index = Index::new(&config.field_name_weight_pairs()).unwrap_or_else(|e| {
        eprintln!("error: invalid field configuration: {e}");
        std::process::exit(1);
    });
    let handle = IndexHandle::new(index, config.clone());

    let batch: Vec<(String, Document)> = entries.iter().map(|e| (e.property.clone(), e.document.clone())).collect();
    let ids = handle.add_batch(&batch, None);

    #[cfg(feature = "parallel")]
    spinner.finish_with_message(format!("indexed {} document(s)", ids.len()));

    let doc_count = ids.len();
    (handle, doc_count)
}
