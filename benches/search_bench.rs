// SPDX-License-Identifier: Apache-2.0

//! Throughput benchmark for `search` over corpora of a few realistic sizes.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use corpusdex::search::search;
use corpusdex::{Document, EngineConfig, Index};

struct CorpusSize {
    name: &'static str,
    docs: usize,
    words_per_doc: usize,
}

const CORPUS_SIZES: &[CorpusSize] = &[
    CorpusSize { name: "small", docs: 20, words_per_doc: 200 },
    CorpusSize { name: "medium", docs: 100, words_per_doc: 400 },
    CorpusSize { name: "large", docs: 500, words_per_doc: 600 },
];

const VOCAB: &[&str] = &[
    "mongodb", "atlas", "cluster", "database", "cloud", "kubernetes", "deployment", "search",
    "index", "query", "replica", "shard", "aggregation", "pipeline", "driver", "connection",
    "authentication", "schema", "document", "collection",
];

fn build_corpus(size: &CorpusSize) -> Index {
    let mut index = Index::new(&[("text", 1.0), ("headings", 5.0), ("title", 10.0), ("tags", 10.0)]).unwrap();

    for doc_index in 0..size.docs {
        let mut text = String::new();
        for word_index in 0..size.words_per_doc {
            let word = VOCAB[(doc_index + word_index) % VOCAB.len()];
            text.push_str(word);
            text.push(' ');
        }
        let title = format!("{} guide", VOCAB[doc_index % VOCAB.len()]);
        let url = format!("/docs/{doc_index}");
        let links = if doc_index > 0 { vec![format!("/docs/{}", doc_index - 1)] } else { vec![] };

        let document =
            Document { title, text, url: Some(url), links: Some(links), ..Default::default() };
        index.add("bench-corpus", &document, None);
    }

    index
}

fn bench_search(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("search");

    for size in CORPUS_SIZES {
        let mut index = build_corpus(size);
        group.throughput(Throughput::Elements(size.docs as u64));

        group.bench_with_input(BenchmarkId::new("relevance_only", size.name), size, |b, _| {
            b.iter(|| search(black_box(&mut index), black_box(&config), black_box("mongodb cluster"), false).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("with_hits", size.name), size, |b, _| {
            b.iter(|| search(black_box(&mut index), black_box(&config), black_box("mongodb cluster"), true).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
