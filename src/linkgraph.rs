// SPDX-License-Identifier: Apache-2.0

//! Forward/inverse hyperlink adjacency by URL, with URL↔doc-id mappings and
//! cached neighbor resolution for HITS (§4.6).

use std::collections::HashMap;

/// Normalize a URL by collapsing a trailing `/index.html` to `/` (§4.6,
/// scenario 6).
pub fn normalize_url(url: &str) -> String {
    if let Some(stripped) = url.strip_suffix("index.html") {
        if stripped.ends_with('/') {
            return stripped.to_string();
        }
    }
    url.to_string()
}

/// Link graph plus the URL↔doc-id mappings derived from documents that
/// declared both a `url` and `links`.
#[derive(Default)]
pub struct LinkGraph {
    outbound: HashMap<String, Vec<String>>,
    inbound: HashMap<String, Vec<String>>,
    url_to_id: HashMap<String, usize>,
    id_to_url: HashMap<usize, String>,
    /// Cached `(incoming, outgoing)` doc-id neighbor lists, keyed by doc-id.
    /// Shared-read after first computation (§5); cleared only by rebuilding
    /// the whole index.
    neighbor_cache: HashMap<usize, (Vec<usize>, Vec<usize>)>,
}

impl LinkGraph {
    pub fn new() -> Self {
        LinkGraph::default()
    }

    /// Register `doc_id`'s declared `url` and outbound `links`. Both must be
    /// present for any link-graph bookkeeping to occur (§4.3: "updates
    /// link-graph tables only if both url and links are present").
    pub fn register(&mut self, doc_id: usize, url: &str, links: &[String]) {
        let url = normalize_url(url);
        self.url_to_id.insert(url.clone(), doc_id);
        self.id_to_url.insert(doc_id, url.clone());

        let forward = self.outbound.entry(url.clone()).or_default();
        for link in links {
            let link = normalize_url(link);
            forward.push(link.clone());
            self.inbound.entry(link).or_default().push(url.clone());
        }
    }

    /// Doc-ids linking into and out of `doc_id`, with self-loops and unknown
    /// URLs dropped, and doc-id 0 treated as absent (§4.6, §9 - preserved
    /// oddity from the reference's truthy check). Cached per doc-id.
    pub fn neighbors(&mut self, doc_id: usize) -> (Vec<usize>, Vec<usize>) {
        if let Some(cached) = self.neighbor_cache.get(&doc_id) {
            return cached.clone();
        }

        let result = self.compute_neighbors(doc_id);
        self.neighbor_cache.insert(doc_id, result.clone());
        result
    }

    fn compute_neighbors(&self, doc_id: usize) -> (Vec<usize>, Vec<usize>) {
        let Some(url) = self.id_to_url.get(&doc_id) else {
            return (Vec::new(), Vec::new());
        };

        let incoming = self
            .inbound
            .get(url)
            .into_iter()
            .flatten()
            .filter_map(|neighbor_url| self.url_to_id.get(neighbor_url).copied())
            .filter(|&id| id != 0 && id != doc_id)
            .collect();

        let outgoing = self
            .outbound
            .get(url)
            .into_iter()
            .flatten()
            .filter_map(|neighbor_url| self.url_to_id.get(neighbor_url).copied())
            .filter(|&id| id != 0 && id != doc_id)
            .collect();

        (incoming, outgoing)
    }
}
