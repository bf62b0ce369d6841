// SPDX-License-Identifier: Apache-2.0

//! Character trie over indexed terms (§4.4).
//!
//! Exact-term lookup is served by `TermEntry` directly; the trie exists only
//! to answer prefix queries - "every term starting with `data`" - without
//! scanning the whole vocabulary. Terminal nodes carry the doc ids
//! registered under that exact term, so a prefix search can report, for
//! every matched (doc, term) pair, which document contained which term.

use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Doc ids inserted under the term that terminates exactly at this
    /// node. Empty for non-terminal nodes.
    doc_ids: HashSet<usize>,
    /// Set once this node terminates some term, so empty-string terms and
    /// "prefix of another term" nodes are distinguishable from leaves.
    is_terminal: bool,
}

#[derive(Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Insert `term` under `doc_id`. Repeated inserts of the same
    /// (term, doc_id) pair are idempotent (`HashSet`).
    pub fn insert(&mut self, term: &str, doc_id: usize) {
        let mut node = &mut self.root;
        for ch in term.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_terminal = true;
        node.doc_ids.insert(doc_id);
    }

    /// `search(term, prefix=true)`: every indexed term starting with `term`,
    /// mapped to the doc ids registered under it.
    /// `search(term, prefix=false)`: only the exact term, if indexed.
    pub fn search(&self, term: &str, prefix: bool) -> HashMap<usize, HashSet<String>> {
        let mut results: HashMap<usize, HashSet<String>> = HashMap::new();
        let Some(subtree) = self.descend(term) else {
            return results;
        };

        if prefix {
            self.collect(subtree, term, &mut results);
        } else if subtree.is_terminal {
            for &doc_id in &subtree.doc_ids {
                results.entry(doc_id).or_default().insert(term.to_string());
            }
        }
        results
    }

    fn descend(&self, term: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in term.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn collect(&self, node: &TrieNode, prefix_so_far: &str, out: &mut HashMap<usize, HashSet<String>>) {
        if node.is_terminal {
            for &doc_id in &node.doc_ids {
                out.entry(doc_id).or_default().insert(prefix_so_far.to_string());
            }
        }
        for (ch, child) in &node.children {
            let mut extended = prefix_so_far.to_string();
            extended.push(*ch);
            self.collect(child, &extended, out);
        }
    }
}
