// --- File: src/core/trie.rs
use std::collections::HashMap;

/// Index of an entry in the table a trie was built from.
pub type EntryId = usize;

#[derive(Debug, Clone)]
struct KeyNode {
    children: HashMap<u8, usize>,
    entry: Option<EntryId>,
}

impl KeyNode {
    fn new() -> Self {
        Self { children: HashMap::new(), entry: None }
    }
}

/// An immutable byte trie over the phonetic keys of one category.
/// Nodes live in a flat arena; node 0 is the root.
#[derive(Debug, Clone)]
pub struct KeyTrie {
    nodes: Vec<KeyNode>,
    entries: usize,
}

impl KeyTrie {
    /// Builds a trie whose entry ids are the positions of `keys`.
    /// If a key repeats, its first position is kept.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut trie = Self { nodes: vec![KeyNode::new()], entries: 0 };
        for (id, key) in keys.into_iter().enumerate() {
            trie.insert(key, id);
            trie.entries = id + 1;
        }
        trie
    }

    /// O(k) where k is key length.
    fn insert(&mut self, key: &str, id: EntryId) {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            let next_idx = if let Some(&idx) = self.nodes[node_idx].children.get(&byte) {
                idx
            } else {
                let new_idx = self.nodes.len();
                self.nodes.push(KeyNode::new());
                self.nodes[node_idx].children.insert(byte, new_idx);
                new_idx
            };
            node_idx = next_idx;
        }
        self.nodes[node_idx].entry.get_or_insert(id);
    }

    /// Walks `input` from its start and calls `f` for every key that is a
    /// prefix of it, shortest first.
    pub fn for_each_prefix(&self, input: &[u8], mut f: impl FnMut(EntryId)) {
        let mut node_idx = 0;
        for byte in input {
            match self.nodes[node_idx].children.get(byte) {
                Some(&next) => node_idx = next,
                None => return,
            }
            if let Some(id) = self.nodes[node_idx].entry {
                f(id);
            }
        }
    }

    /// Marks every entry whose key occurs anywhere in `text`.
    pub fn occurrences(&self, text: &str) -> Vec<bool> {
        let bytes = text.as_bytes();
        let mut seen = vec![false; self.entries];
        for start in 0..bytes.len() {
            self.for_each_prefix(&bytes[start..], |id| seen[id] = true);
        }
        seen
    }
}
