use std::collections::HashMap;

use super::Code;

/// Index of a node inside a [`PhraseTrie`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<u8, NodeId>,
    code: Option<Code>,
}

/// Encoder-side phrase dictionary.
///
/// A prefix tree keyed by phrase bytes, stored as an arena of nodes addressed
/// by index. The root (index 0) stands for the empty phrase, which is always
/// present with code 0. Every inserted phrase receives the next sequential
/// code starting at 1; codes are never reassigned and entries are never
/// removed.
///
/// # Example
///
/// ```
/// use lz78::PhraseTrie;
///
/// let mut trie = PhraseTrie::new();
/// assert_eq!(trie.insert(b"a"), Some(1));
/// assert_eq!(trie.insert(b"ab"), Some(2));
/// assert!(trie.contains(b"ab"));
/// assert_eq!(trie.code_of(b"a"), Some(1));
/// assert_eq!(trie.entry_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PhraseTrie {
    nodes: Vec<TrieNode>,
    entries: usize,
}

impl Default for PhraseTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseTrie {
    /// Node standing for the empty phrase.
    pub const ROOT: NodeId = 0;

    /// Creates a dictionary holding only the empty phrase.
    pub fn new() -> Self {
        PhraseTrie {
            nodes: vec![TrieNode {
                children: HashMap::new(),
                code: Some(0),
            }],
            entries: 0,
        }
    }

    /// Returns true if this exact phrase was inserted (the empty phrase always is).
    pub fn contains(&self, phrase: &[u8]) -> bool {
        self.find(phrase).is_some()
    }

    /// Inserts `phrase` under the next sequential code.
    ///
    /// Returns the new code, or `None` if the phrase was already present, in
    /// which case nothing changes. Prefixes of `phrase` that were never
    /// inserted get nodes but no code, so they stay absent for [`contains`].
    ///
    /// [`contains`]: PhraseTrie::contains
    pub fn insert(&mut self, phrase: &[u8]) -> Option<Code> {
        let mut node = Self::ROOT;
        for &byte in phrase {
            node = match self.nodes[node].children.get(&byte) {
                Some(&child) => child,
                None => self.push_node(node, byte),
            };
        }
        if self.nodes[node].code.is_some() {
            return None;
        }
        let code = self.next_code();
        self.nodes[node].code = Some(code);
        self.entries += 1;
        Some(code)
    }

    /// Returns the code assigned to an exact-match phrase.
    ///
    /// The empty phrase yields `Some(0)`; a phrase that was never inserted
    /// yields `None`.
    pub fn code_of(&self, phrase: &[u8]) -> Option<Code> {
        self.find(phrase).map(|node| self.code_at(node))
    }

    /// Number of phrases inserted so far, not counting the empty phrase.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Follows the edge labelled `byte` from `node`, if it leads to an inserted phrase.
    pub fn step(&self, node: NodeId, byte: u8) -> Option<NodeId> {
        self.nodes[node]
            .children
            .get(&byte)
            .copied()
            .filter(|&child| self.nodes[child].code.is_some())
    }

    /// Inserts the phrase `node + byte` and returns its code.
    ///
    /// Same contract as [`insert`](PhraseTrie::insert) without re-walking the
    /// path from the root; returns the existing code if already present.
    pub fn insert_child(&mut self, node: NodeId, byte: u8) -> Code {
        let child = match self.nodes[node].children.get(&byte) {
            Some(&child) => child,
            None => self.push_node(node, byte),
        };
        if let Some(code) = self.nodes[child].code {
            return code;
        }
        let code = self.next_code();
        self.nodes[child].code = Some(code);
        self.entries += 1;
        code
    }

    /// Code of the phrase ending at `node`; nodes without a code report 0.
    ///
    /// Only nodes reached through [`step`](PhraseTrie::step) or
    /// [`ROOT`](PhraseTrie::ROOT) are meaningful here.
    pub fn code_at(&self, node: NodeId) -> Code {
        self.nodes[node].code.unwrap_or(0)
    }

    /// Node holding `phrase`, if that phrase has a code. Intermediate nodes
    /// along the way may be uncoded.
    fn find(&self, phrase: &[u8]) -> Option<NodeId> {
        let node = phrase.iter().try_fold(Self::ROOT, |node, byte| {
            self.nodes[node].children.get(byte).copied()
        })?;
        self.nodes[node].code.is_some().then_some(node)
    }

    fn next_code(&self) -> Code {
        self.entries as Code + 1
    }

    fn push_node(&mut self, parent: NodeId, byte: u8) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TrieNode::default());
        self.nodes[parent].children.insert(byte, id);
        id
    }
}
