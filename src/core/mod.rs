pub mod config;
pub mod phrase_table;
pub mod phrase_trie;

/// Sequential identifier of a dictionary phrase; 0 is the empty phrase.
pub type Code = u64;
