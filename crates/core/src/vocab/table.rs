//! Id-keyed token table.
//!
//! Entries are kept in a `BTreeMap` so iteration and serialization always run
//! in ascending id order, which keeps exports reproducible and gives piece
//! lookups a well-defined "first id wins" rule.

use super::entry::TokenEntry;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token table: id -> entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable {
    entries: BTreeMap<u32, TokenEntry>,
}

impl TokenTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry at `id`, returning the previous one.
    pub fn insert(&mut self, id: u32, entry: TokenEntry) -> Option<TokenEntry> {
        self.entries.insert(id, entry)
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&TokenEntry> {
        self.entries.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TokenEntry)> {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    /// True when the ids are exactly `0..len`.
    pub fn is_dense(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(expected, &id)| expected as u64 == u64::from(id))
    }

    /// Build a piece -> id index for lookups by surface form.
    pub fn piece_index(&self) -> PieceIndex<'_> {
        PieceIndex::new(self)
    }
}

/// Reverse lookup from piece text to id.
///
/// When several ids share a piece, the lowest id is kept.
pub struct PieceIndex<'a> {
    ids: AHashMap<&'a str, u32>,
}

impl<'a> PieceIndex<'a> {
    fn new(table: &'a TokenTable) -> Self {
        let mut ids = AHashMap::with_capacity(table.len());
        for (id, entry) in table.iter() {
            ids.entry(entry.piece.as_str()).or_insert(id);
        }
        Self { ids }
    }

    #[inline]
    pub fn get(&self, piece: &str) -> Option<u32> {
        self.ids.get(piece).copied()
    }
}
