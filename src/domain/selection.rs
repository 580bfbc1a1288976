use crate::domain::model::Artwork;
use std::collections::HashSet;

/// Cross-page accumulator of chosen artworks.
///
/// Records are kept in insertion order and are unique by `id`; inserting an
/// id that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    records: Vec<Artwork>,
    ids: HashSet<u64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Returns `false` when the id was already selected.
    pub fn insert(&mut self, record: Artwork) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn remove(&mut self, id: u64) -> Option<Artwork> {
        if !self.ids.remove(&id) {
            return None;
        }
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Keeps the first `len` records in insertion order, returning how many were dropped.
    pub fn truncate(&mut self, len: usize) -> usize {
        if len >= self.records.len() {
            return 0;
        }
        let dropped = self.records.split_off(len);
        for record in &dropped {
            self.ids.remove(&record.id);
        }
        dropped.len()
    }

    /// Drops every record whose id satisfies `pred`, preserving the order of the rest.
    pub fn remove_where<F: Fn(u64) -> bool>(&mut self, pred: F) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !pred(r.id));
        self.ids.retain(|id| !pred(*id));
        before - self.records.len()
    }

    /// Appends every record, skipping ids already present. Returns how many were added.
    pub fn extend<I: IntoIterator<Item = Artwork>>(&mut self, records: I) -> usize {
        records
            .into_iter()
            .map(|r| self.insert(r))
            .filter(|added| *added)
            .count()
    }
}
