//! Ordered Section Store: an append/update/remove sequence with position as identity.
//!
//! # Copy-on-write
//! The sequence lives behind an `Arc<[T]>`. Every mutation builds a new sequence that
//! differs from the previous one at a single position and swaps it in, so a snapshot
//! handed out by [`SectionStore::list`] never observes a later edit.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{SectionEntry, SectionKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    /// `update`/`remove` called with an index outside `0..len`. The store is unchanged.
    #[error("{section} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        section: SectionKind,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone)]
pub struct SectionStore<T> {
    entries: Arc<[T]>,
}

impl<T: SectionEntry> SectionStore<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    /// A store holding a single blank entry, the state a fresh form starts in.
    pub fn with_blank() -> Self {
        let mut store = Self::new();
        store.append();
        store
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<T>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns an immutable snapshot of the current sequence.
    pub fn list(&self) -> Arc<[T]> {
        Arc::clone(&self.entries)
    }

    /// Appends a blank entry and returns its index. Never fails.
    pub fn append(&mut self) -> usize {
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.extend(self.entries.iter().cloned());
        next.push(T::default());
        self.entries = Arc::from(next);

        let index = self.len() - 1;
        debug!(section = %T::SECTION, index, "appended blank entry");
        index
    }

    /// Replaces `field` on the entry at `index` with `value`.
    pub fn update(&mut self, index: usize, field: T::Field, value: String) -> Result<(), SectionError> {
        self.check_index(index)?;

        let next: Vec<T> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if i == index {
                    entry.with_field(field, value.clone())
                } else {
                    entry.clone()
                }
            })
            .collect();
        self.entries = Arc::from(next);

        debug!(section = %T::SECTION, index, field = ?field, "updated entry field");
        Ok(())
    }

    /// Removes the entry at `index`; later entries shift left by one.
    pub fn remove(&mut self, index: usize) -> Result<(), SectionError> {
        self.check_index(index)?;

        let next: Vec<T> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, entry)| entry.clone())
            .collect();
        self.entries = Arc::from(next);

        debug!(section = %T::SECTION, index, remaining = self.len(), "removed entry");
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SectionError> {
        let len = self.len();
        if index < len {
            return Ok(());
        }
        warn!(section = %T::SECTION, index, len, "entry index out of range");
        Err(SectionError::IndexOutOfRange {
            section: T::SECTION,
            index,
            len,
        })
    }
}

impl<T: SectionEntry> Default for SectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
