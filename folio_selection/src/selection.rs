// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Keys in the order the user picked them, without duplicates.
///
/// The order is selection order, not document order: the first entry is the
/// element a status message describes, and shift-clicks append. Every change
/// bumps [`Selection::revision`], so callers can detect no-op edits by
/// comparing revisions.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<T> {
    keys: Vec<T>,
    revision: u64,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Selection<T> {
    /// An empty selection at revision zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Selected keys, oldest pick first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.keys
    }

    /// Iterates [`Selection::items`].
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.keys.iter()
    }

    /// Change counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Deselects everything. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        self.keys.clear();
        self.touch()
    }

    fn touch(&mut self) -> bool {
        self.revision = self.revision.wrapping_add(1);
        true
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.keys.contains(key)
    }

    /// Makes `keys` the whole selection, dropping repeats. Returns `true` if the
    /// contents or their order changed.
    pub fn replace_with<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut next = Vec::new();
        for key in keys {
            if !next.contains(&key) {
                next.push(key);
            }
        }
        if next == self.keys {
            return false;
        }
        self.keys = next;
        self.touch()
    }

    /// Appends the keys that are not selected yet. Returns `true` if any were.
    pub fn extend_with<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.keys.len();
        for key in keys {
            if !self.keys.contains(&key) {
                self.keys.push(key);
            }
        }
        self.keys.len() != before && self.touch()
    }

    /// Shift-click: appends `key` if absent, removes it otherwise.
    pub fn toggle(&mut self, key: T) {
        match self.keys.iter().position(|k| *k == key) {
            Some(at) => {
                self.keys.remove(at);
            }
            None => self.keys.push(key),
        }
        self.touch();
    }

    /// Deselects `key`. Returns `true` if it was selected.
    pub fn remove(&mut self, key: &T) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before && self.touch()
    }

    /// Keeps the keys for which `keep` returns `true`, in order. Returns `true`
    /// if any were dropped.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> bool {
        let before = self.keys.len();
        self.keys.retain(keep);
        self.keys.len() != before && self.touch()
    }
}
