// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Collection, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Empty,
    Browsing(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChange {
    Loaded { len: usize },
    Moved(usize),
    Cleared,
    Unchanged,
}

/// Loaded collection plus the current position.
///
/// An empty collection always sits at position 0 and is never dereferenced;
/// otherwise `position < collection.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    collection: Collection,
    position: usize,
}

impl NavigationState {
    pub fn phase(&self) -> NavPhase {
        if self.collection.is_empty() {
            NavPhase::Empty
        } else {
            NavPhase::Browsing(self.position)
        }
    }

    pub fn current(&self) -> Option<&Record> {
        self.collection.get(self.position)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Replaces the collection wholesale and rewinds to the first record.
    pub fn load(&mut self, collection: Collection) -> NavChange {
        self.collection = collection;
        self.position = 0;
        if self.collection.is_empty() {
            NavChange::Cleared
        } else {
            NavChange::Loaded {
                len: self.collection.len(),
            }
        }
    }

    pub fn next(&mut self) -> NavChange {
        self.step(1)
    }

    pub fn previous(&mut self) -> NavChange {
        self.step(-1)
    }

    pub fn jump_to(&mut self, index: usize) -> NavChange {
        if index >= self.collection.len() || index == self.position {
            return NavChange::Unchanged;
        }
        self.position = index;
        NavChange::Moved(index)
    }

    pub fn reset(&mut self) -> NavChange {
        self.collection = Collection::default();
        self.position = 0;
        NavChange::Cleared
    }

    fn step(&mut self, delta: isize) -> NavChange {
        let len = self.collection.len();
        if len <= 1 {
            return NavChange::Unchanged;
        }
        let len = len as isize;
        let next = (self.position as isize + delta).rem_euclid(len) as usize;
        self.position = next;
        NavChange::Moved(next)
    }
}
