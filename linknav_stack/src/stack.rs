// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack container: one ordered sequence of resolved screens.
//!
//! ## Overview
//!
//! A [`StackContainer`] owns the screens of one navigable scope, bottom to top,
//! each tagged with the path that produced it. All mutation goes through a
//! small set of primitives that resolve paths through a [`Resolver`] and report
//! what changed as a [`StackChange`], so the owner can tell its presentation
//! surface which transition to run.
//!
//! ## Invariants
//!
//! - Once launched the stack is never empty: `back` stops at the bottom entry,
//!   `remove` refuses to delete every entry, and `replace` keeps the old
//!   entries when nothing in the new item resolves.
//! - A primitive that leaves the sequence untouched returns `None`.
//! - Paths that fail to resolve are skipped; the rest of the item still lands.

use alloc::vec::Vec;

use tracing::trace;

use crate::path::{ItemValue, LinkItem, PathSegment, Payload};
use crate::registry::{Resolver, ScreenEntry};

/// What a primitive did to the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackChange {
    /// Entries were appended on top.
    Pushed,
    /// Entries were removed from the top; the new top was already present.
    Popped,
    /// The sequence was rewritten (replace, remove, reload).
    Replaced,
}

/// An owned, ordered sequence of [`ScreenEntry`] values.
#[derive(Clone, Debug)]
pub struct StackContainer<S, V = Payload> {
    initial: LinkItem<V>,
    entries: Vec<ScreenEntry<S>>,
}

impl<S, V: ItemValue> StackContainer<S, V> {
    /// Create an unlaunched stack that will install `initial` on [`launch`](Self::launch).
    pub fn new(initial: LinkItem<V>) -> Self {
        Self {
            initial,
            entries: Vec::new(),
        }
    }

    /// The item installed at launch.
    pub fn initial_item(&self) -> &LinkItem<V> {
        &self.initial
    }

    /// Install the initial item.
    pub fn launch<N>(&mut self, resolver: &Resolver<'_, N, S, V>) -> Option<StackChange> {
        let initial = self.initial.clone();
        self.replace(&initial, resolver)
    }

    /// The entries, bottom to top.
    pub fn entries(&self) -> &[ScreenEntry<S>] {
        &self.entries
    }

    /// Number of entries.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` before launch.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The visible entry.
    pub fn top(&self) -> Option<&ScreenEntry<S>> {
        self.entries.last()
    }

    /// Every entry's path, bottom to top.
    pub fn current_path(&self) -> Vec<PathSegment> {
        self.entries
            .iter()
            .map(|e| e.match_path().clone())
            .collect()
    }

    /// Paths from the bottom through the first occurrence of `path`.
    ///
    /// Returns every path when `path` is absent.
    pub fn range(&self, path: &str) -> Vec<PathSegment> {
        let end = self.position(path).map_or(self.entries.len(), |index| index + 1);
        self.entries[..end]
            .iter()
            .map(|e| e.match_path().clone())
            .collect()
    }

    /// Index of the first entry (from the bottom) built from `path`.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.match_path() == path)
    }

    /// Resolve every path of `item` and append the results.
    pub fn push<N>(
        &mut self,
        item: &LinkItem<V>,
        resolver: &Resolver<'_, N, S, V>,
    ) -> Option<StackChange> {
        let resolved = resolver.resolve_item(item);
        if resolved.is_empty() {
            return None;
        }
        trace!(count = resolved.len(), "pushing screens");
        self.entries.extend(resolved);
        Some(StackChange::Pushed)
    }

    /// Discard the sequence and install a freshly resolved one.
    ///
    /// If no path of `item` resolves, the existing entries are kept.
    pub fn replace<N>(
        &mut self,
        item: &LinkItem<V>,
        resolver: &Resolver<'_, N, S, V>,
    ) -> Option<StackChange> {
        let resolved = resolver.resolve_item(item);
        if resolved.is_empty() {
            return None;
        }
        trace!(count = resolved.len(), "replacing stack");
        self.entries = resolved;
        Some(StackChange::Replaced)
    }

    /// Pop back to an existing entry for the item's first path, or push the item.
    pub fn back_or_next<N>(
        &mut self,
        item: &LinkItem<V>,
        resolver: &Resolver<'_, N, S, V>,
    ) -> Option<StackChange> {
        let path = item.first_path()?;
        match self.position(path.as_str()) {
            Some(index) => self.truncate_to(index),
            None => self.push(item, resolver),
        }
    }

    /// Pop the top entry; a no-op at the single-entry floor.
    pub fn back(&mut self) -> Option<StackChange> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        Some(StackChange::Popped)
    }

    /// Delete every entry whose path is listed, keeping the survivors in order.
    ///
    /// Refuses (returns `None`) when no entry matches or when every entry would go.
    pub fn remove(&mut self, paths: &[PathSegment]) -> Option<StackChange> {
        let doomed = self
            .entries
            .iter()
            .filter(|e| paths.contains(e.match_path()))
            .count();
        if doomed == 0 || doomed == self.entries.len() {
            return None;
        }
        self.entries.retain(|e| !paths.contains(e.match_path()));
        Some(StackChange::Replaced)
    }

    /// Pop back to the first entry (from the bottom) for the item's path, or push it.
    ///
    /// Same matching as [`back_or_next`](Self::back_or_next): the bottom-most
    /// match wins when a path appears more than once.
    pub fn back_to_last<N>(
        &mut self,
        item: &LinkItem<V>,
        resolver: &Resolver<'_, N, S, V>,
    ) -> Option<StackChange> {
        self.back_or_next(item, resolver)
    }

    /// Pop back to the first entry built from `path`.
    ///
    /// Returns `None` if `path` is absent or already on top.
    pub fn pop_to(&mut self, path: &str) -> Option<StackChange> {
        let index = self.position(path)?;
        self.truncate_to(index)
    }

    /// Keep only the bottom entry.
    pub fn reset(&mut self) -> Option<StackChange> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.truncate(1);
        Some(StackChange::Popped)
    }

    /// Rebuild the top entry with a new value, keeping everything below it.
    ///
    /// A no-op if the stack is empty or the top path no longer resolves.
    pub fn reload_last<N>(
        &mut self,
        value: &V,
        resolver: &Resolver<'_, N, S, V>,
    ) -> Option<StackChange> {
        let path = self.top()?.match_path().clone();
        let fresh = resolver.resolve(&path, value)?;
        if let Some(top) = self.entries.last_mut() {
            *top = fresh;
        }
        Some(StackChange::Replaced)
    }

    fn truncate_to(&mut self, index: usize) -> Option<StackChange> {
        if index + 1 >= self.entries.len() {
            return None;
        }
        self.entries.truncate(index + 1);
        Some(StackChange::Popped)
    }
}
