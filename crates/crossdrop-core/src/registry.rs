//! Registry of mounted drop targets.
//!
//! Records are kept in registration order, which is also the hit-test order:
//! when targets overlap, the one registered first wins. Re-registering an id
//! (e.g. after a layout pass) replaces the record in place and keeps its slot.

use std::collections::HashSet;

use kurbo::{Point, Rect};

use crate::target::{DropTargetId, DropTargetRecord};
use crate::window::WindowKey;

/// Ordered mapping from target id to record.
pub struct DropTargetRegistry<P> {
    entries: Vec<(DropTargetId, DropTargetRecord<P>)>,
}

impl<P> DropTargetRegistry<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the record under `id`. Returns true if `id` was new.
    pub fn register(&mut self, id: DropTargetId, record: DropTargetRecord<P>) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries[index].1 = record;
                false
            }
            None => {
                self.entries.push((id, record));
                true
            }
        }
    }

    /// Remove the record under `id`.
    pub fn unregister(&mut self, id: DropTargetId) -> Option<DropTargetRecord<P>> {
        let index = self.position(id)?;
        Some(self.entries.remove(index).1)
    }

    /// Replace the local bounds of an existing record.
    pub fn update_bounds(&mut self, id: DropTargetId, bounds: Rect) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Drop every record owned by `window` whose id is not in `live`.
    ///
    /// Returns how many records were removed.
    pub fn retain_window(&mut self, window: WindowKey, live: &HashSet<DropTargetId>) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|(id, record)| record.window.key != window || live.contains(id));
        before - self.entries.len()
    }

    pub fn contains(&self, id: DropTargetId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: DropTargetId) -> Option<&DropTargetRecord<P>> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, record)| record)
    }

    pub fn get_mut(&mut self, id: DropTargetId) -> Option<&mut DropTargetRecord<P>> {
        self.entries
            .iter_mut()
            .find(|(entry, _)| *entry == id)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First target (in registration order) containing `point`.
    pub fn hit_test(&self, point: Point, chrome_offset: f64) -> Option<DropTargetId> {
        self.entries
            .iter()
            .find(|(_, record)| record.contains(point, chrome_offset))
            .map(|(id, _)| *id)
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (DropTargetId, &mut DropTargetRecord<P>)> + '_ {
        self.entries.iter_mut().map(|(id, record)| (*id, record))
    }

    fn position(&self, id: DropTargetId) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| *entry == id)
    }
}

impl<P> Default for DropTargetRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for DropTargetRegistry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, record)| (id, record)))
            .finish()
    }
}
