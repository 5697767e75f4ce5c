//! Cell → content mapping with session-wide id de-duplication.

use super::coordinates::{ScanOrder, Viewport};
use super::position::CellPosition;
use crate::model::{ContentId, ContentItem};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, warn};

/// Owned store of placed content.
///
/// # Invariants
/// - every `ContentId` occupies at most one position, ever (until `reset`)
/// - a filled cell is never overwritten
///
/// Only the initial placement, a successful batch completion and `reset`
/// mutate the store.
#[derive(Debug, Default)]
pub struct CellStore {
    cells: HashMap<CellPosition, Rc<ContentItem>>,
    loaded_ids: HashSet<ContentId>,
}

impl CellStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Content placed at a position, if any.
    pub fn get(&self, position: &CellPosition) -> Option<&Rc<ContentItem>> {
        self.cells.get(position)
    }

    /// Check if a position holds content.
    pub fn is_filled(&self, position: &CellPosition) -> bool {
        self.cells.contains_key(position)
    }

    /// Check if an id has already been placed in this session.
    pub fn is_loaded(&self, id: &ContentId) -> bool {
        self.loaded_ids.contains(id)
    }

    /// Every id placed in this session.
    pub fn loaded_ids(&self) -> impl Iterator<Item = &ContentId> {
        self.loaded_ids.iter()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over occupied cells.
    pub fn occupied(&self) -> impl Iterator<Item = (&CellPosition, &Rc<ContentItem>)> {
        self.cells.iter()
    }

    /// Fill empty cells of `range` with `items`, visiting cells in `order`.
    ///
    /// Filled cells are skipped. Items whose id is already loaded are dropped.
    /// Items left over once the range is full are discarded without being
    /// marked as loaded, so the provider may offer them again later.
    ///
    /// Returns the number of items placed.
    pub fn assign_batch(
        &mut self,
        items: Vec<ContentItem>,
        range: &Viewport,
        order: ScanOrder,
    ) -> usize {
        self.assign_at(items, range.cells(order))
    }

    /// Place `items` into the empty cells of an explicit position sequence.
    ///
    /// Same de-duplication rules as [`CellStore::assign_batch`]. `positions`
    /// may be infinite; iteration stops once the items run out.
    pub fn assign_at(
        &mut self,
        items: Vec<ContentItem>,
        positions: impl IntoIterator<Item = CellPosition>,
    ) -> usize {
        let mut pending = items.into_iter();
        let mut placed = 0;

        'cells: for position in positions {
            if self.cells.contains_key(&position) {
                continue;
            }
            loop {
                let Some(item) = pending.next() else {
                    break 'cells;
                };
                if self.loaded_ids.contains(&item.id) {
                    warn!(id = %item.id, "Dropping already placed content item");
                    continue;
                }
                self.loaded_ids.insert(item.id.clone());
                self.cells.insert(position, Rc::new(item));
                placed += 1;
                break;
            }
        }

        let leftover = pending.count();
        if leftover > 0 {
            debug!(leftover, placed, "Range full, discarding surplus items");
        }
        placed
    }

    /// Count cells of `current` that are empty and were not in `previous`.
    ///
    /// Cells already known to be empty are not counted again. With no
    /// previous viewport every empty cell counts.
    pub fn count_empty_new_cells(&self, current: &Viewport, previous: Option<&Viewport>) -> usize {
        current
            .cells(ScanOrder::RowMajor)
            .filter(|p| !previous.is_some_and(|prev| prev.contains_position(*p)))
            .filter(|p| !self.cells.contains_key(p))
            .count()
    }

    /// Clear all placements and the loaded-id set.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.loaded_ids.clear();
    }
}

#[cfg(test)]
#[path = "cell_store_tests.rs"]
mod tests;
