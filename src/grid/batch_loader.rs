//! Single-flight, viewport-triggered load state machine.
//!
//! ```text
//! Idle ──(threshold met)──▶ Loading ──(items)────▶ Idle
//!                              │ ──(error)────▶ Idle      (retry on next viewport change)
//!                              └──(empty)─────▶ Exhausted (terminal until reset)
//! ```
//!
//! The loader never performs I/O itself. It hands out [`LoadRequest`]s and the
//! owner feeds results back through [`BatchLoader::complete`]. Every request
//! carries a [`LoadTicket`] stamped with the epoch active when it was issued;
//! `reset` bumps the epoch so late completions are recognized and discarded.

use super::cell_store::CellStore;
use super::config::GridConfig;
use super::coordinates::{ScanOrder, Viewport};
use super::placement;
use crate::model::{ContentId, ContentItem, Filter, ProviderError};
use tracing::{debug, info, warn};

/// Loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No request outstanding.
    #[default]
    Idle,
    /// One request outstanding.
    Loading,
    /// Provider reported no more content; terminal until reset.
    Exhausted,
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    id: u64,
    epoch: u64,
}

impl LoadTicket {
    /// Sequence number of the request.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Epoch the request was issued in.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Why a request was issued, and where its items go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First batch after construction or reset; placed along the spiral.
    Seed,
    /// Batch triggered by a viewport change; placed into this range.
    Viewport(Viewport),
}

/// A provider call the owner must execute.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Ticket to hand back with the result.
    pub ticket: LoadTicket,
    /// Placement target.
    pub kind: LoadKind,
    /// Every id placed so far; the provider must not return them.
    pub exclude_ids: Vec<ContentId>,
    /// Number of items to ask for.
    pub batch_size: usize,
    /// Active filter.
    pub filter: Filter,
}

/// Result of feeding a completion back into the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were placed (count may be 0 if every item was a duplicate).
    Placed(usize),
    /// Provider returned nothing; no further requests until reset.
    Exhausted,
    /// Provider failed; loader is idle again and will retry on demand.
    Failed(ProviderError),
    /// Completion belongs to an older epoch or an unknown ticket; ignored.
    Stale,
}

/// Load state machine.
///
/// # Invariants
/// - at most one outstanding request
/// - once exhausted, no request is issued until `reset`
#[derive(Debug)]
pub struct BatchLoader {
    state: LoadState,
    has_more: bool,
    seeded: bool,
    epoch: u64,
    next_id: u64,
    in_flight: Option<(LoadTicket, LoadKind)>,
    batch_size: usize,
    min_empty_cells: usize,
}

impl BatchLoader {
    /// Create an idle loader.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            state: LoadState::Idle,
            has_more: true,
            seeded: false,
            epoch: 0,
            next_id: 0,
            in_flight: None,
            batch_size: config.batch_size,
            min_empty_cells: config.min_empty_cells_to_load,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// False once the provider has returned an empty batch.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// True once the first batch has been placed.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Ticket of the outstanding request, if any.
    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.in_flight.map(|(ticket, _)| ticket)
    }

    /// Decide whether a viewport change needs a provider call.
    ///
    /// Until the first batch has been placed the answer is always a seed
    /// request. Afterwards a request is issued only when idle, not exhausted,
    /// and at least `min_empty_cells_to_load` newly revealed cells are empty.
    pub fn evaluate(
        &mut self,
        store: &CellStore,
        filter: &Filter,
        current: &Viewport,
        previous: Option<&Viewport>,
    ) -> Option<LoadRequest> {
        match self.state {
            LoadState::Idle => {}
            LoadState::Loading => {
                debug!("Load in flight, viewport change dropped");
                return None;
            }
            LoadState::Exhausted => return None,
        }
        if !self.has_more {
            return None;
        }

        if !self.seeded {
            return Some(self.issue(store, filter, LoadKind::Seed));
        }

        let empty_new = store.count_empty_new_cells(current, previous);
        if empty_new < self.min_empty_cells {
            return None;
        }

        debug!(
            empty_new,
            threshold = self.min_empty_cells,
            "Viewport revealed enough empty cells, loading"
        );
        Some(self.issue(store, filter, LoadKind::Viewport(*current)))
    }

    fn issue(&mut self, store: &CellStore, filter: &Filter, kind: LoadKind) -> LoadRequest {
        let ticket = LoadTicket {
            id: self.next_id,
            epoch: self.epoch,
        };
        self.next_id += 1;
        self.state = LoadState::Loading;
        self.in_flight = Some((ticket, kind));

        LoadRequest {
            ticket,
            kind,
            exclude_ids: store.loaded_ids().cloned().collect(),
            batch_size: self.batch_size,
            filter: filter.clone(),
        }
    }

    /// Apply a provider result.
    ///
    /// Results for anything but the outstanding ticket of the current epoch
    /// are discarded as [`LoadOutcome::Stale`] and leave all state untouched.
    pub fn complete(
        &mut self,
        store: &mut CellStore,
        ticket: LoadTicket,
        result: Result<Vec<ContentItem>, ProviderError>,
    ) -> LoadOutcome {
        let kind = match self.in_flight {
            Some((expected, kind)) if expected == ticket => kind,
            _ => {
                debug!(
                    ticket = ticket.id,
                    ticket_epoch = ticket.epoch,
                    epoch = self.epoch,
                    "Discarding stale load completion"
                );
                return LoadOutcome::Stale;
            }
        };
        self.in_flight = None;

        match result {
            Err(err) => {
                warn!(error = %err, ticket = ticket.id, "Content load failed");
                self.state = LoadState::Idle;
                LoadOutcome::Failed(err)
            }
            Ok(items) if items.is_empty() => {
                info!(ticket = ticket.id, "Provider exhausted");
                self.has_more = false;
                self.state = LoadState::Exhausted;
                LoadOutcome::Exhausted
            }
            Ok(items) => {
                let placed = match kind {
                    LoadKind::Seed => {
                        let placed = placement::seed(store, items);
                        self.seeded = placed > 0;
                        placed
                    }
                    LoadKind::Viewport(range) => {
                        store.assign_batch(items, &range, ScanOrder::RowMajor)
                    }
                };
                debug!(ticket = ticket.id, placed, "Batch applied");
                self.state = LoadState::Idle;
                LoadOutcome::Placed(placed)
            }
        }
    }

    /// Forget everything: new epoch, idle, not exhausted, not seeded.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.in_flight = None;
        self.state = LoadState::Idle;
        self.has_more = true;
        self.seeded = false;
        info!(epoch = self.epoch, "Loader reset");
    }
}

#[cfg(test)]
#[path = "batch_loader_tests.rs"]
mod tests;
