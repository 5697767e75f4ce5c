//! Public facade over the drag-grid engine.
//!
//! `GridController` owns every piece of grid state. It never talks to a
//! provider: operations that may need data return an `Option<LoadRequest>`,
//! the caller executes it however it likes (worker thread, test stub) and
//! hands the result back through [`GridController::complete_load`].

use super::batch_loader::{BatchLoader, LoadOutcome, LoadRequest, LoadState, LoadTicket};
use super::cell_store::CellStore;
use super::config::GridConfig;
use super::coordinates::{CoordinateSpace, Offset, ScanOrder, ScreenSize, Viewport};
use super::focus::{self, FocusTarget};
use super::position::{CellPosition, PositionCache};
use crate::model::{ContentItem, Filter, GridError, ProviderError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use tracing::{debug, info};

/// One cell of the current viewport, ready for rendering.
#[derive(Debug, Clone)]
pub struct GridCell {
    /// Interned position; the same allocation is handed out until evicted.
    pub position: Rc<CellPosition>,
    /// Placed content, if any.
    pub content: Option<Rc<ContentItem>>,
    /// Vertical zigzag offset of this cell.
    pub stagger: f32,
}

/// Infinite virtualized grid.
#[derive(Debug)]
pub struct GridController {
    config: GridConfig,
    space: CoordinateSpace,
    store: CellStore,
    positions: PositionCache,
    loader: BatchLoader,
    offset: Offset,
    viewport: Viewport,
    filter: Filter,
    rng: StdRng,
}

impl GridController {
    /// Create a controller with an entropy-seeded RNG.
    pub fn new(config: GridConfig, screen: ScreenSize) -> Result<Self, GridError> {
        Self::with_rng(config, screen, StdRng::from_entropy())
    }

    /// Create a controller whose random picks are reproducible.
    pub fn with_seed(config: GridConfig, screen: ScreenSize, seed: u64) -> Result<Self, GridError> {
        Self::with_rng(config, screen, StdRng::seed_from_u64(seed))
    }

    /// Create a controller with an explicit RNG.
    pub fn with_rng(config: GridConfig, screen: ScreenSize, rng: StdRng) -> Result<Self, GridError> {
        config.validate()?;
        let space = CoordinateSpace::new(&config, screen);
        let offset = focus::target_offset_for(&space, CellPosition::ORIGIN);
        let viewport = space.viewport_at(offset);
        Ok(Self {
            positions: PositionCache::new(config.position_cache_limit),
            loader: BatchLoader::new(&config),
            store: CellStore::new(),
            filter: Filter::any(),
            config,
            space,
            offset,
            viewport,
            rng,
        })
    }

    /// Offset that centers cell (0, 0).
    pub fn initial_offset(&self) -> Offset {
        focus::target_offset_for(&self.space, CellPosition::ORIGIN)
    }

    /// Move to the initial offset and issue the seed request.
    pub fn start(&mut self) -> Option<LoadRequest> {
        self.offset = self.initial_offset();
        self.viewport = self.space.viewport_at(self.offset);
        info!(viewport = ?self.viewport, filter = %self.filter.describe(), "Grid started");
        self.loader
            .evaluate(&self.store, &self.filter, &self.viewport, None)
    }

    /// Apply a new drag offset.
    ///
    /// Recomputes the viewport and asks the loader whether the newly
    /// revealed cells warrant a fetch.
    pub fn update_viewport(&mut self, offset_x: f32, offset_y: f32) -> Option<LoadRequest> {
        self.offset = Offset::new(offset_x, offset_y);
        let previous = self.viewport;
        self.viewport = self.space.viewport_at(self.offset);
        if self.viewport == previous && self.loader.is_seeded() {
            return None;
        }
        debug!(viewport = ?self.viewport, "Viewport changed");
        self.loader
            .evaluate(&self.store, &self.filter, &self.viewport, Some(&previous))
    }

    /// Shift the current offset by a drag delta.
    pub fn drag_by(&mut self, dx: f32, dy: f32) -> Option<LoadRequest> {
        let next = self.offset.translate(dx, dy);
        self.update_viewport(next.x, next.y)
    }

    /// Feed a provider result back into the grid.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ContentItem>, ProviderError>,
    ) -> LoadOutcome {
        self.loader.complete(&mut self.store, ticket, result)
    }

    /// Cells of the current viewport in row-major order.
    pub fn visible_cells(&mut self) -> Vec<GridCell> {
        let mut cells = Vec::with_capacity(self.viewport.cell_count());
        for position in self.viewport.cells(ScanOrder::RowMajor) {
            cells.push(GridCell {
                position: self.positions.intern(position.row, position.col),
                content: self.store.get(&position).cloned(),
                stagger: self.space.stagger(position.row, position.col),
            });
        }
        cells
    }

    /// Random occupied cell plus the offset that centers it.
    pub fn pick_focus_target(&mut self) -> Option<FocusTarget> {
        let (item, position) = focus::pick_random(&self.store, &mut self.rng)?;
        let offset = focus::target_offset_for(&self.space, position);
        debug!(id = %item.id, %position, "Picked focus target");
        Some(FocusTarget {
            item,
            position,
            offset,
        })
    }

    /// Clear all content and re-seed under the current filter.
    ///
    /// Completions of requests issued before the reset are discarded.
    pub fn reset(&mut self) -> Option<LoadRequest> {
        self.store.reset();
        self.loader.reset();
        self.start()
    }

    /// Switch the provider filter; resets the grid.
    pub fn set_filter(&mut self, filter: Filter) -> Option<LoadRequest> {
        info!(filter = %filter.describe(), "Filter changed");
        self.filter = filter;
        self.reset()
    }

    /// Adapt to a new screen size, keeping the current offset.
    pub fn resize(&mut self, width: f32, height: f32) -> Option<LoadRequest> {
        self.space.set_screen(ScreenSize::new(width, height));
        self.update_viewport(self.offset.x, self.offset.y)
    }

    /// Current drag offset.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// False once the provider reported exhaustion.
    pub fn has_more(&self) -> bool {
        self.loader.has_more()
    }

    /// Loader state.
    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    /// Current load epoch.
    pub fn epoch(&self) -> u64 {
        self.loader.epoch()
    }

    /// Placed content.
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// Grid metrics and screen size.
    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    /// Active filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Validated grid configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Interned positions currently cached.
    pub fn cached_positions(&self) -> usize {
        self.positions.len()
    }
}
