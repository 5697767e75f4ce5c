//! Infinite virtualized drag-grid engine.
//!
//! - [`coordinates`]: offset ↔ viewport math and zigzag layout
//! - [`cell_store`] / [`position`]: cell → content mapping, position interning
//! - [`batch_loader`]: single-flight load state machine
//! - [`placement`]: spiral seeding around the origin
//! - [`focus`]: random pick and re-centering offset
//! - [`controller`]: facade composing the above

pub mod batch_loader;
pub mod cell_store;
pub mod config;
pub mod controller;
pub mod coordinates;
pub mod focus;
pub mod placement;
pub mod position;

pub use batch_loader::{BatchLoader, LoadKind, LoadOutcome, LoadRequest, LoadState, LoadTicket};
pub use cell_store::CellStore;
pub use config::GridConfig;
pub use controller::{GridCell, GridController};
pub use coordinates::{
    compute_viewport, zigzag_offset, CoordinateSpace, Offset, ScanOrder, ScreenSize, Viewport,
};
pub use focus::{pick_random, target_offset_for, FocusTarget};
pub use placement::{seed, spiral_positions};
pub use position::{CellPosition, PositionCache};
