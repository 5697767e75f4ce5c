//! Grid engine configuration.

use crate::model::GridError;
use serde::{Deserialize, Serialize};

/// Externally supplied constants for the drag grid.
///
/// Units are whatever the renderer measures offsets in (pixels on a phone,
/// virtual pixels in the terminal explorer). All lengths share that unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Width of one cell.
    pub cell_width: f32,
    /// Height of one cell.
    pub cell_height: f32,
    /// Extra cells kept around the visible area on every side.
    pub buffer_cells: u32,
    /// Items requested per provider call.
    pub batch_size: usize,
    /// Newly revealed empty cells needed before a load is triggered.
    pub min_empty_cells_to_load: usize,
    /// Maximum number of interned cell positions.
    pub position_cache_limit: usize,
    /// Vertical stagger applied to alternating cells.
    pub zigzag_value: f32,
    /// Column count used to derive stagger parity.
    pub zigzag_columns: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 256.0,
            cell_height: 380.0,
            buffer_cells: 2,
            batch_size: 30,
            min_empty_cells_to_load: 10,
            position_cache_limit: 512,
            zigzag_value: 40.0,
            zigzag_columns: 2,
        }
    }
}

impl GridConfig {
    /// Check every field for usable values.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), GridError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), GridError> {
            Err(GridError::InvalidConfig {
                field,
                reason: reason.into(),
            })
        }

        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return invalid("cell_width", format!("must be > 0 (got {})", self.cell_width));
        }
        if !(self.cell_height.is_finite() && self.cell_height > 0.0) {
            return invalid(
                "cell_height",
                format!("must be > 0 (got {})", self.cell_height),
            );
        }
        if self.batch_size == 0 {
            return invalid("batch_size", "must be > 0");
        }
        if self.min_empty_cells_to_load == 0 {
            return invalid("min_empty_cells_to_load", "must be > 0");
        }
        if self.position_cache_limit == 0 {
            return invalid("position_cache_limit", "must be > 0");
        }
        if !(self.zigzag_value.is_finite() && self.zigzag_value >= 0.0) {
            return invalid(
                "zigzag_value",
                format!("must be >= 0 (got {})", self.zigzag_value),
            );
        }
        // A stagger of a full cell would make neighbouring rows indistinguishable.
        if self.zigzag_value >= self.cell_height {
            return invalid(
                "zigzag_value",
                format!(
                    "must be smaller than cell_height ({} >= {})",
                    self.zigzag_value, self.cell_height
                ),
            );
        }
        if self.zigzag_columns < 1 {
            return invalid(
                "zigzag_columns",
                format!("must be >= 1 (got {})", self.zigzag_columns),
            );
        }
        // Staggered cells can hang over the top edge; one buffer row covers them.
        if self.zigzag_value > 0.0 && self.buffer_cells == 0 {
            return invalid("buffer_cells", "must be >= 1 when zigzag_value > 0");
        }
        Ok(())
    }
}
