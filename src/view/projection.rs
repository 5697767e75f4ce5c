//! Grid pixels ↔ terminal cells.
//!
//! The engine works in pixel units. The explorer maps a fixed number of
//! pixels onto one terminal column and one terminal row.

use crate::config::ViewSettings;
use crate::grid::ScreenSize;
use ratatui::layout::Rect;

/// Pixel-to-terminal scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    px_per_column: f32,
    px_per_row: f32,
}

impl Projection {
    /// Build from resolved view settings.
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            px_per_column: settings.px_per_column,
            px_per_row: settings.px_per_row,
        }
    }

    /// Pixel size of a terminal area.
    pub fn screen_size(&self, area: Rect) -> ScreenSize {
        ScreenSize::new(
            f32::from(area.width) * self.px_per_column,
            f32::from(area.height) * self.px_per_row,
        )
    }

    /// Pixel delta of a mouse move.
    pub fn drag_delta(&self, columns: i32, rows: i32) -> (f32, f32) {
        (
            columns as f32 * self.px_per_column,
            rows as f32 * self.px_per_row,
        )
    }

    /// Terminal rectangle of a pixel rectangle, clipped to `area`.
    ///
    /// `origin` is relative to the top-left of `area`. Returns `None` when
    /// nothing of the rectangle is visible.
    pub fn project(&self, area: Rect, origin: (f32, f32), size: (f32, f32)) -> Option<Rect> {
        let left = (origin.0 / self.px_per_column).floor() as i64;
        let top = (origin.1 / self.px_per_row).floor() as i64;
        let right = ((origin.0 + size.0) / self.px_per_column).floor() as i64;
        let bottom = ((origin.1 + size.1) / self.px_per_row).floor() as i64;

        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = right.min(i64::from(area.width));
        let y1 = bottom.min(i64::from(area.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(Rect::new(
            area.x + x0 as u16,
            area.y + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}
