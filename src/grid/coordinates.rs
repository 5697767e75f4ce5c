//! Offset ↔ viewport math and zigzag layout.
//!
//! Everything here is pure. The caller owns the drag offset; this module only
//! turns it into discrete cell ranges and back.

use super::config::GridConfig;
use super::position::CellPosition;
use serde::{Deserialize, Serialize};

/// Continuous drag translation of the grid content.
///
/// Positive `x` moves content right, positive `y` moves it down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal translation.
    pub x: f32,
    /// Vertical translation.
    pub y: f32,
}

impl Offset {
    /// No translation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new offset.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset moved by a drag delta.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation towards `target`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, target: Offset, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

/// Screen (renderer surface) size in offset units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
}

impl ScreenSize {
    /// Create a new screen size. Negative or non-finite values collapse to 0.
    pub fn new(width: f32, height: f32) -> Self {
        fn sanitize(v: f32) -> f32 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }
}

/// Order in which cells of a rectangular range are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Row by row, left to right.
    #[default]
    RowMajor,
    /// Column by column, top to bottom.
    ColumnMajor,
}

/// Rectangular, inclusive range of cells eligible for rendering.
///
/// # Invariants
/// - `start_row <= end_row` and `start_col <= end_col`
/// - covers the visible screen plus `buffer` cells on every side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    /// First row (inclusive).
    pub start_row: i32,
    /// Last row (inclusive).
    pub end_row: i32,
    /// First column (inclusive).
    pub start_col: i32,
    /// Last column (inclusive).
    pub end_col: i32,
}

impl Viewport {
    /// Check if `(row, col)` lies inside the range.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    /// Check if a position lies inside the range.
    pub fn contains_position(&self, position: CellPosition) -> bool {
        self.contains(position.row, position.col)
    }

    /// Number of rows covered.
    pub fn row_count(&self) -> usize {
        (self.end_row as i64 - self.start_row as i64 + 1).max(0) as usize
    }

    /// Number of columns covered.
    pub fn col_count(&self) -> usize {
        (self.end_col as i64 - self.start_col as i64 + 1).max(0) as usize
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Iterate over every position in the range.
    pub fn cells(&self, order: ScanOrder) -> ViewportCells {
        ViewportCells {
            viewport: *self,
            order,
            index: 0,
            total: self.cell_count(),
        }
    }
}

/// Iterator over the positions of a [`Viewport`].
#[derive(Debug, Clone)]
pub struct ViewportCells {
    viewport: Viewport,
    order: ScanOrder,
    index: usize,
    total: usize,
}

impl Iterator for ViewportCells {
    type Item = CellPosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let vp = &self.viewport;
        let i = self.index;
        self.index += 1;

        let (row_step, col_step) = match self.order {
            ScanOrder::RowMajor => (i / vp.col_count(), i % vp.col_count()),
            ScanOrder::ColumnMajor => (i % vp.row_count(), i / vp.row_count()),
        };
        Some(CellPosition::new(
            (i64::from(vp.start_row) + row_step as i64) as i32,
            (i64::from(vp.start_col) + col_step as i64) as i32,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ViewportCells {}

/// Compute the cell range to render for a drag offset.
///
/// `start_col = floor(-offset_x / cell_width) - buffer` and
/// `end_col = start_col + ceil(screen_width / cell_width) + 2 * buffer`;
/// rows are symmetric. The cell under the screen center is always inside the
/// result. Far offsets saturate at the `i32` edge of the grid with the span
/// kept intact.
pub fn compute_viewport(
    offset_x: f32,
    offset_y: f32,
    cell_width: f32,
    cell_height: f32,
    screen_width: f32,
    screen_height: f32,
    buffer: i32,
) -> Viewport {
    let (start_col, end_col) = axis_range(offset_x, cell_width, screen_width, buffer);
    let (start_row, end_row) = axis_range(offset_y, cell_height, screen_height, buffer);

    Viewport {
        start_row,
        end_row,
        start_col,
        end_col,
    }
}

/// Inclusive cell range along one axis, clamped so `start <= end` holds.
fn axis_range(offset: f32, cell: f32, screen: f32, buffer: i32) -> (i32, i32) {
    let buffer = i64::from(buffer);
    let span = ((screen / cell).ceil() as i64 + 2 * buffer).clamp(0, i64::from(i32::MAX));
    let start = ((-offset / cell).floor() as i64 - buffer)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX) - span);
    (start as i32, (start + span) as i32)
}

/// Vertical stagger of a cell.
///
/// Returns `zigzag_value` when `row * columns + col` is even, else `0`.
/// Parity is Euclidean so negative coordinates alternate the same way.
pub fn zigzag_offset(row: i32, col: i32, columns: i32, zigzag_value: f32) -> f32 {
    let index = row as i64 * columns as i64 + col as i64;
    if index.rem_euclid(2) == 0 {
        zigzag_value
    } else {
        0.0
    }
}

/// Grid metrics bound to a screen size.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSpace {
    cell_width: f32,
    cell_height: f32,
    buffer: i32,
    zigzag_value: f32,
    zigzag_columns: i32,
    screen: ScreenSize,
}

impl CoordinateSpace {
    /// Build a coordinate space from a (validated) config.
    pub fn new(config: &GridConfig, screen: ScreenSize) -> Self {
        Self {
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            buffer: config.buffer_cells.min(i32::MAX as u32) as i32,
            zigzag_value: config.zigzag_value,
            zigzag_columns: config.zigzag_columns,
            screen,
        }
    }

    /// Width of one cell.
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one cell.
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Current screen size.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Replace the screen size (e.g. on resize).
    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// Viewport for an offset.
    pub fn viewport_at(&self, offset: Offset) -> Viewport {
        compute_viewport(
            offset.x,
            offset.y,
            self.cell_width,
            self.cell_height,
            self.screen.width,
            self.screen.height,
            self.buffer,
        )
    }

    /// Vertical stagger of a cell in this space.
    pub fn stagger(&self, row: i32, col: i32) -> f32 {
        zigzag_offset(row, col, self.zigzag_columns, self.zigzag_value)
    }

    /// Top-left corner of a rendered cell, stagger included.
    pub fn cell_origin(&self, position: CellPosition, offset: Offset) -> (f32, f32) {
        let x = position.col as f32 * self.cell_width + offset.x;
        let y = position.row as f32 * self.cell_height
            + self.stagger(position.row, position.col)
            + offset.y;
        (x, y)
    }

    /// Cell whose rendered rectangle holds the screen center.
    ///
    /// Stagger only pushes cells down and stays below one cell height, so the
    /// candidates are the unstaggered row and the row above it. When staggered
    /// neighbours overlap, the one whose center is nearest wins.
    pub fn center_cell(&self, offset: Offset) -> CellPosition {
        let cx = self.screen.width / 2.0 - offset.x;
        let cy = self.screen.height / 2.0 - offset.y;
        let col = (cx / self.cell_width).floor() as i32;
        let base_row = (cy / self.cell_height).floor() as i32;

        let mut best: Option<(i32, f32)> = None;
        for row in [base_row, base_row.saturating_sub(1)] {
            let top = row as f32 * self.cell_height + self.stagger(row, col);
            if cy >= top && cy < top + self.cell_height {
                let distance = (top + self.cell_height / 2.0 - cy).abs();
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((row, distance));
                }
            }
        }

        let row = best.map_or(base_row, |(row, _)| row);
        CellPosition::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(zigzag: f32, columns: i32) -> CoordinateSpace {
        let config = GridConfig {
            zigzag_value: zigzag,
            zigzag_columns: columns,
            ..GridConfig::default()
        };
        CoordinateSpace::new(&config, ScreenSize::new(800.0, 600.0))
    }

    mod viewport_math {
        use super::*;

        #[test]
        fn reference_scenario_viewport() {
            let vp = compute_viewport(272.0, 110.0, 256.0, 380.0, 800.0, 600.0, 2);
            insta::assert_debug_snapshot!(vp, @r"
            Viewport {
                start_row: -3,
                end_row: 3,
                start_col: -4,
                end_col: 4,
            }
            ");
            assert!(vp.contains(0, 0));
        }

        #[test]
        fn far_offsets_saturate_without_inverting() {
            let offsets = [
                (-1.0e12, 0.0),
                (1.0e12, -1.0e12),
                (0.0, 1.0e12),
                (f32::MAX, f32::MIN),
            ];
            for (x, y) in offsets {
                let vp = compute_viewport(x, y, 256.0, 380.0, 800.0, 600.0, 2);
                assert!(vp.start_row <= vp.end_row, "{vp:?}");
                assert!(vp.start_col <= vp.end_col, "{vp:?}");
                assert_eq!((vp.row_count(), vp.col_count()), (7, 9));

                let cells: Vec<_> = vp.cells(ScanOrder::RowMajor).collect();
                assert_eq!(cells.len(), vp.cell_count());
                assert_eq!(cells.last(), Some(&CellPosition::new(vp.end_row, vp.end_col)));
            }
        }

        #[test]
        fn far_offsets_keep_center_cell_in_view() {
            let space = space(40.0, 2);
            for (x, y) in [(-1.0e12, -1.0e12), (1.0e12, 1.0e12), (-1.0e12, 1.0e12)] {
                let offset = Offset::new(x, y);
                let center = space.center_cell(offset);
                let vp = space.viewport_at(offset);
                assert!(vp.contains_position(center), "{center} not in {vp:?}");
            }
        }

        #[test]
        fn zero_offset_starts_at_minus_buffer() {
            let vp = compute_viewport(0.0, 0.0, 100.0, 100.0, 300.0, 200.0, 1);
            assert_eq!(vp.start_col, -1);
            assert_eq!(vp.end_col, -1 + 3 + 2);
            assert_eq!(vp.start_row, -1);
            assert_eq!(vp.end_row, -1 + 2 + 2);
        }

        #[test]
        fn dragging_left_reveals_columns_to_the_right() {
            let before = compute_viewport(0.0, 0.0, 100.0, 100.0, 300.0, 200.0, 1);
            let after = compute_viewport(-250.0, 0.0, 100.0, 100.0, 300.0, 200.0, 1);
            assert_eq!(after.start_col, before.start_col + 2);
            assert_eq!(after.col_count(), before.col_count());
        }

        #[test]
        fn partial_cells_round_up() {
            let vp = compute_viewport(0.0, 0.0, 100.0, 100.0, 301.0, 100.0, 0);
            assert_eq!(vp.col_count(), 5, "ceil(3.01) + 1 inclusive");
        }
    }

    mod viewport_cells {
        use super::*;

        fn vp() -> Viewport {
            Viewport {
                start_row: 0,
                end_row: 1,
                start_col: 5,
                end_col: 7,
            }
        }

        #[test]
        fn row_major_iterates_rows_first() {
            let cells: Vec<_> = vp().cells(ScanOrder::RowMajor).collect();
            assert_eq!(
                cells,
                vec![
                    CellPosition::new(0, 5),
                    CellPosition::new(0, 6),
                    CellPosition::new(0, 7),
                    CellPosition::new(1, 5),
                    CellPosition::new(1, 6),
                    CellPosition::new(1, 7),
                ]
            );
        }

        #[test]
        fn column_major_iterates_columns_first() {
            let cells: Vec<_> = vp().cells(ScanOrder::ColumnMajor).collect();
            assert_eq!(cells[0], CellPosition::new(0, 5));
            assert_eq!(cells[1], CellPosition::new(1, 5));
            assert_eq!(cells[2], CellPosition::new(0, 6));
            assert_eq!(cells.len(), 6);
        }

        #[test]
        fn iterator_len_matches_cell_count() {
            assert_eq!(vp().cells(ScanOrder::RowMajor).len(), vp().cell_count());
        }
    }

    mod zigzag {
        use super::*;

        #[test]
        fn even_index_gets_stagger() {
            assert_eq!(zigzag_offset(0, 0, 2, 40.0), 40.0);
            assert_eq!(zigzag_offset(0, 1, 2, 40.0), 0.0);
            assert_eq!(zigzag_offset(3, 2, 2, 40.0), 40.0);
        }

        #[test]
        fn negative_coordinates_alternate() {
            assert_eq!(zigzag_offset(0, -1, 2, 40.0), 0.0);
            assert_eq!(zigzag_offset(0, -2, 2, 40.0), 40.0);
            assert_eq!(zigzag_offset(-1, -1, 3, 40.0), 40.0);
        }

        #[test]
        fn odd_columns_give_checkerboard() {
            assert_eq!(zigzag_offset(0, 0, 3, 10.0), 10.0);
            assert_eq!(zigzag_offset(1, 0, 3, 10.0), 0.0);
        }
    }

    mod center_cell {
        use super::*;

        #[test]
        fn origin_centered_offset_hits_origin() {
            let space = space(0.0, 2);
            assert_eq!(
                space.center_cell(Offset::new(272.0, 110.0)),
                CellPosition::ORIGIN
            );
        }

        #[test]
        fn stagger_moves_hit_to_row_above() {
            let space = space(100.0, 2);
            // Column 0 is staggered by 100; the point 50 below row 1's
            // unstaggered top still belongs to row 0.
            let offset = Offset::new(400.0 - 128.0, 300.0 - 430.0);
            assert_eq!(space.center_cell(offset), CellPosition::new(0, 0));
        }

        #[test]
        fn cell_origin_includes_stagger() {
            let space = space(40.0, 2);
            let (x, y) = space.cell_origin(CellPosition::new(1, 2), Offset::new(10.0, 20.0));
            assert_eq!(x, 2.0 * 256.0 + 10.0);
            assert_eq!(y, 380.0 + 40.0 + 20.0);
        }
    }

    #[test]
    fn offset_lerp_clamps() {
        let a = Offset::ZERO;
        let b = Offset::new(10.0, -10.0);
        assert_eq!(a.lerp(b, 0.5), Offset::new(5.0, -5.0));
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.translate(1.0, 2.0), Offset::new(1.0, 2.0));
    }

    #[test]
    fn screen_size_sanitizes_negative_values() {
        let screen = ScreenSize::new(-5.0, f32::NAN);
        assert_eq!(screen, ScreenSize::new(0.0, 0.0));
    }
}
