//! Grid widget: draws the visible cells of a [`GridController`] snapshot.

use super::projection::Projection;
use super::styles::GridStyles;
use crate::grid::{CellPosition, CoordinateSpace, GridCell, Offset};
use crate::model::ContentItem;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

const ELLIPSIS: char = '…';

/// Renders grid cells projected into a terminal area.
pub struct GridView<'a> {
    cells: &'a [GridCell],
    space: &'a CoordinateSpace,
    offset: Offset,
    projection: Projection,
    styles: &'a GridStyles,
    focused: Option<CellPosition>,
}

impl<'a> GridView<'a> {
    /// Create a widget for one frame.
    pub fn new(
        cells: &'a [GridCell],
        space: &'a CoordinateSpace,
        offset: Offset,
        projection: Projection,
        styles: &'a GridStyles,
    ) -> Self {
        Self {
            cells,
            space,
            offset,
            projection,
            styles,
            focused: None,
        }
    }

    /// Highlight one cell.
    pub fn focused(mut self, position: Option<CellPosition>) -> Self {
        self.focused = position;
        self
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = (self.space.cell_width(), self.space.cell_height());
        // Row-major order: a staggered cell overlapping the row below is drawn under it
        for cell in self.cells {
            let origin = self.space.cell_origin(*cell.position, self.offset);
            let Some(rect) = self.projection.project(area, origin, size) else {
                continue;
            };
            let is_focused = self.focused == Some(*cell.position);
            render_cell(cell.content.as_deref(), is_focused, rect, buf, self.styles);
        }
    }
}

fn render_cell(
    content: Option<&ContentItem>,
    focused: bool,
    rect: Rect,
    buf: &mut Buffer,
    styles: &GridStyles,
) {
    let border_style = match (content, focused) {
        (_, true) => styles.focused_border,
        (Some(_), false) => styles.filled_border,
        (None, false) => styles.empty_border,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(rect);
    block.render(rect, buf);

    let Some(item) = content else {
        return;
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    Paragraph::new(cell_lines(item, inner.width, styles)).render(inner, buf);
}

/// Title, then details, then genres; each line fitted to `width` columns.
fn cell_lines(item: &ContentItem, width: u16, styles: &GridStyles) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&item.title, width),
        styles.title,
    ))];

    let details: Vec<String> = item
        .year
        .map(|y| y.to_string())
        .into_iter()
        .chain(item.media_type.clone())
        .collect();
    if !details.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&details.join(" · "), width),
            styles.details,
        )));
    }
    if !item.genres.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&item.genres.join(", "), width),
            styles.details,
        )));
    }
    lines
}

/// Fit `text` into `max_width` display columns, marking cuts with an ellipsis.
pub fn truncate_to_width(text: &str, max_width: u16) -> String {
    let max = usize::from(max_width);
    if max == 0 {
        return String::new();
    }
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push(ELLIPSIS);
    out
}
