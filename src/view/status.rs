//! One-line status bar below the grid.

use super::styles::GridStyles;
use crate::grid::{CellPosition, LoadState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

/// Snapshot of what the status bar shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo {
    /// Active filter, as described by `Filter::describe`.
    pub filter: String,
    /// Number of placed items.
    pub placed: usize,
    /// Loader state.
    pub load_state: LoadState,
    /// Cell under the screen center.
    pub center: CellPosition,
}

/// Status bar widget.
pub struct StatusBar<'a> {
    info: &'a StatusInfo,
    styles: &'a GridStyles,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar for one frame.
    pub fn new(info: &'a StatusInfo, styles: &'a GridStyles) -> Self {
        Self { info, styles }
    }

    fn state_span(&self) -> Span<'static> {
        match self.info.load_state {
            LoadState::Idle => Span::raw(""),
            LoadState::Loading => Span::styled(" loading… ", self.styles.loading),
            LoadState::Exhausted => Span::styled(" end of catalog ", self.styles.exhausted),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let info = self.info;
        let line = Line::from(vec![
            Span::raw(format!(" filter: {} ", info.filter)),
            Span::raw(format!("│ {} placed ", info.placed)),
            Span::raw(format!(
                "│ center {},{} ",
                info.center.row, info.center.col
            )),
            self.state_span(),
            Span::raw("│ ? help"),
        ]);
        Paragraph::new(line)
            .style(self.styles.status)
            .render(area, buf);
    }
}
