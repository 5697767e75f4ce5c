//! Help overlay listing the explorer's key bindings.
//!
//! Toggled by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SHORTCUTS: &[(&str, &str)] = &[
    ("h j k l / arrows", "Pan one cell"),
    ("Ctrl+u / PgUp", "Pan one screen up"),
    ("Ctrl+d / PgDn", "Pan one screen down"),
    ("mouse drag", "Drag the grid"),
    ("r", "Glide to a random item"),
    ("0 / Home", "Glide back to the origin"),
    ("f", "Cycle media type filter"),
    ("R", "Clear and reload"),
    ("?", "Toggle this help"),
    ("q / Esc / Ctrl+c", "Quit"),
];

/// Render the help overlay centered on the frame.
pub fn render_help_overlay(frame: &mut Frame, border_style: Style) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    frame.render_widget(Clear, popup_area);

    let help = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .alignment(Alignment::Left);
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let key_style = Style::default().add_modifier(Modifier::BOLD);
    SHORTCUTS
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<18}"), key_style),
                Span::raw(*description),
            ])
        })
        .collect()
}
