//! Terminal explorer for the drag grid.
//!
//! The event loop owns a [`GridController`] and a [`ProviderWorker`]. Every
//! user input that moves the grid goes through the controller; any load
//! request it returns is handed to the worker, and completions are drained
//! once per loop iteration.

pub mod animation;
pub mod constants;
pub mod grid_view;
pub mod help;
pub mod projection;
pub mod status;
pub mod styles;

pub use animation::Glide;
pub use grid_view::{truncate_to_width, GridView};
pub use help::render_help_overlay;
pub use projection::Projection;
pub use status::{StatusBar, StatusInfo};
pub use styles::{ColorConfig, GridStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::grid::{CellPosition, GridController, LoadOutcome, LoadRequest, LoadState, Offset};
use crate::model::{AppError, Filter, GridError, KeyAction};
use crate::provider::ProviderWorker;
use constants::{FALLBACK_SIZE, FOCUS_GLIDE, FRAME_TICK, IDLE_TICK, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Media types the filter key cycles through; `None` means any.
const MEDIA_CYCLE: [Option<&str>; 3] = [None, Some("movie"), Some("tv")];

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Grid configuration was rejected
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(err) => AppError::Terminal(err),
            TuiError::Grid(err) => AppError::Grid(err),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    grid: GridController,
    worker: ProviderWorker,
    key_bindings: KeyBindings,
    projection: Projection,
    styles: GridStyles,
    glide: Option<Glide>,
    /// Terminal cell where the current left-button drag was last seen
    drag_anchor: Option<(u16, u16)>,
    focused: Option<CellPosition>,
    help_visible: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        config: &ResolvedConfig,
        worker: ProviderWorker,
        styles: GridStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, config, worker, styles)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Polls faster while a glide is running or
    /// a load is outstanding.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            let timeout = if self.is_busy() { FRAME_TICK } else { IDLE_TICK };
            let mut dirty = false;

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            dirty |= self.tick(now.duration_since(last_tick));
            last_tick = now;
            dirty |= self.poll_worker();

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app around an existing terminal and issue the seed request.
    fn with_terminal(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        worker: ProviderWorker,
        styles: GridStyles,
    ) -> Result<Self, TuiError> {
        let projection = Projection::new(config.view);
        let (width, height) = terminal_size(&terminal);
        let screen = projection.screen_size(grid_area(Rect::new(0, 0, width, height)));
        let mut grid = match config.catalog.seed {
            Some(seed) => GridController::with_seed(config.grid.clone(), screen, seed)?,
            None => GridController::new(config.grid.clone(), screen)?,
        };
        let seed_request = if config.filter.is_any() {
            grid.start()
        } else {
            grid.set_filter(config.filter.clone())
        };

        let mut app = Self {
            terminal,
            grid,
            worker,
            key_bindings: KeyBindings::default(),
            projection,
            styles,
            glide: None,
            drag_anchor: None,
            focused: None,
            help_visible: false,
        };
        app.dispatch(seed_request);
        Ok(app)
    }

    /// Hand a load request to the worker.
    ///
    /// A dead worker is reported back as a failed completion so the loader
    /// returns to idle instead of waiting forever.
    fn dispatch(&mut self, request: Option<LoadRequest>) {
        let Some(request) = request else {
            return;
        };
        let ticket = request.ticket;
        debug!(ticket = ticket.id(), kind = ?request.kind, "Submitting load request");
        if let Err(err) = self.worker.submit(request) {
            self.grid.complete_load(ticket, Err(err));
        }
    }

    /// Drain finished provider calls. Returns true if anything arrived.
    fn poll_worker(&mut self) -> bool {
        let mut received = false;
        while let Some(completion) = self.worker.poll() {
            received = true;
            match self.grid.complete_load(completion.ticket, completion.result) {
                LoadOutcome::Placed(count) => debug!(count, "Batch placed"),
                LoadOutcome::Exhausted => info!("Catalog exhausted for current filter"),
                LoadOutcome::Failed(err) => warn!(error = %err, "Batch failed"),
                LoadOutcome::Stale => debug!("Stale completion dropped"),
            }
        }
        received
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = self.key_bindings.get(key);

        if self.help_visible {
            match (action, key.code) {
                (Some(KeyAction::Help), _) | (_, KeyCode::Esc) => self.help_visible = false,
                (Some(KeyAction::Quit), _) => return true,
                _ => {}
            }
            return false;
        }

        let Some(action) = action else {
            return false;
        };
        debug!(?action, "Key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.help_visible = true,
            KeyAction::FocusRandom => {
                if let Some(target) = self.grid.pick_focus_target() {
                    info!(id = %target.item.id, position = %target.position, "Focusing random item");
                    self.glide_to(target.offset);
                    self.focused = Some(target.position);
                }
            }
            KeyAction::Recenter => {
                let origin = self.grid.initial_offset();
                self.glide_to(origin);
                self.focused = None;
            }
            KeyAction::CycleFilter => {
                let next = next_filter(self.grid.filter());
                self.clear_motion();
                let request = self.grid.set_filter(next);
                self.dispatch(request);
            }
            KeyAction::Reset => {
                self.clear_motion();
                let request = self.grid.reset();
                self.dispatch(request);
            }
            pan => {
                if let Some((dx, dy)) = pan.pan_direction() {
                    let (step_x, step_y) = if pan.is_page() {
                        let screen = self.grid.space().screen();
                        (screen.width, screen.height)
                    } else {
                        let space = self.grid.space();
                        (space.cell_width(), space.cell_height())
                    };
                    self.glide = None;
                    let request = self.grid.drag_by(dx * step_x, dy * step_y);
                    self.dispatch(request);
                }
            }
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Left-button drags move the grid with the pointer.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.glide = None;
                self.drag_anchor = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some((anchor_col, anchor_row)) = self.drag_anchor else {
                    return;
                };
                let (dx, dy) = self.projection.drag_delta(
                    i32::from(mouse.column) - i32::from(anchor_col),
                    i32::from(mouse.row) - i32::from(anchor_row),
                );
                self.drag_anchor = Some((mouse.column, mouse.row));
                let request = self.grid.drag_by(dx, dy);
                self.dispatch(request);
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_anchor = None,
            _ => {}
        }
    }

    /// Handle a terminal resize event
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Handling resize");
        let width = if width > 0 { width } else { FALLBACK_SIZE.0 };
        let height = if height > 0 { height } else { FALLBACK_SIZE.1 };
        let screen = self
            .projection
            .screen_size(grid_area(Rect::new(0, 0, width, height)));
        let request = self.grid.resize(screen.width, screen.height);
        self.dispatch(request);
    }

    /// Advance time-driven state. Returns true if a redraw is needed.
    ///
    /// Each glide step is applied through the controller so cells along the
    /// path load exactly as they would during a drag. Failed loads are only
    /// retried by user input, never by the clock.
    fn tick(&mut self, dt: Duration) -> bool {
        if let Some(glide) = self.glide.as_mut() {
            let offset = glide.advance(dt);
            let finished = glide.is_finished();
            if finished {
                self.glide = None;
            }
            let request = self.grid.update_viewport(offset.x, offset.y);
            self.dispatch(request);
            return true;
        }
        false
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let cells = self.grid.visible_cells();
        let info = StatusInfo {
            filter: self.grid.filter().describe(),
            placed: self.grid.store().len(),
            load_state: self.grid.load_state(),
            center: self.grid.space().center_cell(self.grid.offset()),
        };
        let grid = &self.grid;
        let styles = &self.styles;
        let projection = self.projection;
        let focused = self.focused;
        let help_visible = self.help_visible;

        self.terminal.draw(|frame| {
            let [grid_rect, status_rect] = split(frame.area());
            frame.render_widget(
                GridView::new(&cells, grid.space(), grid.offset(), projection, styles)
                    .focused(focused),
                grid_rect,
            );
            frame.render_widget(StatusBar::new(&info, styles), status_rect);
            if help_visible {
                render_help_overlay(frame, styles.focused_border);
            }
        })?;
        Ok(())
    }

    fn glide_to(&mut self, target: Offset) {
        self.glide = Some(Glide::new(self.grid.offset(), target, FOCUS_GLIDE));
    }

    fn clear_motion(&mut self) {
        self.glide = None;
        self.drag_anchor = None;
        self.focused = None;
    }

    fn is_busy(&self) -> bool {
        self.glide.is_some() || self.grid.load_state() == LoadState::Loading
    }
}

/// Next media type in the filter cycle, keeping the genre.
fn next_filter(current: &Filter) -> Filter {
    let index = MEDIA_CYCLE
        .iter()
        .position(|m| {
            match (m, current.media_type.as_deref()) {
                (None, None) => true,
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            }
        })
        .map_or(0, |i| (i + 1) % MEDIA_CYCLE.len());
    Filter {
        media_type: MEDIA_CYCLE[index].map(str::to_string),
        genre: current.genre.clone(),
    }
}

fn split(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)]).areas(area)
}

fn grid_area(area: Rect) -> Rect {
    split(area)[0]
}

fn terminal_size<B: Backend>(terminal: &Terminal<B>) -> (u16, u16) {
    match terminal.size() {
        Ok(size) if size.width > 0 && size.height > 0 => (size.width, size.height),
        _ => FALLBACK_SIZE,
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing and benchmarking within the crate.
// DO NOT use these in production code.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)] // Not all helpers used in every context (tests vs benchmarks)
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        worker: ProviderWorker,
    ) -> Result<Self, TuiError> {
        let styles = GridStyles::with_color_config(ColorConfig::fixed(false));
        Self::with_terminal(terminal, config, worker, styles)
    }

    /// Block until the outstanding load (if any) has been applied.
    pub(crate) fn settle(&mut self) {
        while self.grid.load_state() == LoadState::Loading {
            match self.worker.recv_timeout(Duration::from_secs(5)) {
                Some(completion) => {
                    self.grid.complete_load(completion.ticket, completion.result);
                }
                None => break,
            }
        }
    }

    pub(crate) fn grid(&self) -> &GridController {
        &self.grid
    }

    pub(crate) fn focused(&self) -> Option<CellPosition> {
        self.focused
    }

    pub(crate) fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    pub(crate) fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse);
    }

    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height);
    }

    pub(crate) fn tick_test(&mut self, dt: Duration) -> bool {
        self.tick(dt)
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

#[cfg(feature = "bench-internals")]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for benchmarking. Only available with bench-internals.
    pub fn new_for_bench(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        worker: ProviderWorker,
    ) -> Result<Self, TuiError> {
        Self::new_for_test(terminal, config, worker)
    }

    /// Wait for the outstanding load. Only available with bench-internals.
    pub fn settle_bench(&mut self) {
        self.settle();
    }

    /// Handle a key event. Only available with bench-internals.
    pub fn handle_key_bench(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Render a single frame. Only available with bench-internals.
    pub fn render_bench(&mut self) -> Result<(), TuiError> {
        self.draw()
    }
}

/// Initialize and run the explorer.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: &ResolvedConfig, worker: ProviderWorker, no_color: bool) -> Result<(), TuiError> {
    let styles = GridStyles::with_color_config(ColorConfig::from_env_and_args(no_color));
    let result = TuiApp::new(config, worker, styles).and_then(|mut app| app.run());
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
