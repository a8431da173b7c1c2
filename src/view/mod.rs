//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod content;
pub mod deck;
pub mod indicator;
mod styles;

pub use content::{BodyLine, CheckinScreens};
pub use deck::{DeckLayout, HitRegion};
pub use indicator::PositionIndicator;
pub use styles::{CardStyles, ColorConfig};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{
    KeyAction, NavigationError, Point, PointerEvent, PointerPhase, PointerSource, ScreenKind,
    MOUSE_POINTER_ID,
};
use crate::state::{CardStack, Direction, GestureResponse, ScreenRegistry, Settle};
use crate::view::constants::ROW_ASPECT;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The card stack could not be set up
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    stack: CardStack,
    content: CheckinScreens,
    key_bindings: KeyBindings,
    styles: CardStyles,
    px_per_column: f64,
    /// Where acknowledgements ring the bell; `None` counts them only
    bell: Option<Box<dyn Write>>,
    bells_rung: u64,
    /// Layout of the last frame (for mouse hit detection)
    last_layout: DeckLayout,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(config: &ResolvedConfig) -> Result<Self, TuiError> {
        // Build the stack first so a bad config leaves the terminal untouched
        let stack = build_stack(config)?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        stdout.execute(event::EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let bell: Box<dyn Write> = Box::new(io::stdout());
        Ok(Self::assemble(terminal, stack, config, Some(bell)))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::FocusLost => self.handle_focus_lost(),
                Event::Resize(width, height) => {
                    debug!("Handling resize to {}x{}", width, height);
                }
                _ => continue,
            }
            self.draw()?;
        }
    }
}

/// Registry, config and initial screen combined into a stack.
fn build_stack(config: &ResolvedConfig) -> Result<CardStack, NavigationError> {
    let registry = ScreenRegistry::standard();
    let initial = registry
        .index_of(config.initial_screen)
        .ok_or(NavigationError::UnknownScreen(config.initial_screen))?;
    CardStack::with_initial(registry, config.gesture.clone(), initial)
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn assemble(
        terminal: Terminal<B>,
        mut stack: CardStack,
        config: &ResolvedConfig,
        bell: Option<Box<dyn Write>>,
    ) -> Self {
        let mut content = CheckinScreens::new(config.haptics);
        stack.start(&mut content);

        Self {
            terminal,
            stack,
            content,
            key_bindings: KeyBindings::default(),
            styles: CardStyles::new(),
            px_per_column: config.px_per_column,
            bell,
            bells_rung: 0,
            last_layout: DeckLayout::default(),
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if the app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");
        self.content.clear_notice();

        match action {
            KeyAction::Quit => return true,
            KeyAction::NextScreen => self.step(Direction::Next),
            KeyAction::PrevScreen => self.step(Direction::Previous),
            KeyAction::SelectScreen(position) => {
                let index = position.saturating_sub(1);
                if let Err(err) = self.stack.navigate_to(index, &mut self.content) {
                    self.content.set_notice(err.to_string());
                }
            }
            KeyAction::NewEntry => self.jump_to(ScreenKind::Checkin),
            KeyAction::ViewStats => self.jump_to(ScreenKind::Stats),
            KeyAction::ViewMap => self.jump_to(ScreenKind::Map),
            KeyAction::EditNote => {
                if self.stack.active_kind() == Some(ScreenKind::Checkin) {
                    self.content.edit_note();
                } else {
                    self.content.set_notice("Open the check-in card to edit (n)");
                }
            }
            KeyAction::SaveCheckin => {
                if self.content.save() {
                    self.jump_to(ScreenKind::Map);
                    self.content.set_notice("Check-in saved");
                }
            }
            KeyAction::DiscardChanges => self.content.discard(),
        }

        self.ring_acknowledgements();
        false
    }

    fn step(&mut self, direction: Direction) {
        if let Settle::Cancelled(reason) = self.stack.step(direction, &mut self.content) {
            debug!(?direction, ?reason, "Keyboard step did not navigate");
        }
    }

    fn jump_to(&mut self, kind: ScreenKind) {
        if let Err(err) = self.stack.navigate_to_kind(kind, &mut self.content) {
            warn!(screen = %kind, error = %err, "Jump failed");
            self.content.set_notice(err.to_string());
        }
    }

    /// Translate a terminal mouse event into a pointer event
    ///
    /// Left button down / drag / up become pointer down / move / up. Cell
    /// coordinates are scaled to pixels so gesture thresholds apply.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let phase = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return,
        };

        let position = Point::new(
            f64::from(mouse.column) * self.px_per_column,
            f64::from(mouse.row) * self.px_per_column * ROW_ASPECT,
        );
        let mut pointer = PointerEvent::new(
            phase,
            PointerSource::Mouse,
            MOUSE_POINTER_ID,
            Some(position),
        );
        if phase == PointerPhase::Down {
            pointer = pointer.with_target(self.last_layout.role_at(mouse.column, mouse.row));
        }

        let response = self.stack.handle(pointer, &mut self.content);
        match response {
            GestureResponse::Settled(settle) => debug!(?settle, "Mouse gesture settled"),
            GestureResponse::Restarted(settle) => {
                debug!(?settle, "Mouse pressed again; previous drag dropped")
            }
            _ => {}
        }
        self.ring_acknowledgements();
    }

    /// The terminal lost focus; a drag in progress can no longer finish
    fn handle_focus_lost(&mut self) {
        if self.stack.is_dragging() {
            let leave = PointerEvent::new(
                PointerPhase::Leave,
                PointerSource::Mouse,
                MOUSE_POINTER_ID,
                None,
            );
            self.stack.handle(leave, &mut self.content);
        }
    }

    /// Ring the terminal bell once per queued acknowledgement
    fn ring_acknowledgements(&mut self) {
        for ack in self.content.take_acknowledgements() {
            self.bells_rung += 1;
            debug!(?ack, vibration_ms = ack.vibration().as_millis(), "Acknowledging");
            if let Some(bell) = self.bell.as_mut() {
                // A failed bell is not worth stopping the app for
                if let Err(err) = bell.write_all(b"\x07").and_then(|()| bell.flush()) {
                    warn!(error = %err, "Failed to ring bell");
                }
            }
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let stack = &self.stack;
        let content = &self.content;
        let styles = &self.styles;
        let px_per_column = self.px_per_column;
        let mut layout = DeckLayout::default();

        self.terminal.draw(|frame| {
            layout = deck::render_deck(frame, stack, content, styles, px_per_column);
        })?;

        self.last_layout = layout;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization; acknowledgements are counted but no
    /// bell is written.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
    ) -> Result<Self, TuiError> {
        let stack = build_stack(config)?;
        Ok(Self::assemble(terminal, stack, config, None))
    }

    /// Navigation state (test-only accessor)
    pub(crate) fn stack(&self) -> &CardStack {
        &self.stack
    }

    /// Screen content (test-only accessor)
    pub(crate) fn content(&self) -> &CheckinScreens {
        &self.content
    }

    /// Acknowledgements rung so far (test-only accessor)
    pub(crate) fn bells_rung(&self) -> u64 {
        self.bells_rung
    }

    /// Layout of the last rendered frame (test-only accessor)
    pub(crate) fn last_layout(&self) -> &DeckLayout {
        &self.last_layout
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Simulate the terminal losing focus (test-only accessor)
    pub(crate) fn focus_lost_test(&mut self) {
        self.handle_focus_lost()
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(&config)?;
    info!(
        screen = ?app.stack.active_kind(),
        haptics = config.haptics,
        "Terminal host running"
    );

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture and focus reporting, and leaves the
/// alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableFocusChange)?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn create_test_app() -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 20)).expect("test terminal");
        TuiApp::new_for_test(terminal, &ResolvedConfig::default()).expect("default config")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn tui_error_from_navigation_error() {
        let err: TuiError = NavigationError::Disabled.into();
        assert!(err.to_string().contains("Navigation"));
    }

    #[test]
    fn new_app_starts_on_configured_screen() {
        let config = ResolvedConfig {
            initial_screen: ScreenKind::History,
            ..ResolvedConfig::default()
        };
        let terminal = Terminal::new(TestBackend::new(80, 20)).expect("test terminal");
        let app = TuiApp::new_for_test(terminal, &config).expect("valid config");

        assert_eq!(app.stack().active_kind(), Some(ScreenKind::History));
        assert_eq!(app.content().init_count(ScreenKind::History), 1);
        assert_eq!(app.content().refresh_count(ScreenKind::History), 1);
    }

    #[test]
    fn handle_key_q_returns_true() {
        let mut app = create_test_app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true() {
        let mut app = create_test_app();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn handle_key_unbound_returns_false() {
        let mut app = create_test_app();
        assert!(!app.handle_key(key(KeyCode::Char('z'))));
        assert_eq!(app.stack().active_index(), 0);
    }

    #[test]
    fn handle_key_right_steps_next_and_rings() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.stack().active_kind(), Some(ScreenKind::Checkin));
        assert_eq!(app.bells_rung(), 1);
    }

    #[test]
    fn handle_key_left_wraps_to_last() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.stack().active_kind(), Some(ScreenKind::Settings));
    }

    #[test]
    fn handle_key_number_selects_screen() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.stack().active_kind(), Some(ScreenKind::History));
    }

    #[test]
    fn handle_key_number_out_of_range_sets_notice() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.stack().active_index(), 0);
        assert!(app.content().notice().is_some());
    }

    #[test]
    fn handle_key_shortcuts_jump() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.stack().active_kind(), Some(ScreenKind::Checkin));
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.stack().active_kind(), Some(ScreenKind::Stats));
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(app.stack().active_kind(), Some(ScreenKind::Map));
    }

    #[test]
    fn edit_outside_checkin_only_sets_notice() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Char('e')));
        assert!(!app.content().is_dirty());
        assert!(app.content().notice().is_some());
    }

    #[test]
    fn no_haptics_counts_no_bells() {
        let config = ResolvedConfig {
            haptics: false,
            ..ResolvedConfig::default()
        };
        let terminal = Terminal::new(TestBackend::new(80, 20)).expect("test terminal");
        let mut app = TuiApp::new_for_test(terminal, &config).expect("valid config");
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.stack().active_index(), 1);
        assert_eq!(app.bells_rung(), 0);
    }

    #[test]
    fn draw_renders_without_error() {
        let mut app = create_test_app();
        assert!(app.draw().is_ok());
        assert!(app.last_layout().active_card.is_some());
    }

    #[test]
    fn mouse_right_button_is_ignored() {
        let mut app = create_test_app();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 40,
            row: 10,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!app.stack().is_dragging());
    }
}
