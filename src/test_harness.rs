//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating key presses
//! and mouse drags.

use crate::config::ResolvedConfig;
use crate::model::ScreenKind;
use crate::state::CardStack;
use crate::view::{CheckinScreens, DeckLayout, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Default configuration with an 80x20 terminal.
    pub fn new() -> Result<Self, TuiError> {
        Self::with_config(ResolvedConfig::default(), 80, 20)
    }

    /// Custom configuration and terminal size.
    ///
    /// Renders once so the first mouse event has a layout to hit-test.
    pub fn with_config(config: ResolvedConfig, width: u16, height: u16) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut app = TuiApp::new_for_test(terminal, &config)?;
        app.render_test()?;
        Ok(Self { app, running: true })
    }

    /// Send a single key event
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        } else {
            // The event loop redraws after every key; keep hit regions current
            let _ = self.app.render_test();
        }
        quit
    }

    /// Send a sequence of keys, stopping at quit.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if !self.running {
            return;
        }
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Press the left button at a cell.
    pub fn mouse_down(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
    }

    /// Drag with the left button held to a cell.
    pub fn mouse_drag(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Drag(MouseButton::Left), column, row);
    }

    /// Release the left button at a cell.
    pub fn mouse_up(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    /// Full horizontal drag along `row`, one column per move.
    ///
    /// Re-renders after every move like the event loop does.
    pub fn drag(&mut self, from_column: u16, to_column: u16, row: u16) {
        self.mouse_down(from_column, row);
        let mut column = from_column;
        while column != to_column {
            column = if to_column > column {
                column + 1
            } else {
                column - 1
            };
            self.mouse_drag(column, row);
            let _ = self.app.render_test();
        }
        self.mouse_up(to_column, row);
        let _ = self.app.render_test();
    }

    /// Simulate the terminal losing focus.
    pub fn lose_focus(&mut self) {
        self.app.focus_lost_test();
    }

    /// Navigation state for assertions.
    pub fn stack(&self) -> &CardStack {
        self.app.stack()
    }

    /// Screen content for assertions.
    pub fn content(&self) -> &CheckinScreens {
        self.app.content()
    }

    /// Kind of the visible card.
    pub fn active_kind(&self) -> Option<ScreenKind> {
        self.app.stack().active_kind()
    }

    /// Bells rung so far.
    pub fn bells(&self) -> u64 {
        self.app.bells_rung()
    }

    /// Layout of the last frame.
    pub fn layout(&self) -> &DeckLayout {
        self.app.last_layout()
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");

        let buffer = self.app.terminal().backend().buffer();
        buffer_to_string(buffer)
    }
}
