//! Card styling configuration.
//!
//! Each screen kind gets an accent colour; the active card is bold and
//! dims while it is dragged far enough to fade.

use crate::model::ScreenKind;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== CardStyles =====

/// Styles for cards, the indicator and the status line.
#[derive(Debug, Clone, Copy)]
pub struct CardStyles {
    colors: ColorConfig,
}

impl CardStyles {
    /// Styles with colors decided by the environment.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Styles with an explicit color configuration.
    pub fn with_color_config(colors: ColorConfig) -> Self {
        Self { colors }
    }

    /// Accent colour for a screen kind.
    pub fn accent(&self, kind: ScreenKind) -> Style {
        if !self.colors.colors_enabled() {
            return Style::default();
        }
        let color = match kind {
            ScreenKind::Map => Color::Green,
            ScreenKind::Checkin => Color::Cyan,
            ScreenKind::History => Color::Yellow,
            ScreenKind::Stats => Color::Magenta,
            ScreenKind::Settings => Color::Blue,
        };
        Style::default().fg(color)
    }

    /// Border style of a card.
    ///
    /// `opacity` below 1 renders dimmed.
    pub fn card_border(&self, kind: ScreenKind, is_active: bool, opacity: f64) -> Style {
        let mut style = self.accent(kind);
        if is_active {
            style = style.add_modifier(Modifier::BOLD);
        } else {
            style = style.add_modifier(Modifier::DIM);
        }
        if opacity < 1.0 {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }

    /// Style of a filled indicator dot.
    pub fn indicator_active(&self) -> Style {
        if self.colors.colors_enabled() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        }
    }

    /// Style of an empty indicator dot.
    pub fn indicator_inactive(&self) -> Style {
        if self.colors.colors_enabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        }
    }

    /// Status line style; notices stand out from the key hints.
    pub fn status(&self, is_notice: bool) -> Style {
        match (is_notice, self.colors.colors_enabled()) {
            (true, true) => Style::default().fg(Color::Yellow),
            (true, false) => Style::default().add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::DarkGray),
            (false, false) => Style::default(),
        }
    }
}

impl Default for CardStyles {
    fn default() -> Self {
        Self::new()
    }
}
