//! Position indicator widget (the dots under the deck).

use crate::view::styles::CardStyles;
use ratatui::text::{Line, Span};

const ACTIVE_DOT: &str = "●";
const INACTIVE_DOT: &str = "○";

/// One dot per screen, filled for the active one.
///
/// Pure and stateless: built from [`crate::state::CardStack::indicator`]
/// each frame.
#[derive(Debug, Clone)]
pub struct PositionIndicator {
    dots: Vec<bool>,
}

impl PositionIndicator {
    /// Indicator for the given active flags.
    pub fn new(dots: Vec<bool>) -> Self {
        Self { dots }
    }

    /// Render as a single line of dots separated by spaces.
    pub fn render(&self, styles: &CardStyles) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.dots.len() * 2);
        for (i, active) in self.dots.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if *active {
                spans.push(Span::styled(ACTIVE_DOT, styles.indicator_active()));
            } else {
                spans.push(Span::styled(INACTIVE_DOT, styles.indicator_inactive()));
            }
        }
        Line::from(spans)
    }
}
