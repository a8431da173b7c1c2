//! Circular position algebra.
//!
//! Every screen sits at a signed offset from the active one, wrapped to the
//! shortest direction. Offsets partition `(-N/2, N/2]`: the active screen is
//! always 0 and its neighbours are ±1, whatever the parity of `N`. For `N = 2`
//! the other screen is always `+1`.

use crate::model::ScreenKind;
use crate::state::registry::ScreenRegistry;

/// Navigation direction of a committed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards lower indices, wrapping from 0 to `N - 1`.
    Previous,
    /// Towards higher indices, wrapping from `N - 1` to 0.
    Next,
}

impl Direction {
    /// Direction selected by a horizontal drag delta.
    ///
    /// Dragging right (positive delta) pulls the previous card in from the
    /// left; dragging left reveals the next one. Zero selects nothing.
    pub fn from_drag_delta(delta_x: f64) -> Option<Direction> {
        if delta_x > 0.0 {
            Some(Direction::Previous)
        } else if delta_x < 0.0 {
            Some(Direction::Next)
        } else {
            None
        }
    }

    /// Index reached by stepping once from `index` among `count` screens.
    ///
    /// Always within `[0, count)`; returns 0 when `count` is 0.
    pub fn step(self, index: usize, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let index = index % count;
        match self {
            Direction::Next => (index + 1) % count,
            Direction::Previous => (index + count - 1) % count,
        }
    }
}

/// Signed circular offset of screen `index` relative to `active`.
///
/// `((i - a) % N + N) % N`, then shifted down by `N` when above `N / 2`.
/// Returns 0 for an empty stack.
pub fn position_of(index: usize, active: usize, count: usize) -> i32 {
    if count == 0 {
        return 0;
    }
    let n = count as i64;
    let raw = ((index as i64 - active as i64) % n + n) % n;
    let offset = if raw > n / 2 { raw - n } else { raw };
    offset as i32
}

/// Offsets of every screen in registry order.
pub fn offsets(active: usize, count: usize) -> Vec<i32> {
    (0..count).map(|i| position_of(i, active, count)).collect()
}

/// Whether screen `index` is the active one; drives the indicator dots.
pub fn is_active(index: usize, active: usize) -> bool {
    index == active
}

/// What a rendering layer needs to place one screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    /// Registry index.
    pub index: usize,
    /// Screen kind.
    pub kind: ScreenKind,
    /// Signed circular offset from the active screen.
    pub offset: i32,
    /// Whether this is the active screen (offset 0).
    pub is_active: bool,
    /// Resting tilt in degrees.
    pub tilt_deg: f64,
}

/// Project every registered screen for the given active index.
pub fn project(registry: &ScreenRegistry, active: usize) -> Vec<ScreenProjection> {
    let count = registry.len();
    registry
        .iter()
        .map(|screen| {
            let offset = position_of(screen.index(), active, count);
            ScreenProjection {
                index: screen.index(),
                kind: screen.kind(),
                offset,
                is_active: is_active(screen.index(), active),
                tilt_deg: screen.tilt_deg(),
            }
        })
        .collect()
}
