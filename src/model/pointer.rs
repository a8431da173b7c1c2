//! Pointer and touch input, independent of any windowing backend.
//!
//! Hosts translate their native events (DOM pointer events, crossterm mouse
//! events, ...) into [`PointerEvent`]s. The host also resolves which kind of
//! element the pointer landed on, because only the host knows its layout.

use serde::{Deserialize, Serialize};

/// Pointer id used for mouse input, which has a single pointer.
pub const MOUSE_POINTER_ID: u32 = 1;

/// A position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are usable numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer pressed / touch started.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released / touch ended.
    Up,
    /// Platform cancelled the gesture (pointercancel, touchcancel).
    Cancel,
    /// Pointer left the tracked element while pressed.
    Leave,
}

/// Device that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// Mouse or trackpad.
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

/// Role of the element under the pointer when a gesture starts.
///
/// Swiping must not steal gestures from interactive children, so the
/// controller keeps a deny list of roles that never start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionRole {
    /// Plain card surface; always draggable.
    Surface,
    /// Embedded map widget (panning).
    Map,
    /// Button.
    Button,
    /// Single-line text input.
    TextInput,
    /// Multi-line text area.
    TextArea,
    /// Select / dropdown.
    Select,
    /// Clickable list row.
    ListItem,
    /// Modal dialog.
    Dialog,
    /// Row of action buttons.
    ActionBar,
    /// Place search results list.
    ResultsList,
}

impl InteractionRole {
    /// Roles that never start a drag unless configured otherwise.
    pub const DEFAULT_EXCLUDED: [InteractionRole; 9] = [
        InteractionRole::Map,
        InteractionRole::Button,
        InteractionRole::TextInput,
        InteractionRole::TextArea,
        InteractionRole::Select,
        InteractionRole::ListItem,
        InteractionRole::Dialog,
        InteractionRole::ActionBar,
        InteractionRole::ResultsList,
    ];
}

/// A single pointer or touch event delivered to the card stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub phase: PointerPhase,
    /// Which device produced it.
    pub source: PointerSource,
    /// Pointer or touch identifier; moves and releases are matched against
    /// the pointer that started the drag.
    pub pointer_id: u32,
    /// Where it happened. `None` when the platform reports no coordinates
    /// (touchend carries none, for example).
    pub position: Option<Point>,
    /// Role of the element under the pointer.
    pub target: InteractionRole,
}

impl PointerEvent {
    /// Generic constructor targeting the card surface.
    pub fn new(
        phase: PointerPhase,
        source: PointerSource,
        pointer_id: u32,
        position: Option<Point>,
    ) -> Self {
        Self {
            phase,
            source,
            pointer_id,
            position,
            target: InteractionRole::Surface,
        }
    }

    /// Mouse event at `(x, y)`.
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(
            phase,
            PointerSource::Mouse,
            MOUSE_POINTER_ID,
            Some(Point::new(x, y)),
        )
    }

    /// touchstart for the touch `id`.
    pub fn touch_start(id: u32, x: f64, y: f64) -> Self {
        Self::new(
            PointerPhase::Down,
            PointerSource::Touch,
            id,
            Some(Point::new(x, y)),
        )
    }

    /// touchmove for the touch `id`.
    pub fn touch_move(id: u32, x: f64, y: f64) -> Self {
        Self::new(
            PointerPhase::Move,
            PointerSource::Touch,
            id,
            Some(Point::new(x, y)),
        )
    }

    /// touchend for the touch `id`. Touch releases carry no coordinates.
    pub fn touch_end(id: u32) -> Self {
        Self::new(PointerPhase::Up, PointerSource::Touch, id, None)
    }

    /// touchcancel for the touch `id`.
    pub fn touch_cancel(id: u32) -> Self {
        Self::new(PointerPhase::Cancel, PointerSource::Touch, id, None)
    }

    /// Same event, landing on an element with the given role.
    pub fn with_target(mut self, target: InteractionRole) -> Self {
        self.target = target;
        self
    }

    /// Position, if present and made of finite numbers.
    pub fn finite_position(&self) -> Option<Point> {
        self.position.filter(Point::is_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_position_filters_nan_and_infinity() {
        let nan = PointerEvent::mouse(PointerPhase::Move, f64::NAN, 10.0);
        let inf = PointerEvent::mouse(PointerPhase::Move, 3.0, f64::INFINITY);
        let ok = PointerEvent::mouse(PointerPhase::Move, 3.0, 4.0);

        assert_eq!(nan.finite_position(), None);
        assert_eq!(inf.finite_position(), None);
        assert_eq!(ok.finite_position(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn touch_end_has_no_coordinates() {
        let event = PointerEvent::touch_end(7);
        assert_eq!(event.phase, PointerPhase::Up);
        assert_eq!(event.pointer_id, 7);
        assert_eq!(event.position, None);
    }

    #[test]
    fn constructors_target_surface_until_told_otherwise() {
        let event = PointerEvent::touch_start(2, 0.0, 0.0);
        assert_eq!(event.target, InteractionRole::Surface);
        let on_map = event.with_target(InteractionRole::Map);
        assert_eq!(on_map.target, InteractionRole::Map);
    }

    #[test]
    fn surface_is_never_excluded_by_default() {
        assert!(!InteractionRole::DEFAULT_EXCLUDED.contains(&InteractionRole::Surface));
    }
}
