//! Drag session: the transient record of one gesture.
//!
//! A session exists from pointer-down to release. It only measures; deciding
//! whether the release commits belongs to the controller.

use crate::config::GestureConfig;
use crate::model::{Point, PointerSource};

/// Dominant axis of a gesture, fixed once it leaves the jitter radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Still within the jitter radius in both directions.
    Undecided,
    /// Horizontal swipe; moves are captured to suppress page scrolling.
    Horizontal,
    /// Vertical gesture; left to the content so it can scroll.
    Vertical,
}

/// Presentation feedback for the active card while it is being dragged.
///
/// Pure projection of the session; never fed back into navigation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    /// Damped horizontal translation in pixels.
    pub translate_x: f64,
    /// Rotation in degrees added to the card's resting tilt.
    pub rotation_deg: f64,
    /// Opacity in `[min_opacity, 1]`.
    pub opacity: f64,
}

impl DragFeedback {
    /// Card at rest.
    pub const NEUTRAL: DragFeedback = DragFeedback {
        translate_x: 0.0,
        rotation_deg: 0.0,
        opacity: 1.0,
    };

    /// Feedback for a horizontal travel of `delta_x` pixels.
    pub fn for_delta(delta_x: f64, config: &GestureConfig) -> Self {
        let fade = 1.0 - delta_x.abs() * config.opacity_falloff_per_px;
        Self {
            translate_x: delta_x * config.resistance,
            rotation_deg: delta_x * config.rotation_per_px,
            opacity: fade.clamp(config.min_opacity, 1.0),
        }
    }

    /// Whether this is the resting state.
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for DragFeedback {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// One in-flight gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer_id: u32,
    source: PointerSource,
    origin: Point,
    current: Point,
    has_crossed_move_threshold: bool,
    axis: Axis,
}

impl DragSession {
    /// Start a session at `origin`.
    pub fn begin(pointer_id: u32, source: PointerSource, origin: Point) -> Self {
        Self {
            pointer_id,
            source,
            origin,
            current: origin,
            has_crossed_move_threshold: false,
            axis: Axis::Undecided,
        }
    }

    /// Pointer that owns this session.
    pub fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    /// Device that started the session.
    pub fn source(&self) -> PointerSource {
        self.source
    }

    /// Where the gesture started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Latest tracked position.
    pub fn current(&self) -> Point {
        self.current
    }

    /// Net horizontal travel.
    pub fn delta_x(&self) -> f64 {
        self.current.x - self.origin.x
    }

    /// Net vertical travel.
    pub fn delta_y(&self) -> f64 {
        self.current.y - self.origin.y
    }

    /// The gesture has moved horizontally past the jitter radius at some point.
    ///
    /// Sticky: moving back towards the origin does not clear it.
    pub fn has_crossed_move_threshold(&self) -> bool {
        self.has_crossed_move_threshold
    }

    /// Locked axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Vertical gestures belong to the content, not to the stack.
    pub fn is_pass_through(&self) -> bool {
        self.axis == Axis::Vertical
    }

    /// Record a new pointer position.
    ///
    /// The axis locks the first time either component leaves the jitter
    /// radius; ties go to horizontal. A vertical session never sets the move
    /// flag, so it can never commit.
    pub fn track(&mut self, to: Point, jitter_threshold_px: f64) -> Axis {
        self.current = to;
        let dx = self.delta_x().abs();
        let dy = self.delta_y().abs();

        if self.axis == Axis::Undecided && (dx > jitter_threshold_px || dy > jitter_threshold_px) {
            self.axis = if dy > dx {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
        }

        if self.axis == Axis::Horizontal && dx > jitter_threshold_px {
            self.has_crossed_move_threshold = true;
        }

        self.axis
    }

    /// Visual feedback for the current position.
    pub fn feedback(&self, config: &GestureConfig) -> DragFeedback {
        if self.is_pass_through() {
            return DragFeedback::NEUTRAL;
        }
        DragFeedback::for_delta(self.delta_x(), config)
    }
}
