//! Navigation state machine (pure).
//!
//! Everything here is testable without a terminal: pointer events go in,
//! projections and settle decisions come out, and screen hooks are called
//! through [`ScreenContent`].

pub mod dispatcher;
pub mod drag;
pub mod gesture;
pub mod position;
pub mod registry;

// Re-export for convenience
pub use dispatcher::{Acknowledgement, Activation, ContentDispatcher, ScreenContent};
pub use drag::{Axis, DragFeedback, DragSession};
pub use gesture::{
    CancelReason, CardStack, GestureResponse, GestureState, NavigationOutcome, Settle,
};
pub use position::{is_active, offsets, position_of, project, Direction, ScreenProjection};
pub use registry::{Screen, ScreenRegistry};
