//! Domain model types (pure).
//!
//! Plain data shared by the navigation core and its hosts.

pub mod error;
pub mod key_action;
pub mod pointer;
pub mod screen;

// Re-export for convenience
pub use error::NavigationError;
pub use key_action::KeyAction;
pub use pointer::{
    InteractionRole, Point, PointerEvent, PointerPhase, PointerSource, MOUSE_POINTER_ID,
};
pub use screen::{ScreenKind, UnknownScreenKind};
