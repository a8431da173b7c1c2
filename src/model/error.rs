//! Error types for the navigation core.
//!
//! Gesture input never produces errors: malformed or unexpected events are
//! absorbed by the controller and leave it in its current state. Errors exist
//! only for explicit API calls, where the caller asked for something the
//! stack cannot do.

use crate::model::ScreenKind;
use thiserror::Error;

/// Programmatic navigation could not be performed.
///
/// None of these are fatal: the stack stays on its current screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The stack has no screens and ignores all navigation.
    #[error("Card stack has no screens; navigation is disabled")]
    Disabled,

    /// Requested index is outside the registry.
    #[error("Screen index {index} out of range for {count} screens")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of registered screens.
        count: usize,
    },

    /// No screen of the requested kind is registered.
    #[error("No screen of kind {0} is registered")]
    UnknownScreen(ScreenKind),
}
