//! Content dispatcher: the per-screen activation contract.
//!
//! Each activation runs the screen's heavy initializer at most once per
//! session and its cheap refresh hook exactly once. What the hooks do (start
//! a map, attach a GPS watch, load history) is up to the [`ScreenContent`]
//! implementation.

use crate::model::ScreenKind;
use crate::state::registry::Screen;
use std::time::Duration;
use tracing::debug;

/// Short tactile / acoustic acknowledgement requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acknowledgement {
    /// A swipe or step committed.
    Swipe,
    /// A programmatic jump (shortcut button) landed.
    Jump,
}

impl Acknowledgement {
    /// Suggested vibration length.
    pub fn vibration(self) -> Duration {
        match self {
            Acknowledgement::Swipe => Duration::from_millis(30),
            Acknowledgement::Jump => Duration::from_millis(50),
        }
    }
}

/// External collaborators behind the screens.
///
/// Passed by `&mut` into every controller call that may activate a screen.
/// Hooks run synchronously; anything slow should be handed off and not
/// awaited.
pub trait ScreenContent {
    /// One-time setup for a screen, run on its first activation.
    fn initialize(&mut self, screen: ScreenKind);

    /// Cheap re-entry hook, run on every activation.
    fn refresh(&mut self, screen: ScreenKind);

    /// Asked before a committed swipe leaves `screen`. Returning `false`
    /// keeps the stack where it is.
    fn confirm_leave(&mut self, _screen: ScreenKind) -> bool {
        true
    }

    /// Fire a haptic / acoustic acknowledgement, if the platform has one.
    fn acknowledge(&mut self, _ack: Acknowledgement) {}
}

/// What an activation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    /// First activation: initializer, then refresh.
    Initialized,
    /// Later activation: refresh only.
    Refreshed,
}

/// Enforces the activation contract; holds no knowledge of the hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDispatcher {
    dispatched: u64,
}

impl ContentDispatcher {
    /// Create a dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `screen`.
    ///
    /// The initialization flag is claimed before the initializer runs, so a
    /// second activation can never run it again.
    pub fn activate<C: ScreenContent + ?Sized>(
        &mut self,
        screen: &mut Screen,
        content: &mut C,
    ) -> Activation {
        let kind = screen.kind();
        let activation = if screen.claim_initialization() {
            debug!(screen = %kind, index = screen.index(), "Initializing screen");
            content.initialize(kind);
            Activation::Initialized
        } else {
            Activation::Refreshed
        };

        content.refresh(kind);
        screen.record_activation();
        self.dispatched += 1;

        debug!(
            screen = %kind,
            activations = screen.activations(),
            ?activation,
            "Screen activated"
        );
        activation
    }

    /// Total activations dispatched across all screens.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}
