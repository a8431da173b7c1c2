//! Gesture controller: the card stack's state machine.
//!
//! `Idle → Dragging → (commit | cancel) → Idle`. Navigation state is owned
//! by one [`CardStack`]; rendering layers read projections from it and never
//! write back.
//!
//! # Policies
//!
//! - Dragging right (positive delta) goes to the previous screen, dragging
//!   left to the next. Keyboard steps use the same [`Direction`].
//! - A pointer-down from another pointer during an active drag is handled
//!   by [`ReentryPolicy`]: ignored by default, or it cancels the running
//!   drag and starts a new one. A second down from the session's own pointer
//!   means its release was lost, so it always restarts.
//! - Pointer-cancel and pointer-leave always cancel, whatever the travel.
//! - Malformed events (no coordinates, NaN) continue the current state.

use crate::config::{GestureConfig, ReentryPolicy};
use crate::model::{NavigationError, PointerEvent, PointerPhase, ScreenKind};
use crate::state::dispatcher::{Acknowledgement, Activation, ContentDispatcher, ScreenContent};
use crate::state::drag::{Axis, DragFeedback, DragSession};
use crate::state::position::{self, Direction, ScreenProjection};
use crate::state::registry::{Screen, ScreenRegistry};
use tracing::{debug, info, warn};

/// Where the controller is between events.
///
/// Commit and cancel complete inside the release call, so they are reported
/// through [`Settle`] rather than held as states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A pointer is down on the stack.
    Dragging(DragSession),
}

impl GestureState {
    /// The running session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            GestureState::Idle => None,
            GestureState::Dragging(session) => Some(session),
        }
    }
}

/// Why a gesture ended without navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// Never left the jitter radius.
    Tap,
    /// Released with less net travel than the commit threshold.
    BelowThreshold,
    /// Vertical gesture handed to the content.
    VerticalScroll,
    /// Only one screen; there is nowhere to go.
    SingleScreen,
    /// Platform cancel, or the pointer left the stack.
    PointerCancelled,
    /// The screen being left refused to let go.
    GuardRefused,
    /// A new pointer-down ended the session.
    Superseded,
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settle {
    /// The active screen changed.
    Committed {
        /// Previous active index.
        from: usize,
        /// New active index.
        to: usize,
        /// Step direction.
        direction: Direction,
    },
    /// Nothing changed; feedback returns to neutral.
    Cancelled(CancelReason),
}

/// Controller reply to one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureResponse {
    /// Event had no effect (no session, foreign pointer, excluded target,
    /// malformed start, disabled stack).
    Ignored,
    /// A drag session started.
    Started,
    /// A new session replaced a running one, which ended as `Settle`
    /// (always a cancel).
    Restarted(Settle),
    /// Drag in progress; apply `feedback` to the active card. When
    /// `capture` is set the host must stop the event from scrolling the page.
    Tracking {
        /// Feedback for the active card.
        feedback: DragFeedback,
        /// Suppress native scrolling for this event.
        capture: bool,
    },
    /// Vertical gesture; let the content scroll.
    PassThrough,
    /// The gesture ended.
    Settled(Settle),
}

/// Result of a navigation that landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationOutcome {
    /// Previous active index.
    pub from: usize,
    /// New active index.
    pub to: usize,
    /// What the activation of `to` ran.
    pub activation: Activation,
}

/// Card stack navigation controller.
///
/// Owns the registry, the active index and the drag session. Every call that
/// can activate a screen takes the [`ScreenContent`] collaborator by `&mut`.
#[derive(Debug, Clone)]
pub struct CardStack {
    registry: ScreenRegistry,
    active: usize,
    state: GestureState,
    config: GestureConfig,
    dispatcher: ContentDispatcher,
    started: bool,
}

impl CardStack {
    /// Create a stack showing the first screen.
    pub fn new(registry: ScreenRegistry, config: GestureConfig) -> Self {
        Self {
            registry,
            active: 0,
            state: GestureState::Idle,
            config,
            dispatcher: ContentDispatcher::new(),
            started: false,
        }
    }

    /// Create a stack showing `initial` first.
    ///
    /// # Errors
    ///
    /// Fails if the registry is empty or `initial` is out of range.
    pub fn with_initial(
        registry: ScreenRegistry,
        config: GestureConfig,
        initial: usize,
    ) -> Result<Self, NavigationError> {
        let count = registry.len();
        if count == 0 {
            return Err(NavigationError::Disabled);
        }
        if initial >= count {
            return Err(NavigationError::OutOfRange {
                index: initial,
                count,
            });
        }
        let mut stack = Self::new(registry, config);
        stack.active = initial;
        Ok(stack)
    }

    /// Activate the initial screen. Later calls do nothing.
    ///
    /// Returns `None` for an empty stack or when already started.
    pub fn start<C: ScreenContent + ?Sized>(&mut self, content: &mut C) -> Option<Activation> {
        if self.started {
            return None;
        }
        let kind = self.active_kind()?;
        self.started = true;
        info!(
            screen = %kind,
            index = self.active,
            count = self.registry.len(),
            "Card stack started"
        );
        self.activate(self.active, content)
    }

    /// A stack with no screens ignores every event.
    pub fn is_enabled(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Index of the visible screen.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The visible screen.
    pub fn active_screen(&self) -> Option<&Screen> {
        self.registry.get(self.active)
    }

    /// Kind of the visible screen.
    pub fn active_kind(&self) -> Option<ScreenKind> {
        self.active_screen().map(Screen::kind)
    }

    /// Registered screens.
    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Current state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// A drag session is running.
    pub fn is_dragging(&self) -> bool {
        self.state.session().is_some()
    }

    /// Gesture tuning.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Total activations dispatched.
    pub fn activations_dispatched(&self) -> u64 {
        self.dispatcher.dispatched()
    }

    /// Placement of every screen.
    pub fn projections(&self) -> Vec<ScreenProjection> {
        position::project(&self.registry, self.active)
    }

    /// Position indicator: one flag per screen, set for the active one.
    pub fn indicator(&self) -> Vec<bool> {
        (0..self.registry.len())
            .map(|i| position::is_active(i, self.active))
            .collect()
    }

    /// Feedback for the active card right now.
    pub fn feedback(&self) -> DragFeedback {
        match &self.state {
            GestureState::Idle => DragFeedback::NEUTRAL,
            GestureState::Dragging(session) => session.feedback(&self.config),
        }
    }

    /// Feed one pointer or touch event.
    pub fn handle<C: ScreenContent + ?Sized>(
        &mut self,
        event: PointerEvent,
        content: &mut C,
    ) -> GestureResponse {
        if !self.is_enabled() {
            return GestureResponse::Ignored;
        }
        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => self.pointer_up(event, content),
            PointerPhase::Cancel | PointerPhase::Leave => self.pointer_cancel(event),
        }
    }

    fn pointer_down(&mut self, event: PointerEvent) -> GestureResponse {
        // Same pointer pressed again: its release never arrived
        let lost_release = self
            .state
            .session()
            .is_some_and(|running| running.pointer_id() == event.pointer_id);
        if lost_release {
            debug!(pointer = event.pointer_id, "Pointer down again; release was lost");
        }

        let origin = if !self.config.allows_drag_from(event.target) {
            debug!(target = ?event.target, "Pointer down on excluded element; not dragging");
            None
        } else if let Some(origin) = event.finite_position() {
            Some(origin)
        } else {
            debug!(pointer = event.pointer_id, "Pointer down without usable coordinates");
            None
        };
        let Some(origin) = origin else {
            if lost_release {
                self.state = GestureState::Idle;
                return GestureResponse::Settled(Settle::Cancelled(CancelReason::Superseded));
            }
            return GestureResponse::Ignored;
        };

        let superseded = match &self.state {
            GestureState::Idle => false,
            GestureState::Dragging(_) if lost_release => true,
            GestureState::Dragging(running) => match self.config.reentry {
                ReentryPolicy::IgnoreNew => {
                    debug!(
                        running = running.pointer_id(),
                        new = event.pointer_id,
                        "Drag already active; ignoring new pointer"
                    );
                    return GestureResponse::Ignored;
                }
                ReentryPolicy::RestartSession => {
                    debug!(
                        running = running.pointer_id(),
                        new = event.pointer_id,
                        "Restarting drag session"
                    );
                    true
                }
            },
        };

        self.state = GestureState::Dragging(DragSession::begin(
            event.pointer_id,
            event.source,
            origin,
        ));
        if superseded {
            GestureResponse::Restarted(Settle::Cancelled(CancelReason::Superseded))
        } else {
            GestureResponse::Started
        }
    }

    fn pointer_move(&mut self, event: PointerEvent) -> GestureResponse {
        let jitter = self.config.jitter_threshold_px;
        let GestureState::Dragging(session) = &mut self.state else {
            return GestureResponse::Ignored;
        };
        if session.pointer_id() != event.pointer_id {
            return GestureResponse::Ignored;
        }

        if let Some(to) = event.finite_position() {
            session.track(to, jitter);
        }

        match session.axis() {
            Axis::Vertical => GestureResponse::PassThrough,
            axis => GestureResponse::Tracking {
                feedback: session.feedback(&self.config),
                capture: axis == Axis::Horizontal,
            },
        }
    }

    fn pointer_up<C: ScreenContent + ?Sized>(
        &mut self,
        event: PointerEvent,
        content: &mut C,
    ) -> GestureResponse {
        let GestureState::Dragging(mut session) = self.state else {
            return GestureResponse::Ignored;
        };
        if session.pointer_id() != event.pointer_id {
            return GestureResponse::Ignored;
        }
        self.state = GestureState::Idle;

        if let Some(to) = event.finite_position() {
            session.track(to, self.config.jitter_threshold_px);
        }

        let settle = self.settle(&session, content);
        GestureResponse::Settled(settle)
    }

    fn pointer_cancel(&mut self, event: PointerEvent) -> GestureResponse {
        let Some(session) = self.state.session() else {
            return GestureResponse::Ignored;
        };
        if session.pointer_id() != event.pointer_id {
            return GestureResponse::Ignored;
        }
        debug!(phase = ?event.phase, "Drag cancelled by platform");
        self.state = GestureState::Idle;
        GestureResponse::Settled(Settle::Cancelled(CancelReason::PointerCancelled))
    }

    /// Decide what a release does.
    fn settle<C: ScreenContent + ?Sized>(
        &mut self,
        session: &DragSession,
        content: &mut C,
    ) -> Settle {
        let delta = session.delta_x();

        let cancel = if session.is_pass_through() {
            Some(CancelReason::VerticalScroll)
        } else if !session.has_crossed_move_threshold() {
            Some(CancelReason::Tap)
        } else if delta.abs() < self.config.commit_threshold_px {
            Some(CancelReason::BelowThreshold)
        } else {
            None
        };

        if let Some(reason) = cancel {
            debug!(delta, ?reason, "Drag released without navigating");
            return Settle::Cancelled(reason);
        }

        match Direction::from_drag_delta(delta) {
            Some(direction) => self.commit(direction, content),
            None => Settle::Cancelled(CancelReason::BelowThreshold),
        }
    }

    /// Move one screen in `direction`, consulting the leave guard.
    fn commit<C: ScreenContent + ?Sized>(&mut self, direction: Direction, content: &mut C) -> Settle {
        let count = self.registry.len();
        if count < 2 {
            return Settle::Cancelled(CancelReason::SingleScreen);
        }

        let from = self.active;
        let Some(leaving) = self.active_kind() else {
            return Settle::Cancelled(CancelReason::SingleScreen);
        };
        if !content.confirm_leave(leaving) {
            warn!(screen = %leaving, ?direction, "Navigation refused by screen");
            return Settle::Cancelled(CancelReason::GuardRefused);
        }

        let to = direction.step(from, count);
        self.active = to;
        info!(from, to, ?direction, "Committed navigation");

        self.activate(to, content);
        content.acknowledge(Acknowledgement::Swipe);

        Settle::Committed {
            from,
            to,
            direction,
        }
    }

    /// Step one screen as if swiped, e.g. from a keyboard shortcut.
    ///
    /// Cancels a running drag first. Subject to the leave guard.
    pub fn step<C: ScreenContent + ?Sized>(&mut self, direction: Direction, content: &mut C) -> Settle {
        if !self.is_enabled() {
            return Settle::Cancelled(CancelReason::SingleScreen);
        }
        self.interrupt_drag();
        self.commit(direction, content)
    }

    /// Jump straight to screen `index`, e.g. from a "new entry" button.
    ///
    /// Cancels a running drag, bypasses the leave guard, and activates the
    /// target even when it is already active.
    ///
    /// # Errors
    ///
    /// [`NavigationError::Disabled`] for an empty stack,
    /// [`NavigationError::OutOfRange`] for a bad index.
    pub fn navigate_to<C: ScreenContent + ?Sized>(
        &mut self,
        index: usize,
        content: &mut C,
    ) -> Result<NavigationOutcome, NavigationError> {
        let count = self.registry.len();
        if count == 0 {
            return Err(NavigationError::Disabled);
        }
        if index >= count {
            warn!(index, count, "Programmatic navigation out of range");
            return Err(NavigationError::OutOfRange { index, count });
        }

        self.interrupt_drag();
        let from = self.active;
        self.active = index;
        info!(from, to = index, "Programmatic navigation");

        let activation = self
            .activate(index, content)
            .ok_or(NavigationError::OutOfRange { index, count })?;
        content.acknowledge(Acknowledgement::Jump);

        Ok(NavigationOutcome {
            from,
            to: index,
            activation,
        })
    }

    /// Jump to the first screen of `kind`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::UnknownScreen`] if no such screen is registered,
    /// plus the errors of [`CardStack::navigate_to`].
    pub fn navigate_to_kind<C: ScreenContent + ?Sized>(
        &mut self,
        kind: ScreenKind,
        content: &mut C,
    ) -> Result<NavigationOutcome, NavigationError> {
        if !self.is_enabled() {
            return Err(NavigationError::Disabled);
        }
        let index = self
            .registry
            .index_of(kind)
            .ok_or(NavigationError::UnknownScreen(kind))?;
        self.navigate_to(index, content)
    }

    fn interrupt_drag(&mut self) {
        if let GestureState::Dragging(session) = self.state {
            debug!(pointer = session.pointer_id(), "Dropping drag for navigation");
            self.state = GestureState::Idle;
        }
    }

    fn activate<C: ScreenContent + ?Sized>(
        &mut self,
        index: usize,
        content: &mut C,
    ) -> Option<Activation> {
        let screen = self.registry.get_mut(index)?;
        Some(self.dispatcher.activate(screen, content))
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
