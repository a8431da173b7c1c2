//! Screen registry.
//!
//! Ordered, fixed list of screens created once at startup. Screens are never
//! added or removed during a session; only their lifecycle flags change.

use crate::model::ScreenKind;

/// One screen in the stack and its lifecycle flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    index: usize,
    kind: ScreenKind,
    tilt_deg: f64,
    initialized: bool,
    activated_once: bool,
    activations: u32,
}

impl Screen {
    fn new(index: usize, kind: ScreenKind) -> Self {
        Self {
            index,
            kind,
            tilt_deg: kind.base_tilt_deg(),
            initialized: false,
            activated_once: false,
            activations: 0,
        }
    }

    /// Position in the registry, `0..N`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Logical type tag.
    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    /// Resting tilt in degrees.
    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    /// The one-time initializer has been invoked.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The screen has been activated at least once.
    pub fn activated_once(&self) -> bool {
        self.activated_once
    }

    /// Number of activations so far.
    pub fn activations(&self) -> u32 {
        self.activations
    }

    /// Claim the one-time initialization.
    ///
    /// Returns `true` exactly once per screen; the flag is flipped before the
    /// caller runs the initializer.
    pub(crate) fn claim_initialization(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        true
    }

    pub(crate) fn record_activation(&mut self) {
        self.activated_once = true;
        self.activations = self.activations.saturating_add(1);
    }
}

/// Ordered list of screens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
}

impl ScreenRegistry {
    /// Registry with one screen per kind, in the given order.
    pub fn new(kinds: impl IntoIterator<Item = ScreenKind>) -> Self {
        let screens = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| Screen::new(index, kind))
            .collect();
        Self { screens }
    }

    /// The check-in app's five screens: map, check-in, history, stats, settings.
    pub fn standard() -> Self {
        Self::new(ScreenKind::ALL)
    }

    /// Number of screens.
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// No screens registered.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Screen at `index`.
    pub fn get(&self, index: usize) -> Option<&Screen> {
        self.screens.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Screen> {
        self.screens.get_mut(index)
    }

    /// Iterate screens in order.
    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter()
    }

    /// Index of the first screen of `kind`.
    pub fn index_of(&self, kind: ScreenKind) -> Option<usize> {
        self.screens.iter().position(|s| s.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_five_screens_in_order() {
        let registry = ScreenRegistry::standard();
        let kinds: Vec<_> = registry.iter().map(Screen::kind).collect();
        assert_eq!(kinds, ScreenKind::ALL.to_vec());
        for (i, screen) in registry.iter().enumerate() {
            assert_eq!(screen.index(), i);
        }
    }

    #[test]
    fn new_screens_are_pristine() {
        let registry = ScreenRegistry::standard();
        for screen in registry.iter() {
            assert!(!screen.is_initialized());
            assert!(!screen.activated_once());
            assert_eq!(screen.activations(), 0);
        }
    }

    #[test]
    fn initialization_can_be_claimed_once() {
        let mut registry = ScreenRegistry::standard();
        let screen = registry.get_mut(2).expect("screen 2");
        assert!(screen.claim_initialization());
        assert!(!screen.claim_initialization());
        assert!(screen.is_initialized());
    }

    #[test]
    fn index_of_finds_kind() {
        let registry = ScreenRegistry::new([ScreenKind::Stats, ScreenKind::Map]);
        assert_eq!(registry.index_of(ScreenKind::Map), Some(1));
        assert_eq!(registry.index_of(ScreenKind::Checkin), None);
    }

    #[test]
    fn empty_registry() {
        let registry = ScreenRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.get(0), None);
    }
}
