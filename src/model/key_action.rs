//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Card navigation
    /// Step to the next card, as if swiped left. Default: →/l
    NextScreen,
    /// Step to the previous card, as if swiped right. Default: ←/h
    PrevScreen,
    /// Jump to a card by 1-indexed position. Default: 1-9
    SelectScreen(usize),

    // Shortcuts that jump between cards
    /// Start a new check-in (jumps to the check-in card). Default: n
    NewEntry,
    /// Open the stats card. Default: s
    ViewStats,
    /// Open the map card. Default: m
    ViewMap,

    // Check-in form
    /// Type into the check-in note, leaving unsaved changes. Default: e
    EditNote,
    /// Save the check-in and return to the map. Default: w
    SaveCheckin,
    /// Throw away unsaved check-in changes. Default: d
    DiscardChanges,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
