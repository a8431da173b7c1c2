//! Demo screen content for the terminal host.
//!
//! Stands in for the real collaborators behind each card (map widget, GPS
//! watch, history list). It counts lifecycle calls, keeps a check-in draft
//! that guards against being swiped away, and queues acknowledgements for
//! the host to turn into a terminal bell.

use crate::model::{InteractionRole, ScreenKind};
use crate::state::{Acknowledgement, ScreenContent};
use std::collections::HashMap;
use tracing::{debug, info};

/// One rendered line of a card body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLine {
    /// Text to show.
    pub text: String,
    /// Interactive element occupying this line, if any.
    pub role: Option<InteractionRole>,
}

impl BodyLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: None,
        }
    }

    fn with_role(text: impl Into<String>, role: InteractionRole) -> Self {
        Self {
            text: text.into(),
            role: Some(role),
        }
    }
}

/// Check-in screens behind the card stack.
#[derive(Debug, Clone, Default)]
pub struct CheckinScreens {
    haptics: bool,
    inits: HashMap<ScreenKind, u32>,
    refreshes: HashMap<ScreenKind, u32>,
    draft: String,
    dirty: bool,
    saved: Vec<String>,
    pending_acks: Vec<Acknowledgement>,
    notice: Option<String>,
}

impl CheckinScreens {
    /// Create the demo content. With `haptics` off, acknowledgements are
    /// dropped instead of queued.
    pub fn new(haptics: bool) -> Self {
        Self {
            haptics,
            ..Self::default()
        }
    }

    /// Times `kind` has been initialized.
    pub fn init_count(&self, kind: ScreenKind) -> u32 {
        self.inits.get(&kind).copied().unwrap_or(0)
    }

    /// Times `kind` has been refreshed.
    pub fn refresh_count(&self, kind: ScreenKind) -> u32 {
        self.refreshes.get(&kind).copied().unwrap_or(0)
    }

    /// The check-in draft has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current draft note.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Saved check-ins, oldest first.
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    /// Message for the status line.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Clear the status message.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Show a status message.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Take queued acknowledgements.
    pub fn take_acknowledgements(&mut self) -> Vec<Acknowledgement> {
        std::mem::take(&mut self.pending_acks)
    }

    /// Edit the note of the check-in being drafted.
    pub fn edit_note(&mut self) {
        let number = self.saved.len() + 1;
        if self.draft.is_empty() {
            self.draft = format!("Check-in #{number}");
        } else {
            self.draft.push_str(" +");
        }
        self.dirty = true;
        self.notice = None;
    }

    /// Save the draft. Returns `false` when there was nothing to save.
    pub fn save(&mut self) -> bool {
        if !self.dirty {
            self.notice = Some("Nothing to save".to_string());
            return false;
        }
        let note = std::mem::take(&mut self.draft);
        info!(note = %note, total = self.saved.len() + 1, "Check-in saved");
        self.saved.push(note);
        self.dirty = false;
        self.notice = Some("Check-in saved".to_string());
        true
    }

    /// Throw the draft away.
    pub fn discard(&mut self) {
        if self.dirty {
            debug!("Check-in draft discarded");
        }
        self.draft.clear();
        self.dirty = false;
        self.notice = Some("Draft discarded".to_string());
    }

    /// Lines shown on the card for `kind`.
    pub fn body(&self, kind: ScreenKind) -> Vec<BodyLine> {
        let mut lines = match kind {
            ScreenKind::Map => vec![
                BodyLine::with_role("[ map: drag here to pan ]", InteractionRole::Map),
                BodyLine::with_role("[ map: drag here to pan ]", InteractionRole::Map),
                BodyLine::plain(format!("{} check-ins plotted", self.saved.len())),
                BodyLine::with_role("[ Locate me ]", InteractionRole::Button),
            ],
            ScreenKind::Checkin => {
                let note = if self.draft.is_empty() {
                    "(press e to write a note)".to_string()
                } else {
                    self.draft.clone()
                };
                let mut lines = vec![
                    BodyLine::with_role(format!("Note: {note}"), InteractionRole::TextArea),
                    BodyLine::with_role("Mood: [ fine v ]", InteractionRole::Select),
                ];
                if self.dirty {
                    lines.push(BodyLine::plain("* unsaved changes"));
                }
                lines.push(BodyLine::with_role(
                    "[ Save (w) ]  [ Discard (d) ]",
                    InteractionRole::ActionBar,
                ));
                lines
            }
            ScreenKind::History => {
                if self.saved.is_empty() {
                    vec![BodyLine::plain("No check-ins yet")]
                } else {
                    self.saved
                        .iter()
                        .rev()
                        .map(|note| BodyLine::with_role(format!("- {note}"), InteractionRole::ListItem))
                        .collect()
                }
            }
            ScreenKind::Stats => vec![
                BodyLine::plain(format!("Check-ins: {}", self.saved.len())),
                BodyLine::plain(format!(
                    "Screens opened: {}",
                    self.inits.values().filter(|n| **n > 0).count()
                )),
            ],
            ScreenKind::Settings => vec![BodyLine::with_role(
                format!("Haptics: {}", if self.haptics { "on" } else { "off" }),
                InteractionRole::Select,
            )],
        };
        lines.push(BodyLine::plain(format!(
            "init x{}  refresh x{}",
            self.init_count(kind),
            self.refresh_count(kind)
        )));
        lines
    }
}

impl ScreenContent for CheckinScreens {
    fn initialize(&mut self, screen: ScreenKind) {
        debug!(screen = %screen, "Loading screen content");
        *self.inits.entry(screen).or_default() += 1;
    }

    fn refresh(&mut self, screen: ScreenKind) {
        *self.refreshes.entry(screen).or_default() += 1;
    }

    fn confirm_leave(&mut self, screen: ScreenKind) -> bool {
        if screen == ScreenKind::Checkin && self.dirty {
            self.notice = Some("Unsaved check-in: w to save, d to discard".to_string());
            return false;
        }
        true
    }

    fn acknowledge(&mut self, ack: Acknowledgement) {
        if self.haptics {
            self.pending_acks.push(ack);
        }
    }
}
