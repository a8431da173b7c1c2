//! Acceptance tests: swiping between cards with the mouse.
//!
//! Default config: 8px per column, so 10 columns of travel is 80px, exactly
//! the commit threshold. With an 80x20 terminal the active card spans
//! columns 16..64 and rows 0..18; row 10 of the map card is empty surface,
//! rows 1-2 are the map widget.

use crate::config::{GestureConfig, ReentryPolicy, ResolvedConfig};
use crate::model::{InteractionRole, ScreenKind};
use crate::test_harness::AcceptanceTestHarness;

const SURFACE_ROW: u16 = 10;
const MAP_ROW: u16 = 1;

fn harness() -> AcceptanceTestHarness {
    AcceptanceTestHarness::new().expect("harness with default config")
}

#[test]
fn swipe_left_past_threshold_shows_next_card() {
    // GIVEN: The map card is active
    // WHEN: User drags 15 columns (120px) to the left on the card surface
    // THEN: The check-in card becomes active, initialized once, bell rung once
    let mut h = harness();
    assert_eq!(h.active_kind(), Some(ScreenKind::Map));

    h.drag(40, 25, SURFACE_ROW);

    assert_eq!(h.active_kind(), Some(ScreenKind::Checkin));
    assert_eq!(h.content().init_count(ScreenKind::Checkin), 1);
    assert_eq!(h.bells(), 1);
    assert!(!h.stack().is_dragging());
}

#[test]
fn swipe_right_shows_previous_card() {
    let mut h = harness();
    h.drag(30, 45, SURFACE_ROW);
    assert_eq!(h.active_kind(), Some(ScreenKind::Settings));
}

#[test]
fn short_swipe_snaps_back() {
    // GIVEN: The map card is active
    // WHEN: User drags 5 columns (40px), below the threshold
    // THEN: Nothing changes and no bell rings
    let mut h = harness();
    h.drag(40, 35, SURFACE_ROW);

    assert_eq!(h.active_kind(), Some(ScreenKind::Map));
    assert_eq!(h.bells(), 0);
    assert!(h.stack().feedback().is_neutral());
}

#[test]
fn lost_release_does_not_leak_into_next_drag() {
    // GIVEN: A drag left whose button release happened outside the terminal
    // WHEN: User presses again further right and drags 2 columns right
    // THEN: The short drag is measured from the new press and snaps back
    let mut h = harness();
    h.mouse_down(40, SURFACE_ROW);
    h.mouse_drag(30, SURFACE_ROW);

    h.mouse_down(50, SURFACE_ROW);
    assert!(h.stack().feedback().is_neutral());
    h.mouse_drag(52, SURFACE_ROW);
    h.mouse_up(52, SURFACE_ROW);

    assert_eq!(h.active_kind(), Some(ScreenKind::Map));
    assert_eq!(h.bells(), 0);
    assert!(!h.stack().is_dragging());
}

#[test]
fn swipe_after_lost_release_commits_from_new_press() {
    let mut h = harness();
    h.mouse_down(20, SURFACE_ROW);
    h.mouse_drag(35, SURFACE_ROW);

    // 15 columns left of the second press, 5 columns right of the first
    h.drag(40, 25, SURFACE_ROW);

    assert_eq!(h.active_kind(), Some(ScreenKind::Checkin));
    assert_eq!(h.bells(), 1);
}

#[test]
fn drag_starting_on_map_widget_never_navigates() {
    let mut h = harness();
    assert_eq!(h.layout().role_at(40, MAP_ROW), InteractionRole::Map);

    h.drag(40, 10, MAP_ROW);

    assert_eq!(h.active_kind(), Some(ScreenKind::Map));
    assert_eq!(h.bells(), 0);
}

#[test]
fn vertical_drag_passes_through() {
    let mut h = harness();
    assert_eq!(h.layout().role_at(40, 6), InteractionRole::Surface);
    h.mouse_down(40, 6);
    h.mouse_drag(40, 10);
    h.mouse_drag(30, 12);
    h.mouse_up(20, 12);

    assert_eq!(h.active_kind(), Some(ScreenKind::Map));
}

#[test]
fn card_follows_the_drag_until_release() {
    let mut h = harness();
    let resting = h.layout().active_card.expect("active card drawn");

    h.mouse_down(40, SURFACE_ROW);
    h.mouse_drag(30, SURFACE_ROW);
    h.render_to_string();
    let dragged = h.layout().active_card.expect("active card drawn");

    // 80px * 0.7 resistance = 56px = 7 columns
    assert_eq!(dragged.x, resting.x - 7);

    h.mouse_up(34, SURFACE_ROW);
    h.render_to_string();
    assert_eq!(h.layout().active_card, Some(resting));
}

#[test]
fn losing_focus_cancels_the_drag() {
    let mut h = harness();
    h.mouse_down(40, SURFACE_ROW);
    h.mouse_drag(10, SURFACE_ROW);
    h.lose_focus();
    h.mouse_up(10, SURFACE_ROW);

    assert_eq!(h.active_kind(), Some(ScreenKind::Map));
    assert!(!h.stack().is_dragging());
}

#[test]
fn round_trip_initializes_each_screen_once() {
    let mut h = harness();
    for _ in 0..3 {
        h.drag(40, 25, SURFACE_ROW);
        h.drag(25, 40, SURFACE_ROW);
    }

    assert_eq!(h.active_kind(), Some(ScreenKind::Map));
    assert_eq!(h.content().init_count(ScreenKind::Map), 1);
    assert_eq!(h.content().init_count(ScreenKind::Checkin), 1);
    assert_eq!(h.content().refresh_count(ScreenKind::Map), 4);
    assert_eq!(h.content().refresh_count(ScreenKind::Checkin), 3);
}

#[test]
fn larger_commit_threshold_needs_longer_swipe() {
    let config = ResolvedConfig {
        gesture: GestureConfig {
            commit_threshold_px: 160.0,
            reentry: ReentryPolicy::IgnoreNew,
            ..GestureConfig::default()
        },
        ..ResolvedConfig::default()
    };
    let mut h = AcceptanceTestHarness::with_config(config, 80, 20).expect("harness");

    h.drag(40, 25, SURFACE_ROW);
    assert_eq!(h.active_kind(), Some(ScreenKind::Map));

    h.drag(50, 25, SURFACE_ROW);
    assert_eq!(h.active_kind(), Some(ScreenKind::Checkin));
}

#[test]
fn keyboard_and_swipe_agree_on_direction() {
    use crossterm::event::KeyCode;

    let mut by_key = harness();
    by_key.send_key(KeyCode::Right);

    let mut by_swipe = harness();
    by_swipe.drag(40, 25, SURFACE_ROW);

    assert_eq!(by_key.active_kind(), by_swipe.active_kind());
}
