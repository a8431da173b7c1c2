//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive the terminal host end to end:
//! mouse drags and key presses in, card stack state and rendered frames out.

mod acceptance_swipe;
