//! Card Stack Navigator (cardstack)
//!
//! Swipeable card-stack navigation for a check-in app, with a terminal host.
//!
//! The core is pure: [`state::CardStack`] turns pointer events into
//! navigation decisions and screen projections. The impure shell in
//! [`view`] owns the terminal and feeds it mouse and key events.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
