//! Termfolio UI
//!
//! The full-screen portfolio and the headless transmit spinner.

pub mod spinner;
pub mod tui;
