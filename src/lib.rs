//! Termfolio - ALPHA FF's hacker-terminal portfolio
//!
//! A single-page portfolio rendered in the terminal. Its animations are
//! small timed state machines ([`engine`]) whose snapshots the UI reads each
//! frame, and its contact form sends friend requests to a remote HTTP
//! endpoint through the [`submission`] coordinator.
//!
//! - **Engine**: typewriter, progressive counter, staged status, loading glyph
//! - **Submission**: form state, validation, result classification
//! - **UI**: ratatui portfolio and a headless transmit spinner
//!
//! # Quick Start
//!
//! ```ignore
//! use termfolio::engine::Typewriter;
//!
//! let name = Typewriter::new("hero_typewriter", "ALPHA FF")
//!     .spawn(std::time::Duration::from_millis(150));
//! println!("{}", name.state().visible());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod engine;
pub mod errors;
pub mod observability;
pub mod submission;
pub mod ui;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Ask long-running loops to wind down
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Whether a shutdown signal has been received
pub fn is_shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}
