//! Transmit Spinner
//!
//! Headless rendition of the submit button's loading glyph: while the
//! coordinator is loading, the current line shows `TRANSMITTING` plus the
//! glyph frame and elapsed time, rewritten with `\r` + ANSI line clearing.
//!
//! Terminal capability detection: respects `TERM=dumb`, unset `TERM`, and the
//! `NO_COLOR` environment variable. Without ANSI support nothing is drawn,
//! but the glyph driver still runs so the frame stays observable.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::engine::glyph::{spawn_gated_glyph, LOADING_GLYPHS};
use crate::engine::DriverHandle;
use crate::submission::SubmissionState;

/// Check if the terminal supports ANSI escape sequences.
///
/// Returns `false` if `TERM` is `"dumb"`, empty or unset, or stdout is not a
/// terminal. `NO_COLOR` is checked separately by [`supports_color`].
pub fn supports_ansi() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false,
    }
}

/// Check if color output is allowed (`NO_COLOR` unset and ANSI supported).
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    supports_ansi()
}

/// Button text while a request is in flight
pub fn transmitting_label(frame: &str) -> String {
    format!("TRANSMITTING{frame}")
}

/// Spinner bound to a submission's loading state
pub struct TransmitSpinner {
    glyph: DriverHandle<Option<&'static str>>,
    render: Option<tokio::task::JoinHandle<()>>,
    start_time: Instant,
}

impl TransmitSpinner {
    /// Start following `state`; frames advance every `period` while loading.
    pub fn start(state: watch::Receiver<SubmissionState>, period: Duration) -> Self {
        let glyph = spawn_gated_glyph(LOADING_GLYPHS, period, state, SubmissionState::is_loading);
        let start_time = Instant::now();

        if !supports_ansi() {
            return Self {
                glyph,
                render: None,
                start_time,
            };
        }

        let mut frames = glyph.subscribe();
        let render = tokio::spawn(async move {
            while frames.changed().await.is_ok() {
                let frame = *frames.borrow_and_update();
                match frame {
                    Some(frame) => {
                        let elapsed = start_time.elapsed().as_secs_f64();
                        print!("\r\x1b[2K  {} ({:.1}s)", transmitting_label(frame), elapsed);
                    }
                    None => print!("\r\x1b[2K"),
                }
                io::stdout().flush().ok();
            }
        });

        Self {
            glyph,
            render: Some(render),
            start_time,
        }
    }

    /// Frame currently shown, `None` while not loading
    pub fn frame(&self) -> Option<&'static str> {
        self.glyph.state()
    }

    /// Get elapsed time since spinner started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Stop the spinner with a success line
    pub fn finish_success(self, message: &str) {
        let icon = if supports_color() {
            "\u{2714}".green().to_string()
        } else {
            "\u{2714}".to_string()
        };
        self.finish_with_icon(&icon, message);
    }

    /// Stop the spinner with an error line
    pub fn finish_error(self, message: &str) {
        let icon = if supports_color() {
            "\u{2715}".red().to_string()
        } else {
            "\u{2715}".to_string()
        };
        self.finish_with_icon(&icon, message);
    }

    fn finish_with_icon(mut self, icon: &str, message: &str) {
        self.stop();
        let elapsed = self.start_time.elapsed().as_secs_f64();
        println!("  {} {} ({:.1}s)", icon, message, elapsed);
    }

    fn stop(&mut self) {
        self.glyph.dispose();
        if let Some(handle) = self.render.take() {
            handle.abort();
            print!("\r\x1b[2K");
            io::stdout().flush().ok();
        }
    }
}

impl Drop for TransmitSpinner {
    fn drop(&mut self) {
        self.stop();
    }
}
