//! Termfolio Terminal UI
//!
//! Full-screen portfolio built on ratatui: header with clock and section
//! tabs, one section body at a time, and a footer with key hints.

mod app;
mod sections;

pub use app::{App, AppAction, Toast, TOAST_BODY, TOAST_DURATION, TOAST_TITLE};
pub use sections::{console_text, FormFocus, Section};

use crate::api::FriendClient;
use crate::config::Config;
use crate::errors::TermfolioError;
use crate::submission::SubmissionCoordinator;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Redraw cadence of the event loop
const FRAME_PERIOD: Duration = Duration::from_millis(50);

/// How long the input thread blocks on each poll
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Phosphor-green palette
pub struct TuiPalette;

impl TuiPalette {
    pub const PHOSPHOR: Color = Color::Rgb(0, 255, 65);
    pub const MATRIX: Color = Color::Rgb(0, 143, 17);
    pub const SIGNAL: Color = Color::Rgb(0, 215, 255);
    pub const AMBER: Color = Color::Rgb(255, 191, 0);
    pub const STATIC: Color = Color::Rgb(110, 110, 110);
    pub const VOID: Color = Color::Rgb(0, 0, 0);

    /// Style for titles
    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::PHOSPHOR)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected items
    pub fn selected_style() -> Style {
        Style::default()
            .bg(Self::MATRIX)
            .fg(Self::VOID)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style() -> Style {
        Style::default().fg(Self::PHOSPHOR)
    }

    pub fn info_style() -> Style {
        Style::default().fg(Self::SIGNAL)
    }

    pub fn accent_style() -> Style {
        Style::default().fg(Self::AMBER)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Self::STATIC)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Self::MATRIX)
    }
}

/// Terminal wrapper for TUI operations
pub struct TuiTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiTerminal {
    /// Create and initialize the terminal
    pub fn new() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| TermfolioError::Terminal(format!("raw mode unavailable: {e}")))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| TermfolioError::Terminal(format!("alternate screen unavailable: {e}")))?;

        // A panic unwinds past Drop unreliably; restore raw mode and the main
        // screen before the message prints.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore terminal to normal state
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiTerminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Input forwarded from the reader thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
}

/// Blocking crossterm reader on its own thread, feeding the async loop
struct InputReader {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputReader {
    fn spawn(tx: mpsc::UnboundedSender<InputEvent>) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let thread = std::thread::Builder::new()
            .name("termfolio-input".into())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    match event::poll(INPUT_POLL) {
                        Ok(true) => {}
                        Ok(false) => continue,
                        Err(e) => {
                            warn!(error = %e, "Input poll failed");
                            break;
                        }
                    }
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => InputEvent::Key(key),
                        Ok(Event::Resize(..)) => InputEvent::Resize,
                        Ok(_) => continue,
                        Err(e) => {
                            warn!(error = %e, "Input read failed");
                            break;
                        }
                    };
                    if tx.send(forwarded).is_err() {
                        break;
                    }
                }
                debug!("Input reader stopped");
            })?;
        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The one background submission the event loop owns.
///
/// A new submission is spawned only once the previous task has finished, so
/// aborting on quit always reaches the request that is actually in flight.
#[derive(Debug, Default)]
struct InFlight {
    task: Option<tokio::task::JoinHandle<()>>,
}

impl InFlight {
    /// Spawn `coordinator.submit()` unless a submission is still running.
    fn submit(&mut self, coordinator: SubmissionCoordinator) -> bool {
        if self.is_busy() {
            debug!("Submission still in flight; keeping it");
            return false;
        }
        self.task = Some(tokio::spawn(async move {
            let outcome = coordinator.submit().await;
            debug!(?outcome, "Submission finished");
        }));
        true
    }

    fn is_busy(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Run the portfolio until the user quits or shutdown is requested.
pub async fn run_tui(config: &Config, client: Arc<dyn FriendClient>) -> Result<()> {
    let mut terminal = TuiTerminal::new()?;
    let coordinator = SubmissionCoordinator::new(client);
    let mut app = App::mount(&config.animation, coordinator);

    let (tx, mut events) = mpsc::unbounded_channel();
    let mut input = InputReader::spawn(tx)?;

    let mut frames = tokio::time::interval(FRAME_PERIOD);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight = InFlight::default();

    info!("Portfolio started");
    let outcome: Result<()> = loop {
        app.sync(Instant::now());
        if let Err(e) = terminal.terminal().draw(|frame| app.render(frame)) {
            break Err(e.into());
        }

        tokio::select! {
            _ = frames.tick() => {}
            event = events.recv() => match event {
                Some(InputEvent::Key(key)) => match app.handle_key(key) {
                    AppAction::Quit => break Ok(()),
                    AppAction::Submit => {
                        in_flight.submit(app.coordinator());
                    }
                    AppAction::None => {}
                },
                // draw() picks up the new size
                Some(InputEvent::Resize) => {}
                None => break Ok(()),
            },
        }

        if crate::is_shutdown_requested() {
            info!("Shutdown requested");
            break Ok(());
        }
    };

    in_flight.abort();
    app.dispose();
    input.stop();
    terminal.restore()?;
    info!("Portfolio stopped");
    outcome
}
