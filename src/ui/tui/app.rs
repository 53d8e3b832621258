//! Portfolio application state and key handling

use super::sections::{
    AboutSection, ContactSection, FormFocus, Header, HeroSection, ProjectsSection, Section,
};
use super::TuiPalette;
use crate::config::AnimationConfig;
use crate::content;
use crate::submission::{SubmissionCoordinator, SubmissionState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// How long the success toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(4);
pub const TOAST_TITLE: &str = "TRANSMISSION COMPLETE";
pub const TOAST_BODY: &str = "Friend request sent successfully!";

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Quit,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub body: &'static str,
    expires_at: Instant,
}

pub struct App {
    section: Section,
    header: Header,
    hero: HeroSection,
    about: AboutSection,
    projects: ProjectsSection,
    contact: ContactSection,
    coordinator: SubmissionCoordinator,
    submission: watch::Receiver<SubmissionState>,
    toast: Option<Toast>,
    disposed: bool,
}

impl App {
    /// Mount every section, starting their animations
    pub fn mount(animation: &AnimationConfig, coordinator: SubmissionCoordinator) -> Self {
        Self {
            section: Section::Home,
            header: Header::mount(animation),
            hero: HeroSection::mount(animation),
            about: AboutSection::mount(animation),
            projects: ProjectsSection::new(),
            contact: ContactSection::mount(animation, coordinator.clone()),
            submission: coordinator.subscribe(),
            coordinator,
            toast: None,
            disposed: false,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn set_section(&mut self, section: Section) {
        if section != self.section {
            debug!(from = self.section.id(), to = section.id(), "Navigate");
            self.section = section;
        }
    }

    pub fn coordinator(&self) -> SubmissionCoordinator {
        self.coordinator.clone()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn projects(&self) -> &ProjectsSection {
        &self.projects
    }

    pub fn contact(&self) -> &ContactSection {
        &self.contact
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppAction::Quit;
        }

        if self.section == Section::Contact && self.contact.is_editing() {
            return self.handle_form_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Tab => self.set_section(self.section.next()),
            KeyCode::BackTab => self.set_section(self.section.prev()),
            KeyCode::Char('c') => self.header.toggle_console(),
            KeyCode::Char(c) if Section::from_digit(c).is_some() => {
                if let Some(section) = Section::from_digit(c) {
                    self.set_section(section);
                }
            }
            _ => match self.section {
                Section::Projects => self.handle_projects_key(key),
                Section::Contact => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char('e')) {
                        self.contact.begin_editing();
                    }
                }
                Section::Home | Section::About => {}
            },
        }
        AppAction::None
    }

    fn handle_projects_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.projects.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.projects.move_down(),
            KeyCode::Enter => self.projects.select_cursor(),
            KeyCode::Char('v') => self.projects.toggle_code(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => self.contact.release_focus(),
            KeyCode::Tab | KeyCode::Down => self.contact.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.contact.focus_prev(),
            KeyCode::Left => self.contact.cycle_region(false),
            KeyCode::Right => self.contact.cycle_region(true),
            KeyCode::Backspace => self.contact.backspace(),
            KeyCode::Enter => {
                if self.contact.can_submit() {
                    return AppAction::Submit;
                }
            }
            KeyCode::Char(' ') if self.contact.focus() == Some(FormFocus::Submit) => {
                if self.contact.can_submit() {
                    return AppAction::Submit;
                }
            }
            KeyCode::Char(c) => self.contact.type_char(c),
            _ => {}
        }
        AppAction::None
    }

    /// Pick up submission changes and expire the toast
    pub fn sync(&mut self, now: Instant) {
        if self.submission.has_changed().unwrap_or(false) {
            let state = self.submission.borrow_and_update().clone();
            if matches!(state, SubmissionState::Success { .. }) {
                self.toast = Some(Toast {
                    title: TOAST_TITLE,
                    body: TOAST_BODY,
                    expires_at: now + TOAST_DURATION,
                });
            }
        }
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.height()),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.header.render(frame, chunks[0], self.section);
        match self.section {
            Section::Home => self.hero.render(frame, chunks[1]),
            Section::About => self.about.render(frame, chunks[1]),
            Section::Projects => self.projects.render(frame, chunks[1]),
            Section::Contact => self.contact.render(frame, chunks[1]),
        }
        self.render_footer(frame, chunks[2]);

        if let Some(toast) = &self.toast {
            render_toast(frame, chunks[1], toast);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.section {
            Section::Projects => "↑↓ MOVE · ENTER SELECT · V SOURCE",
            Section::Contact if self.contact.is_editing() => {
                "TAB FIELD · ◀ ▶ REGION · ENTER SEND · ESC DONE"
            }
            Section::Contact => "ENTER EDIT FORM",
            Section::Home | Section::About => "",
        };
        let footer = Line::from(vec![
            Span::styled(format!("© {} ", content::DISPLAY_NAME), TuiPalette::muted_style()),
            Span::styled(content::FOOTER, TuiPalette::success_style()),
            Span::raw("   "),
            Span::styled("TAB/1-4 NAV · C CONSOLE · Q QUIT", TuiPalette::muted_style()),
            Span::raw("   "),
            Span::styled(hints, TuiPalette::accent_style()),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }

    /// Stop every section's drivers
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.header.dispose();
        self.hero.dispose();
        self.about.dispose();
        self.contact.dispose();
        self.disposed = true;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let width = (toast.body.width().max(toast.title.width()) as u16 + 4).min(area.width);
    let height = 4.min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height,
    };
    let body = Paragraph::new(toast.body).style(TuiPalette::success_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(TuiPalette::success_style())
            .title(Span::styled(toast.title, TuiPalette::title_style())),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(body, rect);
}
