//! Portfolio Sections
//!
//! Each section owns the drivers behind its animations. Drivers start when
//! the section is mounted and stop on [`dispose`](HeroSection::dispose);
//! rendering only reads their latest snapshots.

use super::TuiPalette;
use crate::api::Region;
use crate::config::AnimationConfig;
use crate::content::{self, ProjectStatus, PROJECTS};
use crate::engine::glyph::{spawn_gated_glyph, LOADING_GLYPHS};
use crate::engine::{
    Clock, CursorBlink, DriverHandle, Meter, ProgressiveCounter, RevealState, StageSequence,
    StageSnapshot, Typewriter,
};
use crate::submission::{Field, SubmissionCoordinator, SubmissionState};
use crate::ui::spinner::transmitting_label;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
    Frame,
};

/// Top-level navigation target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Projects,
        Section::Contact,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "HOME",
            Section::About => "ABOUT",
            Section::Projects => "PROJECTS",
            Section::Contact => "CONTACT",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Section::Home => 0,
            Section::About => 1,
            Section::Projects => 2,
            Section::Contact => 3,
        }
    }

    pub fn next(&self) -> Section {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Section {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `'1'..='4'` select a section directly
    pub fn from_digit(c: char) -> Option<Section> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(TuiPalette::border_style())
        .title(Span::styled(format!(" {title} "), TuiPalette::title_style()))
}

fn split_columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub struct Header {
    clock: DriverHandle<String>,
    show_console: bool,
}

impl Header {
    pub fn mount(animation: &AnimationConfig) -> Self {
        Self {
            clock: Clock::new().spawn(animation.clock()),
            show_console: false,
        }
    }

    pub fn time(&self) -> String {
        self.clock.state()
    }

    pub fn toggle_console(&mut self) {
        self.show_console = !self.show_console;
    }

    pub fn is_console_visible(&self) -> bool {
        self.show_console
    }

    /// Height the header needs, including the console when shown
    pub fn height(&self) -> u16 {
        if self.show_console {
            6
        } else {
            3
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, section: Section) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(TuiPalette::border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let (left, right) = split_columns(rows[0], 45);
        let brand = Line::from(vec![
            Span::styled(content::HANDLE, TuiPalette::title_style()),
            Span::raw("  "),
            Span::styled(format!("SYS.TIME: {}", self.time()), TuiPalette::success_style()),
        ]);
        frame.render_widget(Paragraph::new(brand), left);

        let titles: Vec<Line> = Section::ALL
            .iter()
            .map(|s| Line::from(format!("{} {}", s.index() + 1, s.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(section.index())
            .style(TuiPalette::muted_style())
            .highlight_style(TuiPalette::selected_style())
            .divider("|");
        frame.render_widget(tabs, right);

        if self.show_console && rows[1].height > 0 {
            let console = Paragraph::new(console_text(section)).style(TuiPalette::info_style());
            frame.render_widget(console, rows[1]);
        }
    }

    pub fn dispose(&mut self) {
        self.clock.dispose();
    }
}

/// Console lines shown after navigating to `section`
pub fn console_text(section: Section) -> String {
    format!(
        "> NAVIGATING TO {}_SECTOR\n> LOADING...\n> READY",
        section.id().to_uppercase()
    )
}

// ---------------------------------------------------------------------------
// Hero
// ---------------------------------------------------------------------------

pub struct HeroSection {
    name: DriverHandle<RevealState>,
    cursor: DriverHandle<bool>,
}

impl HeroSection {
    pub fn mount(animation: &AnimationConfig) -> Self {
        Self {
            name: Typewriter::new("hero_typewriter", content::DISPLAY_NAME)
                .spawn(animation.hero_typewriter()),
            cursor: CursorBlink::new().spawn(animation.cursor_blink()),
        }
    }

    /// Revealed name followed by the blinking cursor
    pub fn name_line(&self) -> String {
        let cursor = if self.cursor.state() { "_" } else { " " };
        format!("{}{}", self.name.state().visible(), cursor)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled("⚡ SYSTEM ONLINE", TuiPalette::accent_style())),
            Line::default(),
            Line::from(Span::styled("IDENTIFYING_", TuiPalette::success_style())),
            Line::from(Span::styled(
                self.name_line(),
                Style::default()
                    .fg(TuiPalette::PHOSPHOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(content::TAGLINE, TuiPalette::info_style())),
            Line::default(),
        ];
        for link in content::SOCIAL_LINKS {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", link.name), TuiPalette::title_style()),
                Span::styled(format!("{:<24}", link.code), TuiPalette::info_style()),
                Span::styled(link.url, TuiPalette::muted_style()),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "SCROLL_DOWN ▼  [2]",
            TuiPalette::muted_style(),
        )));

        let top_pad = area.height.saturating_sub(lines.len() as u16 + 2) / 2;
        let hero = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(panel("HOME").padding(ratatui::widgets::Padding::top(top_pad)));
        frame.render_widget(hero, area);
    }

    pub fn dispose(&mut self) {
        self.name.dispose();
        self.cursor.dispose();
    }
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

pub struct AboutSection {
    bio: DriverHandle<RevealState>,
    skills: DriverHandle<Option<Vec<Meter>>>,
}

impl AboutSection {
    pub fn mount(animation: &AnimationConfig) -> Self {
        let bio = Typewriter::new("bio_typewriter", content::BIO).spawn(animation.bio_typewriter());
        let skills = ProgressiveCounter::new(content::skills())
            .spawn(animation.skill_counter(), bio.completion());
        Self { bio, skills }
    }

    /// Visible bio with a trailing `_` while the scan is still typing
    pub fn bio_text(&self) -> String {
        let reveal = self.bio.state();
        if reveal.is_complete() {
            reveal.visible().to_string()
        } else {
            format!("{}_", reveal.visible())
        }
    }

    pub fn meters(&self) -> Option<Vec<Meter>> {
        self.skills.state()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (left, right) = split_columns(area, 55);

        let bio = Paragraph::new(self.bio_text())
            .style(TuiPalette::success_style())
            .wrap(Wrap { trim: false })
            .block(panel("PROFILE.DAT"));
        frame.render_widget(bio, left);

        let block = panel("SKILL.MATRIX");
        let inner = block.inner(right);
        frame.render_widget(block, right);

        let Some(meters) = self.meters() else {
            let waiting = Paragraph::new("AWAITING SCAN COMPLETION")
                .style(TuiPalette::muted_style().add_modifier(Modifier::SLOW_BLINK))
                .alignment(Alignment::Center);
            frame.render_widget(waiting, inner);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                meters
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(inner);

        for (meter, row) in meters.iter().zip(rows.iter()) {
            render_meter(frame, *row, meter);
        }
    }

    pub fn dispose(&mut self) {
        self.bio.dispose();
        self.skills.dispose();
    }
}

fn render_meter(frame: &mut Frame, area: Rect, meter: &Meter) {
    if area.height < 2 {
        return;
    }
    let label_area = Rect { height: 1, ..area };
    let gauge_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };

    let label = Line::from(vec![
        Span::styled(format!("{} ", meter.icon), TuiPalette::info_style()),
        Span::raw(meter.label.clone()),
        Span::styled(format!("  {}%", meter.current), TuiPalette::accent_style()),
    ]);
    frame.render_widget(Paragraph::new(label), label_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(TuiPalette::PHOSPHOR).bg(Color::Black))
        .ratio(meter.ratio().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, gauge_area);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProjectsSection {
    cursor: usize,
    active: Option<usize>,
    show_code: bool,
}

impl ProjectsSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_showing_code(&self) -> bool {
        self.show_code
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < PROJECTS.len() {
            self.cursor += 1;
        }
    }

    /// Open a project's details; always starts in the description view
    pub fn select(&mut self, index: usize) {
        if index < PROJECTS.len() {
            self.active = Some(index);
            self.show_code = false;
        }
    }

    pub fn select_cursor(&mut self) {
        self.select(self.cursor);
    }

    pub fn toggle_code(&mut self) {
        if self.active.is_some() {
            self.show_code = !self.show_code;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (left, right) = split_columns(area, 42);

        let mut lines = Vec::new();
        for (i, project) in PROJECTS.iter().enumerate() {
            let marker = if i == self.cursor { "▶ " } else { "  " };
            let title_style = if self.active == Some(i) {
                TuiPalette::title_style()
            } else {
                Style::default().fg(TuiPalette::PHOSPHOR)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, TuiPalette::accent_style()),
                Span::styled(project.title, title_style),
                Span::raw("  "),
                Span::styled(
                    project.status.as_str(),
                    Style::default().fg(status_color(project.status)),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", project.tags.join(" · ")),
                TuiPalette::muted_style(),
            )));
            lines.push(Line::from(Span::styled(
                "  [ENTER TO VIEW DETAILS]",
                TuiPalette::muted_style(),
            )));
            lines.push(Line::default());
        }
        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(panel("AVAILABLE.PROJECTS")),
            left,
        );

        let Some(project) = self.active.and_then(|i| PROJECTS.get(i)) else {
            let empty = Paragraph::new("SELECT A PROJECT TO VIEW DETAILS")
                .style(TuiPalette::muted_style())
                .alignment(Alignment::Center)
                .block(panel("PROJECT.DETAILS"));
            frame.render_widget(empty, right);
            return;
        };

        let body = if self.show_code {
            let mut text = Text::from(Line::from(Span::styled(
                "source.code",
                TuiPalette::success_style(),
            )));
            for line in project.code_snippet.lines() {
                text.lines.push(Line::from(Span::styled(
                    line.to_string(),
                    TuiPalette::success_style(),
                )));
            }
            text
        } else {
            Text::from(vec![
                Line::from(Span::styled(project.title, TuiPalette::title_style())),
                Line::from(Span::styled(
                    "PRESS V TO ACCESS SOURCE",
                    TuiPalette::accent_style(),
                )),
                Line::default(),
                Line::from(Span::styled("project.description", TuiPalette::success_style())),
                Line::from(project.description),
                Line::default(),
                Line::from(vec![
                    Span::styled("LINK: ", TuiPalette::muted_style()),
                    Span::raw(project.link),
                ]),
            ])
        };
        frame.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .block(panel("PROJECT.DETAILS")),
            right,
        );
    }
}

pub fn status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Active => Color::Green,
        ProjectStatus::Stable => Color::Cyan,
        ProjectStatus::Beta => Color::Yellow,
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// Focusable element of the friend-request form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(Field),
    Submit,
}

impl FormFocus {
    const ORDER: [FormFocus; 4] = [
        FormFocus::Field(Field::Code),
        FormFocus::Field(Field::Server),
        FormFocus::Field(Field::Uid),
        FormFocus::Submit,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> FormFocus {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(&self) -> FormFocus {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub const IDLE_BUTTON_LABEL: &str = "INITIATE CONNECTION";

pub struct ContactSection {
    status: DriverHandle<StageSnapshot>,
    glyph: DriverHandle<Option<&'static str>>,
    coordinator: SubmissionCoordinator,
    focus: Option<FormFocus>,
}

impl ContactSection {
    pub fn mount(animation: &AnimationConfig, coordinator: SubmissionCoordinator) -> Self {
        let glyph = spawn_gated_glyph(
            LOADING_GLYPHS,
            animation.loading_glyph(),
            coordinator.subscribe(),
            SubmissionState::is_loading,
        );
        Self {
            status: StageSequence::connection().spawn(animation.connection_status()),
            glyph,
            coordinator,
            focus: None,
        }
    }

    pub fn connection(&self) -> StageSnapshot {
        self.status.state()
    }

    pub fn focus(&self) -> Option<FormFocus> {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    pub fn begin_editing(&mut self) {
        self.focus = Some(FormFocus::Field(Field::Code));
    }

    pub fn release_focus(&mut self) {
        self.focus = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(FormFocus::ORDER[0], |f| f.next()));
    }

    pub fn focus_prev(&mut self) {
        self.focus = Some(self.focus.map_or(FormFocus::Submit, |f| f.prev()));
    }

    /// Append a character to the focused text field
    pub fn type_char(&mut self, c: char) {
        if let Some(FormFocus::Field(field @ (Field::Code | Field::Uid))) = self.focus {
            let mut value = self.coordinator.fields().get(field).to_string();
            value.push(c);
            self.coordinator.update_field(field, value);
        }
    }

    /// Delete from the focused field; clears the region selection
    pub fn backspace(&mut self) {
        let Some(FormFocus::Field(field)) = self.focus else {
            return;
        };
        let mut value = self.coordinator.fields().get(field).to_string();
        if field == Field::Server {
            value.clear();
        } else {
            value.pop();
        }
        self.coordinator.update_field(field, value);
    }

    /// Step the region selector when it has focus
    pub fn cycle_region(&mut self, forward: bool) {
        if self.focus != Some(FormFocus::Field(Field::Server)) {
            return;
        }
        let current = self.coordinator.fields().server.parse::<Region>().ok();
        let next = match (current, forward) {
            (Some(region), true) => region.next(),
            (Some(region), false) => region.prev(),
            (None, true) => Region::Asia,
            (None, false) => Region::Sa,
        };
        self.coordinator.update_field(Field::Server, next.as_str());
    }

    /// The submit button is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        !self.coordinator.is_loading()
    }

    pub fn button_label(&self) -> String {
        if self.coordinator.is_loading() {
            transmitting_label(self.glyph.state().unwrap_or(""))
        } else {
            IDLE_BUTTON_LABEL.to_string()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (left, right) = split_columns(area, 40);
        self.render_contact_data(frame, left);
        self.render_form(frame, right);
    }

    fn render_contact_data(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.connection();
        let mut dot_style = TuiPalette::success_style();
        if !snapshot.is_final {
            dot_style = dot_style.add_modifier(Modifier::SLOW_BLINK);
        }

        let mut lines = vec![
            Line::from(vec![
                Span::styled(snapshot.label, TuiPalette::success_style()),
                Span::styled(" ●", dot_style),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "// COMMUNICATION PROTOCOLS",
                TuiPalette::success_style(),
            )),
        ];
        for (protocol, value) in content::CONTACT_DATA {
            lines.push(Line::from(Span::styled(*protocol, TuiPalette::success_style())));
            lines.push(Line::from(*value));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("SYSTEM.LOG", TuiPalette::accent_style())));
        for entry in content::SYSTEM_LOG {
            lines.push(Line::from(Span::styled(*entry, TuiPalette::muted_style())));
        }

        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(panel("CONTACT.DATA")),
            area,
        );
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = panel("FRIEND.REQUEST");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let fields = self.coordinator.fields();
        self.render_input(frame, rows[0], Field::Code, "AUTHORIZATION_CODE", &fields.code, "ENTER SECRET KEY");
        let region_label = fields
            .server
            .parse::<Region>()
            .map(|r| r.label())
            .unwrap_or("SELECT REGION");
        let region_value = if fields.server.is_empty() {
            ""
        } else {
            region_label
        };
        self.render_input(frame, rows[1], Field::Server, "SERVER_REGION  ◀ ▶", region_value, "SELECT REGION");
        self.render_input(frame, rows[2], Field::Uid, "USER_IDENTIFIER", &fields.uid, "ENTER TARGET ID");

        let focused = self.focus == Some(FormFocus::Submit);
        let mut button_style = TuiPalette::accent_style().add_modifier(Modifier::BOLD);
        if !self.can_submit() {
            button_style = button_style.add_modifier(Modifier::DIM | Modifier::SLOW_BLINK);
        }
        let button = Paragraph::new(self.button_label())
            .style(button_style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focus_border(focused)),
            );
        frame.render_widget(button, rows[3]);

        let state = self.coordinator.state();
        if let Some(message) = state.message() {
            let status = Paragraph::new(message.to_string())
                .style(Style::default().fg(state_color(&state)))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(state_color(&state))),
                );
            frame.render_widget(status, rows[4]);
        }
    }

    fn render_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: Field,
        label: &str,
        value: &str,
        placeholder: &str,
    ) {
        let focused = self.focus == Some(FormFocus::Field(field));
        let text = if value.is_empty() {
            Span::styled(placeholder.to_string(), TuiPalette::muted_style())
        } else {
            Span::styled(value.to_string(), TuiPalette::success_style())
        };
        let mut spans = vec![text];
        if focused && field != Field::Server {
            spans.push(Span::styled("▌", TuiPalette::accent_style()));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(focused))
                .title(Span::styled(label.to_string(), TuiPalette::info_style())),
        );
        frame.render_widget(input, area);
    }

    pub fn dispose(&mut self) {
        self.status.dispose();
        self.glyph.dispose();
    }
}

fn focus_border(focused: bool) -> Style {
    if focused {
        TuiPalette::accent_style()
    } else {
        TuiPalette::border_style()
    }
}

fn state_color(state: &SubmissionState) -> Color {
    match state {
        SubmissionState::Idle => TuiPalette::STATIC,
        SubmissionState::Loading => Color::Blue,
        SubmissionState::Success { .. } => Color::Green,
        SubmissionState::Error { .. } => Color::Red,
    }
}
