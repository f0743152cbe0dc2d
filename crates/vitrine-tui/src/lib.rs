// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod present;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::io;
use std::path::Path;
use tracing::debug;
use vitrine_app::{AppCommand, AppMode, AppState, Collection, Profile, PromptKind, SourceKind};
use vitrine_ingest::{
    DEFAULT_SHEET_NAME, SAMPLE_FILE_NAME, SheetLocator, ValidationError, ValidationResult,
};

pub use present::{DEFAULT_PLACEHOLDER_IMAGE, ImageView, RecordView, present};

const PREV_HINT: &str = "◀ previous (←)";
const NEXT_HINT: &str = "next (→) ▶";

/// Everything the viewer needs from outside the terminal.
pub trait AppRuntime {
    fn load_file(&mut self, path: &Path) -> ValidationResult<Collection>;
    fn load_sheet(&mut self, locator: &SheetLocator) -> ValidationResult<Collection>;
    fn export_sample(&mut self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    pub profile: Profile,
    pub placeholder_image: String,
    pub sheet_id: String,
    pub sheet_name: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
            sheet_id: String::new(),
            sheet_name: DEFAULT_SHEET_NAME.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetField {
    Id,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptUiState {
    File {
        path: String,
    },
    Sheet {
        sheet_id: String,
        sheet_name: String,
        focus: SheetField,
    },
    Export {
        path: String,
    },
}

impl PromptUiState {
    fn open(kind: PromptKind, settings: &ViewerSettings) -> Self {
        match kind {
            PromptKind::OpenFile => Self::File {
                path: String::new(),
            },
            PromptKind::OpenSheet => Self::Sheet {
                sheet_id: settings.sheet_id.clone(),
                sheet_name: settings.sheet_name.clone(),
                focus: SheetField::Id,
            },
            PromptKind::ExportSample => Self::Export {
                path: SAMPLE_FILE_NAME.to_owned(),
            },
        }
    }

    const fn title(&self) -> &'static str {
        match self {
            Self::File { .. } => "load Excel or CSV file",
            Self::Sheet { .. } => "load Google Sheet",
            Self::Export { .. } => "save sample workbook",
        }
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self {
            Self::File { path } | Self::Export { path } => path,
            Self::Sheet {
                sheet_id,
                sheet_name,
                focus,
            } => match focus {
                SheetField::Id => sheet_id,
                SheetField::Name => sheet_name,
            },
        }
    }

    fn switch_focus(&mut self) {
        if let Self::Sheet { focus, .. } = self {
            *focus = match focus {
                SheetField::Id => SheetField::Name,
                SheetField::Name => SheetField::Id,
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    prompt: Option<PromptUiState>,
    help_visible: bool,
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    settings: &ViewerSettings,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let mut result: Result<()> = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data, settings)) {
            result = Err(error).context("draw frame");
            break;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key_event(state, runtime, &mut view_data, settings, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error).context("read event");
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Applies one key press. Returns `true` when the viewer should exit.
fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    settings: &ViewerSettings,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        AppMode::Prompt(_) => {
            handle_prompt_key(state, runtime, view_data, key);
            false
        }
        AppMode::Browse => handle_browse_key(state, view_data, settings, key),
    }
}

fn handle_browse_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    settings: &ViewerSettings,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Right | KeyCode::Char('l' | 'n' | ' ') => navigate(state, AppCommand::Next),
        KeyCode::Left | KeyCode::Char('h' | 'p') => navigate(state, AppCommand::Previous),
        KeyCode::Home | KeyCode::Char('g') => navigate(state, AppCommand::First),
        KeyCode::End | KeyCode::Char('G') => navigate(state, AppCommand::Last),
        KeyCode::Char('r') => {
            state.dispatch(AppCommand::Reset);
        }
        KeyCode::Tab if state.nav().is_empty() => {
            state.dispatch(AppCommand::ToggleSource);
        }
        KeyCode::Enter if state.nav().is_empty() => {
            open_prompt(state, view_data, settings, PromptKind::for_source(state.source));
        }
        KeyCode::Char('o') => {
            state.dispatch(AppCommand::SelectSource(SourceKind::File));
            open_prompt(state, view_data, settings, PromptKind::OpenFile);
        }
        KeyCode::Char('s') => {
            state.dispatch(AppCommand::SelectSource(SourceKind::Sheet));
            open_prompt(state, view_data, settings, PromptKind::OpenSheet);
        }
        KeyCode::Char('e') => open_prompt(state, view_data, settings, PromptKind::ExportSample),
        KeyCode::Char('?') => view_data.help_visible = true,
        _ => {}
    }
    false
}

fn navigate(state: &mut AppState, command: AppCommand) {
    if state.status_line.is_some() {
        state.dispatch(AppCommand::ClearStatus);
    }
    state.dispatch(command);
}

fn open_prompt(
    state: &mut AppState,
    view_data: &mut ViewData,
    settings: &ViewerSettings,
    kind: PromptKind,
) {
    view_data.prompt = Some(PromptUiState::open(kind, settings));
    state.dispatch(AppCommand::OpenPrompt(kind));
}

fn close_prompt(state: &mut AppState, view_data: &mut ViewData) {
    view_data.prompt = None;
    state.dispatch(AppCommand::ClosePrompt);
}

fn handle_prompt_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) {
    let Some(prompt) = view_data.prompt.as_mut() else {
        state.dispatch(AppCommand::ClosePrompt);
        return;
    };

    match key.code {
        KeyCode::Esc => close_prompt(state, view_data),
        KeyCode::Enter => {
            let prompt = prompt.clone();
            submit_prompt(state, runtime, view_data, &prompt);
        }
        KeyCode::Tab | KeyCode::BackTab => prompt.switch_focus(),
        KeyCode::Backspace => {
            prompt.focused_buffer().pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.focused_buffer().push(ch);
        }
        _ => {}
    }
}

fn submit_prompt<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    prompt: &PromptUiState,
) {
    match prompt {
        PromptUiState::File { path } => {
            let path = path.trim();
            if path.is_empty() {
                state.dispatch(AppCommand::SetStatus("enter a file path".to_owned()));
                return;
            }
            let result = runtime.load_file(Path::new(path));
            finish_load(state, view_data, result, path, "error loading file");
        }
        PromptUiState::Sheet {
            sheet_id,
            sheet_name,
            ..
        } => {
            let locator = SheetLocator::new(sheet_id, sheet_name);
            let result = runtime.load_sheet(&locator);
            let label = format!("sheet {sheet_name:?}");
            finish_load(state, view_data, result, &label, "error loading Google Sheet");
        }
        PromptUiState::Export { path } => {
            let path = path.trim();
            if path.is_empty() {
                state.dispatch(AppCommand::SetStatus("enter a file path".to_owned()));
                return;
            }
            match runtime.export_sample(Path::new(path)) {
                Ok(()) => {
                    close_prompt(state, view_data);
                    state.dispatch(AppCommand::SetStatus(format!("sample written to {path}")));
                }
                Err(error) => {
                    state.dispatch(AppCommand::SetStatus(format!("export failed: {error:#}")));
                }
            }
        }
    }
}

/// Installs a freshly ingested collection; on failure only the status line
/// changes and the prompt stays open.
fn finish_load(
    state: &mut AppState,
    view_data: &mut ViewData,
    result: ValidationResult<Collection>,
    origin: &str,
    failure_prefix: &str,
) {
    match result {
        Ok(collection) => {
            let len = collection.len();
            debug!(len, origin, "installing collection");
            state.dispatch(AppCommand::Load(collection));
            close_prompt(state, view_data);
            state.dispatch(AppCommand::SetStatus(format!(
                "loaded {len} products from {origin}"
            )));
        }
        Err(error) => {
            state.dispatch(AppCommand::SetStatus(failure_message(failure_prefix, &error)));
        }
    }
}

fn failure_message(prefix: &str, error: &ValidationError) -> String {
    format!("{prefix}: {error}")
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    view_data: &ViewData,
    settings: &ViewerSettings,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state, settings))
        .style(Style::default().fg(Color::White))
        .block(Block::default().title("vitrine").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    let body = match state.current_record() {
        Some(record) => {
            let view = present(record, &settings.placeholder_image);
            let lines = record_lines(&view, state.nav().position(), state.nav().len());
            Paragraph::new(styled_record_text(lines))
                .block(Block::default().title("product").borders(Borders::ALL))
        }
        None => Paragraph::new(empty_state_text(state, settings.profile))
            .block(Block::default().title("no products").borders(Borders::ALL)),
    };
    frame.render_widget(body.wrap(Wrap { trim: false }), layout[1]);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(prompt) = &view_data.prompt {
        let area = centered_rect(64, 30, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(prompt_text(prompt)).block(
            Block::default()
                .title(prompt.title())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(overlay, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_text(state: &AppState, settings: &ViewerSettings) -> String {
    let loaded = if state.nav().is_empty() {
        "nothing loaded".to_owned()
    } else {
        format!("{} products", state.nav().len())
    };
    format!(
        "product gallery | profile: {} | {loaded}",
        settings.profile.as_str()
    )
}

fn record_lines(view: &RecordView, position: usize, len: usize) -> Vec<String> {
    let mut lines = vec![view.name.clone(), String::new(), view.details.clone()];
    if let Some(price) = &view.price {
        lines.push(format!("price: {price}"));
    }
    lines.push(String::new());

    match &view.image {
        ImageView::Link(url) => lines.push(format!("image: {url}")),
        ImageView::Placeholder(url) => {
            lines.push("no valid image URL found; displaying a placeholder image".to_owned());
            lines.push(format!("image: {url}"));
        }
    }

    lines.push(String::new());
    if len > 1 {
        lines.push(format!("{PREV_HINT}    {NEXT_HINT}"));
    }
    lines.push(format!("product {} of {len}", position + 1));
    lines
}

fn styled_record_text(lines: Vec<String>) -> Text<'static> {
    let mut lines = lines.into_iter();
    let mut styled = Vec::new();
    if let Some(name) = lines.next() {
        styled.push(Line::styled(
            name,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }
    styled.extend(lines.map(Line::from));
    Text::from(styled)
}

fn empty_state_text(state: &AppState, profile: Profile) -> String {
    let marker = |source: SourceKind| if state.source == source { "(•)" } else { "( )" };
    let columns = profile.required_columns().join(", ");
    [
        format!(
            "data source: {} {}   {} {}   [tab] switch  [enter] load",
            marker(SourceKind::Sheet),
            SourceKind::Sheet.label(),
            marker(SourceKind::File),
            SourceKind::File.label(),
        ),
        String::new(),
        "No products to display. Please load an Excel/CSV file or a Google Sheet.".to_owned(),
        String::new(),
        "instructions".to_owned(),
        format!("1. prepare an Excel (.xlsx) or CSV (.csv) file with the columns: {columns}"),
        "   (a column named \"image\" is accepted as \"image link\")".to_owned(),
        "2. or publish a Google Sheet with the same columns".to_owned(),
        "3. choose the data source above and press enter".to_owned(),
        "4. use ← previous and next → to move between products".to_owned(),
        "5. press e to save a sample workbook".to_owned(),
    ]
    .join("\n")
}

fn prompt_text(prompt: &PromptUiState) -> String {
    match prompt {
        PromptUiState::File { path } => format!("path: {path}▏\n\nenter load | esc cancel"),
        PromptUiState::Export { path } => format!("save to: {path}▏\n\nenter save | esc cancel"),
        PromptUiState::Sheet {
            sheet_id,
            sheet_name,
            focus,
        } => {
            let cursor = |field: SheetField| if *focus == field { "▏" } else { "" };
            format!(
                "sheet id:   {sheet_id}{}\nsheet name: {sheet_name}{}\n\nthe sheet must be shared publicly\ntab switch field | enter load | esc cancel",
                cursor(SheetField::Id),
                cursor(SheetField::Name),
            )
        }
    }
}

fn status_text(state: &AppState) -> String {
    let default = match state.mode {
        AppMode::Browse if state.nav().is_empty() => {
            "tab source | enter load | o file | s sheet | e sample | ? help | q quit"
        }
        AppMode::Browse => "←/→ move | g/G first/last | r reset | o/s load | ? help | q quit",
        AppMode::Prompt(_) => "enter submit | esc cancel",
    };
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q / ctrl+c quit | ? help\n\
browse: → l n space next | ← h p previous | home g first | end G last\n\
browse: r reset | tab switch data source | enter load selected source\n\
browse: o load file | s load Google Sheet | e save sample workbook | q quit\n\
prompt: type to edit | tab switch field | enter submit | esc cancel"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
