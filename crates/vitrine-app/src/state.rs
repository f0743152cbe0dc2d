// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{Collection, NavChange, NavigationState, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Sheet,
}

impl SourceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "offline file [CSV, Excel]",
            Self::Sheet => "Google Sheet",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::File => Self::Sheet,
            Self::Sheet => Self::File,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "file" => Some(Self::File),
            "sheet" => Some(Self::Sheet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    OpenFile,
    OpenSheet,
    ExportSample,
}

impl PromptKind {
    pub const fn for_source(source: SourceKind) -> Self {
        match source {
            SourceKind::File => Self::OpenFile,
            SourceKind::Sheet => Self::OpenSheet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Browse,
    Prompt(PromptKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub mode: AppMode,
    pub source: SourceKind,
    pub status_line: Option<String>,
    nav: NavigationState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Browse,
            source: SourceKind::Sheet,
            status_line: None,
            nav: NavigationState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Load(Collection),
    Next,
    Previous,
    First,
    Last,
    Reset,
    SelectSource(SourceKind),
    ToggleSource,
    OpenPrompt(PromptKind),
    ClosePrompt,
    SetStatus(String),
    ClearStatus,
}

impl AppCommand {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::First => "first",
            Self::Last => "last",
            Self::Reset => "reset",
            Self::SelectSource(_) => "select_source",
            Self::ToggleSource => "toggle_source",
            Self::OpenPrompt(_) => "open_prompt",
            Self::ClosePrompt => "close_prompt",
            Self::SetStatus(_) => "set_status",
            Self::ClearStatus => "clear_status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    CollectionLoaded { len: usize },
    PositionChanged(usize),
    CollectionCleared,
    SourceChanged(SourceKind),
    ModeChanged(AppMode),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_source(source: SourceKind) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn current_record(&self) -> Option<&Record> {
        self.nav.current()
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        debug!(command = command.label(), "dispatch");
        match command {
            AppCommand::Load(collection) => nav_events(self.nav.load(collection)),
            AppCommand::Next => nav_events(self.nav.next()),
            AppCommand::Previous => nav_events(self.nav.previous()),
            AppCommand::First => nav_events(self.nav.jump_to(0)),
            AppCommand::Last => {
                let last = self.nav.len().saturating_sub(1);
                nav_events(self.nav.jump_to(last))
            }
            AppCommand::Reset => {
                let mut events = nav_events(self.nav.reset());
                if self.mode != AppMode::Browse {
                    self.mode = AppMode::Browse;
                    events.push(AppEvent::ModeChanged(self.mode));
                }
                events.push(self.set_status("reset"));
                events
            }
            AppCommand::SelectSource(source) => {
                self.source = source;
                vec![AppEvent::SourceChanged(source)]
            }
            AppCommand::ToggleSource => {
                self.source = self.source.toggled();
                vec![AppEvent::SourceChanged(self.source)]
            }
            AppCommand::OpenPrompt(kind) => {
                self.mode = AppMode::Prompt(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ClosePrompt => {
                self.mode = AppMode::Browse;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

fn nav_events(change: NavChange) -> Vec<AppEvent> {
    match change {
        NavChange::Loaded { len } => vec![
            AppEvent::CollectionLoaded { len },
            AppEvent::PositionChanged(0),
        ],
        NavChange::Moved(position) => vec![AppEvent::PositionChanged(position)],
        NavChange::Cleared => vec![AppEvent::CollectionCleared],
        NavChange::Unchanged => Vec::new(),
    }
}
