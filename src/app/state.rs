use crate::app::confirm::ConfirmDialog;
use crate::app::crash::{Crash, CrashScreen};
use crate::app::delete::DeleteLibraryDialog;
use crate::app::event::RequestId;
use crate::app::query::QueryCache;
use crate::app::route::{self, NavigationError, Route};
use crate::bridge::LibraryInfo;
use crate::config::{AppConfig, DebugConfig};
use std::time::{Duration, Instant};
use tracing::warn;

/// Operating system family, used for platform-specific styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Windows,
    Linux,
    Other,
}

impl HostOs {
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => HostOs::MacOs,
            "windows" => HostOs::Windows,
            "linux" => HostOs::Linux,
            _ => HostOs::Other,
        }
    }
}

/// Single-line text entry.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// Overlay that captures all input while present.
#[derive(Debug)]
pub enum Modal {
    DeleteLibrary(DeleteLibraryDialog),
    ResetData(ConfirmDialog),
    CreateLibrary(InputState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub at: Instant,
}

pub struct AppState {
    pub config: AppConfig,
    pub os: HostOs,
    pub debug: DebugConfig,
    pub route: Route,
    pub queries: QueryCache,
    pub selected: usize,
    pub modal: Option<Modal>,
    pub crash: Option<CrashScreen>,
    pub next_request_id: RequestId,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, os: HostOs) -> Self {
        let debug = config.debug;
        Self {
            config,
            os,
            debug,
            route: Route::Libraries,
            queries: QueryCache::default(),
            selected: 0,
            modal: None,
            crash: None,
            next_request_id: 0,
            status: None,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn libraries(&self) -> &[LibraryInfo] {
        self.queries
            .libraries
            .data()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn selected_library(&self) -> Option<&LibraryInfo> {
        self.libraries().get(self.selected)
    }

    pub fn current_library(&self) -> Option<&LibraryInfo> {
        match &self.route {
            Route::Library(id) => self.libraries().iter().find(|l| l.id == *id),
            Route::Libraries => None,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.libraries().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.libraries().len().saturating_sub(1));
    }

    /// Switch routes, rejecting routes that point at missing libraries.
    pub fn navigate(&mut self, route: Route) -> Result<(), NavigationError> {
        route::resolve(&route, self.libraries())?;
        self.route = route;
        self.dirty = true;
        Ok(())
    }

    /// Replace the UI with the crash page. Open dialogs are dropped, except
    /// that an in-flight delete keeps waiting for its reply.
    pub fn enter_crash(&mut self, crash: Crash) {
        self.enter_crash_with_cause(crash, None);
    }

    /// Like [`enter_crash`](Self::enter_crash), keeping the underlying error
    /// for crash reports.
    pub fn enter_crash_with_cause(&mut self, crash: Crash, cause: Option<String>) {
        warn!(?crash, cause = cause.as_deref().unwrap_or("-"), "entering crash fallback");
        if !matches!(&self.modal, Some(Modal::DeleteLibrary(d)) if d.is_pending()) {
            self.modal = None;
        }
        let mut screen = CrashScreen::new(crash, &self.debug);
        screen.cause = cause;
        self.crash = Some(screen);
        self.dirty = true;
    }

    pub fn reset_boundary(&mut self) {
        self.crash = None;
        self.dirty = true;
    }

    pub fn info(&mut self, text: String) {
        self.set_status(text, StatusKind::Info);
    }

    pub fn error(&mut self, text: String) {
        self.set_status(text, StatusKind::Error);
    }

    fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text,
            kind,
            at: Instant::now(),
        });
        self.dirty = true;
    }

    pub fn expire_status(&mut self, now: Instant) {
        let ttl = Duration::from_secs(self.config.ui.status_ttl_secs);
        if self
            .status
            .as_ref()
            .is_some_and(|s| now.duration_since(s.at) >= ttl)
        {
            self.status = None;
            self.dirty = true;
        }
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status {
            return msg.text.clone();
        }
        let count = self.libraries().len();
        let mut s = format!("Libraries: {}", count);
        if self.queries.libraries.is_fetching() {
            s.push_str(" | refreshing");
        }
        if self.debug.enabled {
            s.push_str(" | debug");
        }
        s
    }
}
