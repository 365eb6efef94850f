//! Crash fallback state.
//!
//! A [`Crash`] records which boundary caught the failure; that decides what the
//! page's buttons do. [`ErrorPage`] is the rendered content, built once when
//! the crash is entered and never changed afterwards.

use crate::app::action::Action;
use crate::config::DebugConfig;
use crate::host::HostCommand;

/// Message that unlocks the data-reset recovery panel.
pub const CONFIG_INIT_FAILURE: &str = "failed to initialize config";

pub const DEBUG_HINT: &str = "Check the console (CMD/CTRL + OPTION + i) for stack trace.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crash {
    /// Navigation or startup failure; recovery is a full reload.
    Boundary { error: String },
    /// Panic while rendering; recovery resets the boundary in place.
    Tree { error: String },
}

impl Crash {
    pub fn message(&self) -> String {
        match self {
            Crash::Boundary { error } => error.clone(),
            Crash::Tree { error } => format!("Error: {}", error),
        }
    }

    pub fn reload_actions(&self) -> Vec<Action> {
        match self {
            Crash::Boundary { .. } => vec![Action::Reload],
            Crash::Tree { .. } => vec![Action::ResetBoundary],
        }
    }

    /// `cause` is the underlying error text when `error` alone hides it.
    pub fn send_report_actions(&self, cause: Option<&str>) -> Vec<Action> {
        let error = match self {
            Crash::Boundary { error } | Crash::Tree { error } => error.clone(),
        };
        let error = match cause {
            Some(cause) => format!("{}\ncaused by: {}", error, cause),
            None => error,
        };
        let mut actions = vec![Action::CaptureError { error }];
        actions.extend(self.reload_actions());
        actions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashButton {
    Reload,
    SendReport,
    ResetLibrary,
}

impl CrashButton {
    pub fn label(&self) -> &'static str {
        match self {
            CrashButton::Reload => "Reload",
            CrashButton::SendReport => "Send report",
            CrashButton::ResetLibrary => "Reset Library",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub message: String,
    pub submessage: Option<String>,
}

impl ErrorPage {
    /// A supplied submessage wins; otherwise debug mode substitutes the
    /// stack-trace hint.
    pub fn new(message: String, submessage: Option<String>, debug: &DebugConfig) -> Self {
        let submessage = match submessage {
            Some(s) if !s.is_empty() => Some(s),
            _ if debug.enabled => Some(DEBUG_HINT.to_string()),
            _ => None,
        };
        Self { message, submessage }
    }

    pub fn shows_reset_panel(&self) -> bool {
        self.message == CONFIG_INIT_FAILURE
    }

    pub fn buttons(&self) -> Vec<CrashButton> {
        let mut buttons = vec![CrashButton::Reload, CrashButton::SendReport];
        if self.shows_reset_panel() {
            buttons.push(CrashButton::ResetLibrary);
        }
        buttons
    }
}

/// What pressing a crash-page button asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum CrashResponse {
    Actions(Vec<Action>),
    /// Wipe local data, asking first.
    ConfirmReset,
}

#[derive(Debug, Clone)]
pub struct CrashScreen {
    pub crash: Crash,
    pub page: ErrorPage,
    pub cause: Option<String>,
    pub selected: usize,
}

impl CrashScreen {
    pub fn new(crash: Crash, debug: &DebugConfig) -> Self {
        let page = ErrorPage::new(crash.message(), None, debug);
        Self {
            crash,
            page,
            cause: None,
            selected: 0,
        }
    }

    pub fn selected_button(&self) -> CrashButton {
        let buttons = self.page.buttons();
        buttons[self.selected.min(buttons.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.page.buttons().len();
    }

    pub fn select_prev(&mut self) {
        let len = self.page.buttons().len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn activate(&self, button: CrashButton, confirm_reset: bool) -> CrashResponse {
        match button {
            CrashButton::Reload => CrashResponse::Actions(self.crash.reload_actions()),
            CrashButton::SendReport => {
                CrashResponse::Actions(self.crash.send_report_actions(self.cause.as_deref()))
            }
            CrashButton::ResetLibrary if !self.page.shows_reset_panel() => {
                CrashResponse::Actions(Vec::new())
            }
            CrashButton::ResetLibrary if confirm_reset => CrashResponse::ConfirmReset,
            CrashButton::ResetLibrary => {
                CrashResponse::Actions(vec![Action::InvokeHost(HostCommand::ResetSpacedrive)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBUG_ON: DebugConfig = DebugConfig { enabled: true };
    const DEBUG_OFF: DebugConfig = DebugConfig { enabled: false };

    #[test]
    fn test_tree_message_and_reload_resets() {
        let screen = CrashScreen::new(Crash::Tree { error: "boom".into() }, &DEBUG_OFF);
        assert_eq!(screen.page.message, "Error: boom");
        assert_eq!(
            screen.activate(CrashButton::Reload, true),
            CrashResponse::Actions(vec![Action::ResetBoundary])
        );
        assert_eq!(
            screen.activate(CrashButton::SendReport, true),
            CrashResponse::Actions(vec![
                Action::CaptureError { error: "boom".into() },
                Action::ResetBoundary,
            ])
        );
    }

    #[test]
    fn test_boundary_message_and_reload_is_full() {
        let screen = CrashScreen::new(
            Crash::Boundary { error: "library not found: x".into() },
            &DEBUG_OFF,
        );
        assert_eq!(screen.page.message, "library not found: x");
        assert_eq!(
            screen.activate(CrashButton::Reload, true),
            CrashResponse::Actions(vec![Action::Reload])
        );
        assert_eq!(
            screen.activate(CrashButton::SendReport, true),
            CrashResponse::Actions(vec![
                Action::CaptureError { error: "library not found: x".into() },
                Action::Reload,
            ])
        );
    }

    #[test]
    fn test_send_report_includes_cause() {
        let mut screen = CrashScreen::new(
            Crash::Boundary { error: CONFIG_INIT_FAILURE.into() },
            &DEBUG_OFF,
        );
        screen.cause = Some("TOML parse error at line 1, column 12".into());
        // The page keeps the plain message so the reset panel still shows
        assert!(screen.page.shows_reset_panel());
        assert_eq!(
            screen.activate(CrashButton::SendReport, true),
            CrashResponse::Actions(vec![
                Action::CaptureError {
                    error: format!(
                        "{}\ncaused by: TOML parse error at line 1, column 12",
                        CONFIG_INIT_FAILURE
                    ),
                },
                Action::Reload,
            ])
        );
    }

    #[test]
    fn test_reset_panel_only_for_config_failure() {
        let page = ErrorPage::new(CONFIG_INIT_FAILURE.into(), None, &DEBUG_OFF);
        assert!(page.shows_reset_panel());
        assert_eq!(page.buttons().last(), Some(&CrashButton::ResetLibrary));

        for other in ["Error: failed to initialize config", "failed to initialize config.", "boom"] {
            let page = ErrorPage::new(other.into(), None, &DEBUG_OFF);
            assert!(!page.shows_reset_panel(), "{other}");
            assert!(!page.buttons().contains(&CrashButton::ResetLibrary));
        }
    }

    #[test]
    fn test_submessage_resolution() {
        let page = ErrorPage::new("m".into(), None, &DEBUG_ON);
        assert_eq!(page.submessage.as_deref(), Some(DEBUG_HINT));

        let page = ErrorPage::new("m".into(), None, &DEBUG_OFF);
        assert_eq!(page.submessage, None);

        let page = ErrorPage::new("m".into(), Some("details".into()), &DEBUG_ON);
        assert_eq!(page.submessage.as_deref(), Some("details"));
    }

    #[test]
    fn test_reset_button_routing() {
        let screen = CrashScreen::new(
            Crash::Boundary { error: CONFIG_INIT_FAILURE.into() },
            &DEBUG_OFF,
        );
        assert_eq!(
            screen.activate(CrashButton::ResetLibrary, true),
            CrashResponse::ConfirmReset
        );
        assert_eq!(
            screen.activate(CrashButton::ResetLibrary, false),
            CrashResponse::Actions(vec![Action::InvokeHost(HostCommand::ResetSpacedrive)])
        );
    }

    #[test]
    fn test_button_cycling_wraps() {
        let mut screen = CrashScreen::new(Crash::Tree { error: "boom".into() }, &DEBUG_OFF);
        assert_eq!(screen.selected_button(), CrashButton::Reload);
        screen.select_next();
        assert_eq!(screen.selected_button(), CrashButton::SendReport);
        screen.select_next();
        assert_eq!(screen.selected_button(), CrashButton::Reload);
        screen.select_prev();
        assert_eq!(screen.selected_button(), CrashButton::SendReport);
    }
}
