use crate::app::action::Action;
use crate::app::confirm::{ConfirmDialog, ConfirmOutcome};
use crate::app::crash::{Crash, CrashButton, CrashResponse};
use crate::app::delete::DeleteLibraryDialog;
use crate::app::event::{AppEvent, RequestId};
use crate::app::query::QueryKey;
use crate::app::route::{self, Route};
use crate::app::state::*;
use crate::bridge::{BridgeError, LibraryInfo};
use crate::host::HostCommand;
use crate::telemetry::analytics::AnalyticsEvent;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;
use tracing::{debug, error, info};

const RESET_TITLE: &str = "Reset Library";
const RESET_DESCRIPTION: &str =
    "This removes every library and all local settings. YOU WILL LOSE ANY EXISTING SPACEDRIVE DATA!";
const RESET_CTA: &str = "Reset";

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::LibrariesLoaded { result } => handle_libraries_loaded(state, result),
        AppEvent::LibraryCreated { result } => match result {
            Ok(library) => {
                state.info(format!("Created library \"{}\"", library.name));
                vec![
                    Action::InvalidateQuery(QueryKey::LibraryList),
                    Action::TrackEvent(AnalyticsEvent::LibraryCreate),
                ]
            }
            Err(e) => {
                error!(error = %e, "library.create failed");
                state.error(format!("Failed to create library: {}", e));
                vec![]
            }
        },
        AppEvent::DeleteSettled { request, result } => handle_delete_settled(state, request, result),
        AppEvent::Tick => {
            state.expire_status(Instant::now());
            vec![]
        }
    }
}

fn handle_libraries_loaded(
    state: &mut AppState,
    result: Result<Vec<LibraryInfo>, BridgeError>,
) -> Vec<Action> {
    let failed = result.as_ref().err().map(|e| e.to_string());
    let refetch = state.queries.libraries.resolve(result.map_err(|e| e.to_string()));
    if let Some(e) = failed {
        state.error(format!("Failed to load libraries: {}", e));
    }
    state.clamp_selection();
    state.dirty = true;

    if state.crash.is_none() {
        if let Err(e) = route::resolve(&state.route, state.libraries()) {
            state.enter_crash(Crash::Boundary { error: e.to_string() });
        }
    }

    if refetch {
        vec![Action::FetchLibraries]
    } else {
        vec![]
    }
}

fn handle_delete_settled(
    state: &mut AppState,
    request: RequestId,
    result: Result<(), BridgeError>,
) -> Vec<Action> {
    let Some(Modal::DeleteLibrary(dialog)) = state.modal.as_mut() else {
        debug!(request, "delete reply with no dialog open");
        return vec![];
    };
    let library = dialog.library();
    let Some(outcome) = dialog.settle(request, result) else {
        return vec![];
    };
    state.modal = None;
    state.dirty = true;

    match outcome {
        Ok(actions) => {
            info!(%library, "library deleted");
            state.info("Library deleted".to_string());
            actions
        }
        Err(e) => {
            error!(%library, error = %e, "library.delete failed");
            state.error(format!("Failed to delete library: {}", e));
            // A timed-out delete may still complete on disk.
            if matches!(e, BridgeError::Timeout { .. }) {
                vec![Action::InvalidateQuery(QueryKey::LibraryList)]
            } else {
                vec![]
            }
        }
    }
}

/// Apply a route change requested by an action.
pub fn navigate(state: &mut AppState, route: Route) -> Vec<Action> {
    if let Err(e) = state.navigate(route) {
        state.enter_crash(Crash::Boundary { error: e.to_string() });
    }
    vec![]
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return vec![Action::Quit],
            KeyCode::Char('d') => {
                state.debug.enabled = !state.debug.enabled;
                state.info(format!(
                    "Debug mode {}",
                    if state.debug.enabled { "on" } else { "off" }
                ));
                return vec![];
            }
            _ => {}
        }
    }

    if state.crash.is_some() {
        if matches!(state.modal, Some(Modal::ResetData(_))) {
            return handle_modal_key(state, key);
        }
        return handle_crash_key(state, key);
    }

    if state.modal.is_some() {
        return handle_modal_key(state, key);
    }

    match state.route.clone() {
        Route::Libraries => handle_list_key(state, key),
        Route::Library(_) => handle_detail_key(state, key),
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            vec![]
        }
        KeyCode::Enter => match state.selected_library().map(|l| l.id) {
            Some(id) => navigate(state, Route::Library(id)),
            None => vec![],
        },
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = state.selected_library().map(|l| l.id) {
                state.modal = Some(Modal::DeleteLibrary(DeleteLibraryDialog::open(id, None)));
            }
            vec![]
        }
        KeyCode::Char('n') => {
            state.modal = Some(Modal::CreateLibrary(InputState::new()));
            vec![]
        }
        KeyCode::Char('r') => vec![Action::InvalidateQuery(QueryKey::LibraryList)],
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn handle_detail_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => navigate(state, Route::Libraries),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = state.current_library().map(|l| l.id) {
                state.modal = Some(Modal::DeleteLibrary(DeleteLibraryDialog::open(
                    id,
                    Some(Action::Navigate(Route::Libraries)),
                )));
            }
            vec![]
        }
        KeyCode::Char('r') => vec![Action::InvalidateQuery(QueryKey::LibraryList)],
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn handle_modal_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Some(modal) = state.modal.as_mut() else {
        return vec![];
    };

    match modal {
        Modal::DeleteLibrary(dialog) => match dialog.dialog.handle_key(key) {
            ConfirmOutcome::Confirmed => {
                let request = state.allocate_request_id();
                match state.modal.as_mut() {
                    Some(Modal::DeleteLibrary(dialog)) => dialog.submit(request).into_iter().collect(),
                    _ => vec![],
                }
            }
            ConfirmOutcome::Cancelled => {
                state.modal = None;
                vec![]
            }
            ConfirmOutcome::None => vec![],
        },
        Modal::ResetData(dialog) => match dialog.handle_key(key) {
            ConfirmOutcome::Confirmed => {
                dialog.loading = true;
                vec![Action::InvokeHost(HostCommand::ResetSpacedrive)]
            }
            ConfirmOutcome::Cancelled => {
                state.modal = None;
                vec![]
            }
            ConfirmOutcome::None => vec![],
        },
        Modal::CreateLibrary(input) => match key.code {
            KeyCode::Esc => {
                state.modal = None;
                vec![]
            }
            KeyCode::Enter => {
                let name = input.take_text();
                state.modal = None;
                if name.trim().is_empty() {
                    vec![]
                } else {
                    vec![Action::CreateLibrary { name }]
                }
            }
            KeyCode::Backspace => {
                input.delete_back();
                vec![]
            }
            KeyCode::Left => {
                input.move_left();
                vec![]
            }
            KeyCode::Right => {
                input.move_right();
                vec![]
            }
            KeyCode::Char(c) => {
                input.insert_char(c);
                vec![]
            }
            _ => vec![],
        },
    }
}

fn handle_crash_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Some(screen) = state.crash.as_mut() else {
        return vec![];
    };

    let button = match key.code {
        KeyCode::Left | KeyCode::BackTab => {
            screen.select_prev();
            return vec![];
        }
        KeyCode::Right | KeyCode::Tab => {
            screen.select_next();
            return vec![];
        }
        KeyCode::Enter => screen.selected_button(),
        KeyCode::Char('r') => CrashButton::Reload,
        KeyCode::Char('s') => CrashButton::SendReport,
        KeyCode::Char('q') => return vec![Action::Quit],
        _ => return vec![],
    };

    match screen.activate(button, state.config.recovery.confirm_reset) {
        CrashResponse::Actions(actions) => actions,
        CrashResponse::ConfirmReset => {
            let mut dialog = ConfirmDialog::new(RESET_TITLE, RESET_DESCRIPTION, RESET_CTA).danger();
            dialog.open();
            state.modal = Some(Modal::ResetData(dialog));
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::crash::CONFIG_INIT_FAILURE;
    use crate::bridge::LibraryId;
    use crate::config::AppConfig;
    use chrono::Utc;
    use std::io;

    fn press(state: &mut AppState, code: KeyCode) -> Vec<Action> {
        handle_event(
            state,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn library(name: &str) -> LibraryInfo {
        LibraryInfo {
            id: LibraryId::new(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn loaded(libraries: Vec<LibraryInfo>) -> AppState {
        let mut state = AppState::new(AppConfig::default(), HostOs::Linux);
        state.queries.libraries.begin_fetch();
        handle_event(&mut state, AppEvent::LibrariesLoaded { result: Ok(libraries) });
        state
    }

    fn confirm_delete(state: &mut AppState) -> RequestId {
        press(state, KeyCode::Char('d'));
        let actions = press(state, KeyCode::Char('y'));
        match actions.as_slice() {
            [Action::DeleteLibrary { request, .. }] => *request,
            other => panic!("expected one delete call, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_success_flow() {
        let lib = library("Photos");
        let mut state = loaded(vec![lib.clone()]);

        press(&mut state, KeyCode::Char('d'));
        assert!(matches!(state.modal, Some(Modal::DeleteLibrary(_))));
        let actions = press(&mut state, KeyCode::Char('y'));
        assert_eq!(actions, vec![Action::DeleteLibrary { request: 0, library: lib.id }]);

        // Locked while in flight
        assert!(press(&mut state, KeyCode::Char('y')).is_empty());
        assert!(press(&mut state, KeyCode::Esc).is_empty());
        assert!(state.modal.is_some());

        let actions = handle_event(&mut state, AppEvent::DeleteSettled { request: 0, result: Ok(()) });
        assert_eq!(
            actions,
            vec![
                Action::InvalidateQuery(QueryKey::LibraryList),
                Action::TrackEvent(AnalyticsEvent::LibraryDelete),
            ]
        );
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_delete_failure_flow() {
        let mut state = loaded(vec![library("Photos")]);
        let request = confirm_delete(&mut state);

        let err = BridgeError::Io(io::Error::new(io::ErrorKind::Other, "bridge down"));
        let actions = handle_event(&mut state, AppEvent::DeleteSettled { request, result: Err(err) });
        assert!(actions.is_empty());
        assert!(state.modal.is_none());
        let status = state.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("bridge down"));
    }

    #[test]
    fn test_delete_timeout_refreshes_listing() {
        let mut state = loaded(vec![library("Photos")]);
        press(&mut state, KeyCode::Enter);
        let request = confirm_delete(&mut state);

        let err = BridgeError::Timeout {
            procedure: "library.delete",
            after: std::time::Duration::from_secs(10),
        };
        let actions = handle_event(&mut state, AppEvent::DeleteSettled { request, result: Err(err) });
        // No callback and no analytics, but the listing is re-read
        assert_eq!(actions, vec![Action::InvalidateQuery(QueryKey::LibraryList)]);
        assert!(state.modal.is_none());
        assert_eq!(state.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_duplicate_settle_is_ignored() {
        let mut state = loaded(vec![library("Photos")]);
        let request = confirm_delete(&mut state);
        assert_eq!(
            handle_event(&mut state, AppEvent::DeleteSettled { request, result: Ok(()) }).len(),
            2
        );
        assert!(handle_event(&mut state, AppEvent::DeleteSettled { request, result: Ok(()) }).is_empty());
    }

    #[test]
    fn test_delete_from_detail_navigates_back() {
        let lib = library("Photos");
        let mut state = loaded(vec![lib.clone()]);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.route, Route::Library(lib.id));

        let request = confirm_delete(&mut state);
        let actions = handle_event(&mut state, AppEvent::DeleteSettled { request, result: Ok(()) });
        assert_eq!(
            actions,
            vec![
                Action::InvalidateQuery(QueryKey::LibraryList),
                Action::Navigate(Route::Libraries),
                Action::TrackEvent(AnalyticsEvent::LibraryDelete),
            ]
        );
    }

    #[test]
    fn test_cancel_closes_without_call() {
        let mut state = loaded(vec![library("Photos")]);
        press(&mut state, KeyCode::Char('d'));
        assert!(press(&mut state, KeyCode::Esc).is_empty());
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_missing_library_route_is_boundary_crash() {
        let lib = library("Photos");
        let mut state = loaded(vec![lib.clone()]);
        press(&mut state, KeyCode::Enter);

        // Library vanished underneath the detail view
        state.queries.libraries.begin_fetch();
        handle_event(&mut state, AppEvent::LibrariesLoaded { result: Ok(vec![]) });
        let screen = state.crash.as_ref().unwrap();
        assert_eq!(screen.page.message, format!("library not found: {}", lib.id));
        assert_eq!(press(&mut state, KeyCode::Char('r')), vec![Action::Reload]);
    }

    #[test]
    fn test_tree_crash_reload_resets_boundary() {
        let mut state = loaded(vec![]);
        state.enter_crash(Crash::Tree { error: "boom".into() });
        assert_eq!(state.crash.as_ref().unwrap().page.message, "Error: boom");
        assert_eq!(press(&mut state, KeyCode::Enter), vec![Action::ResetBoundary]);
    }

    #[test]
    fn test_reset_library_goes_through_confirmation() {
        let mut state = loaded(vec![]);
        state.enter_crash(Crash::Boundary { error: CONFIG_INIT_FAILURE.into() });
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Right);
        assert!(press(&mut state, KeyCode::Enter).is_empty());
        assert!(matches!(state.modal, Some(Modal::ResetData(_))));

        assert_eq!(
            press(&mut state, KeyCode::Char('y')),
            vec![Action::InvokeHost(HostCommand::ResetSpacedrive)]
        );
    }

    #[test]
    fn test_reset_library_unguarded_when_configured() {
        let mut state = loaded(vec![]);
        state.config.recovery.confirm_reset = false;
        state.enter_crash(Crash::Boundary { error: CONFIG_INIT_FAILURE.into() });
        press(&mut state, KeyCode::Left);
        assert_eq!(
            press(&mut state, KeyCode::Enter),
            vec![Action::InvokeHost(HostCommand::ResetSpacedrive)]
        );
    }

    #[test]
    fn test_create_prompt() {
        let mut state = loaded(vec![]);
        press(&mut state, KeyCode::Char('n'));
        for c in "Docs".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        assert_eq!(
            press(&mut state, KeyCode::Enter),
            vec![Action::CreateLibrary { name: "Docs".into() }]
        );
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_refetch_when_invalidated_in_flight() {
        let mut state = AppState::new(AppConfig::default(), HostOs::Linux);
        state.queries.libraries.begin_fetch();
        assert!(!state.queries.invalidate(QueryKey::LibraryList));
        let actions = handle_event(&mut state, AppEvent::LibrariesLoaded { result: Ok(vec![]) });
        assert_eq!(actions, vec![Action::FetchLibraries]);
    }

    #[test]
    fn test_ctrl_d_toggles_debug() {
        let mut state = loaded(vec![]);
        handle_event(
            &mut state,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))),
        );
        assert!(state.debug.enabled);
    }
}
