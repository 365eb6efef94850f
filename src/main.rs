mod app;
mod bridge;
mod config;
mod host;
mod logging;
mod telemetry;
mod ui;

use crate::app::action::Action;
use crate::app::boundary;
use crate::app::crash::Crash;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::{AppState, HostOs, Modal};
use crate::bridge::client::BridgeClient;
use crate::config::{AppConfig, ConfigError};
use crate::telemetry::analytics::AnalyticsSink;
use crate::telemetry::diagnostics::Diagnostics;
use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::collections::VecDeque;
use std::io;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal, unless the render boundary
    // is going to recover from the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if boundary::is_active() {
            error!(%info, "panic inside render boundary");
            return;
        }
        let _ = restore_terminal();
        original_hook(info);
    }));

    let (cfg, config_error) = load_config_or_default();

    if let Err(e) = logging::init(&cfg.logging) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting libdeck");
    let startup_crash = config_error.map(config_crash);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, startup_crash).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        error!(error = %e, "fatal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// A broken config file does not stop the app: it starts on defaults and
/// shows the crash page with the error.
fn load_config_or_default() -> (AppConfig, Option<ConfigError>) {
    match config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

/// Must run after logging is up.
fn config_crash(e: ConfigError) -> (Crash, String) {
    let cause = e.cause();
    warn!(error = %e, %cause, "config load failed");
    (
        Crash::Boundary {
            error: e.to_string(),
        },
        cause,
    )
}

/// Collaborators that act on [`Action`]s outside of [`AppState`].
struct Services {
    bridge: BridgeClient,
    analytics: AnalyticsSink,
    diagnostics: Diagnostics,
}

impl Services {
    fn new(cfg: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            bridge: BridgeClient::new(cfg, event_tx),
            analytics: AnalyticsSink::spawn(&cfg.telemetry),
            diagnostics: Diagnostics::new(&cfg.diagnostics),
        }
    }
}

async fn run_app(
    terminal: &mut Term,
    cfg: AppConfig,
    startup_crash: Option<(Crash, String)>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let os = HostOs::detect();
    let mut state = AppState::new(cfg.clone(), os);
    let mut services = Services::new(&cfg, event_tx.clone());
    if let Some((crash, cause)) = startup_crash {
        state.enter_crash_with_cause(crash, Some(cause));
    }

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    let tick = std::time::Duration::from_millis(cfg.ui.tick_ms.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut queue: VecDeque<Action> = VecDeque::from([Action::FetchLibraries]);

    // Main event loop
    loop {
        // Process actions
        while let Some(action) = queue.pop_front() {
            debug!(?action, "dispatch");
            match action {
                Action::FetchLibraries => {
                    if state.queries.libraries.begin_fetch() {
                        services.bridge.list();
                    }
                }
                Action::CreateLibrary { name } => services.bridge.create(name),
                Action::DeleteLibrary { request, library } => {
                    info!(request, %library, "deleting library");
                    services.bridge.delete(request, library);
                }
                Action::InvalidateQuery(key) => {
                    debug!(%key, "invalidating query");
                    if state.queries.invalidate(key) {
                        queue.push_back(Action::FetchLibraries);
                    }
                }
                Action::Navigate(route) => queue.extend(handler::navigate(&mut state, route)),
                Action::TrackEvent(event) => services.analytics.track(event),
                Action::CaptureError { error } => services.diagnostics.capture(&error),
                Action::Reload => {
                    info!("full reload");
                    let (cfg, config_error) = load_config_or_default();
                    let next_request_id = state.next_request_id;
                    state = AppState::new(cfg.clone(), os);
                    state.next_request_id = next_request_id;
                    if let Some((crash, cause)) = config_error.map(config_crash) {
                        state.enter_crash_with_cause(crash, Some(cause));
                    }
                    let old = std::mem::replace(&mut services, Services::new(&cfg, event_tx.clone()));
                    old.analytics.shutdown().await;
                    queue.clear();
                    queue.push_back(Action::FetchLibraries);
                    terminal.clear()?;
                }
                Action::ResetBoundary => {
                    info!("resetting render boundary");
                    state.reset_boundary();
                    terminal.clear()?;
                }
                Action::InvokeHost(command) => match host::invoke(
                    command,
                    &state.config,
                    &config::config_path(),
                ) {
                    Ok(()) => {
                        queue.clear();
                        queue.push_back(Action::Reload);
                    }
                    Err(e) => {
                        error!(command = command.name(), error = %e, "host command failed");
                        if matches!(state.modal, Some(Modal::ResetData(_))) {
                            state.modal = None;
                        }
                        state.error(format!("{} failed: {:#}", command.name(), e));
                    }
                },
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            draw(terminal, &mut state)?;
            state.dirty = false;
        }

        let Some(event) = event_rx.recv().await else { break };
        queue.extend(handler::handle_event(&mut state, event));
    }

    services.analytics.shutdown().await;
    info!("exiting");
    Ok(())
}

/// Draw one frame inside the render boundary. A panic switches the UI to the
/// crash page; a panic while drawing the crash page itself is fatal.
fn draw<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    draw_with(terminal, state, ui::render)
}

fn draw_with<B, F>(terminal: &mut Terminal<B>, state: &mut AppState, render: F) -> Result<()>
where
    B: Backend,
    F: Fn(&mut Frame, &AppState),
{
    let panic = match boundary::catch(|| terminal.draw(|f| render(f, state)).map(|_| ())) {
        Ok(result) => return Ok(result?),
        Err(panic) => panic,
    };

    error!(%panic, "render panicked");
    if state.crash.is_some() {
        anyhow::bail!("crash page failed to render: {}", panic);
    }
    state.enter_crash(Crash::Tree { error: panic });
    terminal.clear()?;
    match boundary::catch(|| terminal.draw(|f| render(f, state)).map(|_| ())) {
        Ok(result) => Ok(result?),
        Err(panic) => anyhow::bail!("crash page failed to render: {}", panic),
    }
}
