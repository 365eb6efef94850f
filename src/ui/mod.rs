mod confirm_dialog;
mod error_page;
mod layout;
mod library_detail;
mod library_list;
mod prompt;
mod status_bar;
mod theme;

use crate::app::route::Route;
use crate::app::state::{AppState, Modal};
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    if let Some(ref screen) = state.crash {
        error_page::render(frame, screen, state.os, state.status.as_ref());
        if let Some(Modal::ResetData(ref dialog)) = state.modal {
            confirm_dialog::render(frame, dialog);
        }
        return;
    }

    let app_layout = layout::compute_layout(frame.area());

    match state.route {
        Route::Libraries => library_list::render(frame, app_layout.content, state),
        Route::Library(_) => library_detail::render(frame, app_layout.content, state),
    }
    status_bar::render(frame, app_layout.status_bar, state);

    match state.modal {
        Some(Modal::DeleteLibrary(ref d)) => confirm_dialog::render(frame, &d.dialog),
        Some(Modal::ResetData(ref d)) => confirm_dialog::render(frame, d),
        Some(Modal::CreateLibrary(ref input)) => prompt::render(frame, input),
        None => {}
    }
}

fn button(label: &str, style: Style) -> Span<'static> {
    Span::styled(format!(" {} ", label), style)
}
