use crate::app::route::Route;
use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    let style = match state.status.as_ref().map(|s| &s.kind) {
        Some(StatusKind::Error) => Theme::status_error(),
        _ => Theme::status_bar(),
    };
    parts.push(Span::styled(format!(" {} ", state.status_line()), style));

    // Route indicator
    let route_name = match state.route {
        Route::Libraries => "LIBRARIES",
        Route::Library(_) => "LIBRARY",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| UnicodeWidthStr::width(s.content.as_ref())).sum();
    let remaining = (area.width as usize).saturating_sub(used + route_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", route_name),
        Style::default().fg(Theme::ACCENT).bg(Theme::BORDER_DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
