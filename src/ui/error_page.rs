//! Full-screen crash fallback.

use crate::app::crash::{CrashButton, CrashScreen};
use crate::app::state::{HostOs, StatusKind, StatusMessage};
use crate::ui::button;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const HEADING: &str = "APP CRASHED";
const TITLE: &str = "We're past the event horizon...";
const RESET_COPY: &str = "We detected you may have created your library with an older version of Spacedrive. Please reset it to continue using the app!";
const RESET_WARNING: &str = "YOU WILL LOSE ANY EXISTING SPACEDRIVE DATA!";

/// Rounded corners on macOS only; purely cosmetic.
pub fn border_type(os: HostOs) -> BorderType {
    match os {
        HostOs::MacOs => BorderType::Rounded,
        _ => BorderType::Plain,
    }
}

/// `status` carries feedback from recovery actions, such as a failed reset.
pub fn render(frame: &mut Frame, screen: &CrashScreen, os: HostOs, status: Option<&StatusMessage>) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(os))
        .border_style(Theme::border())
        .style(Theme::app_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let page = &screen.page;
    let focused = screen.selected_button();

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(HEADING, Theme::text_faint().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(TITLE, Theme::title())),
        Line::default(),
    ];
    for l in page.message.lines() {
        lines.push(Line::from(Span::styled(l.to_string(), Theme::text())));
    }
    if let Some(ref sub) = page.submessage {
        for l in sub.lines() {
            lines.push(Line::from(Span::styled(l.to_string(), Theme::text_dull())));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        button(
            CrashButton::Reload.label(),
            Theme::button(focused == CrashButton::Reload, false, true),
        ),
        Span::raw("  "),
        button(
            CrashButton::SendReport.label(),
            Theme::button(focused == CrashButton::SendReport, false, false),
        ),
    ]));

    if page.shows_reset_panel() {
        lines.push(Line::default());
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(RESET_COPY, Theme::text())));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(RESET_WARNING, Theme::danger_text())));
        lines.push(Line::default());
        lines.push(Line::from(button(
            CrashButton::ResetLibrary.label(),
            Theme::button(focused == CrashButton::ResetLibrary, true, false),
        )));
    }

    if let Some(status) = status {
        let style = match status.kind {
            StatusKind::Error => Theme::danger_text(),
            _ => Theme::text_dull(),
        };
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(status.text.clone(), style)));
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("←→", Theme::key_hint()),
        Span::styled(" Select  ", Theme::text_dull()),
        Span::styled("Enter", Theme::key_hint()),
        Span::styled(" Activate  ", Theme::text_dull()),
        Span::styled("r", Theme::key_hint()),
        Span::styled(" Reload  ", Theme::text_dull()),
        Span::styled("s", Theme::key_hint()),
        Span::styled(" Send report  ", Theme::text_dull()),
        Span::styled("q", Theme::key_hint()),
        Span::styled(" Quit", Theme::text_dull()),
    ]));

    // Vertically center; long messages wrap and may push past the fold.
    let height = (lines.len() as u16).min(inner.height);
    let top = inner.y + inner.height.saturating_sub(height) / 2;
    let body = Rect::new(inner.x, top, inner.width, inner.bottom().saturating_sub(top));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, body);
}
