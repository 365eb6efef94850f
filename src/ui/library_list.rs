use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 32;

/// Truncate to `width` display columns, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width.saturating_sub(3) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let libraries = state.libraries();
    let query = &state.queries.libraries;

    let title = if query.is_fetching() && query.data().is_none() {
        " Libraries (loading...) ".to_string()
    } else {
        format!(" Libraries ({}) ", libraries.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::app_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let list_h = (inner.height as usize).saturating_sub(2); // header + help
    let header = Line::from(Span::styled(
        format!("  {:<width$}  {}", "Name", "Created", width = NAME_WIDTH),
        Theme::key_hint(),
    ));
    frame.render_widget(Paragraph::new(header), Rect::new(inner.x, inner.y, inner.width, 1));

    let list_area = Rect::new(inner.x, inner.y + 1, inner.width, list_h as u16);
    if libraries.is_empty() {
        let (msg, style) = if query.is_fetching() {
            ("  Loading libraries...".to_string(), Theme::text_faint())
        } else if let Some(e) = query.error() {
            (format!("  {}", e), Theme::danger_text())
        } else {
            ("  No libraries yet. Press n to create one.".to_string(), Theme::text_faint())
        };
        frame.render_widget(Paragraph::new(Span::styled(msg, style)), list_area);
    } else {
        let start = state.selected.saturating_sub(list_h.saturating_sub(1));
        let lines: Vec<Line> = libraries
            .iter()
            .enumerate()
            .skip(start)
            .take(list_h)
            .map(|(i, lib)| {
                let name = truncate(&lib.name, NAME_WIDTH);
                let pad = NAME_WIDTH.saturating_sub(UnicodeWidthStr::width(name.as_str()));
                let text = format!(
                    "  {}{}  {}",
                    name,
                    " ".repeat(pad),
                    lib.created_at.format("%Y-%m-%d %H:%M")
                );
                let style = if i == state.selected {
                    Theme::selected()
                } else {
                    Theme::text()
                };
                Line::from(Span::styled(text, style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    // Help
    let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" ↑↓", Theme::key_hint()),
        Span::styled(" Navigate  ", Theme::text_dull()),
        Span::styled("Enter", Theme::key_hint()),
        Span::styled(" Open  ", Theme::text_dull()),
        Span::styled("n", Theme::key_hint()),
        Span::styled(" New  ", Theme::text_dull()),
        Span::styled("d", Theme::key_hint()),
        Span::styled(" Delete  ", Theme::text_dull()),
        Span::styled("r", Theme::key_hint()),
        Span::styled(" Refresh  ", Theme::text_dull()),
        Span::styled("q", Theme::key_hint()),
        Span::styled(" Quit", Theme::text_dull()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Photos", 10), "Photos");
        assert_eq!(truncate("A very long library name", 10), "A very ...");
        assert_eq!(truncate("写真ライブラリ", 8), "写真...");
    }
}
