use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(library) = state.current_library() else {
        // Route resolution failed; the crash page takes over on the next event.
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", library.name))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::app_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", label), Theme::text_dull()),
            Span::styled(value, Theme::text()),
        ])
    };

    let lines = vec![
        Line::default(),
        field("Name", library.name.clone()),
        field("Id", library.id.to_string()),
        field(
            "Created",
            library.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
        field(
            "Description",
            library.description.clone().unwrap_or_else(|| "—".to_string()),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    if inner.height == 0 {
        return;
    }
    let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" Esc", Theme::key_hint()),
        Span::styled(" Back  ", Theme::text_dull()),
        Span::styled("d", Theme::key_hint()),
        Span::styled(" Delete  ", Theme::text_dull()),
        Span::styled("r", Theme::key_hint()),
        Span::styled(" Refresh  ", Theme::text_dull()),
        Span::styled("q", Theme::key_hint()),
        Span::styled(" Quit", Theme::text_dull()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}
