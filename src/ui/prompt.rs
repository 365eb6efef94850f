use crate::app::state::InputState;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, input: &InputState) {
    let popup_area = centered(frame.area(), 56, 5);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" New Library ")
        .title_style(Theme::title())
        .title_bottom(Line::from(" Enter create · Esc cancel ").style(Theme::text_faint()))
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT))
        .padding(Padding::horizontal(1))
        .style(Theme::surface());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    // Prompt chevron + input text
    let line = Line::from(vec![
        Span::styled("❯ ", Style::default().fg(Theme::ACCENT)),
        Span::styled(input.text.as_str(), Theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    // Cursor offset: chevron "❯ " (2 columns) + display width before cursor
    let before = UnicodeWidthStr::width(&input.text[..input.cursor]) as u16;
    let cursor_x = inner.x + 2 + before;
    frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
}
