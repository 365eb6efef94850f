use crate::app::confirm::{ConfirmButton, ConfirmDialog};
use crate::ui::button;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, dialog: &ConfirmDialog) {
    if !dialog.open {
        return;
    }

    let popup_area = centered(frame.area(), 64, 9);
    frame.render_widget(Clear, popup_area);

    let accent = if dialog.danger { Theme::DANGER } else { Theme::ACCENT };
    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(accent))
        .style(Theme::surface());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height < 3 {
        return;
    }

    let description_area = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height - 2);
    let description = Paragraph::new(dialog.description.as_str())
        .style(Theme::text())
        .wrap(Wrap { trim: true });
    frame.render_widget(description, description_area);

    let cta_label = if dialog.loading {
        format!("{} ...", dialog.cta_label)
    } else {
        dialog.cta_label.clone()
    };
    let cancel_style = if dialog.loading {
        Theme::text_faint()
    } else {
        Theme::button(dialog.selected == ConfirmButton::Cancel, false, false)
    };
    let buttons = Line::from(vec![
        button("Cancel", cancel_style),
        Span::raw("  "),
        button(
            &cta_label,
            Theme::button(dialog.selected == ConfirmButton::Confirm || dialog.loading, dialog.danger, true),
        ),
        Span::raw(" "),
    ])
    .alignment(Alignment::Right);
    let buttons_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    frame.render_widget(Paragraph::new(buttons), buttons_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(dialog: &ConfirmDialog) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, dialog)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_open_dialog_shows_title_and_actions() {
        let mut dialog = ConfirmDialog::new("Delete Library", "Gone for good.", "Delete").danger();
        dialog.open();
        let text = rendered(&dialog);
        assert!(text.contains("Delete Library"));
        assert!(text.contains("Gone for good."));
        assert!(text.contains("Cancel"));
    }

    #[test]
    fn test_loading_indicator() {
        let mut dialog = ConfirmDialog::new("Delete Library", "Gone for good.", "Delete");
        dialog.open();
        dialog.loading = true;
        assert!(rendered(&dialog).contains("Delete ..."));
    }

    #[test]
    fn test_closed_dialog_renders_nothing() {
        let dialog = ConfirmDialog::new("Delete Library", "Gone for good.", "Delete");
        assert!(!rendered(&dialog).contains("Delete Library"));
    }
}
