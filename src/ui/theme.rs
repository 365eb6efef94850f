use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(22, 22, 30);
    pub const BG_SURFACE: Color = Color::Rgb(32, 32, 44);
    pub const BORDER_DIM: Color = Color::Rgb(70, 70, 90);
    pub const TEXT_PRIMARY: Color = Color::Rgb(224, 224, 236);
    pub const TEXT_SECONDARY: Color = Color::Rgb(160, 160, 180);
    pub const TEXT_MUTED: Color = Color::Rgb(110, 110, 130);
    pub const ACCENT: Color = Color::Rgb(45, 140, 255);
    pub const ACCENT_AMBER: Color = Color::Rgb(240, 180, 80);
    pub const DANGER: Color = Color::Rgb(239, 68, 68);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn title() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn text_dull() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn text_faint() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT_AMBER).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn surface() -> Style {
        Style::default().bg(Self::BG_SURFACE)
    }

    pub fn app_bg() -> Style {
        Style::default().bg(Self::BG_DARK)
    }

    /// Button look: accent for the primary action, gray otherwise, red for
    /// destructive actions.
    pub fn button(focused: bool, danger: bool, primary: bool) -> Style {
        let bg = match (danger, primary) {
            (true, _) => Self::DANGER,
            (false, true) => Self::ACCENT,
            (false, false) => Self::BORDER_DIM,
        };
        let style = Style::default().fg(Self::TEXT_PRIMARY).bg(bg);
        if focused {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BORDER_DIM)
    }

    pub fn status_error() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::DANGER)
    }

    pub fn danger_text() -> Style {
        Style::default().fg(Self::DANGER).add_modifier(Modifier::BOLD)
    }
}
