//! Generic confirmation dialog.
//!
//! Holds the open/closed state, the focused button and the loading flag of a
//! modal that asks the user to confirm a single bound action. The action itself
//! belongs to the owner; the dialog only reports what the user chose.

use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmButton {
    Cancel,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Nothing to do (navigation key, or input ignored while loading).
    None,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub title: String,
    pub description: String,
    pub cta_label: String,
    pub danger: bool,
    pub open: bool,
    pub loading: bool,
    pub selected: ConfirmButton,
}

impl ConfirmDialog {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        cta_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            cta_label: cta_label.into(),
            danger: false,
            open: false,
            loading: false,
            selected: ConfirmButton::Cancel,
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    /// Open with focus on Cancel.
    pub fn open(&mut self) {
        self.open = true;
        self.loading = false;
        self.selected = ConfirmButton::Cancel;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.loading = false;
    }

    fn toggle_selected(&mut self) {
        self.selected = match self.selected {
            ConfirmButton::Cancel => ConfirmButton::Confirm,
            ConfirmButton::Confirm => ConfirmButton::Cancel,
        };
    }

    /// Interpret a key press. While loading every key is swallowed so the
    /// bound action cannot be re-entered or abandoned mid-flight.
    pub fn handle_key(&mut self, key: KeyEvent) -> ConfirmOutcome {
        if !self.open || self.loading {
            return ConfirmOutcome::None;
        }
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selected();
                ConfirmOutcome::None
            }
            KeyCode::Enter => match self.selected {
                ConfirmButton::Confirm => ConfirmOutcome::Confirmed,
                ConfirmButton::Cancel => ConfirmOutcome::Cancelled,
            },
            KeyCode::Char('y') | KeyCode::Char('Y') => ConfirmOutcome::Confirmed,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ConfirmOutcome::Cancelled,
            _ => ConfirmOutcome::None,
        }
    }
}
