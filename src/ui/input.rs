use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action to take after processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// Enter was pressed; add the contained text.
    Submit(String),
}

/// Single-line buffer for the text of the next item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    text: String,
}

impl DraftInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Feed one key event.
    ///
    /// Enter submits no matter which modifiers are held. The buffer is not
    /// cleared here; that happens once the add is accepted.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        if key.kind != KeyEventKind::Press {
            return InputAction::None;
        }

        match key.code {
            KeyCode::Enter => InputAction::Submit(self.text.clone()),
            KeyCode::Backspace => {
                self.text.pop();
                InputAction::None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.text.push(c);
                InputAction::None
            }
            _ => InputAction::None,
        }
    }

    /// Insert pasted text. Line breaks are flattened to spaces.
    pub fn handle_paste(&mut self, text: &str) {
        self.text
            .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
    }
}
