use crate::key::{Binding, KeyCombination};
use crossterm::event::KeyCode;

/// Keys understood by a focused [`Select`](super::Select).
///
/// Printable characters that match none of these edit the search text.
#[derive(Debug, Clone)]
pub struct SelectKeyMap {
    /// Move the highlight up.
    pub up: Binding,
    /// Move the highlight down, opening the list when closed.
    pub down: Binding,
    /// Highlight the first row.
    pub home: Binding,
    /// Highlight the last row.
    pub end: Binding,
    /// Choose the highlighted row, or open the list.
    pub activate: Binding,
    /// Close the list. Also heard anywhere on screen while open.
    pub close: Binding,
    /// Close the list so the parent can move focus.
    pub leave: Binding,
    /// Open or close the list.
    pub toggle: Binding,
    /// Clear the value and the search, when the clear button is shown.
    pub clear: Binding,
}

impl Default for SelectKeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new(KeyCombination::new(KeyCode::Up), "up"),
            down: Binding::new(KeyCombination::new(KeyCode::Down), "down"),
            home: Binding::new(KeyCombination::new(KeyCode::Home), "first"),
            end: Binding::new(KeyCombination::new(KeyCode::End), "last"),
            activate: Binding::new(KeyCombination::new(KeyCode::Enter), "choose"),
            close: Binding::new(KeyCombination::new(KeyCode::Esc), "close"),
            leave: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Tab),
                    KeyCombination::new(KeyCode::BackTab),
                ],
                "next field",
            ),
            toggle: Binding::with_keys(
                vec![
                    KeyCombination::alt(KeyCode::Down),
                    KeyCombination::new(KeyCode::F(4)),
                ],
                "toggle list",
            ),
            clear: Binding::new(KeyCombination::ctrl(KeyCode::Char('u')), "clear"),
        }
    }
}

impl SelectKeyMap {
    /// The bindings worth showing in a one-line help footer.
    pub fn short_help(&self) -> Vec<&Binding> {
        vec![&self.down, &self.activate, &self.close, &self.clear]
    }
}
