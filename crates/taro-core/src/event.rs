use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

/// Terminal events produced by the runtime's event loop.
///
/// Every event read from the terminal is dispatched to the registered
/// document listeners (see [`listen`](crate::subscription::listen)). Each
/// variant wraps the corresponding [`crossterm::event::Event`] payload, so you
/// can pattern-match on key codes, modifiers and mouse buttons using the full
/// crossterm API.
///
/// # Example
///
/// ```rust,ignore
/// use taro_core::{terminal_events, TerminalEvent, Subscription};
///
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|ev| match ev {
///         TerminalEvent::Key(k) => Some(Msg::Key(*k)),
///         _ => None,
///     })]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The key event, if this is a key press or repeat.
    ///
    /// Release events (reported by terminals with the kitty protocol) are
    /// filtered out so handlers fire once per keystroke.
    pub fn key_press(&self) -> Option<&KeyEvent> {
        match self {
            TerminalEvent::Key(key) if key.kind != KeyEventKind::Release => Some(key),
            _ => None,
        }
    }

    /// Whether this is a press of `code`.
    pub fn is_key(&self, code: KeyCode) -> bool {
        self.key_press().is_some_and(|key| key.code == code)
    }

    /// The mouse event, if this is a left-button press.
    pub fn pointer_down(&self) -> Option<&MouseEvent> {
        match self {
            TerminalEvent::Mouse(mouse) if is_left_down(mouse) => Some(mouse),
            _ => None,
        }
    }
}

/// Whether `mouse` is a left-button press.
pub fn is_left_down(mouse: &MouseEvent) -> bool {
    matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
}

/// Whether the mouse event's cell lies inside `area`.
pub fn hits(mouse: &MouseEvent, area: Rect) -> bool {
    area.contains(Position::new(mouse.column, mouse.row))
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn key_release_is_not_a_press() {
        let release = TerminalEvent::Key(KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(release.key_press().is_none());
        assert!(!release.is_key(KeyCode::Esc));

        let press = TerminalEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(press.is_key(KeyCode::Esc));
    }

    #[test]
    fn pointer_down_only_matches_left_press() {
        let down = TerminalEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        let up = TerminalEvent::Mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1));
        let right = TerminalEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1));
        assert!(down.pointer_down().is_some());
        assert!(up.pointer_down().is_none());
        assert!(right.pointer_down().is_none());
    }

    #[test]
    fn hits_uses_half_open_bounds() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(hits(&mouse(MouseEventKind::Moved, 2, 3), area));
        assert!(hits(&mouse(MouseEventKind::Moved, 5, 4), area));
        assert!(!hits(&mouse(MouseEventKind::Moved, 6, 4), area));
        assert!(!hits(&mouse(MouseEventKind::Moved, 1, 3), area));
    }
}
