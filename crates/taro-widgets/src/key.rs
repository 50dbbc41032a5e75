//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;

/// One or more key combinations bound to a described action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Human-readable action name, shown in help lines.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

/// A key code plus the exact modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key.
    pub code: KeyCode,
    /// Modifiers, compared exactly. Shift is ignored for character keys and
    /// back-tab, whose codes already carry it.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// A binding for a single combination.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// A binding for several combinations.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` is a press or repeat of one of the combinations.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && event.kind != KeyEventKind::Release
            && self.keys.iter().any(|k| k.matches(event))
    }

    /// Enable or disable the binding.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The first combination rendered as text, for help lines.
    pub fn key_label(&self) -> String {
        self.keys.first().map(ToString::to_string).unwrap_or_default()
    }
}

impl KeyCombination {
    /// No modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    /// Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::CONTROL)
    }

    /// Alt held.
    pub fn alt(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::ALT)
    }

    /// An explicit modifier set.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether `event` is this combination.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        let mut held = event.modifiers;
        if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
            held.remove(KeyModifiers::SHIFT);
        }
        held == self.modifiers
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => f.write_str("↑"),
            KeyCode::Down => f.write_str("↓"),
            KeyCode::BackTab => f.write_str("Shift+Tab"),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn modifiers_compare_exactly() {
        let down = Binding::new(KeyCombination::new(KeyCode::Down), "down");
        assert!(down.matches(&key(KeyCode::Down, KeyModifiers::NONE)));
        assert!(!down.matches(&key(KeyCode::Down, KeyModifiers::ALT)));

        let toggle = Binding::new(KeyCombination::alt(KeyCode::Down), "toggle");
        assert!(toggle.matches(&key(KeyCode::Down, KeyModifiers::ALT)));
        assert!(!toggle.matches(&key(KeyCode::Down, KeyModifiers::NONE)));
    }

    #[test]
    fn shift_is_ignored_for_characters() {
        let binding = Binding::new(KeyCombination::new(KeyCode::Char('A')), "a");
        assert!(binding.matches(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)));
        let back = Binding::new(KeyCombination::new(KeyCode::BackTab), "back");
        assert!(back.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn release_and_disabled_never_match() {
        let enter = Binding::new(KeyCombination::new(KeyCode::Enter), "choose");
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!enter.matches(&release));
        assert!(!enter
            .enabled(false)
            .matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn labels() {
        assert_eq!(KeyCombination::ctrl(KeyCode::Char('u')).to_string(), "Ctrl+u");
        assert_eq!(KeyCombination::alt(KeyCode::Down).to_string(), "Alt+↓");
        assert_eq!(KeyCombination::new(KeyCode::Esc).to_string(), "Esc");
        let binding = Binding::with_keys(
            vec![KeyCombination::new(KeyCode::Tab), KeyCombination::new(KeyCode::BackTab)],
            "leave",
        );
        assert_eq!(binding.key_label(), "Tab");
    }
}
