use ratatui::style::{Color, Modifier, Style};

/// Behavior flags of a [`Select`](super::Select).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// Multiple values, shown as chips.
    pub multi: bool,
    /// Close the list after a row is chosen.
    pub close_on_select: bool,
    /// Offer a clear button while there is something to clear.
    pub show_clear: bool,
    /// Text above the control.
    pub label: Option<String>,
    /// Text shown while nothing is selected or typed.
    pub placeholder: Option<String>,
    /// Rows shown before the list scrolls.
    pub max_visible: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            multi: false,
            close_on_select: true,
            show_clear: false,
            label: None,
            placeholder: None,
            max_visible: 8,
        }
    }
}

/// Visual style of a [`Select`](super::Select).
#[derive(Debug, Clone)]
pub struct SelectStyle {
    /// The label above the control.
    pub label: Style,
    /// Control border while unfocused.
    pub border: Style,
    /// Control border while focused.
    pub border_focused: Style,
    /// The collapsed value and the search text.
    pub text: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// The text cursor.
    pub cursor: Style,
    /// Chip body.
    pub chip: Style,
    /// Chip remove glyph.
    pub chip_remove: Style,
    /// Clear and toggle buttons.
    pub button: Style,
    /// List border.
    pub list_border: Style,
    /// A list row.
    pub row: Style,
    /// A row whose option is selected.
    pub row_selected: Style,
    /// Patched over the highlighted row.
    pub highlight: Style,
    /// Shown when no option matches.
    pub empty: Style,
    /// Prefix of selected rows.
    pub selected_marker: String,
    /// Chip remove glyph.
    pub remove_symbol: String,
    /// Clear button glyph.
    pub clear_symbol: String,
    /// Toggle glyph while closed.
    pub closed_symbol: String,
    /// Toggle glyph while open.
    pub open_symbol: String,
    /// Text shown when no option matches.
    pub empty_text: String,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            label: Style::default().add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            chip: Style::default().fg(Color::Black).bg(Color::Cyan),
            chip_remove: Style::default().fg(Color::Red),
            button: Style::default().fg(Color::DarkGray),
            list_border: Style::default().fg(Color::DarkGray),
            row: Style::default(),
            row_selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default().bg(Color::DarkGray),
            empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            selected_marker: "▌ ".to_string(),
            remove_symbol: "×".to_string(),
            clear_symbol: "×".to_string(),
            closed_symbol: "▾".to_string(),
            open_symbol: "▴".to_string(),
            empty_text: "No options".to_string(),
        }
    }
}
