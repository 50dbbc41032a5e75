//! Render slots: how list rows, the single value and multi-value chips are
//! drawn.
//!
//! Each slot is a trait with a blanket impl for closures, so a renderer can be
//! a plain `fn` or a struct carrying its own state:
//!
//! ```rust,ignore
//! let select = Select::new(options).with_option_renderer(
//!     |props: OptionProps<'_, u32, String>| Line::from(format!("#{} {}", props.item.value, props.item.option)),
//! );
//! ```

use super::option::{is_selected, OptionText, SelectOption, Selection};
use super::SelectStyle;
use ratatui::text::{Line, Span};

/// What a list row renderer gets to see.
pub struct OptionProps<'a, V, L> {
    /// The option for this row.
    pub item: &'a SelectOption<V, L>,
    /// The select's current value.
    pub selected: &'a Selection<V>,
    /// Label text function.
    pub text: &'a OptionText<V, L>,
    /// Whether the keyboard highlight is on this row.
    pub highlighted: bool,
    /// The select's style.
    pub style: &'a SelectStyle,
}

impl<V: PartialEq + Clone, L> OptionProps<'_, V, L> {
    /// Whether this row's option is in the current value.
    pub fn is_selected(&self) -> bool {
        is_selected(self.item, self.selected)
    }
}

/// Draws one list row.
pub trait OptionRender<V, L>: Send + Sync {
    /// The row content.
    fn render(&self, props: OptionProps<'_, V, L>) -> Line<'static>;
}

impl<V, L, F> OptionRender<V, L> for F
where
    F: for<'a> Fn(OptionProps<'a, V, L>) -> Line<'static> + Send + Sync,
{
    fn render(&self, props: OptionProps<'_, V, L>) -> Line<'static> {
        self(props)
    }
}

/// What a single-value renderer gets to see.
pub struct SingleValueProps<'a, V, L> {
    /// The selected option's label.
    pub option: &'a L,
    /// The selected value.
    pub value: &'a V,
}

/// Draws the selected option of a single select while no search is typed.
pub trait SingleValueRender<V, L>: Send + Sync {
    /// The control content.
    fn render(&self, props: SingleValueProps<'_, V, L>) -> Line<'static>;
}

impl<V, L, F> SingleValueRender<V, L> for F
where
    F: for<'a> Fn(SingleValueProps<'a, V, L>) -> Line<'static> + Send + Sync,
{
    fn render(&self, props: SingleValueProps<'_, V, L>) -> Line<'static> {
        self(props)
    }
}

/// What a chip renderer gets to see.
pub struct MultiValueProps<'a, V, L> {
    /// The selected option this chip stands for.
    pub item: &'a SelectOption<V, L>,
    /// The select's current value.
    pub selected: &'a Selection<V>,
    /// Label text function.
    pub text: &'a OptionText<V, L>,
    /// The select's style.
    pub style: &'a SelectStyle,
}

/// One selected value in a multi select.
///
/// Clicking the `remove` span removes the value; the select records where it
/// lands on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    /// The chip body.
    pub label: Vec<Span<'static>>,
    /// The removal affordance.
    pub remove: Span<'static>,
}

/// Draws the chip of one selected value in a multi select.
pub trait MultiValueRender<V, L>: Send + Sync {
    /// The chip.
    fn render(&self, props: MultiValueProps<'_, V, L>) -> Chip;
}

impl<V, L, F> MultiValueRender<V, L> for F
where
    F: for<'a> Fn(MultiValueProps<'a, V, L>) -> Chip + Send + Sync,
{
    fn render(&self, props: MultiValueProps<'_, V, L>) -> Chip {
        self(props)
    }
}

/// The stock row: selection marker then text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOption;

impl<V: PartialEq + Clone, L> OptionRender<V, L> for DefaultOption {
    fn render(&self, props: OptionProps<'_, V, L>) -> Line<'static> {
        let style = props.style;
        let text = props.text.text(props.item);
        if props.is_selected() {
            Line::from(vec![
                Span::styled(style.selected_marker.clone(), style.row_selected),
                Span::styled(text, style.row_selected),
            ])
        } else {
            let pad = " ".repeat(unicode_width::UnicodeWidthStr::width(
                style.selected_marker.as_str(),
            ));
            Line::from(vec![Span::raw(pad), Span::styled(text, style.row)])
        }
    }
}

/// The stock chip: padded text then the remove glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMultiValue;

impl<V, L> MultiValueRender<V, L> for DefaultMultiValue {
    fn render(&self, props: MultiValueProps<'_, V, L>) -> Chip {
        Chip {
            label: vec![Span::styled(
                format!(" {} ", props.text.text(props.item)),
                props.style.chip,
            )],
            remove: Span::styled(props.style.remove_symbol.clone(), props.style.chip_remove),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn default_option_marks_selected_rows() {
        let style = SelectStyle::default();
        let text = OptionText::display();
        let item = SelectOption::new(1u8, "Red".to_string());
        let selected = Selection::Single(Some(1u8));
        let row = DefaultOption.render(OptionProps {
            item: &item,
            selected: &selected,
            text: &text,
            highlighted: false,
            style: &style,
        });
        assert_eq!(line_text(&row), format!("{}Red", style.selected_marker));

        let other = Selection::Single(Some(2u8));
        let row = DefaultOption.render(OptionProps {
            item: &item,
            selected: &other,
            text: &text,
            highlighted: true,
            style: &style,
        });
        assert_eq!(line_text(&row), "  Red");
    }

    #[test]
    fn default_chip_uses_text() {
        let style = SelectStyle::default();
        let text = OptionText::from_label(|l: &&str| l.to_uppercase());
        let item = SelectOption::new(1u8, "rust");
        let chip = DefaultMultiValue.render(MultiValueProps {
            item: &item,
            selected: &Selection::Multi(vec![1]),
            text: &text,
            style: &style,
        });
        assert_eq!(chip.label[0].content, " RUST ");
        assert_eq!(chip.remove.content, style.remove_symbol);
    }

    #[test]
    fn closures_are_renderers() {
        let style = SelectStyle::default();
        let text = OptionText::display();
        let item = SelectOption::new(3u8, "Blue".to_string());
        let renderer = |props: OptionProps<'_, u8, String>| {
            Line::from(format!("#{} {}", props.item.value, props.item.option))
        };
        let row = OptionRender::render(
            &renderer,
            OptionProps {
                item: &item,
                selected: &Selection::default(),
                text: &text,
                highlighted: false,
                style: &style,
            },
        );
        assert_eq!(line_text(&row), "#3 Blue");
    }
}
