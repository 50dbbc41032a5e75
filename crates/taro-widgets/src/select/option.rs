use std::fmt;
use std::sync::Arc;

/// One choosable entry: the value it stands for and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectOption<V, L = String> {
    /// What selecting this entry selects.
    pub value: V,
    /// Display payload; turned into text by an [`OptionText`].
    pub option: L,
}

impl<V, L> SelectOption<V, L> {
    /// A new option.
    pub fn new(value: V, option: L) -> Self {
        Self { value, option }
    }
}

/// The current value of a select.
///
/// Single mode holds `Single`; multi mode holds `Multi` in the order values
/// were added. Serialized untagged, so a multi value is a JSON array and a
/// single value is the bare value or `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Selection<V> {
    /// Zero or more values.
    Multi(Vec<V>),
    /// Zero or one value.
    Single(Option<V>),
}

impl<V> Default for Selection<V> {
    fn default() -> Self {
        Selection::Single(None)
    }
}

impl<V: PartialEq + Clone> Selection<V> {
    /// The empty value for the given mode.
    pub fn empty(multi: bool) -> Self {
        if multi {
            Selection::Multi(Vec::new())
        } else {
            Selection::Single(None)
        }
    }

    /// No value (single) or no values (multi).
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Multi(values) => values.is_empty(),
            Selection::Single(value) => value.is_none(),
        }
    }

    /// Whether this is the multi shape.
    pub fn is_multi(&self) -> bool {
        matches!(self, Selection::Multi(_))
    }

    /// The selected values as a slice.
    pub fn as_slice(&self) -> &[V] {
        match self {
            Selection::Multi(values) => values,
            Selection::Single(Some(value)) => std::slice::from_ref(value),
            Selection::Single(None) => &[],
        }
    }

    /// Whether `value` is selected.
    pub fn contains(&self, value: &V) -> bool {
        self.as_slice().contains(value)
    }

    /// The value after choosing `value` in the given mode.
    ///
    /// Multi mode appends unless already present; single mode replaces.
    pub fn with_added(&self, value: V, multi: bool) -> Self {
        if !multi {
            return Selection::Single(Some(value));
        }
        let mut values = self.as_slice().to_vec();
        if !values.contains(&value) {
            values.push(value);
        }
        Selection::Multi(values)
    }

    /// The value after removing `value` in the given mode.
    pub fn without(&self, value: &V, multi: bool) -> Self {
        if multi {
            return Selection::Multi(
                self.as_slice()
                    .iter()
                    .filter(|v| *v != value)
                    .cloned()
                    .collect(),
            );
        }
        match self.as_slice().first() {
            Some(current) if current != value => Selection::Single(Some(current.clone())),
            _ => Selection::Single(None),
        }
    }
}

impl<V> From<Option<V>> for Selection<V> {
    fn from(value: Option<V>) -> Self {
        Selection::Single(value)
    }
}

impl<V> From<Vec<V>> for Selection<V> {
    fn from(values: Vec<V>) -> Self {
        Selection::Multi(values)
    }
}

/// Whether `item` is part of `selection`. An empty selection selects nothing.
pub fn is_selected<V: PartialEq + Clone, L>(
    item: &SelectOption<V, L>,
    selection: &Selection<V>,
) -> bool {
    !selection.is_empty() && selection.contains(&item.value)
}

/// Renders the label of an option as plain text, for filtering and for the
/// default renderers.
///
/// The function receives `None` when asked about a missing option and should
/// return an empty string.
pub struct OptionText<V, L>(Arc<dyn Fn(Option<&SelectOption<V, L>>) -> String + Send + Sync>);

impl<V: 'static, L: 'static> OptionText<V, L> {
    /// Wrap a text function.
    pub fn new(f: impl Fn(Option<&SelectOption<V, L>>) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Build from a function over the label only.
    pub fn from_label(f: impl Fn(&L) -> String + Send + Sync + 'static) -> Self {
        Self::new(move |entry: Option<&SelectOption<V, L>>| {
            entry.map(|e| f(&e.option)).unwrap_or_default()
        })
    }
}

impl<V, L> OptionText<V, L> {
    /// Text of `item`.
    pub fn text(&self, item: &SelectOption<V, L>) -> String {
        (self.0)(Some(item))
    }

    /// Text of an option that may be missing.
    pub fn text_or_empty(&self, item: Option<&SelectOption<V, L>>) -> String {
        (self.0)(item)
    }
}

impl<V: 'static, L: fmt::Display + 'static> OptionText<V, L> {
    /// The label's `Display` form.
    pub fn display() -> Self {
        Self::new(default_option_text)
    }
}

impl<V, L> Clone for OptionText<V, L> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V, L> fmt::Debug for OptionText<V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OptionText(..)")
    }
}

/// The label's `Display` form, or `""` for a missing option.
pub fn default_option_text<V, L: fmt::Display>(entry: Option<&SelectOption<V, L>>) -> String {
    entry.map(|e| e.option.to_string()).unwrap_or_default()
}

/// Whether `item` matches `query`: case-insensitive substring of its text.
/// The empty query matches everything.
pub fn matches_query<V, L>(item: &SelectOption<V, L>, text: &OptionText<V, L>, query: &str) -> bool {
    query.is_empty() || text.text(item).to_lowercase().contains(&query.to_lowercase())
}

/// The options matching `query`, in their original order.
pub fn filter_options<'a, V, L>(
    options: &'a [SelectOption<V, L>],
    text: &OptionText<V, L>,
    query: &str,
) -> Vec<&'a SelectOption<V, L>> {
    options
        .iter()
        .filter(|item| matches_query(item, text, query))
        .collect()
}

/// Indices into `options` of the entries matching `query`.
pub(crate) fn filter_indices<V, L>(
    options: &[SelectOption<V, L>],
    text: &OptionText<V, L>,
    query: &str,
) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_query(item, text, query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<SelectOption<u8>> {
        vec![
            SelectOption::new(1, "Red".to_string()),
            SelectOption::new(2, "Green".to_string()),
            SelectOption::new(3, "Blue".to_string()),
        ]
    }

    fn labels<'a>(options: &[&'a SelectOption<u8>]) -> Vec<&'a str> {
        options.iter().map(|o| o.option.as_str()).collect()
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let options = colors();
        let text = OptionText::display();
        assert_eq!(labels(&filter_options(&options, &text, "re")), vec!["Red", "Green"]);
        assert_eq!(labels(&filter_options(&options, &text, "BL")), vec!["Blue"]);
        assert!(filter_options(&options, &text, "x").is_empty());
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let options = colors();
        let text = OptionText::display();
        assert_eq!(
            labels(&filter_options(&options, &text, "")),
            vec!["Red", "Green", "Blue"]
        );
        assert_eq!(filter_indices(&options, &text, ""), vec![0, 1, 2]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let options = colors();
        let text = OptionText::display();
        for query in ["", "re", "RE", "gReEn", "e", "x"] {
            let once: Vec<SelectOption<u8>> = filter_options(&options, &text, query)
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<SelectOption<u8>> = filter_options(&once, &text, query)
                .into_iter()
                .cloned()
                .collect();
            assert_eq!(twice, once, "query {query:?}");
        }
    }

    #[test]
    fn filter_uses_custom_text() {
        struct Country {
            name: &'static str,
            code: &'static str,
        }
        let options = vec![
            SelectOption::new("fr", Country { name: "France", code: "FR" }),
            SelectOption::new("de", Country { name: "Germany", code: "DE" }),
        ];
        let text = OptionText::from_label(|c: &Country| format!("{} ({})", c.name, c.code));
        let found = filter_options(&options, &text, "(de)");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "de");
    }

    #[test]
    fn default_text_of_missing_option_is_empty() {
        assert_eq!(default_option_text::<u8, String>(None), "");
        let item = SelectOption::new(7u8, 42u32);
        assert_eq!(default_option_text(Some(&item)), "42");
        let text = OptionText::<u8, String>::display();
        assert_eq!(text.text_or_empty(None), "");
    }

    #[test]
    fn membership() {
        let options = colors();
        assert!(is_selected(&options[0], &Selection::Single(Some(1))));
        assert!(!is_selected(&options[1], &Selection::Single(Some(1))));
        assert!(is_selected(&options[1], &Selection::Multi(vec![3, 2])));
        assert!(!is_selected(&options[0], &Selection::Multi(vec![])));
        assert!(!is_selected(&options[0], &Selection::Single(None)));
    }

    #[test]
    fn emptiness() {
        assert!(Selection::<u8>::empty(true).is_empty());
        assert!(Selection::<u8>::empty(false).is_empty());
        assert!(Selection::<u8>::empty(true).is_multi());
        assert!(!Selection::Single(Some(0u8)).is_empty());
        assert!(!Selection::Multi(vec![0u8]).is_empty());
    }

    #[test]
    fn adding_is_idempotent_in_multi_mode() {
        let value = Selection::Multi(vec![1u8]);
        assert_eq!(value.with_added(2, true), Selection::Multi(vec![1, 2]));
        assert_eq!(value.with_added(1, true), Selection::Multi(vec![1]));
        assert_eq!(value.with_added(2, false), Selection::Single(Some(2)));
    }

    #[test]
    fn removing() {
        let value = Selection::Multi(vec![1u8, 2, 3]);
        assert_eq!(value.without(&2, true), Selection::Multi(vec![1, 3]));
        assert_eq!(
            Selection::Single(Some(1u8)).without(&1, false),
            Selection::Single(None)
        );
        assert_eq!(
            Selection::Single(Some(1u8)).without(&2, false),
            Selection::Single(Some(1))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn selection_serializes_untagged() {
        let multi: Selection<u8> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(multi, Selection::Multi(vec![1, 2]));
        let single: Selection<u8> = serde_json::from_str("3").unwrap();
        assert_eq!(single, Selection::Single(Some(3)));
        let none: Selection<u8> = serde_json::from_str("null").unwrap();
        assert_eq!(none, Selection::Single(None));
        assert_eq!(serde_json::to_string(&Selection::Single(Some(3u8))).unwrap(), "3");
    }
}
