//! Searchable dropdown select for one or many values.
//!
//! [`Select`] is a controlled component: it never changes its own value.
//! Choosing, removing or clearing emits [`Message::Changed`] with the value
//! the select *should* have, and the parent stores it and hands it back with
//! [`Select::set_value`].
//!
//! ```rust,ignore
//! fn update(&mut self, msg: Msg) -> Command<Msg> {
//!     match msg {
//!         Msg::Country(select::Message::Changed(change)) => {
//!             self.country.set_value(change.value);
//!             Command::none()
//!         }
//!         Msg::Country(m) => self.country.update(m).map(Msg::Country),
//!     }
//! }
//! ```
//!
//! The control draws inside the area it is given; the open list is a
//! [`Popover`] anchored below it and may draw over neighbouring widgets, so
//! render an open select after its siblings. While open, the select declares
//! a document listener (see [`Component::subscriptions`]) that closes it on
//! Escape or on a click outside the control and the list. Clicks inside are
//! handled from [`Message::Mouse`], which the parent forwards.

mod config;
mod highlight;
mod keymap;
mod option;
pub mod render;

pub use config::{SelectConfig, SelectStyle};
pub use keymap::SelectKeyMap;
pub use option::{
    default_option_text, filter_options, is_selected, matches_query, OptionText, SelectOption,
    Selection,
};
pub use render::{
    Chip, DefaultMultiValue, DefaultOption, MultiValueProps, MultiValueRender, OptionProps,
    OptionRender, SingleValueProps, SingleValueRender,
};

use crate::popover::{Offset, Popover};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use highlight::Highlight;
use option::filter_indices;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taro_core::event::hits;
use taro_core::{listen, Command, Component, Subscription, SubscriptionId, TerminalEvent};
use unicode_width::UnicodeWidthStr;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of one select instance; keys its document listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectId(usize);

impl SelectId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw number.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SelectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select-{}", self.0)
    }
}

struct DismissListener;

/// The input that caused a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A key press routed to the select.
    Key(KeyEvent),
    /// A mouse click routed to the select.
    Mouse(MouseEvent),
    /// A [`Message`] sent by the parent.
    Programmatic,
}

/// A requested value change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent<V, L = String> {
    /// What caused it.
    pub trigger: Trigger,
    /// The new value for the parent to store.
    pub value: Selection<V>,
    /// The option chosen or removed; `None` for a clear.
    pub option: Option<SelectOption<V, L>>,
}

/// Messages for [`Select`].
#[derive(Debug, Clone)]
pub enum Message<V, L = String> {
    /// A key press, handled only while focused.
    KeyPress(KeyEvent),
    /// A mouse event; clicks on the control or the list act on them.
    Mouse(MouseEvent),
    /// Take focus, opening the list.
    Focus,
    /// Drop focus, closing the list.
    Blur,
    /// Open the list.
    Open,
    /// Close the list.
    Close,
    /// Open or close the list.
    Toggle,
    /// Emit the empty value.
    Clear,
    /// Choose the option holding this value, as if its row were clicked.
    Choose(V),
    /// Emit the value without this entry.
    Remove(V),
    /// Escape heard by the document listener.
    DocumentEscape,
    /// A mouse press heard by the document listener.
    DocumentClick(MouseEvent),
    /// Emitted by the select; forward `value` back through
    /// [`Select::set_value`].
    Changed(ChangeEvent<V, L>),
}

struct Renderers<V, L> {
    option: Arc<dyn OptionRender<V, L>>,
    single_value: Option<Arc<dyn SingleValueRender<V, L>>>,
    multi_value: Arc<dyn MultiValueRender<V, L>>,
}

/// Screen regions recorded by the last `view`, for mouse hit testing.
#[derive(Debug, Default, Clone)]
struct HitMap {
    root: Rect,
    clear: Option<Rect>,
    toggle: Option<Rect>,
    chips: Vec<(Rect, usize)>,
    list: Option<Rect>,
    rows: Vec<(Rect, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Row(usize),
    List,
    Clear,
    Toggle,
    Remove(usize),
    Control,
    Outside,
}

impl HitMap {
    fn hit(&self, mouse: &MouseEvent) -> Hit {
        if self.list.is_some_and(|list| hits(mouse, list)) {
            return self
                .rows
                .iter()
                .find(|(rect, _)| hits(mouse, *rect))
                .map_or(Hit::List, |&(_, index)| Hit::Row(index));
        }
        if self.clear.is_some_and(|rect| hits(mouse, rect)) {
            return Hit::Clear;
        }
        if self.toggle.is_some_and(|rect| hits(mouse, rect)) {
            return Hit::Toggle;
        }
        if let Some(&(_, index)) = self.chips.iter().find(|(rect, _)| hits(mouse, *rect)) {
            return Hit::Remove(index);
        }
        if hits(mouse, self.root) {
            return Hit::Control;
        }
        Hit::Outside
    }

    /// Inside the control or the open list.
    fn contains(&self, mouse: &MouseEvent) -> bool {
        hits(mouse, self.root) || self.list.is_some_and(|list| hits(mouse, list))
    }
}

/// A searchable dropdown over `SelectOption<V, L>`s.
pub struct Select<V, L = String> {
    id: SelectId,
    options: Vec<SelectOption<V, L>>,
    value: Selection<V>,
    config: SelectConfig,
    text: OptionText<V, L>,
    renderers: Renderers<V, L>,
    style: SelectStyle,
    keymap: SelectKeyMap,
    search_input: String,
    is_open: bool,
    focus: bool,
    filtered: Vec<usize>,
    highlight: Highlight,
    popover: Popover,
    hit: RefCell<HitMap>,
}

impl<V, L> Select<V, L>
where
    V: Clone + PartialEq + Send + 'static,
    L: Clone + fmt::Display + Send + 'static,
{
    /// A single select showing each label's `Display` form.
    pub fn new(options: Vec<SelectOption<V, L>>) -> Self {
        Self::with_text(options, OptionText::display())
    }
}

impl<V, L> Select<V, L>
where
    V: Clone + PartialEq + Send + 'static,
    L: Clone + Send + 'static,
{
    /// A single select whose option text comes from `text`.
    pub fn with_text(options: Vec<SelectOption<V, L>>, text: OptionText<V, L>) -> Self {
        let config = SelectConfig::default();
        let style = SelectStyle::default();
        let filtered: Vec<usize> = (0..options.len()).collect();
        Self {
            id: SelectId::next(),
            highlight: Highlight::new(filtered.len(), config.max_visible),
            popover: list_popover(&style),
            options,
            value: Selection::empty(false),
            config,
            text,
            renderers: Renderers {
                option: Arc::new(DefaultOption),
                single_value: None,
                multi_value: Arc::new(DefaultMultiValue),
            },
            style,
            keymap: SelectKeyMap::default(),
            search_input: String::new(),
            is_open: false,
            focus: false,
            filtered,
            hit: RefCell::new(HitMap::default()),
        }
    }

    /// Switch to multi selection.
    pub fn multi(mut self) -> Self {
        self.config.multi = true;
        if self.value.is_empty() {
            self.value = Selection::empty(true);
        }
        self
    }

    /// Text above the control.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// Text shown while nothing is selected or typed.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = Some(placeholder.into());
        self
    }

    /// Whether choosing a row closes the list (default `true`).
    pub fn close_on_select(mut self, close: bool) -> Self {
        self.config.close_on_select = close;
        self
    }

    /// Whether to offer a clear button (default `false`).
    pub fn show_clear(mut self, show: bool) -> Self {
        self.config.show_clear = show;
        self
    }

    /// Replace every behavior flag at once.
    pub fn with_config(mut self, mut config: SelectConfig) -> Self {
        config.max_visible = config.max_visible.max(1);
        if self.value.is_empty() {
            self.value = Selection::empty(config.multi);
        }
        self.highlight.set_visible(config.max_visible);
        self.config = config;
        self
    }

    /// Rows shown before the list scrolls.
    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.config.max_visible = rows.max(1);
        self.highlight.set_visible(self.config.max_visible);
        self
    }

    /// The initial value.
    pub fn with_value(mut self, value: Selection<V>) -> Self {
        self.set_value(value);
        self
    }

    /// Replace the option text function.
    pub fn with_option_text(mut self, text: OptionText<V, L>) -> Self {
        self.text = text;
        self.refilter();
        self
    }

    /// Custom list row renderer.
    pub fn with_option_renderer(mut self, renderer: impl OptionRender<V, L> + 'static) -> Self {
        self.renderers.option = Arc::new(renderer);
        self
    }

    /// Custom renderer for the collapsed single value.
    pub fn with_single_value_renderer(
        mut self,
        renderer: impl SingleValueRender<V, L> + 'static,
    ) -> Self {
        self.renderers.single_value = Some(Arc::new(renderer));
        self
    }

    /// Custom chip renderer for multi selection.
    pub fn with_multi_value_renderer(
        mut self,
        renderer: impl MultiValueRender<V, L> + 'static,
    ) -> Self {
        self.renderers.multi_value = Arc::new(renderer);
        self
    }

    /// Visual style.
    pub fn with_style(mut self, style: SelectStyle) -> Self {
        self.popover = list_popover(&style);
        self.style = style;
        self
    }

    /// Key bindings.
    pub fn with_keymap(mut self, keymap: SelectKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// This instance's identity.
    pub fn id(&self) -> SelectId {
        self.id
    }

    /// Behavior flags in use.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Key bindings in use.
    pub fn keymap(&self) -> &SelectKeyMap {
        &self.keymap
    }

    /// The current value.
    pub fn value(&self) -> &Selection<V> {
        &self.value
    }

    /// Store the value the parent decided on.
    pub fn set_value(&mut self, value: Selection<V>) {
        self.value = value;
    }

    /// All options.
    pub fn options(&self) -> &[SelectOption<V, L>] {
        &self.options
    }

    /// Replace the options, keeping the search text.
    pub fn set_options(&mut self, options: Vec<SelectOption<V, L>>) {
        self.options = options;
        self.refilter();
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The search text. Always empty while closed.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Options matching the search text, in option order.
    pub fn filtered(&self) -> Vec<&SelectOption<V, L>> {
        self.filtered.iter().map(|&i| &self.options[i]).collect()
    }

    /// Options in the current value, in option order.
    pub fn selected_options(&self) -> Vec<&SelectOption<V, L>> {
        self.options
            .iter()
            .filter(|item| is_selected(item, &self.value))
            .collect()
    }

    /// Whether `item` is in the current value.
    pub fn is_selected(&self, item: &SelectOption<V, L>) -> bool {
        is_selected(item, &self.value)
    }

    /// The option under the keyboard highlight.
    pub fn highlighted(&self) -> Option<&SelectOption<V, L>> {
        self.highlighted_index().map(|i| &self.options[i])
    }

    /// Take focus and open the list.
    pub fn focus(&mut self) {
        self.focus = true;
        self.open();
    }

    /// Drop focus and close the list.
    pub fn blur(&mut self) {
        self.focus = false;
        self.close();
    }

    /// Open the list, highlighting the first selected row.
    pub fn open(&mut self) {
        if self.is_open {
            return;
        }
        self.is_open = true;
        let first = self
            .filtered
            .iter()
            .position(|&i| is_selected(&self.options[i], &self.value))
            .unwrap_or(0);
        self.highlight.select(first);
        log::debug!("{} opened with {} option(s)", self.id, self.filtered.len());
    }

    /// Close the list and clear the search text.
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        self.search_input.clear();
        self.refilter();
        self.popover.reset();
        log::debug!("{} closed", self.id);
    }

    fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.focus = true;
            self.open();
        }
    }

    fn clear_visible(&self) -> bool {
        self.config.show_clear && (!self.search_input.is_empty() || !self.value.is_empty())
    }

    fn highlighted_index(&self) -> Option<usize> {
        self.highlight
            .cursor()
            .and_then(|cursor| self.filtered.get(cursor).copied())
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.options, &self.text, &self.search_input);
        self.highlight.set_count(self.filtered.len());
        log::trace!(
            "{} matched {}/{} option(s) for {:?}",
            self.id,
            self.filtered.len(),
            self.options.len(),
            self.search_input
        );
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut String)) {
        self.open();
        edit(&mut self.search_input);
        self.refilter();
        self.highlight.first();
    }

    fn emit(
        &self,
        trigger: Trigger,
        value: Selection<V>,
        option: Option<SelectOption<V, L>>,
    ) -> Command<Message<V, L>> {
        log::debug!(
            "{} change requested: {} value(s)",
            self.id,
            value.as_slice().len()
        );
        Command::message(Message::Changed(ChangeEvent {
            trigger,
            value,
            option,
        }))
    }

    fn activate(&mut self, index: usize, trigger: Trigger) -> Command<Message<V, L>> {
        let Some(item) = self.options.get(index).cloned() else {
            return Command::none();
        };
        let value = self.value.with_added(item.value.clone(), self.config.multi);
        if self.config.close_on_select {
            self.close();
        }
        self.emit(trigger, value, Some(item))
    }

    fn remove(&mut self, value: &V, trigger: Trigger) -> Command<Message<V, L>> {
        let option = self.options.iter().find(|o| o.value == *value).cloned();
        let next = self.value.without(value, self.config.multi);
        self.emit(trigger, next, option)
    }

    fn clear(&mut self, trigger: Trigger) -> Command<Message<V, L>> {
        self.close();
        self.emit(trigger, Selection::empty(self.config.multi), None)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message<V, L>> {
        if key.kind == KeyEventKind::Release {
            return Command::none();
        }

        if self.keymap.toggle.matches(&key) {
            self.toggle();
        } else if self.keymap.leave.matches(&key) {
            self.blur();
        } else if self.keymap.close.matches(&key) {
            self.close();
        } else if self.keymap.clear.matches(&key) {
            if self.clear_visible() {
                return self.clear(Trigger::Key(key));
            }
        } else if self.keymap.activate.matches(&key) {
            if !self.is_open {
                self.open();
            } else if let Some(index) = self.highlighted_index() {
                return self.activate(index, Trigger::Key(key));
            }
        } else if self.keymap.down.matches(&key) {
            if self.is_open {
                self.highlight.down();
            } else {
                self.open();
            }
        } else if self.keymap.up.matches(&key) {
            if self.is_open {
                self.highlight.up();
            }
        } else if self.keymap.home.matches(&key) {
            if self.is_open {
                self.highlight.first();
            }
        } else if self.keymap.end.matches(&key) {
            if self.is_open {
                self.highlight.last();
            }
        } else {
            match key.code {
                KeyCode::Backspace if !self.search_input.is_empty() => {
                    self.edit_search(|search| {
                        search.pop();
                    });
                }
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.edit_search(|search| search.push(c));
                }
                _ => {}
            }
        }
        Command::none()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message<V, L>> {
        let hit = self.hit.borrow().hit(&mouse);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::Moved => {
                if let Hit::Row(index) = hit {
                    if let Some(pos) = self.filtered.iter().position(|&i| i == index) {
                        self.highlight.select(pos);
                    }
                }
                return Command::none();
            }
            MouseEventKind::ScrollDown if matches!(hit, Hit::Row(_) | Hit::List) => {
                self.highlight.down();
                return Command::none();
            }
            MouseEventKind::ScrollUp if matches!(hit, Hit::Row(_) | Hit::List) => {
                self.highlight.up();
                return Command::none();
            }
            _ => return Command::none(),
        }

        match hit {
            Hit::Row(index) => self.activate(index, Trigger::Mouse(mouse)),
            Hit::Clear => self.clear(Trigger::Mouse(mouse)),
            Hit::Toggle => {
                self.toggle();
                Command::none()
            }
            Hit::Remove(index) => match self.options.get(index).map(|o| o.value.clone()) {
                Some(value) => self.remove(&value, Trigger::Mouse(mouse)),
                None => Command::none(),
            },
            Hit::Control => {
                self.focus();
                Command::none()
            }
            Hit::List | Hit::Outside => Command::none(),
        }
    }

    fn render_control(&self, frame: &mut Frame, row: Rect, hit: &mut HitMap) {
        let mut content = row;

        let symbol = if self.is_open {
            &self.style.open_symbol
        } else {
            &self.style.closed_symbol
        };
        if let Some(rect) = take_right(&mut content, cells(symbol) + 1) {
            let glyph = Span::styled(format!(" {symbol}"), self.style.button);
            frame.render_widget(Paragraph::new(glyph), rect);
            hit.toggle = Some(rect);
        }

        if self.clear_visible() {
            let symbol = &self.style.clear_symbol;
            if let Some(rect) = take_right(&mut content, cells(symbol) + 1) {
                let glyph = Span::styled(format!(" {symbol}"), self.style.button);
                frame.render_widget(Paragraph::new(glyph), rect);
                hit.clear = Some(rect);
            }
        }

        let mut spans = if self.config.multi {
            self.chips(content, hit)
        } else {
            Vec::new()
        };
        spans.extend(self.text_spans());
        frame.render_widget(Paragraph::new(Line::from(spans)), content);
    }

    fn chips(&self, content: Rect, hit: &mut HitMap) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut x = content.x;
        for (index, item) in self.options.iter().enumerate() {
            if !is_selected(item, &self.value) {
                continue;
            }
            let chip = self.renderers.multi_value.render(MultiValueProps {
                item,
                selected: &self.value,
                text: &self.text,
                style: &self.style,
            });
            for span in chip.label {
                x = x.saturating_add(span_cells(&span));
                spans.push(span);
            }
            let width = span_cells(&chip.remove);
            if x < content.right() {
                let width = width.min(content.right() - x);
                hit.chips.push((Rect::new(x, content.y, width, 1), index));
            }
            x = x.saturating_add(width).saturating_add(1);
            spans.push(chip.remove);
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn text_spans(&self) -> Vec<Span<'static>> {
        let cursor = (self.focus && self.is_open).then(|| Span::styled(" ", self.style.cursor));
        let mut spans = Vec::new();

        if !self.search_input.is_empty() {
            spans.push(Span::styled(self.search_input.clone(), self.style.text));
        } else if let Some(item) = self
            .selected_options()
            .into_iter()
            .next()
            .filter(|_| !self.config.multi)
        {
            match &self.renderers.single_value {
                Some(renderer) => spans.extend(
                    renderer
                        .render(SingleValueProps {
                            option: &item.option,
                            value: &item.value,
                        })
                        .spans,
                ),
                None => spans.push(Span::styled(self.text.text(item), self.style.text)),
            }
        } else if self.value.is_empty() {
            if let Some(placeholder) = &self.config.placeholder {
                spans.extend(cursor);
                spans.push(Span::styled(placeholder.clone(), self.style.placeholder));
                return spans;
            }
        }

        spans.extend(cursor);
        spans
    }

    fn render_list(&self, frame: &mut Frame, root: Rect, hit: &mut HitMap) {
        let rows = self.filtered.len().clamp(1, self.config.max_visible.max(1));
        let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
        let area = self.popover.area(Some(root), height, frame.area());
        if area.is_empty() {
            return;
        }
        let inner = self.popover.render(frame, area);
        hit.list = Some(area);

        if self.filtered.is_empty() {
            let empty = Span::styled(self.style.empty_text.clone(), self.style.empty);
            frame.render_widget(Paragraph::new(empty), inner);
            return;
        }

        let cursor = self.highlight.cursor();
        let visible = self
            .filtered
            .iter()
            .enumerate()
            .skip(self.highlight.offset())
            .take(usize::from(inner.height));
        for (row, (pos, &index)) in (0u16..).zip(visible) {
            let rect = Rect {
                y: inner.y + row,
                height: 1,
                ..inner
            };
            let highlighted = cursor == Some(pos);
            let line = self.renderers.option.render(OptionProps {
                item: &self.options[index],
                selected: &self.value,
                text: &self.text,
                highlighted,
                style: &self.style,
            });
            let mut paragraph = Paragraph::new(line);
            if highlighted {
                paragraph = paragraph.style(self.style.highlight);
            }
            frame.render_widget(paragraph, rect);
            hit.rows.push((rect, index));
        }
    }
}

impl<V, L> Component for Select<V, L>
where
    V: Clone + PartialEq + Send + 'static,
    L: Clone + Send + 'static,
{
    type Message = Message<V, L>;

    fn update(&mut self, msg: Message<V, L>) -> Command<Message<V, L>> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::Focus => {
                self.focus();
                Command::none()
            }
            Message::Blur => {
                self.blur();
                Command::none()
            }
            Message::Open => {
                self.open();
                Command::none()
            }
            Message::Close | Message::DocumentEscape => {
                self.close();
                Command::none()
            }
            Message::Toggle => {
                self.toggle();
                Command::none()
            }
            Message::Clear => self.clear(Trigger::Programmatic),
            Message::Choose(value) => match self.options.iter().position(|o| o.value == value) {
                Some(index) => self.activate(index, Trigger::Programmatic),
                None => Command::none(),
            },
            Message::Remove(value) => self.remove(&value, Trigger::Programmatic),
            Message::DocumentClick(mouse) => {
                let outside = !self.hit.borrow().contains(&mouse);
                if outside {
                    self.close();
                }
                Command::none()
            }
            Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut hit = HitMap::default();
        if area.is_empty() {
            *self.hit.borrow_mut() = hit;
            return;
        }

        let label_height = u16::from(self.config.label.is_some() && area.height > 1);
        let available = area.height - label_height;
        let control_height = if available >= 3 { 3 } else { available.min(1) };
        let root = Rect {
            height: label_height + control_height,
            ..area
        };
        hit.root = root;

        if let (Some(label), 1) = (&self.config.label, label_height) {
            let label = Span::styled(label.clone(), self.style.label);
            frame.render_widget(Paragraph::new(label), Rect { height: 1, ..area });
        }

        let control = Rect {
            y: area.y + label_height,
            height: control_height,
            ..area
        };
        let row = if control_height == 3 {
            let block = Block::default().borders(Borders::ALL).border_style(if self.focus {
                self.style.border_focused
            } else {
                self.style.border
            });
            let inner = block.inner(control);
            frame.render_widget(block, control);
            inner
        } else {
            control
        };
        if !row.is_empty() {
            self.render_control(frame, row, &mut hit);
        }

        if self.is_open {
            self.render_list(frame, root, &mut hit);
        }
        *self.hit.borrow_mut() = hit;
    }

    fn subscriptions(&self) -> Vec<Subscription<Message<V, L>>> {
        if !self.is_open {
            return Vec::new();
        }
        let close = self.keymap.close.clone();
        let id = SubscriptionId::new::<DismissListener>(self.id.0 as u64);
        vec![listen(id, move |event| match event {
            TerminalEvent::Key(key) if close.matches(key) => Some(Message::DocumentEscape),
            TerminalEvent::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some(Message::DocumentClick(*mouse))
            }
            _ => None,
        })]
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

fn list_popover(style: &SelectStyle) -> Popover {
    Popover::new(Offset::below()).with_block(Block::bordered().border_style(style.list_border))
}

fn cells(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

fn span_cells(span: &Span<'_>) -> u16 {
    u16::try_from(span.width()).unwrap_or(u16::MAX)
}

/// Split `width` columns off the right of `area`, if it leaves room.
fn take_right(area: &mut Rect, width: u16) -> Option<Rect> {
    if area.width <= width {
        return None;
    }
    area.width -= width;
    Some(Rect {
        x: area.right(),
        width,
        ..*area
    })
}
