//! # Select Example
//!
//! A clearable country picker whose options load asynchronously, and a tag
//! picker holding several values as chips. Both are controlled: the app
//! stores each `Changed` value and feeds it back.
//!
//! Run with: `cargo run -p taro --example select`
//! Set `TARO_LOG=select.log` to write debug logs to a file.

use std::time::Duration;
use taro::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use taro::ratatui::layout::{Constraint, Layout};
use taro::ratatui::style::{Color, Modifier, Style};
use taro::ratatui::text::{Line, Span};
use taro::ratatui::widgets::Paragraph;
use taro::ratatui::Frame;
use taro::widgets::select::{
    self, Chip, MultiValueProps, OptionProps, OptionText, Select, SelectOption, Selection,
    SingleValueProps,
};
use taro::{terminal_events, Command, Component, Model, ProgramOptions, Subscription, TerminalEvent};

#[derive(Debug, Clone)]
struct Country {
    name: &'static str,
    code: &'static str,
}

const COUNTRIES: &[(&str, &str)] = &[
    ("Argentina", "AR"),
    ("Australia", "AU"),
    ("Brazil", "BR"),
    ("Canada", "CA"),
    ("Denmark", "DK"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("India", "IN"),
    ("Japan", "JP"),
    ("Kenya", "KE"),
    ("Mexico", "MX"),
    ("Norway", "NO"),
    ("Portugal", "PT"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Vietnam", "VN"),
];

const TAGS: &[&str] = &[
    "async", "cli", "gui", "networking", "parsing", "rust", "tui", "web",
];

async fn load_countries() -> Vec<SelectOption<&'static str, Country>> {
    tokio::time::sleep(Duration::from_millis(400)).await;
    COUNTRIES
        .iter()
        .map(|&(name, code)| SelectOption::new(code, Country { name, code }))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Country,
    Tags,
}

struct SelectDemo {
    country: Select<&'static str, Country>,
    tags: Select<u32>,
    focus: Field,
}

#[derive(Debug)]
enum Msg {
    Key(KeyEvent),
    Mouse(MouseEvent),
    CountriesLoaded(Vec<SelectOption<&'static str, Country>>),
    Country(select::Message<&'static str, Country>),
    Tags(select::Message<u32>),
    Quit,
}

impl SelectDemo {
    fn any_open(&self) -> bool {
        self.country.is_open() || self.tags.is_open()
    }

    fn move_focus(&mut self, to: Field) {
        self.focus = to;
        match to {
            Field::Country => {
                self.tags.blur();
                self.country.focus();
            }
            Field::Tags => {
                self.country.blur();
                self.tags.focus();
            }
        }
    }

    fn country_line(&self) -> Line<'static> {
        let name = self
            .country
            .selected_options()
            .first()
            .map_or("none", |o| o.option.name);
        Line::from(vec![
            Span::raw("Country: "),
            Span::styled(name, Style::default().fg(Color::Green)),
        ])
    }

    fn tags_line(&self) -> Line<'static> {
        let names: Vec<String> = self
            .tags
            .selected_options()
            .iter()
            .map(|o| o.option.clone())
            .collect();
        Line::from(vec![
            Span::raw("Tags: "),
            Span::styled(names.join(", "), Style::default().fg(Color::Green)),
        ])
    }

    fn help_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for binding in self.country.keymap().short_help() {
            spans.push(Span::styled(
                binding.key_label(),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::raw(format!(" {}  ", binding.description)));
        }
        spans.push(Span::styled("Tab", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(" next field  "));
        spans.push(Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(" quit"));
        Line::from(spans)
    }
}

impl Model for SelectDemo {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let mut country = Select::with_text(
            Vec::new(),
            OptionText::from_label(|c: &Country| format!("{} {}", c.name, c.code)),
        )
        .with_label("Country")
        .with_placeholder("Loading countries…")
        .show_clear(true)
        .with_option_renderer(|props: OptionProps<'_, &'static str, Country>| {
            let style = if props.is_selected() {
                props.style.row_selected
            } else {
                props.style.row
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", props.item.option.code),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(props.item.option.name, style),
            ])
        })
        .with_single_value_renderer(|props: SingleValueProps<'_, &'static str, Country>| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", props.option.code),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(props.option.name),
            ])
        });
        country.focus();

        let tags = Select::new(
            TAGS.iter()
                .zip(1u32..)
                .map(|(tag, id)| SelectOption::new(id, tag.to_string()))
                .collect(),
        )
        .multi()
        .close_on_select(false)
        .show_clear(true)
        .with_label("Tags")
        .with_placeholder("Add tags")
        .with_max_visible(5)
        .with_multi_value_renderer(|props: MultiValueProps<'_, u32, String>| Chip {
            label: vec![Span::styled(
                format!("#{}", props.item.option),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )],
            remove: Span::styled("✕", Style::default().fg(Color::DarkGray)),
        });

        (
            SelectDemo {
                country,
                tags,
                focus: Field::Country,
            },
            Command::perform(load_countries(), Msg::CountriesLoaded),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key)
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Command::quit()
            }
            Msg::Key(key) if key.code == KeyCode::Esc && !self.any_open() => Command::quit(),
            Msg::Key(key) => {
                let cmd = match self.focus {
                    Field::Country => self
                        .country
                        .update(select::Message::KeyPress(key))
                        .map(Msg::Country),
                    Field::Tags => self.tags.update(select::Message::KeyPress(key)).map(Msg::Tags),
                };
                if self.country.keymap().leave.matches(&key) {
                    let next = match self.focus {
                        Field::Country => Field::Tags,
                        Field::Tags => Field::Country,
                    };
                    self.move_focus(next);
                }
                cmd
            }
            Msg::Mouse(mouse) => {
                let cmd = Command::batch([
                    self.country
                        .update(select::Message::Mouse(mouse))
                        .map(Msg::Country),
                    self.tags.update(select::Message::Mouse(mouse)).map(Msg::Tags),
                ]);
                // A click on the other field's control focuses it.
                if self.focus == Field::Country && self.tags.focused() {
                    self.move_focus(Field::Tags);
                } else if self.focus == Field::Tags && self.country.focused() {
                    self.move_focus(Field::Country);
                }
                cmd
            }
            Msg::CountriesLoaded(options) => {
                taro::log::info!("loaded {} countries", options.len());
                self.country.set_options(options);
                Command::none()
            }
            Msg::Country(select::Message::Changed(change)) => {
                self.country.set_value(change.value);
                Command::none()
            }
            Msg::Country(m) => self.country.update(m).map(Msg::Country),
            Msg::Tags(select::Message::Changed(change)) => {
                self.tags.set_value(change.value);
                Command::none()
            }
            Msg::Tags(m) => self.tags.update(m).map(Msg::Tags),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, country_area, _, tags_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [country_area] = Layout::horizontal([Constraint::Max(40)]).areas(country_area);
        let [tags_area] = Layout::horizontal([Constraint::Max(60)]).areas(tags_area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Select Demo",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, title_area);

        let [_, country_status, tags_status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(status_area);
        frame.render_widget(Paragraph::new(self.country_line()), country_status);
        frame.render_widget(Paragraph::new(self.tags_line()), tags_status);
        frame.render_widget(Paragraph::new(self.help_line()), help_area);

        // The open list overlays what follows it, so draw the open one last.
        if self.country.is_open() {
            self.tags.view(frame, tags_area);
            self.country.view(frame, country_area);
        } else {
            self.country.view(frame, country_area);
            self.tags.view(frame, tags_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => event.key_press().map(|_| Msg::Key(*key)),
            TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(*mouse)),
            _ => None,
        })];
        subs.extend(
            self.country
                .subscriptions()
                .into_iter()
                .map(|s| s.map(Msg::Country)),
        );
        subs.extend(self.tags.subscriptions().into_iter().map(|s| s.map(Msg::Tags)));
        subs
    }
}

#[taro::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        title: Some("taro select".into()),
        log_file: std::env::var_os("TARO_LOG").map(Into::into),
        log_level: taro::log::LevelFilter::Debug,
        ..ProgramOptions::default()
    };
    let demo = taro::run_with::<SelectDemo>((), options).await?;
    println!("country: {:?}", demo.country.value());
    if let Selection::Multi(tags) = demo.tags.value() {
        println!("tags: {tags:?}");
    }
    Ok(())
}
