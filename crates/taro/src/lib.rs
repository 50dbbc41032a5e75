//! **taro** -- searchable select widgets for [`ratatui`] on an Elm-style
//! runtime.
//!
//! The umbrella crate re-exports everything needed to build a taro
//! application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! taro = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`taro_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`taro_widgets`]: the select, the
//!   popover and key bindings.
//! * [`ratatui`], [`crossterm`], [`tokio`] and [`log`] are re-exported so
//!   downstream crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use taro::widgets::select::{self, Select, SelectOption};
//! use taro::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
//! use ratatui::Frame;
//!
//! struct Picker {
//!     fruit: Select<&'static str>,
//! }
//!
//! enum Msg {
//!     Fruit(select::Message<&'static str>),
//!     Quit,
//! }
//!
//! impl Model for Picker {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let options = ["apple", "pear"]
//!             .map(|f| SelectOption::new(f, f.to_string()))
//!             .to_vec();
//!         let mut fruit = Select::new(options).with_placeholder("Fruit");
//!         fruit.focus();
//!         (Picker { fruit }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Fruit(select::Message::Changed(change)) => {
//!                 self.fruit.set_value(change.value);
//!                 Command::none()
//!             }
//!             Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
//!             Msg::Quit => Command::quit(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         self.fruit.view(frame, frame.area());
//!     }
//!
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         let mut subs = vec![terminal_events(|ev| match ev {
//!             TerminalEvent::Key(k) if k.code == crossterm::event::KeyCode::F(10) => Some(Msg::Quit),
//!             TerminalEvent::Key(k) => Some(Msg::Fruit(select::Message::KeyPress(*k))),
//!             TerminalEvent::Mouse(m) => Some(Msg::Fruit(select::Message::Mouse(*m))),
//!             _ => None,
//!         })];
//!         subs.extend(self.fruit.subscriptions().into_iter().map(|s| s.map(Msg::Fruit)));
//!         subs
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     taro::run::<Picker>(()).await.unwrap();
//! }
//! ```

pub use taro_core::*;
pub mod widgets {
    pub use taro_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use log;
pub use ratatui;
pub use tokio;
