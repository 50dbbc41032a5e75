//! Core runtime for the **taro** widget toolkit.
//!
//! `taro-core` provides the traits, types, and runtime that host taro's
//! widgets. The design follows the [Elm Architecture]: a program is a pure
//! **init -> update -> view** cycle, with side effects pushed to the edges
//! through [`Command`]s and global input handled by document listeners
//! ([`Subscription`]s).
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Describes a side effect to be executed by the runtime |
//! | [`Subscription`] | Document-level event listener, registered while declared |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//!
//! # Document listeners
//!
//! A select widget has to notice an Escape press or a click *anywhere* on
//! screen while its list is open, and must stop listening when the list
//! closes. Models and components declare such listeners from
//! `subscriptions()`; after every update the runtime reconciles the declared
//! set with the registered one, and on exit it releases everything. There is
//! no explicit add/remove call to forget.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{init_file_logger, OutputTarget, Program, ProgramError, ProgramOptions};
pub use subscription::{listen, terminal_events, Subscription, SubscriptionId};

/// Run a taro application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
