//! Widgets for the **taro** toolkit.
//!
//! Every widget implements [`taro_core::Component`], so it can be embedded
//! in any [`taro_core::Model`] and composed within [`ratatui`] layouts.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`select`] | Searchable single and multi select with custom renderers |
//! | [`popover`] | Overlay anchored to a reference box by offset expressions |
//! | [`key`] | Key bindings |
//!
//! # Features
//!
//! * `serde`: `Serialize`/`Deserialize` for
//!   [`SelectOption`](select::SelectOption) and
//!   [`Selection`](select::Selection).

pub mod key;
pub mod popover;
pub mod select;
