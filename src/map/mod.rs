//! Map widget and tile source.
//!
//! This module wraps the `walkers` slippy map behind the core `MapAdapter`
//! trait and provides the static fallback shown when it cannot start.

pub mod tiles;
pub mod widget;

pub use widget::{MapAction, MapWidget};
