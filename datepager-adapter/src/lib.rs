//! Adapter utilities for the `datepager` crate.
//!
//! The `datepager` crate is UI-agnostic and focuses on the paging state machine. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A gesture [`Controller`] that commits or cancels drags and animates pages back to rest
//! - A [`HeaderModel`] for the date header (title, subtitle, navigation buttons)
//! - Tween-based settle animation helpers
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod header;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use header::{HeaderFormat, HeaderModel};
pub use tween::{Easing, Tween};
