//! A headless three-slot infinite pagination engine over calendar windows.
//!
//! For adapter-level utilities (gesture controller, settle tweens, header model), see the
//! `datepager-adapter` crate.
//!
//! The engine simulates unbounded forward/backward paging with exactly three reusable page
//! containers. Each move rotates which container sits at Left/Center/Right, rebinds the
//! recycled edge to the next (or previous) [`CalendarWindow`], and arms a single debounce timer
//! so only the page where motion stops gets to fetch its data.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - navigation intents (buttons, swipes, drag distances)
//! - a clock (`now_ms`) and periodic `tick` calls
//! - a [`PageContent`] implementation that performs the actual data retrieval
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod buffer;
mod cache;
mod error;
mod lifecycle;
mod navigator;
mod options;
mod state;
mod timer;
mod types;
mod window;


pub use buffer::{PaginationBuffer, RubberBanding, Shift};
pub use cache::PageCache;
pub use error::{MoveLocked, NavigatorError, WindowError, WindowResult};
pub use lifecycle::{Page, PageContent};
pub use navigator::PagedNavigator;
pub use options::{NavigatorOptions, OnPageChangeCallback, OnWindowChangeCallback};
pub use state::{ScrollState, SlotSnapshot};
pub use timer::SettleTimer;
pub use types::{
    FetchCompletion, FetchRequest, LifecycleState, MoveOutcome, PageChange, PageId,
    ScrollDirection, SlotPosition,
};
pub use window::{Calendar, CalendarUnit, CalendarWindow};

pub use chrono::{NaiveDate, Weekday};
