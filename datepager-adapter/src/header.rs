use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};
use datepager::{CalendarWindow, ScrollState, WindowError, WindowResult};

/// How a [`HeaderModel`] renders a window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderFormat {
    /// strftime-style format applied to each date of the window.
    pub date_format: String,
    /// Subtitle shown while the window contains today.
    pub present_description: Option<String>,
    /// Subtitle shown for any other window.
    pub past_description: Option<String>,
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".to_owned(),
            present_description: None,
            past_description: None,
        }
    }
}

impl HeaderFormat {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            ..Self::default()
        }
    }

    pub fn with_present_description(mut self, description: impl Into<String>) -> Self {
        self.present_description = Some(description.into());
        self
    }

    pub fn with_past_description(mut self, description: impl Into<String>) -> Self {
        self.past_description = Some(description.into());
        self
    }
}

/// Framework-neutral state behind a date header: a title, an optional subtitle and the two
/// navigation buttons.
///
/// Feed it every presented window (`update_with`) and every scroll state change
/// (`set_scroll_state`); render the getters.
#[derive(Clone, Debug)]
pub struct HeaderModel {
    format: HeaderFormat,
    window: Option<CalendarWindow>,
    title: String,
    is_current: bool,
    forward_enabled: bool,
    backward_enabled: bool,
}

impl HeaderModel {
    /// Fails with [`WindowError::InvalidFormat`] if `format.date_format` does not parse.
    pub fn new(format: HeaderFormat) -> WindowResult<Self> {
        if StrftimeItems::new(&format.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(WindowError::InvalidFormat(format.date_format));
        }
        Ok(Self {
            format,
            window: None,
            title: String::new(),
            is_current: false,
            forward_enabled: true,
            backward_enabled: true,
        })
    }

    pub fn format(&self) -> &HeaderFormat {
        &self.format
    }

    /// The window last passed to `update_with`.
    pub fn window(&self) -> Option<&CalendarWindow> {
        self.window.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        let description = if self.is_current {
            &self.format.present_description
        } else {
            &self.format.past_description
        };
        description.as_deref()
    }

    /// Whether the presented window contains today.
    pub fn is_current_period(&self) -> bool {
        self.is_current
    }

    pub fn forward_enabled(&self) -> bool {
        self.forward_enabled
    }

    pub fn backward_enabled(&self) -> bool {
        self.backward_enabled
    }

    /// Renders `window`, judging "current" against the local date.
    pub fn update_with(&mut self, window: &CalendarWindow) -> WindowResult<()> {
        self.update_at(window, Local::now().date_naive())
    }

    /// Renders `window`, judging "current" against `today`.
    ///
    /// On error the previous title is kept.
    pub fn update_at(&mut self, window: &CalendarWindow, today: NaiveDate) -> WindowResult<()> {
        self.title = window.describe(&self.format.date_format)?;
        self.window = Some(*window);
        self.is_current = window.contains(today);
        Ok(())
    }

    pub fn set_scroll_state(&mut self, scroll: &ScrollState) {
        self.forward_enabled = scroll.forward_enabled;
        self.backward_enabled = scroll.backward_enabled;
    }
}
