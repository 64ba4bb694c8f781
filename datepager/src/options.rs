use std::sync::Arc;

use crate::{CalendarWindow, PageChange, RubberBanding};

/// A callback fired after every settled move.
pub type OnPageChangeCallback = Arc<dyn Fn(&PageChange) + Send + Sync>;

/// A callback fired whenever the presented window changes (typically drives a header).
pub type OnWindowChangeCallback = Arc<dyn Fn(&CalendarWindow) + Send + Sync>;

/// Configuration for [`crate::PagedNavigator`].
///
/// Every tunable has an explicit default and is read by the navigator when it needs it; nothing
/// is queried from collaborators per call. Callbacks are stored in `Arc`s so the options stay
/// cheap to clone.
pub struct NavigatorOptions {
    /// How long motion must stop before the presented page may fetch.
    ///
    /// A page that is only passed through during fast scrolling never fetches.
    pub load_data_delay_ms: u64,

    pub rubber_banding_resistance_factor: f32,
    pub rubber_banding_offset: f32,

    pub forward_scroll_enabled: bool,
    /// Backward scrolling is additionally disabled while the minimum window is presented.
    pub backward_scroll_enabled: bool,

    /// Number of loaded windows whose payload is kept. `0` disables the cache.
    pub max_cache_size: usize,

    pub on_page_change: Option<OnPageChangeCallback>,
    pub on_window_change: Option<OnWindowChangeCallback>,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            load_data_delay_ms: 125,
            rubber_banding_resistance_factor: 3.0,
            rubber_banding_offset: 60.0,
            forward_scroll_enabled: true,
            backward_scroll_enabled: true,
            max_cache_size: 12,
            on_page_change: None,
            on_window_change: None,
        }
    }
}

impl Clone for NavigatorOptions {
    fn clone(&self) -> Self {
        Self {
            load_data_delay_ms: self.load_data_delay_ms,
            rubber_banding_resistance_factor: self.rubber_banding_resistance_factor,
            rubber_banding_offset: self.rubber_banding_offset,
            forward_scroll_enabled: self.forward_scroll_enabled,
            backward_scroll_enabled: self.backward_scroll_enabled,
            max_cache_size: self.max_cache_size,
            on_page_change: self.on_page_change.clone(),
            on_window_change: self.on_window_change.clone(),
        }
    }
}

impl NavigatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rubber_banding(&self) -> RubberBanding {
        RubberBanding::new(
            self.rubber_banding_resistance_factor,
            self.rubber_banding_offset,
        )
    }

    pub fn with_load_data_delay_ms(mut self, delay_ms: u64) -> Self {
        self.load_data_delay_ms = delay_ms;
        self
    }

    pub fn with_rubber_banding(mut self, resistance_factor: f32, offset: f32) -> Self {
        self.rubber_banding_resistance_factor = resistance_factor;
        self.rubber_banding_offset = offset;
        self
    }

    pub fn with_forward_scroll_enabled(mut self, enabled: bool) -> Self {
        self.forward_scroll_enabled = enabled;
        self
    }

    pub fn with_backward_scroll_enabled(mut self, enabled: bool) -> Self {
        self.backward_scroll_enabled = enabled;
        self
    }

    pub fn with_max_cache_size(mut self, max_cache_size: usize) -> Self {
        self.max_cache_size = max_cache_size;
        self
    }

    pub fn with_on_page_change(
        mut self,
        on_page_change: Option<impl Fn(&PageChange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_page_change = on_page_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_window_change(
        mut self,
        on_window_change: Option<impl Fn(&CalendarWindow) + Send + Sync + 'static>,
    ) -> Self {
        self.on_window_change = on_window_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for NavigatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavigatorOptions")
            .field("load_data_delay_ms", &self.load_data_delay_ms)
            .field(
                "rubber_banding_resistance_factor",
                &self.rubber_banding_resistance_factor,
            )
            .field("rubber_banding_offset", &self.rubber_banding_offset)
            .field("forward_scroll_enabled", &self.forward_scroll_enabled)
            .field("backward_scroll_enabled", &self.backward_scroll_enabled)
            .field("max_cache_size", &self.max_cache_size)
            .finish_non_exhaustive()
    }
}
