use crate::{CalendarWindow, LifecycleState, PageId, ScrollDirection, SlotPosition};

/// A lightweight snapshot of the scroll/navigation state.
///
/// The buffer replaces this value on every transition instead of mutating it piecemeal.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Direction of the current (or last) move.
    pub direction: ScrollDirection,
    /// True between move start and move settle.
    pub in_progress: bool,
    /// Resistance offset reported while dragging toward a disabled direction.
    pub rubber_band_offset: f32,
    pub forward_enabled: bool,
    pub backward_enabled: bool,
}

impl ScrollState {
    pub fn is_enabled(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Forward => self.forward_enabled,
            ScrollDirection::Backward => self.backward_enabled,
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            direction: ScrollDirection::Forward,
            in_progress: false,
            rubber_band_offset: 0.0,
            forward_enabled: true,
            backward_enabled: true,
        }
    }
}

/// What one slot holds at a given moment.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSnapshot {
    pub position: SlotPosition,
    pub page: PageId,
    pub window: Option<CalendarWindow>,
    pub state: LifecycleState,
    pub should_fetch: bool,
}
