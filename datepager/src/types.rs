use core::fmt;

use crate::CalendarWindow;

/// One of the three fixed roles a page container can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotPosition {
    Left,
    Center,
    Right,
}

impl SlotPosition {
    pub const ALL: [SlotPosition; 3] = [Self::Left, Self::Center, Self::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// The edge slot that gets recycled when moving in `direction`.
    pub fn leading_edge(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Forward => Self::Right,
            ScrollDirection::Backward => Self::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

impl ScrollDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Stable identity of one of the three page containers.
///
/// Ids are handed out once when the buffer is built and stay valid for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageId(pub(crate) u8);

impl PageId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// Readiness of a page with respect to the data of its bound window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    #[default]
    PendingLoad,
    Loaded,
}

/// Emitted on every settled move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageChange {
    pub direction: ScrollDirection,
    /// The container now at [`SlotPosition::Center`].
    pub presented: PageId,
    /// The container that was recycled onto the leading edge.
    pub reused: PageId,
    /// The window of the presented page.
    pub window: CalendarWindow,
}

/// Result of a navigation request.
#[derive(Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Moved(PageChange),
    /// The direction is disabled (or at the minimum window); nothing rotated.
    RubberBand {
        direction: ScrollDirection,
        offset: f32,
    },
    /// A gesture ended without committing.
    Cancelled { direction: ScrollDirection },
    /// A move in the opposite direction is still in progress.
    Locked { active: ScrollDirection },
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }

    pub fn page_change(&self) -> Option<&PageChange> {
        match self {
            Self::Moved(change) => Some(change),
            _ => None,
        }
    }
}

/// Handed to [`crate::PageContent::fetch_data`] and returned through
/// [`crate::PagedNavigator::complete_fetch`].
///
/// The generation tags the fetch with the binding it was issued for, so completions that arrive
/// after the page was recycled can be recognized and dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest {
    pub page: PageId,
    pub window: CalendarWindow,
    pub generation: u64,
}

/// What happened to a fetch completion.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchCompletion<E> {
    /// The payload was applied and the page is now [`LifecycleState::Loaded`].
    Applied,
    /// The page was rebound since the request was issued; the result was discarded.
    Stale,
    /// The fetch failed. The page stays pending; no settle is armed for it, so it fetches again
    /// only once a later settle finds it presented.
    Failed(E),
}
