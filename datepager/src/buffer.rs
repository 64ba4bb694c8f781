use crate::{MoveLocked, PageId, ScrollDirection, ScrollState, SlotPosition};

/// Tunables for boundary resistance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RubberBanding {
    /// Divides the dragged distance. Values below 1 are treated as 1.
    pub resistance_factor: f32,
    /// Largest distance that still adds resistance.
    pub offset_limit: f32,
}

impl RubberBanding {
    pub fn new(resistance_factor: f32, offset_limit: f32) -> Self {
        Self {
            resistance_factor,
            offset_limit,
        }
    }

    /// `min(|requested|, offset_limit) / resistance_factor`.
    pub fn offset(&self, requested: f32) -> f32 {
        let limit = self.offset_limit.max(0.0);
        let factor = self.resistance_factor.max(1.0);
        requested.abs().min(limit) / factor
    }

    /// The largest offset [`RubberBanding::offset`] can report.
    pub fn max_offset(&self) -> f32 {
        self.offset(self.offset_limit)
    }
}

impl Default for RubberBanding {
    fn default() -> Self {
        Self {
            resistance_factor: 3.0,
            offset_limit: 60.0,
        }
    }
}

/// What a finished move did to the buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shift {
    /// Positions rotated; `recycled` now sits on the leading edge and needs rebinding.
    Rotated {
        direction: ScrollDirection,
        recycled: PageId,
    },
    /// The direction is disabled; only resistance feedback is reported.
    RubberBand {
        direction: ScrollDirection,
        offset: f32,
    },
    Cancelled { direction: ScrollDirection },
}

/// Three reusable page containers rotating through Left/Center/Right.
///
/// The containers are created once and never reallocated: a move only permutes which container
/// sits at which position. `slots[position]` holds the id of the container at that position and
/// is always a permutation of the three ids.
#[derive(Clone, Debug)]
pub struct PaginationBuffer<P> {
    pages: [P; 3],
    slots: [PageId; 3],
    scroll: ScrollState,
    rubber_banding: RubberBanding,
}

impl<P> PaginationBuffer<P> {
    /// Creates the three containers in Left, Center, Right order.
    pub fn new(mut factory: impl FnMut(SlotPosition) -> P, rubber_banding: RubberBanding) -> Self {
        Self::from_pages(SlotPosition::ALL.map(&mut factory), rubber_banding)
    }

    pub fn from_pages(pages: [P; 3], rubber_banding: RubberBanding) -> Self {
        Self {
            pages,
            slots: [PageId(0), PageId(1), PageId(2)],
            scroll: ScrollState::default(),
            rubber_banding,
        }
    }

    pub fn page_id_at(&self, position: SlotPosition) -> PageId {
        self.slots[position.index()]
    }

    pub fn position_of(&self, id: PageId) -> Option<SlotPosition> {
        SlotPosition::ALL
            .into_iter()
            .find(|pos| self.slots[pos.index()] == id)
    }

    pub fn page(&self, id: PageId) -> &P {
        &self.pages[id.index()]
    }

    pub fn page_mut(&mut self, id: PageId) -> &mut P {
        &mut self.pages[id.index()]
    }

    pub fn at(&self, position: SlotPosition) -> &P {
        self.page(self.page_id_at(position))
    }

    pub fn at_mut(&mut self, position: SlotPosition) -> &mut P {
        let id = self.page_id_at(position);
        self.page_mut(id)
    }

    pub fn current_presented(&self) -> &P {
        self.at(SlotPosition::Center)
    }

    /// The container at Right, unless forward scrolling is disabled.
    pub fn forward_neighbor(&self) -> Option<&P> {
        self.scroll
            .forward_enabled
            .then(|| self.at(SlotPosition::Right))
    }

    /// The container at Left, unless backward scrolling is disabled.
    pub fn backward_neighbor(&self) -> Option<&P> {
        self.scroll
            .backward_enabled
            .then(|| self.at(SlotPosition::Left))
    }

    /// Iterates over `(position, id, page)` in Left, Center, Right order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotPosition, PageId, &P)> {
        SlotPosition::ALL
            .into_iter()
            .map(move |pos| (pos, self.page_id_at(pos), self.at(pos)))
    }

    /// Left becomes Right, Center becomes Left, Right becomes Center.
    ///
    /// Returns the recycled container, now at Right.
    pub fn move_forward(&mut self) -> PageId {
        let [left, center, right] = self.slots;
        self.slots = [center, right, left];
        debug_assert!(self.is_bijection());
        left
    }

    /// Right becomes Left, Left becomes Center, Center becomes Right.
    ///
    /// Returns the recycled container, now at Left.
    pub fn move_backward(&mut self) -> PageId {
        let [left, center, right] = self.slots;
        self.slots = [right, left, center];
        debug_assert!(self.is_bijection());
        right
    }

    pub fn rotate(&mut self, direction: ScrollDirection) -> PageId {
        match direction {
            ScrollDirection::Forward => self.move_forward(),
            ScrollDirection::Backward => self.move_backward(),
        }
    }

    fn is_bijection(&self) -> bool {
        let mut seen = [false; 3];
        for id in self.slots {
            if core::mem::replace(&mut seen[id.index()], true) {
                return false;
            }
        }
        true
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn is_enabled(&self, direction: ScrollDirection) -> bool {
        self.scroll.is_enabled(direction)
    }

    pub fn set_forward_enabled(&mut self, forward_enabled: bool) {
        self.scroll = ScrollState {
            forward_enabled,
            ..self.scroll
        };
    }

    pub fn set_backward_enabled(&mut self, backward_enabled: bool) {
        self.scroll = ScrollState {
            backward_enabled,
            ..self.scroll
        };
    }

    pub fn set_enabled(&mut self, direction: ScrollDirection, enabled: bool) {
        match direction {
            ScrollDirection::Forward => self.set_forward_enabled(enabled),
            ScrollDirection::Backward => self.set_backward_enabled(enabled),
        }
    }

    pub fn disable_scroll(&mut self) {
        self.set_forward_enabled(false);
        self.set_backward_enabled(false);
    }

    pub fn enable_scroll(&mut self) {
        self.set_forward_enabled(true);
        self.set_backward_enabled(true);
    }

    pub fn rubber_banding(&self) -> RubberBanding {
        self.rubber_banding
    }

    pub fn set_rubber_banding(&mut self, rubber_banding: RubberBanding) {
        self.rubber_banding = rubber_banding;
    }

    pub fn rubber_band_offset(&self, requested: f32) -> f32 {
        self.rubber_banding.offset(requested)
    }

    /// Starts a move and locks its direction until it finishes.
    ///
    /// Restarting a move in the same direction is accepted; the opposite direction is rejected
    /// while a move is in progress.
    pub fn begin_move(&mut self, direction: ScrollDirection) -> Result<(), MoveLocked> {
        if self.scroll.in_progress {
            if self.scroll.direction != direction {
                return Err(MoveLocked {
                    active: self.scroll.direction,
                });
            }
            return Ok(());
        }
        self.start(direction);
        Ok(())
    }

    fn start(&mut self, direction: ScrollDirection) {
        self.scroll = ScrollState {
            direction,
            in_progress: true,
            rubber_band_offset: 0.0,
            ..self.scroll
        };
    }

    /// Reports the distance dragged in the locked direction.
    ///
    /// Returns the distance to display: unchanged when the direction is enabled, the
    /// rubber-band offset otherwise. Does nothing outside a move.
    pub fn drag(&mut self, distance: f32) -> f32 {
        if !self.scroll.in_progress {
            return 0.0;
        }
        if self.scroll.is_enabled(self.scroll.direction) {
            return distance;
        }
        let rubber_band_offset = self.rubber_band_offset(distance);
        self.scroll = ScrollState {
            rubber_band_offset,
            ..self.scroll
        };
        rubber_band_offset
    }

    /// Ends the current move, rotating when `commit` is set and the direction is enabled.
    pub fn finish_move(&mut self, commit: bool) -> Shift {
        let prev = self.scroll;
        let direction = prev.direction;
        if !prev.in_progress {
            return Shift::Cancelled { direction };
        }
        self.scroll = ScrollState {
            in_progress: false,
            rubber_band_offset: 0.0,
            ..prev
        };

        if !prev.is_enabled(direction) {
            let offset = if prev.rubber_band_offset > 0.0 {
                prev.rubber_band_offset
            } else {
                self.rubber_banding.max_offset()
            };
            return Shift::RubberBand { direction, offset };
        }
        if !commit {
            return Shift::Cancelled { direction };
        }
        let recycled = self.rotate(direction);
        Shift::Rotated {
            direction,
            recycled,
        }
    }

    /// Abandons an in-progress move, dropping any rubber-band feedback.
    ///
    /// Returns `true` if a move was in progress.
    pub fn cancel_move(&mut self) -> bool {
        let was = self.scroll.in_progress;
        self.scroll = ScrollState {
            in_progress: false,
            rubber_band_offset: 0.0,
            ..self.scroll
        };
        was
    }

    /// Programmatic equivalent of a completed user move in `direction`.
    ///
    /// Cancels whatever gesture is in progress first, rubber-band feedback included.
    pub fn force_scroll(&mut self, direction: ScrollDirection) -> Shift {
        self.cancel_move();
        self.start(direction);
        self.finish_move(true)
    }
}
