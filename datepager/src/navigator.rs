use crate::{
    CalendarWindow, FetchCompletion, FetchRequest, MoveLocked, MoveOutcome, NavigatorError,
    NavigatorOptions, Page, PageCache, PageChange, PageContent, PageId, PaginationBuffer,
    ScrollDirection, ScrollState, SettleTimer, Shift, SlotPosition, SlotSnapshot, WindowResult,
};

/// Windows to bind after a move, computed before anything rotates.
#[derive(Clone, Copy, Debug)]
struct MovePlan {
    presented: CalendarWindow,
    /// `None` when the leading edge would lie before the minimum date.
    edge: Option<CalendarWindow>,
}

/// Infinite paging over calendar windows with three recycled page containers.
///
/// The navigator is UI-agnostic. An adapter drives it by:
/// - requesting moves (`request_move`, `force_scroll`, or `begin_move`/`drag`/`end_move` for
///   gestures), passing its clock as `now_ms`
/// - calling `tick(now_ms)` from a frame loop or timer so settled pages can fetch
/// - handing fetch results back through `complete_fetch`
///
/// Windows are always derived from the currently presented window, never accumulated from the
/// initial one. All mutation happens through `&mut self`, so one move completes before the next
/// starts; fetch completions must be delivered on the same execution context.
pub struct PagedNavigator<C: PageContent> {
    options: NavigatorOptions,
    buffer: PaginationBuffer<Page<C>>,
    current: CalendarWindow,
    settle: SettleTimer,
    cache: PageCache<C::Payload>,
}

impl<C: PageContent> PagedNavigator<C> {
    /// Creates the three page containers (via `factory`) bound to `window` and its neighbors.
    ///
    /// The presented page is due to fetch on the first `tick`.
    pub fn new(
        window: CalendarWindow,
        options: NavigatorOptions,
        mut factory: impl FnMut(SlotPosition) -> C,
    ) -> Result<Self, NavigatorError> {
        let next = window.next()?;
        let previous = window.previous().ok();
        pdebug!(
            window = %window,
            load_data_delay_ms = options.load_data_delay_ms,
            max_cache_size = options.max_cache_size,
            "PagedNavigator::new"
        );

        let buffer = PaginationBuffer::new(|pos| Page::new(factory(pos)), options.rubber_banding());
        let mut nav = Self {
            cache: PageCache::new(options.max_cache_size),
            options,
            buffer,
            current: window,
            settle: SettleTimer::new(),
        };
        nav.bind_all(previous, next);
        let presented = nav.buffer.page_id_at(SlotPosition::Center);
        nav.settle.schedule(presented, 0, 0);
        nav.notify(None);
        Ok(nav)
    }

    fn bind_all(&mut self, previous: Option<CalendarWindow>, next: CalendarWindow) {
        self.buffer
            .at_mut(SlotPosition::Left)
            .prepare_for_reuse(previous);
        self.buffer
            .at_mut(SlotPosition::Center)
            .prepare_for_reuse(Some(self.current));
        self.buffer
            .at_mut(SlotPosition::Right)
            .prepare_for_reuse(Some(next));
        self.sync_enabled();
        self.buffer.at_mut(SlotPosition::Center).did_appear();
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    /// Replaces the options, applying rubber-banding, cache size and scroll flags immediately.
    pub fn set_options(&mut self, options: NavigatorOptions) {
        self.options = options;
        ptrace!(options = ?self.options, "PagedNavigator::set_options");
        self.buffer.set_rubber_banding(self.options.rubber_banding());
        self.cache.set_capacity(self.options.max_cache_size);
        self.sync_enabled();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut NavigatorOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_forward_scroll_enabled(&mut self, enabled: bool) {
        self.options.forward_scroll_enabled = enabled;
        self.sync_enabled();
    }

    pub fn set_backward_scroll_enabled(&mut self, enabled: bool) {
        self.options.backward_scroll_enabled = enabled;
        self.sync_enabled();
    }

    /// Takes effect from the next move; a pending settle keeps its deadline.
    pub fn set_load_data_delay_ms(&mut self, delay_ms: u64) {
        self.options.load_data_delay_ms = delay_ms;
    }

    pub fn set_rubber_banding(&mut self, resistance_factor: f32, offset: f32) {
        self.options.rubber_banding_resistance_factor = resistance_factor;
        self.options.rubber_banding_offset = offset;
        self.buffer.set_rubber_banding(self.options.rubber_banding());
    }

    pub fn set_max_cache_size(&mut self, max_cache_size: usize) {
        self.options.max_cache_size = max_cache_size;
        self.cache.set_capacity(max_cache_size);
    }

    fn sync_enabled(&mut self) {
        let backward = self.options.backward_scroll_enabled && !self.current.is_minimum();
        self.buffer
            .set_forward_enabled(self.options.forward_scroll_enabled);
        self.buffer.set_backward_enabled(backward);
    }

    /// The window of the presented (center) page.
    pub fn current_window(&self) -> &CalendarWindow {
        &self.current
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.buffer.scroll_state()
    }

    pub fn presented(&self) -> &Page<C> {
        self.buffer.current_presented()
    }

    pub fn page_at(&self, position: SlotPosition) -> &Page<C> {
        self.buffer.at(position)
    }

    pub fn page_at_mut(&mut self, position: SlotPosition) -> &mut Page<C> {
        self.buffer.at_mut(position)
    }

    pub fn forward_neighbor(&self) -> Option<&Page<C>> {
        self.buffer.forward_neighbor()
    }

    pub fn backward_neighbor(&self) -> Option<&Page<C>> {
        self.buffer.backward_neighbor()
    }

    pub fn buffer(&self) -> &PaginationBuffer<Page<C>> {
        &self.buffer
    }

    pub fn cache(&self) -> &PageCache<C::Payload> {
        &self.cache
    }

    pub fn is_settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    pub fn settle_due_ms(&self) -> Option<u64> {
        self.settle.due_ms()
    }

    /// The page the pending settle will load, if any.
    pub fn settle_page(&self) -> Option<PageId> {
        self.settle.page()
    }

    /// A snapshot of what each slot currently holds, in Left, Center, Right order.
    pub fn slots(&self) -> [SlotSnapshot; 3] {
        SlotPosition::ALL.map(|position| {
            let page = self.buffer.at(position);
            SlotSnapshot {
                position,
                page: self.buffer.page_id_at(position),
                window: page.window().copied(),
                state: page.state(),
                should_fetch: page.should_fetch(),
            }
        })
    }

    /// A complete move in `direction`, as if a gesture started and committed.
    pub fn request_move(&mut self, direction: ScrollDirection, now_ms: u64) -> MoveOutcome {
        if let Err(MoveLocked { active }) = self.begin_move(direction) {
            return MoveOutcome::Locked { active };
        }
        self.end_move(true, now_ms)
    }

    /// Starts a gesture-driven move. The opposite direction is locked out until it ends.
    pub fn begin_move(&mut self, direction: ScrollDirection) -> Result<(), MoveLocked> {
        let res = self.buffer.begin_move(direction);
        ptrace!(direction = ?direction, locked = res.is_err(), "PagedNavigator::begin_move");
        res
    }

    /// Reports the dragged distance; returns the distance to display (resisted at a boundary).
    pub fn drag(&mut self, distance: f32) -> f32 {
        self.buffer.drag(distance)
    }

    /// Ends a gesture. When `commit` is set and the direction is enabled, the pages rotate.
    pub fn end_move(&mut self, commit: bool, now_ms: u64) -> MoveOutcome {
        let scroll = self.buffer.scroll_state();
        let plan = if commit && scroll.in_progress {
            self.plan_or_disable(scroll.direction)
        } else {
            None
        };
        let shift = self.buffer.finish_move(commit);
        self.apply_shift(shift, plan, now_ms)
    }

    /// Programmatic move, equivalent to a committed user move in `direction`.
    ///
    /// Any gesture in progress is cancelled first, including its rubber-band feedback.
    pub fn force_scroll(&mut self, direction: ScrollDirection, now_ms: u64) -> MoveOutcome {
        let plan = self.plan_or_disable(direction);
        let shift = self.buffer.force_scroll(direction);
        self.apply_shift(shift, plan, now_ms)
    }

    /// Computes the windows for a move in `direction`.
    ///
    /// If the move is enabled but the windows cannot be computed, the direction is disabled so
    /// the buffer degrades to rubber-banding instead of rotating.
    fn plan_or_disable(&mut self, direction: ScrollDirection) -> Option<MovePlan> {
        if !self.buffer.is_enabled(direction) {
            return None;
        }
        let plan = match direction {
            ScrollDirection::Forward => self.current.next().ok().map(|presented| MovePlan {
                presented,
                edge: presented.next().ok(),
            }),
            ScrollDirection::Backward => self.current.previous().ok().map(|presented| MovePlan {
                presented,
                edge: presented.previous().ok(),
            }),
        };
        if plan.is_none() {
            pwarn!(
                direction = ?direction,
                window = %self.current,
                "PagedNavigator: no adjacent window, disabling direction"
            );
            self.buffer.set_enabled(direction, false);
        }
        plan
    }

    fn apply_shift(&mut self, shift: Shift, plan: Option<MovePlan>, now_ms: u64) -> MoveOutcome {
        match shift {
            Shift::RubberBand { direction, offset } => {
                ptrace!(direction = ?direction, offset, "PagedNavigator: rubber band");
                MoveOutcome::RubberBand { direction, offset }
            }
            Shift::Cancelled { direction } => MoveOutcome::Cancelled { direction },
            Shift::Rotated {
                direction,
                recycled,
            } => {
                let Some(plan) = plan else {
                    debug_assert!(false, "rotated without a move plan");
                    self.buffer.rotate(direction.opposite());
                    return MoveOutcome::Cancelled { direction };
                };
                MoveOutcome::Moved(self.rebind_after_rotation(direction, recycled, plan, now_ms))
            }
        }
    }

    fn rebind_after_rotation(
        &mut self,
        direction: ScrollDirection,
        recycled: PageId,
        plan: MovePlan,
        now_ms: u64,
    ) -> PageChange {
        // The page we left was only transited through unless it already loaded.
        let vacated = SlotPosition::leading_edge(direction.opposite());
        self.buffer.at_mut(vacated).set_should_fetch(false);

        self.buffer
            .at_mut(SlotPosition::leading_edge(direction))
            .prepare_for_reuse(plan.edge);

        self.current = plan.presented;
        debug_assert_eq!(
            self.buffer.current_presented().window(),
            Some(&self.current)
        );
        self.sync_enabled();
        self.buffer.at_mut(SlotPosition::Center).did_appear();
        self.arm_settle(now_ms);

        let change = PageChange {
            direction,
            presented: self.buffer.page_id_at(SlotPosition::Center),
            reused: recycled,
            window: self.current,
        };
        pdebug!(
            direction = ?direction,
            presented = change.presented.index(),
            reused = change.reused.index(),
            window = %self.current,
            "PagedNavigator: moved"
        );
        self.notify(Some(&change));
        change
    }

    /// Cancels and reschedules the single settle timer for the presented page.
    fn arm_settle(&mut self, now_ms: u64) {
        let presented = self.buffer.page_id_at(SlotPosition::Center);
        self.settle
            .schedule(presented, now_ms, self.options.load_data_delay_ms);
    }

    fn notify(&self, change: Option<&PageChange>) {
        if let (Some(cb), Some(change)) = (&self.options.on_page_change, change) {
            cb(change);
        }
        if let Some(cb) = &self.options.on_window_change {
            cb(&self.current);
        }
    }

    /// Advances the settle timer.
    ///
    /// When motion has been quiet for `load_data_delay_ms`, the page the timer was armed for
    /// either loads from the cache or gets its `fetch_data` called, provided it should fetch and
    /// is still pending. Returns the number of fetches issued (0 or 1).
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let Some(settled) = self.settle.poll(now_ms) else {
            return 0;
        };
        let page = self.buffer.page_mut(settled);
        let window = match page.window() {
            Some(window) if page.wants_fetch() => *window,
            _ => {
                pdebug!(now_ms, page = settled.index(), "PagedNavigator: settled, nothing to load");
                return 0;
            }
        };
        if let Some(payload) = self.cache.get(&window) {
            ptrace!(page = settled.index(), window = %window, "PagedNavigator: cache hit");
            page.load_from_cache(payload);
            return 0;
        }
        let issued = usize::from(page.begin_fetch(settled).is_some());
        pdebug!(now_ms, page = settled.index(), window = %window, issued, "PagedNavigator: settled");
        issued
    }

    /// Hands a fetch result back to the page it was issued for.
    ///
    /// Results for pages that were rebound since the request are discarded. A failure leaves
    /// the page pending without arming the settle timer: it fetches again the next time a
    /// settle finds it presented (after `reload`, `reset_to`, or a move back onto it).
    pub fn complete_fetch<E>(
        &mut self,
        request: &FetchRequest,
        result: Result<C::Payload, E>,
    ) -> FetchCompletion<E> {
        let Some(position) = self.buffer.position_of(request.page) else {
            return FetchCompletion::Stale;
        };
        let page = self.buffer.at_mut(position);
        if !page.accepts(request) {
            ptrace!(
                page = request.page.index(),
                window = %request.window,
                "PagedNavigator: stale fetch dropped"
            );
            return FetchCompletion::Stale;
        }
        match result {
            Ok(payload) => {
                if let Some(cached) = page.finish_fetch(&payload) {
                    self.cache.insert(request.window, cached);
                }
                FetchCompletion::Applied
            }
            Err(err) => {
                pwarn!(
                    page = request.page.index(),
                    window = %request.window,
                    "PagedNavigator: fetch failed"
                );
                page.fail_fetch(position == SlotPosition::Center);
                FetchCompletion::Failed(err)
            }
        }
    }

    /// Forces the presented page to fetch again after the settle delay.
    ///
    /// The cached payload for the presented window is invalidated.
    pub fn reload(&mut self, now_ms: u64) {
        let window = self.current;
        self.cache.remove(&window);
        let page = self.buffer.at_mut(SlotPosition::Center);
        page.prepare_for_reuse(Some(window));
        page.did_appear();
        self.arm_settle(now_ms);
    }

    /// Rebinds all three pages around `window` without allocating containers.
    ///
    /// Useful for jumping to an arbitrary date (e.g. "today"). Any gesture in progress is
    /// cancelled.
    pub fn reset_to(&mut self, window: CalendarWindow, now_ms: u64) -> WindowResult<()> {
        let next = window.next()?;
        let previous = window.previous().ok();
        self.buffer.cancel_move();
        self.current = window;
        pdebug!(window = %window, "PagedNavigator::reset_to");
        self.bind_all(previous, next);
        self.arm_settle(now_ms);
        self.notify(None);
        Ok(())
    }
}

impl<C: PageContent> core::fmt::Debug for PagedNavigator<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagedNavigator")
            .field("current", &self.current)
            .field("scroll", &self.buffer.scroll_state())
            .field("settle", &self.settle)
            .field("cached", &self.cache.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
