use datepager::{
    CalendarWindow, FetchCompletion, FetchRequest, MoveLocked, MoveOutcome, NavigatorError,
    NavigatorOptions, PageContent, PagedNavigator, ScrollDirection, SlotPosition, WindowResult,
};

use crate::{Easing, HeaderFormat, HeaderModel, Tween};

#[derive(Clone, Copy, Debug)]
struct Drag {
    direction: ScrollDirection,
    displayed: f32,
}

fn sign(direction: ScrollDirection) -> f32 {
    match direction {
        ScrollDirection::Forward => 1.0,
        ScrollDirection::Backward => -1.0,
    }
}

/// A framework-neutral controller that wraps a [`PagedNavigator`] and provides the common
/// adapter workflows: turning drag gestures into moves, animating pages back to rest, and
/// keeping a [`HeaderModel`] in sync.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_drag_start` / `on_drag` / `on_drag_end` when gesture events occur
/// - `scroll` for button taps or other programmatic navigation
/// - `tick(now_ms)` each frame/timer tick (for the settle tween and the fetch debounce)
///
/// The presentation offset is signed: positive means the strip is displaced in the forward
/// direction. At rest it is `0.0`.
pub struct Controller<C: PageContent> {
    nav: PagedNavigator<C>,
    header: HeaderModel,
    page_extent: f32,
    commit_fraction: f32,
    settle_duration_ms: u64,
    easing: Easing,
    drag: Option<Drag>,
    tween: Option<Tween>,
    offset: f32,
}

impl<C: PageContent> Controller<C> {
    pub fn new(
        window: CalendarWindow,
        options: NavigatorOptions,
        header: HeaderFormat,
        factory: impl FnMut(SlotPosition) -> C,
    ) -> Result<Self, NavigatorError> {
        let header = HeaderModel::new(header)?;
        let nav = PagedNavigator::new(window, options, factory)?;
        Ok(Self::from_parts(nav, header))
    }

    pub fn from_parts(nav: PagedNavigator<C>, header: HeaderModel) -> Self {
        let mut c = Self {
            nav,
            header,
            page_extent: 320.0,
            commit_fraction: 0.5,
            settle_duration_ms: 250,
            easing: Easing::default(),
            drag: None,
            tween: None,
            offset: 0.0,
        };
        c.refresh_header();
        c
    }

    pub fn navigator(&self) -> &PagedNavigator<C> {
        &self.nav
    }

    /// Direct access to the navigator. Call [`Controller::refresh_header`] after changing
    /// scroll flags through it.
    pub fn navigator_mut(&mut self) -> &mut PagedNavigator<C> {
        &mut self.nav
    }

    pub fn into_navigator(self) -> PagedNavigator<C> {
        self.nav
    }

    pub fn header(&self) -> &HeaderModel {
        &self.header
    }

    /// The size of one page along the paging axis.
    pub fn page_extent(&self) -> f32 {
        self.page_extent
    }

    pub fn set_page_extent(&mut self, page_extent: f32) {
        self.page_extent = page_extent.max(1.0);
    }

    /// Fraction of `page_extent` a drag must cover to commit. Clamped to `0..=1`.
    pub fn commit_fraction(&self) -> f32 {
        self.commit_fraction
    }

    pub fn set_commit_fraction(&mut self, commit_fraction: f32) {
        self.commit_fraction = commit_fraction.clamp(0.0, 1.0);
    }

    pub fn set_settle_animation(&mut self, duration_ms: u64, easing: Easing) {
        self.settle_duration_ms = duration_ms;
        self.easing = easing;
    }

    /// The current presentation offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Stops the settle tween where it is.
    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Re-renders the header from the presented window and the current scroll flags.
    pub fn refresh_header(&mut self) {
        let window = *self.nav.current_window();
        if let Err(_err) = self.header.update_with(&window) {
            awarn!(error = %_err, window = %window, "Controller: header update failed");
        }
        self.header.set_scroll_state(&self.nav.scroll_state());
    }

    /// A gesture started moving in `direction`. Interrupts any settle tween.
    pub fn on_drag_start(&mut self, direction: ScrollDirection) -> Result<(), MoveLocked> {
        self.nav.begin_move(direction)?;
        self.cancel_animation();
        if self.drag.is_none() {
            self.drag = Some(Drag {
                direction,
                displayed: 0.0,
            });
        }
        Ok(())
    }

    /// Reports the total distance dragged along the gesture direction.
    ///
    /// Returns the presentation offset to display, resisted when the direction is disabled.
    pub fn on_drag(&mut self, distance: f32) -> f32 {
        let Some(drag) = &mut self.drag else {
            return self.offset;
        };
        let displayed = self.nav.drag(distance.max(0.0)).min(self.page_extent);
        drag.displayed = displayed;
        self.offset = sign(drag.direction) * displayed;
        self.offset
    }

    /// The gesture was released. Commits the move if it covered enough of a page, then animates
    /// the strip back to rest.
    pub fn on_drag_end(&mut self, now_ms: u64) -> MoveOutcome {
        let Some(drag) = self.drag.take() else {
            return MoveOutcome::Cancelled {
                direction: self.nav.scroll_state().direction,
            };
        };
        let commit = drag.displayed >= self.page_extent * self.commit_fraction;
        atrace!(
            direction = ?drag.direction,
            displayed = drag.displayed,
            commit,
            "Controller::on_drag_end"
        );
        let outcome = self.nav.end_move(commit, now_ms);
        self.settle(&outcome, now_ms);
        outcome
    }

    /// Pages in `direction` as if a drag had committed, abandoning any gesture in progress.
    pub fn scroll(&mut self, direction: ScrollDirection, now_ms: u64) -> MoveOutcome {
        self.drag = None;
        self.cancel_animation();
        let outcome = self.nav.force_scroll(direction, now_ms);
        self.settle(&outcome, now_ms);
        outcome
    }

    /// Rebinds the navigator around `window` and snaps to rest.
    pub fn jump_to(&mut self, window: CalendarWindow, now_ms: u64) -> WindowResult<()> {
        self.nav.reset_to(window, now_ms)?;
        self.drag = None;
        self.tween = None;
        self.offset = 0.0;
        self.refresh_header();
        Ok(())
    }

    fn settle(&mut self, outcome: &MoveOutcome, now_ms: u64) {
        let from = match outcome {
            // The new center page is still one page minus the dragged distance away.
            MoveOutcome::Moved(change) => self.offset - sign(change.direction) * self.page_extent,
            MoveOutcome::RubberBand { direction, offset } if self.offset == 0.0 => {
                sign(*direction) * *offset
            }
            _ => self.offset,
        };
        self.refresh_header();

        self.offset = from;
        self.tween = (from != 0.0).then(|| {
            Tween::new(from, 0.0, now_ms, self.settle_duration_ms, self.easing)
        });
    }

    /// Advances the controller.
    ///
    /// Always advances the navigator's fetch debounce. If a settle tween is active, also updates
    /// the presentation offset and returns it.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.nav.tick(now_ms);
        let tween = self.tween?;

        self.offset = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
            self.offset = tween.to;
        }
        Some(self.offset)
    }

    /// Hands a fetch result back to the navigator.
    pub fn complete_fetch<E>(
        &mut self,
        request: &FetchRequest,
        result: Result<C::Payload, E>,
    ) -> FetchCompletion<E> {
        self.nav.complete_fetch(request, result)
    }
}

impl<C: PageContent> core::fmt::Debug for Controller<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("nav", &self.nav)
            .field("header", &self.header)
            .field("page_extent", &self.page_extent)
            .field("commit_fraction", &self.commit_fraction)
            .field("offset", &self.offset)
            .field("tween", &self.tween)
            .finish_non_exhaustive()
    }
}
