use crate::{CalendarWindow, FetchRequest, LifecycleState, PageId};

/// The content provider living inside each page container.
///
/// The navigator drives these hooks; implementers own the actual data retrieval and the
/// presentation of whatever they fetched.
pub trait PageContent {
    /// The opaque data a page shows (and what gets cached per window).
    type Payload: Clone;

    /// Starts retrieving data for `request.window`.
    ///
    /// Called only after the settle debounce. The result must be handed back, on the same
    /// execution context, through [`crate::PagedNavigator::complete_fetch`] with the same
    /// `request`.
    fn fetch_data(&mut self, request: &FetchRequest);

    /// Shows `payload`, either freshly fetched or restored from the cache.
    fn populate(&mut self, payload: &Self::Payload);

    /// Drops whatever is currently shown.
    fn clear_content(&mut self);

    /// The value to cache for the current window once loaded. `None` skips caching.
    fn object_to_be_cached(&self) -> Option<Self::Payload> {
        None
    }

    /// The page was rebound to `window`, presented or not.
    fn prepare_for_reuse(&mut self, _window: &CalendarWindow) {}

    /// The page became the presented (center) page.
    fn page_did_appear(&mut self, _window: &CalendarWindow) {}
}

/// One of the three page containers owned by the buffer.
#[derive(Clone, Debug)]
pub struct Page<C> {
    window: Option<CalendarWindow>,
    state: LifecycleState,
    should_fetch: bool,
    generation: u64,
    in_flight: Option<u64>,
    content: C,
}

impl<C: PageContent> Page<C> {
    pub(crate) fn new(content: C) -> Self {
        Self {
            window: None,
            state: LifecycleState::PendingLoad,
            should_fetch: false,
            generation: 0,
            in_flight: None,
            content,
        }
    }

    pub fn window(&self) -> Option<&CalendarWindow> {
        self.window.as_ref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LifecycleState::Loaded
    }

    pub fn should_fetch(&self) -> bool {
        self.should_fetch
    }

    /// Whether a fetch for the current binding is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight == Some(self.generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Rebinds the page to `window` (or to nothing, past the minimum date).
    ///
    /// Clears content, resets to `PendingLoad` and invalidates any outstanding fetch.
    pub(crate) fn prepare_for_reuse(&mut self, window: Option<CalendarWindow>) {
        self.generation = self.generation.wrapping_add(1);
        self.window = window;
        self.state = LifecycleState::PendingLoad;
        self.should_fetch = false;
        self.in_flight = None;
        self.content.clear_content();
        if let Some(window) = &self.window {
            self.content.prepare_for_reuse(window);
        }
    }

    pub(crate) fn did_appear(&mut self) {
        self.should_fetch = self.window.is_some() && self.state == LifecycleState::PendingLoad;
        if let Some(window) = &self.window {
            self.content.page_did_appear(window);
        }
    }

    pub(crate) fn set_should_fetch(&mut self, should_fetch: bool) {
        self.should_fetch = should_fetch && self.window.is_some();
    }

    pub(crate) fn wants_fetch(&self) -> bool {
        self.should_fetch && self.state == LifecycleState::PendingLoad && !self.is_fetching()
    }

    pub(crate) fn load_from_cache(&mut self, payload: &C::Payload) {
        self.content.populate(payload);
        self.state = LifecycleState::Loaded;
        self.should_fetch = false;
    }

    /// Issues a fetch for the current binding. Returns `None` when unbound.
    pub(crate) fn begin_fetch(&mut self, page: PageId) -> Option<FetchRequest> {
        let window = self.window?;
        let request = FetchRequest {
            page,
            window,
            generation: self.generation,
        };
        self.in_flight = Some(self.generation);
        self.should_fetch = false;
        self.content.fetch_data(&request);
        Some(request)
    }

    pub(crate) fn accepts(&self, request: &FetchRequest) -> bool {
        self.in_flight == Some(request.generation)
            && request.generation == self.generation
            && self.window.as_ref() == Some(&request.window)
    }

    /// Applies a fetched payload and returns what should be cached for this window.
    pub(crate) fn finish_fetch(&mut self, payload: &C::Payload) -> Option<C::Payload> {
        self.in_flight = None;
        self.content.populate(payload);
        self.state = LifecycleState::Loaded;
        self.content.object_to_be_cached()
    }

    /// Leaves the page pending; `retry` keeps it eligible for the next settle.
    pub(crate) fn fail_fetch(&mut self, retry: bool) {
        self.in_flight = None;
        self.should_fetch = retry;
    }
}
