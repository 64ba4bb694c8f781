use std::num::NonZeroUsize;

use lru::LruCache;

use crate::CalendarWindow;

/// A bounded least-recently-used cache of page payloads keyed by window.
///
/// A capacity of zero disables caching.
#[derive(Debug)]
pub struct PageCache<T> {
    // `None` while the capacity is zero.
    entries: Option<LruCache<CalendarWindow, T>>,
}

impl<T> PageCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.as_ref().map_or(0, |c| c.cap().get())
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, window: &CalendarWindow) -> bool {
        self.entries.as_ref().is_some_and(|c| c.contains(window))
    }

    /// Shrinks (or grows) the cache, evicting the oldest entries as needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        let Some(cap) = NonZeroUsize::new(capacity) else {
            ptrace!(dropped = self.len(), "PageCache: disabled");
            self.entries = None;
            return;
        };
        match &mut self.entries {
            Some(entries) => entries.resize(cap),
            None => self.entries = Some(LruCache::new(cap)),
        }
    }

    /// Looks up `window` and marks it as most recently used.
    pub fn get(&mut self, window: &CalendarWindow) -> Option<&T> {
        self.entries.as_mut()?.get(window)
    }

    pub fn insert(&mut self, window: CalendarWindow, value: T) {
        let Some(entries) = &mut self.entries else {
            return;
        };
        // `push` hands back the displaced entry: the old value of `window`, or the evicted one.
        match entries.push(window, value) {
            Some((evicted, _)) if evicted != window => {
                ptrace!(window = %evicted, "PageCache: evicted");
            }
            _ => {}
        }
    }

    pub fn remove(&mut self, window: &CalendarWindow) -> Option<T> {
        self.entries.as_mut()?.pop(window)
    }

    pub fn clear(&mut self) {
        if let Some(entries) = &mut self.entries {
            entries.clear();
        }
    }

    /// Iterates over cached windows from least to most recently used.
    pub fn windows(&self) -> impl Iterator<Item = &CalendarWindow> {
        self.entries
            .iter()
            .flat_map(|entries| entries.iter().rev().map(|(window, _)| window))
    }
}

impl<T> Default for PageCache<T> {
    fn default() -> Self {
        Self::new(0)
    }
}
