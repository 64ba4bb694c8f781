use crate::PageId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingSettle {
    page: PageId,
    due_ms: u64,
}

/// A single cancellable settle timer, driven by the adapter's clock.
///
/// Scheduling always replaces the pending timer, so at most one is ever armed. Cancelling is
/// idempotent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettleTimer {
    pending: Option<PendingSettle>,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer for `page`, cancelling whatever was pending.
    pub fn schedule(&mut self, page: PageId, now_ms: u64, delay_ms: u64) {
        ptrace!(
            page = page.index(),
            now_ms,
            delay_ms,
            superseded = self.pending.is_some(),
            "SettleTimer::schedule"
        );
        self.pending = Some(PendingSettle {
            page,
            due_ms: now_ms.saturating_add(delay_ms),
        });
    }

    /// Returns `true` if a timer was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.pending.map(|p| p.due_ms)
    }

    pub fn page(&self) -> Option<PageId> {
        self.pending.map(|p| p.page)
    }

    /// Fires the timer if it is due at `now_ms`. A fired timer is disarmed.
    pub fn poll(&mut self, now_ms: u64) -> Option<PageId> {
        let pending = self.pending?;
        if now_ms < pending.due_ms {
            return None;
        }
        self.pending = None;
        Some(pending.page)
    }
}
