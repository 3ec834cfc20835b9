//! Single-pending-task slots: the debounce timer and the deferred frame task.
//!
//! Both keep at most one pending handle. Scheduling again voids the previous
//! handle, so the last scheduled task wins.

use std::time::Duration;

use crate::scheduler::{Scheduler, TaskHandle};

#[derive(Debug, Default)]
struct PendingSlot {
    pending: Option<TaskHandle>,
}

impl PendingSlot {
    fn replace<T>(&mut self, scheduler: &mut Scheduler<T>, handle: TaskHandle) {
        if let Some(previous) = self.pending.replace(handle) {
            scheduler.cancel(previous);
        }
    }

    fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        self.pending
            .take()
            .is_some_and(|handle| scheduler.cancel(handle))
    }

    fn settle(&mut self, handle: TaskHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// Restarting delay: every trigger cancels the pending timer and starts a fresh one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: PendingSlot,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: PendingSlot::default(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` after the delay, voiding any pending one.
    pub fn trigger<T>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> TaskHandle {
        let handle = scheduler.set_timeout(self.delay, task);
        self.slot.replace(scheduler, handle);
        handle
    }

    /// Cancels the pending timer. Returns true if one was pending.
    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        self.slot.cancel(scheduler)
    }

    /// Marks a fired timer as consumed. Returns false for a voided handle.
    pub fn settle(&mut self, handle: TaskHandle) -> bool {
        self.slot.settle(handle)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.pending.is_some()
    }
}

/// One-shot task deferred to the next frame opportunity.
#[derive(Debug, Default)]
pub struct FrameSlot {
    slot: PendingSlot,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` for the next frame, voiding any pending one.
    pub fn schedule<T>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> TaskHandle {
        let handle = scheduler.request_frame(task);
        self.slot.replace(scheduler, handle);
        handle
    }

    /// Cancels the pending task. Returns true if one was pending.
    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        self.slot.cancel(scheduler)
    }

    /// Marks a fired task as consumed. Returns false for a voided handle.
    pub fn settle(&mut self, handle: TaskHandle) -> bool {
        self.slot.settle(handle)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.pending.is_some()
    }
}
