//! Virtual clock with cancellable timers and an animation-frame queue.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle of a scheduled task. Cancelling it is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Single-threaded task scheduler driven by the runtime tick.
///
/// Timers fire once the clock reaches their deadline. Frame tasks fire at
/// the next frame opportunity, in request order.
#[derive(Debug)]
pub struct Scheduler<T> {
    /// Time since the scheduler was created
    now: Duration,
    next_id: u64,
    /// Pending timers ordered by (deadline, id)
    timers: BTreeMap<(Duration, u64), T>,
    /// Timer id -> deadline, for cancellation
    deadlines: HashMap<u64, Duration>,
    /// Tasks waiting for the next frame
    frame_queue: Vec<(TaskHandle, T)>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: BTreeMap::new(),
            deadlines: HashMap::new(),
            frame_queue: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }

    /// Schedules a task to fire `delay` after the current time.
    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = self.next_handle();
        let deadline = self.now + delay;
        self.timers.insert((deadline, handle.0), task);
        self.deadlines.insert(handle.0, deadline);
        handle
    }

    /// Schedules a task for the next frame opportunity.
    pub fn request_frame(&mut self, task: T) -> TaskHandle {
        let handle = self.next_handle();
        self.frame_queue.push((handle, task));
        handle
    }

    /// Cancels a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if let Some(deadline) = self.deadlines.remove(&handle.0) {
            return self.timers.remove(&(deadline, handle.0)).is_some();
        }
        let before = self.frame_queue.len();
        self.frame_queue.retain(|(queued, _)| *queued != handle);
        self.frame_queue.len() != before
    }

    /// Advances the clock and returns expired timers in deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TaskHandle, T)> {
        self.now += elapsed;
        let mut due = Vec::new();
        while let Some(entry) = self.timers.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let ((_, id), task) = entry.remove_entry();
            self.deadlines.remove(&id);
            due.push((TaskHandle(id), task));
        }
        due
    }

    /// Takes every task queued for this frame.
    pub fn take_frame(&mut self) -> Vec<(TaskHandle, T)> {
        std::mem::take(&mut self.frame_queue)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frame_queue.len()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
