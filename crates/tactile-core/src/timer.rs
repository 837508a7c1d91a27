//! Deadline timers over a host-pumped millisecond clock.
//!
//! Nothing in this workspace sleeps or spawns threads. The host owns time: it
//! stamps the events it dispatches and pumps [`TimerQueue::advance_to`] when
//! quiet. Timers fire during the advance, each observing the clock at its own
//! deadline, which makes throttle windows and settle animations fully
//! deterministic under synthetic time.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct TimerId(u64);

/// Heap key: earliest deadline first, ties in schedule order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimerSlot {
    deadline_ms: u64,
    seq: u64,
    id: TimerId,
}

type TimerCallback = Box<dyn FnOnce(u64)>;

struct TimerQueueInner {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<TimerSlot>>,
    // Cancellation removes the callback and leaves the heap slot behind;
    // popping a slot with no callback is a skip.
    callbacks: FxHashMap<TimerId, TimerCallback>,
}

/// One-shot timers ordered by deadline, sharing a monotonic ms clock.
#[derive(Clone)]
pub struct TimerQueue {
    inner: Rc<RefCell<TimerQueueInner>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimerQueueInner {
                now_ms: 0,
                next_id: 1,
                next_seq: 1,
                heap: BinaryHeap::new(),
                callbacks: FxHashMap::default(),
            })),
        }
    }

    /// Current clock reading. Only advances, never rewinds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Schedules `callback` to fire once the clock reaches `deadline_ms`.
    ///
    /// A deadline already in the past is clamped to the current clock and
    /// fires on the next advance. The callback receives the clock value at
    /// fire time (its own deadline).
    pub fn schedule_at(
        &self,
        deadline_ms: u64,
        callback: impl FnOnce(u64) + 'static,
    ) -> TimerRegistration {
        let mut inner = self.inner.borrow_mut();
        let deadline_ms = deadline_ms.max(inner.now_ms);
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.heap.push(Reverse(TimerSlot {
            deadline_ms,
            seq,
            id,
        }));
        inner.callbacks.insert(id, Box::new(callback));
        log::trace!("timer {:?} scheduled for t={}ms", id, deadline_ms);
        TimerRegistration {
            queue: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Schedules `callback` to fire `delay_ms` after the current clock.
    pub fn schedule_after(
        &self,
        delay_ms: u64,
        callback: impl FnOnce(u64) + 'static,
    ) -> TimerRegistration {
        let deadline = self.now_ms().saturating_add(delay_ms);
        self.schedule_at(deadline, callback)
    }

    /// Moves the clock to `now_ms`, firing every due timer on the way.
    ///
    /// Timers fire in deadline order (ties in schedule order) with the clock
    /// set to their own deadline. Callbacks may schedule and cancel freely; a
    /// timer scheduled at or before `now_ms` from inside a callback fires
    /// within the same advance.
    pub fn advance_to(&self, now_ms: u64) {
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let target = now_ms.max(inner.now_ms);
                let slot = match inner.heap.peek() {
                    Some(Reverse(slot)) if slot.deadline_ms <= target => *slot,
                    _ => {
                        inner.now_ms = target;
                        return;
                    }
                };
                inner.heap.pop();
                if slot.deadline_ms > inner.now_ms {
                    inner.now_ms = slot.deadline_ms;
                }
                inner
                    .callbacks
                    .remove(&slot.id)
                    .map(|callback| (slot.deadline_ms, callback))
            };
            // Borrow released: the callback may reenter the queue.
            if let Some((deadline_ms, callback)) = due {
                callback(deadline_ms);
            }
        }
    }

    /// Count of scheduled-but-unfired timers.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for one scheduled timer; cancels on `Drop`.
///
/// Cancelling after the timer fired, or after the queue itself is gone, is a
/// no-op.
pub struct TimerRegistration {
    queue: Weak<RefCell<TimerQueueInner>>,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(queue) = self.queue.upgrade() {
                if queue.borrow_mut().callbacks.remove(&id).is_some() {
                    log::trace!("timer {:?} cancelled", id);
                }
            }
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}
