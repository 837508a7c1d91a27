//! The host-facing event surface recognizers attach to.
//!
//! `TouchSurface` stands in for the scrollable element of the original
//! design: the host pushes touch and scroll events into it, recognizers
//! listen on it, and it carries the shared timer queue plus the latest
//! scroll geometry. Dispatch advances the clock first, so timers whose
//! deadline falls before an incoming event fire before that event is seen,
//! exactly as they would have under real time.

use std::cell::Cell;
use std::rc::Rc;
use tactile_core::callbacks::{Handlers, Subscription};
use tactile_core::input::{ScrollMetrics, TouchEvent};
use tactile_core::timer::TimerQueue;

struct SurfaceInner {
    timers: TimerQueue,
    metrics: Cell<ScrollMetrics>,
    touch_handlers: Handlers<TouchEvent>,
    scroll_handlers: Handlers<ScrollMetrics>,
}

/// One gesture surface: an event fan-out point plus clock and scroll state.
///
/// Clones share the same surface.
#[derive(Clone)]
pub struct TouchSurface {
    inner: Rc<SurfaceInner>,
}

impl TouchSurface {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SurfaceInner {
                timers: TimerQueue::new(),
                metrics: Cell::new(ScrollMetrics::default()),
                touch_handlers: Handlers::new(),
                scroll_handlers: Handlers::new(),
            }),
        }
    }

    /// Delivers a touch event to every touch listener in registration order.
    ///
    /// The clock advances to the event's timestamp first (firing any timers
    /// due on the way). After dispatch the host inspects
    /// [`TouchEvent::is_consumed`] to decide whether to suppress its native
    /// scroll response for this event.
    pub fn dispatch_touch(&self, event: &TouchEvent) {
        if let Some(timestamp_ms) = event.timestamp_ms() {
            self.inner.timers.advance_to(timestamp_ms);
        }
        self.inner.touch_handlers.emit(event);
    }

    /// Records new scroll geometry and notifies scroll listeners.
    ///
    /// Timers due before `timestamp_ms` fire before the metrics update, so a
    /// pending throttled evaluation observes the geometry that was current
    /// at its own deadline.
    pub fn dispatch_scroll(&self, metrics: ScrollMetrics, timestamp_ms: u64) {
        self.inner.timers.advance_to(timestamp_ms);
        self.inner.metrics.set(metrics);
        self.inner.scroll_handlers.emit(&metrics);
    }

    /// Replaces the scroll geometry without notifying anyone.
    ///
    /// Hosts call this once at attach time (and after programmatic layout
    /// changes) so recognizers reading [`scroll_metrics`](Self::scroll_metrics)
    /// see real geometry before the first scroll event arrives.
    pub fn set_scroll_metrics(&self, metrics: ScrollMetrics) {
        self.inner.metrics.set(metrics);
    }

    /// Latest scroll geometry pushed by the host.
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        self.inner.metrics.get()
    }

    /// Runs timers due at or before `now_ms`; the quiet-time pump.
    pub fn advance_to(&self, now_ms: u64) {
        self.inner.timers.advance_to(now_ms);
    }

    /// Current surface clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.timers.now_ms()
    }

    /// The timer queue shared by everything attached to this surface.
    pub fn timers(&self) -> &TimerQueue {
        &self.inner.timers
    }

    pub fn add_touch_listener(
        &self,
        listener: impl Fn(&TouchEvent) + 'static,
    ) -> Subscription {
        self.inner.touch_handlers.subscribe(listener)
    }

    pub fn add_scroll_listener(
        &self,
        listener: impl Fn(&ScrollMetrics) + 'static,
    ) -> Subscription {
        self.inner.scroll_handlers.subscribe(listener)
    }
}

impl Default for TouchSurface {
    fn default() -> Self {
        Self::new()
    }
}
