//! Rate limiters over the timer queue.
//!
//! [`Throttle`] is trailing-edge: the first call in a burst schedules one
//! fire a full window later and keeps that burst's callback; calls landing
//! inside the window are coalesced away. [`Debounce`] is the opposite: every
//! call re-arms the deadline, so only the last callback of a burst runs.

use crate::timer::{TimerQueue, TimerRegistration};
use std::cell::Cell;
use std::rc::Rc;

/// Trailing-edge rate limiter: at most one fire per window.
pub struct Throttle {
    window_ms: u64,
    armed: Rc<Cell<bool>>,
    registration: Option<TimerRegistration>,
}

impl Throttle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            armed: Rc::new(Cell::new(false)),
            registration: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// True while a fire is scheduled and not yet delivered.
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Requests a fire. The first call of a burst wins; while armed,
    /// further calls are dropped.
    pub fn call(&mut self, timers: &TimerQueue, callback: impl FnOnce(u64) + 'static) {
        if self.armed.get() {
            return;
        }
        self.armed.set(true);
        let armed = self.armed.clone();
        self.registration = Some(timers.schedule_after(self.window_ms, move |at| {
            armed.set(false);
            callback(at);
        }));
    }

    /// Drops the pending fire, if any, and disarms.
    pub fn cancel(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.armed.set(false);
    }
}

/// Re-arming rate limiter: only the last call of a burst runs.
pub struct Debounce {
    delay_ms: u64,
    registration: Option<TimerRegistration>,
}

impl Debounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            registration: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedules `callback` a full delay from now, discarding any
    /// previously pending one.
    pub fn call(&mut self, timers: &TimerQueue, callback: impl FnOnce(u64) + 'static) {
        if let Some(previous) = self.registration.take() {
            previous.cancel();
        }
        self.registration = Some(timers.schedule_after(self.delay_ms, callback));
    }

    /// Drops the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_throttle_coalesces_a_burst() {
        let timers = TimerQueue::new();
        let mut throttle = Throttle::new(200);
        let fired = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let fired = fired.clone();
            throttle.call(&timers, move |at| fired.borrow_mut().push((label, at)));
        }
        assert!(throttle.is_armed());

        timers.advance_to(1_000);
        assert_eq!(
            *fired.borrow(),
            vec![("first", 200)],
            "a burst must fire once, with the first call's callback"
        );
        assert!(!throttle.is_armed());
    }

    #[test]
    fn test_throttle_rearms_after_fire() {
        let timers = TimerQueue::new();
        let mut throttle = Throttle::new(200);
        let fired = Rc::new(RefCell::new(Vec::new()));

        {
            let fired = fired.clone();
            throttle.call(&timers, move |at| fired.borrow_mut().push(at));
        }
        timers.advance_to(250);
        {
            let fired = fired.clone();
            throttle.call(&timers, move |at| fired.borrow_mut().push(at));
        }
        timers.advance_to(1_000);

        assert_eq!(*fired.borrow(), vec![200, 450]);
    }

    #[test]
    fn test_throttle_cancel() {
        let timers = TimerQueue::new();
        let mut throttle = Throttle::new(200);
        let fired = Rc::new(RefCell::new(Vec::new()));

        {
            let fired = fired.clone();
            throttle.call(&timers, move |at| fired.borrow_mut().push(at));
        }
        throttle.cancel();
        timers.advance_to(1_000);

        assert!(fired.borrow().is_empty());
        assert!(!throttle.is_armed(), "cancel must disarm");
    }

    #[test]
    fn test_debounce_keeps_only_last_call() {
        let timers = TimerQueue::new();
        let mut debounce = Debounce::new(300);
        let fired = Rc::new(RefCell::new(Vec::new()));

        for (label, at) in [("first", 0), ("second", 100), ("third", 200)] {
            timers.advance_to(at);
            let fired = fired.clone();
            debounce.call(&timers, move |at| fired.borrow_mut().push((label, at)));
        }
        timers.advance_to(1_000);

        assert_eq!(
            *fired.borrow(),
            vec![("third", 500)],
            "each call must re-arm the deadline from its own time"
        );
    }

    #[test]
    fn test_debounce_cancel() {
        let timers = TimerQueue::new();
        let mut debounce = Debounce::new(300);
        let fired = Rc::new(RefCell::new(Vec::new()));

        {
            let fired = fired.clone();
            debounce.call(&timers, move |at| fired.borrow_mut().push(at));
        }
        debounce.cancel();
        timers.advance_to(1_000);

        assert!(fired.borrow().is_empty());
    }
}
