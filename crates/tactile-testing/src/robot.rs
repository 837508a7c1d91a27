//! Robot-style synthetic input for gesture tests.
//!
//! The robot plays the role of the host: it stamps events with its own
//! monotonic clock, pushes them into a [`TouchSurface`], and advances time
//! to let throttles and animations run. No real input source is involved,
//! so every test is deterministic.
//!
//! # Example
//!
//! ```
//! use tactile_testing::robot::GestureRobot;
//!
//! let robot = GestureRobot::new();
//! // Attach recognizers to robot.surface(), then:
//! robot.tap_at(100.0, 200.0);
//! robot.advance_time(500);
//! ```

use std::cell::Cell;
use tactile_core::geometry::Point;
use tactile_core::input::{ScrollMetrics, TouchEvent, TouchPhase, TouchSample};
use tactile_gestures::surface::TouchSurface;

/// Drives a [`TouchSurface`] with synthetic touches, scrolls, and time.
pub struct GestureRobot {
    surface: TouchSurface,
    now_ms: Cell<u64>,
    position: Cell<Point>,
}

impl GestureRobot {
    /// Robot with a fresh surface, clock at zero.
    pub fn new() -> Self {
        Self::with_surface(TouchSurface::new())
    }

    /// Robot driving an existing surface; adopts the surface's clock.
    pub fn with_surface(surface: TouchSurface) -> Self {
        let now_ms = surface.now_ms();
        Self {
            surface,
            now_ms: Cell::new(now_ms),
            position: Cell::new(Point::ZERO),
        }
    }

    /// The surface under test; attach recognizers to this.
    pub fn surface(&self) -> &TouchSurface {
        &self.surface
    }

    /// Robot clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Moves the clock forward and pumps due timers.
    pub fn advance_time(&self, delta_ms: u64) {
        let now_ms = self.now_ms.get().saturating_add(delta_ms);
        self.now_ms.set(now_ms);
        self.surface.advance_to(now_ms);
    }

    /// Presses one finger down at the given coordinates.
    pub fn press_at(&self, x: f32, y: f32) {
        let position = Point::new(x, y);
        self.position.set(position);
        self.dispatch(TouchPhase::Start, position);
    }

    /// Moves the pressed finger. Returns true if a recognizer consumed the
    /// move (the signal a host uses to suppress its native scroll).
    pub fn move_to(&self, x: f32, y: f32) -> bool {
        let position = Point::new(x, y);
        self.position.set(position);
        self.dispatch(TouchPhase::Move, position)
    }

    /// Lifts the finger at its current position.
    pub fn release(&self) {
        let position = self.position.get();
        self.dispatch(TouchPhase::End, position);
    }

    /// Lifts the finger at explicit coordinates (ends can land away from
    /// the last reported move).
    pub fn release_at(&self, x: f32, y: f32) {
        let position = Point::new(x, y);
        self.position.set(position);
        self.dispatch(TouchPhase::End, position);
    }

    /// Quick press-and-release at one spot, with a short dwell.
    pub fn tap_at(&self, x: f32, y: f32) {
        self.press_at(x, y);
        self.advance_time(50);
        self.release();
    }

    /// Smooth drag from one point to another over `duration_ms`, then
    /// release. Moves in ten interpolated steps.
    pub fn swipe(&self, from: Point, to: Point, duration_ms: u64) {
        self.press_at(from.x, from.y);
        let steps = 10;
        let step_ms = duration_ms / steps;
        for i in 1..=steps {
            self.advance_time(step_ms);
            let t = i as f32 / steps as f32;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            self.move_to(x, y);
        }
        self.release();
    }

    /// Pushes new scroll geometry as a scroll event at the current time.
    pub fn scroll(&self, scroll_top: f32, scroll_height: f32, client_height: f32) {
        self.surface.dispatch_scroll(
            ScrollMetrics::new(scroll_top, scroll_height, client_height),
            self.now_ms.get(),
        );
    }

    /// Sets scroll geometry quietly, without a scroll event.
    pub fn set_scroll_metrics(&self, scroll_top: f32, scroll_height: f32, client_height: f32) {
        self.surface
            .set_scroll_metrics(ScrollMetrics::new(scroll_top, scroll_height, client_height));
    }

    fn dispatch(&self, phase: TouchPhase, position: Point) -> bool {
        let event = TouchEvent::single(phase, TouchSample::new(position, self.now_ms.get()));
        self.surface.dispatch_touch(&event);
        event.is_consumed()
    }
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}
