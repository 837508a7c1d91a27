//! Tap and swipe classification for single-finger touch sequences.
//!
//! One sequence runs from touch-start to touch-end. The recognizer echoes the
//! raw stream (start, moves, end) to its own listeners, then classifies the
//! finished sequence: a quick motionless sequence is a tap, a long enough
//! displacement on either axis is a swipe. The two conditions are independent
//! by contract, but a tap requires that no move was seen, so in practice at
//! most one of them fires per sequence.

use crate::constants::{SWIPE_THRESHOLD_PX, TAP_TIMEOUT_MS};
use crate::surface::TouchSurface;
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::callbacks::{Handlers, Subscription};
use tactile_core::geometry::Point;
use tactile_core::input::{TouchEvent, TouchPhase, TouchSample};

#[derive(Clone, Copy, Debug)]
pub struct TapSwipeConfig {
    /// Axis displacement beyond which a sequence classifies as a swipe.
    pub threshold_px: f32,
    /// Press-to-release time below which a motionless sequence is a tap.
    pub timeout_ms: u64,
}

impl Default for TapSwipeConfig {
    fn default() -> Self {
        Self {
            threshold_px: SWIPE_THRESHOLD_PX,
            timeout_ms: TAP_TIMEOUT_MS,
        }
    }
}

impl TapSwipeConfig {
    pub fn with_threshold_px(mut self, threshold_px: f32) -> Self {
        self.threshold_px = threshold_px;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Raw sequence start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchStartEvent {
    pub position: Point,
    pub timestamp_ms: u64,
}

/// Raw move with live deltas against the sequence origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchMoveEvent {
    pub position: Point,
    pub delta_x: f32,
    pub delta_y: f32,
}

/// Raw sequence end, emitted before any classification for this sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEndEvent {
    pub position: Point,
    pub delta_x: f32,
    pub delta_y: f32,
    pub elapsed_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeEvent {
    pub direction: SwipeDirection,
    pub delta_x: f32,
    pub delta_y: f32,
    /// Straight-line displacement, `sqrt(delta_x² + delta_y²)`.
    pub distance: f32,
}

struct TouchSession {
    origin: TouchSample,
    moved: bool,
}

struct TapSwipeState {
    config: TapSwipeConfig,
    session: RefCell<Option<TouchSession>>,
    touch_start: Handlers<TouchStartEvent>,
    touch_move: Handlers<TouchMoveEvent>,
    touch_end: Handlers<TouchEndEvent>,
    tap: Handlers<TapEvent>,
    swipe: Handlers<SwipeEvent>,
    // Swipe listeners filtered by direction; emitted after the generic swipe.
    directional: Handlers<SwipeEvent>,
}

/// Detects taps and linear swipes on a [`TouchSurface`].
///
/// Dropping the recognizer detaches it: the surface listener is removed and
/// no further notifications fire.
pub struct TapSwipeRecognizer {
    state: Rc<TapSwipeState>,
    _touch_subscription: Subscription,
}

impl TapSwipeRecognizer {
    pub fn attach(surface: &TouchSurface, config: TapSwipeConfig) -> Self {
        let state = Rc::new(TapSwipeState {
            config,
            session: RefCell::new(None),
            touch_start: Handlers::new(),
            touch_move: Handlers::new(),
            touch_end: Handlers::new(),
            tap: Handlers::new(),
            swipe: Handlers::new(),
            directional: Handlers::new(),
        });
        let touch_subscription = {
            let state = state.clone();
            surface.add_touch_listener(move |event| state.handle_touch(event))
        };
        Self {
            state,
            _touch_subscription: touch_subscription,
        }
    }

    pub fn config(&self) -> TapSwipeConfig {
        self.state.config
    }

    pub fn on_touch_start(
        &self,
        handler: impl Fn(&TouchStartEvent) + 'static,
    ) -> Subscription {
        self.state.touch_start.subscribe(handler)
    }

    pub fn on_touch_move(&self, handler: impl Fn(&TouchMoveEvent) + 'static) -> Subscription {
        self.state.touch_move.subscribe(handler)
    }

    pub fn on_touch_end(&self, handler: impl Fn(&TouchEndEvent) + 'static) -> Subscription {
        self.state.touch_end.subscribe(handler)
    }

    pub fn on_tap(&self, handler: impl Fn(&TapEvent) + 'static) -> Subscription {
        self.state.tap.subscribe(handler)
    }

    pub fn on_swipe(&self, handler: impl Fn(&SwipeEvent) + 'static) -> Subscription {
        self.state.swipe.subscribe(handler)
    }

    /// Subscribes to swipes in one direction only.
    ///
    /// Directional handlers run after the generic [`on_swipe`](Self::on_swipe)
    /// handlers for the same sequence.
    pub fn on_swipe_direction(
        &self,
        direction: SwipeDirection,
        handler: impl Fn(&SwipeEvent) + 'static,
    ) -> Subscription {
        self.state.directional.subscribe(move |event| {
            if event.direction == direction {
                handler(event);
            }
        })
    }
}

impl TapSwipeState {
    fn handle_touch(&self, event: &TouchEvent) {
        // Hosts may deliver empty contact lists during multi-touch releases;
        // such events carry nothing classifiable and are skipped.
        let sample = match event.primary() {
            Some(sample) => *sample,
            None => return,
        };
        match event.phase {
            TouchPhase::Start => self.on_start(sample),
            TouchPhase::Move => self.on_move(sample),
            TouchPhase::End => self.on_end(sample),
        }
    }

    fn on_start(&self, sample: TouchSample) {
        // A fresh start replaces whatever came before, so a sequence whose
        // end was never delivered cannot poison the next one.
        *self.session.borrow_mut() = Some(TouchSession {
            origin: sample,
            moved: false,
        });
        self.touch_start.emit(&TouchStartEvent {
            position: sample.position,
            timestamp_ms: sample.timestamp_ms,
        });
    }

    fn on_move(&self, sample: TouchSample) {
        let origin = {
            let mut session = self.session.borrow_mut();
            match session.as_mut() {
                Some(session) => {
                    // Any move disqualifies a tap, including a zero-delta one.
                    session.moved = true;
                    session.origin
                }
                None => return,
            }
        };
        let delta = sample.position - origin.position;
        self.touch_move.emit(&TouchMoveEvent {
            position: sample.position,
            delta_x: delta.x,
            delta_y: delta.y,
        });
    }

    fn on_end(&self, sample: TouchSample) {
        let session = match self.session.borrow_mut().take() {
            Some(session) => session,
            None => return,
        };
        let delta = sample.position - session.origin.position;
        let elapsed_ms = sample.timestamp_ms.saturating_sub(session.origin.timestamp_ms);

        // Raw end first; classification events follow for the same sequence.
        self.touch_end.emit(&TouchEndEvent {
            position: sample.position,
            delta_x: delta.x,
            delta_y: delta.y,
            elapsed_ms,
        });

        if !session.moved && elapsed_ms < self.config.timeout_ms {
            self.tap.emit(&TapEvent {
                position: sample.position,
            });
        }

        if delta.x.abs() > self.config.threshold_px || delta.y.abs() > self.config.threshold_px {
            let direction = if delta.x.abs() > delta.y.abs() {
                if delta.x > 0.0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                }
            } else {
                // Equal magnitudes resolve vertically: the horizontal arm
                // requires strictly more displacement.
                if delta.y > 0.0 {
                    SwipeDirection::Down
                } else {
                    SwipeDirection::Up
                }
            };
            let swipe = SwipeEvent {
                direction,
                delta_x: delta.x,
                delta_y: delta.y,
                distance: delta.magnitude(),
            };
            log::trace!("swipe {:?} over {:.1}px", direction, swipe.distance);
            self.swipe.emit(&swipe);
            self.directional.emit(&swipe);
        }
    }
}
