//! Raw input types delivered by the host surface.
//!
//! A host (or test robot) translates its native touch/scroll notifications
//! into these types and pushes them into the gesture layer. Only the first
//! contact of a multi-touch event is ever interpreted; the remaining samples
//! are carried for completeness but ignored by the recognizers.

use crate::geometry::Point;
use smallvec::SmallVec;
use std::cell::Cell;

/// Phase of a touch event within one gesture sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// One contact position at one moment, in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub position: Point,
    pub timestamp_ms: u64,
}

impl TouchSample {
    pub const fn new(position: Point, timestamp_ms: u64) -> Self {
        Self {
            position,
            timestamp_ms,
        }
    }
}

/// A touch event as delivered by the host.
///
/// `touches` may legitimately be empty: some platforms deliver empty contact
/// lists during multi-touch releases. Recognizers treat such events as no-ops
/// rather than errors.
#[derive(Debug)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: SmallVec<[TouchSample; 2]>,
    consumed: Cell<bool>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: impl IntoIterator<Item = TouchSample>) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
            consumed: Cell::new(false),
        }
    }

    /// Single-contact event, the common case for every gesture in this crate.
    pub fn single(phase: TouchPhase, sample: TouchSample) -> Self {
        Self::new(phase, [sample])
    }

    /// The tracked contact: the first sample, if any.
    pub fn primary(&self) -> Option<&TouchSample> {
        self.touches.first()
    }

    /// Latest sample timestamp; `None` for an empty contact list.
    pub fn timestamp_ms(&self) -> Option<u64> {
        self.touches.iter().map(|sample| sample.timestamp_ms).max()
    }

    /// Marks the event as handled by a recognizer.
    ///
    /// A consumed move event tells the host to suppress its native scroll
    /// response for that move, the way pull-to-refresh holds the page still
    /// while the indicator is pulled down.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

/// Vertical scroll geometry of the host surface.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top of the content.
    pub scroll_top: f32,
    /// Total content height.
    pub scroll_height: f32,
    /// Visible viewport height.
    pub client_height: f32,
}

impl ScrollMetrics {
    pub const fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Remaining scrollable content below the viewport.
    pub fn distance_to_bottom(&self) -> f32 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    /// True when the content is scrolled exactly to the top.
    pub fn at_top(&self) -> bool {
        self.scroll_top == 0.0
    }
}
