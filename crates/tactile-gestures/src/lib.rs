//! Touch-gesture interpretation: tap/swipe, pull-to-refresh, and
//! infinite-scroll recognizers over a host-fed event surface.
//!
//! Each recognizer is an independent state machine attached to a
//! [`TouchSurface`]; they never talk to each other and compose freely on the
//! same surface. Consumers subscribe to typed notifications and hold the
//! returned [`Subscription`] guards; dropping a recognizer detaches it and
//! silences it completely.

pub mod constants;
pub mod infinite_scroll;
pub mod pull_refresh;
pub mod surface;
pub mod tap_swipe;

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod surface_tests;

// Re-export commonly used items
pub use infinite_scroll::{InfiniteScroll, InfiniteScrollConfig, LoadMoreEvent, LoadState};
pub use pull_refresh::{PullConfig, PullProgressEvent, PullState, PullToRefresh, RefreshEvent};
pub use surface::TouchSurface;
pub use tap_swipe::{
    SwipeDirection, SwipeEvent, TapEvent, TapSwipeConfig, TapSwipeRecognizer, TouchEndEvent,
    TouchMoveEvent, TouchStartEvent,
};
pub use tactile_core::callbacks::Subscription;

pub mod prelude {
    pub use crate::constants::*;
    pub use crate::infinite_scroll::{InfiniteScroll, InfiniteScrollConfig, LoadMoreEvent, LoadState};
    pub use crate::pull_refresh::{
        PullConfig, PullProgressEvent, PullState, PullToRefresh, RefreshEvent,
    };
    pub use crate::surface::TouchSurface;
    pub use crate::tap_swipe::{
        SwipeDirection, SwipeEvent, TapEvent, TapSwipeConfig, TapSwipeRecognizer, TouchEndEvent,
        TouchMoveEvent, TouchStartEvent,
    };
    pub use tactile_core::prelude::*;
}
