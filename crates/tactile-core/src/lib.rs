//! Core primitives for the tactile gesture-interpretation engine: input
//! types, callback registries, host-pumped timers, and the local executor
//! that runs caller-supplied async actions.

pub mod callbacks;
pub mod clock;
pub mod geometry;
pub mod input;
pub mod task;
pub mod timer;
pub mod timing;

// Re-export commonly used items
pub use callbacks::{Handlers, Subscription};
pub use clock::HostClock;
pub use geometry::Point;
pub use input::{ScrollMetrics, TouchEvent, TouchPhase, TouchSample};
pub use task::{ActionFuture, ActionResult, ActionTask};
pub use timer::{TimerQueue, TimerRegistration};
pub use timing::{Debounce, Throttle};

pub mod prelude {
    pub use crate::callbacks::{Handlers, Subscription};
    pub use crate::clock::HostClock;
    pub use crate::geometry::Point;
    pub use crate::input::{ScrollMetrics, TouchEvent, TouchPhase, TouchSample};
    pub use crate::task::{ActionFuture, ActionResult, ActionTask};
    pub use crate::timer::{TimerQueue, TimerRegistration};
    pub use crate::timing::{Debounce, Throttle};
}
