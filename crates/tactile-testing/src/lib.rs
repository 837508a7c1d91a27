//! Testing utilities for tactile: a synthetic-input robot, a notification
//! recorder, and manually settled action futures.

pub mod pending;
pub mod recorder;
pub mod robot;

// Re-export testing utilities
pub use pending::PendingAction;
pub use recorder::NotificationLog;
pub use robot::GestureRobot;

pub mod prelude {
    pub use crate::pending::PendingAction;
    pub use crate::recorder::NotificationLog;
    pub use crate::robot::GestureRobot;
}
