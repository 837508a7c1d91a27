//! Shared notification log for asserting emission order and counts.

use std::cell::RefCell;
use std::rc::Rc;

/// Cloneable label log; every clone appends to the same list.
///
/// Subscribe closures push a label per notification, then the test asserts
/// on the recorded order:
///
/// ```
/// use tactile_testing::recorder::NotificationLog;
///
/// let log = NotificationLog::new();
/// let log_for_handler = log.clone();
/// let handler = move || log_for_handler.push("tap");
/// handler();
/// assert_eq!(log.take(), vec!["tap"]);
/// ```
#[derive(Clone, Default)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: impl Into<String>) {
        self.entries.borrow_mut().push(label.into());
    }

    /// Copies the recorded labels, leaving them in place.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Drains and returns the recorded labels.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    /// How many recorded labels equal `label`.
    pub fn count_of(&self, label: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.as_str() == label)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
