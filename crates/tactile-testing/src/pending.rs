//! Manually settled action futures for in-flight async assertions.

use std::cell::RefCell;
use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use tactile_core::task::{ActionFuture, ActionResult};

struct PendingState<T> {
    outcome: Option<ActionResult<T>>,
    waker: Option<Waker>,
}

/// Controller for one action future that settles only when told to.
///
/// Lets a test trigger a gesture, observe the machine in its in-flight state
/// (Refreshing, Loading), and then resolve or fail the action to watch the
/// transition complete.
pub struct PendingAction<T> {
    state: Rc<RefCell<PendingState<T>>>,
}

impl<T: 'static> PendingAction<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(PendingState {
                outcome: None,
                waker: None,
            })),
        }
    }

    /// The future to hand to a recognizer action. One settlement feeds one
    /// future; create a fresh controller per triggered cycle.
    pub fn future(&self) -> ActionFuture<T> {
        Box::pin(PendingFuture {
            state: self.state.clone(),
        })
    }

    /// Settles the future successfully and wakes its task.
    pub fn resolve(&self, value: T) {
        self.settle(Ok(value));
    }

    /// Settles the future with an error and wakes its task.
    pub fn fail(&self, error: impl Into<Box<dyn Error>>) {
        self.settle(Err(error.into()));
    }

    fn settle(&self, outcome: ActionResult<T>) {
        let waker = {
            let mut state = self.state.borrow_mut();
            state.outcome = Some(outcome);
            state.waker.take()
        };
        // Wake outside the borrow: the task polls synchronously from here.
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// True while a spawned future has polled and not yet settled.
    pub fn is_awaited(&self) -> bool {
        let state = self.state.borrow();
        state.waker.is_some() && state.outcome.is_none()
    }
}

impl<T: 'static> Default for PendingAction<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: clones share the controller regardless of `T: Clone`.
impl<T> Clone for PendingAction<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

struct PendingFuture<T> {
    state: Rc<RefCell<PendingState<T>>>,
}

impl<T> Future for PendingFuture<T> {
    type Output = ActionResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        match state.outcome.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                state.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
