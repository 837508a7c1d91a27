//! Single-threaded executor for caller-supplied async actions.
//!
//! Refresh and load-more actions complete asynchronously; the state machine
//! that invoked one suspends its own transition (never the thread) until the
//! action settles. Tasks live in a thread-local registry keyed by id so the
//! waker stays `Send` while all task state remains `!Send`; waking re-polls
//! synchronously on the spot.

use futures_task::{waker, ArcWake};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::Context;

/// Outcome of a caller-supplied action. The gesture layer swallows the error
/// arm; it exists so callers can write ordinary fallible futures.
pub type ActionResult<T> = Result<T, Box<dyn Error>>;

/// Boxed local future returned by a caller-supplied action.
pub type ActionFuture<T> = Pin<Box<dyn Future<Output = ActionResult<T>>>>;

type TaskFuture = Pin<Box<dyn Future<Output = ()>>>;

thread_local! {
    static ACTION_TASKS: RefCell<FxHashMap<u64, Rc<ActionTaskInner>>> =
        RefCell::new(FxHashMap::default());
}

/// Handle to a spawned action continuation.
///
/// Dropping the handle cancels the task: the stored future is released and
/// late wakes become no-ops. A recognizer torn down mid-action therefore
/// never runs the action's continuation.
pub struct ActionTask {
    id: u64,
    inner: Rc<ActionTaskInner>,
}

impl ActionTask {
    /// Spawns `future` and polls it once immediately, so an already-ready
    /// action settles synchronously inside the dispatch that spawned it.
    pub fn spawn(future: impl Future<Output = ()> + 'static) -> Self {
        static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
        let inner = Rc::new(ActionTaskInner::new(Box::pin(future)));
        ACTION_TASKS.with(|registry| {
            registry.borrow_mut().insert(id, inner.clone());
        });
        let task = Self { id, inner };
        task.inner.poll(task.id);
        task
    }

    /// True once the future has completed (or the task was cancelled).
    pub fn is_settled(&self) -> bool {
        self.inner.future.borrow().is_none()
    }
}

impl Drop for ActionTask {
    fn drop(&mut self) {
        self.inner.cancel();
        ACTION_TASKS.with(|registry| {
            registry.borrow_mut().remove(&self.id);
        });
    }
}

struct ActionTaskInner {
    future: RefCell<Option<TaskFuture>>,
    is_polling: Cell<bool>,
    needs_poll: Cell<bool>,
}

impl ActionTaskInner {
    fn new(future: TaskFuture) -> Self {
        Self {
            future: RefCell::new(Some(future)),
            is_polling: Cell::new(false),
            needs_poll: Cell::new(false),
        }
    }

    fn cancel(&self) {
        self.future.borrow_mut().take();
    }

    fn request_poll(&self, task_id: u64) {
        if self.is_polling.get() {
            self.needs_poll.set(true);
        } else {
            self.poll(task_id);
        }
    }

    fn poll(&self, task_id: u64) {
        if self.is_polling.replace(true) {
            self.needs_poll.set(true);
            return;
        }
        loop {
            self.needs_poll.set(false);
            let waker = waker(Arc::new(ActionTaskWaker { task_id }));
            let mut cx = Context::from_waker(&waker);
            let mut future_slot = self.future.borrow_mut();
            if let Some(future) = future_slot.as_mut() {
                let poll_result = future.as_mut().poll(&mut cx);
                if poll_result.is_ready() {
                    future_slot.take();
                }
            }
            drop(future_slot);
            if !self.needs_poll.get() {
                break;
            }
        }
        self.is_polling.set(false);
    }
}

struct ActionTaskWaker {
    task_id: u64,
}

impl ArcWake for ActionTaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        // The registry borrow is held while the task polls (scrutinee
        // temporaries live to the end of the if-let), so nothing reachable
        // from a poll may touch ACTION_TASKS. Task handles are only created
        // and dropped from host dispatch, never from inside a continuation.
        ACTION_TASKS.with(|registry| {
            if let Some(task) = registry.borrow().get(&arc_self.task_id).cloned() {
                task.request_poll(arc_self.task_id);
            }
        });
    }
}
