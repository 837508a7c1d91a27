//! Typed callback registries with RAII unsubscription.
//!
//! Recognizers expose their notifications through [`Handlers`] lists instead
//! of a shared event bus: a consumer subscribes with a closure and holds the
//! returned [`Subscription`] for as long as it wants to be notified. Handlers
//! run in subscription order.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Handler<E> = Rc<dyn Fn(&E)>;

struct HandlersInner<E: 'static> {
    entries: RefCell<IndexMap<u64, Handler<E>>>,
    next_id: Cell<u64>,
}

/// An ordered list of subscribers for one notification type.
pub struct Handlers<E: 'static> {
    inner: Rc<HandlersInner<E>>,
}

impl<E> Handlers<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(HandlersInner {
                entries: RefCell::new(IndexMap::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Registers `handler`, returning the guard that keeps it registered.
    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .entries
            .borrow_mut()
            .insert(id, Rc::new(handler));
        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                // shift_remove keeps the remaining handlers in subscription order.
                inner.entries.borrow_mut().shift_remove(&id);
            }
        })
    }

    /// Calls every registered handler with `event`, in subscription order.
    ///
    /// The handler list is snapshotted first, so a handler may subscribe or
    /// unsubscribe (including itself) without disturbing the current emit.
    pub fn emit(&self, event: &E) {
        let handlers: SmallVec<[Handler<E>; 4]> =
            self.inner.entries.borrow().values().cloned().collect();
        for handler in handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.borrow().is_empty()
    }
}

impl<E> Clone for Handlers<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Default for Handlers<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for one registered handler.
///
/// Dropping the guard (or calling [`cancel`](Self::cancel)) removes the
/// handler; it outliving the [`Handlers`] list is fine, unsubscription then
/// becomes a no-op.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
