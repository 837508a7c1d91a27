//! Infinite scroll: load more content as the viewport nears the bottom.
//!
//! Scroll events are rate-limited by a trailing-edge throttle; each window
//! ends with one evaluation against the surface's current geometry. When the
//! remaining distance to the bottom is within the threshold, the machine
//! goes Ready → Loading, notifies, and runs the caller's async load action.
//! The action answers whether more data exists: `Ok(false)` parks the
//! machine in Finished, terminal until [`InfiniteScroll::reset`], while
//! `Ok(true)` or a failure (swallowed, logged) returns it to Ready.

use crate::constants::{LOAD_MORE_THRESHOLD_PX, SCROLL_THROTTLE_MS};
use crate::surface::TouchSurface;
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::callbacks::{Handlers, Subscription};
use tactile_core::task::{ActionFuture, ActionResult, ActionTask};
use tactile_core::timing::Throttle;

#[derive(Clone, Copy, Debug)]
pub struct InfiniteScrollConfig {
    /// Distance from the content bottom at which loading triggers
    /// (inclusive).
    pub threshold_px: f32,
    /// Trailing-edge throttle window for scroll evaluation.
    pub throttle_ms: u64,
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self {
            threshold_px: LOAD_MORE_THRESHOLD_PX,
            throttle_ms: SCROLL_THROTTLE_MS,
        }
    }
}

impl InfiniteScrollConfig {
    pub fn with_threshold_px(mut self, threshold_px: f32) -> Self {
        self.threshold_px = threshold_px;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }
}

/// The machine went Ready → Loading; the load action is about to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadMoreEvent;

/// Snapshot of the loading flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadState {
    pub is_loading: bool,
    pub is_finished: bool,
}

struct ScrollInner {
    is_loading: bool,
    is_finished: bool,
    throttle: Throttle,
    task: Option<ActionTask>,
}

type LoadMoreAction = Rc<dyn Fn() -> ActionFuture<bool>>;

struct ScrollShared {
    config: InfiniteScrollConfig,
    surface: TouchSurface,
    inner: RefCell<ScrollInner>,
    load_more_handlers: Handlers<LoadMoreEvent>,
    action: LoadMoreAction,
}

/// Infinite-scroll trigger bound to one [`TouchSurface`].
///
/// Dropping it detaches the scroll listener, cancels a pending throttled
/// evaluation, and cancels any in-flight load continuation.
pub struct InfiniteScroll {
    state: Rc<ScrollShared>,
    _scroll_subscription: Subscription,
}

impl InfiniteScroll {
    /// Attaches to `surface`. `action` loads the next page and resolves to
    /// `false` when the data source is exhausted.
    pub fn attach(
        surface: &TouchSurface,
        config: InfiniteScrollConfig,
        action: impl Fn() -> ActionFuture<bool> + 'static,
    ) -> Self {
        let state = Rc::new(ScrollShared {
            config,
            surface: surface.clone(),
            inner: RefCell::new(ScrollInner {
                is_loading: false,
                is_finished: false,
                throttle: Throttle::new(config.throttle_ms),
                task: None,
            }),
            load_more_handlers: Handlers::new(),
            action: Rc::new(action),
        });
        let scroll_subscription = {
            let state = state.clone();
            surface.add_scroll_listener(move |_| ScrollShared::handle_scroll(&state))
        };
        Self {
            state,
            _scroll_subscription: scroll_subscription,
        }
    }

    pub fn config(&self) -> InfiniteScrollConfig {
        self.state.config
    }

    /// Fires on every Ready → Loading transition, before the action runs.
    pub fn on_load_more(&self, handler: impl Fn(&LoadMoreEvent) + 'static) -> Subscription {
        self.state.load_more_handlers.subscribe(handler)
    }

    pub fn state(&self) -> LoadState {
        let inner = self.state.inner.borrow();
        LoadState {
            is_loading: inner.is_loading,
            is_finished: inner.is_finished,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.inner.borrow().is_loading
    }

    pub fn is_finished(&self) -> bool {
        self.state.inner.borrow().is_finished
    }

    /// Clears both flags back to Ready; the only exit from Finished.
    ///
    /// A load still in flight when this is called will apply its outcome to
    /// the cleared flags once it settles, so a stale "no more data" answer
    /// can re-finish the machine.
    pub fn reset(&self) {
        let mut inner = self.state.inner.borrow_mut();
        inner.is_loading = false;
        inner.is_finished = false;
        log::trace!("infinite scroll reset to ready");
    }
}

impl ScrollShared {
    fn handle_scroll(state: &Rc<Self>) {
        // First event of a burst arms the window; the rest coalesce. The
        // evaluation reads the surface geometry current at fire time, not
        // the geometry that armed it.
        let weak = Rc::downgrade(state);
        let timers = state.surface.timers().clone();
        state.inner.borrow_mut().throttle.call(&timers, move |_| {
            if let Some(state) = weak.upgrade() {
                Self::evaluate(&state);
            }
        });
    }

    fn evaluate(state: &Rc<Self>) {
        let metrics = state.surface.scroll_metrics();
        let triggered = {
            let mut inner = state.inner.borrow_mut();
            if inner.is_loading || inner.is_finished {
                false
            } else if metrics.distance_to_bottom() <= state.config.threshold_px {
                inner.is_loading = true;
                true
            } else {
                false
            }
        };
        if triggered {
            log::trace!(
                "within {:.1}px of bottom; loading more",
                metrics.distance_to_bottom()
            );
            state.load_more_handlers.emit(&LoadMoreEvent);
            Self::spawn_load(state);
        }
    }

    fn spawn_load(state: &Rc<Self>) {
        let future = (state.action)();
        let weak = Rc::downgrade(state);
        let task = ActionTask::spawn(async move {
            let outcome = future.await;
            if let Some(state) = weak.upgrade() {
                state.finish_load(outcome);
            }
        });
        state.inner.borrow_mut().task = Some(task);
    }

    fn finish_load(&self, outcome: ActionResult<bool>) {
        let mut inner = self.inner.borrow_mut();
        inner.is_loading = false;
        match outcome {
            Ok(false) => {
                inner.is_finished = true;
                log::trace!("data source exhausted; load-more finished");
            }
            Ok(true) => {}
            Err(error) => {
                log::debug!("load-more action failed; staying ready: {error}");
            }
        }
    }
}
