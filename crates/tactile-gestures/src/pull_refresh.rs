//! Pull-to-refresh: drag down from the top of the content to request a
//! reload.
//!
//! The machine runs Idle → Pulling → Refreshing → Idle. A pull only arms
//! when the surface is scrolled exactly to the top and no refresh is in
//! flight. While pulling, finger travel is divided by a resistance factor
//! and clamped, progress notifications stream out, and the touch events are
//! consumed so the host holds the page still. Releasing past the threshold
//! triggers the caller's async refresh action; its outcome is deliberately
//! ignored (fire-and-forget). The indicator settles back regardless, and a
//! failure is only ever a log line. Callers that care layer their own error
//! handling inside the action.

use crate::constants::{PULL_MAX_DISTANCE_PX, PULL_RESISTANCE, PULL_SETTLE_MS, PULL_THRESHOLD_PX};
use crate::surface::TouchSurface;
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::callbacks::{Handlers, Subscription};
use tactile_core::input::{TouchEvent, TouchPhase, TouchSample};
use tactile_core::task::{ActionFuture, ActionTask};
use tactile_core::timer::TimerRegistration;

#[derive(Clone, Copy, Debug)]
pub struct PullConfig {
    /// Perceived distance at which release triggers a refresh.
    pub threshold_px: f32,
    /// Hard cap on the perceived distance.
    pub max_distance_px: f32,
    /// Divisor from raw finger travel to perceived distance.
    pub resistance: f32,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold_px: PULL_THRESHOLD_PX,
            max_distance_px: PULL_MAX_DISTANCE_PX,
            resistance: PULL_RESISTANCE,
        }
    }
}

impl PullConfig {
    pub fn with_threshold_px(mut self, threshold_px: f32) -> Self {
        self.threshold_px = threshold_px;
        self
    }

    pub fn with_max_distance_px(mut self, max_distance_px: f32) -> Self {
        self.max_distance_px = max_distance_px;
        self
    }

    pub fn with_resistance(mut self, resistance: f32) -> Self {
        self.resistance = resistance;
        self
    }
}

/// Live pull progress; streams while the finger drags downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullProgressEvent {
    /// Perceived distance after resistance and clamping.
    pub distance: f32,
    /// `distance / threshold`, saturated at 1.
    pub progress: f32,
}

/// A release crossed the threshold; the refresh action is about to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshEvent;

/// Snapshot of the machine for hosts rendering an indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullState {
    pub distance: f32,
    pub progress: f32,
    pub is_refreshing: bool,
}

enum PullPhase {
    Idle,
    Pulling { start_y: f32, distance: f32 },
    Refreshing,
}

struct SettleAnimation {
    from_offset: f32,
    start_ms: u64,
    duration_ms: u64,
}

impl SettleAnimation {
    fn offset_at(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.duration_ms {
            return 0.0;
        }
        let t = elapsed as f32 / self.duration_ms as f32;
        self.from_offset * (1.0 - ease_out_cubic(t))
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let inverse = 1.0 - t;
    1.0 - inverse * inverse * inverse
}

struct PullInner {
    phase: PullPhase,
    settle: Option<SettleAnimation>,
    settle_timer: Option<TimerRegistration>,
    task: Option<ActionTask>,
}

type RefreshAction = Rc<dyn Fn() -> ActionFuture<()>>;

struct PullShared {
    config: PullConfig,
    surface: TouchSurface,
    inner: RefCell<PullInner>,
    progress_handlers: Handlers<PullProgressEvent>,
    refresh_handlers: Handlers<RefreshEvent>,
    action: RefreshAction,
}

enum ReleaseDecision {
    Refresh,
    Settle { from_offset: f32 },
}

/// Pull-to-refresh recognizer bound to one [`TouchSurface`].
///
/// Dropping it detaches the surface listener, cancels the settle timer, and
/// cancels any in-flight refresh continuation.
pub struct PullToRefresh {
    state: Rc<PullShared>,
    _touch_subscription: Subscription,
}

impl PullToRefresh {
    /// Attaches to `surface`. `action` is invoked on every triggered
    /// refresh; its result is ignored by this layer.
    pub fn attach(
        surface: &TouchSurface,
        config: PullConfig,
        action: impl Fn() -> ActionFuture<()> + 'static,
    ) -> Self {
        let state = Rc::new(PullShared {
            config,
            surface: surface.clone(),
            inner: RefCell::new(PullInner {
                phase: PullPhase::Idle,
                settle: None,
                settle_timer: None,
                task: None,
            }),
            progress_handlers: Handlers::new(),
            refresh_handlers: Handlers::new(),
            action: Rc::new(action),
        });
        let touch_subscription = {
            let state = state.clone();
            surface.add_touch_listener(move |event| PullShared::handle_touch(&state, event))
        };
        Self {
            state,
            _touch_subscription: touch_subscription,
        }
    }

    pub fn config(&self) -> PullConfig {
        self.state.config
    }

    pub fn on_pull_progress(
        &self,
        handler: impl Fn(&PullProgressEvent) + 'static,
    ) -> Subscription {
        self.state.progress_handlers.subscribe(handler)
    }

    /// Fires once per triggered refresh, before the action runs.
    pub fn on_refresh(&self, handler: impl Fn(&RefreshEvent) + 'static) -> Subscription {
        self.state.refresh_handlers.subscribe(handler)
    }

    /// Current machine snapshot. While refreshing, the distance reads as the
    /// pinned threshold offset.
    pub fn state(&self) -> PullState {
        let threshold = self.state.config.threshold_px;
        let inner = self.state.inner.borrow();
        match inner.phase {
            PullPhase::Idle => PullState {
                distance: 0.0,
                progress: 0.0,
                is_refreshing: false,
            },
            PullPhase::Pulling { distance, .. } => PullState {
                distance,
                progress: (distance / threshold).min(1.0),
                is_refreshing: false,
            },
            PullPhase::Refreshing => PullState {
                distance: threshold,
                progress: 1.0,
                is_refreshing: true,
            },
        }
    }

    /// Visual indicator offset for the host to render: the live pull
    /// distance, the pinned threshold while refreshing, or the settle
    /// animation's current value on the way back to 0.
    pub fn offset(&self) -> f32 {
        let now_ms = self.state.surface.now_ms();
        let inner = self.state.inner.borrow();
        match inner.phase {
            PullPhase::Pulling { distance, .. } => distance,
            PullPhase::Refreshing => self.state.config.threshold_px,
            PullPhase::Idle => inner
                .settle
                .as_ref()
                .map(|settle| settle.offset_at(now_ms))
                .unwrap_or(0.0),
        }
    }
}

impl PullShared {
    fn handle_touch(state: &Rc<Self>, event: &TouchEvent) {
        match event.phase {
            TouchPhase::Start => {
                if let Some(sample) = event.primary() {
                    state.on_start(*sample);
                }
            }
            TouchPhase::Move => {
                if let Some(sample) = event.primary() {
                    state.on_move(event, *sample);
                }
            }
            // A release needs no contact data; hosts commonly deliver the
            // final end with an empty contact list.
            TouchPhase::End => Self::on_end(state),
        }
    }

    fn on_start(&self, sample: TouchSample) {
        let mut inner = self.inner.borrow_mut();
        if matches!(inner.phase, PullPhase::Refreshing) {
            return;
        }
        // The top-of-content gate is evaluated once, at the start of the
        // sequence; while pulling, consumed moves keep the page from
        // scrolling anyway.
        if !self.surface.scroll_metrics().at_top() {
            inner.phase = PullPhase::Idle;
            return;
        }
        inner.phase = PullPhase::Pulling {
            start_y: sample.position.y,
            distance: 0.0,
        };
        // A new pull takes over any settle animation still running.
        inner.settle = None;
        inner.settle_timer = None;
    }

    fn on_move(&self, event: &TouchEvent, sample: TouchSample) {
        let progress_event = {
            let mut inner = self.inner.borrow_mut();
            match &mut inner.phase {
                PullPhase::Pulling { start_y, distance } => {
                    let raw = (sample.position.y - *start_y) / self.config.resistance;
                    let clamped = raw.max(0.0).min(self.config.max_distance_px);
                    *distance = clamped;
                    if raw > 0.0 {
                        Some(PullProgressEvent {
                            distance: clamped,
                            progress: (clamped / self.config.threshold_px).min(1.0),
                        })
                    } else {
                        // Dragging upward from the origin: nothing to show,
                        // and the host keeps its native scroll.
                        None
                    }
                }
                _ => None,
            }
        };
        if let Some(progress) = progress_event {
            event.consume();
            self.progress_handlers.emit(&progress);
        }
    }

    fn on_end(state: &Rc<Self>) {
        let decision = {
            let mut inner = state.inner.borrow_mut();
            match inner.phase {
                PullPhase::Pulling { distance, .. } => {
                    if distance <= 0.0 {
                        // No-op pull: snap straight back, no animation.
                        inner.phase = PullPhase::Idle;
                        inner.settle = None;
                        inner.settle_timer = None;
                        None
                    } else if distance >= state.config.threshold_px {
                        inner.phase = PullPhase::Refreshing;
                        Some(ReleaseDecision::Refresh)
                    } else {
                        inner.phase = PullPhase::Idle;
                        Some(ReleaseDecision::Settle {
                            from_offset: distance,
                        })
                    }
                }
                _ => None,
            }
        };
        match decision {
            Some(ReleaseDecision::Refresh) => {
                log::trace!("pull released past threshold; refreshing");
                state.refresh_handlers.emit(&RefreshEvent);
                Self::spawn_refresh(state);
            }
            Some(ReleaseDecision::Settle { from_offset }) => {
                Self::begin_settle(state, from_offset);
            }
            None => {}
        }
    }

    fn spawn_refresh(state: &Rc<Self>) {
        let future = (state.action)();
        let weak = Rc::downgrade(state);
        let task = ActionTask::spawn(async move {
            if let Err(error) = future.await {
                log::debug!("refresh action failed; resetting anyway: {error}");
            }
            if let Some(state) = weak.upgrade() {
                Self::finish_refresh(&state);
            }
        });
        state.inner.borrow_mut().task = Some(task);
    }

    fn finish_refresh(state: &Rc<Self>) {
        {
            let mut inner = state.inner.borrow_mut();
            if !matches!(inner.phase, PullPhase::Refreshing) {
                return;
            }
            inner.phase = PullPhase::Idle;
        }
        Self::begin_settle(state, state.config.threshold_px);
    }

    fn begin_settle(state: &Rc<Self>, from_offset: f32) {
        let start_ms = state.surface.now_ms();
        let weak = Rc::downgrade(state);
        let registration = state
            .surface
            .timers()
            .schedule_after(PULL_SETTLE_MS, move |_| {
                if let Some(state) = weak.upgrade() {
                    let mut inner = state.inner.borrow_mut();
                    inner.settle = None;
                    inner.settle_timer = None;
                }
            });
        let mut inner = state.inner.borrow_mut();
        inner.settle = Some(SettleAnimation {
            from_offset,
            start_ms,
            duration_ms: PULL_SETTLE_MS,
        });
        inner.settle_timer = Some(registration);
    }
}
