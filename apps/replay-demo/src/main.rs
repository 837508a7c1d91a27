//! Replays a scripted touch/scroll session through every recognizer and
//! narrates what they make of it. Doubles as a worked example of the host
//! integration contract: build events, dispatch them, honor consumption,
//! and pump the surface clock during quiet stretches.

use anyhow::Context;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_core::clock::HostClock;
use tactile_core::geometry::Point;
use tactile_core::input::{ScrollMetrics, TouchEvent, TouchPhase, TouchSample};
use tactile_gestures::constants::SCROLL_THROTTLE_MS;
use tactile_gestures::{
    InfiniteScroll, InfiniteScrollConfig, PullConfig, PullToRefresh, TapSwipeConfig,
    TapSwipeRecognizer, TouchSurface,
};

const ROW_HEIGHT_PX: f32 = 48.0;
const VIEWPORT_HEIGHT_PX: f32 = 600.0;
const PAGE_SIZE: usize = 20;

/// A paged item feed standing in for real content behind the surface.
struct Feed {
    total_pages: usize,
    items: RefCell<Vec<String>>,
    pages_remaining: Cell<usize>,
}

impl Feed {
    fn new(total_pages: usize) -> Self {
        Self {
            total_pages,
            items: RefCell::new(Vec::new()),
            pages_remaining: Cell::new(total_pages),
        }
    }

    /// Appends the next page; answers whether more remain after it.
    fn append_page(&self) -> bool {
        let remaining = self.pages_remaining.get();
        if remaining == 0 {
            return false;
        }
        self.pages_remaining.set(remaining - 1);
        let mut items = self.items.borrow_mut();
        let start = items.len();
        for i in start..start + PAGE_SIZE {
            items.push(format!("item {}", i + 1));
        }
        remaining > 1
    }

    /// Rewinds to a fresh first page, as a refresh would.
    fn reload(&self) {
        self.items.borrow_mut().clear();
        self.pages_remaining.set(self.total_pages);
        self.append_page();
    }

    fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn content_height(&self) -> f32 {
        self.len() as f32 * ROW_HEIGHT_PX
    }
}

/// The host side of the integration: owns the surface, stamps events with
/// its clock, and reports consumption the way a scroll container would.
struct ReplayHost {
    surface: TouchSurface,
    now_ms: Cell<u64>,
}

impl ReplayHost {
    fn new() -> Self {
        Self {
            surface: TouchSurface::new(),
            now_ms: Cell::new(0),
        }
    }

    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Lets `delta_ms` of quiet time pass, firing any due timers.
    fn idle(&self, delta_ms: u64) {
        let now = self.now_ms.get() + delta_ms;
        self.now_ms.set(now);
        self.surface.advance_to(now);
    }

    fn touch(&self, phase: TouchPhase, x: f32, y: f32) -> bool {
        let sample = TouchSample::new(Point::new(x, y), self.now_ms.get());
        let event = TouchEvent::single(phase, sample);
        self.surface.dispatch_touch(&event);
        event.is_consumed()
    }

    /// Full press-drag-release sequence; true if any move was consumed.
    fn drag(&self, from: Point, to: Point, steps: u32, step_ms: u64) -> bool {
        self.touch(TouchPhase::Start, from.x, from.y);
        let mut any_consumed = false;
        for i in 1..=steps {
            self.idle(step_ms);
            let t = i as f32 / steps as f32;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            any_consumed |= self.touch(TouchPhase::Move, x, y);
        }
        self.touch(TouchPhase::End, to.x, to.y);
        any_consumed
    }

    fn scroll_to(&self, scroll_top: f32, content_height: f32) {
        self.surface.dispatch_scroll(
            ScrollMetrics::new(scroll_top, content_height, VIEWPORT_HEIGHT_PX),
            self.now_ms.get(),
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let pages = match std::env::args().nth(1) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("page count must be a number, got {raw:?}"))?,
        None => 3,
    };

    println!("=== Tactile Gesture Replay ===");
    println!("Dispatching a scripted touch session to watch:");
    println!("  - tap and swipe classification");
    println!("  - a full pull-to-refresh cycle, settle animation included");
    println!("  - infinite scroll draining a {pages}-page feed");
    println!();

    let wall_clock = HostClock::new();
    let host = ReplayHost::new();
    let surface = host.surface.clone();
    let feed = Rc::new(Feed::new(pages));

    let taps = TapSwipeRecognizer::attach(&surface, TapSwipeConfig::default());
    let _tap_sub = taps.on_tap(|event| {
        let row = (event.position.y / ROW_HEIGHT_PX) as usize;
        log::info!(
            "tap at ({:.0}, {:.0}) selects row {row}",
            event.position.x,
            event.position.y
        );
    });
    let _swipe_sub = taps.on_swipe(|event| {
        log::info!("swipe {:?} covering {:.0}px", event.direction, event.distance);
    });

    let refresh_feed = feed.clone();
    let pull = PullToRefresh::attach(&surface, PullConfig::default(), move || {
        let feed = refresh_feed.clone();
        Box::pin(async move {
            feed.reload();
            Ok(())
        })
    });
    let _refresh_sub = pull.on_refresh(|_| log::info!("pull released; refreshing the feed"));
    let _progress_sub = pull.on_pull_progress(|event| {
        log::debug!(
            "pull at {:.1}px ({:.0}%)",
            event.distance,
            event.progress * 100.0
        );
    });

    let load_feed = feed.clone();
    let scroll = InfiniteScroll::attach(&surface, InfiniteScrollConfig::default(), move || {
        let feed = load_feed.clone();
        Box::pin(async move { Ok(feed.append_page()) })
    });
    let _load_sub = scroll.on_load_more(|_| log::info!("near the bottom; loading another page"));

    // Prime the feed and hand the surface its starting geometry quietly.
    feed.append_page();
    surface.set_scroll_metrics(ScrollMetrics::new(0.0, feed.content_height(), VIEWPORT_HEIGHT_PX));
    log::info!("feed primed with {} items", feed.len());

    // A quick tap on the third row.
    host.touch(TouchPhase::Start, 180.0, 120.0);
    host.idle(40);
    host.touch(TouchPhase::End, 180.0, 120.0);

    // A leftward flick with slight upward drift.
    host.drag(Point::new(320.0, 200.0), Point::new(40.0, 190.0), 8, 12);

    // A deliberate pull well past the threshold, then the settle.
    let consumed = host.drag(Point::new(180.0, 80.0), Point::new(180.0, 280.0), 10, 16);
    log::info!("pull drag consumed by a recognizer: {consumed}");
    while pull.offset() > 0.0 {
        host.idle(50);
        log::debug!("indicator settling at {:.1}px", pull.offset());
    }
    log::info!("refresh complete; feed back to {} items", feed.len());

    // Ride the bottom edge until the feed runs dry.
    for _ in 0..pages + 1 {
        if scroll.is_finished() {
            break;
        }
        let height = feed.content_height();
        host.scroll_to((height - VIEWPORT_HEIGHT_PX).max(0.0), height);
        host.idle(SCROLL_THROTTLE_MS);
    }
    log::info!(
        "feed exhausted at {} items; state {:?}",
        feed.len(),
        scroll.state()
    );

    scroll.reset();
    log::info!("after reset: {:?}", scroll.state());

    println!();
    println!(
        "Replayed {} ms of simulated input in {} ms of wall time",
        host.now_ms(),
        wall_clock.now_ms()
    );
    Ok(())
}
