use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::cell::Cell;
use std::rc::Rc;
use tactile_gestures::{
    InfiniteScroll, InfiniteScrollConfig, PullConfig, PullToRefresh, Subscription,
    TapSwipeConfig, TapSwipeRecognizer,
};
use tactile_testing::GestureRobot;

const MOVES_PER_SWIPE_SAMPLES: &[usize] = &[4, 16, 64];
const EVENTS_PER_BURST_SAMPLES: &[usize] = &[4, 16, 64];

struct SwipeFixture {
    robot: GestureRobot,
    recognized: Rc<Cell<usize>>,
    _recognizer: TapSwipeRecognizer,
    _subscription: Subscription,
}

impl SwipeFixture {
    fn new() -> Self {
        let robot = GestureRobot::new();
        let recognizer = TapSwipeRecognizer::attach(robot.surface(), TapSwipeConfig::default());
        let recognized = Rc::new(Cell::new(0));
        let subscription = {
            let recognized = recognized.clone();
            recognizer.on_swipe(move |_| recognized.set(recognized.get() + 1))
        };
        Self {
            robot,
            recognized,
            _recognizer: recognizer,
            _subscription: subscription,
        }
    }

    /// One full rightward swipe sequence with `moves` interpolated samples.
    fn drive(&self, moves: usize) {
        self.robot.press_at(0.0, 100.0);
        for i in 1..=moves {
            self.robot.advance_time(2);
            let x = 120.0 * i as f32 / moves as f32;
            self.robot.move_to(x, 100.0);
        }
        self.robot.release_at(120.0, 100.0);
    }
}

struct PullFixture {
    robot: GestureRobot,
    refreshes: Rc<Cell<usize>>,
    _recognizer: PullToRefresh,
}

impl PullFixture {
    fn new() -> Self {
        let robot = GestureRobot::new();
        let refreshes = Rc::new(Cell::new(0));
        let refreshes_clone = refreshes.clone();
        let recognizer = PullToRefresh::attach(robot.surface(), PullConfig::default(), move || {
            refreshes_clone.set(refreshes_clone.get() + 1);
            Box::pin(async { Ok(()) })
        });
        Self {
            robot,
            refreshes,
            _recognizer: recognizer,
        }
    }

    /// One full pull cycle: drag past the threshold, release, settle.
    fn drive(&self, moves: usize) {
        self.robot.press_at(50.0, 0.0);
        for i in 1..=moves {
            self.robot.advance_time(2);
            let y = 300.0 * i as f32 / moves as f32;
            self.robot.move_to(50.0, y);
        }
        self.robot.release();
        self.robot.advance_time(300);
    }
}

struct ScrollFixture {
    robot: GestureRobot,
    loads: Rc<Cell<usize>>,
    _recognizer: InfiniteScroll,
}

impl ScrollFixture {
    fn new() -> Self {
        let robot = GestureRobot::new();
        let loads = Rc::new(Cell::new(0));
        let loads_clone = loads.clone();
        let recognizer = InfiniteScroll::attach(
            robot.surface(),
            InfiniteScrollConfig::default(),
            move || {
                loads_clone.set(loads_clone.get() + 1);
                Box::pin(async { Ok(true) })
            },
        );
        Self {
            robot,
            loads,
            _recognizer: recognizer,
        }
    }

    /// One near-bottom scroll burst plus the trailing evaluation.
    fn drive(&self, events: usize) {
        for i in 0..events {
            self.robot.scroll(550.0 + i as f32, 1000.0, 400.0);
            self.robot.advance_time(10);
        }
        self.robot.advance_time(200);
    }
}

fn bench_tap_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("tap_sequences");
    group.bench_function("press_release", |b| {
        let robot = GestureRobot::new();
        let recognizer = TapSwipeRecognizer::attach(robot.surface(), TapSwipeConfig::default());
        let taps = Rc::new(Cell::new(0));
        let _subscription = {
            let taps = taps.clone();
            recognizer.on_tap(move |_| taps.set(taps.get() + 1))
        };

        b.iter(|| {
            robot.tap_at(10.0, 10.0);
            black_box(taps.get());
        });
    });
    group.finish();
}

fn bench_swipe_recognition(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe_recognition");
    for &moves in MOVES_PER_SWIPE_SAMPLES {
        group.bench_with_input(BenchmarkId::new("moves", moves), &moves, |b, &moves| {
            let fixture = SwipeFixture::new();
            b.iter(|| {
                fixture.drive(moves);
                black_box(fixture.recognized.get());
            });
        });
    }
    group.finish();
}

fn bench_pull_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("pull_cycle");
    group.bench_function("drag_release_settle", |b| {
        let fixture = PullFixture::new();
        b.iter(|| {
            fixture.drive(8);
            black_box(fixture.refreshes.get());
        });
    });
    group.finish();
}

fn bench_scroll_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_throttle");
    for &events in EVENTS_PER_BURST_SAMPLES {
        group.bench_with_input(BenchmarkId::new("events", events), &events, |b, &events| {
            let fixture = ScrollFixture::new();
            b.iter(|| {
                fixture.drive(events);
                black_box(fixture.loads.get());
            });
        });
    }
    group.finish();
}

criterion_group!(
    recognition,
    bench_tap_sequences,
    bench_swipe_recognition,
    bench_pull_cycle,
    bench_scroll_throttle
);
criterion_main!(recognition);
