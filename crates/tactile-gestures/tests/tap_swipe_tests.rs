//! Classification tests for the tap/swipe recognizer, driven through the
//! synthetic-input robot.

use tactile_gestures::tap_swipe::{SwipeDirection, TapSwipeConfig, TapSwipeRecognizer};
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::geometry::Point;
use tactile_core::input::{TouchEvent, TouchPhase};
use tactile_testing::{GestureRobot, NotificationLog};

fn recognizer_on(robot: &GestureRobot) -> TapSwipeRecognizer {
    TapSwipeRecognizer::attach(robot.surface(), TapSwipeConfig::default())
}

#[test]
fn test_tap_fires_at_release_position() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let taps = Rc::new(RefCell::new(Vec::new()));

    let taps_clone = taps.clone();
    let _tap = recognizer.on_tap(move |event| taps_clone.borrow_mut().push(event.position));

    robot.press_at(10.0, 10.0);
    robot.advance_time(40);
    robot.release_at(12.0, 14.0);

    assert_eq!(
        *taps.borrow(),
        vec![Point::new(12.0, 14.0)],
        "tap carries the release coordinates, not the press"
    );
}

#[test]
fn test_tap_requires_release_strictly_within_timeout() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let taps = Rc::new(RefCell::new(0));

    let taps_clone = taps.clone();
    let _tap = recognizer.on_tap(move |_| *taps_clone.borrow_mut() += 1);

    robot.press_at(10.0, 10.0);
    robot.advance_time(299);
    robot.release();
    assert_eq!(*taps.borrow(), 1, "release at 299ms still taps");

    robot.press_at(10.0, 10.0);
    robot.advance_time(300);
    robot.release();
    assert_eq!(*taps.borrow(), 1, "release exactly at the timeout does not tap");
}

#[test]
fn test_any_move_disqualifies_a_tap_even_with_zero_delta() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let taps = Rc::new(RefCell::new(0));
    let ends = Rc::new(RefCell::new(0));

    let taps_clone = taps.clone();
    let _tap = recognizer.on_tap(move |_| *taps_clone.borrow_mut() += 1);
    let ends_clone = ends.clone();
    let _end = recognizer.on_touch_end(move |_| *ends_clone.borrow_mut() += 1);

    robot.press_at(10.0, 10.0);
    robot.move_to(10.0, 10.0);
    robot.advance_time(20);
    robot.release();

    assert_eq!(*taps.borrow(), 0, "a move event kills the tap even without travel");
    assert_eq!(*ends.borrow(), 1, "the raw end still reports");
}

#[test]
fn test_move_events_carry_deltas_from_the_origin() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let moves = Rc::new(RefCell::new(Vec::new()));

    let moves_clone = moves.clone();
    let _move = recognizer.on_touch_move(move |event| {
        moves_clone.borrow_mut().push((event.position, event.delta_x, event.delta_y));
    });

    robot.press_at(10.0, 20.0);
    robot.move_to(25.0, 50.0);
    robot.move_to(5.0, 20.0);
    robot.release();

    assert_eq!(
        *moves.borrow(),
        vec![
            (Point::new(25.0, 50.0), 15.0, 30.0),
            (Point::new(5.0, 20.0), -5.0, 0.0),
        ],
        "deltas are measured against the sequence origin, not the previous move"
    );
}

#[test]
fn test_horizontal_drag_past_threshold_swipes_right() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let swipes = Rc::new(RefCell::new(Vec::new()));
    let taps = Rc::new(RefCell::new(0));

    let swipes_clone = swipes.clone();
    let _swipe = recognizer.on_swipe(move |event| swipes_clone.borrow_mut().push(*event));
    let taps_clone = taps.clone();
    let _tap = recognizer.on_tap(move |_| *taps_clone.borrow_mut() += 1);

    robot.swipe(Point::new(0.0, 0.0), Point::new(80.0, 10.0), 100);

    let swipes = swipes.borrow();
    assert_eq!(swipes.len(), 1, "one swipe per sequence");
    assert_eq!(swipes[0].direction, SwipeDirection::Right);
    assert_eq!(swipes[0].delta_x, 80.0);
    assert_eq!(swipes[0].delta_y, 10.0);
    assert!(
        (swipes[0].distance - (80.0f32 * 80.0 + 10.0 * 10.0).sqrt()).abs() < 1e-3,
        "distance is the straight-line displacement"
    );
    assert_eq!(*taps.borrow(), 0, "a dragged sequence is not a tap");
}

#[test]
fn test_axis_displacement_at_threshold_is_not_a_swipe() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let swipes = Rc::new(RefCell::new(0));

    let swipes_clone = swipes.clone();
    let _swipe = recognizer.on_swipe(move |_| *swipes_clone.borrow_mut() += 1);

    robot.press_at(0.0, 0.0);
    robot.move_to(50.0, 0.0);
    robot.release_at(50.0, 0.0);
    assert_eq!(*swipes.borrow(), 0, "exactly the threshold does not swipe");

    robot.press_at(0.0, 0.0);
    robot.move_to(51.0, 0.0);
    robot.release_at(51.0, 0.0);
    assert_eq!(*swipes.borrow(), 1, "one pixel past the threshold swipes");
}

#[test]
fn test_equal_axis_magnitudes_resolve_vertically() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let directions = Rc::new(RefCell::new(Vec::new()));

    let directions_clone = directions.clone();
    let _swipe = recognizer.on_swipe(move |event| {
        directions_clone.borrow_mut().push(event.direction);
    });

    robot.swipe(Point::new(100.0, 100.0), Point::new(160.0, 160.0), 80);
    robot.swipe(Point::new(100.0, 100.0), Point::new(40.0, 40.0), 80);

    assert_eq!(
        *directions.borrow(),
        vec![SwipeDirection::Down, SwipeDirection::Up],
        "a perfect diagonal counts as vertical"
    );
}

#[test]
fn test_notification_order_is_end_then_swipe_then_directional() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let log = NotificationLog::new();

    let end_log = log.clone();
    let _end = recognizer.on_touch_end(move |_| end_log.push("touchend"));
    let swipe_log = log.clone();
    let _swipe = recognizer.on_swipe(move |_| swipe_log.push("swipe"));
    let right_log = log.clone();
    let _right = recognizer.on_swipe_direction(SwipeDirection::Right, move |_| {
        right_log.push("swiperight")
    });

    robot.swipe(Point::new(0.0, 0.0), Point::new(90.0, 0.0), 100);

    assert_eq!(
        log.entries(),
        vec!["touchend", "swipe", "swiperight"],
        "raw end first, then the generic swipe, then the directional one"
    );
}

#[test]
fn test_directional_handler_ignores_other_directions() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let lefts = Rc::new(RefCell::new(0));

    let lefts_clone = lefts.clone();
    let _left = recognizer.on_swipe_direction(SwipeDirection::Left, move |_| {
        *lefts_clone.borrow_mut() += 1
    });

    robot.swipe(Point::new(0.0, 0.0), Point::new(90.0, 0.0), 100);

    assert_eq!(*lefts.borrow(), 0, "a right swipe does not reach the left handler");
}

#[test]
fn test_slow_long_drag_still_swipes() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let log = NotificationLog::new();

    let tap_log = log.clone();
    let _tap = recognizer.on_tap(move |_| tap_log.push("tap"));
    let swipe_log = log.clone();
    let _swipe = recognizer.on_swipe(move |_| swipe_log.push("swipe"));

    // Swipe has no time bound; only the tap arm cares about elapsed time.
    robot.press_at(0.0, 0.0);
    robot.move_to(0.0, 120.0);
    robot.advance_time(1_000);
    robot.release_at(0.0, 120.0);

    assert_eq!(log.entries(), vec!["swipe"], "slow drags swipe and never tap");
}

#[test]
fn test_events_with_no_contacts_are_skipped() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let log = NotificationLog::new();

    let end_log = log.clone();
    let _end = recognizer.on_touch_end(move |_| end_log.push("touchend"));
    let tap_log = log.clone();
    let _tap = recognizer.on_tap(move |_| tap_log.push("tap"));

    robot.press_at(10.0, 10.0);
    // An end without contact data carries nothing classifiable.
    robot
        .surface()
        .dispatch_touch(&TouchEvent::new(TouchPhase::End, []));
    assert!(log.is_empty(), "a contactless end produces no events");

    // The next press replaces the dangling sequence and works normally.
    robot.press_at(20.0, 20.0);
    robot.advance_time(30);
    robot.release();

    assert_eq!(log.entries(), vec!["touchend", "tap"]);
}

#[test]
fn test_end_without_start_is_a_no_op() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let log = NotificationLog::new();

    let end_log = log.clone();
    let _end = recognizer.on_touch_end(move |_| end_log.push("touchend"));

    robot.release_at(10.0, 10.0);

    assert!(log.is_empty(), "an end with no open sequence is dropped");
}

#[test]
fn test_new_start_replaces_a_stale_sequence() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let taps = Rc::new(RefCell::new(Vec::new()));

    let taps_clone = taps.clone();
    let _tap = recognizer.on_tap(move |event| taps_clone.borrow_mut().push(event.position));

    robot.press_at(0.0, 0.0);
    // No release arrives for the first press.
    robot.advance_time(500);
    robot.press_at(5.0, 5.0);
    robot.advance_time(40);
    robot.release();

    assert_eq!(
        *taps.borrow(),
        vec![Point::new(5.0, 5.0)],
        "the second press starts a fresh sequence with its own clock"
    );
}

#[test]
fn test_dropped_recognizer_is_silent() {
    let robot = GestureRobot::new();
    let recognizer = recognizer_on(&robot);
    let taps = Rc::new(RefCell::new(0));

    let taps_clone = taps.clone();
    let _tap = recognizer.on_tap(move |_| *taps_clone.borrow_mut() += 1);
    drop(recognizer);

    robot.tap_at(10.0, 10.0);

    assert_eq!(*taps.borrow(), 0, "detached recognizer hears nothing");
}

#[test]
fn test_custom_threshold_applies() {
    let robot = GestureRobot::new();
    let config = TapSwipeConfig::default().with_threshold_px(10.0);
    let recognizer = TapSwipeRecognizer::attach(robot.surface(), config);
    let swipes = Rc::new(RefCell::new(0));

    let swipes_clone = swipes.clone();
    let _swipe = recognizer.on_swipe(move |_| *swipes_clone.borrow_mut() += 1);

    robot.press_at(0.0, 0.0);
    robot.move_to(20.0, 0.0);
    robot.release_at(20.0, 0.0);

    assert_eq!(*swipes.borrow(), 1, "20px clears a 10px threshold");
}
