//! Default tuning values for the three recognizers.
//!
//! All distances are in logical pixels of the host surface; durations are in
//! milliseconds. The defaults match common mobile UX conventions and can be
//! overridden per recognizer through its config struct.

/// Minimum axis displacement for a touch sequence to classify as a swipe.
///
/// The comparison is strict: a release exactly this far from the origin is
/// not a swipe. 50 px is far past finger jitter while still letting short
/// deliberate flicks register.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Longest press-to-release time that can still classify as a tap.
///
/// Strict comparison: a release at exactly this elapsed time is not a tap.
pub const TAP_TIMEOUT_MS: u64 = 300;

/// Perceived pull distance at which releasing triggers a refresh.
pub const PULL_THRESHOLD_PX: f32 = 60.0;

/// Hard cap on the perceived pull distance.
///
/// Keeps the indicator from following the finger across the whole screen
/// once the gesture is clearly past the trigger point.
pub const PULL_MAX_DISTANCE_PX: f32 = 100.0;

/// Divisor turning raw finger travel into perceived pull distance.
///
/// 2.5 means the finger moves two and a half pixels for every pixel the
/// indicator travels, which gives the pull its elastic feel.
pub const PULL_RESISTANCE: f32 = 2.5;

/// Duration of the indicator's return animation after a pull releases.
///
/// Purely visual; no gesture decision depends on it.
pub const PULL_SETTLE_MS: u64 = 300;

/// Distance from the content bottom at which load-more triggers.
///
/// Inclusive: sitting exactly this far from the bottom triggers.
pub const LOAD_MORE_THRESHOLD_PX: f32 = 100.0;

/// Width of the trailing-edge throttle window for scroll evaluation.
///
/// Scroll events arrive far faster than load decisions need to be made; one
/// evaluation per window is plenty.
pub const SCROLL_THROTTLE_MS: u64 = 200;
