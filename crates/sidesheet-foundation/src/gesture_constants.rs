//! Shared gesture constants for consistent touch/pointer handling.
//!
//! All values are in logical pixels (or logical pixels per second).

/// Tap slop. A press that travels further than this is no longer a tap.
///
/// Matches common platform conventions (Android uses ~8dp for
/// ViewConfiguration.TOUCH_SLOP).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Minimum total travel before a pan may activate.
pub const PAN_MIN_DISTANCE: f32 = 5.0;

/// Horizontal travel that activates a horizontal pan.
pub const PAN_ACTIVE_OFFSET_X: f32 = 10.0;

/// Vertical travel that fails a horizontal pan before it activates.
pub const PAN_FAIL_OFFSET_Y: f32 = 5.0;
