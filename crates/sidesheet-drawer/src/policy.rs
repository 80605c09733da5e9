//! Resistance and snap policy.
//!
//! Pure functions: the drag tracks the finger up to the threshold and is
//! heavily resisted beyond it; a release picks a spring or a decay from the
//! current offset and the release velocity.

use sidesheet_foundation::gesture_constants::MAX_FLING_VELOCITY;

/// Fraction of overtravel beyond the threshold that still moves the drawer.
pub const RESISTANCE_FACTOR: f32 = 0.03;

/// Deceleration for release flings. 1 keeps the velocity constant, so the
/// fling only stops at a clamp bound.
pub const DECAY_DECELERATION: f32 = 1.0;

/// Offsets at or beyond this fraction of the threshold spring open on a
/// leftward release.
pub const MOSTLY_OPEN_FRACTION: f32 = 0.9;

/// Numerator of the decay velocity factor.
pub const VELOCITY_FACTOR_SCALE: f32 = 1000.0;

/// Floor for the velocity magnitude in the factor denominator, px/sec.
pub const MIN_VELOCITY_MAGNITUDE: f32 = 1.0;

/// Parameters of a release fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayConfig {
    pub velocity: f32,
    pub velocity_factor: f32,
    pub deceleration: f32,
    pub clamp: (f32, f32),
}

/// Motion chosen for a released drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleTarget {
    Spring { target: f32 },
    Decay(DecayConfig),
}

/// Maps a raw drag position to the drawer offset.
///
/// Identity up to `threshold`; beyond it only [`RESISTANCE_FACTOR`] of the
/// overtravel is kept.
pub fn apply_resistance(candidate: f32, threshold: f32) -> f32 {
    if candidate <= threshold {
        candidate
    } else {
        threshold + (candidate - threshold) * RESISTANCE_FACTOR
    }
}

/// `max(1000 / |velocity|, 1)`, with the magnitude floored so zero velocity
/// stays finite.
pub fn velocity_factor(velocity: f32) -> f32 {
    let magnitude = if velocity.is_finite() {
        velocity.abs().max(MIN_VELOCITY_MAGNITUDE)
    } else if velocity.is_nan() {
        MIN_VELOCITY_MAGNITUDE
    } else {
        f32::MAX
    };
    (VELOCITY_FACTOR_SCALE / magnitude).max(1.0)
}

/// NaN becomes 0; everything else is capped at `±MAX_FLING_VELOCITY`.
pub fn sanitize_release_velocity(velocity: f32) -> f32 {
    if velocity.is_nan() {
        0.0
    } else {
        velocity.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }
}

/// Chooses the settle motion for a release at `offset` with `velocity`.
///
/// Any rightward velocity opens, even from a tiny drag near zero. Leftward
/// or zero velocity short of [`MOSTLY_OPEN_FRACTION`] flings with a decay
/// clamped to `[0, threshold]`; otherwise the drawer springs open. The
/// velocity goes through [`sanitize_release_velocity`] first.
pub fn resolve_release(offset: f32, velocity: f32, threshold: f32) -> SettleTarget {
    let velocity = sanitize_release_velocity(velocity);
    if velocity > 0.0 {
        SettleTarget::Spring { target: threshold }
    } else if offset < MOSTLY_OPEN_FRACTION * threshold {
        SettleTarget::Decay(DecayConfig {
            velocity,
            velocity_factor: velocity_factor(velocity),
            deceleration: DECAY_DECELERATION,
            clamp: (0.0, threshold),
        })
    } else {
        SettleTarget::Spring { target: threshold }
    }
}

/// Motion for a backdrop tap or programmatic close.
pub fn close_target() -> SettleTarget {
    SettleTarget::Spring { target: 0.0 }
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod tests;
