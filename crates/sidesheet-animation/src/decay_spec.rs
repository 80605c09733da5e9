//! Decay animation specification for flings.
//!
//! A decay animation has no fixed target: it starts from a release velocity
//! and slows down according to its deceleration until the velocity drops
//! below a threshold or the value reaches a clamp bound.

/// Converts deceleration into the exponential velocity falloff rate (per ms).
const SLOPE_FACTOR: f32 = 0.1;

/// Below this speed (px/sec) a decay is considered finished.
pub const DECAY_VELOCITY_THRESHOLD: f32 = 1.0;

/// Deceleration at which the falloff rate is treated as zero.
const NO_FALLOFF_EPSILON: f32 = 1e-6;

/// Trait for decay animation specifications.
///
/// Times are play times in nanoseconds measured from the first animation
/// frame; velocities are in units per second.
pub trait FloatDecayAnimationSpec {
    /// Velocity threshold below which animation is considered finished.
    fn abs_velocity_threshold(&self) -> f32;

    /// Get position at a given time.
    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get velocity at a given time.
    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;
}

/// Exponential decay with a velocity multiplier and optional clamp range.
///
/// Velocity falls off as `v0 * exp(-(1 - deceleration) * SLOPE_FACTOR * t_ms)`
/// and position advances by `velocity_factor * v` per second. A deceleration
/// of exactly 1 keeps the velocity constant, so the motion only stops at a
/// clamp bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidDecaySpec {
    pub deceleration: f32,
    pub velocity_factor: f32,
    pub clamp: Option<(f32, f32)>,
}

impl RigidDecaySpec {
    pub fn new(deceleration: f32) -> Self {
        Self {
            deceleration,
            velocity_factor: 1.0,
            clamp: None,
        }
    }

    pub fn with_velocity_factor(mut self, velocity_factor: f32) -> Self {
        self.velocity_factor = velocity_factor;
        self
    }

    pub fn with_clamp(mut self, min: f32, max: f32) -> Self {
        self.clamp = Some((min.min(max), min.max(max)));
        self
    }

    fn falloff_per_ms(&self) -> f32 {
        ((1.0 - self.deceleration) * SLOPE_FACTOR).max(0.0)
    }

    /// Integral of `exp(-k t)` over `[0, t_ms]`, with the `k -> 0` limit.
    fn travel_time_ms(&self, t_ms: f32) -> f32 {
        let k = self.falloff_per_ms();
        if k < NO_FALLOFF_EPSILON {
            t_ms
        } else {
            (1.0 - (-k * t_ms).exp()) / k
        }
    }

    /// Clamps `value` into the configured range, if any.
    pub fn clamp_value(&self, value: f32) -> f32 {
        match self.clamp {
            Some((min, max)) => value.clamp(min, max),
            None => value,
        }
    }

    /// Returns true when `value` sits on the clamp bound the motion heads to.
    pub fn reached_bound(&self, value: f32, initial_velocity: f32) -> bool {
        match self.clamp {
            Some((min, max)) => {
                (initial_velocity < 0.0 && value <= min) || (initial_velocity > 0.0 && value >= max)
            }
            None => false,
        }
    }
}

impl Default for RigidDecaySpec {
    fn default() -> Self {
        Self::new(0.998)
    }
}

impl FloatDecayAnimationSpec for RigidDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        DECAY_VELOCITY_THRESHOLD
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let t_ms = play_time_nanos.max(0) as f32 / 1_000_000.0;
        let travel = initial_velocity * self.velocity_factor / 1000.0 * self.travel_time_ms(t_ms);
        initial_value + travel
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let t_ms = play_time_nanos.max(0) as f32 / 1_000_000.0;
        initial_velocity * (-self.falloff_per_ms() * t_ms).exp()
    }
}
