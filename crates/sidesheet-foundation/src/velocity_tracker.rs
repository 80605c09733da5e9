//! Horizontal release velocity.
//!
//! Uses the impulse strategy: each pair of consecutive samples contributes
//! the kinetic energy needed to change from the velocity so far to the pair's
//! velocity.

/// Samples kept in the ring.
const CAPACITY: usize = 20;

/// Samples older than this, relative to the newest, are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sample {
    time_ms: i64,
    x: f32,
}

/// Tracks pointer x positions and reports the release velocity in px/sec.
///
/// ```
/// use sidesheet_foundation::VelocityTracker;
///
/// let mut tracker = VelocityTracker::new();
/// tracker.add_sample(0, 0.0);
/// tracker.add_sample(10, 100.0);
/// tracker.add_sample(20, 200.0);
/// assert!(tracker.velocity() > 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    ring: [Sample; CAPACITY],
    /// Slot the next sample goes into.
    head: usize,
    len: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, time_ms: i64, x: f32) {
        self.ring[self.head] = Sample { time_ms, x };
        self.head = (self.head + 1) % CAPACITY;
        self.len = (self.len + 1).min(CAPACITY);
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    fn newest_first(&self) -> impl Iterator<Item = Sample> + '_ {
        (1..=self.len).map(move |back| self.ring[(self.head + CAPACITY - back) % CAPACITY])
    }

    /// The contiguous recent run of samples, oldest first, and its length.
    fn window(&self) -> ([Sample; CAPACITY], usize) {
        let mut window = [Sample::default(); CAPACITY];
        let mut count = 0;
        let mut newer: Option<Sample> = None;
        for sample in self.newest_first() {
            let newest = window[0];
            let too_old = count > 0 && newest.time_ms - sample.time_ms > HORIZON_MS;
            let stopped = newer
                .is_some_and(|newer| (newer.time_ms - sample.time_ms).abs() > ASSUME_STOPPED_MS);
            if too_old || stopped {
                break;
            }
            window[count] = sample;
            count += 1;
            newer = Some(sample);
        }
        window[..count].reverse();
        (window, count)
    }

    /// Velocity in px/sec; 0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let (window, count) = self.window();
        if count < 2 {
            return 0.0;
        }
        let mut energy = 0.0f32;
        for (index, pair) in window[..count].windows(2).enumerate() {
            let dt = (pair[1].time_ms - pair[0].time_ms) as f32;
            if dt == 0.0 {
                continue;
            }
            let pair_velocity = (pair[1].x - pair[0].x) / dt;
            energy += (pair_velocity - energy_to_velocity(energy)) * pair_velocity.abs();
            if index == 0 {
                energy *= 0.5;
            }
        }
        energy_to_velocity(energy) * 1000.0
    }

    /// [`velocity`](Self::velocity) clamped to `±max_velocity`. A non-finite
    /// or non-positive cap yields 0.
    pub fn release_velocity(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }
}

/// Speed of a unit mass carrying `energy`, signed like `energy`.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
