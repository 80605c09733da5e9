//! Animation system for Sidesheet
//!
//! Provides frame-driven spring and decay animations that write into a
//! [`SharedScalar`]. Only one animation runs per [`Animatable`]; starting a
//! new one cancels the previous one.
//!
//! Note: This module uses camelCase for method names (animateTo, snapTo) to maintain
//! 1:1 API parity with Jetpack Compose.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use sidesheet_core::{FrameCallbackRegistration, RuntimeHandle, SharedScalar};

use crate::decay_spec::{FloatDecayAnimationSpec, RigidDecaySpec};

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 1.0 / 240.0;

/// Longest frame gap a spring integrates, in seconds. Longer gaps, such as a
/// host resuming from suspension, advance by this much.
pub const MAX_SPRING_STEP_SECONDS: f32 = 1.0;

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Speed (units/sec) below which the spring may settle.
    pub velocity_threshold: f32,
    /// Distance to the target below which the spring may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.5,
            position_threshold: 0.01,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.damping_ratio.is_finite()
            && self.damping_ratio > 0.0
            && self.stiffness.is_finite()
            && self.stiffness > 0.0
            && self.velocity_threshold > 0.0
            && self.position_threshold > 0.0
    }

    /// Advances `(value, velocity)` towards `target` by `dt` seconds using
    /// semi-implicit Euler with equal substeps no longer than the
    /// integration step. `dt` is capped at [`MAX_SPRING_STEP_SECONDS`]; a
    /// negative or NaN `dt` leaves the state unchanged.
    pub fn step(&self, target: f32, value: f32, velocity: f32, dt: f32) -> (f32, f32) {
        if dt.is_nan() || dt <= 0.0 {
            return (value, velocity);
        }
        let dt = dt.min(MAX_SPRING_STEP_SECONDS);
        let damping = 2.0 * self.damping_ratio * self.stiffness.sqrt();
        let substeps = (dt / SPRING_TIMESTEP).ceil().max(1.0) as u32;
        let step = dt / substeps as f32;
        let mut value = value;
        let mut velocity = velocity;
        for _ in 0..substeps {
            let displacement = value - target;
            let force = -self.stiffness * displacement - damping * velocity;
            velocity += force * step;
            value += velocity * step;
        }
        (value, velocity)
    }

    /// Whether a spring at `(value, velocity)` counts as resting on `target`.
    pub fn is_at_rest(&self, target: f32, value: f32, velocity: f32) -> bool {
        velocity.abs() < self.velocity_threshold && (value - target).abs() < self.position_threshold
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Physics-based spring animation towards a fixed target.
    Spring { spec: SpringSpec, target: f32 },
    /// Velocity-driven decay with no fixed target.
    Decay(RigidDecaySpec),
}

/// Why an animation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// Converged on its target or ran out of velocity.
    Finished,
    /// Stopped at a decay clamp bound.
    BoundReached,
    /// Cancelled by `stop`, `snapTo` or a newer animation.
    Interrupted,
}

type EndCallback = Box<dyn FnOnce(AnimationEnd) + 'static>;

/// Drives a [`SharedScalar`] with spring or decay animations.
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

struct AnimatableInner {
    cell: SharedScalar,
    runtime: RuntimeHandle,
    velocity: f32,
    animation: Option<AnimationType>,
    /// Value and velocity at decay start; decay position is closed-form.
    decay_origin: (f32, f32),
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndCallback>,
}

impl Animatable {
    /// Create an animatable that writes into `cell`.
    pub fn new(cell: SharedScalar, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            cell,
            runtime,
            velocity: 0.0,
            animation: None,
            decay_origin: (0.0, 0.0),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current value of the driven cell.
    pub fn value(&self) -> f32 {
        self.inner.borrow().cell.get()
    }

    /// Velocity of the running animation (units/sec); 0 when idle.
    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().animation.is_some()
    }

    /// Return the animation currently driving this animatable.
    pub fn animation_type(&self) -> Option<AnimationType> {
        self.inner.borrow().animation
    }

    /// Spring towards `target`, starting with `initial_velocity`.
    pub fn animateTo(
        &self,
        target: f32,
        spec: SpringSpec,
        initial_velocity: f32,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start(
            AnimationType::Spring { spec, target },
            initial_velocity,
            Box::new(on_end),
        );
    }

    /// Decay from the current value with `initial_velocity`.
    pub fn animateDecay(
        &self,
        spec: RigidDecaySpec,
        initial_velocity: f32,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start(AnimationType::Decay(spec), initial_velocity, Box::new(on_end));
    }

    /// Snap immediately to the target value without animating.
    pub fn snapTo(&self, target: f32) {
        let interrupted = self.cancel();
        let cell = self.inner.borrow().cell.clone();
        cell.set(target);
        if let Some(on_end) = interrupted {
            on_end(AnimationEnd::Interrupted);
        }
    }

    /// Stop any running animation, leaving the value where it is.
    pub fn stop(&self) {
        if let Some(on_end) = self.cancel() {
            on_end(AnimationEnd::Interrupted);
        }
    }

    fn start(&self, animation: AnimationType, initial_velocity: f32, on_end: EndCallback) {
        let interrupted = self.cancel();
        {
            let mut inner = self.inner.borrow_mut();
            let current = inner.cell.get();
            inner.animation = Some(animation);
            inner.velocity = initial_velocity;
            inner.decay_origin = (current, initial_velocity);
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.on_end = Some(on_end);
        }
        if let Some(previous) = interrupted {
            previous(AnimationEnd::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Clears animation state; returns the pending end callback, if any.
    fn cancel(&self) -> Option<EndCallback> {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.animation = None;
        inner.velocity = 0.0;
        inner.start_time_nanos = None;
        inner.last_frame_nanos = None;
        inner.on_end.take()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner>>, frame_time_nanos: u64) {
        let outcome = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            match inner.animation {
                None => return,
                Some(AnimationType::Spring { spec, target }) => {
                    Self::spring_frame(&mut inner, spec, target, frame_time_nanos)
                }
                Some(AnimationType::Decay(spec)) => {
                    Self::decay_frame(&mut inner, spec, frame_time_nanos)
                }
            }
        };

        match outcome {
            None => Self::schedule_frame(this),
            Some(reason) => {
                log::trace!("animation ended: {reason:?}");
                let on_end = {
                    let mut inner = this.borrow_mut();
                    inner.animation = None;
                    inner.velocity = 0.0;
                    inner.start_time_nanos = None;
                    inner.last_frame_nanos = None;
                    inner.on_end.take()
                };
                if let Some(on_end) = on_end {
                    on_end(reason);
                }
            }
        }
    }

    fn spring_frame(
        inner: &mut AnimatableInner,
        spec: SpringSpec,
        target: f32,
        frame_time_nanos: u64,
    ) -> Option<AnimationEnd> {
        let current = inner.cell.get();
        let Some(last) = inner.last_frame_nanos.replace(frame_time_nanos) else {
            // First frame establishes the time base.
            if spec.is_at_rest(target, current, inner.velocity) {
                inner.cell.set(target);
                return Some(AnimationEnd::Finished);
            }
            return None;
        };
        let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
        let (value, velocity) = spec.step(target, current, inner.velocity, dt);
        if spec.is_at_rest(target, value, velocity) {
            inner.velocity = 0.0;
            inner.cell.set(target);
            Some(AnimationEnd::Finished)
        } else {
            inner.velocity = velocity;
            inner.cell.set(value);
            None
        }
    }

    fn decay_frame(
        inner: &mut AnimatableInner,
        spec: RigidDecaySpec,
        frame_time_nanos: u64,
    ) -> Option<AnimationEnd> {
        let start = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
        let play_time_nanos = frame_time_nanos.saturating_sub(start) as i64;
        let (origin_value, origin_velocity) = inner.decay_origin;

        let raw = spec.get_value_from_nanos(play_time_nanos, origin_value, origin_velocity);
        let velocity = spec.get_velocity_from_nanos(play_time_nanos, origin_value, origin_velocity);
        let value = spec.clamp_value(raw);
        inner.velocity = velocity;
        inner.cell.set(value);

        if spec.reached_bound(value, origin_velocity) {
            Some(AnimationEnd::BoundReached)
        } else if velocity.abs() < spec.abs_velocity_threshold() {
            Some(AnimationEnd::Finished)
        } else {
            None
        }
    }
}

impl Clone for Animatable {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
