//! Horizontal pan recogniser.
//!
//! A press becomes a pan once it has travelled `min_distance` in total and
//! more than `active_offset_x` horizontally. Travelling more than
//! `fail_offset_y` vertically first fails the press so a vertical scroller
//! underneath can take it. Translation is measured from the pointer-down
//! position, so the activation slop is part of the reported translation.

use crate::gesture_constants::{
    MAX_FLING_VELOCITY, PAN_ACTIVE_OFFSET_X, PAN_FAIL_OFFSET_Y, PAN_MIN_DISTANCE,
};
use crate::input::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker;
use sidesheet_ui_graphics::Point;

/// Activation thresholds for [`PanGestureDetector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanConfig {
    pub min_distance: f32,
    pub active_offset_x: f32,
    pub fail_offset_y: f32,
    /// Cap applied to the release velocity, in px/sec.
    pub max_velocity: f32,
}

impl PanConfig {
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_active_offset_x(mut self, active_offset_x: f32) -> Self {
        self.active_offset_x = active_offset_x;
        self
    }

    pub fn with_fail_offset_y(mut self, fail_offset_y: f32) -> Self {
        self.fail_offset_y = fail_offset_y;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn is_valid(&self) -> bool {
        [
            self.min_distance,
            self.active_offset_x,
            self.fail_offset_y,
            self.max_velocity,
        ]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0)
            && self.max_velocity > 0.0
    }
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            min_distance: PAN_MIN_DISTANCE,
            active_offset_x: PAN_ACTIVE_OFFSET_X,
            fail_offset_y: PAN_FAIL_OFFSET_Y,
            max_velocity: MAX_FLING_VELOCITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanState {
    /// No pointer is down.
    Idle,
    /// Pointer down, thresholds not crossed yet.
    Pending,
    Active,
    /// Rejected for this press; waits for the pointer to lift.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// The pan activated. `translation_x` already includes the slop.
    Start { translation_x: f32 },
    Update { translation_x: f32 },
    /// Pointer released (or cancelled, with zero velocity) while active.
    End { translation_x: f32, velocity_x: f32 },
    /// The press moved vertically first and was ceded.
    Rejected,
}

/// Single-pointer horizontal pan state machine.
///
/// Feed every pointer event through [`on_pointer_event`](Self::on_pointer_event);
/// events that drive an active pan are consumed.
#[derive(Clone, Debug)]
pub struct PanGestureDetector {
    config: PanConfig,
    state: PanState,
    pointer: Option<PointerId>,
    origin: Point,
    translation_x: f32,
    tracker: VelocityTracker,
}

impl PanGestureDetector {
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            state: PanState::Idle,
            pointer: None,
            origin: Point::ZERO,
            translation_x: 0.0,
            tracker: VelocityTracker::new(),
        }
    }

    pub fn config(&self) -> PanConfig {
        self.config
    }

    pub fn state(&self) -> PanState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PanState::Active
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<PanEvent> {
        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_some() || event.is_consumed() {
                    return None;
                }
                self.pointer = Some(event.id);
                self.state = PanState::Pending;
                self.origin = event.position;
                self.translation_x = 0.0;
                self.tracker.reset();
                self.tracker.add_sample(event.time_ms, event.position.x);
                None
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                self.tracker.add_sample(event.time_ms, event.position.x);
                let dx = event.position.x - self.origin.x;
                let dy = event.position.y - self.origin.y;
                match self.state {
                    PanState::Pending => {
                        if dy.abs() > self.config.fail_offset_y {
                            log::trace!("pan rejected: vertical travel {dy}");
                            self.state = PanState::Failed;
                            return Some(PanEvent::Rejected);
                        }
                        let distance = event.position.distance_to(self.origin);
                        if distance >= self.config.min_distance
                            && dx.abs() > self.config.active_offset_x
                        {
                            self.state = PanState::Active;
                            self.translation_x = dx;
                            event.consume();
                            return Some(PanEvent::Start { translation_x: dx });
                        }
                        None
                    }
                    PanState::Active => {
                        self.translation_x = dx;
                        event.consume();
                        Some(PanEvent::Update { translation_x: dx })
                    }
                    PanState::Idle | PanState::Failed => None,
                }
            }
            PointerEventKind::Up => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                let result = if self.state == PanState::Active {
                    self.tracker.add_sample(event.time_ms, event.position.x);
                    event.consume();
                    Some(PanEvent::End {
                        translation_x: event.position.x - self.origin.x,
                        velocity_x: self.tracker.release_velocity(self.config.max_velocity),
                    })
                } else {
                    None
                };
                self.reset();
                result
            }
            PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                let result = (self.state == PanState::Active).then_some(PanEvent::End {
                    translation_x: self.translation_x,
                    velocity_x: 0.0,
                });
                self.reset();
                result
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = PanState::Idle;
        self.pointer = None;
        self.translation_x = 0.0;
        self.tracker.reset();
    }
}

impl Default for PanGestureDetector {
    fn default() -> Self {
        Self::new(PanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PanGestureDetector {
        PanGestureDetector::default()
    }

    #[test]
    fn horizontal_drag_activates_after_offset() {
        let mut pan = detector();
        assert_eq!(pan.on_pointer_event(&PointerEvent::down(100.0, 300.0, 0)), None);
        assert_eq!(pan.on_pointer_event(&PointerEvent::moved(108.0, 300.0, 8)), None);
        assert_eq!(pan.state(), PanState::Pending);

        let activate = PointerEvent::moved(112.0, 301.0, 16);
        assert_eq!(
            pan.on_pointer_event(&activate),
            Some(PanEvent::Start { translation_x: 12.0 })
        );
        assert!(activate.is_consumed());
        assert!(pan.is_active());

        assert_eq!(
            pan.on_pointer_event(&PointerEvent::moved(150.0, 303.0, 24)),
            Some(PanEvent::Update { translation_x: 50.0 })
        );
    }

    #[test]
    fn leftward_drag_activates_too() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(300.0, 300.0, 0));
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::moved(285.0, 300.0, 16)),
            Some(PanEvent::Start { translation_x: -15.0 })
        );
    }

    #[test]
    fn vertical_travel_first_rejects() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(100.0, 300.0, 0));
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::moved(103.0, 306.0, 8)),
            Some(PanEvent::Rejected)
        );
        assert_eq!(pan.state(), PanState::Failed);
        // Later horizontal travel does not revive the press.
        assert_eq!(pan.on_pointer_event(&PointerEvent::moved(160.0, 306.0, 16)), None);
        assert_eq!(pan.on_pointer_event(&PointerEvent::up(160.0, 306.0, 24)), None);
        assert_eq!(pan.state(), PanState::Idle);
    }

    #[test]
    fn diagonal_move_crossing_both_offsets_fails() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::moved(20.0, 20.0, 8)),
            Some(PanEvent::Rejected)
        );
    }

    #[test]
    fn release_reports_translation_and_velocity() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(0.0, 100.0, 0));
        for step in 1..=6 {
            pan.on_pointer_event(&PointerEvent::moved(step as f32 * 10.0, 100.0, step * 10));
        }
        match pan.on_pointer_event(&PointerEvent::up(70.0, 100.0, 70)) {
            Some(PanEvent::End {
                translation_x,
                velocity_x,
            }) => {
                assert_eq!(translation_x, 70.0);
                assert!(velocity_x > 500.0, "velocity {velocity_x}");
            }
            other => panic!("expected End, got {other:?}"),
        }
        assert_eq!(pan.state(), PanState::Idle);
    }

    #[test]
    fn release_velocity_is_capped() {
        let mut pan = PanGestureDetector::new(PanConfig::default().with_max_velocity(1_000.0));
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        pan.on_pointer_event(&PointerEvent::moved(200.0, 0.0, 5));
        match pan.on_pointer_event(&PointerEvent::up(400.0, 0.0, 10)) {
            Some(PanEvent::End { velocity_x, .. }) => assert_eq!(velocity_x, 1_000.0),
            other => panic!("expected End, got {other:?}"),
        }
    }

    #[test]
    fn cancel_while_active_ends_with_zero_velocity() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        pan.on_pointer_event(&PointerEvent::moved(40.0, 0.0, 10));
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::cancel(40.0, 0.0, 20)),
            Some(PanEvent::End {
                translation_x: 40.0,
                velocity_x: 0.0
            })
        );
    }

    #[test]
    fn release_before_activation_is_silent() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        pan.on_pointer_event(&PointerEvent::moved(4.0, 0.0, 10));
        assert_eq!(pan.on_pointer_event(&PointerEvent::up(4.0, 0.0, 20)), None);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut pan = detector();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::down(200.0, 0.0, 5).with_id(1)),
            None
        );
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::moved(260.0, 0.0, 10).with_id(1)),
            None
        );
        assert_eq!(pan.state(), PanState::Pending);
    }

    #[test]
    fn config_validation() {
        assert!(PanConfig::default().is_valid());
        assert!(!PanConfig::default().with_min_distance(f32::NAN).is_valid());
        assert!(!PanConfig::default().with_max_velocity(0.0).is_valid());
    }
}
