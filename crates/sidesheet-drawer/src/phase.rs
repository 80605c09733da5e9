//! Motion regimes of the drawer offset and the transition table between
//! them.

use crate::policy::{resolve_release, SettleTarget};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleKind {
    Spring { target: f32 },
    Decay,
}

impl From<SettleTarget> for SettleKind {
    fn from(target: SettleTarget) -> Self {
        match target {
            SettleTarget::Spring { target } => SettleKind::Spring { target },
            SettleTarget::Decay(_) => SettleKind::Decay,
        }
    }
}

/// Exactly one of these describes the drawer offset at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawerPhase {
    #[default]
    IdleClosed,
    IdleOpen,
    /// Finger down and tracking; `start_offset` is the offset at drag start.
    Dragging { start_offset: f32 },
    Settling(SettleKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerEvent {
    /// A pan activated with the drawer at `offset`.
    DragStart { offset: f32 },
    DragUpdate,
    /// The finger lifted.
    Release {
        offset: f32,
        velocity: f32,
        threshold: f32,
    },
    /// The settle animation converged or clamped at `offset`.
    SettleFinished { offset: f32, threshold: f32 },
    /// Backdrop tap or programmatic close.
    Close,
}

impl DrawerPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, DrawerPhase::IdleClosed | DrawerPhase::IdleOpen)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DrawerPhase::Dragging { .. })
    }

    pub fn is_settling(&self) -> bool {
        matches!(self, DrawerPhase::Settling(_))
    }

    /// Idle phase for a drawer resting at `offset`: open from half the
    /// threshold upwards.
    pub fn idle_at(offset: f32, threshold: f32) -> DrawerPhase {
        if offset >= threshold * 0.5 {
            DrawerPhase::IdleOpen
        } else {
            DrawerPhase::IdleClosed
        }
    }

    /// Transition table. Events that do not apply to the current phase leave
    /// it unchanged.
    pub fn on_event(self, event: DrawerEvent) -> DrawerPhase {
        match (self, event) {
            // A new drag preempts anything, including a settle in flight.
            (DrawerPhase::Dragging { .. }, DrawerEvent::DragStart { .. }) => self,
            (_, DrawerEvent::DragStart { offset }) => DrawerPhase::Dragging {
                start_offset: offset,
            },
            (DrawerPhase::Dragging { .. }, DrawerEvent::DragUpdate) => self,
            (
                DrawerPhase::Dragging { .. },
                DrawerEvent::Release {
                    offset,
                    velocity,
                    threshold,
                },
            ) => DrawerPhase::Settling(resolve_release(offset, velocity, threshold).into()),
            (_, DrawerEvent::Close) => DrawerPhase::Settling(SettleKind::Spring { target: 0.0 }),
            (DrawerPhase::Settling(_), DrawerEvent::SettleFinished { offset, threshold }) => {
                DrawerPhase::idle_at(offset, threshold)
            }
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 400.0;

    fn dragging() -> DrawerPhase {
        DrawerPhase::IdleClosed.on_event(DrawerEvent::DragStart { offset: 0.0 })
    }

    #[test]
    fn drag_start_snapshots_offset() {
        assert_eq!(
            DrawerPhase::IdleOpen.on_event(DrawerEvent::DragStart { offset: 400.0 }),
            DrawerPhase::Dragging {
                start_offset: 400.0
            }
        );
    }

    #[test]
    fn drag_start_preempts_settling() {
        let settling = DrawerPhase::Settling(SettleKind::Decay);
        assert_eq!(
            settling.on_event(DrawerEvent::DragStart { offset: 123.0 }),
            DrawerPhase::Dragging {
                start_offset: 123.0
            }
        );
    }

    #[test]
    fn release_resolves_through_policy() {
        let release = |offset, velocity| {
            dragging().on_event(DrawerEvent::Release {
                offset,
                velocity,
                threshold: W,
            })
        };
        assert_eq!(
            release(10.0, 500.0),
            DrawerPhase::Settling(SettleKind::Spring { target: W })
        );
        assert_eq!(release(200.0, -800.0), DrawerPhase::Settling(SettleKind::Decay));
        assert_eq!(
            release(380.0, -50.0),
            DrawerPhase::Settling(SettleKind::Spring { target: W })
        );
    }

    #[test]
    fn release_outside_drag_is_ignored() {
        let event = DrawerEvent::Release {
            offset: 0.0,
            velocity: 100.0,
            threshold: W,
        };
        assert_eq!(DrawerPhase::IdleClosed.on_event(event), DrawerPhase::IdleClosed);
        assert_eq!(DrawerPhase::IdleClosed.on_event(DrawerEvent::DragUpdate), DrawerPhase::IdleClosed);
    }

    #[test]
    fn close_springs_to_zero_from_anywhere() {
        let closing = DrawerPhase::Settling(SettleKind::Spring { target: 0.0 });
        for phase in [
            DrawerPhase::IdleClosed,
            DrawerPhase::IdleOpen,
            dragging(),
            DrawerPhase::Settling(SettleKind::Decay),
        ] {
            assert_eq!(phase.on_event(DrawerEvent::Close), closing);
        }
    }

    #[test]
    fn settle_finished_classifies_rest() {
        let settling = DrawerPhase::Settling(SettleKind::Spring { target: W });
        let finished = |offset| DrawerEvent::SettleFinished {
            offset,
            threshold: W,
        };
        assert_eq!(settling.on_event(finished(W)), DrawerPhase::IdleOpen);
        assert_eq!(settling.on_event(finished(0.0)), DrawerPhase::IdleClosed);
        assert_eq!(settling.on_event(finished(120.0)), DrawerPhase::IdleClosed);
        // A stale finish from an interrupted settle does not end a drag.
        assert_eq!(dragging().on_event(finished(0.0)), dragging());
    }

    #[test]
    fn exactly_one_regime_at_a_time() {
        for phase in [
            DrawerPhase::IdleClosed,
            DrawerPhase::IdleOpen,
            dragging(),
            DrawerPhase::Settling(SettleKind::Decay),
        ] {
            let flags = [phase.is_idle(), phase.is_dragging(), phase.is_settling()];
            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
        }
    }
}
