//! Tap gesture recogniser.
//!
//! A tap is a press released within [`DRAG_THRESHOLD`] of where it went down.
//! Any consumed event for the tracked pointer (typically by an active pan
//! seeing the same stream first) cancels the press. The recogniser never
//! consumes; whoever acts on the tap decides that.

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::input::{PointerEvent, PointerEventKind, PointerId};
use sidesheet_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    /// Release position.
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapGesture {
    slop: f32,
    press: Option<(PointerId, Point)>,
}

impl TapGesture {
    pub fn new() -> Self {
        Self::with_slop(DRAG_THRESHOLD)
    }

    pub fn with_slop(slop: f32) -> Self {
        Self { slop, press: None }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<TapEvent> {
        match event.kind {
            PointerEventKind::Down => {
                if self.press.is_none() && !event.is_consumed() {
                    self.press = Some((event.id, event.position));
                }
                None
            }
            PointerEventKind::Move => {
                if let Some((id, origin)) = self.press {
                    if id == event.id
                        && (event.is_consumed() || event.position.distance_to(origin) > self.slop)
                    {
                        self.reset();
                    }
                }
                None
            }
            PointerEventKind::Up => {
                let (id, origin) = self.press?;
                if id != event.id {
                    return None;
                }
                self.reset();
                if event.is_consumed() || event.position.distance_to(origin) > self.slop {
                    return None;
                }
                Some(TapEvent {
                    position: event.position,
                })
            }
            PointerEventKind::Cancel => {
                if matches!(self.press, Some((id, _)) if id == event.id) {
                    self.reset();
                }
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.press = None;
    }
}

impl Default for TapGesture {
    fn default() -> Self {
        Self::new()
    }
}
