//! Headless robot for end-to-end drawer tests.
//!
//! [`DrawerRobot`] owns a runtime, a controller and a keyboard signal, and
//! drives them with synthetic pointer streams and deterministic frame time.
//!
//! # Example
//!
//! ```
//! use sidesheet_testing::DrawerRobot;
//! use sidesheet_drawer::DrawerPhase;
//!
//! let mut robot = DrawerRobot::new(400.0, 800.0);
//! robot.drag(10.0, 400.0, 250.0, 400.0);
//! robot.wait_for_idle();
//! assert_eq!(robot.phase(), DrawerPhase::IdleOpen);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use sidesheet_core::{Runtime, RuntimeScheduler};
use sidesheet_drawer::{
    DrawerConfig, DrawerController, DrawerFrame, DrawerPhase, KeyboardBroadcaster,
    KeyboardDismisser, KeyboardEvent, KeyboardPhase, ScreenGeometry, Theme,
};
use sidesheet_foundation::PointerEvent;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One display frame at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Frames `wait_for_idle` pumps before giving up.
const MAX_IDLE_FRAMES: usize = 600;

/// Gap between synthetic pointer samples.
const POINTER_STEP_MS: i64 = 10;

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

struct RecordingDismisser {
    count: Rc<Cell<usize>>,
}

impl KeyboardDismisser for RecordingDismisser {
    fn dismiss(&self) {
        self.count.set(self.count.get() + 1);
    }
}

pub struct DrawerRobot {
    runtime: Runtime,
    scheduler: Arc<CountingScheduler>,
    controller: DrawerController,
    keyboard: KeyboardBroadcaster,
    dismissals: Rc<Cell<usize>>,
    frame_time_nanos: u64,
    event_time_ms: i64,
    pointer: Option<(f32, f32)>,
}

impl DrawerRobot {
    /// Robot for a `width` x `height` screen with the default config and the
    /// light theme.
    ///
    /// # Panics
    ///
    /// Panics on a degenerate screen size.
    pub fn new(width: f32, height: f32) -> Self {
        let screen = match ScreenGeometry::new(width, height) {
            Ok(screen) => screen,
            Err(err) => panic!("robot screen: {err}"),
        };
        Self::with_config(screen, DrawerConfig::default(), Theme::light())
    }

    /// # Panics
    ///
    /// Panics when `config` does not validate against `screen`.
    pub fn with_config(screen: ScreenGeometry, config: DrawerConfig, theme: Theme) -> Self {
        let scheduler = Arc::new(CountingScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let dismissals = Rc::new(Cell::new(0));
        let controller = match DrawerController::new(screen, config, theme, runtime.handle()) {
            Ok(controller) => controller,
            Err(err) => panic!("robot config: {err}"),
        };
        let mut controller = controller.with_keyboard_dismisser(Rc::new(RecordingDismisser {
            count: dismissals.clone(),
        }));
        let keyboard = KeyboardBroadcaster::new();
        controller.attach_keyboard(&keyboard);
        Self {
            runtime,
            scheduler,
            controller,
            keyboard,
            dismissals,
            frame_time_nanos: 0,
            event_time_ms: 0,
            pointer: None,
        }
    }

    pub fn controller(&self) -> &DrawerController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DrawerController {
        &mut self.controller
    }

    pub fn keyboard(&self) -> &KeyboardBroadcaster {
        &self.keyboard
    }

    pub fn frame(&self) -> DrawerFrame {
        self.controller.frame()
    }

    pub fn phase(&self) -> DrawerPhase {
        self.controller.phase()
    }

    pub fn offset(&self) -> f32 {
        self.controller.store().drawer_offset()
    }

    /// Keyboard dismissals that have run so far.
    pub fn dismiss_count(&self) -> usize {
        self.dismissals.get()
    }

    /// Frame requests the store and runtime have made so far.
    pub fn frame_requests(&self) -> usize {
        self.scheduler.requests.load(Ordering::Relaxed)
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Runs queued UI tasks and one frame.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        let handle = self.runtime.handle();
        handle.drain_ui();
        handle.drain_frame_callbacks(self.frame_time_nanos);
    }

    /// Pumps whole frames covering at least `nanos`.
    pub fn advance_time(&mut self, nanos: u64) {
        let frames = nanos.div_ceil(FRAME_NANOS);
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Pumps frames until nothing is animating or queued.
    ///
    /// Returns the number of frames pumped.
    pub fn wait_for_idle(&mut self) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while frames < MAX_IDLE_FRAMES
            && (self.controller.engine().is_animating()
                || handle.has_pending_ui()
                || handle.has_frame_callbacks())
        {
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Pumps frames until the drawer rests, recording the offset after each.
    pub fn record_offsets_until_idle(&mut self) -> Vec<f32> {
        let mut offsets = vec![self.offset()];
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.controller.engine().is_animating() {
                break;
            }
            self.advance_frame();
            offsets.push(self.offset());
        }
        offsets
    }

    fn send(&mut self, event: PointerEvent) -> bool {
        self.controller.on_pointer_event(&event)
    }

    pub fn press(&mut self, x: f32, y: f32) -> bool {
        self.event_time_ms += 1_000;
        self.pointer = Some((x, y));
        let time = self.event_time_ms;
        self.send(PointerEvent::down(x, y, time))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.event_time_ms += POINTER_STEP_MS;
        self.pointer = Some((x, y));
        let time = self.event_time_ms;
        self.send(PointerEvent::moved(x, y, time))
    }

    /// Lifts the pointer where it last was.
    pub fn release(&mut self) -> bool {
        let Some((x, y)) = self.pointer.take() else {
            return false;
        };
        let time = self.event_time_ms;
        self.send(PointerEvent::up(x, y, time))
    }

    /// Cancels the pointer stream, as a system gesture would.
    pub fn cancel(&mut self) -> bool {
        let Some((x, y)) = self.pointer.take() else {
            return false;
        };
        let time = self.event_time_ms;
        self.send(PointerEvent::cancel(x, y, time))
    }

    pub fn click_at(&mut self, x: f32, y: f32) -> bool {
        self.press(x, y);
        self.event_time_ms += 60;
        self.release()
    }

    /// Drags in 10 steps, 10 ms apart, then releases.
    pub fn drag(&mut self, from_x: f32, from_y: f32, to_x: f32, to_y: f32) {
        self.drag_with_steps(from_x, from_y, to_x, to_y, 10);
    }

    /// Drags in `steps` moves, 10 ms apart, then releases. More steps over
    /// the same distance give a slower release.
    pub fn drag_with_steps(
        &mut self,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
        steps: usize,
    ) {
        self.press(from_x, from_y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.move_to(from_x + (to_x - from_x) * t, from_y + (to_y - from_y) * t);
        }
        self.release();
    }

    /// Drags to `to_x`, holds still past the velocity window, then releases
    /// with zero velocity.
    pub fn drag_and_hold(&mut self, from_x: f32, y: f32, to_x: f32) {
        self.press(from_x, y);
        for step in 1..=10 {
            let t = step as f32 / 10.0;
            self.move_to(from_x + (to_x - from_x) * t, y);
        }
        self.event_time_ms += 200;
        self.move_to(to_x, y);
        self.release();
    }

    pub fn emit_keyboard(&mut self, phase: KeyboardPhase, progress: f32, height: f32) {
        self.keyboard
            .emit(KeyboardEvent::new(phase, progress, height));
    }

    /// Plays a keyboard show transition over `frames` move events.
    pub fn show_keyboard(&mut self, height: f32, frames: usize) {
        let frames = frames.max(1);
        for frame in 1..frames {
            self.emit_keyboard(KeyboardPhase::Move, frame as f32 / frames as f32, height);
        }
        self.emit_keyboard(KeyboardPhase::End, 1.0, height);
    }

    /// Plays a keyboard hide transition over `frames` move events.
    pub fn hide_keyboard(&mut self, height: f32, frames: usize) {
        let frames = frames.max(1);
        for frame in 1..frames {
            self.emit_keyboard(
                KeyboardPhase::Move,
                1.0 - frame as f32 / frames as f32,
                height,
            );
        }
        self.emit_keyboard(KeyboardPhase::End, 0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_time_rounds_up_to_whole_frames() {
        let mut robot = DrawerRobot::new(400.0, 800.0);
        robot.advance_time(FRAME_NANOS + 1);
        assert_eq!(robot.frame_time_nanos(), 2 * FRAME_NANOS);
    }

    #[test]
    fn wait_for_idle_on_idle_drawer_pumps_nothing() {
        let mut robot = DrawerRobot::new(400.0, 800.0);
        assert_eq!(robot.wait_for_idle(), 0);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut robot = DrawerRobot::new(400.0, 800.0);
        assert!(!robot.release());
        assert!(!robot.cancel());
    }

    #[test]
    fn drag_opens_and_counts_dismissal() {
        let mut robot = DrawerRobot::new(400.0, 800.0);
        robot.drag(10.0, 400.0, 250.0, 400.0);
        assert!(robot.wait_for_idle() > 0);
        assert_eq!(robot.phase(), DrawerPhase::IdleOpen);
        assert_eq!(robot.dismiss_count(), 1);
        assert!(robot.frame_requests() > 0);
    }
}
