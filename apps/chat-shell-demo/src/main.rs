//! Scripted chat screen session.
//!
//! Drives a drawer controller on the standard runtime with wall-clock
//! frames: swipes open, a keyboard transition, a backdrop tap, a close
//! from code and a fling shut. Frames are logged as they change.

use std::rc::Rc;
use std::time::Duration;

use sidesheet_drawer::{
    ColorScheme, DefaultThemeProvider, DrawerConfig, DrawerController, KeyboardBroadcaster,
    KeyboardDismisser, KeyboardEvent, KeyboardPhase, SafeAreaInsets, ScreenGeometry,
    ThemeProvider,
};
use sidesheet_foundation::PointerEvent;
use sidesheet_runtime_std::StdRuntime;
use web_time::Instant;

const SCREEN_WIDTH: f32 = 390.0;
const SCREEN_HEIGHT: f32 = 844.0;
const KEYBOARD_HEIGHT: f32 = 336.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_SETTLE_FRAMES: usize = 240;

/// Hides the scripted keyboard whenever a drag starts.
struct ScriptedKeyboard {
    signal: KeyboardBroadcaster,
}

impl ScriptedKeyboard {
    fn show(&self, steps: usize) {
        for step in 1..steps {
            let progress = step as f32 / steps as f32;
            self.signal
                .emit(KeyboardEvent::new(KeyboardPhase::Move, progress, KEYBOARD_HEIGHT));
        }
        self.signal
            .emit(KeyboardEvent::new(KeyboardPhase::End, 1.0, KEYBOARD_HEIGHT));
    }
}

impl KeyboardDismisser for ScriptedKeyboard {
    fn dismiss(&self) {
        log::info!("keyboard dismissed");
        self.signal
            .emit(KeyboardEvent::new(KeyboardPhase::End, 0.0, 0.0));
    }
}

struct Session {
    runtime: StdRuntime,
    controller: DrawerController,
    keyboard: Rc<ScriptedKeyboard>,
    event_time_ms: i64,
}

impl Session {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let runtime = StdRuntime::new();
        let screen = ScreenGeometry::new(SCREEN_WIDTH, SCREEN_HEIGHT)?
            .with_safe_area(SafeAreaInsets::new(47.0, 34.0));
        let theme = DefaultThemeProvider.theme(ColorScheme::Dark);
        let keyboard = Rc::new(ScriptedKeyboard {
            signal: KeyboardBroadcaster::new(),
        });
        let mut controller = DrawerController::new(
            screen,
            DrawerConfig::default(),
            theme,
            runtime.runtime_handle(),
        )?
        .with_keyboard_dismisser(keyboard.clone());
        controller.attach_keyboard(&keyboard.signal);
        Ok(Self {
            runtime,
            controller,
            keyboard,
            event_time_ms: 0,
        })
    }

    fn pointer(&mut self, event: PointerEvent) -> bool {
        self.controller.on_pointer_event(&event)
    }

    fn swipe(&mut self, from_x: f32, to_x: f32, y: f32, steps: i64) {
        self.event_time_ms += 1_000;
        self.pointer(PointerEvent::down(from_x, y, self.event_time_ms));
        for step in 1..=steps {
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            self.event_time_ms += 10;
            self.pointer(PointerEvent::moved(x, y, self.event_time_ms));
        }
        self.pointer(PointerEvent::up(to_x, y, self.event_time_ms));
    }

    fn tap(&mut self, x: f32, y: f32) -> bool {
        self.event_time_ms += 1_000;
        self.pointer(PointerEvent::down(x, y, self.event_time_ms));
        self.event_time_ms += 60;
        self.pointer(PointerEvent::up(x, y, self.event_time_ms))
    }

    /// Pumps wall-clock frames until the drawer rests.
    fn settle(&mut self, label: &str) {
        let started = Instant::now();
        let mut frames = 0;
        while frames < MAX_SETTLE_FRAMES
            && (self.controller.engine().is_animating() || self.runtime.needs_frame())
        {
            std::thread::sleep(FRAME_INTERVAL);
            self.runtime.pump_frame(self.runtime.frame_time_nanos());
            self.log_frame();
            frames += 1;
        }
        log::info!(
            "{label}: rested at {:.1} ({:?}) after {frames} frames in {:?}",
            self.controller.store().drawer_offset(),
            self.controller.phase(),
            started.elapsed()
        );
    }

    fn log_frame(&mut self) {
        if let Some(frame) = self.controller.frame_if_changed() {
            log::debug!(
                "offset {:.1} progress {:.3} panel {:?} overlay alpha {:.3}",
                frame.offset,
                frame.progress,
                frame.panel,
                frame.overlay_color.a()
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut session = Session::new()?;
    session.log_frame();

    log::info!("swipe right from the chat edge");
    session.swipe(12.0, 260.0, 420.0, 10);
    session.settle("open");

    log::info!("keyboard rises under the open drawer");
    session.keyboard.show(12);
    session.log_frame();

    log::info!("tap the backdrop margin beside the panel");
    let panel = session.controller.surface().panel;
    let handled = session.tap(panel.right() + 2.0, 300.0);
    log::info!("backdrop tap handled: {handled}");
    session.settle("backdrop close");

    log::info!("slow swipe, then close from code");
    session.swipe(12.0, 200.0, 420.0, 40);
    session.controller.close();
    session.settle("programmatic close");

    log::info!("reopen, then fling left");
    session.swipe(12.0, 260.0, 420.0, 10);
    session.settle("reopen");
    session.swipe(300.0, 120.0, 420.0, 6);
    session.settle("fling close");

    Ok(())
}
