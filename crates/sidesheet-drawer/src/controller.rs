//! Per-screen drawer controller.
//!
//! Owns one of each engine component, routes pointer input to the pan and
//! tap recognisers, and assembles the [`DrawerFrame`] the renderer draws.

use std::rc::Rc;

use sidesheet_core::RuntimeHandle;
use sidesheet_foundation::{PanEvent, PanGestureDetector, PointerEvent, TapGesture};
use sidesheet_ui_graphics::{Color, Rect};

use crate::config::{ConfigError, DrawerConfig, ScreenGeometry};
use crate::engine::DrawerEngine;
use crate::keyboard::{bind_keyboard, KeyboardDismisser, KeyboardSignal, KeyboardSubscription};
use crate::mappers::{map_visuals, ChatInsets, DrawerVisuals};
use crate::phase::DrawerPhase;
use crate::store::{DrawerStore, StoreSnapshot};
use crate::surface::{DrawerSurface, PanelStyle, SurfaceHit};
use crate::theme::Theme;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerFrame {
    pub phase: DrawerPhase,
    pub offset: f32,
    pub progress: f32,
    pub overlay_color: Color,
    pub container: Rect,
    pub panel: Rect,
    pub panel_style: PanelStyle,
    pub chat_insets: ChatInsets,
}

pub struct DrawerController {
    screen: ScreenGeometry,
    config: DrawerConfig,
    theme: Theme,
    engine: DrawerEngine,
    pan: PanGestureDetector,
    tap: TapGesture,
    keyboard: Option<KeyboardSubscription>,
    last_frame_key: Option<(u64, DrawerPhase)>,
}

impl DrawerController {
    pub fn new(
        screen: ScreenGeometry,
        config: DrawerConfig,
        theme: Theme,
        runtime: RuntimeHandle,
    ) -> Result<Self, ConfigError> {
        config.validate(&screen)?;
        let store = DrawerStore::new(&screen, runtime.scheduler());
        let engine = DrawerEngine::new(store, runtime, config.spring);
        log::debug!(
            "drawer controller for {}x{} screen",
            screen.width(),
            screen.height()
        );
        Ok(Self {
            screen,
            config,
            theme,
            engine,
            pan: PanGestureDetector::new(config.pan),
            tap: TapGesture::new(),
            keyboard: None,
            last_frame_key: None,
        })
    }

    pub fn with_keyboard_dismisser(mut self, dismisser: Rc<dyn KeyboardDismisser>) -> Self {
        self.engine.set_dismisser(dismisser);
        self
    }

    /// Mirrors `signal` into the store until detached or dropped. Replaces
    /// any previous subscription.
    pub fn attach_keyboard(&mut self, signal: &dyn KeyboardSignal) {
        self.keyboard = Some(bind_keyboard(signal, self.engine.store()));
    }

    pub fn detach_keyboard(&mut self) {
        if let Some(subscription) = self.keyboard.take() {
            subscription.unsubscribe();
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.last_frame_key = None;
    }

    pub fn screen(&self) -> &ScreenGeometry {
        &self.screen
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn store(&self) -> &DrawerStore {
        self.engine.store()
    }

    pub fn engine(&self) -> &DrawerEngine {
        &self.engine
    }

    pub fn phase(&self) -> DrawerPhase {
        self.engine.phase()
    }

    /// Feeds one pointer event through the pan, then the tap recogniser.
    /// Returns true when the drawer used the event.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        let pan_event = self.pan.on_pointer_event(event);
        if let Some(pan_event) = pan_event {
            self.engine.on_pan_event(pan_event);
        }
        if let Some(tap) = self.tap.on_pointer_event(event) {
            let hit = self.surface().hit_test(tap.position);
            log::trace!("tap at {:?} hit {hit:?}", tap.position);
            if hit == SurfaceHit::Backdrop {
                event.consume();
                self.close();
                return true;
            }
        }
        pan_event.is_some_and(|pan_event| pan_event != PanEvent::Rejected)
    }

    /// Springs the drawer shut.
    pub fn close(&self) {
        self.engine.close();
    }

    pub fn surface(&self) -> DrawerSurface {
        self.layout(&self.store().snapshot()).1
    }

    fn layout(&self, snapshot: &StoreSnapshot) -> (DrawerVisuals, DrawerSurface) {
        let visuals = map_visuals(snapshot, &self.screen, &self.config, &self.theme);
        let surface = DrawerSurface::layout(
            snapshot.drawer_offset,
            &visuals,
            &self.screen,
            &self.config,
            &self.theme,
        );
        (visuals, surface)
    }

    pub fn frame(&self) -> DrawerFrame {
        let snapshot = self.store().snapshot();
        let (visuals, surface) = self.layout(&snapshot);
        DrawerFrame {
            phase: self.engine.phase(),
            offset: snapshot.drawer_offset,
            progress: snapshot.progress,
            overlay_color: visuals.overlay_color,
            container: surface.container,
            panel: surface.panel,
            panel_style: surface.style,
            chat_insets: visuals.chat_insets,
        }
    }

    /// Like [`frame`](Self::frame), but `None` when neither a store value nor
    /// the phase changed since the last frame returned here.
    pub fn frame_if_changed(&mut self) -> Option<DrawerFrame> {
        let key = (self.store().revision(), self.engine.phase());
        if self.last_frame_key == Some(key) {
            return None;
        }
        self.last_frame_key = Some(key);
        Some(self.frame())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
