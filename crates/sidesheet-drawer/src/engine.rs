//! Gesture-to-animation engine.
//!
//! Turns pan events into drawer offset writes and settle animations. Runs on
//! the gesture/animation runtime; the offset cell it writes lives in the
//! thread-safe store.

use std::cell::Cell;
use std::rc::Rc;

use sidesheet_animation::{Animatable, AnimationEnd, RigidDecaySpec, SpringSpec};
use sidesheet_core::RuntimeHandle;
use sidesheet_foundation::PanEvent;

use crate::keyboard::KeyboardDismisser;
use crate::phase::{DrawerEvent, DrawerPhase};
use crate::policy::{apply_resistance, close_target, resolve_release, SettleTarget};
use crate::store::{DrawerStore, StoreCell};

pub struct DrawerEngine {
    store: DrawerStore,
    runtime: RuntimeHandle,
    animatable: Animatable,
    phase: Rc<Cell<DrawerPhase>>,
    spring: SpringSpec,
    dismisser: Option<Rc<dyn KeyboardDismisser>>,
}

impl DrawerEngine {
    pub fn new(store: DrawerStore, runtime: RuntimeHandle, spring: SpringSpec) -> Self {
        let animatable = Animatable::new(store.cell(StoreCell::DrawerOffset).clone(), runtime.clone());
        let phase = DrawerPhase::idle_at(store.drawer_offset(), store.threshold());
        Self {
            store,
            runtime,
            animatable,
            phase: Rc::new(Cell::new(phase)),
            spring,
            dismisser: None,
        }
    }

    pub fn with_dismisser(mut self, dismisser: Rc<dyn KeyboardDismisser>) -> Self {
        self.dismisser = Some(dismisser);
        self
    }

    pub fn set_dismisser(&mut self, dismisser: Rc<dyn KeyboardDismisser>) {
        self.dismisser = Some(dismisser);
    }

    pub fn phase(&self) -> DrawerPhase {
        self.phase.get()
    }

    pub fn store(&self) -> &DrawerStore {
        &self.store
    }

    pub fn is_animating(&self) -> bool {
        self.animatable.is_running()
    }

    pub fn on_pan_event(&self, event: PanEvent) {
        match event {
            PanEvent::Start { translation_x } => {
                self.drag_start();
                self.drag_update(translation_x);
            }
            PanEvent::Update { translation_x } => self.drag_update(translation_x),
            PanEvent::End {
                translation_x,
                velocity_x,
            } => {
                self.drag_update(translation_x);
                self.release(velocity_x);
            }
            PanEvent::Rejected => log::trace!("pan ceded to vertical scrolling"),
        }
    }

    /// Takes over the offset from wherever it is, stopping any settle.
    pub fn drag_start(&self) {
        self.runtime.assert_ui_thread();
        self.animatable.stop();
        let offset = self.store.drawer_offset();
        self.store.set_gesture_start_offset(offset);
        self.transition(DrawerEvent::DragStart { offset });
        if let Some(dismisser) = self.dismisser.clone() {
            self.runtime
                .enqueue_ui_task(Box::new(move || dismisser.dismiss()));
        }
    }

    /// Moves the drawer to the drag start offset plus `translation_x`, with
    /// resistance past the threshold. Ignored unless dragging.
    pub fn drag_update(&self, translation_x: f32) {
        if !self.phase.get().is_dragging() {
            return;
        }
        let candidate = self.store.gesture_start_offset() + translation_x;
        let offset = apply_resistance(candidate, self.store.threshold());
        log::trace!("drag candidate {candidate} -> offset {offset}");
        self.store.set_drawer_offset(offset);
        self.transition(DrawerEvent::DragUpdate);
    }

    /// Ends the drag and starts the settle the policy picks. Ignored unless
    /// dragging.
    pub fn release(&self, velocity_x: f32) {
        if !self.phase.get().is_dragging() {
            return;
        }
        let offset = self.store.drawer_offset();
        let threshold = self.store.threshold();
        let target = resolve_release(offset, velocity_x, threshold);
        log::debug!("release at {offset} with velocity {velocity_x}: {target:?}");
        self.transition(DrawerEvent::Release {
            offset,
            velocity: velocity_x,
            threshold,
        });
        self.settle(target);
    }

    /// Springs the drawer shut from any phase.
    pub fn close(&self) {
        self.transition(DrawerEvent::Close);
        self.settle(close_target());
    }

    fn transition(&self, event: DrawerEvent) {
        let previous = self.phase.get();
        let next = previous.on_event(event);
        if next != previous && !matches!(event, DrawerEvent::DragUpdate) {
            log::debug!("drawer phase {previous:?} -> {next:?}");
        }
        self.phase.set(next);
    }

    fn settle(&self, target: SettleTarget) {
        let phase = self.phase.clone();
        let store = self.store.clone();
        let on_end = move |end: AnimationEnd| {
            if end == AnimationEnd::Interrupted {
                return;
            }
            let previous = phase.get();
            let next = previous.on_event(DrawerEvent::SettleFinished {
                offset: store.drawer_offset(),
                threshold: store.threshold(),
            });
            log::debug!("settle {end:?}: drawer phase {previous:?} -> {next:?}");
            phase.set(next);
        };
        match target {
            SettleTarget::Spring { target } => {
                self.animatable.animateTo(target, self.spring, 0.0, on_end);
            }
            SettleTarget::Decay(config) => {
                let spec = RigidDecaySpec::new(config.deceleration)
                    .with_velocity_factor(config.velocity_factor)
                    .with_clamp(config.clamp.0, config.clamp.1);
                self.animatable.animateDecay(spec, config.velocity, on_end);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
