//! Animated scalar store for one drawer screen.
//!
//! Four writable cells back the engine. `progress` is not a cell: it is
//! recomputed from `drawer_offset` on every read, so it always equals
//! `drawer_offset / threshold`. The store is `Send + Sync` and cheap to clone;
//! keyboard events may arrive from any thread while the gesture runtime
//! drives the offset.

use std::sync::Arc;

use sidesheet_core::{DerivedScalar, ObserverHandle, RuntimeScheduler, SharedScalar};

use crate::config::ScreenGeometry;
use crate::keyboard::KeyboardEvent;

/// Names a writable store cell in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCell {
    /// Also changes `progress`.
    DrawerOffset,
    GestureStartOffset,
    KeyboardProgress,
    KeyboardHeight,
}

impl StoreCell {
    pub const ALL: [StoreCell; 4] = [
        StoreCell::DrawerOffset,
        StoreCell::GestureStartOffset,
        StoreCell::KeyboardProgress,
        StoreCell::KeyboardHeight,
    ];
}

/// Copy of every store value taken at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSnapshot {
    pub drawer_offset: f32,
    pub gesture_start_offset: f32,
    pub progress: f32,
    pub keyboard_progress: f32,
    pub keyboard_height: f32,
    pub threshold: f32,
}

#[derive(Clone)]
pub struct DrawerStore {
    threshold: f32,
    drawer_offset: SharedScalar,
    gesture_start_offset: SharedScalar,
    keyboard_progress: SharedScalar,
    keyboard_height: SharedScalar,
    progress: DerivedScalar,
}

impl DrawerStore {
    /// Store for `screen`; the open threshold is the screen width.
    pub fn new(screen: &ScreenGeometry, scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let threshold = screen.threshold();
        let drawer_offset = SharedScalar::with_scheduler(0.0, scheduler.clone());
        let progress = DerivedScalar::new(std::slice::from_ref(&drawer_offset), move |values| {
            values[0] / threshold
        });
        Self {
            threshold,
            drawer_offset,
            gesture_start_offset: SharedScalar::with_scheduler(0.0, scheduler.clone()),
            keyboard_progress: SharedScalar::with_scheduler(0.0, scheduler.clone()),
            keyboard_height: SharedScalar::with_scheduler(0.0, scheduler),
            progress,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn drawer_offset(&self) -> f32 {
        self.drawer_offset.get()
    }

    pub fn gesture_start_offset(&self) -> f32 {
        self.gesture_start_offset.get()
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub fn keyboard_progress(&self) -> f32 {
        self.keyboard_progress.get()
    }

    pub fn keyboard_height(&self) -> f32 {
        self.keyboard_height.get()
    }

    pub fn cell(&self, cell: StoreCell) -> &SharedScalar {
        match cell {
            StoreCell::DrawerOffset => &self.drawer_offset,
            StoreCell::GestureStartOffset => &self.gesture_start_offset,
            StoreCell::KeyboardProgress => &self.keyboard_progress,
            StoreCell::KeyboardHeight => &self.keyboard_height,
        }
    }

    /// Sum of all cell revisions; changes on every effective write.
    pub fn revision(&self) -> u64 {
        StoreCell::ALL
            .iter()
            .map(|cell| self.cell(*cell).revision())
            .sum()
    }

    pub(crate) fn set_drawer_offset(&self, value: f32) {
        self.drawer_offset.set(value);
    }

    pub(crate) fn set_gesture_start_offset(&self, value: f32) {
        self.gesture_start_offset.set(value);
    }

    /// Mirrors a keyboard transition frame into the keyboard cells.
    ///
    /// Out-of-range input is clamped first.
    pub fn apply_keyboard(&self, event: KeyboardEvent) {
        let sanitized = event.sanitized();
        if sanitized != event {
            log::warn!("sanitized keyboard event {event:?} to {sanitized:?}");
        }
        log::trace!(
            "keyboard {:?}: progress {} height {}",
            sanitized.phase,
            sanitized.progress,
            sanitized.height
        );
        self.keyboard_progress.set(sanitized.progress);
        self.keyboard_height.set(sanitized.height);
    }

    /// Calls `callback` synchronously after every effective write, on the
    /// writing thread, with the cell that changed.
    pub fn observe(
        &self,
        callback: impl Fn(StoreCell) + Send + Sync + 'static,
    ) -> StoreObserverHandle {
        let callback = Arc::new(callback);
        let handles = StoreCell::ALL
            .iter()
            .map(|cell| {
                let cell_name = *cell;
                let callback = callback.clone();
                self.cell(cell_name).observe(move |_| callback(cell_name))
            })
            .collect();
        StoreObserverHandle { _handles: handles }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let drawer_offset = self.drawer_offset.get();
        StoreSnapshot {
            drawer_offset,
            gesture_start_offset: self.gesture_start_offset.get(),
            progress: drawer_offset / self.threshold,
            keyboard_progress: self.keyboard_progress.get(),
            keyboard_height: self.keyboard_height.get(),
            threshold: self.threshold,
        }
    }
}

impl std::fmt::Debug for DrawerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawerStore")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

/// Keeps a store observer registered; unregisters on drop.
#[must_use = "dropping the handle unregisters the observer"]
pub struct StoreObserverHandle {
    _handles: Vec<ObserverHandle>,
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
