use super::*;
use crate::keyboard::{KeyboardEvent, KeyboardPhase};
use sidesheet_core::DefaultScheduler;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct CountingScheduler(AtomicUsize);

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn screen(width: f32) -> ScreenGeometry {
    ScreenGeometry::new(width, 800.0).unwrap()
}

fn store(width: f32) -> DrawerStore {
    DrawerStore::new(&screen(width), Arc::new(DefaultScheduler))
}

#[test]
fn threshold_comes_from_screen_width() {
    let store = store(390.0);
    assert_eq!(store.threshold(), 390.0);
    store.set_drawer_offset(195.0);
    assert_eq!(store.progress(), 0.5);
    assert!(ScreenGeometry::new(0.0, 800.0).is_err());
}

#[test]
fn progress_tracks_offset() {
    let store = store(400.0);
    for offset in [-320.0, 0.0, 100.0, 400.0, 412.0] {
        store.set_drawer_offset(offset);
        assert_eq!(store.progress(), offset / 400.0);
        assert_eq!(store.snapshot().progress, offset / 400.0);
    }
}

#[test]
fn observers_see_the_changed_cell() {
    let store = store(400.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let handle = store.observe(move |cell| sink.lock().unwrap().push(cell));

    store.set_drawer_offset(10.0);
    store.set_gesture_start_offset(10.0);
    store.apply_keyboard(KeyboardEvent::new(KeyboardPhase::Move, 0.5, 150.0));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            StoreCell::DrawerOffset,
            StoreCell::GestureStartOffset,
            StoreCell::KeyboardProgress,
            StoreCell::KeyboardHeight,
        ]
    );

    drop(handle);
    store.set_drawer_offset(20.0);
    assert_eq!(seen.lock().unwrap().len(), 4);
}

#[test]
fn identical_writes_are_silent() {
    let store = store(400.0);
    store.set_drawer_offset(42.0);
    let revision = store.revision();
    store.set_drawer_offset(42.0);
    assert_eq!(store.revision(), revision);
}

#[test]
fn writes_request_frames() {
    let scheduler = Arc::new(CountingScheduler(AtomicUsize::new(0)));
    let store = DrawerStore::new(&screen(400.0), scheduler.clone());
    store.set_drawer_offset(1.0);
    store.apply_keyboard(KeyboardEvent::new(KeyboardPhase::End, 1.0, 300.0));
    assert_eq!(scheduler.0.load(Ordering::SeqCst), 3);
}

#[test]
fn keyboard_input_is_sanitized() {
    let store = store(400.0);
    store.apply_keyboard(KeyboardEvent::new(KeyboardPhase::Interactive, 1.7, -20.0));
    assert_eq!(store.keyboard_progress(), 1.0);
    assert_eq!(store.keyboard_height(), 0.0);

    store.apply_keyboard(KeyboardEvent::new(KeyboardPhase::Move, f32::NAN, f32::NAN));
    assert_eq!(store.keyboard_progress(), 0.0);
    assert_eq!(store.keyboard_height(), 0.0);
}

#[test]
fn store_is_shared_across_threads() {
    let store = store(400.0);
    let writer = store.clone();
    std::thread::spawn(move || {
        writer.apply_keyboard(KeyboardEvent::new(KeyboardPhase::End, 1.0, 280.0));
    })
    .join()
    .unwrap();
    assert_eq!(store.keyboard_height(), 280.0);
}
