use super::*;
use sidesheet_core::SharedScalar;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::AtomicUsize;

#[test]
fn scalar_write_requests_frame() {
    let runtime = StdRuntime::new();
    let cell = SharedScalar::with_scheduler(0.0, runtime.scheduler());
    assert!(!runtime.take_frame_request());

    cell.set(1.0);
    assert!(runtime.take_frame_request(), "write should request a frame");
    assert!(!runtime.take_frame_request(), "request is consumed once taken");
}

#[test]
fn waker_runs_on_request_until_cleared() {
    let runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    runtime.set_frame_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let cell = SharedScalar::with_scheduler(0.0, runtime.scheduler());
    let writer = cell.clone();
    std::thread::spawn(move || writer.set(3.0)).join().unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    runtime.clear_frame_waker();
    cell.set(4.0);
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
}

#[test]
fn pump_frame_runs_ui_tasks_then_callbacks() {
    let runtime = StdRuntime::new();
    let handle = runtime.runtime_handle();
    let order = Rc::new(Cell::new(0u32));

    let ui_order = order.clone();
    handle.enqueue_ui_task(Box::new(move || {
        assert_eq!(ui_order.get(), 0);
        ui_order.set(1);
    }));
    let frame_order = order.clone();
    let _registration = runtime.frame_clock().with_frame_nanos(move |time| {
        assert_eq!(time, 42);
        assert_eq!(frame_order.get(), 1);
        frame_order.set(2);
    });
    assert!(runtime.needs_frame());

    runtime.pump_frame(42);
    assert_eq!(order.get(), 2);
    assert!(!runtime.needs_frame());
}

#[test]
fn frame_time_is_monotonic() {
    let runtime = StdRuntime::new();
    let first = runtime.frame_time_nanos();
    let second = runtime.frame_time_nanos();
    assert!(second >= first);
}

#[test]
fn clock_measures_from_instant() {
    let clock = StdClock;
    let start = clock.now();
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(clock.elapsed_nanos(start) >= 2_000_000);
}
