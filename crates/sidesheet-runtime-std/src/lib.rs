//! Standard runtime services for hosts driving the drawer engine.
//!
//! [`StdScheduler`] latches frame requests from any thread and optionally
//! wakes the host loop. [`StdRuntime`] pairs it with a [`Runtime`] and a
//! [`StdClock`] epoch so a host loop only needs `pump_frame`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use sidesheet_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::Instant;

type FrameWaker = Box<dyn Fn() + Send + Sync + 'static>;

/// Frame request latch with an optional wake-up hook.
#[derive(Default)]
pub struct StdScheduler {
    requested: AtomicBool,
    waker: ArcSwapOption<FrameWaker>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the pending frame request.
    pub fn take_frame_request(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    /// Installs `waker`, called on the requesting thread for every frame
    /// request. Replaces any previous waker.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        let waker: FrameWaker = Box::new(waker);
        self.waker.store(Some(Arc::new(waker)));
    }

    pub fn clear_frame_waker(&self) {
        self.waker.store(None);
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::Release);
        if let Some(waker) = self.waker.load_full() {
            waker();
        }
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("requested", &self.requested.load(Ordering::Acquire))
            .field("has_waker", &self.waker.load().is_some())
            .finish()
    }
}

/// Wall clock backed by [`web_time`], so the same host code runs on wasm.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Runtime, scheduler and clock for a host loop on the standard library.
#[derive(Clone)]
pub struct StdRuntime {
    runtime: Runtime,
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    epoch: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::new());
        let clock = StdClock;
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            epoch: clock.now(),
            clock,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// Scheduler to hand to shared scalars and stores.
    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Nanoseconds since this runtime was created.
    pub fn frame_time_nanos(&self) -> u64 {
        self.clock.elapsed_nanos(self.epoch)
    }

    /// Runs queued UI tasks, then the frame callbacks due at
    /// `frame_time_nanos`.
    pub fn pump_frame(&self, frame_time_nanos: u64) {
        let handle = self.runtime.handle();
        handle.drain_ui();
        handle.drain_frame_callbacks(frame_time_nanos);
    }

    /// Whether animations or UI tasks are still waiting for a frame.
    pub fn needs_frame(&self) -> bool {
        self.runtime.needs_frame()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("needs_frame", &self.needs_frame())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
