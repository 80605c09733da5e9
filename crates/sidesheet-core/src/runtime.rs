//! Single-threaded runtime for the gesture/animation context.
//!
//! The runtime owns two queues: one-shot frame callbacks, run with the frame
//! timestamp when the host drains a frame, and UI tasks, fire-and-forget side
//! effects run on [`RuntimeHandle::drain_ui`]. Either queue becoming non-empty
//! asks the host [`RuntimeScheduler`] for a frame.

use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;
use crate::FrameClock;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::thread::ThreadId;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;
type UiTask = Box<dyn FnOnce() + 'static>;

#[derive(Default)]
struct Queues {
    frame: Vec<(FrameCallbackId, FrameCallback)>,
    ui: VecDeque<UiTask>,
    next_id: FrameCallbackId,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    queues: RefCell<Queues>,
    owner: ThreadId,
}

impl RuntimeInner {
    fn request_frame(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    /// Clears `needs_frame` once both queues are empty. While a queue is
    /// borrowed by a drain in progress the flag is left alone.
    fn refresh_needs_frame(&self) {
        if let Ok(queues) = self.queues.try_borrow() {
            if queues.frame.is_empty() && queues.ui.is_empty() {
                self.needs_frame.set(false);
            }
        }
    }

    fn push_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = {
            let mut queues = self.queues.borrow_mut();
            queues.next_id += 1;
            let id = queues.next_id;
            queues.frame.push((id, callback));
            id
        };
        self.request_frame();
        id
    }

    fn remove_frame_callback(&self, id: FrameCallbackId) {
        self.queues
            .borrow_mut()
            .frame
            .retain(|(entry_id, _)| *entry_id != id);
        self.refresh_needs_frame();
    }

    fn run_frame(&self, frame_time_nanos: u64) {
        // Callbacks registered while these run land in the fresh queue and
        // wait for the next frame.
        let due = std::mem::take(&mut self.queues.borrow_mut().frame);
        for (_, callback) in due {
            callback(frame_time_nanos);
        }
        self.refresh_needs_frame();
    }

    fn push_ui_task(&self, task: UiTask) {
        self.queues.borrow_mut().ui.push_back(task);
        self.request_frame();
    }

    fn run_ui_tasks(&self) {
        // Tasks may enqueue follow-ups; those run in the same drain.
        while let Some(task) = self.pop_ui_task() {
            task();
        }
        self.refresh_needs_frame();
    }

    fn pop_ui_task(&self) -> Option<UiTask> {
        self.queues.borrow_mut().ui.pop_front()
    }
}

/// Owner of the runtime state. Hand [`RuntimeHandle`]s to components; they
/// go inert once the runtime is dropped.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                scheduler,
                needs_frame: Cell::new(false),
                queues: RefCell::new(Queues::default()),
                owner: std::thread::current().id(),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
            scheduler: Arc::clone(&self.inner.scheduler),
            owner: self.inner.owner,
        }
    }

    /// True while frame callbacks or UI tasks are waiting.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Scheduler for hosts that poll [`Runtime::needs_frame`] instead of being
/// woken.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak, cloneable access to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    scheduler: Arc<dyn RuntimeScheduler>,
    owner: ThreadId,
}

impl RuntimeHandle {
    fn with_inner<R>(&self, f: impl FnOnce(&RuntimeInner) -> R) -> Option<R> {
        self.inner.upgrade().map(|inner| f(&inner))
    }

    pub fn schedule(&self) {
        self.with_inner(RuntimeInner::request_frame);
    }

    /// Scheduler shared with the owning runtime. Shared scalars use it to
    /// request frames from any thread.
    pub fn scheduler(&self) -> Arc<dyn RuntimeScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn enqueue_ui_task(&self, task: Box<dyn FnOnce() + 'static>) {
        if self.with_inner(|inner| inner.push_ui_task(task)).is_none() {
            log::debug!("runtime dropped; discarding ui task");
        }
    }

    pub fn drain_ui(&self) {
        self.with_inner(RuntimeInner::run_ui_tasks);
    }

    pub fn has_pending_ui(&self) -> bool {
        self.with_inner(|inner| {
            inner
                .queues
                .try_borrow()
                .map_or(true, |queues| !queues.ui.is_empty())
        })
        .unwrap_or(false)
    }

    /// Queues `callback` for the next drained frame. `None` once the runtime
    /// is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.with_inner(|inner| inner.push_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.with_inner(|inner| inner.remove_frame_callback(id));
    }

    /// Runs every callback queued before this call with `frame_time_nanos`.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.with_inner(|inner| inner.run_frame(frame_time_nanos));
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn needs_frame(&self) -> bool {
        self.with_inner(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.with_inner(|inner| {
            inner
                .queues
                .try_borrow()
                .map_or(true, |queues| !queues.frame.is_empty())
        })
        .unwrap_or(false)
    }

    /// Debug check that the caller is on the thread that built the runtime.
    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.owner,
            "animation driven off the runtime's thread"
        );
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
