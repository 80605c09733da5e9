//! Frame clock handed to animations.

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Schedules one-shot callbacks on the next frame of a runtime.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Runs `callback` once with the timestamp of the next drained frame.
    ///
    /// Dropping or cancelling the returned registration unschedules it. On a
    /// dropped runtime the registration is inactive and `callback` never runs.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        FrameCallbackRegistration {
            pending: id.map(|id| (self.runtime.clone(), id)),
        }
    }
}

/// Pending frame callback; unschedules on drop.
#[must_use = "dropping the registration cancels the callback"]
pub struct FrameCallbackRegistration {
    pending: Option<(RuntimeHandle, FrameCallbackId)>,
}

impl FrameCallbackRegistration {
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(mut self) {
        self.unschedule();
    }

    fn unschedule(&mut self) {
        if let Some((runtime, id)) = self.pending.take() {
            runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.unschedule();
    }
}
