//! Seams between the engine and its host.

/// Asks the host for a frame.
///
/// Shared scalars call this from whichever thread wrote them, so
/// implementations must be thread-safe and cheap.
pub trait RuntimeScheduler: Send + Sync {
    fn schedule_frame(&self);
}

/// Monotonic time source for frame timestamps.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync;

    fn now(&self) -> Self::Instant;

    /// Nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}
