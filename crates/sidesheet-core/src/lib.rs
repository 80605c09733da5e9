#![doc = r"Core runtime pieces for the Sidesheet drawer engine."]

pub mod collections;
pub mod frame_clock;
pub mod platform;
pub mod runtime;
pub mod shared_scalar;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use shared_scalar::{DerivedScalar, ObserverHandle, SharedScalar};

pub type FrameCallbackId = u64;
