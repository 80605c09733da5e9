//! Frame-driven spring and decay animations for shared scalars.

mod animation;
mod decay_spec;
mod interpolate;

pub use animation::*;
pub use decay_spec::*;
pub use interpolate::*;
