//! Foundation input layer for Sidesheet: pointer events, velocity tracking
//! and the pan/tap recognizers the drawer engine consumes.

pub mod gesture_constants;
pub mod input;
pub mod velocity_tracker;

pub use input::gestures::{PanConfig, PanEvent, PanGestureDetector, PanState, TapEvent, TapGesture};
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::VelocityTracker;
