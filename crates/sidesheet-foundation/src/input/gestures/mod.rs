pub mod pan;
pub mod tap;

pub use pan::{PanConfig, PanEvent, PanGestureDetector, PanState};
pub use tap::{TapEvent, TapGesture};
