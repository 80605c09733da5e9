//! Pure math/data for drawing in Sidesheet
//!
//! Color and geometry primitives consumed by the drawer mappers and the
//! drawer surface.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
}
