//! 2-D geometry for free-hand drawings.
//!
//! Coordinates follow the capture surface: the x-axis points rightward and
//! the y-axis points downward. All functions treat their input as an
//! unordered point cloud; stroke order only matters for rendering, which is
//! not this crate's concern.

mod hull;
mod point;
pub mod polygon;

pub use hull::{BoundingBox, convex_hull, min_bounding_box, orientation};
pub use point::Point;

/// One continuous pen stroke, in drawing order.
pub type Path<F> = Vec<Point<F>>;
