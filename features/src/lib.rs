//! Feature assembly for drawing classification.
//!
//! Raw pen strokes come in as [`geometry::Path`] sets; this crate reduces
//! them to numeric feature vectors ([`descriptors`]), scales those vectors
//! onto a common range ([`normalize`]), and assembles labeled samples with a
//! training/testing split ([`dataset`]).

pub mod dataset;
pub mod descriptors;
pub mod normalize;
pub mod raster;

pub use dataset::{RawSession, build_samples, split_by_ratio};
pub use descriptors::{Descriptor, extract};
pub use normalize::{MinMax, NormalizeError};
