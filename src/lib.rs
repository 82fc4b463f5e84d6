//! Free-hand drawing classification.
//!
//! Pen strokes come in as point paths, the [`geometry`] engine reduces them
//! to shape descriptors, [`features`] assembles and normalizes feature
//! vectors, and the [`knn`] and [`mlp`] classifiers map those vectors to
//! object labels.
//!
//! Everything is synchronous and operates on caller-owned data; file and
//! network I/O, scheduling, and rendering belong to the caller.

pub use features::{Descriptor, MinMax, RawSession, build_samples, extract, split_by_ratio};
pub use geometry::{Path, Point, convex_hull, min_bounding_box, polygon};
pub use knn::{Knn, KnnError, KnnPrediction};
pub use mlp::{Level, Mlp, MlpError};
pub use sketch_helpers::{
    Classifier, Distance, Float, L1Dist, L2Dist, LInfDist, Prediction, Sample,
};
