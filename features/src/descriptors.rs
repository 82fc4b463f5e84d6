//! Shape descriptors: per-drawing scalar functions over the stroke set.
//!
//! Geometry treats all stroke points as one unordered cloud, so every
//! descriptor starts by flattening the paths.

use crate::raster;
use geometry::{Path, Point, convex_hull, min_bounding_box, polygon};
use ndarray::Array1;
use sketch_helpers::Float;

/// Side length of the raster grid behind the `Complexity` descriptor and the
/// pixel-intensity feature vector.
pub const RASTER_SIZE: usize = 20;

/// A scalar shape descriptor. The active set of descriptors determines the
/// feature-vector dimensionality, so callers must use the same set for
/// training and prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Descriptor {
    /// Number of strokes.
    PathCount,
    /// Total number of captured points.
    PointCount,
    /// Axis-aligned horizontal extent.
    Width,
    /// Axis-aligned vertical extent.
    Height,
    /// Ratio of the minimum bounding box's long side to its short side,
    /// both padded by one to keep single-point drawings finite.
    Elongation,
    /// Roundness of the convex hull (1 for a circle, lower otherwise).
    Roundness,
    /// Number of inked cells on a coarse raster of the drawing.
    Complexity,
}

impl Descriptor {
    pub fn name(&self) -> &'static str {
        match self {
            Descriptor::PathCount => "Path Count",
            Descriptor::PointCount => "Point Count",
            Descriptor::Width => "Width",
            Descriptor::Height => "Height",
            Descriptor::Elongation => "Elongation",
            Descriptor::Roundness => "Roundness",
            Descriptor::Complexity => "Complexity",
        }
    }

    /// The descriptor set used for the shipped datasets.
    pub fn default_set() -> Vec<Descriptor> {
        vec![
            Descriptor::Width,
            Descriptor::Height,
            Descriptor::Elongation,
            Descriptor::Roundness,
        ]
    }

    pub fn compute<F: Float>(&self, paths: &[Path<F>]) -> F {
        match self {
            Descriptor::PathCount => F::cast(paths.len()).unwrap(),
            Descriptor::PointCount => F::cast(flatten(paths).len()).unwrap(),
            Descriptor::Width => extent(paths, |p| p.x),
            Descriptor::Height => extent(paths, |p| p.y),
            Descriptor::Elongation => {
                let points = flatten(paths);
                let bbox = min_bounding_box(&points);
                let long = bbox.width.max(bbox.height);
                let short = bbox.width.min(bbox.height);
                (long + F::one()) / (short + F::one())
            }
            Descriptor::Roundness => {
                let points = flatten(paths);
                polygon::roundness(&convex_hull(&points))
            }
            Descriptor::Complexity => {
                let grid = raster::pixel_intensities::<F>(paths, RASTER_SIZE);
                F::cast(grid.iter().filter(|&&v| v != F::zero()).count()).unwrap()
            }
        }
    }
}

/// Computes the feature vector of a drawing for an active descriptor set.
pub fn extract<F: Float>(paths: &[Path<F>], descriptors: &[Descriptor]) -> Array1<F> {
    descriptors.iter().map(|d| d.compute(paths)).collect()
}

fn flatten<F: Float>(paths: &[Path<F>]) -> Vec<Point<F>> {
    paths.iter().flatten().copied().collect()
}

fn extent<F: Float>(paths: &[Path<F>], axis: impl Fn(&Point<F>) -> F) -> F {
    let points = flatten(paths);
    if points.is_empty() {
        return F::zero();
    }

    let mut min = axis(&points[0]);
    let mut max = min;
    for p in &points[1..] {
        min = min.min(axis(p));
        max = max.max(axis(p));
    }

    max - min
}
