//! Min-max feature scaling with a fit/apply split.
//!
//! Bounds are fitted on the training subset only and then applied to both
//! subsets, so no testing-set statistics leak into the transform. Applying
//! is deliberately unclamped: evaluation points outside the fitted range map
//! below 0 or above 1.

use ndarray::Array1;
use sketch_helpers::Float;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that can occur when fitting normalization bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// Cannot fit bounds on an empty vector set.
    EmptyDataSet,
    /// Vectors in the set have different dimensionalities.
    MismatchedDimensions,
}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::EmptyDataSet => {
                write!(f, "Cannot fit normalization bounds on an empty vector set")
            }
            NormalizeError::MismatchedDimensions => {
                write!(f, "Vectors in the set have different dimensionalities")
            }
        }
    }
}

impl Error for NormalizeError {}

/// Per-dimension (min, max) bounds fitted on a training set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct MinMax<F: Float> {
    pub min: Array1<F>,
    pub max: Array1<F>,
}

impl<F: Float> MinMax<F> {
    /// Computes per-dimension bounds in a single pass, seeded with the first
    /// vector's values.
    pub fn fit(points: &[Array1<F>]) -> Result<Self, NormalizeError> {
        let first = points.first().ok_or(NormalizeError::EmptyDataSet)?;

        let mut min = first.clone();
        let mut max = first.clone();
        for point in &points[1..] {
            if point.len() != first.len() {
                return Err(NormalizeError::MismatchedDimensions);
            }
            for (j, &value) in point.iter().enumerate() {
                min[j] = min[j].min(value);
                max[j] = max[j].max(value);
            }
        }

        Ok(MinMax { min, max })
    }

    /// Rewrites each vector in place as `(value - min) / (max - min)` per
    /// dimension, without clamping. Dimensions where `max == min` map to 0
    /// rather than dividing by zero.
    pub fn apply(&self, points: &mut [Array1<F>]) {
        for point in points.iter_mut() {
            for (j, value) in point.iter_mut().enumerate() {
                let range = self.max[j] - self.min[j];
                *value = if range == F::zero() {
                    F::zero()
                } else {
                    (*value - self.min[j]) / range
                };
            }
        }
    }

    /// Fits bounds on `points` and normalizes them in the same call; the
    /// returned bounds are what a later `apply` on an evaluation set needs.
    pub fn fit_apply(points: &mut [Array1<F>]) -> Result<Self, NormalizeError> {
        let bounds = Self::fit(points)?;
        bounds.apply(points);
        Ok(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use num_traits::Float;

    #[test]
    fn test_fit_apply_maps_training_set_into_unit_interval() {
        let mut points = vec![array![0.0, 2.0], array![10.0, 4.0], array![5.0, 3.0]];
        let bounds = MinMax::fit_apply(&mut points).unwrap();

        assert_eq!(bounds.min, array![0.0, 2.0]);
        assert_eq!(bounds.max, array![10.0, 4.0]);
        for point in &points {
            for &v in point {
                assert!((0.0..=1.0).contains(&v));
            }
        }
        assert_abs_diff_eq!(points[2][0], 0.5);
        assert_abs_diff_eq!(points[2][1], 0.5);
    }

    #[test]
    fn test_apply_does_not_clamp_out_of_range_values() {
        let bounds = MinMax { min: array![0.0], max: array![10.0] };

        let mut eval = vec![array![5.0], array![12.0], array![-2.0]];
        bounds.apply(&mut eval);

        assert_abs_diff_eq!(eval[0][0], 0.5);
        assert_abs_diff_eq!(eval[1][0], 1.2);
        assert_abs_diff_eq!(eval[2][0], -0.2);
    }

    #[test]
    fn test_constant_dimension_maps_to_zero() {
        let mut points = vec![array![3.0, 1.0], array![3.0, 5.0]];
        MinMax::fit_apply(&mut points).unwrap();

        // max == min in dimension 0: defined fallback, never NaN.
        assert_eq!(points[0][0], 0.0);
        assert_eq!(points[1][0], 0.0);
        assert!(points.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_fit_errors() {
        assert_eq!(
            MinMax::<f64>::fit(&[]),
            Err(NormalizeError::EmptyDataSet)
        );
        assert_eq!(
            MinMax::fit(&[array![1.0, 2.0], array![1.0]]),
            Err(NormalizeError::MismatchedDimensions)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_bounds_round_trip_through_json() {
        let bounds = MinMax { min: array![0.0, 2.5], max: array![10.0, 4.25] };
        let json = serde_json::to_string(&bounds).unwrap();
        let restored: MinMax<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(bounds, restored);
    }
}
