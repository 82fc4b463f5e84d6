use crate::Float;
use ndarray::Array1;
use std::fmt::Debug;

/// One labeled drawing, reduced to a feature vector.
///
/// `id` and the student fields identify where the drawing came from; the
/// feature vector is written once during feature extraction and read-only
/// afterwards.
///
/// L: The type of the label (e.g., String, i32, enum).
/// F: The float type for the features (e.g., f32, f64).
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Sample<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub id: u64,
    pub label: L,
    pub student_id: u64,
    pub student_name: String,
    pub features: Array1<F>,
}

impl<L, F> Sample<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(
        id: u64,
        label: L,
        student_id: u64,
        student_name: impl Into<String>,
        features: Array1<F>,
    ) -> Self {
        Sample {
            id,
            label,
            student_id,
            student_name: student_name.into(),
            features,
        }
    }

    /// Shorthand for anonymous samples in tests and demos.
    pub fn labeled(id: u64, label: L, features: Array1<F>) -> Self {
        Sample::new(id, label, 0, "", features)
    }
}
