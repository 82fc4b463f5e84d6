use crate::{Float, Sample};
use ndarray::ArrayView1;
use std::error::Error;
use std::fmt::Debug;
use std::hash::Hash;

/// The outcome of classifying one feature vector: the winning label, plus
/// the supporting training samples for classifiers that keep them.
#[derive(Debug, Clone)]
pub struct Prediction<'a, L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    pub label: L,
    /// The training samples behind the decision, nearest first. `None` for
    /// classifiers that do not retain their training set.
    pub neighbors: Option<Vec<&'a Sample<L, F>>>,
}

/// A trait that defines the common interface for all trained classifiers,
/// so a caller can hold any of them and query labels uniformly.
pub trait Classifier<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    /// Predict the label for a single feature vector.
    fn predict(
        &self,
        features: ArrayView1<F>,
    ) -> Result<Prediction<'_, L, F>, Box<dyn Error + Send + Sync>>;
}
