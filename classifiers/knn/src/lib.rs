use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use ndarray::ArrayView1;
use sketch_helpers::{Classifier, Distance, Float, Prediction, Sample};

/// Errors that can occur when using the nearest-neighbor classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum KnnError {
    /// k cannot be zero
    InvalidK,
    /// Cannot build a classifier from an empty training set
    EmptyTrainingSet,
    /// k exceeds the number of training samples
    KTooLarge { k: usize, n_samples: usize },
    /// Training samples or query have inconsistent dimensionality
    DimensionMismatch { expected: usize, found: usize },
}

impl Display for KnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KnnError::InvalidK => write!(f, "k cannot be zero"),
            KnnError::EmptyTrainingSet => {
                write!(f, "Cannot build a classifier from an empty training set")
            }
            KnnError::KTooLarge { k, n_samples } => {
                write!(f, "k ({}) exceeds the training set size ({})", k, n_samples)
            }
            KnnError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl Error for KnnError {}

/// A prediction with its supporting evidence: the k training samples that
/// voted, in increasing distance order, for downstream explanation or
/// visualization.
#[derive(Debug, Clone)]
pub struct KnnPrediction<'a, L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub label: L,
    pub neighbors: Vec<&'a Sample<L, F>>,
}

/// A majority-vote k-nearest-neighbor classifier.
///
/// The classifier owns its training samples; its serializable state is
/// exactly (samples, k, distance metric), so a persisted model reproduces
/// identical predictions after reload.
///
/// # Type Parameters
///
/// * `L`: The type of the label (e.g., `String`, `i32`, or a custom `enum`).
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric, implementing [`sketch_helpers::Distance`].
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Knn<L, F, D>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    k: usize,
    samples: Vec<Sample<L, F>>,
    distance: D,
}

impl<L, F, D> Knn<L, F, D>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    /// Creates a new classifier over an immutable training set.
    ///
    /// # Errors
    ///
    /// * `InvalidK` if `k` is 0.
    /// * `EmptyTrainingSet` if `samples` is empty.
    /// * `KTooLarge` if `k` exceeds the training set size.
    /// * `DimensionMismatch` if the samples' feature vectors disagree in
    ///   dimensionality.
    pub fn new(k: usize, samples: Vec<Sample<L, F>>, distance: D) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        if samples.is_empty() {
            return Err(KnnError::EmptyTrainingSet);
        }
        if k > samples.len() {
            return Err(KnnError::KTooLarge { k, n_samples: samples.len() });
        }

        let expected = samples[0].features.len();
        for sample in &samples {
            if sample.features.len() != expected {
                return Err(KnnError::DimensionMismatch {
                    expected,
                    found: sample.features.len(),
                });
            }
        }

        Ok(Self { k, samples, distance })
    }

    /// The feature dimensionality every query must match.
    pub fn dimensionality(&self) -> usize {
        self.samples[0].features.len()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn samples(&self) -> &[Sample<L, F>] {
        &self.samples
    }

    /// Predicts the label of a feature vector by majority vote among the k
    /// nearest training samples.
    ///
    /// Samples at equal distance keep their training-set order (stable
    /// sort), and a vote tie goes to the label seen first while scanning the
    /// neighbors in distance order.
    pub fn predict(&self, features: ArrayView1<F>) -> Result<KnnPrediction<'_, L, F>, KnnError> {
        if features.len() != self.dimensionality() {
            return Err(KnnError::DimensionMismatch {
                expected: self.dimensionality(),
                found: features.len(),
            });
        }

        // The reduced distance (squared Euclidean for L2) orders neighbors
        // the same way the true distance does.
        let mut distances: Vec<(F, &Sample<L, F>)> = self
            .samples
            .iter()
            .map(|sample| (self.distance.rdistance(sample.features.view(), features), sample))
            .collect();

        // Stable: equal distances resolve to the first sample encountered.
        distances.sort_by(|a, b| {
            a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
        });

        let neighbors: Vec<&Sample<L, F>> =
            distances[..self.k].iter().map(|&(_, sample)| sample).collect();

        let mut counts: HashMap<&L, usize> = HashMap::new();
        for neighbor in &neighbors {
            *counts.entry(&neighbor.label).or_insert(0) += 1;
        }
        let max_count = *counts.values().max().unwrap();

        // On a vote tie, the first label in distance order wins.
        let label = neighbors
            .iter()
            .find(|neighbor| counts[&neighbor.label] == max_count)
            .map(|neighbor| neighbor.label.clone())
            .unwrap();

        Ok(KnnPrediction { label, neighbors })
    }
}

impl<L, F, D> Classifier<L, F> for Knn<L, F, D>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    fn predict(
        &self,
        features: ArrayView1<F>,
    ) -> Result<Prediction<'_, L, F>, Box<dyn Error + Send + Sync>> {
        let KnnPrediction { label, neighbors } = Knn::predict(self, features)?;
        Ok(Prediction { label, neighbors: Some(neighbors) })
    }
}
