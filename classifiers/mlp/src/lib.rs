use ndarray::{Array1, Array2, ArrayView1};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use sketch_helpers::{Classifier, Float, Prediction, Sample};

/// Errors that can occur when building or using the network.
#[derive(Debug, Clone, PartialEq)]
pub enum MlpError {
    /// The layer-size list or class list is inconsistent.
    InvalidTopology(String),
    /// Cannot train on an empty sample set.
    EmptyDataSet,
    /// A feature vector does not match the network's input dimensionality.
    DimensionMismatch { expected: usize, found: usize },
}

impl Display for MlpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MlpError::InvalidTopology(msg) => write!(f, "Invalid topology: {}", msg),
            MlpError::EmptyDataSet => write!(f, "Cannot train on an empty sample set"),
            MlpError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl Error for MlpError {}

/// One computation level of the network: a weighted sum plus bias per output
/// unit, squashed through tanh.
///
/// `weights` is `inputs` x `outputs`; `biases` has one entry per output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Level<F: Float> {
    pub inputs: usize,
    pub outputs: usize,
    pub weights: Array2<F>,
    pub biases: Array1<F>,
}

impl<F: Float> Level<F> {
    fn zeroed(inputs: usize, outputs: usize) -> Self {
        Level {
            inputs,
            outputs,
            weights: Array2::zeros((inputs, outputs)),
            biases: Array1::zeros(outputs),
        }
    }

    /// Overwrites all weights and biases with uniform values in [-1, 1].
    fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for weight in self.weights.iter_mut() {
            *weight = rng.random_range(-F::one()..=F::one());
        }
        for bias in self.biases.iter_mut() {
            *bias = rng.random_range(-F::one()..=F::one());
        }
    }

    fn feed_forward(&self, input: ArrayView1<F>) -> Array1<F> {
        let sums = input.dot(&self.weights) + &self.biases;
        sums.mapv(F::tanh)
    }
}

/// A fixed-topology feed-forward network classifier.
///
/// The layer sizes are fixed at construction and never change during
/// training. Training is a random-restart search: repeated full
/// reinitialization of the parameters, keeping the best-scoring network
/// found. There is no gradient descent anywhere.
///
/// The serializable state is the full level list plus the class labels, so a
/// persisted model reproduces identical predictions after reload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Mlp<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    pub neuron_counts: Vec<usize>,
    pub classes: Vec<L>,
    pub levels: Vec<Level<F>>,
}

impl<L, F> Mlp<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    /// Creates a network with randomized parameters, seeding the ambient
    /// random source. Use [`Mlp::new_with_seed`] for reproducible runs.
    ///
    /// `neuron_counts` lists the layer sizes input-first; the final size
    /// must equal the number of classes.
    pub fn new(neuron_counts: Vec<usize>, classes: Vec<L>) -> Result<Self, MlpError> {
        Self::new_with_rng(neuron_counts, classes, &mut rand::rng())
    }

    /// Creates a network with parameters randomized from a fixed seed.
    pub fn new_with_seed(
        neuron_counts: Vec<usize>,
        classes: Vec<L>,
        seed: u64,
    ) -> Result<Self, MlpError> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self::new_with_rng(neuron_counts, classes, &mut rng)
    }

    /// Creates a network with parameters randomized from the given generator.
    pub fn new_with_rng<R: Rng>(
        neuron_counts: Vec<usize>,
        classes: Vec<L>,
        rng: &mut R,
    ) -> Result<Self, MlpError> {
        if neuron_counts.len() < 2 {
            return Err(MlpError::InvalidTopology(
                "a network needs at least an input and an output layer".into(),
            ));
        }
        if neuron_counts.iter().any(|&count| count == 0) {
            return Err(MlpError::InvalidTopology("layer sizes must be non-zero".into()));
        }
        if *neuron_counts.last().unwrap() != classes.len() {
            return Err(MlpError::InvalidTopology(format!(
                "output layer size ({}) must equal the class count ({})",
                neuron_counts.last().unwrap(),
                classes.len()
            )));
        }

        let levels = neuron_counts
            .windows(2)
            .map(|pair| Level::zeroed(pair[0], pair[1]))
            .collect();

        let mut mlp = Mlp { neuron_counts, classes, levels };
        mlp.randomize(rng);
        Ok(mlp)
    }

    /// The feature dimensionality every input must match.
    pub fn input_dimensionality(&self) -> usize {
        self.neuron_counts[0]
    }

    /// Reinitializes every weight and bias with fresh random values.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for level in &mut self.levels {
            level.randomize(rng);
        }
    }

    /// Replaces this network's topology and parameters wholesale with
    /// another's, e.g. one restored from persisted state.
    pub fn load(&mut self, other: Mlp<L, F>) {
        *self = other;
    }

    /// Feeds a feature vector through every level in sequence and returns
    /// the per-class scores.
    pub fn feed_forward(&self, features: ArrayView1<F>) -> Result<Array1<F>, MlpError> {
        if features.len() != self.input_dimensionality() {
            return Err(MlpError::DimensionMismatch {
                expected: self.input_dimensionality(),
                found: features.len(),
            });
        }

        let mut output = features.to_owned();
        for level in &self.levels {
            output = level.feed_forward(output.view());
        }
        Ok(output)
    }

    /// Predicts the label whose output unit scores highest; an exact tie
    /// goes to the first maximal index.
    pub fn predict(&self, features: ArrayView1<F>) -> Result<L, MlpError> {
        let output = self.feed_forward(features)?;

        let mut best = 0;
        for (i, &score) in output.iter().enumerate() {
            if score > output[best] {
                best = i;
            }
        }

        Ok(self.classes[best].clone())
    }

    /// The fraction of samples whose predicted label equals the true label.
    /// Pure: reads the current parameters, mutates nothing.
    pub fn evaluate(&self, samples: &[Sample<L, F>]) -> Result<F, MlpError> {
        if samples.is_empty() {
            return Ok(F::zero());
        }

        let mut correct = 0usize;
        for sample in samples {
            if self.predict(sample.features.view())? == sample.label {
                correct += 1;
            }
        }

        Ok(F::cast(correct).unwrap() / F::cast(samples.len()).unwrap())
    }

    /// Random-restart training, seeding the ambient random source.
    pub fn fit(&mut self, samples: &[Sample<L, F>], tries: u32) -> Result<F, MlpError> {
        self.fit_with_rng(samples, tries, &mut rand::rng())
    }

    /// Random-restart training with a fixed seed for reproducibility.
    pub fn fit_with_seed(
        &mut self,
        samples: &[Sample<L, F>],
        tries: u32,
        seed: u64,
    ) -> Result<F, MlpError> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.fit_with_rng(samples, tries, &mut rng)
    }

    /// Random-restart training: `tries` times, reinitialize all parameters
    /// and keep the reinitialization scoring strictly best on `samples`.
    ///
    /// The current parameters are the baseline, so zero tries leave the
    /// network untouched and an equal-scoring restart never replaces the
    /// incumbent. Returns the best training accuracy found.
    pub fn fit_with_rng<R: Rng>(
        &mut self,
        samples: &[Sample<L, F>],
        tries: u32,
        rng: &mut R,
    ) -> Result<F, MlpError> {
        if samples.is_empty() {
            return Err(MlpError::EmptyDataSet);
        }

        let mut best_levels = self.levels.clone();
        let mut best_accuracy = self.evaluate(samples)?;

        for _ in 0..tries {
            self.randomize(rng);
            let accuracy = self.evaluate(samples)?;

            if accuracy > best_accuracy {
                best_accuracy = accuracy;
                best_levels = self.levels.clone();
            }
        }

        self.levels = best_levels;
        Ok(best_accuracy)
    }
}

impl<L, F> Classifier<L, F> for Mlp<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    fn predict(
        &self,
        features: ArrayView1<F>,
    ) -> Result<Prediction<'_, L, F>, Box<dyn Error + Send + Sync>> {
        let label = Mlp::predict(self, features)?;
        Ok(Prediction { label, neighbors: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// 1-D input, two classes: positive features are "pos", negative "neg".
    fn separable_samples() -> Vec<Sample<&'static str, f64>> {
        vec![
            Sample::labeled(1, "pos", array![0.8]),
            Sample::labeled(2, "pos", array![0.3]),
            Sample::labeled(3, "neg", array![-0.5]),
            Sample::labeled(4, "neg", array![-0.9]),
        ]
    }

    /// A hand-built network that separates `separable_samples` perfectly:
    /// output 0 tracks the input, output 1 tracks its negation.
    fn perfect_network() -> Mlp<&'static str, f64> {
        Mlp {
            neuron_counts: vec![1, 2],
            classes: vec!["pos", "neg"],
            levels: vec![Level {
                inputs: 1,
                outputs: 2,
                weights: array![[1.0, -1.0]],
                biases: array![0.0, 0.0],
            }],
        }
    }

    #[test]
    fn test_topology_validation() {
        assert!(matches!(
            Mlp::<&str, f64>::new_with_seed(vec![4], vec!["a"], 0),
            Err(MlpError::InvalidTopology(_))
        ));
        assert!(matches!(
            Mlp::<&str, f64>::new_with_seed(vec![4, 0, 2], vec!["a", "b"], 0),
            Err(MlpError::InvalidTopology(_))
        ));
        assert!(matches!(
            Mlp::<&str, f64>::new_with_seed(vec![4, 3], vec!["a", "b"], 0),
            Err(MlpError::InvalidTopology(_))
        ));

        let mlp = Mlp::<&str, f64>::new_with_seed(vec![4, 10, 3], vec!["a", "b", "c"], 0).unwrap();
        assert_eq!(mlp.levels.len(), 2);
        assert_eq!(mlp.levels[0].weights.dim(), (4, 10));
        assert_eq!(mlp.levels[1].weights.dim(), (10, 3));
        assert_eq!(mlp.input_dimensionality(), 4);
    }

    #[test]
    fn test_parameters_start_within_init_range() {
        let mlp = Mlp::new_with_seed(vec![3, 5, 2], vec!["a", "b"], 7).unwrap();
        for level in &mlp.levels {
            assert!(level.weights.iter().all(|w| (-1.0..=1.0).contains(w)));
            assert!(level.biases.iter().all(|b| (-1.0..=1.0).contains(b)));
        }
    }

    #[test]
    fn test_predict_takes_first_maximal_index_on_ties() {
        let mlp = Mlp::<&str, f64> {
            neuron_counts: vec![1, 2],
            classes: vec!["first", "second"],
            levels: vec![Level {
                inputs: 1,
                outputs: 2,
                // Both outputs compute the same score for any input.
                weights: array![[1.0, 1.0]],
                biases: array![0.0, 0.0],
            }],
        };

        assert_eq!(mlp.predict(array![0.7].view()).unwrap(), "first");
    }

    #[test]
    fn test_evaluate_on_perfect_network() {
        let mlp = perfect_network();
        let accuracy = mlp.evaluate(&separable_samples()).unwrap();
        assert_abs_diff_eq!(accuracy, 1.0);

        // Mislabel one sample: 3 of 4 remain correct.
        let mut samples = separable_samples();
        samples[0].label = "neg";
        assert_abs_diff_eq!(mlp.evaluate(&samples).unwrap(), 0.75);
    }

    #[test]
    fn test_predicts_through_the_shared_classifier_interface() {
        let mlp = perfect_network();
        let classifier: &dyn Classifier<&str, f64> = &mlp;

        let prediction = classifier.predict(array![0.8].view()).unwrap();
        assert_eq!(prediction.label, "pos");
        assert!(prediction.neighbors.is_none());
    }

    #[test]
    fn test_evaluate_of_empty_set_is_zero() {
        let mlp = perfect_network();
        assert_eq!(mlp.evaluate(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_tries_leaves_parameters_unchanged() {
        let mut mlp = Mlp::new_with_seed(vec![1, 4, 2], vec!["pos", "neg"], 11).unwrap();
        let before = mlp.levels.clone();

        let accuracy = mlp.fit_with_seed(&separable_samples(), 0, 99).unwrap();

        assert_eq!(mlp.levels, before);
        assert_abs_diff_eq!(accuracy, mlp.evaluate(&separable_samples()).unwrap());
    }

    #[test]
    fn test_fit_never_lowers_training_accuracy() {
        let samples = separable_samples();
        let mut mlp = Mlp::new_with_seed(vec![1, 4, 2], vec!["pos", "neg"], 3).unwrap();
        let baseline = mlp.evaluate(&samples).unwrap();

        let best = mlp.fit_with_seed(&samples, 50, 17).unwrap();

        assert!(best >= baseline);
        assert_abs_diff_eq!(mlp.evaluate(&samples).unwrap(), best);
    }

    #[test]
    fn test_fit_is_reproducible_with_a_seed() {
        let samples = separable_samples();

        let mut first = Mlp::new_with_seed(vec![1, 4, 2], vec!["pos", "neg"], 5).unwrap();
        let mut second = Mlp::new_with_seed(vec![1, 4, 2], vec!["pos", "neg"], 5).unwrap();

        let acc_first = first.fit_with_seed(&samples, 30, 42).unwrap();
        let acc_second = second.fit_with_seed(&samples, 30, 42).unwrap();

        assert_eq!(first, second);
        assert_abs_diff_eq!(acc_first, acc_second);
    }

    #[test]
    fn test_fit_on_empty_set_is_an_error() {
        let mut mlp = perfect_network();
        assert_eq!(mlp.fit_with_seed(&[], 10, 0), Err(MlpError::EmptyDataSet));
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let mlp = perfect_network();
        assert_eq!(
            mlp.predict(array![1.0, 2.0].view()).unwrap_err(),
            MlpError::DimensionMismatch { expected: 1, found: 2 }
        );
    }

    #[test]
    fn test_load_replaces_the_network_wholesale() {
        let mut mlp = Mlp::new_with_seed(vec![1, 8, 2], vec!["pos", "neg"], 23).unwrap();
        mlp.load(perfect_network());

        assert_eq!(mlp, perfect_network());
        assert_abs_diff_eq!(mlp.evaluate(&separable_samples()).unwrap(), 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_network_round_trips_through_json() {
        let mlp = Mlp::new_with_seed(vec![2, 6, 3], vec!["a", "b", "c"], 13).unwrap();
        let json = serde_json::to_string(&mlp).unwrap();
        let restored: Mlp<&str, f64> = serde_json::from_str(&json).unwrap();

        assert_eq!(mlp, restored);
        let query = array![0.4, -0.2];
        assert_eq!(
            mlp.predict(query.view()).unwrap(),
            restored.predict(query.view()).unwrap()
        );
    }
}
