// End-to-end demo: synthetic drawings -> shape descriptors -> normalized
// feature vectors -> nearest-neighbor and random-restart network classifiers.
use sketch::{
    Descriptor, Knn, L2Dist, MinMax, Mlp, Point, RawSession, build_samples, split_by_ratio,
};
use std::collections::HashSet;

const LABELS: [&str; 3] = ["circle", "line", "rectangle"];

fn circle(radius: f64) -> Vec<Vec<Point<f64>>> {
    let outline = (0..24)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / 24.0;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    vec![outline]
}

fn line(length: f64, slope: f64) -> Vec<Vec<Point<f64>>> {
    vec![vec![Point::new(0.0, 0.0), Point::new(length, length * slope)]]
}

fn rectangle(width: f64, height: f64) -> Vec<Vec<Point<f64>>> {
    vec![vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ]]
}

fn synthetic_sessions() -> Vec<RawSession<&'static str, f64>> {
    (0..20)
        .map(|i| {
            let v = i as f64;
            RawSession {
                session: 100 + i,
                student: format!("student-{i}"),
                drawings: vec![
                    ("circle", circle(30.0 + v)),
                    ("line", line(50.0 + 3.0 * v, 0.1 + 0.02 * v)),
                    ("rectangle", rectangle(40.0 + v, 18.0 + 0.5 * v)),
                ],
            }
        })
        .collect()
}

fn main() {
    let sessions = synthetic_sessions();
    let descriptors = Descriptor::default_set();

    let samples = build_samples(&sessions, &descriptors, &HashSet::new(), &HashSet::new());
    println!("Extracted {} samples, {} features each", samples.len(), descriptors.len());

    let (mut training, mut testing) = split_by_ratio(samples, 0.7);

    // Bounds come from the training set only; the testing set gets the same
    // transform, unclamped.
    let mut training_points: Vec<_> = training.iter().map(|s| s.features.clone()).collect();
    let bounds = MinMax::fit_apply(&mut training_points).expect("training set is non-empty");
    for (sample, point) in training.iter_mut().zip(training_points) {
        sample.features = point;
    }
    let mut testing_points: Vec<_> = testing.iter().map(|s| s.features.clone()).collect();
    bounds.apply(&mut testing_points);
    for (sample, point) in testing.iter_mut().zip(testing_points) {
        sample.features = point;
    }

    let knn = Knn::new(5, training.clone(), L2Dist).expect("valid k-NN configuration");
    let mut correct = 0;
    for sample in &testing {
        let prediction = knn.predict(sample.features.view()).expect("matching dimensionality");
        if prediction.label == sample.label {
            correct += 1;
        }
    }
    println!("k-NN accuracy: {}/{}", correct, testing.len());

    let mut mlp = Mlp::new_with_seed(vec![descriptors.len(), 10, LABELS.len()], LABELS.to_vec(), 42)
        .expect("valid topology");
    let training_accuracy = mlp.fit_with_seed(&training, 1000, 42).expect("non-empty training set");
    let testing_accuracy = mlp.evaluate(&testing).expect("matching dimensionality");
    println!("MLP training accuracy: {:.3}", training_accuracy);
    println!("MLP testing accuracy: {:.3}", testing_accuracy);
}
