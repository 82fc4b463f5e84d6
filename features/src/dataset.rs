//! Sample assembly from captured drawing sessions.
//!
//! File layout, image generation and persistence stay with the calling
//! pipeline; this module only turns in-memory sessions into labeled samples.
//! Known-bad sessions and samples are excluded through explicit id sets
//! instead of process-wide flag lists.

use crate::descriptors::{Descriptor, extract};
use geometry::Path;
use sketch_helpers::{Float, Sample};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// One captured drawing session: a student drew every prompted label once.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct RawSession<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    pub session: u64,
    pub student: String,
    pub drawings: Vec<(L, Vec<Path<F>>)>,
}

/// Builds labeled samples from raw sessions, computing each drawing's
/// feature vector with the given descriptor set.
///
/// Sample ids are sequential over the drawings of the sessions that are
/// kept: an excluded session consumes no ids, while an excluded sample id is
/// consumed and then skipped, so the remaining ids stay aligned with the
/// session files the caller keeps on disk.
pub fn build_samples<L, F>(
    sessions: &[RawSession<L, F>],
    descriptors: &[Descriptor],
    excluded_sessions: &HashSet<u64>,
    excluded_samples: &HashSet<u64>,
) -> Vec<Sample<L, F>>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    let mut samples = Vec::new();
    let mut id = 0;

    for session in sessions {
        if excluded_sessions.contains(&session.session) {
            continue;
        }

        for (label, paths) in &session.drawings {
            id += 1;

            if excluded_samples.contains(&id) {
                continue;
            }

            samples.push(Sample::new(
                id,
                label.clone(),
                session.session,
                session.student.clone(),
                extract(paths, descriptors),
            ));
        }
    }

    samples
}

/// Splits samples into (training, testing) at `len * training_ratio`,
/// preserving order. The caller is responsible for fitting normalization
/// bounds on the training part only.
pub fn split_by_ratio<T>(samples: Vec<T>, training_ratio: f64) -> (Vec<T>, Vec<T>) {
    let training_amount = samples.len() as f64 * training_ratio;

    let mut training = Vec::new();
    let mut testing = Vec::new();
    for (i, sample) in samples.into_iter().enumerate() {
        if (i as f64) < training_amount {
            training.push(sample);
        } else {
            testing.push(sample);
        }
    }

    (training, testing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::Point;

    fn session(id: u64, student: &str) -> RawSession<&'static str, f64> {
        let square = vec![vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ]];
        let line = vec![vec![Point::new(0.0, 0.0), Point::new(9.0, 0.0)]];
        RawSession {
            session: id,
            student: student.to_string(),
            drawings: vec![("square", square), ("line", line)],
        }
    }

    #[test]
    fn test_build_samples_assigns_sequential_ids() {
        let sessions = vec![session(100, "kim"), session(101, "lee")];
        let samples = build_samples(
            &sessions,
            &Descriptor::default_set(),
            &HashSet::new(),
            &HashSet::new(),
        );

        assert_eq!(samples.len(), 4);
        assert_eq!(
            samples.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(samples[0].label, "square");
        assert_eq!(samples[1].label, "line");
        assert_eq!(samples[2].student_id, 101);
        assert_eq!(samples[2].student_name, "lee");
        assert_eq!(samples[0].features.len(), 4);
    }

    #[test]
    fn test_excluded_session_consumes_no_ids() {
        let sessions = vec![session(100, "kim"), session(101, "lee")];
        let excluded_sessions = HashSet::from([100]);
        let samples = build_samples(
            &sessions,
            &Descriptor::default_set(),
            &excluded_sessions,
            &HashSet::new(),
        );

        // The second session's drawings start at id 1.
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].id, 1);
        assert_eq!(samples[0].student_id, 101);
    }

    #[test]
    fn test_excluded_sample_id_is_consumed_then_skipped() {
        let sessions = vec![session(100, "kim")];
        let excluded_samples = HashSet::from([1]);
        let samples = build_samples(
            &sessions,
            &Descriptor::default_set(),
            &HashSet::new(),
            &excluded_samples,
        );

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id, 2);
        assert_eq!(samples[0].label, "line");
    }

    #[test]
    fn test_split_by_ratio() {
        let (training, testing) = split_by_ratio((0..10).collect::<Vec<_>>(), 0.7);
        assert_eq!(training, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(testing, vec![7, 8, 9]);

        let (training, testing) = split_by_ratio(vec![1, 2, 3], 0.5);
        assert_eq!(training.len(), 2);
        assert_eq!(testing.len(), 1);
    }
}
