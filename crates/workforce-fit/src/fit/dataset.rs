use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::domain::{
    AssignmentRecord, RoleFeatures, RoleId, RoleRecord, WorkerFeatures, WorkerId, WorkerRecord,
};
use super::features::{extract_features, FeatureVector, SkillVocabulary};

/// Labeled dataset for one training round, carrying the vocabulary its rows were encoded with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<f64>,
    pub vocabulary: SkillVocabulary,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Join assignments against worker and role records, keeping only rows with a recorded outcome.
///
/// The vocabulary is rebuilt from the full worker population on every call.
pub fn prepare_training_data(
    assignments: &[AssignmentRecord],
    workers: &[WorkerRecord],
    roles: &[RoleRecord],
    vocabulary_cap: usize,
) -> TrainingSet {
    let workers_by_id: HashMap<WorkerId, WorkerFeatures> = workers
        .iter()
        .map(|worker| (worker.id, WorkerFeatures::from(worker)))
        .collect();
    let roles_by_id: HashMap<RoleId, RoleFeatures> = roles
        .iter()
        .map(|role| (role.id, RoleFeatures::from(role)))
        .collect();

    let vocabulary = SkillVocabulary::build(workers, vocabulary_cap);

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut skipped = 0usize;

    for assignment in assignments {
        let joined = (
            workers_by_id.get(&assignment.worker_id),
            roles_by_id.get(&assignment.role_id),
            assignment.label(),
        );
        match joined {
            (Some(worker), Some(role), Some(label)) => {
                features.push(extract_features(worker, role, &vocabulary));
                labels.push(label);
            }
            _ => skipped += 1,
        }
    }

    debug!(
        samples = labels.len(),
        skipped,
        vocabulary = vocabulary.len(),
        "prepared training data"
    );

    TrainingSet {
        features,
        labels,
        vocabulary,
    }
}

/// Index partition produced by [`train_test_split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded shuffle that reserves `ceil(len * test_fraction)` rows for evaluation while keeping at
/// least one training row.
pub fn train_test_split(len: usize, test_fraction: f64, seed: u64) -> SplitIndices {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let requested = (len as f64 * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let test_len = requested.min(len.saturating_sub(1));
    let train = indices.split_off(test_len);

    SplitIndices {
        train,
        test: indices,
    }
}
