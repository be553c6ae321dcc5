use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for workers supplied by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkerId(pub u64);

/// Identifier wrapper for job roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Worker record as delivered by the external store. Numeric attributes are optional so that
/// partially populated rows still flow through feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub fatigue_level: Option<f64>,
    #[serde(default)]
    pub performance_score: Option<f64>,
    #[serde(default)]
    pub hours_per_week: Option<f64>,
}

/// Job role record with the skills it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub difficulty_level: Option<f64>,
}

/// Historical assignment. Only rows with a recorded outcome carry training signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub worker_id: WorkerId,
    pub role_id: RoleId,
    #[serde(default)]
    pub success: Option<bool>,
}

impl AssignmentRecord {
    pub fn label(&self) -> Option<f64> {
        self.success.map(|success| if success { 1.0 } else { 0.0 })
    }
}

pub const DEFAULT_EXPERIENCE: f64 = 0.0;
pub const DEFAULT_FATIGUE_LEVEL: f64 = 0.0;
pub const DEFAULT_PERFORMANCE_SCORE: f64 = 0.5;
pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_DIFFICULTY_LEVEL: f64 = 0.5;

/// Worker attributes with defaults applied, ready for feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerFeatures {
    pub experience: f64,
    pub fatigue_level: f64,
    pub performance_score: f64,
    pub age: u32,
    pub skills: BTreeSet<String>,
}

impl Default for WorkerFeatures {
    fn default() -> Self {
        Self {
            experience: DEFAULT_EXPERIENCE,
            fatigue_level: DEFAULT_FATIGUE_LEVEL,
            performance_score: DEFAULT_PERFORMANCE_SCORE,
            age: DEFAULT_AGE,
            skills: BTreeSet::new(),
        }
    }
}

impl From<&WorkerRecord> for WorkerFeatures {
    fn from(record: &WorkerRecord) -> Self {
        Self {
            experience: record.experience.unwrap_or(DEFAULT_EXPERIENCE),
            fatigue_level: record.fatigue_level.unwrap_or(DEFAULT_FATIGUE_LEVEL),
            performance_score: record
                .performance_score
                .unwrap_or(DEFAULT_PERFORMANCE_SCORE),
            age: record.age.unwrap_or(DEFAULT_AGE),
            skills: skill_set(&record.skills),
        }
    }
}

/// Role attributes with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFeatures {
    pub required_skills: BTreeSet<String>,
    pub difficulty_level: f64,
}

impl Default for RoleFeatures {
    fn default() -> Self {
        Self {
            required_skills: BTreeSet::new(),
            difficulty_level: DEFAULT_DIFFICULTY_LEVEL,
        }
    }
}

impl From<&RoleRecord> for RoleFeatures {
    fn from(record: &RoleRecord) -> Self {
        Self {
            required_skills: skill_set(&record.required_skills),
            difficulty_level: record.difficulty_level.unwrap_or(DEFAULT_DIFFICULTY_LEVEL),
        }
    }
}

pub(crate) fn skill_set(labels: &[String]) -> BTreeSet<String> {
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}
