use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::fit::domain::{AssignmentRecord, RoleId, RoleRecord, WorkerId, WorkerRecord};

const SKILL_SEPARATOR: char = ';';

pub(crate) fn parse_workers<R: Read>(reader: R) -> Result<Vec<WorkerRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut workers = Vec::new();

    for record in csv_reader.deserialize::<WorkerRow>() {
        let row = record?;
        workers.push(WorkerRecord {
            id: WorkerId(row.id),
            skills: split_skills(row.skills.as_deref()),
            name: row.name.unwrap_or_default(),
            age: row.age,
            experience: row.experience,
            fatigue_level: row.fatigue_level,
            performance_score: row.performance_score,
            hours_per_week: row.hours_per_week,
        });
    }

    Ok(workers)
}

pub(crate) fn parse_roles<R: Read>(reader: R) -> Result<Vec<RoleRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut roles = Vec::new();

    for record in csv_reader.deserialize::<RoleRow>() {
        let row = record?;
        roles.push(RoleRecord {
            id: RoleId(row.id),
            required_skills: split_skills(row.required_skills.as_deref()),
            name: row.name.unwrap_or_default(),
            difficulty_level: row.difficulty_level,
        });
    }

    Ok(roles)
}

pub(crate) fn parse_assignments<R: Read>(
    reader: R,
) -> Result<Vec<AssignmentRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut assignments = Vec::new();

    for record in csv_reader.deserialize::<AssignmentRow>() {
        let row = record?;
        assignments.push(AssignmentRecord {
            worker_id: WorkerId(row.worker_id),
            role_id: RoleId(row.role_id),
            success: row.success,
        });
    }

    Ok(assignments)
}

#[derive(Debug, Deserialize)]
struct WorkerRow {
    id: u64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default, deserialize_with = "finite")]
    experience: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(default, deserialize_with = "finite")]
    fatigue_level: Option<f64>,
    #[serde(default, deserialize_with = "finite")]
    performance_score: Option<f64>,
    #[serde(default, deserialize_with = "finite")]
    hours_per_week: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    id: u64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    required_skills: Option<String>,
    #[serde(default, deserialize_with = "finite")]
    difficulty_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AssignmentRow {
    worker_id: u64,
    role_id: u64,
    #[serde(default, deserialize_with = "outcome")]
    success: Option<bool>,
}

fn split_skills(value: Option<&str>) -> Vec<String> {
    value
        .map(|skills| {
            skills
                .split(SKILL_SEPARATOR)
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// `NaN` and infinities parse as floats but carry no usable signal, so they count as blank.
fn finite<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<f64>::deserialize(deserializer)?;
    Ok(opt.filter(|value| value.is_finite()))
}

/// Accepts `true`/`false`, `1`/`0`, and `yes`/`no`; a blank cell means the outcome is unknown.
fn outcome<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = empty_string_as_none(deserializer)? else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!(
            "unrecognized assignment outcome '{other}'"
        ))),
    }
}
