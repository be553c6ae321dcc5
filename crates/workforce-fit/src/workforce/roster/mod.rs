//! CSV roster import: `workers.csv`, `roles.csv`, and an optional `assignments.csv` loaded into
//! an in-memory [`WorkforceRepository`].

mod parser;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use super::repository::{RepositoryError, WorkforceRepository};
use crate::fit::domain::{AssignmentRecord, RoleId, RoleRecord, WorkerRecord};

pub const WORKERS_FILE: &str = "workers.csv";
pub const ROLES_FILE: &str = "roles.csv";
pub const ASSIGNMENTS_FILE: &str = "assignments.csv";

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid CSV data in {file}: {source}")]
    Csv {
        file: &'static str,
        source: csv::Error,
    },
}

/// Snapshot of workers, roles, and assignment history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub workers: Vec<WorkerRecord>,
    pub roles: Vec<RoleRecord>,
    pub assignments: Vec<AssignmentRecord>,
}

impl Roster {
    pub fn new(
        workers: Vec<WorkerRecord>,
        roles: Vec<RoleRecord>,
        assignments: Vec<AssignmentRecord>,
    ) -> Self {
        Self {
            workers,
            roles,
            assignments,
        }
    }

    /// Load a roster directory. A missing assignments file means no history yet.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RosterError> {
        let dir = dir.as_ref();
        let workers = open(&dir.join(WORKERS_FILE))?;
        let roles = open(&dir.join(ROLES_FILE))?;
        let assignments_path = dir.join(ASSIGNMENTS_FILE);
        let assignments = if assignments_path.exists() {
            Some(open(&assignments_path)?)
        } else {
            None
        };

        let roster = Self::from_readers(workers, roles, assignments)?;
        info!(
            dir = %dir.display(),
            workers = roster.workers.len(),
            roles = roster.roles.len(),
            assignments = roster.assignments.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    pub fn from_readers<W, R, A>(
        workers: W,
        roles: R,
        assignments: Option<A>,
    ) -> Result<Self, RosterError>
    where
        W: Read,
        R: Read,
        A: Read,
    {
        let workers = parser::parse_workers(workers).map_err(|source| RosterError::Csv {
            file: WORKERS_FILE,
            source,
        })?;
        let roles = parser::parse_roles(roles).map_err(|source| RosterError::Csv {
            file: ROLES_FILE,
            source,
        })?;
        let assignments = match assignments {
            Some(reader) => {
                parser::parse_assignments(reader).map_err(|source| RosterError::Csv {
                    file: ASSIGNMENTS_FILE,
                    source,
                })?
            }
            None => Vec::new(),
        };

        Ok(Self::new(workers, roles, assignments))
    }
}

impl WorkforceRepository for Roster {
    fn workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError> {
        Ok(self.workers.clone())
    }

    fn role(&self, id: RoleId) -> Result<Option<RoleRecord>, RepositoryError> {
        Ok(self.roles.iter().find(|role| role.id == id).cloned())
    }

    fn roles(&self) -> Result<Vec<RoleRecord>, RepositoryError> {
        Ok(self.roles.clone())
    }

    fn assignments(&self) -> Result<Vec<AssignmentRecord>, RepositoryError> {
        Ok(self.assignments.clone())
    }
}

fn open(path: &Path) -> Result<File, RosterError> {
    File::open(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })
}
