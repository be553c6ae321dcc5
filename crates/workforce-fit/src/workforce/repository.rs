use crate::fit::domain::{AssignmentRecord, RoleId, RoleRecord, WorkerRecord};

/// Read access to workers, roles, and assignment history so the service can be exercised in
/// isolation from any particular store.
pub trait WorkforceRepository: Send + Sync {
    fn workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError>;
    fn role(&self, id: RoleId) -> Result<Option<RoleRecord>, RepositoryError>;
    fn roles(&self) -> Result<Vec<RoleRecord>, RepositoryError>;
    fn assignments(&self) -> Result<Vec<AssignmentRecord>, RepositoryError>;

    /// Assignments whose outcome has been recorded.
    fn labeled_assignments(&self) -> Result<Vec<AssignmentRecord>, RepositoryError> {
        let mut assignments = self.assignments()?;
        assignments.retain(|assignment| assignment.success.is_some());
        Ok(assignments)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
