use super::domain::{Application, ApplicationId};
use crate::workflows::volunteering::domain::{Project, ProjectId, VolunteerId};

/// Storage abstraction for applications so the orchestration can be
/// exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn get(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn add(&self, application: Application) -> Result<(), RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    /// Returns whether a record was actually removed.
    fn remove(&self, id: &ApplicationId) -> Result<bool, RepositoryError>;
    /// The volunteer's most recent application for the project, if any.
    fn find_for_volunteer(
        &self,
        volunteer_id: &VolunteerId,
        project_id: &ProjectId,
    ) -> Result<Option<Application>, RepositoryError>;
    /// Durably apply pending changes.
    fn commit(&self) -> Result<(), RepositoryError>;
}

/// Storage abstraction for projects.
pub trait ProjectRepository: Send + Sync {
    fn get(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn update(&self, project: Project) -> Result<(), RepositoryError>;
    fn commit(&self) -> Result<(), RepositoryError>;
}

/// Capacity collaborator.
///
/// Reservation and release are the per-project serialization point:
/// implementations must make the check-and-increment atomic with respect
/// to every other capacity mutation on the same project, so two racing
/// approvals of a project's last open slot cannot both succeed.
pub trait CapacityLedger: Send + Sync {
    /// Non-mutating slot query; `false` for an absent project.
    fn has_available_slot(&self, id: &ProjectId) -> Result<bool, RepositoryError>;
    /// Compare-and-increment. `Ok(false)` when the project is at capacity
    /// or absent; the counter is untouched in both cases.
    fn reserve_slot(&self, id: &ProjectId) -> Result<bool, RepositoryError>;
    /// Atomic decrement of a previously reserved slot.
    fn release_slot(&self, id: &ProjectId) -> Result<(), RepositoryError>;
}

/// Error enumeration for collaborator failures. These propagate to the
/// orchestration caller unchanged; the core never retries.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("capacity ledger out of sync: {0}")]
    Inconsistent(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
