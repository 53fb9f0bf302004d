use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::StateError;
use crate::workflows::volunteering::domain::{ProjectId, VolunteerId};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Lifecycle status tracked for every application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
    Completed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
            ApplicationStatus::Completed => "completed",
        }
    }

    /// Parse a stored status label. Anything outside the five known
    /// variants is data corruption, not a business outcome.
    pub fn parse(label: &str) -> Result<Self, StateError> {
        match label {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "withdrawn" => Ok(ApplicationStatus::Withdrawn),
            "completed" => Ok(ApplicationStatus::Completed),
            other => Err(StateError::UnknownStatus(other.to_string())),
        }
    }

    /// Pending and Accepted applications still occupy the lifecycle; the
    /// other three are terminal.
    pub const fn is_live(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending | ApplicationStatus::Accepted
        )
    }
}

/// One volunteer's request to join one project.
///
/// The status field changes only through the state machine in
/// [`super::state`]; callers never flip it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub volunteer_id: VolunteerId,
    pub project_id: ProjectId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

impl Application {
    /// A freshly submitted application enters the lifecycle as Pending.
    pub fn pending(
        id: ApplicationId,
        volunteer_id: VolunteerId,
        project_id: ProjectId,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            volunteer_id,
            project_id,
            status: ApplicationStatus::Pending,
            applied_at,
            reviewed_at: None,
            review_notes: None,
        }
    }
}
