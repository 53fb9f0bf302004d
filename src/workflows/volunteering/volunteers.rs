use std::sync::Arc;

use super::applications::repository::RepositoryError;
use super::domain::{Volunteer, VolunteerId};
use super::events::VolunteerEventPublisher;

/// Storage abstraction for volunteers.
pub trait VolunteerRepository: Send + Sync {
    fn get(&self, id: &VolunteerId) -> Result<Option<Volunteer>, RepositoryError>;
    fn add(&self, volunteer: Volunteer) -> Result<(), RepositoryError>;
    fn update(&self, volunteer: Volunteer) -> Result<(), RepositoryError>;
    fn commit(&self) -> Result<(), RepositoryError>;
}

/// Facade registering volunteers and publishing their lifecycle events
/// through the observer hub.
pub struct VolunteerService<V> {
    volunteers: Arc<V>,
    events: Arc<VolunteerEventPublisher>,
}

impl<V> VolunteerService<V>
where
    V: VolunteerRepository + 'static,
{
    pub fn new(volunteers: Arc<V>, events: Arc<VolunteerEventPublisher>) -> Self {
        Self { volunteers, events }
    }

    /// Register a volunteer; a taken id is an ordinary refusal (`None`).
    pub fn register(
        &self,
        volunteer: Volunteer,
    ) -> Result<Option<Volunteer>, VolunteerServiceError> {
        if self.volunteers.get(&volunteer.id)?.is_some() {
            return Ok(None);
        }
        self.volunteers.add(volunteer.clone())?;
        self.volunteers.commit()?;

        self.events.notify_registered(&volunteer);
        Ok(Some(volunteer))
    }

    /// Replace a volunteer's skill set; `false` when the volunteer is
    /// absent.
    pub fn update_skills(
        &self,
        id: &VolunteerId,
        skills: Vec<String>,
    ) -> Result<bool, VolunteerServiceError> {
        let mut volunteer = match self.volunteers.get(id)? {
            Some(volunteer) => volunteer,
            None => return Ok(false),
        };
        volunteer.skills = skills;
        self.volunteers.update(volunteer.clone())?;
        self.volunteers.commit()?;

        self.events
            .notify_skills_updated(&volunteer, &volunteer.skills);
        Ok(true)
    }
}

/// Error raised by the volunteer facade.
#[derive(Debug, thiserror::Error)]
pub enum VolunteerServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
