use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered volunteers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolunteerId(pub String);

/// Identifier wrapper for volunteer projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// A registered volunteer able to apply to projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub active: bool,
}

/// A project advertising volunteer slots.
///
/// `current_volunteers` is only ever mutated through
/// [`Project::register_volunteer`] and [`Project::release_volunteer`], which
/// keep it within `0..=max_volunteers` at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub published: bool,
    pub application_deadline: Option<NaiveDate>,
    pub max_volunteers: u32,
    pub current_volunteers: u32,
}

impl Project {
    pub fn has_available_slot(&self) -> bool {
        self.current_volunteers < self.max_volunteers
    }

    /// Whether the project currently takes submissions: published, before
    /// the deadline (if any), and not yet full.
    pub fn is_open_for_applications(&self, today: NaiveDate) -> bool {
        self.published
            && self
                .application_deadline
                .map_or(true, |deadline| today <= deadline)
            && self.has_available_slot()
    }

    /// Occupy one volunteer slot.
    pub fn register_volunteer(&mut self) -> Result<(), CapacityError> {
        if !self.has_available_slot() {
            return Err(CapacityError::Exhausted {
                max_volunteers: self.max_volunteers,
            });
        }
        self.current_volunteers += 1;
        Ok(())
    }

    /// Free one volunteer slot.
    pub fn release_volunteer(&mut self) -> Result<(), CapacityError> {
        if self.current_volunteers == 0 {
            return Err(CapacityError::NoneRegistered);
        }
        self.current_volunteers -= 1;
        Ok(())
    }
}

/// Attempted violation of the `0 <= current_volunteers <= max_volunteers`
/// invariant.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("project is already at its {max_volunteers}-volunteer capacity")]
    Exhausted { max_volunteers: u32 },
    #[error("project has no registered volunteers to release")]
    NoneRegistered,
}
