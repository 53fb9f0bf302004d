//! Volunteer coordination workflow: the application lifecycle engine,
//! project capacity accounting, and the volunteer lifecycle event hub.

pub mod applications;
pub mod domain;
pub mod events;
pub mod volunteers;

pub use domain::{CapacityError, Project, ProjectId, Volunteer, VolunteerId};
pub use events::{SubscriberError, VolunteerEventPublisher, VolunteerSubscriber};
pub use volunteers::{VolunteerRepository, VolunteerService, VolunteerServiceError};
