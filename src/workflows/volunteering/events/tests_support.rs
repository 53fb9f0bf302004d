//! Recording doubles shared by the event-hub and volunteer-facade tests.

use std::sync::{Arc, Mutex};

use super::{SubscriberError, VolunteerSubscriber};
use crate::workflows::volunteering::domain::{ProjectId, Volunteer};

/// Subscriber journaling every callback as `<name>:<event>:<detail>`.
pub(crate) struct RecordingSubscriber {
    name: String,
    journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingSubscriber {
    pub(crate) fn named(name: &str) -> Self {
        Self::sharing(name, Arc::new(Mutex::new(Vec::new())))
    }

    pub(crate) fn sharing(name: &str, journal: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            journal,
        }
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.journal.lock().expect("journal lock").clone()
    }

    fn record(&self, entry: String) {
        self.journal
            .lock()
            .expect("journal lock")
            .push(format!("{}:{}", self.name, entry));
    }
}

impl VolunteerSubscriber for RecordingSubscriber {
    fn volunteer_registered(&self, volunteer: &Volunteer) -> Result<(), SubscriberError> {
        self.record(format!("registered:{}", volunteer.id.0));
        Ok(())
    }

    fn skills_updated(
        &self,
        volunteer: &Volunteer,
        skills: &[String],
    ) -> Result<(), SubscriberError> {
        self.record(format!("skills:{}:{}", volunteer.id.0, skills.join(",")));
        Ok(())
    }

    fn project_completed(
        &self,
        volunteer: &Volunteer,
        project_id: &ProjectId,
        hours_logged: u32,
    ) -> Result<(), SubscriberError> {
        self.record(format!(
            "completed:{}:{}:{}",
            volunteer.id.0, project_id.0, hours_logged
        ));
        Ok(())
    }
}

/// Subscriber whose callbacks always fail.
pub(crate) struct FailingSubscriber {
    name: String,
}

impl FailingSubscriber {
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl VolunteerSubscriber for FailingSubscriber {
    fn volunteer_registered(&self, _volunteer: &Volunteer) -> Result<(), SubscriberError> {
        Err(SubscriberError::new(self.name.clone(), "callback exploded"))
    }

    fn skills_updated(
        &self,
        _volunteer: &Volunteer,
        _skills: &[String],
    ) -> Result<(), SubscriberError> {
        Err(SubscriberError::new(self.name.clone(), "callback exploded"))
    }

    fn project_completed(
        &self,
        _volunteer: &Volunteer,
        _project_id: &ProjectId,
        _hours_logged: u32,
    ) -> Result<(), SubscriberError> {
        Err(SubscriberError::new(self.name.clone(), "callback exploded"))
    }
}
