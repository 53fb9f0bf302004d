//! Observer hub for volunteer lifecycle events.
//!
//! Wiring-wise unrelated to the application notification pipeline, but the
//! same shape: a set of independent listeners behind one dispatch point.
//! The difference is the failure contract -- here a listener's failure is
//! caught and logged so the remaining listeners still observe the event.

mod subscribers;

#[cfg(test)]
pub(crate) mod tests_support;

pub use subscribers::{
    EngagementStats, EngagementStatsSubscriber, EngagementTotals, LoggingSubscriber,
    WelcomeMailSubscriber,
};

use std::sync::{Arc, Mutex};

use tracing::warn;

use super::domain::{ProjectId, Volunteer};

/// Failure a subscriber reports from its own callback.
///
/// Caught and logged at the publisher's per-subscriber call site; never
/// propagated to the code that triggered the publish.
#[derive(Debug, thiserror::Error)]
#[error("{subscriber}: {reason}")]
pub struct SubscriberError {
    pub subscriber: String,
    pub reason: String,
}

impl SubscriberError {
    pub fn new(subscriber: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subscriber: subscriber.into(),
            reason: reason.into(),
        }
    }
}

/// Independent listener for volunteer lifecycle events. Callbacks default
/// to no-ops so a listener implements only what it cares about.
pub trait VolunteerSubscriber: Send + Sync {
    fn volunteer_registered(&self, _volunteer: &Volunteer) -> Result<(), SubscriberError> {
        Ok(())
    }

    fn skills_updated(
        &self,
        _volunteer: &Volunteer,
        _skills: &[String],
    ) -> Result<(), SubscriberError> {
        Ok(())
    }

    fn project_completed(
        &self,
        _volunteer: &Volunteer,
        _project_id: &ProjectId,
        _hours_logged: u32,
    ) -> Result<(), SubscriberError> {
        Ok(())
    }
}

/// Ordered, de-duplicated collection of subscribers with sequential,
/// registration-order delivery.
///
/// Dispatch snapshots the list under the lock and walks the snapshot
/// outside it, so subscribe/unsubscribe during an in-flight notification
/// never corrupts iteration (a listener removed mid-dispatch may still
/// observe the event already in flight).
#[derive(Default)]
pub struct VolunteerEventPublisher {
    subscribers: Mutex<Vec<Arc<dyn VolunteerSubscriber>>>,
}

impl VolunteerEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; adding the same reference twice is a no-op.
    pub fn subscribe(&self, subscriber: Arc<dyn VolunteerSubscriber>) {
        let mut subscribers = self.subscribers.lock().expect("subscriber list poisoned");
        let already_present = subscribers
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &subscriber));
        if !already_present {
            subscribers.push(subscriber);
        }
    }

    /// Remove a subscriber; removing an absent reference is a no-op.
    pub fn unsubscribe(&self, subscriber: &Arc<dyn VolunteerSubscriber>) {
        let mut subscribers = self.subscribers.lock().expect("subscriber list poisoned");
        subscribers.retain(|existing| !Arc::ptr_eq(existing, subscriber));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().expect("subscriber list poisoned").len()
    }

    pub fn notify_registered(&self, volunteer: &Volunteer) {
        self.dispatch("volunteer_registered", |subscriber| {
            subscriber.volunteer_registered(volunteer)
        });
    }

    pub fn notify_skills_updated(&self, volunteer: &Volunteer, skills: &[String]) {
        self.dispatch("skills_updated", |subscriber| {
            subscriber.skills_updated(volunteer, skills)
        });
    }

    pub fn notify_project_completed(
        &self,
        volunteer: &Volunteer,
        project_id: &ProjectId,
        hours_logged: u32,
    ) {
        self.dispatch("project_completed", |subscriber| {
            subscriber.project_completed(volunteer, project_id, hours_logged)
        });
    }

    /// Sequential, registration-order delivery with per-subscriber fault
    /// isolation: a failing callback is logged and the walk continues.
    fn dispatch<F>(&self, event: &str, mut call: F)
    where
        F: FnMut(&dyn VolunteerSubscriber) -> Result<(), SubscriberError>,
    {
        let snapshot: Vec<Arc<dyn VolunteerSubscriber>> = {
            let subscribers = self.subscribers.lock().expect("subscriber list poisoned");
            subscribers.clone()
        };
        for subscriber in snapshot {
            if let Err(err) = call(subscriber.as_ref()) {
                warn!(event, error = %err, "subscriber failed; continuing dispatch");
            }
        }
    }
}
