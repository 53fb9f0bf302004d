use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::{SubscriberError, VolunteerSubscriber};
use crate::workflows::volunteering::applications::notify::{MailGateway, OutboundMail};
use crate::workflows::volunteering::domain::{ProjectId, Volunteer};

/// Writes one tracing event per volunteer lifecycle event.
pub struct LoggingSubscriber;

impl VolunteerSubscriber for LoggingSubscriber {
    fn volunteer_registered(&self, volunteer: &Volunteer) -> Result<(), SubscriberError> {
        info!(volunteer = %volunteer.id.0, "volunteer registered");
        Ok(())
    }

    fn skills_updated(
        &self,
        volunteer: &Volunteer,
        skills: &[String],
    ) -> Result<(), SubscriberError> {
        info!(
            volunteer = %volunteer.id.0,
            skills = skills.len(),
            "volunteer skills updated"
        );
        Ok(())
    }

    fn project_completed(
        &self,
        volunteer: &Volunteer,
        project_id: &ProjectId,
        hours_logged: u32,
    ) -> Result<(), SubscriberError> {
        info!(
            volunteer = %volunteer.id.0,
            project = %project_id.0,
            hours_logged,
            "volunteer completed project"
        );
        Ok(())
    }
}

/// Sends a welcome mail when a volunteer registers.
pub struct WelcomeMailSubscriber {
    gateway: Arc<dyn MailGateway>,
}

impl WelcomeMailSubscriber {
    pub fn new(gateway: Arc<dyn MailGateway>) -> Self {
        Self { gateway }
    }
}

impl VolunteerSubscriber for WelcomeMailSubscriber {
    fn volunteer_registered(&self, volunteer: &Volunteer) -> Result<(), SubscriberError> {
        self.gateway
            .deliver(OutboundMail {
                to: volunteer.email.clone(),
                subject: "Welcome aboard".to_string(),
                body: format!(
                    "Hi {}, thanks for joining the volunteer hub.",
                    volunteer.name
                ),
            })
            .map_err(|err| SubscriberError::new("welcome-mail", err.to_string()))
    }
}

/// Counters for volunteer engagement across one composition. Owned by the
/// composition root and injected, never process-global.
#[derive(Debug, Default)]
pub struct EngagementStats {
    registrations: AtomicU64,
    skill_updates: AtomicU64,
    completions: AtomicU64,
    hours_logged: AtomicU64,
}

impl EngagementStats {
    pub fn snapshot(&self) -> EngagementTotals {
        EngagementTotals {
            registrations: self.registrations.load(Ordering::Relaxed),
            skill_updates: self.skill_updates.load(Ordering::Relaxed),
            completions: self.completions.load(Ordering::Relaxed),
            hours_logged: self.hours_logged.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the shared engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementTotals {
    pub registrations: u64,
    pub skill_updates: u64,
    pub completions: u64,
    pub hours_logged: u64,
}

/// Subscriber feeding the shared engagement counters.
pub struct EngagementStatsSubscriber {
    stats: Arc<EngagementStats>,
}

impl EngagementStatsSubscriber {
    pub fn new(stats: Arc<EngagementStats>) -> Self {
        Self { stats }
    }
}

impl VolunteerSubscriber for EngagementStatsSubscriber {
    fn volunteer_registered(&self, _volunteer: &Volunteer) -> Result<(), SubscriberError> {
        self.stats.registrations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn skills_updated(
        &self,
        _volunteer: &Volunteer,
        _skills: &[String],
    ) -> Result<(), SubscriberError> {
        self.stats.skill_updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn project_completed(
        &self,
        _volunteer: &Volunteer,
        _project_id: &ProjectId,
        hours_logged: u32,
    ) -> Result<(), SubscriberError> {
        self.stats.completions.fetch_add(1, Ordering::Relaxed);
        self.stats
            .hours_logged
            .fetch_add(u64::from(hours_logged), Ordering::Relaxed);
        Ok(())
    }
}
