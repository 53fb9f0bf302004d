use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::domain::Application;
use crate::workflows::volunteering::domain::VolunteerId;

/// Cross-cutting reactions to application lifecycle events.
///
/// Every method defaults to a no-op so [`NoopNotifier`] is the natural base
/// of a decorator chain. Each decorator performs its own behavior and then
/// delegates inward; a decorator that skips delegation silences every stage
/// further in. Failures here propagate to the caller -- the pipeline is not
/// the fault-isolated path (the volunteer event hub is).
pub trait ApplicationNotifier: Send + Sync {
    fn application_submitted(&self, _application: &Application) -> Result<(), NotifyError> {
        Ok(())
    }
    fn application_approved(&self, _application: &Application) -> Result<(), NotifyError> {
        Ok(())
    }
    fn application_rejected(&self, _application: &Application) -> Result<(), NotifyError> {
        Ok(())
    }
    fn application_withdrawn(&self, _application: &Application) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Innermost link of every pipeline.
pub struct NoopNotifier;

impl ApplicationNotifier for NoopNotifier {}

/// Error raised by a pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Outbound mail hook (an SMTP relay or queue adapter in production); the
/// bundled implementation only simulates delivery.
pub trait MailGateway: Send + Sync {
    fn deliver(&self, mail: OutboundMail) -> Result<(), MailError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Simulated delivery: the mail is logged, never sent.
pub struct ConsoleMailGateway;

impl MailGateway for ConsoleMailGateway {
    fn deliver(&self, mail: OutboundMail) -> Result<(), MailError> {
        info!(to = %mail.to, subject = %mail.subject, "simulated mail delivery");
        Ok(())
    }
}

/// Decorator writing one tracing event per lifecycle notification.
pub struct LoggingNotifier {
    inner: Arc<dyn ApplicationNotifier>,
}

impl LoggingNotifier {
    pub fn new(inner: Arc<dyn ApplicationNotifier>) -> Self {
        Self { inner }
    }

    fn record(&self, event: &str, application: &Application) {
        info!(
            event,
            application = %application.id.0,
            volunteer = %application.volunteer_id.0,
            project = %application.project_id.0,
            "application notification"
        );
    }
}

impl ApplicationNotifier for LoggingNotifier {
    fn application_submitted(&self, application: &Application) -> Result<(), NotifyError> {
        self.record("submitted", application);
        self.inner.application_submitted(application)
    }

    fn application_approved(&self, application: &Application) -> Result<(), NotifyError> {
        self.record("approved", application);
        self.inner.application_approved(application)
    }

    fn application_rejected(&self, application: &Application) -> Result<(), NotifyError> {
        self.record("rejected", application);
        self.inner.application_rejected(application)
    }

    fn application_withdrawn(&self, application: &Application) -> Result<(), NotifyError> {
        self.record("withdrawn", application);
        self.inner.application_withdrawn(application)
    }
}

fn volunteer_address(id: &VolunteerId) -> String {
    format!("{}@volunteers.example.org", id.0)
}

/// Decorator composing a simulated e-mail per lifecycle notification.
pub struct MailNotifier {
    gateway: Arc<dyn MailGateway>,
    inner: Arc<dyn ApplicationNotifier>,
}

impl MailNotifier {
    pub fn new(gateway: Arc<dyn MailGateway>, inner: Arc<dyn ApplicationNotifier>) -> Self {
        Self { gateway, inner }
    }

    fn send(
        &self,
        application: &Application,
        subject: &str,
        body: String,
    ) -> Result<(), NotifyError> {
        self.gateway.deliver(OutboundMail {
            to: volunteer_address(&application.volunteer_id),
            subject: subject.to_string(),
            body,
        })?;
        Ok(())
    }
}

impl ApplicationNotifier for MailNotifier {
    fn application_submitted(&self, application: &Application) -> Result<(), NotifyError> {
        self.send(
            application,
            "Application received",
            format!(
                "We received your application to project {}.",
                application.project_id.0
            ),
        )?;
        self.inner.application_submitted(application)
    }

    fn application_approved(&self, application: &Application) -> Result<(), NotifyError> {
        self.send(
            application,
            "Application approved",
            format!(
                "Your application to project {} was approved. Welcome to the team!",
                application.project_id.0
            ),
        )?;
        self.inner.application_approved(application)
    }

    fn application_rejected(&self, application: &Application) -> Result<(), NotifyError> {
        let notes = application
            .review_notes
            .as_deref()
            .unwrap_or("no further details were provided");
        self.send(
            application,
            "Application update",
            format!(
                "Your application to project {} was not accepted: {}.",
                application.project_id.0, notes
            ),
        )?;
        self.inner.application_rejected(application)
    }

    fn application_withdrawn(&self, application: &Application) -> Result<(), NotifyError> {
        self.send(
            application,
            "Application withdrawn",
            format!(
                "Your application to project {} has been withdrawn.",
                application.project_id.0
            ),
        )?;
        self.inner.application_withdrawn(application)
    }
}

/// Counters shared by every notification flowing through one composition.
/// Owned by the composition root and injected, never process-global.
#[derive(Debug, Default)]
pub struct NotificationStats {
    submitted: AtomicU64,
    approved: AtomicU64,
    rejected: AtomicU64,
    withdrawn: AtomicU64,
}

impl NotificationStats {
    pub fn snapshot(&self) -> NotificationTotals {
        NotificationTotals {
            submitted: self.submitted.load(Ordering::Relaxed),
            approved: self.approved.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            withdrawn: self.withdrawn.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the shared counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTotals {
    pub submitted: u64,
    pub approved: u64,
    pub rejected: u64,
    pub withdrawn: u64,
}

/// Decorator feeding the shared statistics counters.
pub struct StatsNotifier {
    stats: Arc<NotificationStats>,
    inner: Arc<dyn ApplicationNotifier>,
}

impl StatsNotifier {
    pub fn new(stats: Arc<NotificationStats>, inner: Arc<dyn ApplicationNotifier>) -> Self {
        Self { stats, inner }
    }
}

impl ApplicationNotifier for StatsNotifier {
    fn application_submitted(&self, application: &Application) -> Result<(), NotifyError> {
        self.stats.submitted.fetch_add(1, Ordering::Relaxed);
        self.inner.application_submitted(application)
    }

    fn application_approved(&self, application: &Application) -> Result<(), NotifyError> {
        self.stats.approved.fetch_add(1, Ordering::Relaxed);
        self.inner.application_approved(application)
    }

    fn application_rejected(&self, application: &Application) -> Result<(), NotifyError> {
        self.stats.rejected.fetch_add(1, Ordering::Relaxed);
        self.inner.application_rejected(application)
    }

    fn application_withdrawn(&self, application: &Application) -> Result<(), NotifyError> {
        self.stats.withdrawn.fetch_add(1, Ordering::Relaxed);
        self.inner.application_withdrawn(application)
    }
}

/// The documented composition order: logging outermost, then mail, then
/// statistics, then the no-op base.
pub fn standard_pipeline(
    gateway: Arc<dyn MailGateway>,
    stats: Arc<NotificationStats>,
) -> Arc<dyn ApplicationNotifier> {
    let base: Arc<dyn ApplicationNotifier> = Arc::new(NoopNotifier);
    let stats = Arc::new(StatsNotifier::new(stats, base));
    let mail = Arc::new(MailNotifier::new(gateway, stats));
    Arc::new(LoggingNotifier::new(mail))
}
