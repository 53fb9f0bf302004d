use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{Application, ApplicationStatus};

/// Review metadata stamped onto an application by approve and reject.
#[derive(Debug, Clone)]
pub struct ReviewStamp {
    pub at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Raised only for programmer-error inputs; guard refusals surface as
/// plain `false` results, never as errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("unknown application status '{0}'")]
    UnknownStatus(String),
}

/// Behavior of one lifecycle status.
///
/// Guards default to refusing and attempts default to doing nothing, so a
/// terminal status implements nothing beyond [`ApplicationState::status`].
/// An attempt either mutates the application and reports the committed
/// status, or returns `None` leaving the application untouched. Refusal is
/// an ordinary outcome, not an error.
pub trait ApplicationState: Send + Sync {
    fn status(&self) -> ApplicationStatus;

    fn can_approve(&self) -> bool {
        false
    }
    fn can_reject(&self) -> bool {
        false
    }
    fn can_withdraw(&self) -> bool {
        false
    }
    fn can_complete(&self) -> bool {
        false
    }

    fn approve(
        &self,
        _application: &mut Application,
        _review: ReviewStamp,
    ) -> Option<ApplicationStatus> {
        None
    }
    fn reject(
        &self,
        _application: &mut Application,
        _review: ReviewStamp,
    ) -> Option<ApplicationStatus> {
        None
    }
    fn withdraw(&self, _application: &mut Application) -> Option<ApplicationStatus> {
        None
    }
    fn complete(&self, _application: &mut Application) -> Option<ApplicationStatus> {
        None
    }
}

struct PendingState;

impl ApplicationState for PendingState {
    fn status(&self) -> ApplicationStatus {
        ApplicationStatus::Pending
    }

    fn can_approve(&self) -> bool {
        true
    }
    fn can_reject(&self) -> bool {
        true
    }
    fn can_withdraw(&self) -> bool {
        true
    }

    fn approve(
        &self,
        application: &mut Application,
        review: ReviewStamp,
    ) -> Option<ApplicationStatus> {
        application.status = ApplicationStatus::Accepted;
        application.reviewed_at = Some(review.at);
        application.review_notes = review.notes;
        Some(ApplicationStatus::Accepted)
    }

    fn reject(
        &self,
        application: &mut Application,
        review: ReviewStamp,
    ) -> Option<ApplicationStatus> {
        application.status = ApplicationStatus::Rejected;
        application.reviewed_at = Some(review.at);
        application.review_notes = review.notes;
        Some(ApplicationStatus::Rejected)
    }

    fn withdraw(&self, application: &mut Application) -> Option<ApplicationStatus> {
        application.status = ApplicationStatus::Withdrawn;
        Some(ApplicationStatus::Withdrawn)
    }
}

struct AcceptedState;

impl ApplicationState for AcceptedState {
    fn status(&self) -> ApplicationStatus {
        ApplicationStatus::Accepted
    }

    fn can_withdraw(&self) -> bool {
        true
    }
    fn can_complete(&self) -> bool {
        true
    }

    fn withdraw(&self, application: &mut Application) -> Option<ApplicationStatus> {
        application.status = ApplicationStatus::Withdrawn;
        Some(ApplicationStatus::Withdrawn)
    }

    fn complete(&self, application: &mut Application) -> Option<ApplicationStatus> {
        application.status = ApplicationStatus::Completed;
        Some(ApplicationStatus::Completed)
    }
}

struct RejectedState;

impl ApplicationState for RejectedState {
    fn status(&self) -> ApplicationStatus {
        ApplicationStatus::Rejected
    }
}

struct WithdrawnState;

impl ApplicationState for WithdrawnState {
    fn status(&self) -> ApplicationStatus {
        ApplicationStatus::Withdrawn
    }
}

struct CompletedState;

impl ApplicationState for CompletedState {
    fn status(&self) -> ApplicationStatus {
        ApplicationStatus::Completed
    }
}

/// Map a status to its behavior. Total over the enum; values outside the
/// five variants can only enter through stored labels, which
/// [`state_for_label`] screens.
pub fn state_for(status: ApplicationStatus) -> &'static dyn ApplicationState {
    match status {
        ApplicationStatus::Pending => &PendingState,
        ApplicationStatus::Accepted => &AcceptedState,
        ApplicationStatus::Rejected => &RejectedState,
        ApplicationStatus::Withdrawn => &WithdrawnState,
        ApplicationStatus::Completed => &CompletedState,
    }
}

/// Resolve a behavior from a stored status label.
pub fn state_for_label(label: &str) -> Result<&'static dyn ApplicationState, StateError> {
    ApplicationStatus::parse(label).map(state_for)
}

/// Holds one application together with the behavior of its current status.
///
/// This is the only place transitions are committed: every successful
/// attempt re-resolves the behavior from the new status and records the
/// edge that was taken.
pub struct StateContext {
    application: Application,
    state: &'static dyn ApplicationState,
}

impl StateContext {
    pub fn new(application: Application) -> Self {
        let state = state_for(application.status);
        Self { application, state }
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    pub fn status(&self) -> ApplicationStatus {
        self.application.status
    }

    pub fn into_application(self) -> Application {
        self.application
    }

    pub fn can_approve(&self) -> bool {
        self.state.can_approve()
    }

    pub fn can_reject(&self) -> bool {
        self.state.can_reject()
    }

    pub fn can_withdraw(&self) -> bool {
        self.state.can_withdraw()
    }

    pub fn can_complete(&self) -> bool {
        self.state.can_complete()
    }

    /// Attempt Pending -> Accepted. Refusal mutates nothing.
    pub fn approve(&mut self, review: ReviewStamp) -> bool {
        let from = self.application.status;
        match self.state.approve(&mut self.application, review) {
            Some(to) => {
                self.commit(from, to);
                true
            }
            None => false,
        }
    }

    /// Attempt Pending -> Rejected. Refusal mutates nothing.
    pub fn reject(&mut self, review: ReviewStamp) -> bool {
        let from = self.application.status;
        match self.state.reject(&mut self.application, review) {
            Some(to) => {
                self.commit(from, to);
                true
            }
            None => false,
        }
    }

    /// Attempt Pending/Accepted -> Withdrawn. Refusal mutates nothing.
    pub fn withdraw(&mut self) -> bool {
        let from = self.application.status;
        match self.state.withdraw(&mut self.application) {
            Some(to) => {
                self.commit(from, to);
                true
            }
            None => false,
        }
    }

    /// Attempt Accepted -> Completed. Refusal mutates nothing.
    pub fn complete(&mut self) -> bool {
        let from = self.application.status;
        match self.state.complete(&mut self.application) {
            Some(to) => {
                self.commit(from, to);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, from: ApplicationStatus, to: ApplicationStatus) {
        self.state = state_for(to);
        info!(
            application = %self.application.id.0,
            from = from.label(),
            to = to.label(),
            "application status transition"
        );
    }
}
