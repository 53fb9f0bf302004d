use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{Application, ApplicationId, ApplicationStatus};
use super::notify::{ApplicationNotifier, NotifyError};
use super::repository::{
    ApplicationRepository, CapacityLedger, ProjectRepository, RepositoryError,
};
use super::state::{ReviewStamp, StateContext};
use crate::workflows::volunteering::domain::{ProjectId, VolunteerId};
use crate::workflows::volunteering::events::VolunteerEventPublisher;
use crate::workflows::volunteering::volunteers::VolunteerRepository;

/// Service composing the state machine, capacity ledger, notification
/// pipeline, and volunteer event hub.
///
/// Every mutating operation runs the same strict sequence: guard checks,
/// state transition, capacity mutation, persistence, notification. Guard
/// misses surface as `false`/`None`; only collaborator failures raise.
pub struct VolunteerApplicationService<A, P, V> {
    applications: Arc<A>,
    projects: Arc<P>,
    volunteers: Arc<V>,
    notifier: Arc<dyn ApplicationNotifier>,
    events: Arc<VolunteerEventPublisher>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<A, P, V> VolunteerApplicationService<A, P, V>
where
    A: ApplicationRepository + 'static,
    P: ProjectRepository + CapacityLedger + 'static,
    V: VolunteerRepository + 'static,
{
    pub fn new(
        applications: Arc<A>,
        projects: Arc<P>,
        volunteers: Arc<V>,
        notifier: Arc<dyn ApplicationNotifier>,
        events: Arc<VolunteerEventPublisher>,
    ) -> Self {
        Self {
            applications,
            projects,
            volunteers,
            notifier,
            events,
        }
    }

    /// Submit a new application in Pending, or `None` when any intake
    /// guard misses: unknown or closed project, unknown or inactive
    /// volunteer, or a live application already on file.
    pub fn submit(
        &self,
        volunteer_id: &VolunteerId,
        project_id: &ProjectId,
    ) -> Result<Option<Application>, ApplicationServiceError> {
        let project = match self.projects.get(project_id)? {
            Some(project) => project,
            None => return Ok(None),
        };
        if !project.is_open_for_applications(Utc::now().date_naive()) {
            return Ok(None);
        }

        let volunteer = match self.volunteers.get(volunteer_id)? {
            Some(volunteer) => volunteer,
            None => return Ok(None),
        };
        if !volunteer.active {
            return Ok(None);
        }

        if let Some(existing) = self
            .applications
            .find_for_volunteer(volunteer_id, project_id)?
        {
            if existing.status.is_live() {
                return Ok(None);
            }
        }

        let application = Application::pending(
            next_application_id(),
            volunteer_id.clone(),
            project_id.clone(),
            Utc::now(),
        );
        self.applications.add(application.clone())?;
        self.applications.commit()?;

        self.notifier.application_submitted(&application)?;
        Ok(Some(application))
    }

    /// Approve a pending application.
    ///
    /// Capacity is confirmed -- and the slot reserved -- before the
    /// transition commits, so a full project never requires rolling back a
    /// status. The reservation itself is the ledger's atomic
    /// check-and-increment.
    pub fn approve(
        &self,
        id: &ApplicationId,
        notes: Option<String>,
    ) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };
        let project_id = application.project_id.clone();

        let mut context = StateContext::new(application);
        if !context.can_approve() {
            return Ok(false);
        }
        if !self.projects.reserve_slot(&project_id)? {
            return Ok(false);
        }
        if !context.approve(ReviewStamp {
            at: Utc::now(),
            notes,
        }) {
            self.projects.release_slot(&project_id)?;
            return Ok(false);
        }

        let application = context.into_application();
        self.applications.update(application.clone())?;
        self.applications.commit()?;
        self.projects.commit()?;

        self.notifier.application_approved(&application)?;
        Ok(true)
    }

    /// Reject a pending application with reviewer notes. No capacity
    /// effect.
    pub fn reject(
        &self,
        id: &ApplicationId,
        notes: Option<String>,
    ) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };

        let mut context = StateContext::new(application);
        if !context.reject(ReviewStamp {
            at: Utc::now(),
            notes,
        }) {
            return Ok(false);
        }

        let application = context.into_application();
        self.applications.update(application.clone())?;
        self.applications.commit()?;

        self.notifier.application_rejected(&application)?;
        Ok(true)
    }

    /// Withdraw from Pending or Accepted; an accepted withdrawal frees the
    /// project slot it held.
    pub fn withdraw(&self, id: &ApplicationId) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };
        let previous = application.status;

        let mut context = StateContext::new(application);
        if !context.withdraw() {
            return Ok(false);
        }

        let application = context.into_application();
        if previous == ApplicationStatus::Accepted {
            self.projects.release_slot(&application.project_id)?;
            self.projects.commit()?;
        }
        self.applications.update(application.clone())?;
        self.applications.commit()?;

        self.notifier.application_withdrawn(&application)?;
        Ok(true)
    }

    /// Mark an accepted application completed and publish the volunteer's
    /// project-completed event with the hours they logged. The slot stays
    /// occupied.
    pub fn complete(
        &self,
        id: &ApplicationId,
        hours_logged: u32,
    ) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };

        let mut context = StateContext::new(application);
        if !context.complete() {
            return Ok(false);
        }

        let application = context.into_application();
        self.applications.update(application.clone())?;
        self.applications.commit()?;

        match self.volunteers.get(&application.volunteer_id)? {
            Some(volunteer) => self.events.notify_project_completed(
                &volunteer,
                &application.project_id,
                hours_logged,
            ),
            None => warn!(
                volunteer = %application.volunteer_id.0,
                application = %application.id.0,
                "completed application references an unknown volunteer"
            ),
        }
        Ok(true)
    }

    /// Administrative removal, outside the business lifecycle: frees the
    /// slot an accepted record holds, removes it, and notifies nobody.
    pub fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };

        if application.status == ApplicationStatus::Accepted {
            self.projects.release_slot(&application.project_id)?;
            self.projects.commit()?;
        }
        let removed = self.applications.remove(id)?;
        self.applications.commit()?;
        Ok(removed)
    }

    /// Whether an approve would currently pass its guards. Mutates
    /// nothing.
    pub fn can_approve(&self, id: &ApplicationId) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };
        if !StateContext::new(application.clone()).can_approve() {
            return Ok(false);
        }
        Ok(self.projects.has_available_slot(&application.project_id)?)
    }

    /// Whether a reject would currently pass its guards.
    pub fn can_reject(&self, id: &ApplicationId) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };
        Ok(StateContext::new(application).can_reject())
    }

    /// Whether a withdraw would currently pass its guards; additionally
    /// requires the requesting volunteer to own the application.
    pub fn can_withdraw(
        &self,
        id: &ApplicationId,
        volunteer_id: &VolunteerId,
    ) -> Result<bool, ApplicationServiceError> {
        let application = match self.applications.get(id)? {
            Some(application) => application,
            None => return Ok(false),
        };
        if application.volunteer_id != *volunteer_id {
            return Ok(false);
        }
        Ok(StateContext::new(application).can_withdraw())
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotifyError),
}
