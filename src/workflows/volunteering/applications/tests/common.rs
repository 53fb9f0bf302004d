use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::workflows::volunteering::applications::domain::{
    Application, ApplicationId, ApplicationStatus,
};
use crate::workflows::volunteering::applications::notify::{
    standard_pipeline, MailError, MailGateway, NotificationStats, OutboundMail,
};
use crate::workflows::volunteering::applications::repository::{
    ApplicationRepository, CapacityLedger, ProjectRepository, RepositoryError,
};
use crate::workflows::volunteering::applications::service::VolunteerApplicationService;
use crate::workflows::volunteering::domain::{Project, ProjectId, Volunteer, VolunteerId};
use crate::workflows::volunteering::events::VolunteerEventPublisher;
use crate::workflows::volunteering::volunteers::VolunteerRepository;

pub(super) fn volunteer_id(raw: &str) -> VolunteerId {
    VolunteerId(raw.to_string())
}

pub(super) fn project_id(raw: &str) -> ProjectId {
    ProjectId(raw.to_string())
}

pub(super) fn application_id(raw: &str) -> ApplicationId {
    ApplicationId(raw.to_string())
}

pub(super) fn volunteer(id: &str) -> Volunteer {
    Volunteer {
        id: volunteer_id(id),
        name: format!("Volunteer {id}"),
        email: format!("{id}@example.org"),
        skills: vec!["first-aid".to_string()],
        active: true,
    }
}

pub(super) fn project(id: &str, max_volunteers: u32) -> Project {
    Project {
        id: project_id(id),
        name: format!("Project {id}"),
        published: true,
        application_deadline: Some(NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date")),
        max_volunteers,
        current_volunteers: 0,
    }
}

pub(super) fn pending_application(id: &str, volunteer: &str, project: &str) -> Application {
    Application::pending(
        application_id(id),
        volunteer_id(volunteer),
        project_id(project),
        Utc::now(),
    )
}

pub(super) fn application_with_status(
    id: &str,
    volunteer: &str,
    project: &str,
    status: ApplicationStatus,
) -> Application {
    let mut application = pending_application(id, volunteer, project);
    application.status = status;
    application
}

#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<HashMap<ApplicationId, Application>>,
}

impl MemoryApplications {
    pub(super) fn seed(&self, application: Application) {
        self.records
            .lock()
            .expect("application map poisoned")
            .insert(application.id.clone(), application);
    }

    pub(super) fn stored(&self, id: &ApplicationId) -> Option<Application> {
        self.records
            .lock()
            .expect("application map poisoned")
            .get(id)
            .cloned()
    }
}

impl ApplicationRepository for MemoryApplications {
    fn get(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("application map poisoned")
            .get(id)
            .cloned())
    }

    fn add(&self, application: Application) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("application map poisoned");
        if records.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(application.id.clone(), application);
        Ok(())
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("application map poisoned")
            .insert(application.id.clone(), application);
        Ok(())
    }

    fn remove(&self, id: &ApplicationId) -> Result<bool, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("application map poisoned")
            .remove(id)
            .is_some())
    }

    fn find_for_volunteer(
        &self,
        volunteer_id: &VolunteerId,
        project_id: &ProjectId,
    ) -> Result<Option<Application>, RepositoryError> {
        let records = self.records.lock().expect("application map poisoned");
        Ok(records
            .values()
            .filter(|application| {
                application.volunteer_id == *volunteer_id
                    && application.project_id == *project_id
            })
            .max_by_key(|application| application.applied_at)
            .cloned())
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryProjects {
    records: Mutex<HashMap<ProjectId, Project>>,
}

impl MemoryProjects {
    pub(super) fn seed(&self, project: Project) {
        self.records
            .lock()
            .expect("project map poisoned")
            .insert(project.id.clone(), project);
    }

    pub(super) fn capacity_of(&self, id: &ProjectId) -> (u32, u32) {
        let records = self.records.lock().expect("project map poisoned");
        let project = records.get(id).expect("project seeded");
        (project.current_volunteers, project.max_volunteers)
    }
}

impl ProjectRepository for MemoryProjects {
    fn get(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("project map poisoned")
            .get(id)
            .cloned())
    }

    fn update(&self, project: Project) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("project map poisoned")
            .insert(project.id.clone(), project);
        Ok(())
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

impl CapacityLedger for MemoryProjects {
    fn has_available_slot(&self, id: &ProjectId) -> Result<bool, RepositoryError> {
        let records = self.records.lock().expect("project map poisoned");
        Ok(records
            .get(id)
            .map(Project::has_available_slot)
            .unwrap_or(false))
    }

    fn reserve_slot(&self, id: &ProjectId) -> Result<bool, RepositoryError> {
        let mut records = self.records.lock().expect("project map poisoned");
        match records.get_mut(id) {
            Some(project) => Ok(project.register_volunteer().is_ok()),
            None => Ok(false),
        }
    }

    fn release_slot(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("project map poisoned");
        match records.get_mut(id) {
            Some(project) => project
                .release_volunteer()
                .map_err(|err| RepositoryError::Inconsistent(err.to_string())),
            None => Err(RepositoryError::NotFound),
        }
    }
}

#[derive(Default)]
pub(super) struct MemoryVolunteers {
    records: Mutex<HashMap<VolunteerId, Volunteer>>,
}

impl MemoryVolunteers {
    pub(super) fn seed(&self, volunteer: Volunteer) {
        self.records
            .lock()
            .expect("volunteer map poisoned")
            .insert(volunteer.id.clone(), volunteer);
    }
}

impl VolunteerRepository for MemoryVolunteers {
    fn get(&self, id: &VolunteerId) -> Result<Option<Volunteer>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("volunteer map poisoned")
            .get(id)
            .cloned())
    }

    fn add(&self, volunteer: Volunteer) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("volunteer map poisoned");
        if records.contains_key(&volunteer.id) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(volunteer.id.clone(), volunteer);
        Ok(())
    }

    fn update(&self, volunteer: Volunteer) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("volunteer map poisoned")
            .insert(volunteer.id.clone(), volunteer);
        Ok(())
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct RecordingMailGateway {
    sent: Mutex<Vec<OutboundMail>>,
}

impl RecordingMailGateway {
    pub(super) fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().expect("outbox poisoned").clone()
    }
}

impl MailGateway for RecordingMailGateway {
    fn deliver(&self, mail: OutboundMail) -> Result<(), MailError> {
        self.sent.lock().expect("outbox poisoned").push(mail);
        Ok(())
    }
}

pub(super) struct FailingMailGateway;

impl MailGateway for FailingMailGateway {
    fn deliver(&self, _mail: OutboundMail) -> Result<(), MailError> {
        Err(MailError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct Harness {
    pub(super) service:
        VolunteerApplicationService<MemoryApplications, MemoryProjects, MemoryVolunteers>,
    pub(super) applications: Arc<MemoryApplications>,
    pub(super) projects: Arc<MemoryProjects>,
    pub(super) volunteers: Arc<MemoryVolunteers>,
    pub(super) mail: Arc<RecordingMailGateway>,
    pub(super) stats: Arc<NotificationStats>,
    pub(super) events: Arc<VolunteerEventPublisher>,
}

pub(super) fn harness() -> Harness {
    let applications = Arc::new(MemoryApplications::default());
    let projects = Arc::new(MemoryProjects::default());
    let volunteers = Arc::new(MemoryVolunteers::default());
    let mail = Arc::new(RecordingMailGateway::default());
    let stats = Arc::new(NotificationStats::default());
    let events = Arc::new(VolunteerEventPublisher::new());
    let notifier = standard_pipeline(mail.clone(), stats.clone());
    let service = VolunteerApplicationService::new(
        applications.clone(),
        projects.clone(),
        volunteers.clone(),
        notifier,
        events.clone(),
    );
    Harness {
        service,
        applications,
        projects,
        volunteers,
        mail,
        stats,
        events,
    }
}
