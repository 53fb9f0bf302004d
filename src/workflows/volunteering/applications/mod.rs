//! Application lifecycle engine: the guarded state machine, the
//! capacity-coupled orchestration service, and the decorator notification
//! pipeline composed around it.

pub mod domain;
pub mod notify;
pub mod repository;
pub mod service;
pub mod state;


pub use domain::{Application, ApplicationId, ApplicationStatus};
pub use notify::{
    standard_pipeline, ApplicationNotifier, ConsoleMailGateway, LoggingNotifier, MailError,
    MailGateway, MailNotifier, NoopNotifier, NotificationStats, NotificationTotals, NotifyError,
    OutboundMail, StatsNotifier,
};
pub use repository::{
    ApplicationRepository, CapacityLedger, ProjectRepository, RepositoryError,
};
pub use service::{ApplicationServiceError, VolunteerApplicationService};
pub use state::{
    state_for, state_for_label, ApplicationState, ReviewStamp, StateContext, StateError,
};
