//! Coordination engine for volunteer-to-project applications.
//!
//! The crate tracks an application's status through a guarded lifecycle,
//! keeps each project's volunteer-capacity counter consistent with that
//! lifecycle, and fans lifecycle events out to independently composed
//! side-effect chains: a decorator notification pipeline for application
//! events and a fault-isolating publisher for volunteer events.
//!
//! Persistence, transport, and authentication are collaborator seams filled
//! in by the composition root; see [`workflows::volunteering`].

pub mod config;
pub mod telemetry;
pub mod workflows;
