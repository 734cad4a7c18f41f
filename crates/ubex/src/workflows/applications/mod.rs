//! Job application intake and the simulated employer review lifecycle.
//!
//! A submission is recorded immediately as `Submitted`; a spawned task then
//! moves it to `UnderReview` and finally to `Accepted` or `Rejected`, with both
//! deadlines measured from the submit instant. Every transition is announced
//! through a [`NotificationSink`].

mod config;
mod decision;
pub mod domain;
mod lifecycle;
pub mod notifications;
pub mod router;

#[cfg(test)]
mod tests;

pub use config::{LifecycleConfig, LifecycleConfigError};
pub use decision::{DecisionSampler, FixedDecision, RandomDecision};
pub use domain::{ApplicationId, ApplicationStatus, JobApplication, TransitionError, Vacancy};
pub use lifecycle::{ApplicationLifecycle, Submission};
pub use notifications::{
    ChannelNotifications, Notification, NotificationError, NotificationLog, NotificationSink,
    Severity,
};
pub use router::{application_router, CareerCenter};
