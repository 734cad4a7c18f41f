use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::LifecycleConfig;
use super::decision::DecisionSampler;
use super::domain::{next_application_id, ApplicationId, ApplicationStatus, JobApplication, Vacancy};
use super::notifications::{Notification, NotificationSink};
use crate::domain::StudentPatch;
use crate::session::StudentStore;

/// Result of [`ApplicationLifecycle::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "application", rename_all = "snake_case")]
pub enum Submission {
    Accepted(JobApplication),
    /// The student already applied to this vacancy; nothing changed.
    Duplicate,
}

/// Drives submitted applications through the simulated review.
///
/// Each accepted submission owns one spawned task and one cancellation token.
/// The task sleeps until `submitted + review_delay`, moves the application to
/// `UnderReview`, sleeps until `submitted + decision_delay`, then draws the
/// final answer.
pub struct ApplicationLifecycle<N, D> {
    inner: Arc<Inner<N, D>>,
}

struct Inner<N, D> {
    store: Arc<StudentStore>,
    notifications: Arc<N>,
    decisions: Arc<D>,
    config: LifecycleConfig,
    pending: Mutex<HashMap<ApplicationId, CancellationToken>>,
}

impl<N, D> Clone for ApplicationLifecycle<N, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N, D> ApplicationLifecycle<N, D>
where
    N: NotificationSink + 'static,
    D: DecisionSampler + 'static,
{
    pub fn new(
        store: Arc<StudentStore>,
        notifications: Arc<N>,
        decisions: Arc<D>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                notifications,
                decisions,
                config,
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.inner.config
    }

    /// Record an application for `vacancy` and schedule its review.
    ///
    /// A second submission for the same vacancy is ignored: no record, no
    /// timers. Must be called from within a Tokio runtime.
    pub fn submit(&self, vacancy: &Vacancy) -> Submission {
        let today = Utc::now().date_naive();
        // Held across the store update so a concurrent `cancel_all` never
        // observes a recorded application without its token.
        let mut pending = self.inner.lock_pending();
        let created = self.inner.store.update(|student| {
            if student
                .applications
                .iter()
                .any(|application| application.vacancy_id == vacancy.id)
            {
                return (StudentPatch::default(), None);
            }

            let application = JobApplication::submitted(next_application_id(), vacancy, today);
            let mut applications = student.applications.clone();
            applications.push(application.clone());
            (
                StudentPatch {
                    applications: Some(applications),
                    ..StudentPatch::default()
                },
                Some(application),
            )
        });

        let Some(application) = created else {
            drop(pending);
            debug!(vacancy_id = %vacancy.id, "duplicate application ignored");
            return Submission::Duplicate;
        };

        let token = CancellationToken::new();
        pending.insert(application.id.clone(), token.clone());
        drop(pending);
        self.schedule(&application, token);
        info!(
            application_id = %application.id,
            vacancy_id = %application.vacancy_id,
            company = %application.company,
            "application submitted"
        );
        Submission::Accepted(application)
    }

    pub fn applications(&self) -> Vec<JobApplication> {
        self.inner.store.snapshot().applications.clone()
    }

    /// Number of applications still waiting for a transition.
    pub fn pending(&self) -> usize {
        self.inner.lock_pending().len()
    }

    /// Stop the remaining transitions of one application.
    pub fn cancel(&self, id: &ApplicationId) -> bool {
        match self.inner.lock_pending().remove(id) {
            Some(token) => {
                token.cancel();
                info!(application_id = %id, "pending review cancelled");
                true
            }
            None => false,
        }
    }

    /// Stop every pending transition, e.g. when the session is abandoned.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.inner.lock_pending().drain().collect();
        for (_, token) in &drained {
            token.cancel();
        }
        if !drained.is_empty() {
            info!(count = drained.len(), "pending reviews cancelled");
        }
        drained.len()
    }

    fn schedule(&self, application: &JobApplication, token: CancellationToken) {
        let inner = Arc::clone(&self.inner);
        let id = application.id.clone();
        let company = application.company.clone();
        let submitted_at = Instant::now();
        tokio::spawn(async move {
            inner.drive(id, company, submitted_at, token).await;
        });
    }
}

impl<N, D> Inner<N, D>
where
    N: NotificationSink,
    D: DecisionSampler,
{
    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashMap<ApplicationId, CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn drive(
        &self,
        id: ApplicationId,
        company: String,
        submitted_at: Instant,
        token: CancellationToken,
    ) {
        if !wait_until(submitted_at + self.config.review_delay(), &token).await {
            return;
        }
        self.transition(&id, &company, ApplicationStatus::UnderReview);

        if !wait_until(submitted_at + self.config.decision_delay(), &token).await {
            return;
        }
        let outcome = if self.decisions.accept() {
            ApplicationStatus::Accepted
        } else {
            ApplicationStatus::Rejected
        };
        self.transition(&id, &company, outcome);

        self.lock_pending().remove(&id);
    }

    fn transition(&self, id: &ApplicationId, company: &str, next: ApplicationStatus) {
        let applied = self.store.update(|student| {
            let Some(current) = student
                .applications
                .iter()
                .find(|application| &application.id == id)
            else {
                return (StudentPatch::default(), false);
            };

            if let Err(err) = current.status.advance(next) {
                warn!(application_id = %id, error = %err, "transition skipped");
                return (StudentPatch::default(), false);
            }

            let applications = student
                .applications
                .iter()
                .map(|application| {
                    if &application.id == id {
                        JobApplication {
                            status: next,
                            ..application.clone()
                        }
                    } else {
                        application.clone()
                    }
                })
                .collect();

            (
                StudentPatch {
                    applications: Some(applications),
                    ..StudentPatch::default()
                },
                true,
            )
        });

        if !applied {
            return;
        }

        info!(application_id = %id, status = next.label(), "application status changed");
        let notification = Notification::for_transition(id.clone(), company, next);
        if let Err(err) = self.notifications.publish(notification) {
            warn!(application_id = %id, error = %err, "notification dropped");
        }
    }
}

/// Sleep until `deadline`; `false` when cancelled first.
async fn wait_until(deadline: Instant, token: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = sleep_until(deadline) => true,
    }
}
