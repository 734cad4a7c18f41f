use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Opening posted by a partner company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub logo: String,
    pub tags: Vec<String>,
}

/// Status of an application. Moves strictly forward:
/// `Submitted -> UnderReview -> {Accepted | Rejected}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    /// Validate a move to `next`, returning the new status.
    pub fn advance(self, next: ApplicationStatus) -> Result<ApplicationStatus, TransitionError> {
        use ApplicationStatus::*;

        match (self, next) {
            (Submitted, UnderReview) | (UnderReview, Accepted) | (UnderReview, Rejected) => {
                Ok(next)
            }
            (from, to) => Err(TransitionError { from, to }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move application from {} to {}", .from.label(), .to.label())]
pub struct TransitionError {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// A student's application. Title and company are copied from the vacancy at
/// submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub vacancy_id: String,
    pub vacancy_title: String,
    pub company: String,
    pub applied_date: NaiveDate,
    pub status: ApplicationStatus,
}

impl JobApplication {
    pub fn submitted(id: ApplicationId, vacancy: &Vacancy, applied_date: NaiveDate) -> Self {
        Self {
            id,
            vacancy_id: vacancy.id.clone(),
            vacancy_title: vacancy.title.clone(),
            company: vacancy.company.clone(),
            applied_date,
            status: ApplicationStatus::Submitted,
        }
    }
}
