//! Teacher-side reference flow: a queue of students awaiting a reference and
//! the archive of references already sent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{next_record_id, TeacherReference};

/// Student waiting for a reference from the signed-in teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedStudent {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub faculty: String,
    pub course_year: u8,
    pub avatar: String,
}

impl QueuedStudent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

pub const DEFAULT_COURSE: &str = "Akademik Rəy";

/// What the teacher submits for the student at the head of the queue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceDraft {
    pub comment: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

impl ReferenceDraft {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            course_name: None,
            skills: Vec::new(),
            rating: default_rating(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("a reference comment is required")]
    EmptyComment,
    #[error("rating must be between 1 and 5, got {0}")]
    Rating(u8),
    #[error("no students are waiting for a reference")]
    QueueExhausted,
}

/// Progress through the queue as reported to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    pub current: Option<QueuedStudent>,
    /// 1-based position of `current`.
    pub position: usize,
    pub total: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone)]
pub struct ReviewQueue {
    teacher_name: String,
    students: Vec<QueuedStudent>,
    cursor: usize,
}

impl ReviewQueue {
    pub fn new(teacher_name: impl Into<String>, students: Vec<QueuedStudent>) -> Self {
        Self {
            teacher_name: teacher_name.into(),
            students,
            cursor: 0,
        }
    }

    pub fn current(&self) -> Option<&QueuedStudent> {
        self.students.get(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    pub fn status(&self) -> QueueStatus {
        let total = self.students.len();
        QueueStatus {
            current: self.current().cloned(),
            position: (self.cursor + 1).min(total),
            total,
            remaining: total.saturating_sub(self.cursor),
        }
    }

    /// Write a reference for the current student, archive it, and move on.
    pub fn confirm(
        &mut self,
        draft: ReferenceDraft,
        date: NaiveDate,
        archive: &mut ReferenceArchive,
    ) -> Result<TeacherReference, ReferenceError> {
        let comment = draft.comment.trim();
        if comment.is_empty() {
            return Err(ReferenceError::EmptyComment);
        }
        if !(1..=5).contains(&draft.rating) {
            return Err(ReferenceError::Rating(draft.rating));
        }
        let student = self.current().ok_or(ReferenceError::QueueExhausted)?;

        let course_name = draft
            .course_name
            .as_deref()
            .map(str::trim)
            .filter(|course| !course.is_empty())
            .unwrap_or(DEFAULT_COURSE)
            .to_string();

        let reference = TeacherReference {
            id: next_record_id("ref"),
            teacher_name: self.teacher_name.clone(),
            student_name: student.full_name(),
            course_name,
            date,
            rating: draft.rating,
            skills: draft.skills,
            comment: comment.to_string(),
            verified: true,
        };

        info!(student_id = %student.id, reference_id = %reference.id, "reference sent");
        archive.record(reference.clone());
        self.cursor += 1;
        Ok(reference)
    }
}

/// References the teacher has already sent, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReferenceArchive {
    references: Vec<TeacherReference>,
}

impl ReferenceArchive {
    pub fn new(references: Vec<TeacherReference>) -> Self {
        Self { references }
    }

    pub fn all(&self) -> &[TeacherReference] {
        &self.references
    }

    pub fn record(&mut self, reference: TeacherReference) {
        self.references.insert(0, reference);
    }

    /// Case-insensitive match on student or course name; blank returns everything.
    pub fn search(&self, term: &str) -> Vec<TeacherReference> {
        let needle = term.trim().to_lowercase();
        self.references
            .iter()
            .filter(|reference| {
                needle.is_empty()
                    || reference.student_name.to_lowercase().contains(&needle)
                    || reference.course_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}
