//! Records shared across workflows. The student aggregate is only ever
//! replaced wholesale through [`Student::merged`].

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::applications::JobApplication;

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Session-unique identifier for user-created records (links, certificates, partners).
pub fn next_record_id(prefix: &str) -> String {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// The four audiences served by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Teacher,
    UniversityAdmin,
    PartnerCompany,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Student,
        UserRole::Teacher,
        UserRole::UniversityAdmin,
        UserRole::PartnerCompany,
    ];

    /// Roles that sign in with a university mailbox.
    pub const fn is_university_member(self) -> bool {
        !matches!(self, UserRole::PartnerCompany)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    Soft,
    Analytical,
    Project,
    Tools,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency percentage, 0..=100.
    pub value: u8,
    pub category: SkillCategory,
    #[serde(default)]
    pub ai_generated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkPlatform {
    LinkedIn,
    GitHub,
    LeetCode,
    Other,
}

impl LinkPlatform {
    pub const fn label(self) -> &'static str {
        match self {
            LinkPlatform::LinkedIn => "LinkedIn",
            LinkPlatform::GitHub => "GitHub",
            LinkPlatform::LeetCode => "LeetCode",
            LinkPlatform::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub id: String,
    pub platform: LinkPlatform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvAnalysisStatus {
    None,
    Processing,
    Completed,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvData {
    pub file_name: String,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub analysis_status: CvAnalysisStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub verification_number: String,
    pub url: String,
    /// Remote URL or an embedded `data:` URL.
    pub image: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherReference {
    pub id: String,
    pub teacher_name: String,
    pub student_name: String,
    /// Subject the reference was written for.
    pub course_name: String,
    pub date: NaiveDate,
    /// 1..=5
    pub rating: u8,
    pub skills: Vec<String>,
    pub comment: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicProject {
    pub id: String,
    pub title: String,
    pub grade: String,
    pub skills_gained: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub faculty: String,
    pub course_year: u8,
    pub gpa: f32,
    pub avatar: String,
    pub skills: Vec<Skill>,
    pub references: Vec<TeacherReference>,
    pub projects: Vec<AcademicProject>,
    pub links: Vec<ProfileLink>,
    pub certificates: Vec<Certificate>,
    pub applications: Vec<JobApplication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<CvData>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Produce a new record with every collection present in `patch` replaced.
    pub fn merged(&self, patch: StudentPatch) -> Student {
        let StudentPatch {
            skills,
            links,
            certificates,
            applications,
            references,
            cv,
        } = patch;

        Student {
            skills: skills.unwrap_or_else(|| self.skills.clone()),
            links: links.unwrap_or_else(|| self.links.clone()),
            certificates: certificates.unwrap_or_else(|| self.certificates.clone()),
            applications: applications.unwrap_or_else(|| self.applications.clone()),
            references: references.unwrap_or_else(|| self.references.clone()),
            cv: cv.or_else(|| self.cv.clone()),
            ..self.clone()
        }
    }
}

/// Partial update applied by [`Student::merged`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub skills: Option<Vec<Skill>>,
    pub links: Option<Vec<ProfileLink>>,
    pub certificates: Option<Vec<Certificate>>,
    pub applications: Option<Vec<JobApplication>>,
    pub references: Option<Vec<TeacherReference>>,
    pub cv: Option<CvData>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        *self == StudentPatch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub name: String,
    pub count: u32,
}

/// Aggregate figures shown on the university analytics dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityStats {
    pub total_students: u32,
    pub total_teachers: u32,
    pub partner_companies: u32,
    pub average_gpa: f32,
    pub top_skills: Vec<SkillCount>,
}
