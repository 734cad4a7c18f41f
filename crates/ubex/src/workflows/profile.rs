//! Profile links and CV analysis for the signed-in student.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    next_record_id, CvAnalysisStatus, CvData, LinkPlatform, ProfileLink, Skill, StudentPatch,
};
use crate::insights::{GenerativeModel, InsightService};
use crate::seed;
use crate::session::StudentStore;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkDraft {
    #[serde(default = "default_platform")]
    pub platform: LinkPlatform,
    #[serde(default)]
    pub label: String,
    pub url: String,
}

fn default_platform() -> LinkPlatform {
    LinkPlatform::Other
}

/// Uploaded CV as described by the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CvUpload {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl CvUpload {
    /// PDF by declared content type, or by extension when none was sent.
    pub fn is_pdf(&self) -> bool {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() => declared
                .parse::<mime::Mime>()
                .map(|parsed| parsed.essence_str() == mime::APPLICATION_PDF.essence_str())
                .unwrap_or(false),
            _ => mime_guess::from_path(&self.file_name)
                .first()
                .is_some_and(|guessed| guessed == mime::APPLICATION_PDF),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Canned result, no model call.
    Demo,
    #[default]
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CvOutcome {
    Demo,
    Completed { skills: usize, links: usize },
    /// The model found nothing; the profile is unchanged.
    NoInsight,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("a link url is required")]
    MissingUrl,
    #[error("link {0} not found")]
    LinkNotFound(String),
    #[error("{0} is not a PDF document")]
    UnsupportedDocument(String),
}

#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<StudentStore>,
}

impl ProfileService {
    pub fn new(store: Arc<StudentStore>) -> Self {
        Self { store }
    }

    pub fn links(&self) -> Vec<ProfileLink> {
        self.store.snapshot().links.clone()
    }

    pub fn add_link(&self, draft: LinkDraft) -> Result<ProfileLink, ProfileError> {
        let url = draft.url.trim();
        if url.is_empty() {
            return Err(ProfileError::MissingUrl);
        }
        let label = match draft.label.trim() {
            "" => draft.platform.label().to_string(),
            label => label.to_string(),
        };
        let link = ProfileLink {
            id: next_record_id("link"),
            platform: draft.platform,
            label: Some(label),
            url: url.to_string(),
        };

        self.store.update(|student| {
            let mut links = student.links.clone();
            links.push(link.clone());
            (
                StudentPatch {
                    links: Some(links),
                    ..StudentPatch::default()
                },
                (),
            )
        });
        Ok(link)
    }

    pub fn remove_link(&self, id: &str) -> Result<ProfileLink, ProfileError> {
        self.store.update(|student| {
            let Some(index) = student.links.iter().position(|link| link.id == id) else {
                return (
                    StudentPatch::default(),
                    Err(ProfileError::LinkNotFound(id.to_string())),
                );
            };
            let mut links = student.links.clone();
            let removed = links.remove(index);
            (
                StudentPatch {
                    links: Some(links),
                    ..StudentPatch::default()
                },
                Ok(removed),
            )
        })
    }

    /// Fill skills and links from an uploaded CV.
    ///
    /// Demo mode installs the canned skill set and adds sample links only to
    /// a profile without links. AI mode changes the profile only when the
    /// model extracts at least one skill.
    pub async fn analyze_cv<M: GenerativeModel>(
        &self,
        upload: CvUpload,
        mode: AnalysisMode,
        insights: &InsightService<M>,
    ) -> Result<CvOutcome, ProfileError> {
        if !upload.is_pdf() {
            return Err(ProfileError::UnsupportedDocument(upload.file_name));
        }

        if mode == AnalysisMode::Demo {
            self.store.update(|student| {
                let links = if student.links.is_empty() {
                    seed::demo_cv_links()
                } else {
                    student.links.clone()
                };
                (
                    StudentPatch {
                        skills: Some(seed::demo_cv_skills()),
                        links: Some(links),
                        cv: Some(cv_record(&upload.file_name, CvAnalysisStatus::Demo)),
                        ..StudentPatch::default()
                    },
                    (),
                )
            });
            info!(file_name = %upload.file_name, "demo CV analysis applied");
            return Ok(CvOutcome::Demo);
        }

        let previous = self.store.update(|student| {
            (
                StudentPatch {
                    cv: Some(cv_record(&upload.file_name, CvAnalysisStatus::Processing)),
                    ..StudentPatch::default()
                },
                student.cv.clone(),
            )
        });

        let analysis = insights.analyze_document(&upload.file_name).await;
        if analysis.skills.is_empty() {
            let restored = previous.unwrap_or(CvData {
                file_name: String::new(),
                uploaded_at: None,
                analysis_status: CvAnalysisStatus::None,
            });
            self.store.apply(StudentPatch {
                cv: Some(restored),
                ..StudentPatch::default()
            });
            info!(file_name = %upload.file_name, "CV analysis produced no skills");
            return Ok(CvOutcome::NoInsight);
        }

        let skills: Vec<Skill> = analysis
            .skills
            .into_iter()
            .map(|skill| Skill {
                name: skill.name,
                value: skill.value,
                category: skill.category,
                ai_generated: true,
            })
            .collect();
        let extracted: Vec<ProfileLink> = analysis
            .links
            .into_iter()
            .map(|link| ProfileLink {
                id: next_record_id("link"),
                platform: link.platform,
                label: Some(link.platform.label().to_string()),
                url: link.url,
            })
            .collect();
        let outcome = CvOutcome::Completed {
            skills: skills.len(),
            links: extracted.len(),
        };

        self.store.update(|student| {
            let mut links = student.links.clone();
            links.extend(extracted);
            (
                StudentPatch {
                    skills: Some(skills),
                    links: Some(links),
                    cv: Some(cv_record(&upload.file_name, CvAnalysisStatus::Completed)),
                    ..StudentPatch::default()
                },
                (),
            )
        });
        info!(file_name = %upload.file_name, ?outcome, "CV analysis applied");
        Ok(outcome)
    }
}

fn cv_record(file_name: &str, status: CvAnalysisStatus) -> CvData {
    CvData {
        file_name: file_name.to_string(),
        uploaded_at: Some(Utc::now()),
        analysis_status: status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkillCategory;
    use crate::insights::{ConfiguredModel, GenerationRequest, InsightError};
    use std::time::Duration;

    struct Canned(&'static str);

    impl GenerativeModel for Canned {
        async fn generate(&self, _request: GenerationRequest) -> Result<String, InsightError> {
            Ok(self.0.to_string())
        }
    }

    fn service() -> (ProfileService, Arc<StudentStore>) {
        let store = Arc::new(StudentStore::new(seed::student()));
        (ProfileService::new(Arc::clone(&store)), store)
    }

    fn pdf(name: &str) -> CvUpload {
        CvUpload {
            file_name: name.to_string(),
            content_type: Some("application/pdf".to_string()),
        }
    }

    fn insights<M: GenerativeModel>(model: M) -> InsightService<M> {
        InsightService::new(model, Duration::from_secs(5))
    }

    #[test]
    fn blank_label_defaults_to_platform_name() {
        let (service, _) = service();
        let link = service
            .add_link(LinkDraft {
                platform: LinkPlatform::LeetCode,
                label: "  ".to_string(),
                url: " https://leetcode.com/aysel ".to_string(),
            })
            .expect("valid link");

        assert_eq!(link.label.as_deref(), Some("LeetCode"));
        assert_eq!(link.url, "https://leetcode.com/aysel");
        assert_eq!(service.links(), vec![link]);
    }

    #[test]
    fn url_is_required_and_removal_checks_ids() {
        let (service, _) = service();
        let missing = LinkDraft {
            platform: LinkPlatform::GitHub,
            label: "Kod".to_string(),
            url: String::new(),
        };
        assert_eq!(service.add_link(missing), Err(ProfileError::MissingUrl));
        assert_eq!(
            service.remove_link("nope"),
            Err(ProfileError::LinkNotFound("nope".to_string()))
        );

        let link = service
            .add_link(LinkDraft {
                platform: LinkPlatform::GitHub,
                label: "Kod".to_string(),
                url: "https://github.com/aysel".to_string(),
            })
            .expect("valid link");
        assert_eq!(service.remove_link(&link.id), Ok(link));
        assert!(service.links().is_empty());
    }

    #[test]
    fn pdf_detection_uses_content_type_then_extension() {
        assert!(pdf("cv.bin").is_pdf());
        assert!(CvUpload {
            file_name: "CV.PDF".to_string(),
            content_type: None,
        }
        .is_pdf());
        assert!(!CvUpload {
            file_name: "cv.pdf".to_string(),
            content_type: Some("image/png".to_string()),
        }
        .is_pdf());
        assert!(!CvUpload {
            file_name: "cv.docx".to_string(),
            content_type: None,
        }
        .is_pdf());
    }

    #[tokio::test]
    async fn non_pdf_uploads_are_rejected() {
        let (service, store) = service();
        let before = store.snapshot();
        let upload = CvUpload {
            file_name: "cv.docx".to_string(),
            content_type: None,
        };
        let result = service
            .analyze_cv(upload, AnalysisMode::Demo, &insights(ConfiguredModel::Disabled))
            .await;
        assert_eq!(result, Err(ProfileError::UnsupportedDocument("cv.docx".to_string())));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[tokio::test]
    async fn demo_mode_installs_sample_profile() {
        let (service, store) = service();
        let outcome = service
            .analyze_cv(pdf("aysel.pdf"), AnalysisMode::Demo, &insights(ConfiguredModel::Disabled))
            .await
            .expect("pdf accepted");

        assert_eq!(outcome, CvOutcome::Demo);
        let student = store.snapshot();
        assert_eq!(student.skills, seed::demo_cv_skills());
        assert_eq!(student.links, seed::demo_cv_links());
        let cv = student.cv.clone().expect("cv recorded");
        assert_eq!(cv.analysis_status, CvAnalysisStatus::Demo);
        assert_eq!(cv.file_name, "aysel.pdf");
    }

    #[tokio::test]
    async fn demo_mode_keeps_existing_links() {
        let (service, store) = service();
        let link = service
            .add_link(LinkDraft {
                platform: LinkPlatform::LinkedIn,
                label: String::new(),
                url: "https://linkedin.com/in/aysel".to_string(),
            })
            .expect("valid link");

        service
            .analyze_cv(pdf("aysel.pdf"), AnalysisMode::Demo, &insights(ConfiguredModel::Disabled))
            .await
            .expect("pdf accepted");
        assert_eq!(store.snapshot().links, vec![link]);
    }

    #[tokio::test]
    async fn ai_mode_replaces_skills_and_appends_links() {
        let (service, store) = service();
        let model = Canned(
            r#"{"skills":[{"name":"SQL","value":64,"category":"Analytical"}],
                "links":[{"platform":"GitHub","url":"https://github.com/aysel"}]}"#,
        );

        let outcome = service
            .analyze_cv(pdf("aysel.pdf"), AnalysisMode::Ai, &insights(model))
            .await
            .expect("pdf accepted");

        assert_eq!(outcome, CvOutcome::Completed { skills: 1, links: 1 });
        let student = store.snapshot();
        assert_eq!(
            student.skills,
            vec![Skill {
                name: "SQL".to_string(),
                value: 64,
                category: SkillCategory::Analytical,
                ai_generated: true,
            }]
        );
        assert_eq!(student.links[0].label.as_deref(), Some("GitHub"));
        assert_eq!(
            student.cv.as_ref().map(|cv| cv.analysis_status),
            Some(CvAnalysisStatus::Completed)
        );
    }

    #[tokio::test]
    async fn ai_mode_without_skills_leaves_profile_unchanged() {
        let (service, store) = service();
        let before = store.snapshot();

        let outcome = service
            .analyze_cv(pdf("aysel.pdf"), AnalysisMode::Ai, &insights(ConfiguredModel::Disabled))
            .await
            .expect("pdf accepted");

        assert_eq!(outcome, CvOutcome::NoInsight);
        let after = store.snapshot();
        assert_eq!(after.skills, before.skills);
        assert_eq!(after.links, before.links);
        assert_eq!(after.cv, before.cv);
    }
}
