//! Best-effort AI insights over a generative-language model.
//!
//! Every call is bounded by a timeout and degrades to a fixed fallback, so
//! callers never see an error: an empty result means "no insight available".

mod gemini;

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::InsightConfig;
use crate::domain::{LinkPlatform, SkillCategory, Student};

pub use gemini::GeminiClient;

/// Shown when no student summary could be produced.
pub const SUMMARY_FALLBACK: &str =
    "Xülasə hazırlana bilmədi. Zəhmət olmasa internet bağlantınızı yoxlayın.";

/// One prompt, optionally constrained to JSON matching `response_schema`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("no generative model is configured")]
    Disabled,
    #[error("model did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("model returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A text generator. Implementations own their transport and credentials.
pub trait GenerativeModel: Send + Sync {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// Model selected from configuration; without an API key every call fails
/// with [`InsightError::Disabled`] and the service serves fallbacks.
#[derive(Debug, Clone)]
pub enum ConfiguredModel {
    Gemini(GeminiClient),
    Disabled,
}

impl ConfiguredModel {
    pub fn from_config(config: &InsightConfig) -> Self {
        match &config.api_key {
            Some(key) => ConfiguredModel::Gemini(GeminiClient::new(
                key.clone(),
                config.model.clone(),
                config.base_url.clone(),
            )),
            None => ConfiguredModel::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ConfiguredModel::Gemini(_))
    }
}

impl GenerativeModel for ConfiguredModel {
    async fn generate(&self, request: GenerationRequest) -> Result<String, InsightError> {
        match self {
            ConfiguredModel::Gemini(client) => client.generate(request).await,
            ConfiguredModel::Disabled => Err(InsightError::Disabled),
        }
    }
}

/// Teacher note restructured into a reference outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredReference {
    pub summary: String,
    pub detected_skills: Vec<String>,
    /// 1..=5
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedSkill {
    pub name: String,
    /// 0..=100
    pub value: u8,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLink {
    pub platform: LinkPlatform,
    pub url: String,
}

/// Skills and links read out of an uploaded CV. Empty when unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentAnalysis {
    pub skills: Vec<ExtractedSkill>,
    pub links: Vec<ExtractedLink>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReference {
    summary: String,
    #[serde(default)]
    detected_skills: Vec<String>,
    rating: f64,
}

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    skills: Vec<RawSkill>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Deserialize)]
struct RawSkill {
    name: String,
    value: f64,
    category: String,
}

#[derive(Deserialize)]
struct RawLink {
    platform: String,
    url: String,
}

/// Front door for the three insight calls.
#[derive(Debug, Clone)]
pub struct InsightService<M> {
    model: M,
    timeout: Duration,
}

impl InsightService<ConfiguredModel> {
    pub fn from_config(config: &InsightConfig) -> Self {
        Self::new(ConfiguredModel::from_config(config), config.timeout)
    }
}

impl<M: GenerativeModel> InsightService<M> {
    pub fn new(model: M, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Two or three sentences on the student's strengths and gaps.
    pub async fn summarize_student(&self, student: &Student) -> String {
        let skills = student
            .skills
            .iter()
            .map(|skill| format!("{}: {}%", skill.name, skill.value))
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = format!(
            "Tələbənin akademik göstəriciləri:\n\
             Ad: {}\nGPA: {:.2}\nBacarıqlar: {skills}\n\n\
             Güclü tərəflərini və inkişaf etdirməli olduğu sahələri Azərbaycan dilində \
             2-3 cümlə ilə realist şəkildə xülasə et.",
            student.full_name(),
            student.gpa,
        );

        match self.ask("summarize_student", GenerationRequest::text(prompt)).await {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => SUMMARY_FALLBACK.to_string(),
        }
    }

    /// Turn a free-form teacher note into summary, skills, and rating.
    pub async fn structure_reference(&self, raw: &str) -> Option<StructuredReference> {
        let prompt = format!(
            "Müəllimin aşağıdakı qeydini strukturlaşdırılmış referansa çevir və JSON qaytar: \"{raw}\""
        );
        let text = self
            .ask("structure_reference", GenerationRequest::json(prompt, reference_schema()))
            .await?;

        match serde_json::from_str::<RawReference>(&text) {
            Ok(parsed) => Some(StructuredReference {
                summary: parsed.summary,
                detected_skills: parsed.detected_skills,
                rating: clamp_round(parsed.rating, 1.0, 5.0),
            }),
            Err(err) => {
                warn!(operation = "structure_reference", error = %err, "insight response discarded");
                None
            }
        }
    }

    /// Extract skills and profile links from a CV known only by its file name.
    pub async fn analyze_document(&self, file_name: &str) -> DocumentAnalysis {
        let prompt = format!(
            "Peşəkar CV analitiki kimi \"{file_name}\" adlı sənədi analiz et. Texniki, soft və \
             analitik kateqoriyalar üzrə 5 bacarıq qaytar (dəyərlər realist, təxminən 40-85 arası) \
             və sənəddə ola biləcək GitHub və LinkedIn linklərini çıxar."
        );
        let Some(text) = self
            .ask("analyze_document", GenerationRequest::json(prompt, analysis_schema()))
            .await
        else {
            return DocumentAnalysis::default();
        };

        let parsed = match serde_json::from_str::<RawAnalysis>(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(operation = "analyze_document", error = %err, "insight response discarded");
                return DocumentAnalysis::default();
            }
        };

        DocumentAnalysis {
            skills: parsed
                .skills
                .into_iter()
                .filter(|skill| !skill.name.trim().is_empty())
                .map(|skill| ExtractedSkill {
                    name: skill.name,
                    value: clamp_round(skill.value, 0.0, 100.0),
                    category: parse_category(&skill.category),
                })
                .collect(),
            links: parsed
                .links
                .into_iter()
                .filter(|link| !link.url.trim().is_empty())
                .map(|link| ExtractedLink {
                    platform: parse_platform(&link.platform),
                    url: link.url,
                })
                .collect(),
        }
    }

    async fn ask(&self, operation: &'static str, request: GenerationRequest) -> Option<String> {
        let outcome = match tokio::time::timeout(self.timeout, self.model.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(InsightError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(text) => Some(text),
            Err(InsightError::Disabled) => {
                debug!(operation, "insight model disabled; serving fallback");
                None
            }
            Err(err) => {
                warn!(operation, error = %err, "insight request failed; serving fallback");
                None
            }
        }
    }
}

fn clamp_round(value: f64, min: f64, max: f64) -> u8 {
    if value.is_nan() {
        return min as u8;
    }
    value.round().clamp(min, max) as u8
}

fn parse_category(raw: &str) -> SkillCategory {
    match raw.trim().to_ascii_lowercase().as_str() {
        "soft" => SkillCategory::Soft,
        "analytical" => SkillCategory::Analytical,
        "project" => SkillCategory::Project,
        "tools" => SkillCategory::Tools,
        _ => SkillCategory::Technical,
    }
}

fn parse_platform(raw: &str) -> LinkPlatform {
    match raw.trim().to_ascii_lowercase().as_str() {
        "linkedin" => LinkPlatform::LinkedIn,
        "github" => LinkPlatform::GitHub,
        "leetcode" => LinkPlatform::LeetCode,
        _ => LinkPlatform::Other,
    }
}

fn reference_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "Qısa xülasə" },
            "detectedSkills": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Mətndə aşkar edilən bacarıqlar"
            },
            "rating": { "type": "NUMBER", "description": "1-5 arası təxmini reytinq" }
        },
        "required": ["summary", "detectedSkills", "rating"]
    })
}

fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "skills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "value": { "type": "NUMBER" },
                        "category": {
                            "type": "STRING",
                            "enum": ["Technical", "Soft", "Analytical", "Tools"]
                        }
                    },
                    "required": ["name", "value", "category"]
                }
            },
            "links": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "platform": { "type": "STRING", "enum": ["LinkedIn", "GitHub"] },
                        "url": { "type": "STRING" }
                    },
                    "required": ["platform", "url"]
                }
            }
        },
        "required": ["skills", "links"]
    })
}
