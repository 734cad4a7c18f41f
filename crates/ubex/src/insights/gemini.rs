use std::fmt;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{GenerationRequest, GenerativeModel, InsightError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, InsightError> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }]
        });
        if let Some(schema) = request.response_schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        debug!(model = %self.model, "requesting generation");
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.into_text().ok_or(InsightError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn client(server: &mockito::ServerGuard) -> GeminiClient {
        GeminiClient::new(
            "secret".to_string(),
            "gemini-test".to_string(),
            format!("{}/", server.url()),
        )
    }

    #[tokio::test]
    async fn posts_prompt_and_returns_first_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header(API_KEY_HEADER, "secret")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "salam" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Əla "},{"text":"tələbə"}]}}]}"#,
            )
            .create_async()
            .await;

        let text = client(&server)
            .generate(GenerationRequest::text("salam"))
            .await
            .expect("generation succeeds");

        assert_eq!(text, "Əla tələbə");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn schema_requests_json_output() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#)
            .create_async()
            .await;

        let text = client(&server)
            .generate(GenerationRequest::json("x", json!({ "type": "OBJECT" })))
            .await
            .expect("generation succeeds");

        assert_eq!(text, "{}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(403)
            .with_body("API key not valid")
            .create_async()
            .await;

        let err = client(&server)
            .generate(GenerationRequest::text("x"))
            .await
            .expect_err("forbidden");

        assert!(matches!(
            err,
            InsightError::Status { status: 403, ref body } if body == "API key not valid"
        ));
    }

    #[tokio::test]
    async fn missing_candidates_are_an_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = client(&server)
            .generate(GenerationRequest::text("x"))
            .await
            .expect_err("no candidates");
        assert!(matches!(err, InsightError::EmptyResponse));
    }
}
