use serde::Deserialize;

use crate::config::Config;
use crate::generator::{ContentGenerationError, LessonGenerator, LessonRequest};
use crate::lesson::Lesson;

/// Lesson generator backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GeminiGenerator {
    pub fn from_config(config: &Config) -> Result<Self, ContentGenerationError> {
        Ok(Self {
            #[cfg(feature = "network")]
            client: reqwest::blocking::Client::builder()
                .timeout(config.request_timeout())
                .build()
                .map_err(|e| ContentGenerationError::Transport(e.to_string()))?,
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    #[cfg(feature = "network")]
    fn post(
        &self,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<String, ContentGenerationError> {
        let transport = |e: reqwest::Error| ContentGenerationError::Transport(e.to_string());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .map_err(transport)?;

        let status = response.status();
        let text = response.text().map_err(transport)?;
        if !status.is_success() {
            return Err(ContentGenerationError::Http {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(text)
    }

    #[cfg(not(feature = "network"))]
    fn post(
        &self,
        _api_key: &str,
        _body: &serde_json::Value,
    ) -> Result<String, ContentGenerationError> {
        Err(ContentGenerationError::NetworkDisabled)
    }
}

impl LessonGenerator for GeminiGenerator {
    fn generate(&self, request: &LessonRequest) -> Result<Lesson, ContentGenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ContentGenerationError::MissingApiKey)?;

        tracing::info!(
            model = %self.model,
            language = %request.language_code,
            topic = %request.topic_id,
            level = request.level,
            "requesting lesson"
        );
        let body = super::prompt::request_body(request);
        let raw = self.post(api_key, &body)?;
        let text = response_text(&raw)?;
        let lesson = super::parse::parse_lesson(&text, request)?;
        tracing::info!(challenges = lesson.len(), "lesson received");
        Ok(lesson)
    }
}

/// Concatenated text of the first candidate.
pub fn response_text(raw: &str) -> Result<String, ContentGenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(raw)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ContentGenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.chars().take(200).collect(),
    }
}
