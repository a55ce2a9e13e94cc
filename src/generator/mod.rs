pub mod gemini;
pub mod parse;
pub mod prompt;

use thiserror::Error;

use crate::course::language::Language;
use crate::course::topic::Topic;
use crate::lesson::Lesson;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Everything the generator needs to produce one lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRequest {
    /// Language name as the model should read it ("Mandarin Chinese").
    pub language_code: String,
    pub topic_id: String,
    pub topic_title: String,
    pub level: u8,
}

impl LessonRequest {
    pub fn new(language: &Language, topic: &Topic) -> Self {
        Self {
            language_code: language.code.clone(),
            topic_id: topic.id.to_string(),
            topic_title: topic.title.to_string(),
            level: topic.level.clamp(MIN_LEVEL, MAX_LEVEL),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContentGenerationError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("lesson downloads are disabled in this build")]
    NetworkDisabled,
    #[error("could not reach the lesson service: {0}")]
    Transport(String),
    #[error("lesson service returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("lesson service returned no content")]
    EmptyResponse,
    #[error("lesson content was not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("lesson content was rejected: {0}")]
    Invalid(String),
}

/// Source of lesson content. One attempt per call; callers decide whether
/// to try again.
pub trait LessonGenerator: Send + Sync {
    fn generate(&self, request: &LessonRequest) -> Result<Lesson, ContentGenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::topic::TOPICS;

    #[test]
    fn test_request_uses_api_code_and_topic() {
        let lang = Language::find("cn").unwrap();
        let req = LessonRequest::new(&lang, &TOPICS[5]);
        assert_eq!(req.language_code, "Mandarin Chinese");
        assert_eq!(req.topic_id, "activities");
        assert_eq!(req.topic_title, "Activities");
        assert_eq!(req.level, 2);
    }

    #[test]
    fn test_request_level_is_clamped() {
        let lang = Language::find("es").unwrap();
        let topic = Topic {
            id: "x",
            title: "X",
            icon: "",
            level: 9,
        };
        assert_eq!(LessonRequest::new(&lang, &topic).level, MAX_LEVEL);
    }
}
