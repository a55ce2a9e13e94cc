use std::collections::HashSet;

use icu_normalizer::ComposingNormalizerBorrowed;
use serde::Deserialize;

use crate::generator::{ContentGenerationError, LessonRequest};
use crate::lesson::{Challenge, ChallengeKind, Lesson};

const MIN_OPTIONS: usize = 3;
const MAX_OPTIONS: usize = 4;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLesson {
    topic: String,
    description: String,
    challenges: Vec<RawChallenge>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChallenge {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    kind: ChallengeKind,
    question: String,
    #[serde(default)]
    image_keyword: Option<String>,
    options: Vec<String>,
    correct_answer: String,
}

fn normalize(text: &str) -> String {
    let nfc = ComposingNormalizerBorrowed::new_nfc();
    nfc.normalize(text.trim()).into_owned()
}

/// Models sometimes wrap JSON in a Markdown fence despite the MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and validate the service's lesson JSON. Everything in `text` is
/// untrusted; any deviation from the schema rejects the whole lesson.
pub fn parse_lesson(text: &str, request: &LessonRequest) -> Result<Lesson, ContentGenerationError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ContentGenerationError::EmptyResponse);
    }

    let raw: RawLesson = serde_json::from_str(body)?;
    if raw.challenges.is_empty() {
        return Err(ContentGenerationError::Invalid(
            "lesson has no challenges".to_string(),
        ));
    }

    let challenges = raw
        .challenges
        .into_iter()
        .enumerate()
        .map(|(i, c)| validate_challenge(i, c))
        .collect::<Result<Vec<_>, _>>()?;

    let heading = normalize(&raw.topic);
    Ok(Lesson {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        topic: request.topic_id.clone(),
        heading: if heading.is_empty() {
            request.topic_title.clone()
        } else {
            heading
        },
        description: normalize(&raw.description),
        challenges,
    })
}

fn validate_challenge(
    index: usize,
    raw: RawChallenge,
) -> Result<Challenge, ContentGenerationError> {
    let number = index + 1;
    let invalid =
        |reason: String| ContentGenerationError::Invalid(format!("challenge {number}: {reason}"));

    let question = normalize(&raw.question);
    if question.is_empty() {
        return Err(invalid("empty question".to_string()));
    }

    let options: Vec<String> = raw.options.iter().map(|o| normalize(o)).collect();
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
        return Err(invalid(format!(
            "expected {MIN_OPTIONS}-{MAX_OPTIONS} options, got {}",
            options.len()
        )));
    }
    if options.iter().any(|o| o.is_empty()) {
        return Err(invalid("empty option".to_string()));
    }
    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != options.len() {
        return Err(invalid("duplicate options".to_string()));
    }

    let correct_answer = normalize(&raw.correct_answer);
    if !options.contains(&correct_answer) {
        return Err(invalid(format!(
            "correct answer {correct_answer:?} is not one of the options"
        )));
    }

    let id = raw
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("c{number}"));
    let image_keyword = raw
        .image_keyword
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    Ok(Challenge {
        id,
        kind: raw.kind,
        question,
        image_keyword,
        options,
        correct_answer,
    })
}
