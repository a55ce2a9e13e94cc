use serde_json::{Value, json};

use crate::generator::LessonRequest;

pub const CHALLENGES_PER_LESSON: usize = 5;

pub const SYSTEM_INSTRUCTION: &str = "You are an expert language tutor app similar to Duolingo. \
You generate structured lesson content.";

pub fn lesson_prompt(request: &LessonRequest) -> String {
    format!(
        "Create a language learning lesson for: {language}.\n\
         Topic: {topic}.\n\
         Difficulty Level: {level} (1=Beginner, 5=Advanced).\n\
         \n\
         Generate {count} distinct challenges.\n\
         - Mix of \"SELECT\" (multiple choice vocabulary), \"TRANSLATE\" (sentence translation), and \"FILL_BLANK\".\n\
         - Each challenge has 3 or 4 options and \"correctAnswer\" is copied exactly from the options.\n\
         - Ensure \"imageKeyword\" is a concrete visual noun related to the question.\n\
         - Keep it simple and fun.\n",
        language = request.language_code,
        topic = request.topic_title,
        level = request.level,
        count = CHALLENGES_PER_LESSON,
    )
}

/// Response schema in the service's OpenAPI subset.
pub fn lesson_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING", "description": "The specific topic of the lesson" },
            "description": { "type": "STRING", "description": "Short description of what user will learn" },
            "challenges": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": ["SELECT", "TRANSLATE", "FILL_BLANK"],
                            "description": "The type of challenge."
                        },
                        "question": {
                            "type": "STRING",
                            "description": "The question or phrase to translate/identify."
                        },
                        "imageKeyword": {
                            "type": "STRING",
                            "description": "A simple, single English keyword (noun) to find a relevant image for this question (e.g. 'cat', 'apple', 'bus')."
                        },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "3 or 4 possible answers. For translation, these are the choices. For selection, these are labels."
                        },
                        "correctAnswer": {
                            "type": "STRING",
                            "description": "The exact string match from options."
                        }
                    },
                    "required": ["id", "type", "question", "options", "correctAnswer", "imageKeyword"]
                }
            }
        },
        "required": ["topic", "description", "challenges"]
    })
}

/// Full `generateContent` request body.
pub fn request_body(request: &LessonRequest) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": lesson_prompt(request) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": lesson_schema(),
        }
    })
}
