use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

const ILLUSTRATION_BASE: &str = "https://picsum.photos";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeKind {
    Select,
    Translate,
    FillBlank,
}

impl ChallengeKind {
    pub fn prompt_title(self) -> &'static str {
        match self {
            ChallengeKind::Select => "Select the correct meaning",
            ChallengeKind::Translate => "Translate this sentence",
            ChallengeKind::FillBlank => "Fill in the blank",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub id: String,
    pub kind: ChallengeKind,
    pub question: String,
    pub image_keyword: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Challenge {
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }

    /// Placeholder illustration, seeded by the keyword so the same word
    /// always maps to the same picture. Not checked against the content.
    pub fn illustration_url(&self) -> String {
        match self.image_keyword.as_deref() {
            Some(keyword) => {
                let keyword = keyword.trim().to_lowercase();
                let seed: String = byte_serialize(keyword.as_bytes()).collect();
                format!("{ILLUSTRATION_BASE}/seed/{seed}/600/400")
            }
            None => format!("{ILLUSTRATION_BASE}/600/400"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub id: String,
    /// Path topic id this lesson was generated for.
    pub topic: String,
    /// The generator's own title for the lesson.
    pub heading: String,
    pub description: String,
    pub challenges: Vec<Challenge>,
}

impl Lesson {
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Generators tend to put the answer first; reorder options per challenge.
    pub fn shuffle_options<R: Rng>(&mut self, rng: &mut R) {
        for challenge in &mut self.challenges {
            challenge.options.shuffle(rng);
        }
    }
}
