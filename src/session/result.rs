use chrono::{DateTime, Utc};

use crate::session::quiz::{LessonSession, SessionPhase};

#[derive(Clone, Debug)]
pub struct LessonResult {
    pub lesson_id: String,
    pub topic: String,
    pub heading: String,
    pub score: u32,
    pub lives_remaining: u32,
    pub correct: usize,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

impl LessonResult {
    /// Summary of a session that ran out of challenges. `None` while the
    /// session is still running or after it failed.
    pub fn from_session(session: &LessonSession) -> Option<Self> {
        let SessionPhase::Exhausted { score } = session.phase() else {
            return None;
        };
        let lesson = session.lesson();
        Some(Self {
            lesson_id: lesson.id.clone(),
            topic: lesson.topic.clone(),
            heading: lesson.heading.clone(),
            score,
            lives_remaining: session.lives(),
            correct: session.correct_count(),
            total: lesson.len(),
            timestamp: Utc::now(),
        })
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }
}
