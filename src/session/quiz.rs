use crate::lesson::{Challenge, Lesson};

pub const STARTING_LIVES: u32 = 3;
pub const POINTS_PER_LIFE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerStatus {
    Idle,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Presenting(usize),
    Checked(usize, Verdict),
    Exhausted { score: u32 },
    Failed,
}

/// What `acknowledge` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Not in `Checked`; nothing happened.
    Ignored,
    Advanced(usize),
    Completed { score: u32 },
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ending {
    Exhausted { score: u32 },
    Failed,
}

/// Challenge-by-challenge quiz loop over one lesson.
///
/// Lives start at [`STARTING_LIVES`] and drop by one per wrong answer. The
/// final score only looks at the lives left when the last challenge is
/// acknowledged, not at how many answers were right.
pub struct LessonSession {
    lesson: Lesson,
    index: usize,
    selected: Option<String>,
    status: AnswerStatus,
    lives: u32,
    correct_count: usize,
    ending: Option<Ending>,
}

impl LessonSession {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            index: 0,
            selected: None,
            status: AnswerStatus::Idle,
            lives: STARTING_LIVES,
            correct_count: 0,
            ending: None,
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Challenge> {
        self.lesson.challenges.get(self.index)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn status(&self) -> AnswerStatus {
        self.status
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn phase(&self) -> SessionPhase {
        match self.ending {
            Some(Ending::Exhausted { score }) => SessionPhase::Exhausted { score },
            Some(Ending::Failed) => SessionPhase::Failed,
            None => match self.status {
                AnswerStatus::Idle => SessionPhase::Presenting(self.index),
                AnswerStatus::Correct => SessionPhase::Checked(self.index, Verdict::Correct),
                AnswerStatus::Incorrect => SessionPhase::Checked(self.index, Verdict::Incorrect),
            },
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ending.is_some()
    }

    fn is_presenting(&self) -> bool {
        matches!(self.phase(), SessionPhase::Presenting(_))
    }

    /// Fraction of challenges already behind the learner.
    pub fn progress(&self) -> f64 {
        if self.lesson.is_empty() {
            return 0.0;
        }
        if self.is_finished() {
            return 1.0;
        }
        self.index as f64 / self.lesson.len() as f64
    }

    /// Highlight an option without committing to it.
    pub fn select(&mut self, option: &str) -> bool {
        if !self.is_presenting() || option.is_empty() {
            return false;
        }
        let known = self
            .current()
            .is_some_and(|c| c.options.iter().any(|o| o == option));
        if known {
            self.selected = Some(option.to_string());
        }
        known
    }

    pub fn select_index(&mut self, idx: usize) -> bool {
        let option = self.current().and_then(|c| c.options.get(idx)).cloned();
        match option {
            Some(option) => self.select(&option),
            None => false,
        }
    }

    /// Grade `option` against the current challenge. Returns `None` when the
    /// call has no effect: empty option, or an answer is already checked and
    /// waiting for acknowledgement.
    pub fn submit_answer(&mut self, option: &str) -> Option<Verdict> {
        if !self.is_presenting() || option.is_empty() {
            return None;
        }
        let correct = self.current()?.is_correct(option);
        self.selected = Some(option.to_string());

        if correct {
            self.status = AnswerStatus::Correct;
            self.correct_count += 1;
            Some(Verdict::Correct)
        } else {
            self.status = AnswerStatus::Incorrect;
            self.lives = self.lives.saturating_sub(1);
            Some(Verdict::Incorrect)
        }
    }

    /// Submit whatever is currently highlighted.
    pub fn check(&mut self) -> Option<Verdict> {
        let selected = self.selected.clone()?;
        self.submit_answer(&selected)
    }

    pub fn acknowledge(&mut self) -> Step {
        if !matches!(self.phase(), SessionPhase::Checked(..)) {
            return Step::Ignored;
        }

        if self.lives == 0 {
            self.ending = Some(Ending::Failed);
            return Step::Failed;
        }

        if self.index + 1 >= self.lesson.len() {
            let score = self.lives * POINTS_PER_LIFE;
            self.ending = Some(Ending::Exhausted { score });
            return Step::Completed { score };
        }

        self.index += 1;
        self.selected = None;
        self.status = AnswerStatus::Idle;
        Step::Advanced(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::fixtures;

    fn answer(session: &mut LessonSession, right: bool) -> Step {
        let n = session.index() + 1;
        let option = if right {
            format!("answer-{n}")
        } else {
            "wrong-a".to_string()
        };
        session.submit_answer(&option).expect("answer accepted");
        session.acknowledge()
    }

    #[test]
    fn test_new_session() {
        let session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(session.phase(), SessionPhase::Presenting(0));
        assert_eq!(session.lives(), STARTING_LIVES);
        assert_eq!(session.status(), AnswerStatus::Idle);
        assert!(session.selected().is_none());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_correct_answer_checks_correct() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(session.submit_answer("answer-1"), Some(Verdict::Correct));
        assert_eq!(session.phase(), SessionPhase::Checked(0, Verdict::Correct));
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn test_any_other_option_is_incorrect() {
        for option in ["wrong-a", "wrong-b", "ANSWER-1", "answer-2"] {
            let mut session = LessonSession::new(fixtures::lesson(5));
            assert_eq!(session.submit_answer(option), Some(Verdict::Incorrect));
            assert_eq!(session.lives(), 2);
        }
    }

    #[test]
    fn test_empty_option_rejected() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(session.submit_answer(""), None);
        assert_eq!(session.phase(), SessionPhase::Presenting(0));
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(session.submit_answer("wrong-a"), Some(Verdict::Incorrect));
        assert_eq!(session.submit_answer("wrong-b"), None);
        assert_eq!(session.submit_answer("answer-1"), None);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.index(), 0);
        assert_eq!(session.phase(), SessionPhase::Checked(0, Verdict::Incorrect));
    }

    #[test]
    fn test_acknowledge_only_after_check() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(session.acknowledge(), Step::Ignored);
        session.submit_answer("answer-1");
        assert_eq!(session.acknowledge(), Step::Advanced(1));
        assert_eq!(session.acknowledge(), Step::Ignored);
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_advance_resets_selection_and_status() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert!(session.select("wrong-a"));
        session.check();
        session.acknowledge();
        assert_eq!(session.status(), AnswerStatus::Idle);
        assert!(session.selected().is_none());
        assert_eq!(session.progress(), 0.2);
    }

    #[test]
    fn test_select_then_check() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(session.check(), None);
        assert!(session.select_index(1));
        assert_eq!(session.selected(), Some("wrong-a"));
        assert!(session.select("answer-1"));
        assert_eq!(session.check(), Some(Verdict::Correct));
        // Selection is frozen once checked.
        assert!(!session.select("wrong-b"));
        assert_eq!(session.selected(), Some("answer-1"));
    }

    #[test]
    fn test_select_unknown_option_rejected() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert!(!session.select("not an option"));
        assert!(!session.select_index(9));
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_three_wrong_answers_fail_before_end() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(answer(&mut session, false), Step::Advanced(1));
        assert_eq!(answer(&mut session, false), Step::Advanced(2));
        assert_eq!(answer(&mut session, false), Step::Failed);
        assert_eq!(session.phase(), SessionPhase::Failed);
        assert_eq!(session.lives(), 0);
        assert_eq!(session.index(), 2);
        assert_eq!(session.submit_answer("answer-4"), None);
        assert_eq!(session.acknowledge(), Step::Ignored);
    }

    #[test]
    fn test_losing_last_life_on_final_challenge_fails() {
        let mut session = LessonSession::new(fixtures::lesson(3));
        answer(&mut session, false);
        answer(&mut session, false);
        assert_eq!(answer(&mut session, false), Step::Failed);
    }

    #[test]
    fn test_one_mistake_scores_twenty() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        assert_eq!(answer(&mut session, true), Step::Advanced(1));
        assert_eq!(answer(&mut session, true), Step::Advanced(2));
        assert_eq!(answer(&mut session, false), Step::Advanced(3));
        assert_eq!(answer(&mut session, true), Step::Advanced(4));
        assert_eq!(answer(&mut session, true), Step::Completed { score: 20 });
        assert_eq!(session.phase(), SessionPhase::Exhausted { score: 20 });
        assert_eq!(session.correct_count(), 4);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn test_score_depends_on_lives_not_correct_count() {
        let mut session = LessonSession::new(fixtures::lesson(5));
        answer(&mut session, false);
        answer(&mut session, false);
        answer(&mut session, true);
        answer(&mut session, true);
        assert_eq!(answer(&mut session, true), Step::Completed { score: 10 });
        assert_eq!(session.correct_count(), 3);
    }

    #[test]
    fn test_perfect_run_scores_thirty() {
        let mut session = LessonSession::new(fixtures::lesson(1));
        assert_eq!(answer(&mut session, true), Step::Completed { score: 30 });
    }
}
