use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::course::language::Language;
use crate::course::topic::{self, TOPICS, Topic, TopicStatus};
use crate::generator::{ContentGenerationError, LessonRequest};
use crate::lesson::Lesson;
use crate::session::quiz::{AnswerStatus, LessonSession, SessionPhase, Step};
use crate::session::result::LessonResult;
use crate::store::progress::ProgressStore;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Welcome,
    Map,
    LessonLoading,
    LessonActive,
    LessonComplete,
    Error,
}

/// A lesson request handed out by [`App::start_lesson`]. The response must
/// come back with the same generation or it is dropped.
#[derive(Clone, Debug)]
pub struct LessonTicket {
    pub generation: u64,
    pub request: LessonRequest,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub progress: ProgressStore,
    pub languages: Vec<Language>,
    pub language_selected: usize,
    pub topic_selected: usize,
    pub option_cursor: usize,
    pub session: Option<LessonSession>,
    pub loading_topic: Option<&'static Topic>,
    pub last_result: Option<LessonResult>,
    pub error_message: Option<String>,
    pub should_quit: bool,
    generation: u64,
    error_return_at: Option<Instant>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, progress: ProgressStore) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let screen = if progress.current_language().is_some() {
            AppScreen::Map
        } else {
            AppScreen::Welcome
        };
        let languages = Language::catalog();
        let language_selected = progress
            .current_language()
            .and_then(|cur| languages.iter().position(|l| l.id == cur.id))
            .unwrap_or(0);

        let mut app = Self {
            screen,
            config,
            theme,
            progress,
            languages,
            language_selected,
            topic_selected: 0,
            option_cursor: 0,
            session: None,
            loading_topic: None,
            last_result: None,
            error_message: None,
            should_quit: false,
            generation: 0,
            error_return_at: None,
            rng: SmallRng::from_entropy(),
        };
        app.focus_next_topic();
        app
    }

    /// All screen changes go through here so the error timer can't outlive
    /// the error screen.
    fn set_screen(&mut self, screen: AppScreen) {
        if self.screen == AppScreen::Error && screen != AppScreen::Error {
            self.error_return_at = None;
            self.error_message = None;
        }
        debug!(from = ?self.screen, to = ?screen, "screen change");
        self.screen = screen;
    }

    pub fn go_to_map(&mut self) {
        self.session = None;
        self.loading_topic = None;
        self.focus_next_topic();
        self.set_screen(AppScreen::Map);
    }

    fn focus_next_topic(&mut self) {
        let completed = &self.progress.progress().completed_lessons;
        self.topic_selected = (0..TOPICS.len())
            .find(|&i| topic::topic_status(i, completed) == TopicStatus::Next)
            .unwrap_or(0);
    }

    // --- language picker ---

    pub fn language_next(&mut self) {
        self.language_selected = (self.language_selected + 1) % self.languages.len();
    }

    pub fn language_prev(&mut self) {
        self.language_selected = if self.language_selected == 0 {
            self.languages.len() - 1
        } else {
            self.language_selected - 1
        };
    }

    pub fn select_language(&mut self, idx: usize) {
        let Some(language) = self.languages.get(idx).cloned() else {
            return;
        };
        self.language_selected = idx;
        self.progress.select_language(language);
        self.go_to_map();
    }

    pub fn select_language_by_id(&mut self, key: &str) -> bool {
        let Some(language) = Language::find(key) else {
            return false;
        };
        match self.languages.iter().position(|l| l.id == language.id) {
            Some(idx) => {
                self.select_language(idx);
                true
            }
            None => false,
        }
    }

    pub fn change_language(&mut self) {
        self.progress.change_language();
        self.set_screen(AppScreen::Welcome);
    }

    // --- lesson map ---

    pub fn topic_status(&self, idx: usize) -> TopicStatus {
        topic::topic_status(idx, &self.progress.progress().completed_lessons)
    }

    pub fn topic_next(&mut self) {
        if self.topic_selected + 1 < TOPICS.len() {
            self.topic_selected += 1;
        }
    }

    pub fn topic_prev(&mut self) {
        self.topic_selected = self.topic_selected.saturating_sub(1);
    }

    /// Move to LESSON_LOADING and hand back the request to run. `None` when
    /// the topic is locked, no language is chosen, or we're not on the map.
    pub fn start_lesson(&mut self, topic_idx: usize) -> Option<LessonTicket> {
        if self.screen != AppScreen::Map {
            return None;
        }
        let topic = TOPICS.get(topic_idx)?;
        if !self.topic_status(topic_idx).is_playable() {
            debug!(topic = topic.id, "topic is locked");
            return None;
        }
        let language = self.progress.current_language()?;
        let request = LessonRequest::new(language, topic);

        self.generation += 1;
        self.topic_selected = topic_idx;
        self.loading_topic = Some(topic);
        self.set_screen(AppScreen::LessonLoading);
        info!(generation = self.generation, topic = topic.id, "lesson requested");

        Some(LessonTicket {
            generation: self.generation,
            request,
        })
    }

    pub fn cancel_loading(&mut self) {
        if self.screen == AppScreen::LessonLoading {
            info!(generation = self.generation, "lesson request abandoned");
            self.go_to_map();
        }
    }

    /// Apply a finished request. Returns false if the response was stale:
    /// the user has left the loading screen or a newer request is pending.
    pub fn receive_lesson(
        &mut self,
        generation: u64,
        result: Result<Lesson, ContentGenerationError>,
        now: Instant,
    ) -> bool {
        if self.screen != AppScreen::LessonLoading || generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale lesson response");
            return false;
        }
        self.loading_topic = None;

        let result = result.and_then(|lesson| {
            if lesson.is_empty() {
                Err(ContentGenerationError::Invalid(
                    "lesson has no challenges".to_string(),
                ))
            } else {
                Ok(lesson)
            }
        });
        match result {
            Ok(mut lesson) => {
                if self.config.shuffle_options {
                    lesson.shuffle_options(&mut self.rng);
                }
                self.session = Some(LessonSession::new(lesson));
                self.option_cursor = 0;
                self.set_screen(AppScreen::LessonActive);
            }
            Err(err) => {
                warn!(error = %err, "lesson generation failed");
                self.set_screen(AppScreen::Error);
                self.error_message = Some(err.to_string());
                self.error_return_at = Some(now + self.config.error_return_delay());
            }
        }
        true
    }

    /// Time-driven transitions. Called on every tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.error_return_at {
            if self.screen == AppScreen::Error && now >= deadline {
                self.go_to_map();
            }
        }
    }

    pub fn error_return_remaining(&self, now: Instant) -> Option<Duration> {
        self.error_return_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    // --- quiz ---

    fn option_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.current())
            .map_or(0, |c| c.options.len())
    }

    pub fn pick_option(&mut self, idx: usize) {
        if let Some(ref mut session) = self.session {
            if session.select_index(idx) {
                self.option_cursor = idx;
            }
        }
    }

    pub fn option_next(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        let next = match self.session.as_ref().and_then(|s| s.selected()) {
            Some(_) => (self.option_cursor + 1) % count,
            None => self.option_cursor,
        };
        self.pick_option(next);
    }

    pub fn option_prev(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        let prev = match self.session.as_ref().and_then(|s| s.selected()) {
            Some(_) if self.option_cursor == 0 => count - 1,
            Some(_) => self.option_cursor - 1,
            None => self.option_cursor,
        };
        self.pick_option(prev);
    }

    /// The single "CHECK / CONTINUE" action of the quiz screen.
    pub fn confirm(&mut self) {
        let Some(ref mut session) = self.session else {
            return;
        };
        match session.phase() {
            SessionPhase::Presenting(_) => {
                if let Some(verdict) = session.check() {
                    debug!(
                        index = session.index(),
                        ?verdict,
                        lives = session.lives(),
                        "answer checked"
                    );
                }
            }
            SessionPhase::Checked(..) => self.continue_lesson(),
            SessionPhase::Failed => self.exit_lesson(),
            SessionPhase::Exhausted { .. } => {}
        }
    }

    pub fn continue_lesson(&mut self) {
        let Some(ref mut session) = self.session else {
            return;
        };
        match session.acknowledge() {
            Step::Advanced(_) => self.option_cursor = 0,
            Step::Completed { score } => {
                if let Some(result) = LessonResult::from_session(session) {
                    self.progress.record_completion(&result.topic, score);
                    self.last_result = Some(result);
                }
                self.session = None;
                self.set_screen(AppScreen::LessonComplete);
            }
            Step::Failed => info!("out of hearts"),
            Step::Ignored => {}
        }
    }

    /// Leave the quiz without reward.
    pub fn exit_lesson(&mut self) {
        if self.screen == AppScreen::LessonActive {
            self.go_to_map();
        }
    }

    pub fn answer_status(&self) -> Option<AnswerStatus> {
        self.session.as_ref().map(|s| s.status())
    }

    pub fn finish_complete(&mut self) {
        if self.screen == AppScreen::LessonComplete {
            self.go_to_map();
        }
    }

    // --- settings ---

    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let next = match themes.iter().position(|t| *t == self.config.theme) {
            Some(idx) => (idx + 1) % themes.len(),
            None => 0,
        };
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            self.theme = Box::leak(Box::new(new_theme));
        }
        if let Err(err) = self.config.save() {
            warn!(error = %err, "failed to save config");
        }
    }
}
