use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use lingo::app::{App, AppScreen};
use lingo::config::Config;
use lingo::course::topic::TopicStatus;
use lingo::event::{AppEvent, spawn_lesson_request};
use lingo::generator::{ContentGenerationError, LessonGenerator, LessonRequest};
use lingo::lesson::{Challenge, ChallengeKind, Lesson};
use lingo::session::quiz::SessionPhase;
use lingo::store::json_store::JsonStore;
use lingo::store::progress::ProgressStore;
use tempfile::TempDir;

fn lesson_for(topic: &str, len: usize) -> Lesson {
    Lesson {
        id: format!("{topic}-lesson"),
        topic: topic.to_string(),
        heading: "Generated".to_string(),
        description: String::new(),
        challenges: (1..=len)
            .map(|n| Challenge {
                id: format!("c{n}"),
                kind: ChallengeKind::Select,
                question: format!("Which one is number {n}?"),
                image_keyword: None,
                options: vec![
                    format!("right-{n}"),
                    "nope".to_string(),
                    "never".to_string(),
                ],
                correct_answer: format!("right-{n}"),
            })
            .collect(),
    }
}

/// Answers with the lesson topic the request asked for.
struct Canned;

impl LessonGenerator for Canned {
    fn generate(&self, request: &LessonRequest) -> Result<Lesson, ContentGenerationError> {
        Ok(lesson_for(&request.topic_id, 5))
    }
}

struct Broken;

impl LessonGenerator for Broken {
    fn generate(&self, _request: &LessonRequest) -> Result<Lesson, ContentGenerationError> {
        Err(ContentGenerationError::Http {
            status: 503,
            message: "overloaded".to_string(),
        })
    }
}

fn config() -> Config {
    Config {
        shuffle_options: false,
        ..Config::default()
    }
}

fn open_app(dir: &TempDir) -> App {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    App::new(config(), ProgressStore::load(Some(store)))
}

/// Run a request through the worker thread and apply the response.
fn load_lesson(app: &mut App, generator: Arc<dyn LessonGenerator>, topic_idx: usize) {
    let ticket = app.start_lesson(topic_idx).expect("topic is playable");
    let (tx, rx) = mpsc::channel();
    spawn_lesson_request(generator, ticket, tx);
    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        AppEvent::Lesson { generation, result } => {
            assert!(app.receive_lesson(generation, result, Instant::now()));
        }
        _ => panic!("expected a lesson event"),
    }
}

/// Answer the current challenge, right or wrong, then continue.
fn answer(app: &mut App, right: bool) {
    app.pick_option(if right { 0 } else { 1 });
    app.confirm();
    app.confirm();
}

#[test]
fn perfect_lesson_awards_thirty_xp_and_persists() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    assert_eq!(app.screen, AppScreen::Welcome);

    assert!(app.select_language_by_id("Spanish"));
    load_lesson(&mut app, Arc::new(Canned), 0);
    assert_eq!(app.screen, AppScreen::LessonActive);

    for _ in 0..5 {
        answer(&mut app, true);
    }
    assert_eq!(app.screen, AppScreen::LessonComplete);
    assert_eq!(app.last_result.as_ref().unwrap().score, 30);
    app.finish_complete();
    assert_eq!(app.topic_status(1), TopicStatus::Next);

    let reopened = open_app(&dir);
    assert_eq!(reopened.screen, AppScreen::Map);
    let progress = reopened.progress.progress();
    assert_eq!(progress.xp, 30);
    assert_eq!(progress.completed_lessons, vec!["basics1".to_string()]);
    assert_eq!(progress.current_language.as_ref().unwrap().id, "es");
    assert_eq!(reopened.topic_selected, 1);
}

#[test]
fn two_mistakes_leave_one_life_worth_ten() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    app.select_language(1);
    load_lesson(&mut app, Arc::new(Canned), 0);

    answer(&mut app, false);
    answer(&mut app, true);
    answer(&mut app, false);
    answer(&mut app, true);
    answer(&mut app, true);

    let result = app.last_result.as_ref().unwrap();
    assert_eq!(result.score, 10);
    assert_eq!(result.lives_remaining, 1);
    assert_eq!(result.correct, 3);
    assert_eq!(app.progress.progress().xp, 10);
}

#[test]
fn running_out_of_hearts_awards_nothing() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    app.select_language(0);
    load_lesson(&mut app, Arc::new(Canned), 0);

    for _ in 0..3 {
        answer(&mut app, false);
    }
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.phase(), SessionPhase::Failed);
    assert_eq!(app.screen, AppScreen::LessonActive);

    app.confirm();
    assert_eq!(app.screen, AppScreen::Map);
    assert_eq!(app.progress.progress().xp, 0);
    assert!(app.progress.progress().completed_lessons.is_empty());
    assert_eq!(app.topic_status(1), TopicStatus::Locked);
}

#[test]
fn generator_failure_returns_to_map_after_delay() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    app.select_language(0);

    let ticket = app.start_lesson(0).unwrap();
    let (tx, rx) = mpsc::channel();
    spawn_lesson_request(Arc::new(Broken), ticket, tx);
    let start = Instant::now();
    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        AppEvent::Lesson { generation, result } => {
            app.receive_lesson(generation, result, start);
        }
        _ => panic!("expected a lesson event"),
    }
    assert_eq!(app.screen, AppScreen::Error);
    assert!(app.error_message.as_deref().unwrap().contains("overloaded"));

    app.tick(start + app.config.error_return_delay());
    assert_eq!(app.screen, AppScreen::Map);
}

#[test]
fn changing_language_keeps_xp_across_restart() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    app.select_language(0);
    load_lesson(&mut app, Arc::new(Canned), 0);
    for _ in 0..5 {
        answer(&mut app, true);
    }
    app.finish_complete();
    app.change_language();
    assert_eq!(app.screen, AppScreen::Welcome);

    let mut reopened = open_app(&dir);
    assert_eq!(reopened.screen, AppScreen::Welcome);
    assert_eq!(reopened.progress.progress().xp, 30);

    assert!(reopened.select_language_by_id("fr"));
    assert_eq!(reopened.screen, AppScreen::Map);
    assert_eq!(reopened.topic_status(0), TopicStatus::Completed);
}

#[test]
fn corrupt_snapshot_starts_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("lingo_progress.json"), "{ not json").unwrap();

    let app = open_app(&dir);
    assert_eq!(app.screen, AppScreen::Welcome);
    assert_eq!(app.progress.progress().hearts, 5);
    assert!(dir.path().join("lingo_progress.json.corrupt").exists());
}
