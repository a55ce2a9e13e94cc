use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::app::LessonTicket;
use crate::generator::{ContentGenerationError, LessonGenerator};
use crate::lesson::Lesson;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    Lesson {
        generation: u64,
        result: Result<Lesson, ContentGenerationError>,
    },
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if input_tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if input_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Run one lesson request off the UI thread and post the outcome back,
/// tagged with the ticket's generation.
pub fn spawn_lesson_request(
    generator: Arc<dyn LessonGenerator>,
    ticket: LessonTicket,
    tx: mpsc::Sender<AppEvent>,
) {
    thread::spawn(move || {
        let result = generator.generate(&ticket.request);
        if let Err(ref err) = result {
            tracing::warn!(generation = ticket.generation, error = %err, "lesson request failed");
        }
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(AppEvent::Lesson {
            generation: ticket.generation,
            result,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::LessonRequest;
    use crate::lesson::fixtures;

    struct Canned;

    impl LessonGenerator for Canned {
        fn generate(&self, _request: &LessonRequest) -> Result<Lesson, ContentGenerationError> {
            Ok(fixtures::lesson(2))
        }
    }

    #[test]
    fn test_spawned_request_reports_generation() {
        let (tx, rx) = mpsc::channel();
        let ticket = LessonTicket {
            generation: 7,
            request: LessonRequest {
                language_code: "Spanish".to_string(),
                topic_id: "basics1".to_string(),
                topic_title: "Basics 1".to_string(),
                level: 1,
            },
        };
        spawn_lesson_request(Arc::new(Canned), ticket, tx);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::Lesson { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 2);
            }
            _ => panic!("expected a lesson event"),
        }
    }
}
