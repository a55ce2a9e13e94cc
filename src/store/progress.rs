use tracing::{debug, info, warn};

use crate::course::language::Language;
use crate::store::json_store::{JsonStore, StoreError};
use crate::store::schema::UserProgress;

/// Single owner of [`UserProgress`]. Every mutation is written through to the
/// backing store; without one (no writable data dir) progress lives in memory
/// for the run.
pub struct ProgressStore {
    progress: UserProgress,
    backend: Option<JsonStore>,
}

impl ProgressStore {
    pub fn load(backend: Option<JsonStore>) -> Self {
        let progress = match backend.as_ref() {
            Some(store) => Self::read(store),
            None => UserProgress::default(),
        };
        Self { progress, backend }
    }

    pub fn in_memory() -> Self {
        Self {
            progress: UserProgress::default(),
            backend: None,
        }
    }

    fn read(store: &JsonStore) -> UserProgress {
        match store.load_progress() {
            Ok(Some(mut progress)) => {
                if progress.needs_reset() {
                    warn!(
                        version = progress.schema_version,
                        "progress written by a newer version, starting fresh"
                    );
                    return UserProgress::default();
                }
                if progress.migrate() {
                    info!(version = progress.schema_version, "migrated progress snapshot");
                }
                progress
            }
            Ok(None) => UserProgress::default(),
            Err(StoreError::Parse(err)) => {
                warn!(error = %err, "progress snapshot unreadable, using defaults");
                match store.quarantine_progress() {
                    Ok(path) => info!(path = %path.display(), "kept corrupted snapshot"),
                    Err(err) => warn!(error = %err, "could not move corrupted snapshot"),
                }
                UserProgress::default()
            }
            Err(err) => {
                warn!(error = %err, "failed to read progress, using defaults");
                UserProgress::default()
            }
        }
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn current_language(&self) -> Option<&Language> {
        self.progress.current_language.as_ref()
    }

    /// Write the full snapshot. Failures are logged; progress stays in memory.
    pub fn save(&self) {
        if let Some(ref store) = self.backend {
            match store.save_progress(&self.progress) {
                Ok(()) => debug!("progress saved"),
                Err(err) => warn!(error = %err, "failed to save progress"),
            }
        }
    }

    pub fn select_language(&mut self, language: Language) {
        info!(language = %language.id, "language selected");
        self.progress.current_language = Some(language);
        self.save();
    }

    /// Forget the language only; hearts, xp and completions carry over.
    pub fn change_language(&mut self) {
        self.progress.current_language = None;
        self.save();
    }

    pub fn record_completion(&mut self, topic: &str, xp_earned: u32) {
        self.progress.completed_lessons.push(topic.to_string());
        self.progress.xp = self.progress.xp.saturating_add(xp_earned);
        info!(topic, xp_earned, total_xp = self.progress.xp, "lesson completed");
        self.save();
    }
}
