use serde::{Deserialize, Serialize};

use crate::course::language::Language;

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_HEARTS: u32 = 5;

fn legacy_schema_version() -> u32 {
    0
}

fn default_hearts() -> u32 {
    DEFAULT_HEARTS
}

/// Everything the learner keeps between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Snapshots written before versioning existed load as version 0.
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_hearts")]
    pub hearts: u32,
    #[serde(default)]
    pub xp: u32,
    /// Topic ids in completion order. Repeats are kept.
    #[serde(default, alias = "completedLessons")]
    pub completed_lessons: Vec<String>,
    #[serde(default, alias = "currentLanguage")]
    pub current_language: Option<Language>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            hearts: DEFAULT_HEARTS,
            xp: 0,
            completed_lessons: Vec::new(),
            current_language: None,
        }
    }
}

impl UserProgress {
    /// Snapshot from a newer build we can't interpret.
    pub fn needs_reset(&self) -> bool {
        self.schema_version > SCHEMA_VERSION
    }

    /// Bring an older snapshot up to the current layout. Returns true if
    /// anything changed.
    pub fn migrate(&mut self) -> bool {
        if self.schema_version >= SCHEMA_VERSION {
            return false;
        }
        // v0 -> v1: only the version field was added.
        self.schema_version = SCHEMA_VERSION;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = UserProgress::default();
        assert_eq!(p.hearts, 5);
        assert_eq!(p.xp, 0);
        assert!(p.completed_lessons.is_empty());
        assert!(p.current_language.is_none());
        assert!(!p.needs_reset());
    }

    #[test]
    fn test_legacy_camel_case_snapshot_migrates() {
        let json = r#"{
            "hearts": 4,
            "xp": 30,
            "completedLessons": ["basics1"],
            "currentLanguage": {"id": "es", "name": "Spanish", "flag": "x", "code": "Spanish"}
        }"#;
        let mut p: UserProgress = serde_json::from_str(json).unwrap();
        assert_eq!(p.schema_version, 0);
        assert!(p.migrate());
        assert_eq!(p.schema_version, SCHEMA_VERSION);
        assert_eq!(p.hearts, 4);
        assert_eq!(p.xp, 30);
        assert_eq!(p.completed_lessons, vec!["basics1".to_string()]);
        assert_eq!(p.current_language.unwrap().id, "es");
    }

    #[test]
    fn test_current_snapshot_needs_no_migration() {
        let mut p = UserProgress::default();
        assert!(!p.migrate());
    }

    #[test]
    fn test_future_version_needs_reset() {
        let p = UserProgress {
            schema_version: SCHEMA_VERSION + 1,
            ..UserProgress::default()
        };
        assert!(p.needs_reset());
    }
}
