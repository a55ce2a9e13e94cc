/// One node on the lesson path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topic {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub level: u8,
}

pub const TOPICS: &[Topic] = &[
    Topic {
        id: "basics1",
        title: "Basics 1",
        icon: "\u{1F95A}",
        level: 1,
    },
    Topic {
        id: "greetings",
        title: "Greetings",
        icon: "\u{1F44B}",
        level: 1,
    },
    Topic {
        id: "travel",
        title: "Travel",
        icon: "\u{2708}\u{FE0F}",
        level: 1,
    },
    Topic {
        id: "food",
        title: "Food",
        icon: "\u{1F34E}",
        level: 1,
    },
    Topic {
        id: "family",
        title: "Family",
        icon: "\u{1F46A}",
        level: 1,
    },
    Topic {
        id: "activities",
        title: "Activities",
        icon: "\u{26BD}",
        level: 2,
    },
    Topic {
        id: "people",
        title: "People",
        icon: "\u{1F464}",
        level: 2,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicStatus {
    Completed,
    Next,
    Locked,
}

impl TopicStatus {
    pub fn is_playable(self) -> bool {
        !matches!(self, TopicStatus::Locked)
    }
}

/// A topic is open once the one before it has been completed at least once.
pub fn topic_status(index: usize, completed: &[String]) -> TopicStatus {
    let done = |i: usize| {
        TOPICS
            .get(i)
            .is_some_and(|t| completed.iter().any(|c| c == t.id))
    };

    if done(index) {
        TopicStatus::Completed
    } else if index == 0 || done(index - 1) {
        TopicStatus::Next
    } else {
        TopicStatus::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_topic_open_on_fresh_profile() {
        let done = completed(&[]);
        assert_eq!(topic_status(0, &done), TopicStatus::Next);
        assert_eq!(topic_status(1, &done), TopicStatus::Locked);
    }

    #[test]
    fn test_completion_unlocks_following_topic() {
        let done = completed(&["basics1", "greetings"]);
        assert_eq!(topic_status(0, &done), TopicStatus::Completed);
        assert_eq!(topic_status(1, &done), TopicStatus::Completed);
        assert_eq!(topic_status(2, &done), TopicStatus::Next);
        assert_eq!(topic_status(3, &done), TopicStatus::Locked);
    }

    #[test]
    fn test_duplicate_entries_do_not_change_status() {
        let done = completed(&["basics1", "basics1"]);
        assert_eq!(topic_status(0, &done), TopicStatus::Completed);
        assert_eq!(topic_status(1, &done), TopicStatus::Next);
    }

    #[test]
    fn test_out_of_order_completion_is_still_reported() {
        let done = completed(&["food"]);
        assert_eq!(topic_status(3, &done), TopicStatus::Completed);
        assert_eq!(topic_status(4, &done), TopicStatus::Next);
        assert!(!topic_status(2, &done).is_playable());
    }
}
