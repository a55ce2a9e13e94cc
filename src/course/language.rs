use serde::{Deserialize, Serialize};

/// A language the learner can pick. `code` is the name sent to the lesson
/// generator, which is not always the display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub flag: String,
    pub code: String,
}

const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("es", "Spanish", "\u{1F1EA}\u{1F1F8}", "Spanish"),
    ("fr", "French", "\u{1F1EB}\u{1F1F7}", "French"),
    ("de", "German", "\u{1F1E9}\u{1F1EA}", "German"),
    ("it", "Italian", "\u{1F1EE}\u{1F1F9}", "Italian"),
    ("jp", "Japanese", "\u{1F1EF}\u{1F1F5}", "Japanese"),
    ("cn", "Chinese", "\u{1F1E8}\u{1F1F3}", "Mandarin Chinese"),
];

impl Language {
    pub fn catalog() -> Vec<Language> {
        CATALOG
            .iter()
            .map(|&(id, name, flag, code)| Language {
                id: id.to_string(),
                name: name.to_string(),
                flag: flag.to_string(),
                code: code.to_string(),
            })
            .collect()
    }

    /// Look up a catalog language by id or (case-insensitive) display name.
    pub fn find(key: &str) -> Option<Language> {
        let key = key.trim();
        Self::catalog()
            .into_iter()
            .find(|lang| lang.id == key || lang.name.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = Language::catalog();
        assert_eq!(catalog.len(), 6);
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_find_by_id_and_name() {
        assert_eq!(Language::find("fr").unwrap().name, "French");
        assert_eq!(Language::find("german").unwrap().id, "de");
        assert!(Language::find("klingon").is_none());
    }

    #[test]
    fn test_chinese_uses_distinct_api_code() {
        let cn = Language::find("cn").unwrap();
        assert_eq!(cn.code, "Mandarin Chinese");
    }
}
