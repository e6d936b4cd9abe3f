use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::session::ThemeSelection;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

const DEFAULT_WORDS_FILE: &str = "english.json";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid word list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("word list not found: {0}")]
    Missing(String),
}

/// A single word to drill, tagged with the theme it was listed under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VocabularyEntry {
    pub word: String,
    pub translation: String,
    pub tip: String,
    pub theme: String,
}

impl VocabularyEntry {
    pub fn new(word: &str, translation: &str, tip: &str, theme: &str) -> Self {
        Self {
            word: word.to_string(),
            translation: translation.to_string(),
            tip: tip.to_string(),
            theme: theme.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    word: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    tip: String,
}

/// Every entry loaded at startup, flattened theme by theme in file order.
/// Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<VocabularyEntry>,
}

impl Catalog {
    /// Parse a word list keyed by theme name.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let themes: Map<String, Value> = serde_json::from_str(json)?;

        let mut entries = Vec::new();
        for (theme, words) in themes {
            let words: Vec<RawEntry> = serde_json::from_value(words)?;
            entries.extend(words.into_iter().map(|raw| VocabularyEntry {
                word: raw.word,
                translation: raw.translation,
                tip: raw.tip,
                theme: theme.clone(),
            }));
        }

        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The word list compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        let file = WORDS_DIR
            .get_file(DEFAULT_WORDS_FILE)
            .ok_or_else(|| CatalogError::Missing(DEFAULT_WORDS_FILE.to_string()))?;
        let json = file
            .contents_utf8()
            .ok_or_else(|| CatalogError::Missing(DEFAULT_WORDS_FILE.to_string()))?;
        Self::from_json_str(json)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct themes in the order they first appear.
    pub fn themes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.theme.as_str())
            .unique()
            .collect()
    }

    /// Entries matching the selection, in catalog order. Blank matches nothing.
    pub fn filter(&self, selection: &ThemeSelection) -> Vec<VocabularyEntry> {
        match selection {
            ThemeSelection::Blank => Vec::new(),
            ThemeSelection::All => self.entries.clone(),
            ThemeSelection::Named(theme) => self
                .entries
                .iter()
                .filter(|e| &e.theme == theme)
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<VocabularyEntry>> for Catalog {
    fn from(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }
}

/// Display label for a theme: first character upper-cased.
pub fn theme_label(theme: &str) -> String {
    let mut chars = theme.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLE: &str = r#"
    {
        "nature": [
            { "word": "sky", "translation": "天空", "tip": "Blue on a sunny day" }
        ],
        "animals": [
            { "word": "cat", "translation": "猫", "tip": "Purrs" },
            { "word": "dog" }
        ]
    }
    "#;

    #[test]
    fn test_from_json_flattens_in_file_order() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();

        let words: Vec<&str> = catalog.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["sky", "cat", "dog"]);
        assert_eq!(catalog.entries()[1].theme, "animals");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_missing_translation_and_tip_default_to_empty() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let dog = &catalog.entries()[2];

        assert_eq!(dog.translation, "");
        assert_eq!(dog.tip, "");
    }

    #[test]
    fn test_themes_in_first_appearance_order() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.themes(), vec!["nature", "animals"]);
    }

    #[test]
    fn test_filter_by_selection() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();

        assert_eq!(catalog.filter(&ThemeSelection::All).len(), 3);
        assert!(catalog.filter(&ThemeSelection::Blank).is_empty());

        let animals = catalog.filter(&ThemeSelection::Named("animals".into()));
        assert_eq!(animals.len(), 2);
        assert!(animals.iter().all(|e| e.theme == "animals"));

        assert!(catalog
            .filter(&ThemeSelection::Named("space".into()))
            .is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert_matches!(
            Catalog::from_json_str("not json"),
            Err(CatalogError::Parse(_))
        );
        assert_matches!(
            Catalog::from_json_str(r#"{ "animals": "cat" }"#),
            Err(CatalogError::Parse(_))
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::from_path(dir.path().join("nope.json"));
        assert_matches!(result, Err(CatalogError::Io { .. }));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_embedded_word_list_loads() {
        let catalog = Catalog::embedded().unwrap();

        assert!(!catalog.is_empty());
        assert!(catalog.themes().contains(&"animals"));
        assert!(catalog.entries().iter().all(|e| !e.word.is_empty()));
    }

    #[test]
    fn test_theme_label() {
        assert_eq!(theme_label("animals"), "Animals");
        assert_eq!(theme_label("Food"), "Food");
        assert_eq!(theme_label(""), "");
    }
}
