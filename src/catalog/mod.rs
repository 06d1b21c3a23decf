//! Mod catalog: the static record store and the pure query engine on top of it
//!
//! The catalog is loaded once from a JSON data file (the embedded default or a
//! user-supplied override) and never mutated afterwards. All filtering,
//! sorting, and grouping works on borrowed slices of the store.

pub mod filter;
pub mod groups;
pub mod index;

pub use filter::{filter_and_sort, SortKey};
pub use groups::{default_descriptors, group_by_category, load_descriptors, CategoryDescriptor, GroupedCatalog};
pub use index::CatalogIndex;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Mod data shipped with the binary, mirroring the server's current pack.
const BUILTIN_MODS_JSON: &str = include_str!("../../data/mods.json");

/// Errors raised while loading the catalog data file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read mod data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse mod data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate mod id {0} in data file")]
    DuplicateId(i64),
}

/// A text field that may be written as a single string or a list of lines
/// in the data file (`howTo` and `details` use both forms).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextBlock {
    Single(String),
    Lines(Vec<String>),
}

impl TextBlock {
    /// View the block as individual lines regardless of source form.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            TextBlock::Single(s) => vec![s.as_str()],
            TextBlock::Lines(v) => v.iter().map(String::as_str).collect(),
        }
    }

    /// Flatten to a single space-joined string (for search text).
    pub fn joined(&self) -> String {
        match self {
            TextBlock::Single(s) => s.clone(),
            TextBlock::Lines(v) => v.join(" "),
        }
    }
}

/// One catalog entry describing an installed mod
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModRecord {
    /// Unique, stable identifier (list key and selection reference)
    pub id: i64,

    pub name: String,

    /// Grouping bucket key; mods without a known category never appear in
    /// the category tabs but still show up in the explorer.
    #[serde(default)]
    pub category: Option<String>,

    /// Short free-text label used for secondary filtering
    #[serde(default)]
    pub tag: Option<String>,

    pub description: String,

    /// Jar file name as installed on the server
    #[serde(default)]
    pub file_name: Option<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub how_to: Option<TextBlock>,

    #[serde(default)]
    pub details: Option<TextBlock>,

    /// One-liner flavor text shown on cards and in the detail view
    #[serde(default)]
    pub vibe: Option<String>,

    /// Image paths for the detail slideshow; resolved by whoever renders them
    #[serde(default)]
    pub media: Vec<String>,
}

impl ModRecord {
    /// Build the normalized searchable text for this record: name,
    /// description, tag, file name, features, and how-to text joined with
    /// single spaces and lowercased. Absent fields contribute nothing.
    pub fn haystack(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.name, &self.description];
        if let Some(tag) = &self.tag {
            parts.push(tag);
        }
        if let Some(file_name) = &self.file_name {
            parts.push(file_name);
        }
        let features = self.features.join(" ");
        if !features.is_empty() {
            parts.push(&features);
        }
        let how_to = self.how_to.as_ref().map(TextBlock::joined);
        if let Some(how_to) = how_to.as_deref() {
            parts.push(how_to);
        }
        parts.join(" ").to_lowercase()
    }
}

/// The immutable collection of mod records for the pack
#[derive(Debug, Clone)]
pub struct ModStore {
    records: Vec<ModRecord>,
}

impl ModStore {
    /// Parse a store from JSON, rejecting duplicate ids.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let records: Vec<ModRecord> = serde_json::from_str(data)?;

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }

        Ok(Self { records })
    }

    /// Load a store from a data file on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// The mod data compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_MODS_JSON)
    }

    pub fn records(&self) -> &[ModRecord] {
        &self.records
    }

    /// Look up a record by its stable id.
    pub fn get(&self, id: i64) -> Option<&ModRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_records() -> Vec<ModRecord> {
    serde_json::from_str(
        r#"[
            {"id": 1, "name": "Sodium", "category": "optimizers", "tag": "performance",
             "description": "Rendering engine"},
            {"id": 2, "name": "Lithium", "category": "optimizers", "tag": "performance",
             "description": "Physics engine"},
            {"id": 3, "name": "Waystones", "category": "casual", "tag": "travel",
             "description": "Teleport network"}
        ]"#,
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_data_loads() {
        let store = ModStore::builtin().unwrap();
        assert!(!store.is_empty());
        assert!(store.get(1).is_some());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "name": "Comforts", "description": "Sleeping bags"}}]"#
        )
        .unwrap();

        let store = ModStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(7).unwrap().name, "Comforts");
        assert!(store.get(7).unwrap().category.is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let data = r#"[
            {"id": 1, "name": "A", "description": "a"},
            {"id": 1, "name": "B", "description": "b"}
        ]"#;
        match ModStore::from_json(data) {
            Err(CatalogError::DuplicateId(1)) => {}
            other => panic!("expected DuplicateId(1), got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_how_to_accepts_string_or_list() {
        let data = r#"[
            {"id": 1, "name": "A", "description": "a", "howTo": "press V"},
            {"id": 2, "name": "B", "description": "b", "howTo": ["step one", "step two"]}
        ]"#;
        let store = ModStore::from_json(data).unwrap();
        assert_eq!(
            store.get(1).unwrap().how_to.as_ref().unwrap().joined(),
            "press V"
        );
        assert_eq!(
            store.get(2).unwrap().how_to.as_ref().unwrap().lines(),
            vec!["step one", "step two"]
        );
    }

    #[test]
    fn test_haystack_includes_optional_fields() {
        let data = r#"[{
            "id": 6, "name": "Waystones", "tag": "travel",
            "description": "Teleport network",
            "fileName": "waystones-21.1.4.jar",
            "features": ["Warp back", "Attunement"],
            "howTo": ["Craft a waystone", "Right-click to attune"]
        }]"#;
        let store = ModStore::from_json(data).unwrap();
        let haystack = store.get(6).unwrap().haystack();

        assert!(haystack.contains("waystones"));
        assert!(haystack.contains("travel"));
        assert!(haystack.contains("21.1.4"));
        assert!(haystack.contains("warp back"));
        assert!(haystack.contains("right-click to attune"));
        // Normalized to lowercase
        assert_eq!(haystack, haystack.to_lowercase());
    }

    #[test]
    fn test_haystack_skips_absent_fields() {
        let data = r#"[{"id": 1, "name": "Lithium", "description": "Physics engine"}]"#;
        let store = ModStore::from_json(data).unwrap();
        assert_eq!(store.get(1).unwrap().haystack(), "lithium physics engine");
    }
}
