//! Catalog index: the distinct categories and tags present in the store
//!
//! Feeds the explorer's filter controls. Pure function of the store, so it
//! is computed once at startup and never again.

use super::ModRecord;
use std::collections::BTreeSet;

/// Distinct, sorted, duplicate-free category and tag values
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl CatalogIndex {
    pub fn build(records: &[ModRecord]) -> Self {
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();

        for record in records {
            if let Some(category) = record.category.as_deref().filter(|c| !c.is_empty()) {
                categories.insert(category.to_string());
            }
            if let Some(tag) = record.tag.as_deref().filter(|t| !t.is_empty()) {
                tags.insert(tag.to_string());
            }
        }

        Self {
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
        }
    }
}

/// Prettify a category id for display: split on `-`/`_` and title-case
/// each word ("better-dungeons" -> "Better Dungeons").
pub fn display_label(raw: &str) -> String {
    raw.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_records;

    #[test]
    fn test_index_is_sorted_and_deduplicated() {
        let index = CatalogIndex::build(&sample_records());
        assert_eq!(index.categories, vec!["casual", "optimizers"]);
        assert_eq!(index.tags, vec!["performance", "travel"]);
    }

    #[test]
    fn test_absent_fields_are_excluded() {
        let mut records = sample_records();
        records[0].category = None;
        records[0].tag = Some(String::new());
        let index = CatalogIndex::build(&records);
        assert_eq!(index.categories, vec!["casual", "optimizers"]);
        assert_eq!(index.tags, vec!["performance", "travel"]);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("optimizers"), "Optimizers");
        assert_eq!(display_label("better-dungeons"), "Better Dungeons");
        assert_eq!(display_label("qol_misc"), "Qol Misc");
    }
}
