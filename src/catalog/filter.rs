//! Filter/sort engine for the explorer view
//!
//! Pure functions over the record store: given the current query text,
//! category/tag selections, and sort key, produce the ordered visible subset.
//! Deterministic for identical inputs and free of side effects, so the TUI
//! can recompute on every keystroke.

use super::ModRecord;

/// Sort key for explorer results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Category,
    Tag,
}

impl SortKey {
    /// Parse a user-supplied key. Unknown keys yield `None`, which the
    /// engine treats as "leave the filtered order alone".
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "category" => Some(SortKey::Category),
            "tag" => Some(SortKey::Tag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Tag => "tag",
        }
    }

    /// Cycle through keys (for the TUI sort toggle).
    pub fn next(&self) -> Self {
        match self {
            SortKey::Name => SortKey::Category,
            SortKey::Category => SortKey::Tag,
            SortKey::Tag => SortKey::Name,
        }
    }
}

/// Compute the visible, ordered subset of `records`.
///
/// - `category`/`tag`: `None` means "all"; otherwise exact match required.
///   Both may be active at once (logical AND).
/// - `query`: trimmed and lowercased; empty passes everything, otherwise a
///   record passes if its haystack contains the query as a substring.
/// - `sort`: stable ordering applied after filtering; `None` keeps the
///   store's relative order (defensive default for unrecognized keys).
pub fn filter_and_sort<'a>(
    records: &'a [ModRecord],
    query: &str,
    category: Option<&str>,
    tag: Option<&str>,
    sort: Option<SortKey>,
) -> Vec<&'a ModRecord> {
    let needle = query.trim().to_lowercase();

    let mut visible: Vec<&ModRecord> = records
        .iter()
        .filter(|record| {
            // Equality filters are cheap, check them before the text scan.
            if let Some(want) = category {
                if record.category.as_deref() != Some(want) {
                    return false;
                }
            }
            if let Some(want) = tag {
                if record.tag.as_deref() != Some(want) {
                    return false;
                }
            }
            if needle.is_empty() {
                return true;
            }
            record.haystack().contains(&needle)
        })
        .collect();

    match sort {
        Some(SortKey::Name) => {
            visible.sort_by(|a, b| cmp_names(a, b));
        }
        Some(SortKey::Category) => {
            visible.sort_by(|a, b| {
                let ac = a.category.as_deref().unwrap_or("");
                let bc = b.category.as_deref().unwrap_or("");
                ac.to_lowercase()
                    .cmp(&bc.to_lowercase())
                    .then_with(|| cmp_names(a, b))
            });
        }
        Some(SortKey::Tag) => {
            visible.sort_by(|a, b| {
                let at = a.tag.as_deref().unwrap_or("");
                let bt = b.tag.as_deref().unwrap_or("");
                at.to_lowercase()
                    .cmp(&bt.to_lowercase())
                    .then_with(|| cmp_names(a, b))
            });
        }
        None => {}
    }

    visible
}

fn cmp_names(a: &ModRecord, b: &ModRecord) -> std::cmp::Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_records;

    fn names<'a>(result: &'a [&'a ModRecord]) -> Vec<&'a str> {
        result.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_text_query_matches_description() {
        let records = sample_records();
        let result = filter_and_sort(&records, "engine", None, None, Some(SortKey::Name));
        assert_eq!(names(&result), vec!["Lithium", "Sodium"]);
    }

    #[test]
    fn test_query_is_trimmed_and_lowercased() {
        let records = sample_records();
        let result = filter_and_sort(&records, "  ENGINE ", None, None, Some(SortKey::Name));
        assert_eq!(names(&result), vec!["Lithium", "Sodium"]);
    }

    #[test]
    fn test_whitespace_query_passes_everything() {
        let records = sample_records();
        let result = filter_and_sort(&records, "   ", None, None, Some(SortKey::Name));
        assert_eq!(result.len(), records.len());
    }

    #[test]
    fn test_category_filter() {
        let records = sample_records();
        let result = filter_and_sort(&records, "", Some("optimizers"), None, Some(SortKey::Name));
        assert_eq!(names(&result), vec!["Lithium", "Sodium"]);
    }

    #[test]
    fn test_tag_filter() {
        let records = sample_records();
        let result = filter_and_sort(&records, "", None, Some("travel"), Some(SortKey::Name));
        assert_eq!(names(&result), vec!["Waystones"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = sample_records();
        let result = filter_and_sort(
            &records,
            "",
            Some("optimizers"),
            Some("travel"),
            Some(SortKey::Name),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_and_tag_filters_commute() {
        let records = sample_records();
        // Both filters active: same set no matter how you think about order.
        let both = filter_and_sort(
            &records,
            "",
            Some("optimizers"),
            Some("performance"),
            Some(SortKey::Name),
        );
        let ids_both: Vec<i64> = both.iter().map(|r| r.id).collect();

        let by_cat = filter_and_sort(&records, "", Some("optimizers"), None, Some(SortKey::Name));
        let then_tag: Vec<i64> = by_cat
            .into_iter()
            .filter(|r| r.tag.as_deref() == Some("performance"))
            .map(|r| r.id)
            .collect();

        assert_eq!(ids_both, then_tag);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let records = sample_records();
        let first: Vec<i64> = filter_and_sort(&records, "engine", None, None, Some(SortKey::Name))
            .iter()
            .map(|r| r.id)
            .collect();
        let second: Vec<i64> = filter_and_sort(&records, "engine", None, None, Some(SortKey::Name))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_by_category_ties_break_on_name() {
        let records = sample_records();
        let result = filter_and_sort(&records, "", None, None, Some(SortKey::Category));
        // casual < optimizers; within optimizers, Lithium < Sodium.
        assert_eq!(names(&result), vec!["Waystones", "Lithium", "Sodium"]);
    }

    #[test]
    fn test_sort_missing_category_sorts_first() {
        let mut records = sample_records();
        records[2].category = None;
        let result = filter_and_sort(&records, "", None, None, Some(SortKey::Category));
        assert_eq!(names(&result)[0], "Waystones");
    }

    #[test]
    fn test_no_sort_key_preserves_store_order() {
        let records = sample_records();
        let result = filter_and_sort(&records, "", None, None, None);
        assert_eq!(names(&result), vec!["Sodium", "Lithium", "Waystones"]);
    }

    #[test]
    fn test_unknown_sort_key_parses_to_none() {
        assert_eq!(SortKey::parse("name"), Some(SortKey::Name));
        assert_eq!(SortKey::parse("Category"), Some(SortKey::Category));
        assert_eq!(SortKey::parse("downloads"), None);
    }
}
