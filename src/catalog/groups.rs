//! Category-tabbed grouping of the catalog
//!
//! Partitions the store into the fixed category buckets shown as tabs. This
//! is a distinct code path from the explorer's filter/sort engine: buckets
//! keep the store's original relative order and never get a secondary sort.

use super::ModRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Hand-authored description of one category tab
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub blurb: String,
}

/// The pack's category tabs, in display order. Adding a category means
/// editing this list (or the override file), not the grouping code.
pub fn default_descriptors() -> Vec<CategoryDescriptor> {
    [
        (
            "optimizers",
            "Optimizers",
            "🛠",
            "FPS boosters and lag killers so the chaos runs smooth.",
        ),
        (
            "dependencies",
            "Dependencies",
            "📦",
            "Little libraries that make the big mods possible.",
        ),
        (
            "casual",
            "Enhancements – Casual",
            "🎒",
            "Travel, decorate, and vibe without making the game sweaty.",
        ),
        (
            "challenge",
            "Enhancements – Challenge",
            "⚔",
            "Optional bosses and dimensions for tryhards and thrill seekers.",
        ),
        (
            "terrain",
            "Terrain & Structures",
            "🌍",
            "Biomes, dungeons, ruins, and places to get lost in.",
        ),
        (
            "misc",
            "QoL & Misc",
            "🎤",
            "Voice chat, gravestones, recipe viewers, and other sanity savers.",
        ),
    ]
    .into_iter()
    .map(|(id, label, icon, blurb)| CategoryDescriptor {
        id: id.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        blurb: blurb.to_string(),
    })
    .collect()
}

/// Load a descriptor override list from a JSON file.
pub fn load_descriptors(path: &Path) -> Result<Vec<CategoryDescriptor>, super::CatalogError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// The store partitioned into category buckets
#[derive(Debug)]
pub struct GroupedCatalog<'a> {
    buckets: HashMap<String, Vec<&'a ModRecord>>,
    /// Records whose category matched no descriptor; they still appear in
    /// the explorer, just not under any tab.
    pub unmatched: Vec<&'a ModRecord>,
}

impl<'a> GroupedCatalog<'a> {
    /// Records in the bucket for a descriptor id, in store order.
    pub fn bucket(&self, id: &str) -> &[&'a ModRecord] {
        self.buckets.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Partition `records` into one bucket per descriptor, preserving the
/// store's relative order within each bucket. Unmatched categories are
/// reported so data/config drift shows up in the logs instead of as
/// silently missing mods.
pub fn group_by_category<'a>(
    records: &'a [ModRecord],
    descriptors: &[CategoryDescriptor],
) -> GroupedCatalog<'a> {
    let mut buckets: HashMap<String, Vec<&ModRecord>> = descriptors
        .iter()
        .map(|d| (d.id.clone(), Vec::new()))
        .collect();
    let mut unmatched = Vec::new();

    for record in records {
        let bucket = record
            .category
            .as_deref()
            .and_then(|category| buckets.get_mut(category));
        match bucket {
            Some(bucket) => bucket.push(record),
            None => unmatched.push(record),
        }
    }

    for record in &unmatched {
        tracing::warn!(
            "mod '{}' has category {:?} which matches no known tab",
            record.name,
            record.category
        );
    }

    GroupedCatalog { buckets, unmatched }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_records;

    #[test]
    fn test_buckets_preserve_store_order() {
        let records = sample_records();
        let grouped = group_by_category(&records, &default_descriptors());

        // Sodium comes before Lithium in the store; no name sort here.
        let optimizers: Vec<&str> = grouped
            .bucket("optimizers")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(optimizers, vec!["Sodium", "Lithium"]);
    }

    #[test]
    fn test_grouping_partitions_the_store() {
        let mut records = sample_records();
        records[2].category = Some("modded-weather".to_string());

        let descriptors = default_descriptors();
        let grouped = group_by_category(&records, &descriptors);

        let bucketed: usize = descriptors
            .iter()
            .map(|d| grouped.bucket(&d.id).len())
            .sum();
        assert_eq!(bucketed + grouped.unmatched.len(), records.len());
        assert_eq!(grouped.unmatched.len(), 1);
        assert_eq!(grouped.unmatched[0].name, "Waystones");
    }

    #[test]
    fn test_missing_category_is_unmatched() {
        let mut records = sample_records();
        records[0].category = None;
        let grouped = group_by_category(&records, &default_descriptors());
        assert_eq!(grouped.bucket("optimizers").len(), 1);
        assert_eq!(grouped.unmatched.len(), 1);
    }

    #[test]
    fn test_unknown_descriptor_id_yields_empty_bucket() {
        let records = sample_records();
        let grouped = group_by_category(&records, &default_descriptors());
        assert!(grouped.bucket("does-not-exist").is_empty());
    }

    #[test]
    fn test_default_descriptors_are_fixed_and_ordered() {
        let descriptors = default_descriptors();
        let ids: Vec<&str> = descriptors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "optimizers",
                "dependencies",
                "casual",
                "challenge",
                "terrain",
                "misc"
            ]
        );
    }
}
