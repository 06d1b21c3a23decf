//! CLI command action handlers

use super::App;
use crate::catalog::{self, filter_and_sort, CatalogIndex, SortKey, TextBlock};
use crate::status::ServerStatus;
use anyhow::{bail, Result};

impl App {
    // ========== Mod Commands ==========

    pub async fn cmd_mod_list(&self) -> Result<()> {
        let records = self.store.records();
        if records.is_empty() {
            println!("The mod data file is empty.");
            return Ok(());
        }

        println!("Mods in the pack ({}):", records.len());
        println!("{:-<60}", "");
        for (i, m) in records.iter().enumerate() {
            let category = m.category.as_deref().unwrap_or("-");
            let tag = m.tag.as_deref().unwrap_or("-");
            println!("{:>3}. {} [{} / {}]", i + 1, m.name, category, tag);
        }
        Ok(())
    }

    pub async fn cmd_mod_search(
        &self,
        query: &str,
        category: Option<&str>,
        tag: Option<&str>,
        sort: &str,
    ) -> Result<()> {
        let sort_key = SortKey::parse(sort);
        if sort_key.is_none() && !sort.is_empty() {
            println!("Unknown sort key '{}', leaving results unsorted.", sort);
        }

        let results = filter_and_sort(self.store.records(), query, category, tag, sort_key);

        if results.is_empty() {
            println!("No mods match that search/filter combo.");
            return Ok(());
        }

        println!("{} result(s):", results.len());
        println!("{:-<60}", "");
        for m in results {
            let tag = m.tag.as_deref().unwrap_or("-");
            println!("  {} ({})\n    {}", m.name, tag, m.description);
        }
        Ok(())
    }

    pub async fn cmd_mod_info(&self, name: &str) -> Result<()> {
        let lower = name.to_lowercase();
        let record = self
            .store
            .records()
            .iter()
            .find(|m| m.name.to_lowercase() == lower || m.name.to_lowercase().contains(&lower));

        let Some(m) = record else {
            bail!("Mod '{}' not found. Run 'packdex mods list' to see the pack.", name);
        };

        println!("Mod Information");
        println!("{:-<40}", "");
        println!("Name:        {}", m.name);
        if let Some(category) = &m.category {
            println!("Category:    {}", catalog::index::display_label(category));
        }
        if let Some(tag) = &m.tag {
            println!("Tag:         {}", tag);
        }
        println!("Description: {}", m.description);
        if let Some(file_name) = &m.file_name {
            println!("File:        {}", file_name);
        }
        if !m.features.is_empty() {
            println!("Features:");
            for feature in &m.features {
                println!("  - {}", feature);
            }
        }
        if let Some(how_to) = &m.how_to {
            println!("How to:");
            for line in how_to.lines() {
                println!("  {}", line);
            }
        }
        if let Some(details) = &m.details {
            print_block("Details:", details);
        }
        if let Some(vibe) = &m.vibe {
            println!("Vibe:        {}", vibe);
        }
        if !m.media.is_empty() {
            println!("Media:       {} image(s)", m.media.len());
        }
        Ok(())
    }

    // ========== Catalog Commands ==========

    pub async fn cmd_categories(&self) -> Result<()> {
        let grouped = catalog::group_by_category(self.store.records(), &self.descriptors);

        println!("Category tabs:");
        println!("{:-<60}", "");
        for descriptor in &self.descriptors {
            let bucket = grouped.bucket(&descriptor.id);
            println!(
                "  {} {} ({} mods)\n    {}",
                descriptor.icon,
                descriptor.label,
                bucket.len(),
                descriptor.blurb
            );
        }
        if !grouped.unmatched.is_empty() {
            println!(
                "\n{} mod(s) have no tab (check their 'category' field):",
                grouped.unmatched.len()
            );
            for m in &grouped.unmatched {
                println!("  - {}", m.name);
            }
        }
        Ok(())
    }

    pub async fn cmd_tags(&self) -> Result<()> {
        let index = CatalogIndex::build(self.store.records());
        if index.tags.is_empty() {
            println!("No tags in the data file.");
            return Ok(());
        }
        println!("Tags: {}", index.tags.join(", "));
        Ok(())
    }

    // ========== Server Commands ==========

    pub async fn cmd_status(&self) -> Result<()> {
        let config = self.config.read().await;
        println!("Server: {}", config.server_address);
        drop(config);

        match self.status.fetch().await {
            Ok(response) => {
                let status = ServerStatus::from_response(&response);
                println!("Status:  {}", status.label());
                if let ServerStatus::Online { version, .. } = &status {
                    println!("Players: {}", status.players_label());
                    if let Some(version) = version {
                        println!("Version: {}", version);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("status fetch failed: {:#}", e);
                println!("Status:  Unknown (could not reach the status API)");
            }
        }
        Ok(())
    }

    pub async fn cmd_map(&self) -> Result<()> {
        let url = self.config.read().await.map_url.clone();
        println!("Opening live map: {}", url);
        self.open_map().await
    }
}

fn print_block(header: &str, block: &TextBlock) {
    println!("{}", header);
    for line in block.lines() {
        println!("  {}", line);
    }
}
