//! Packdex - a CLI/TUI modpack browser for a community Minecraft server
//!
//! This crate provides a terminal companion for the server's website:
//! - Searchable/filterable catalog of every mod installed in the pack
//! - Category-tabbed browsing with per-mod detail views
//! - Live server status polled from the mcsrvstat.us API
//! - Quick handoff to the live Dynmap in a browser

pub const APP_VERSION: &str = "0.2.1";

pub mod app;
pub mod catalog;
pub mod config;
pub mod status;
pub mod tui;

pub use app::App;
pub use config::Config;
