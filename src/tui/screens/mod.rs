//! TUI screens

pub mod categories;
pub mod explorer;
