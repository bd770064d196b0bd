//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod detail;
pub mod footer;
pub mod header;
pub mod info_panel;
pub mod listings;
pub mod logs;
pub mod metrics;
pub mod toasts;
