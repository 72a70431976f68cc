//! Lark Match - Mood resolution and venue matching for The London Lark
//!
//! This library turns a free-text description of a desired mood into a
//! confidence-scored mood classification, then draws a small, varied set of
//! venues for it, deliberately including one thematically adjacent surprise.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod taxonomy;

// Re-export commonly used types
pub use crate::core::{AdjacencyDrawer, MoodResolver, VenueMatcher};
pub use models::{DrawnVenue, MoodMatch, MoodResolution, QueryFilters, Venue};
pub use services::VenueCatalog;
pub use taxonomy::{AdjacencyGraph, Taxonomy};
