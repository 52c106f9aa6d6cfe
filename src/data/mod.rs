//! Data ingestion and storage
//!
//! Match file loading, the metadata scan, and feature table export to CSV
//! and SQLite.

pub mod database;
pub mod export;
pub mod loader;
pub mod metadata;

pub use database::FeatureStore;
pub use loader::{load_matches, MatchLoader};
pub use metadata::{scan_metadata, MetadataRow};
