//! Scholarly-profile discovery middleware
//!
//! Serves faceted person search over a Tantivy index, seeds reference data
//! (themes, directory and discovery views) from bundled YAML, and publishes
//! the harvest-source declarations used to import records.

pub mod api;
pub mod config;
pub mod defaults;
pub mod discovery;
pub mod error;
pub mod harvest;
pub mod models;
pub mod search;
pub mod state;

pub use error::{AppError, Result};
