//! Motodex - Taiwan Motorcycle Catalog Toolkit
//!
//! Generates a synthetic catalog of Taiwan-market motorcycles, persists it as
//! a single JSON document, and provides filters, a descriptive report and a
//! rubric validator over that document.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod generator;
pub mod query;
pub mod record;
pub mod report;
pub mod store;
pub mod tables;
pub mod validate;

pub use error::{CatalogError, Result};
pub use record::{Catalog, Record};
