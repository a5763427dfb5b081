//! Configuration management for motodex
//!
//! Generation quotas and the validation rubric both default to the
//! Taiwan-market tables; a `motodex.json` in the working directory can
//! override any subset of them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};
use crate::tables::BRANDS;

/// Config file names searched in the current directory, in order
pub const CONFIG_FILES: &[&str] = &["motodex.json", ".motodex.json"];

pub const DEFAULT_OUTPUT: &str = "taiwan_specific_motorcycles.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub generator: GeneratorConfig,
  #[serde(default)]
  pub validation: ValidationRubric,
}

/// Number of records to produce for one brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandQuota {
  pub brand: String,
  pub count: usize,
}

/// Inclusive integer span; model years are `Span<u16>`, feature counts `Span<u32>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<T = u32> {
  pub start: T,
  pub end: T,
}

impl<T: Copy> Span<T> {
  pub fn new(start: T, end: T) -> Self {
    Self { start, end }
  }

  pub fn iter(&self) -> std::ops::RangeInclusive<T> {
    self.start..=self.end
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
  /// Where the catalog is written
  pub output: PathBuf,
  pub title: String,
  pub description: String,
  /// Brands in generation order
  pub brands: Vec<BrandQuota>,
  pub model_years: Span<u16>,
  pub features_per_record: Span,
  /// Half-width of the quoted price interval as a fraction of the midpoint
  pub price_spread: f64,
  /// Append ` (YYYY)` to model names
  pub year_suffix: bool,
  /// Fixed seed for reproducible catalogs
  pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      output: PathBuf::from(DEFAULT_OUTPUT),
      title: "Taiwan Specific Motorcycle Database".to_string(),
      description:
        "Comprehensive database of motorcycles specifically for Taiwan market with 2000+ entries"
          .to_string(),
      brands: BRANDS
        .iter()
        .map(|b| BrandQuota { brand: b.name.to_string(), count: b.default_count })
        .collect(),
      model_years: Span::new(2020, 2025),
      features_per_record: Span::new(4, 6),
      price_spread: 0.10,
      year_suffix: false,
      seed: None,
    }
  }
}

impl GeneratorConfig {
  pub fn target_entries(&self) -> usize {
    self.brands.iter().map(|q| q.count).sum()
  }

  fn check(&self, path: &Path) -> Result<()> {
    if self.model_years.start > self.model_years.end {
      return Err(CatalogError::config(path, "generator.model_years start is after end"));
    }
    if self.features_per_record.start > self.features_per_record.end {
      return Err(CatalogError::config(path, "generator.features_per_record start is after end"));
    }
    if !(0.0..1.0).contains(&self.price_spread) {
      return Err(CatalogError::config(path, "generator.price_spread must be in [0, 1)"));
    }
    Ok(())
  }
}

/// Thresholds the validator grades a catalog against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRubric {
  pub min_entries: usize,
  pub required_brands: Vec<String>,
  pub required_fields: Vec<String>,
  pub required_engine_fields: Vec<String>,
  /// Fraction of records a required field must appear on
  pub coverage_threshold: f64,
  pub year_range: Span<u16>,
  /// Cheapest quote must be at or below this
  pub entry_price_ceiling: u64,
  /// Dearest quote must be at or above this
  pub premium_price_floor: u64,
  /// Fraction of checks that must pass
  pub pass_ratio: f64,
}

impl Default for ValidationRubric {
  fn default() -> Self {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

    Self {
      min_entries: 2000,
      required_brands: BRANDS.iter().map(|b| b.name.to_string()).collect(),
      required_fields: strings(&[
        "brand",
        "model",
        "model_english",
        "model_year",
        "type",
        "engine",
        "features",
        "price_range",
        "fuel_efficiency",
        "weight",
        "seat_height",
        "availability",
        "category",
        "target_audience",
      ]),
      required_engine_fields: strings(&["displacement", "type", "power"]),
      coverage_threshold: 0.95,
      year_range: Span::new(2020, 2025),
      entry_price_ceiling: 80_000,
      premium_price_floor: 500_000,
      pass_ratio: 0.90,
    }
  }
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let config: Config =
      serde_json::from_str(&content).map_err(|e| CatalogError::config(path, e.to_string()))?;
    config.generator.check(path)?;
    Ok(config)
  }

  /// Load configuration from current directory or defaults
  pub fn load() -> Result<Self> {
    for path in CONFIG_FILES {
      if Path::new(path).exists() {
        return Self::load_from_file(path);
      }
    }

    Ok(Config::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content).map_err(|e| CatalogError::io(path, e))?;
    Ok(())
  }
}
