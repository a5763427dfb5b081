use anyhow::Result;
use chrono::Local;
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use crate::analysis;
use crate::config::Config;
use crate::console;
use crate::error::CatalogError;
use crate::generator;
use crate::query::{CcRange, Query};
use crate::report;
use crate::store;
use crate::validate;

/// Explicit config path if given, otherwise the working-directory lookup
pub fn load_config(path: Option<&Path>) -> Result<Config> {
  match path {
    Some(path) if !path.exists() => {
      Err(CatalogError::config(path, "config file does not exist").into())
    }
    Some(path) => Ok(Config::load_from_file(path)?),
    None => Ok(Config::load()?),
  }
}

/// Catalog path from the command line, falling back to the configured output
pub fn catalog_path(config: &Config, file: Option<PathBuf>) -> PathBuf {
  file.unwrap_or_else(|| config.generator.output.clone())
}

/// Build a catalog, write it to `path` and summarise what was produced
pub fn generate(config: &Config, path: &Path, seed: Option<u64>) -> Result<()> {
  let mut generator_config = config.generator.clone();
  if seed.is_some() {
    generator_config.seed = seed;
  }

  console::info(&format!(
    "Generating {} motorcycle entries...",
    generator_config.target_entries()
  ));
  let catalog = generator::generate(&generator_config, Local::now().date_naive());
  if catalog.is_empty() {
    console::warn("No brand quotas configured; the catalog is empty");
  }
  store::save(path, &catalog)?;

  console::success(&format!(
    "Generated {} entries and saved to {}",
    catalog.len(),
    path.display()
  ));

  println!("{}", "Brand distribution:".bold());
  for share in analysis::by_brand(&catalog.motorcycles) {
    println!("  {}: {} models", share.label, share.count);
  }
  println!();
  println!("{}", "Type distribution:".bold());
  for share in analysis::by_type(&catalog.motorcycles) {
    println!("  {}: {} models", share.label, share.count);
  }
  Ok(())
}

/// Print descriptive statistics and the example query battery
pub fn report(path: &Path) -> Result<()> {
  let catalog = store::load(path)?;
  let mut rng = StdRng::from_os_rng();
  report::render(&catalog, &mut rng);
  Ok(())
}

/// Command-line filter options, all combined with AND
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
  pub brand: Option<String>,
  pub vehicle_type: Option<String>,
  pub min_cc: Option<u32>,
  pub max_cc: Option<u32>,
  pub max_price: Option<u64>,
  pub min_year: Option<u16>,
  pub category: Option<String>,
  pub availability: Option<String>,
  pub electric: bool,
  pub limit: usize,
}

impl From<&QueryOptions> for Query {
  fn from(options: &QueryOptions) -> Self {
    Query {
      brand: options.brand.clone(),
      vehicle_type: options.vehicle_type.clone(),
      displacement: CcRange { min: options.min_cc, max: options.max_cc },
      max_price: options.max_price,
      min_year: options.min_year,
      category: options.category.clone(),
      availability: options.availability.clone(),
      electric: options.electric,
    }
  }
}

/// Print the records matching `options` and the match count
pub fn query(path: &Path, options: &QueryOptions) -> Result<()> {
  let catalog = store::load(path)?;
  let query = Query::from(options);
  let hits = query.apply(&catalog.motorcycles);

  report::print_listing(&hits, options.limit);
  println!(
    "{} of {} records match",
    hits.len().to_string().cyan().bold(),
    catalog.len()
  );
  Ok(())
}

/// Grade the catalog against the rubric; returns whether it passed
pub fn validate(config: &Config, path: &Path) -> Result<bool> {
  let document = store::load_document(path)?;
  let report = validate::validate(&document, &config.validation);
  report.render();
  Ok(report.is_passed())
}
