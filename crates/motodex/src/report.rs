//! Human-readable catalog report
//!
//! Renders [`crate::analysis`] results and a fixed battery of example
//! queries to stdout.

use colored::*;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::analysis::{self, Share};
use crate::console;
use crate::query::{self, CcRange, Query};
use crate::record::{with_thousands, Catalog, Record};
use crate::tables::{MarketCategory, JAPANESE_BRANDS};

/// Records listed under each example query before the count line
pub const LISTING_LIMIT: usize = 5;
/// Random samples shown per era bucket
pub const ERA_SAMPLES: usize = 2;
/// Features quoted per record in the detail view
pub const FEATURE_HIGHLIGHTS: usize = 3;

pub struct Example<'a> {
  pub title: &'static str,
  pub hits: Vec<&'a Record>,
}

/// The example query battery, in presentation order
pub fn example_queries(records: &[Record]) -> Vec<Example<'_>> {
  let student = MarketCategory::EntryLevel.target_audience();

  vec![
    Example { title: "SYM models", hits: query::by_brand(records, "SYM") },
    Example {
      title: "Motorcycles 125cc and under",
      hits: query::by_displacement(records, CcRange::at_most(125)),
    },
    Example {
      title: "Motorcycles 150cc and over",
      hits: query::by_displacement(records, CcRange::at_least(150)),
    },
    Example {
      title: "Budget motorcycles from NT$ 70,000",
      hits: query::by_max_price(records, 70_000),
    },
    Example {
      title: "Entry-level scooters for students (< NT$ 80,000)",
      hits: query::by_audience(records, student)
        .into_iter()
        .filter(|r| r.vehicle_type.contains("Scooter") && r.price_range.high < 80_000)
        .collect(),
    },
    Example { title: "Electric vehicles", hits: query::electric_only(records) },
    Example {
      title: "Heavy bikes (300cc+)",
      hits: query::by_displacement(records, CcRange::at_least(300)),
    },
    Example { title: "Latest models (2024+)", hits: query::by_min_year(records, 2024) },
    Example {
      title: "Sport bikes from Japanese brands",
      hits: query::by_type(records, "sport")
        .into_iter()
        .filter(|r| JAPANESE_BRANDS.contains(&r.brand.as_str()))
        .collect(),
    },
    Example {
      title: "Affordable YAMAHA scooters from NT$ 100,000",
      hits: Query::new().brand("YAMAHA").vehicle_type("scooter").max_price(100_000).apply(records),
    },
    Example {
      title: "Latest electric vehicles (2023+)",
      hits: Query::new().electric().min_year(2023).apply(records),
    },
    Example {
      title: "Currently available models (2022+)",
      hits: Query::new().availability("Available").min_year(2022).apply(records),
    },
  ]
}

/// One-line listing entry; the year is appended unless the model name already ends with it
pub fn summary_line(record: &Record) -> String {
  let year = record
    .year()
    .map(|y| format!(" ({y})"))
    .filter(|suffix| !record.model.ends_with(suffix.trim_start()))
    .unwrap_or_default();
  format!(
    "{}{} - {} - {}",
    record.display_name(),
    year,
    record.engine.displacement,
    record.price_range
  )
}

/// Up to `count` of the record's features in random order
pub fn feature_highlights<'a, R: Rng + ?Sized>(
  record: &'a Record,
  count: usize,
  rng: &mut R,
) -> Vec<&'a str> {
  record.features.choose_multiple(rng, count).map(String::as_str).collect()
}

pub fn print_listing(records: &[&Record], limit: usize) {
  for record in records.iter().take(limit) {
    println!("  • {}", summary_line(record));
  }
  if records.len() > limit {
    println!("  {}", format!("... and {} more", records.len() - limit).dimmed());
  }
}

fn print_shares(title: &str, shares: &[Share], unit: &str) {
  console::heading(title);
  for share in shares {
    println!("  {}: {} {unit} ({:.1}%)", share.label, share.count, share.percent);
  }
}

fn print_counts(title: &str, counts: &[(&str, usize)]) {
  console::heading(title);
  for (label, count) in counts {
    println!("  {label}: {count} entries");
  }
}

fn print_detail<R: Rng + ?Sized>(index: usize, record: &Record, rng: &mut R) {
  println!("{}. {}", index + 1, record.display_name().bold());
  if let Some(english) = &record.model_english {
    println!("   English name: {english}");
  }
  println!("   Type: {}", record.vehicle_type);
  println!("   Engine: {} {}", record.engine.displacement, record.engine.architecture);
  println!("   Power: {}", record.engine.power);
  if let Some(torque) = record.engine.torque {
    println!("   Torque: {torque}");
  }
  println!("   Price: {}", record.price_range);
  if let (Some(battery), Some(range)) = (record.battery_capacity, record.range) {
    println!("   Battery: {battery}, Range: {range}");
  }
  println!("   Features: {}", feature_highlights(record, FEATURE_HIGHLIGHTS, rng).join(", "));
  println!();
}

/// Prints the full report for `catalog`
pub fn render<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) {
  let records = &catalog.motorcycles;

  console::announce("=== Taiwan Motorcycle Database Analysis ===");
  println!("Total motorcycles: {}", catalog.len());
  println!("Database last updated: {}", catalog.last_updated);
  println!("Schema version: {}", catalog.schema_version);
  if let Some((lo, hi)) = analysis::year_span(records) {
    println!("Model years: {lo} - {hi}");
  }
  if let Some((low, high)) = analysis::price_extent(records) {
    println!("Price span: NT$ {} - NT$ {}", with_thousands(low), with_thousands(high));
  }

  print_shares("Brand Distribution", &analysis::by_brand(records), "models");
  print_counts("Brand Groups", &analysis::by_brand_group(records));
  print_shares("Vehicle Type Distribution", &analysis::by_type(records), "models");
  print_shares("Availability", &analysis::by_availability(records), "models");
  print_shares("Market Categories", &analysis::by_category(records), "models");
  print_shares("Target Audiences", &analysis::by_audience(records), "models");

  console::heading("Model Years");
  for (year, count) in analysis::by_year(records) {
    println!("  {year}: {count} models");
  }
  print_shares("Decades", &analysis::by_decade(records), "models");

  console::heading("Eras");
  for era in analysis::era_samples(records, ERA_SAMPLES, rng) {
    println!("  {}: {} models", era.name, era.total);
    for record in era.samples {
      println!("    - {}", summary_line(record));
    }
  }

  console::heading("Displacement Statistics (Gas engines)");
  match analysis::displacement_stats(records) {
    Some(stats) => {
      println!("  Minimum: {}cc", stats.min);
      println!("  Maximum: {}cc", stats.max);
      println!("  Average: {:.1}cc", stats.average);
      if stats.electric > 0 {
        println!("  Electric motorcycles: {}", stats.electric);
      }
    }
    None => println!("  No combustion engines"),
  }
  print_counts("Displacement Classes", &analysis::displacement_classes(records));
  print_counts("Price Bands", &analysis::price_bands(records));

  println!();
  console::announce("=== Example Queries ===");
  for (i, example) in example_queries(records).iter().enumerate() {
    println!("{}. {}:", i + 1, example.title);
    print_listing(&example.hits, LISTING_LIMIT);
    println!("  Total found: {}", example.hits.len());
    println!();
  }

  console::announce("=== Detailed Examples ===");
  for (i, record) in records.iter().take(3).enumerate() {
    print_detail(i, record, rng);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{Displacement, Engine, Power, PriceRange};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn bike(brand: &str, kind: &str, cc: Option<u32>, high: u64, audience: &str) -> Record {
    Record {
      brand: brand.to_string(),
      model: "Test".to_string(),
      model_english: None,
      model_year: Some(2024),
      vehicle_type: kind.to_string(),
      engine: Engine {
        displacement: cc.map_or(Displacement::Electric, Displacement::Cc),
        architecture: "Single".to_string(),
        power: Power::Combustion { hp: 10.0 },
        torque: None,
      },
      features: vec!["ABS".to_string(), "LED".to_string()],
      price_range: PriceRange { low: high - 5_000, high },
      fuel_efficiency: None,
      weight: None,
      seat_height: None,
      availability: None,
      category: None,
      target_audience: Some(audience.to_string()),
      battery_capacity: None,
      range: None,
    }
  }

  #[test]
  fn test_example_battery_counts() {
    let mut discontinued = bike("HONDA", "Sport Bike", Some(600), 400_000, "運動騎士");
    discontinued.availability = Some("Discontinued".to_string());
    let records = vec![
      bike("SYM", "Urban Scooter", Some(125), 60_000, "學生族群"),
      discontinued,
      bike("YAMAHA", "Sport Scooter", Some(155), 95_000, "上班族通勤"),
      bike("GOGORO", "Electric Scooter", None, 120_000, "環保意識"),
    ];
    let records: Vec<Record> = records
      .into_iter()
      .map(|mut r| {
        if r.availability.is_none() {
          r.availability = Some("Available".to_string());
        }
        r
      })
      .collect();
    let examples = example_queries(&records);
    let count = |title: &str| examples.iter().find(|e| e.title == title).unwrap().hits.len();

    assert_eq!(examples.len(), 12);
    assert_eq!(count("SYM models"), 1);
    assert_eq!(count("Motorcycles 125cc and under"), 1);
    assert_eq!(count("Motorcycles 150cc and over"), 2);
    assert_eq!(count("Entry-level scooters for students (< NT$ 80,000)"), 1);
    assert_eq!(count("Sport bikes from Japanese brands"), 2);
    assert_eq!(count("Affordable YAMAHA scooters from NT$ 100,000"), 1);
    assert_eq!(count("Latest electric vehicles (2023+)"), 1);
    assert_eq!(count("Currently available models (2022+)"), 3);
  }

  #[test]
  fn test_feature_highlights_capped_at_feature_count() {
    let record = bike("SYM", "Urban Scooter", Some(125), 60_000, "學生族群");
    let mut rng = StdRng::seed_from_u64(3);
    let picked = feature_highlights(&record, 10, &mut rng);
    assert_eq!(picked.len(), 2);
  }

  #[test]
  fn test_summary_line() {
    let record = bike("SYM", "Urban Scooter", Some(125), 60_000, "學生族群");
    assert_eq!(summary_line(&record), "SYM Test (2024) - 125cc - NT$ 55,000 - 60,000");
  }

  #[test]
  fn test_summary_line_keeps_single_year_when_model_carries_it() {
    let mut record = bike("SYM", "Urban Scooter", Some(125), 60_000, "學生族群");
    record.model = "Test (2024)".to_string();
    assert_eq!(summary_line(&record), "SYM Test (2024) - 125cc - NT$ 55,000 - 60,000");

    record.model = "Test (2019)".to_string();
    assert_eq!(summary_line(&record), "SYM Test (2019) (2024) - 125cc - NT$ 55,000 - 60,000");
  }
}
