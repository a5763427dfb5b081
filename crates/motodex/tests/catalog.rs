use chrono::NaiveDate;
use motodex::config::{BrandQuota, GeneratorConfig, ValidationRubric};
use motodex::generator::{generate, price_floor};
use motodex::query::{self, CcRange};
use motodex::record::Displacement;
use motodex::tables::{MarketCategory, VehicleType};
use motodex::{store, validate};
use tempfile::TempDir;

fn seeded(seed: u64) -> GeneratorConfig {
  GeneratorConfig { seed: Some(seed), ..GeneratorConfig::default() }
}

fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_default_catalog_has_configured_size() {
  let catalog = generate(&seeded(11), today());
  assert_eq!(catalog.len(), 2000);
  assert_eq!(catalog.total_entries, catalog.motorcycles.len());
}

#[test]
fn test_displacement_within_type_bounds() {
  let catalog = generate(&seeded(12), today());
  for record in &catalog.motorcycles {
    let kind = record.kind().expect("generated types are known labels");
    match (kind.spec().displacement, record.engine.displacement) {
      (Some((lo, hi)), Displacement::Cc(cc)) => {
        assert!((lo..=hi).contains(&cc), "{} {cc}cc outside {lo}-{hi}", record.model)
      }
      (None, Displacement::Electric) => {}
      other => panic!("displacement does not match type {kind:?}: {other:?}"),
    }
  }
}

#[test]
fn test_price_ranges_are_ordered_and_floored() {
  let config = seeded(13);
  let catalog = generate(&config, today());
  for record in &catalog.motorcycles {
    let price = record.price_range;
    assert!(price.high >= price.low);

    let category = record
      .category
      .as_deref()
      .and_then(MarketCategory::from_label)
      .expect("generated categories are known labels");
    assert!(price.low >= price_floor(category, config.price_spread), "{price} below floor");
  }
}

#[test]
fn test_brand_filter_returns_quota() {
  let config = seeded(14);
  let catalog = generate(&config, today());

  for quota in &config.brands {
    let hits = query::by_brand(&catalog.motorcycles, &quota.brand.to_lowercase());
    assert_eq!(hits.len(), quota.count, "{}", quota.brand);
    assert!(hits.iter().all(|r| r.brand.eq_ignore_ascii_case(&quota.brand)));
  }
}

#[test]
fn test_electric_records_carry_battery_and_range() {
  let catalog = generate(&seeded(15), today());
  let electric = query::electric_only(&catalog.motorcycles);
  assert!(!electric.is_empty());
  for record in electric {
    assert!(record.battery_capacity.is_some());
    assert!(record.range.is_some());
    assert_eq!(record.vehicle_type, VehicleType::ElectricScooter.label());
  }

  let bounded = query::by_displacement(&catalog.motorcycles, CcRange::at_least(50));
  assert!(bounded.iter().all(|r| !r.is_electric()));
}

#[test]
fn test_round_trip_preserves_every_field() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("catalog.json");

  let catalog = generate(&GeneratorConfig { year_suffix: true, ..seeded(16) }, today());
  store::save(&path, &catalog).unwrap();
  let loaded = store::load(&path).unwrap();

  assert_eq!(loaded.len(), catalog.len());
  assert_eq!(loaded, catalog);
  assert!(std::fs::read_to_string(&path).unwrap().contains("學生族群"));
}

#[test]
fn test_fresh_catalog_scores_full_marks() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("catalog.json");
  store::save(&path, &generate(&seeded(17), today())).unwrap();

  let document = store::load_document(&path).unwrap();
  let report = validate::validate(&document, &ValidationRubric::default());

  let failed: Vec<_> = report.failures().collect();
  assert!(failed.is_empty(), "{failed:?}");
  assert_eq!(report.score(), 1.0);
}

#[test]
fn test_small_quota_catalog_fails_size_check() {
  let config = GeneratorConfig {
    brands: vec![BrandQuota { brand: "SYM".to_string(), count: 5 }],
    ..seeded(18)
  };
  let catalog = generate(&config, today());
  assert_eq!(catalog.len(), 5);

  let document = serde_json::to_value(&catalog).unwrap();
  let report = validate::validate(&document, &ValidationRubric::default());
  assert!(!report.checks[0].passed);
  assert!(!report.is_passed());
}
