//! Grades a catalog document against a [`ValidationRubric`]
//!
//! Works on untyped JSON rather than [`crate::record::Catalog`] so that a
//! document with missing or null fields can still be measured instead of
//! being rejected at decode time.

use colored::*;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::analysis::{distribution, DISPLACEMENT_CLASSES};
use crate::config::ValidationRubric;
use crate::record::{Displacement, PriceRange, ELECTRIC_SENTINEL};
use crate::tables::VehicleType;

/// Score at or above which a failing catalog still counts as partial
pub const PARTIAL_RATIO: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct Check {
  pub name: String,
  pub passed: bool,
  pub detail: String,
}

impl Check {
  fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
    Self { name: name.into(), passed, detail: detail.into() }
  }
}

/// A block of counts shown alongside the checks without affecting the score
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
  pub title: String,
  pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  Passed,
  Partial,
  Failed,
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Verdict::Passed => "PASSED",
      Verdict::Partial => "PARTIAL",
      Verdict::Failed => "FAILED",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
  pub total_entries: usize,
  pub checks: Vec<Check>,
  pub sections: Vec<Section>,
  pub pass_ratio: f64,
}

impl ValidationReport {
  pub fn passed_count(&self) -> usize {
    self.checks.iter().filter(|c| c.passed).count()
  }

  /// Passed checks over total checks, in `[0, 1]`
  pub fn score(&self) -> f64 {
    if self.checks.is_empty() {
      return 0.0;
    }
    self.passed_count() as f64 / self.checks.len() as f64
  }

  pub fn verdict(&self) -> Verdict {
    let score = self.score();
    if score >= self.pass_ratio {
      Verdict::Passed
    } else if score >= PARTIAL_RATIO {
      Verdict::Partial
    } else {
      Verdict::Failed
    }
  }

  pub fn is_passed(&self) -> bool {
    self.verdict() == Verdict::Passed
  }

  pub fn failures(&self) -> impl Iterator<Item = &Check> {
    self.checks.iter().filter(|c| !c.passed)
  }

  /// Prints checks, informational sections and the summary to stdout
  pub fn render(&self) {
    println!("{}", "=== Taiwan Motorcycle Database Validation ===".bold());
    println!("Total entries: {}", self.total_entries);
    println!();

    for check in &self.checks {
      let mark = if check.passed { "✓".green() } else { "✗".red() };
      println!("  {mark} {}: {}", check.name, check.detail);
    }

    for section in &self.sections {
      println!();
      println!("{}:", section.title.bold());
      for line in &section.lines {
        println!("  {line}");
      }
    }

    println!();
    println!("{}", "=== VALIDATION SUMMARY ===".bold());
    println!(
      "Validation Score: {}/{} ({:.1}%)",
      self.passed_count(),
      self.checks.len(),
      self.score() * 100.0
    );
    let verdict = match self.verdict() {
      Verdict::Passed => "Database validation PASSED! Ready for use.".green().bold(),
      Verdict::Partial => "Database validation partially passed. Some issues need attention.".yellow(),
      Verdict::Failed => "Database validation FAILED. Significant issues need fixing.".red().bold(),
    };
    println!("{verdict}");
  }
}

fn records(document: &Value) -> &[Value] {
  document.get("motorcycles").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn present(record: &Value, field: &str) -> bool {
  record.get(field).is_some_and(|v| !v.is_null())
}

fn text<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
  record.get(field).and_then(Value::as_str)
}

fn displacement(record: &Value) -> Option<Displacement> {
  record.get("engine").and_then(|e| text(e, "displacement")).and_then(|d| d.parse().ok())
}

fn is_electric(record: &Value) -> bool {
  record.get("engine").and_then(|e| text(e, "displacement")) == Some(ELECTRIC_SENTINEL)
}

/// Accepts both the integer and the legacy quoted form
fn model_year(record: &Value) -> Option<u16> {
  match record.get("model_year")? {
    Value::Number(n) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

fn coverage(count: usize, total: usize) -> f64 {
  if total == 0 {
    0.0
  } else {
    count as f64 / total as f64
  }
}

fn coverage_check(name: String, count: usize, total: usize, threshold: f64) -> Check {
  let ratio = coverage(count, total);
  Check::new(name, total > 0 && ratio >= threshold, format!("{:.1}% coverage", ratio * 100.0))
}

/// Runs every rubric check over `document`
///
/// A document without a `motorcycles` array is graded as having no records.
pub fn validate(document: &Value, rubric: &ValidationRubric) -> ValidationReport {
  let records = records(document);
  let total = records.len();
  let mut checks = Vec::new();

  checks.push(Check::new(
    "Total entries",
    total >= rubric.min_entries,
    format!("{total} (target {}+)", rubric.min_entries),
  ));

  let declared = document.get("total_entries").and_then(Value::as_u64);
  checks.push(Check::new(
    "Declared total",
    declared == Some(total as u64),
    match declared {
      Some(n) => format!("total_entries {n}, records {total}"),
      None => "total_entries missing".to_string(),
    },
  ));

  let mut brand_counts: HashMap<&str, usize> = HashMap::new();
  for brand in records.iter().filter_map(|r| text(r, "brand")) {
    *brand_counts.entry(brand).or_default() += 1;
  }
  for brand in &rubric.required_brands {
    let count = brand_counts.get(brand.as_str()).copied().unwrap_or(0);
    let detail = if count > 0 { format!("{count} entries") } else { "missing".to_string() };
    checks.push(Check::new(format!("Brand {brand}"), count > 0, detail));
  }

  for field in &rubric.required_fields {
    let count = records.iter().filter(|r| present(r, field)).count();
    checks.push(coverage_check(field.clone(), count, total, rubric.coverage_threshold));
  }

  for field in &rubric.required_engine_fields {
    let count =
      records.iter().filter(|r| r.get("engine").is_some_and(|e| present(e, field))).count();
    checks.push(coverage_check(format!("engine.{field}"), count, total, rubric.coverage_threshold));
  }

  let years: BTreeSet<u16> = records.iter().filter_map(model_year).collect();
  let missing: Vec<String> =
    rubric.year_range.iter().filter(|y| !years.contains(y)).map(|y| y.to_string()).collect();
  checks.push(Check::new(
    format!("Years {}-{}", rubric.year_range.start, rubric.year_range.end),
    missing.is_empty(),
    if missing.is_empty() {
      match (years.first(), years.last()) {
        (Some(lo), Some(hi)) => format!("covered, catalog spans {lo}-{hi}"),
        _ => "covered".to_string(),
      }
    } else {
      format!("missing {}", missing.join(", "))
    },
  ));

  let prices: Vec<PriceRange> =
    records.iter().filter_map(|r| text(r, "price_range")).filter_map(|p| p.parse().ok()).collect();
  let cheapest = prices.iter().map(|p| p.low.min(p.high)).min();
  let dearest = prices.iter().map(|p| p.low.max(p.high)).max();
  checks.push(Check::new(
    "Entry level price band",
    cheapest.is_some_and(|p| p <= rubric.entry_price_ceiling),
    match cheapest {
      Some(p) => format!("cheapest NT$ {p}, ceiling NT$ {}", rubric.entry_price_ceiling),
      None => "no parseable prices".to_string(),
    },
  ));
  checks.push(Check::new(
    "Premium price band",
    dearest.is_some_and(|p| p >= rubric.premium_price_floor),
    match dearest {
      Some(p) => format!("dearest NT$ {p}, floor NT$ {}", rubric.premium_price_floor),
      None => "no parseable prices".to_string(),
    },
  ));

  let electric: Vec<&Value> = records.iter().filter(|r| is_electric(r)).collect();
  let with_battery = electric.iter().filter(|r| present(r, "battery_capacity")).count();
  let with_range = electric.iter().filter(|r| present(r, "range")).count();
  checks.push(Check::new(
    "Electric specifications",
    with_battery == electric.len() && with_range == electric.len(),
    format!(
      "{} electric, {with_battery} with battery capacity, {with_range} with range",
      electric.len()
    ),
  ));

  ValidationReport {
    total_entries: total,
    checks,
    sections: sections(records),
    pass_ratio: rubric.pass_ratio,
  }
}

fn sections(records: &[Value]) -> Vec<Section> {
  let displacements: Vec<Option<Displacement>> = records.iter().map(displacement).collect();
  let classes = DISPLACEMENT_CLASSES
    .iter()
    .map(|(label, bounds)| {
      let count = displacements
        .iter()
        .filter(|d| match (bounds, d) {
          (Some((lo, hi)), Some(Displacement::Cc(cc))) => (*lo..=*hi).contains(cc),
          (None, Some(Displacement::Electric)) => true,
          _ => false,
        })
        .count();
      format!("{label}: {count} entries")
    })
    .collect();

  let mut type_counts: HashMap<&str, usize> = HashMap::new();
  for kind in records.iter().filter_map(|r| text(r, "type")) {
    *type_counts.entry(kind).or_default() += 1;
  }
  let types = VehicleType::ALL
    .iter()
    .map(|kind| {
      let count = type_counts.get(kind.label()).copied().unwrap_or(0);
      let mark = if count > 0 { "✓" } else { "✗" };
      format!("{mark} {}: {count}", kind.label())
    })
    .collect();

  let counted = |field: &str| -> Vec<String> {
    distribution(records.iter().filter_map(|r| text(r, field)))
      .into_iter()
      .map(|s| format!("{}: {}", s.label, s.count))
      .collect()
  };

  vec![
    Section { title: "Displacement Categories".to_string(), lines: classes },
    Section { title: "Vehicle Type Distribution".to_string(), lines: types },
    Section { title: "Market Categories".to_string(), lines: counted("category") },
    Section { title: "Target Audiences".to_string(), lines: counted("target_audience") },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Span;
  use serde_json::json;

  fn rubric() -> ValidationRubric {
    ValidationRubric {
      min_entries: 2,
      required_brands: vec!["SYM".to_string(), "GOGORO".to_string()],
      required_fields: vec!["brand".to_string(), "model_year".to_string(), "weight".to_string()],
      required_engine_fields: vec!["displacement".to_string(), "power".to_string()],
      coverage_threshold: 0.95,
      year_range: Span::new(2024, 2025),
      entry_price_ceiling: 80_000,
      premium_price_floor: 500_000,
      pass_ratio: 0.90,
    }
  }

  fn document() -> Value {
    json!({
      "title": "t",
      "total_entries": 2,
      "motorcycles": [
        {
          "brand": "SYM",
          "model_year": 2024,
          "weight": "110 kg",
          "type": "Urban Scooter",
          "engine": {"displacement": "125cc", "type": "Single", "power": "9.8 hp"},
          "price_range": "NT$ 60,000 - 70,000"
        },
        {
          "brand": "GOGORO",
          "model_year": "2025",
          "weight": "120 kg",
          "type": "Electric Scooter",
          "engine": {"displacement": "Electric Motor", "type": "Hub", "power": "7.6 kW (10.2 hp)"},
          "price_range": "NT$ 550,000 - 600,000",
          "battery_capacity": "1.7 kWh",
          "range": "100 km"
        }
      ]
    })
  }

  #[test]
  fn test_complete_document_scores_full_marks() {
    let report = validate(&document(), &rubric());
    assert!(report.failures().next().is_none(), "{:?}", report.failures().collect::<Vec<_>>());
    assert_eq!(report.score(), 1.0);
    assert_eq!(report.verdict(), Verdict::Passed);
    // 2 totals + 2 brands + 3 fields + 2 engine + years + 2 prices + electric
    assert_eq!(report.checks.len(), 13);
  }

  #[test]
  fn test_missing_fields_lower_coverage() {
    let mut doc = document();
    doc["motorcycles"][1]["weight"] = Value::Null;
    doc["motorcycles"][1].as_object_mut().unwrap().remove("range");

    let report = validate(&doc, &rubric());
    let failed: Vec<_> = report.failures().map(|c| c.name.as_str()).collect();
    assert_eq!(failed, ["weight", "Electric specifications"]);
    assert_eq!(report.verdict(), Verdict::Partial);
  }

  #[test]
  fn test_null_engine_field_counts_as_missing() {
    let mut doc = document();
    doc["motorcycles"][0]["engine"]["power"] = Value::Null;

    let report = validate(&doc, &rubric());
    let power = report.checks.iter().find(|c| c.name == "engine.power").unwrap();
    assert!(!power.passed);
    assert!(report.checks.iter().find(|c| c.name == "engine.displacement").unwrap().passed);
  }

  #[test]
  fn test_declared_total_mismatch_fails() {
    let mut doc = document();
    doc["total_entries"] = json!(5);
    let report = validate(&doc, &rubric());
    assert!(!report.checks.iter().find(|c| c.name == "Declared total").unwrap().passed);
  }

  #[test]
  fn test_year_gap_is_reported() {
    let mut rubric = rubric();
    rubric.year_range = Span::new(2023, 2025);
    let report = validate(&document(), &rubric);
    let years = report.checks.iter().find(|c| c.name.starts_with("Years")).unwrap();
    assert!(!years.passed);
    assert!(years.detail.contains("2023"));
  }

  #[test]
  fn test_document_without_records_fails() {
    let report = validate(&json!({"title": "empty"}), &rubric());
    assert_eq!(report.total_entries, 0);
    assert_eq!(report.verdict(), Verdict::Failed);
  }

  #[test]
  fn test_informational_sections() {
    let report = validate(&document(), &rubric());
    let classes = &report.sections[0];
    assert!(classes.lines.contains(&"125cc級距 (120-150cc): 1 entries".to_string()));
    assert!(classes.lines.contains(&"電動車: 1 entries".to_string()));

    let types = &report.sections[1];
    assert!(types.lines.contains(&"✓ Urban Scooter: 1".to_string()));
  }

  #[test]
  fn test_verdict_thresholds() {
    let report = |passed: usize, total: usize| ValidationReport {
      total_entries: 0,
      checks: (0..total).map(|i| Check::new(i.to_string(), i < passed, "")).collect(),
      sections: vec![],
      pass_ratio: 0.9,
    };
    assert_eq!(report(9, 10).verdict(), Verdict::Passed);
    assert_eq!(report(8, 10).verdict(), Verdict::Partial);
    assert_eq!(report(7, 10).verdict(), Verdict::Failed);
    assert_eq!(Verdict::Partial.to_string(), "PARTIAL");
  }
}
