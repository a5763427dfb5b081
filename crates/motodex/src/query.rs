//! Filters over a record sequence
//!
//! Every filter is pure and order-preserving: it returns the records that
//! satisfy its predicate in the order they appear in the input.
//!
//! Electric records have no cc figure. A displacement filter with any bound
//! set excludes them; with no bounds at all it keeps every record.

use crate::record::Record;

fn brand_is(record: &Record, brand: &str) -> bool {
  record.brand.to_lowercase() == brand.to_lowercase()
}

fn type_contains(record: &Record, needle: &str) -> bool {
  record.vehicle_type.to_lowercase().contains(&needle.to_lowercase())
}

fn priced_within(record: &Record, ceiling: u64) -> bool {
  record.price_range.low <= ceiling
}

fn built_since(record: &Record, min_year: u16) -> bool {
  record.year().is_some_and(|y| y >= min_year)
}

fn field_is(field: Option<&str>, expected: &str) -> bool {
  field == Some(expected)
}

/// Records whose brand equals `brand`, ignoring case
pub fn by_brand<'a>(records: &'a [Record], brand: &str) -> Vec<&'a Record> {
  records.iter().filter(|r| brand_is(r, brand)).collect()
}

/// Inclusive displacement bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CcRange {
  pub min: Option<u32>,
  pub max: Option<u32>,
}

impl CcRange {
  pub fn at_least(min: u32) -> Self {
    Self { min: Some(min), max: None }
  }

  pub fn at_most(max: u32) -> Self {
    Self { min: None, max: Some(max) }
  }

  pub fn between(min: u32, max: u32) -> Self {
    Self { min: Some(min), max: Some(max) }
  }

  pub fn is_unbounded(&self) -> bool {
    self.min.is_none() && self.max.is_none()
  }

  pub fn matches(&self, record: &Record) -> bool {
    if self.is_unbounded() {
      return true;
    }
    match record.cc() {
      Some(cc) => {
        self.min.map_or(true, |min| cc >= min) && self.max.map_or(true, |max| cc <= max)
      }
      None => false,
    }
  }
}

pub fn by_displacement<'a>(records: &'a [Record], range: CcRange) -> Vec<&'a Record> {
  records.iter().filter(|r| range.matches(r)).collect()
}

/// Records whose type contains `needle`, ignoring case
pub fn by_type<'a>(records: &'a [Record], needle: &str) -> Vec<&'a Record> {
  records.iter().filter(|r| type_contains(r, needle)).collect()
}

/// Records whose quoted lower bound is at or below `ceiling`
pub fn by_max_price<'a>(records: &'a [Record], ceiling: u64) -> Vec<&'a Record> {
  records.iter().filter(|r| priced_within(r, ceiling)).collect()
}

/// Records from `min_year` onward; records with no resolvable year are dropped
pub fn by_min_year<'a>(records: &'a [Record], min_year: u16) -> Vec<&'a Record> {
  records.iter().filter(|r| built_since(r, min_year)).collect()
}

pub fn by_category<'a>(records: &'a [Record], category: &str) -> Vec<&'a Record> {
  records.iter().filter(|r| field_is(r.category.as_deref(), category)).collect()
}

pub fn by_audience<'a>(records: &'a [Record], audience: &str) -> Vec<&'a Record> {
  records.iter().filter(|r| field_is(r.target_audience.as_deref(), audience)).collect()
}

/// Records with the given availability status, e.g. `"Available"`
pub fn by_availability<'a>(records: &'a [Record], status: &str) -> Vec<&'a Record> {
  records.iter().filter(|r| field_is(r.availability.as_deref(), status)).collect()
}

pub fn electric_only(records: &[Record]) -> Vec<&Record> {
  records.iter().filter(|r| r.is_electric()).collect()
}

/// Several criteria combined with AND
///
/// ```
/// use motodex::query::Query;
///
/// let query = Query::new().brand("YAMAHA").vehicle_type("scooter").max_price(100_000);
/// assert!(!query.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
  pub brand: Option<String>,
  pub vehicle_type: Option<String>,
  pub displacement: CcRange,
  pub max_price: Option<u64>,
  pub min_year: Option<u16>,
  pub category: Option<String>,
  pub availability: Option<String>,
  pub electric: bool,
}

impl Query {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn brand(mut self, brand: impl Into<String>) -> Self {
    self.brand = Some(brand.into());
    self
  }

  pub fn vehicle_type(mut self, needle: impl Into<String>) -> Self {
    self.vehicle_type = Some(needle.into());
    self
  }

  pub fn displacement(mut self, range: CcRange) -> Self {
    self.displacement = range;
    self
  }

  pub fn max_price(mut self, ceiling: u64) -> Self {
    self.max_price = Some(ceiling);
    self
  }

  pub fn min_year(mut self, year: u16) -> Self {
    self.min_year = Some(year);
    self
  }

  pub fn category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn availability(mut self, status: impl Into<String>) -> Self {
    self.availability = Some(status.into());
    self
  }

  pub fn electric(mut self) -> Self {
    self.electric = true;
    self
  }

  /// True when no criterion is set
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  pub fn matches(&self, record: &Record) -> bool {
    self.brand.as_deref().map_or(true, |b| brand_is(record, b))
      && self.vehicle_type.as_deref().map_or(true, |t| type_contains(record, t))
      && self.displacement.matches(record)
      && self.max_price.map_or(true, |ceiling| priced_within(record, ceiling))
      && self.min_year.map_or(true, |year| built_since(record, year))
      && self.category.as_deref().map_or(true, |c| field_is(record.category.as_deref(), c))
      && self
        .availability
        .as_deref()
        .map_or(true, |a| field_is(record.availability.as_deref(), a))
      && (!self.electric || record.is_electric())
  }

  pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
    records.iter().filter(|r| self.matches(r)).collect()
  }
}
