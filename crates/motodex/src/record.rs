//! Catalog document model
//!
//! Field values are typed in memory but persist as the human-readable strings
//! the catalog format has always used (`"125cc"`, `"NT$ 45,000 - 55,000"`,
//! `"9.8 hp"`...). Each typed field implements `Display`/`FromStr` over that
//! exact text so a write/load cycle reproduces the document byte for byte.

use chrono::NaiveDate;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::tables::VehicleType;

/// Schema revision written by this generator
pub const SCHEMA_VERSION: u32 = 3;

/// Persisted in place of a cc figure for electrically powered records
pub const ELECTRIC_SENTINEL: &str = "Electric Motor";
pub const ELECTRIC_FUEL_LABEL: &str = "Electric Vehicle";
pub const CURRENCY_PREFIX: &str = "NT$";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {field} from {input:?}")]
pub struct ParseFieldError {
  pub field: &'static str,
  pub input: String,
}

impl ParseFieldError {
  fn new(field: &'static str, input: &str) -> Self {
    Self { field, input: input.to_string() }
  }
}

/// Implements serde for a type through its `Display`/`FromStr` pair
macro_rules! serde_via_string {
  ($ty:ty) => {
    impl Serialize for $ty {
      fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
      }
    }

    impl<'de> Deserialize<'de> for $ty {
      fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
      }
    }
  };
}

/// Declares a numeric quantity persisted as `"<value> <unit>"`
macro_rules! unit_quantity {
  ($name:ident, $inner:ty, $unit:literal, $field:literal, $fmt:literal) => {
    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    pub struct $name(pub $inner);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, $fmt, self.0)?;
        write!(f, " {}", $unit)
      }
    }

    impl FromStr for $name {
      type Err = ParseFieldError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
          .strip_suffix($unit)
          .and_then(|n| n.trim().parse().ok())
          .map($name)
          .ok_or_else(|| ParseFieldError::new($field, s))
      }
    }

    serde_via_string!($name);
  };
}

unit_quantity!(Kilograms, u32, "kg", "weight", "{}");
unit_quantity!(Millimetres, u32, "mm", "seat height", "{}");
unit_quantity!(Kilometres, u32, "km", "range", "{}");
unit_quantity!(KilowattHours, f64, "kWh", "battery capacity", "{:.1}");
unit_quantity!(NewtonMetres, f64, "Nm", "torque", "{:.1}");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displacement {
  Cc(u32),
  Electric,
}

impl Displacement {
  pub fn cc(self) -> Option<u32> {
    match self {
      Displacement::Cc(cc) => Some(cc),
      Displacement::Electric => None,
    }
  }

  pub fn is_electric(self) -> bool {
    self == Displacement::Electric
  }
}

impl fmt::Display for Displacement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Displacement::Cc(cc) => write!(f, "{cc}cc"),
      Displacement::Electric => f.write_str(ELECTRIC_SENTINEL),
    }
  }
}

impl FromStr for Displacement {
  type Err = ParseFieldError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed == ELECTRIC_SENTINEL {
      return Ok(Displacement::Electric);
    }
    trimmed
      .strip_suffix("cc")
      .and_then(|n| n.trim().parse().ok())
      .map(Displacement::Cc)
      .ok_or_else(|| ParseFieldError::new("displacement", s))
  }
}

serde_via_string!(Displacement);

/// Rated output; electric motors carry both kW and the derived hp figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Power {
  Combustion { hp: f64 },
  Electric { kw: f64, hp: f64 },
}

impl Power {
  pub fn hp(self) -> f64 {
    match self {
      Power::Combustion { hp } | Power::Electric { hp, .. } => hp,
    }
  }
}

impl fmt::Display for Power {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Power::Combustion { hp } => write!(f, "{hp:.1} hp"),
      Power::Electric { kw, hp } => write!(f, "{kw:.1} kW ({hp:.1} hp)"),
    }
  }
}

impl FromStr for Power {
  type Err = ParseFieldError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = || ParseFieldError::new("power", s);
    let trimmed = s.trim();

    if let Some((kw, rest)) = trimmed.split_once(" kW (") {
      let hp = rest.strip_suffix(" hp)").ok_or_else(err)?;
      return Ok(Power::Electric {
        kw: kw.trim().parse().map_err(|_| err())?,
        hp: hp.trim().parse().map_err(|_| err())?,
      });
    }

    trimmed
      .strip_suffix("hp")
      .and_then(|n| n.trim().parse().ok())
      .map(|hp| Power::Combustion { hp })
      .ok_or_else(err)
  }
}

serde_via_string!(Power);

/// Inclusive NT$ interval quoted for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
  pub low: u64,
  pub high: u64,
}

impl PriceRange {
  pub fn midpoint(self) -> f64 {
    (self.low + self.high) as f64 / 2.0
  }
}

impl fmt::Display for PriceRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{CURRENCY_PREFIX} {} - {}",
      with_thousands(self.low),
      with_thousands(self.high)
    )
  }
}

fn price_numbers() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\d[\d,]*").expect("valid price pattern"))
}

impl FromStr for PriceRange {
  type Err = ParseFieldError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let numbers: Vec<u64> = price_numbers()
      .find_iter(s)
      .filter_map(|m| m.as_str().replace(',', "").parse().ok())
      .take(2)
      .collect();

    match numbers.as_slice() {
      [low, high] => Ok(PriceRange { low: *low, high: *high }),
      _ => Err(ParseFieldError::new("price range", s)),
    }
  }
}

serde_via_string!(PriceRange);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelEfficiency {
  KmPerLitre(f64),
  Electric,
}

impl fmt::Display for FuelEfficiency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FuelEfficiency::KmPerLitre(km) => write!(f, "{km:.1} km/L"),
      FuelEfficiency::Electric => f.write_str(ELECTRIC_FUEL_LABEL),
    }
  }
}

impl FromStr for FuelEfficiency {
  type Err = ParseFieldError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed == ELECTRIC_FUEL_LABEL {
      return Ok(FuelEfficiency::Electric);
    }
    trimmed
      .strip_suffix("km/L")
      .and_then(|n| n.trim().parse().ok())
      .map(FuelEfficiency::KmPerLitre)
      .ok_or_else(|| ParseFieldError::new("fuel efficiency", s))
  }
}

serde_via_string!(FuelEfficiency);

/// Formats an integer with comma thousands separators
pub fn with_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

/// Older documents stored the model year as a quoted string
mod model_year {
  use super::*;

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum YearRepr {
    Number(u16),
    Text(String),
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
    match Option::<YearRepr>::deserialize(deserializer)? {
      None => Ok(None),
      Some(YearRepr::Number(year)) => Ok(Some(year)),
      Some(YearRepr::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
  pub displacement: Displacement,
  #[serde(rename = "type")]
  pub architecture: String,
  pub power: Power,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub torque: Option<NewtonMetres>,
}

/// One motorcycle listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub brand: String,
  pub model: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model_english: Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "model_year::deserialize"
  )]
  pub model_year: Option<u16>,
  #[serde(rename = "type")]
  pub vehicle_type: String,
  pub engine: Engine,
  pub features: Vec<String>,
  pub price_range: PriceRange,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fuel_efficiency: Option<FuelEfficiency>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub weight: Option<Kilograms>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seat_height: Option<Millimetres>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub availability: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_audience: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub battery_capacity: Option<KilowattHours>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub range: Option<Kilometres>,
}

fn year_in_model() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\((\d{4})\)").expect("valid year pattern"))
}

impl Record {
  pub fn cc(&self) -> Option<u32> {
    self.engine.displacement.cc()
  }

  pub fn is_electric(&self) -> bool {
    self.engine.displacement.is_electric()
  }

  pub fn kind(&self) -> Option<VehicleType> {
    VehicleType::from_label(&self.vehicle_type)
  }

  /// Model year, falling back to a `(YYYY)` suffix in the model name
  pub fn year(&self) -> Option<u16> {
    self.model_year.or_else(|| {
      year_in_model()
        .captures(&self.model)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
    })
  }

  /// `"BRAND model"` as shown in listings
  pub fn display_name(&self) -> String {
    format!("{} {}", self.brand, self.model)
  }
}

fn legacy_schema_version() -> u32 {
  1
}

/// The persisted document: metadata plus the ordered record sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
  pub title: String,
  pub description: String,
  pub last_updated: NaiveDate,
  #[serde(default = "legacy_schema_version")]
  pub schema_version: u32,
  pub total_entries: usize,
  pub motorcycles: Vec<Record>,
}

impl Catalog {
  pub fn new(
    title: impl Into<String>,
    description: impl Into<String>,
    last_updated: NaiveDate,
    motorcycles: Vec<Record>,
  ) -> Self {
    Self {
      title: title.into(),
      description: description.into(),
      last_updated,
      schema_version: SCHEMA_VERSION,
      total_entries: motorcycles.len(),
      motorcycles,
    }
  }

  /// `total_entries` agrees with the record sequence
  pub fn is_consistent(&self) -> bool {
    self.total_entries == self.motorcycles.len()
  }

  pub fn len(&self) -> usize {
    self.motorcycles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.motorcycles.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_record() -> Record {
    Record {
      brand: "SYM".to_string(),
      model: "迪爵125 ABS".to_string(),
      model_english: Some("迪爵125 ABS".to_string()),
      model_year: Some(2023),
      vehicle_type: "Urban Scooter".to_string(),
      engine: Engine {
        displacement: Displacement::Cc(124),
        architecture: "4-stroke, air-cooled, single-cylinder".to_string(),
        power: Power::Combustion { hp: 8.1 },
        torque: Some(NewtonMetres(9.4)),
      },
      features: vec!["LED尾燈".to_string(), "Smart key".to_string()],
      price_range: PriceRange { low: 58_500, high: 71_500 },
      fuel_efficiency: Some(FuelEfficiency::KmPerLitre(52.3)),
      weight: Some(Kilograms(112)),
      seat_height: Some(Millimetres(765)),
      availability: Some("Available".to_string()),
      category: Some("Entry Level".to_string()),
      target_audience: Some("學生族群".to_string()),
      battery_capacity: None,
      range: None,
    }
  }

  #[test]
  fn test_with_thousands() {
    assert_eq!(with_thousands(0), "0");
    assert_eq!(with_thousands(999), "999");
    assert_eq!(with_thousands(1_000), "1,000");
    assert_eq!(with_thousands(65_000), "65,000");
    assert_eq!(with_thousands(1_200_000), "1,200,000");
  }

  #[test]
  fn test_price_range_text() {
    let price = PriceRange { low: 47_500, high: 52_500 };
    assert_eq!(price.to_string(), "NT$ 47,500 - 52,500");
    assert_eq!("NT$ 47,500 - 52,500".parse::<PriceRange>().unwrap(), price);
    assert!("call for price".parse::<PriceRange>().is_err());
  }

  #[test]
  fn test_displacement_text() {
    assert_eq!("125cc".parse::<Displacement>().unwrap(), Displacement::Cc(125));
    assert_eq!(ELECTRIC_SENTINEL.parse::<Displacement>().unwrap(), Displacement::Electric);
    assert!("big".parse::<Displacement>().is_err());
    assert_eq!(Displacement::Cc(50).to_string(), "50cc");
  }

  #[test]
  fn test_power_text() {
    assert_eq!("12.5 hp".parse::<Power>().unwrap(), Power::Combustion { hp: 12.5 });
    let electric: Power = "5.2 kW (7.0 hp)".parse().unwrap();
    assert_eq!(electric, Power::Electric { kw: 5.2, hp: 7.0 });
    assert_eq!(electric.to_string(), "5.2 kW (7.0 hp)");
    assert_eq!(electric.hp(), 7.0);
  }

  #[test]
  fn test_units_text() {
    assert_eq!("112 kg".parse::<Kilograms>().unwrap(), Kilograms(112));
    assert_eq!(KilowattHours(2.0).to_string(), "2.0 kWh");
    assert_eq!("Electric Vehicle".parse::<FuelEfficiency>().unwrap(), FuelEfficiency::Electric);
    assert!("112 lb".parse::<Kilograms>().is_err());
  }

  #[test]
  fn test_record_json_keeps_wire_names_and_non_ascii() {
    let json = serde_json::to_string(&sample_record()).unwrap();
    assert!(json.contains("\"type\":\"Urban Scooter\""));
    assert!(json.contains("\"displacement\":\"124cc\""));
    assert!(json.contains("迪爵125 ABS"));
    assert!(!json.contains("battery_capacity"));

    let back: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample_record());
  }

  #[test]
  fn test_string_model_year_is_accepted() {
    let mut value = serde_json::to_value(sample_record()).unwrap();
    value["model_year"] = serde_json::json!("2021");
    let record: Record = serde_json::from_value(value).unwrap();
    assert_eq!(record.model_year, Some(2021));
  }

  #[test]
  fn test_year_falls_back_to_model_suffix() {
    let mut record = sample_record();
    record.model_year = None;
    record.model = "PCX 150 ABS (2021)".to_string();
    assert_eq!(record.year(), Some(2021));

    record.model = "PCX 150".to_string();
    assert_eq!(record.year(), None);
  }

  #[test]
  fn test_catalog_counts_its_records() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let catalog = Catalog::new("t", "d", date, vec![sample_record(), sample_record()]);
    assert_eq!(catalog.total_entries, 2);
    assert_eq!(catalog.schema_version, SCHEMA_VERSION);
    assert!(catalog.is_consistent());
    assert_eq!(catalog.len(), 2);
    assert!(!catalog.is_empty());
    assert!(Catalog::new("t", "d", date, vec![]).is_empty());
  }
}
