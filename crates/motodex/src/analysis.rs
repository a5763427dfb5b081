//! Descriptive statistics over a record sequence
//!
//! Nothing here prints; [`crate::report`] renders these results.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

use crate::record::Record;
use crate::tables::{DOMESTIC_BRANDS, ELECTRIC_BRANDS, JAPANESE_BRANDS};

/// Named displacement classes; `None` marks the electric class
pub const DISPLACEMENT_CLASSES: &[(&str, Option<(u32, u32)>)] = &[
  ("50cc級距 (50-80cc)", Some((50, 80))),
  ("100cc級距 (90-110cc)", Some((90, 110))),
  ("125cc級距 (120-150cc)", Some((120, 150))),
  ("150cc級距 (150-180cc)", Some((150, 180))),
  ("200cc級距 (200-300cc)", Some((200, 300))),
  ("重機級距 (300cc+)", Some((300, 2000))),
  ("電動車", None),
];

/// Price bands matched against the quote midpoint, bounds inclusive
pub const PRICE_BANDS: &[(&str, f64, f64)] = &[
  ("Entry Level (< NT$ 80,000)", 0.0, 80_000.0),
  ("Commuter (NT$ 80,000 - 120,000)", 80_000.0, 120_000.0),
  ("Family (NT$ 120,000 - 200,000)", 120_000.0, 200_000.0),
  ("Sport/Premium (NT$ 200,000 - 500,000)", 200_000.0, 500_000.0),
  ("Heavy Bike (NT$ 500,000+)", 500_000.0, 2_000_000.0),
];

pub const ERAS: &[(&str, u16, u16)] = &[
  ("Early 2000s (2000-2005)", 2000, 2005),
  ("Mid 2000s (2006-2010)", 2006, 2010),
  ("Early 2010s (2011-2015)", 2011, 2015),
  ("Late 2010s (2016-2020)", 2016, 2020),
  ("Current Era (2021-2025)", 2021, 2025),
];

/// A label with its count and share of all labelled items
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
  pub label: String,
  pub count: usize,
  pub percent: f64,
}

/// Counts labels, most frequent first with ties broken by label
pub fn distribution<'a, I>(labels: I) -> Vec<Share>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut counts: HashMap<&str, usize> = HashMap::new();
  let mut total = 0usize;
  for label in labels {
    *counts.entry(label).or_default() += 1;
    total += 1;
  }

  let mut shares: Vec<Share> = counts
    .into_iter()
    .map(|(label, count)| Share {
      label: label.to_string(),
      count,
      percent: count as f64 * 100.0 / total as f64,
    })
    .collect();
  shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
  shares
}

pub fn by_brand(records: &[Record]) -> Vec<Share> {
  distribution(records.iter().map(|r| r.brand.as_str()))
}

pub fn by_type(records: &[Record]) -> Vec<Share> {
  distribution(records.iter().map(|r| r.vehicle_type.as_str()))
}

pub fn by_availability(records: &[Record]) -> Vec<Share> {
  distribution(records.iter().filter_map(|r| r.availability.as_deref()))
}

pub fn by_category(records: &[Record]) -> Vec<Share> {
  distribution(records.iter().filter_map(|r| r.category.as_deref()))
}

pub fn by_audience(records: &[Record]) -> Vec<Share> {
  distribution(records.iter().filter_map(|r| r.target_audience.as_deref()))
}

/// Record count per brand group; brands outside every group are counted as "Other"
pub fn by_brand_group(records: &[Record]) -> Vec<(&'static str, usize)> {
  let groups: [(&'static str, &[&str]); 3] = [
    ("Taiwanese", DOMESTIC_BRANDS),
    ("Japanese", JAPANESE_BRANDS),
    ("Electric", ELECTRIC_BRANDS),
  ];
  let mut counts: Vec<(&'static str, usize)> = groups.iter().map(|(name, _)| (*name, 0)).collect();
  let mut other = 0;

  for record in records {
    match groups.iter().position(|(_, brands)| brands.contains(&record.brand.as_str())) {
      Some(i) => counts[i].1 += 1,
      None => other += 1,
    }
  }
  if other > 0 {
    counts.push(("Other", other));
  }
  counts
}

/// Record count per model year, oldest first
pub fn by_year(records: &[Record]) -> Vec<(u16, usize)> {
  let mut years = BTreeMap::new();
  for year in records.iter().filter_map(Record::year) {
    *years.entry(year).or_insert(0usize) += 1;
  }
  years.into_iter().collect()
}

/// Record count per decade, oldest first, labelled `"2020s"`
pub fn by_decade(records: &[Record]) -> Vec<Share> {
  let mut decades = BTreeMap::new();
  let mut total = 0usize;
  for year in records.iter().filter_map(Record::year) {
    *decades.entry(year / 10 * 10).or_insert(0usize) += 1;
    total += 1;
  }
  decades
    .into_iter()
    .map(|(decade, count)| Share {
      label: format!("{decade}s"),
      count,
      percent: count as f64 * 100.0 / total as f64,
    })
    .collect()
}

pub fn year_span(records: &[Record]) -> Option<(u16, u16)> {
  let years = records.iter().filter_map(Record::year);
  let min = years.clone().min()?;
  let max = years.max()?;
  Some((min, max))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementStats {
  pub min: u32,
  pub max: u32,
  pub average: f64,
  pub combustion: usize,
  pub electric: usize,
}

/// `None` when the sequence has no combustion records
pub fn displacement_stats(records: &[Record]) -> Option<DisplacementStats> {
  let ccs: Vec<u32> = records.iter().filter_map(Record::cc).collect();
  let electric = records.iter().filter(|r| r.is_electric()).count();

  Some(DisplacementStats {
    min: *ccs.iter().min()?,
    max: *ccs.iter().max()?,
    average: ccs.iter().map(|&cc| cc as f64).sum::<f64>() / ccs.len() as f64,
    combustion: ccs.len(),
    electric,
  })
}

/// Count per [`DISPLACEMENT_CLASSES`] entry; classes may overlap at their edges
pub fn displacement_classes(records: &[Record]) -> Vec<(&'static str, usize)> {
  DISPLACEMENT_CLASSES
    .iter()
    .map(|(label, bounds)| {
      let count = records
        .iter()
        .filter(|r| match (bounds, r.cc()) {
          (Some((lo, hi)), Some(cc)) => (*lo..=*hi).contains(&cc),
          (None, None) => true,
          _ => false,
        })
        .count();
      (*label, count)
    })
    .collect()
}

/// Count per [`PRICE_BANDS`] entry by quote midpoint
pub fn price_bands(records: &[Record]) -> Vec<(&'static str, usize)> {
  PRICE_BANDS
    .iter()
    .map(|(label, lo, hi)| {
      let count = records
        .iter()
        .filter(|r| (*lo..=*hi).contains(&r.price_range.midpoint()))
        .count();
      (*label, count)
    })
    .collect()
}

/// Cheapest lower bound and dearest upper bound across all quotes
pub fn price_extent(records: &[Record]) -> Option<(u64, u64)> {
  let low = records.iter().map(|r| r.price_range.low).min()?;
  let high = records.iter().map(|r| r.price_range.high).max()?;
  Some((low, high))
}

#[derive(Debug, Clone)]
pub struct EraSample<'a> {
  pub name: &'static str,
  pub total: usize,
  pub samples: Vec<&'a Record>,
}

/// Up to `per_era` random records from each era; eras with no records are kept empty
pub fn era_samples<'a, R: Rng + ?Sized>(
  records: &'a [Record],
  per_era: usize,
  rng: &mut R,
) -> Vec<EraSample<'a>> {
  ERAS
    .iter()
    .map(|(name, start, end)| {
      let members: Vec<&Record> = records
        .iter()
        .filter(|r| r.year().is_some_and(|y| (*start..=*end).contains(&y)))
        .collect();
      let samples = members.choose_multiple(rng, per_era).copied().collect();
      EraSample { name, total: members.len(), samples }
    })
    .collect()
}
