//! Synthetic record and catalog generation
//!
//! All randomness flows through a caller-supplied [`Rng`] so a fixed seed
//! reproduces a catalog exactly.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::record::{
  Catalog, Displacement, Engine, FuelEfficiency, Kilograms, Kilometres, KilowattHours,
  Millimetres, NewtonMetres, Power, PriceRange, Record,
};
use crate::tables::{
  brand_profile, BrandProfile, FeatureCategory, MarketCategory, VehicleType, BATTERY_KWH,
  COMMON_DISPLACEMENTS, DEFAULT_ENGINE, ELECTRIC_BASE_PRICE, ELECTRIC_KW, ELECTRIC_MOTORS,
  ELECTRIC_RANGE_KM, ENGINE_BUCKETS, HEAVY_BIKE_PREMIUM_CC, HEAVY_BIKE_PREMIUM_PRICE,
  HEAVY_BIKE_PREMIUM_PROBABILITY, KW_TO_HP, RAW_DISPLACEMENT_NAME_PROBABILITY, VARIANTS,
};

/// Used for brands missing from the brand table
static UNLISTED_BRAND: BrandProfile = BrandProfile {
  name: "",
  default_count: 0,
  price_multiplier: 1.0,
  lineup: &VehicleType::ALL,
  templates: &["{brand} {cc}"],
};

fn round1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

fn resolve_brand(name: &str) -> (&'static BrandProfile, String) {
  match brand_profile(name) {
    Some(profile) => (profile, profile.name.to_string()),
    None => (&UNLISTED_BRAND, name.to_string()),
  }
}

/// Picks a vehicle type from the brand's allow-list
pub fn pick_vehicle_type<R: Rng + ?Sized>(brand: &str, rng: &mut R) -> VehicleType {
  let (profile, _) = resolve_brand(brand);
  profile.lineup.choose(rng).copied().unwrap_or(VehicleType::Standard)
}

pub fn sample_displacement<R: Rng + ?Sized>(vehicle_type: VehicleType, rng: &mut R) -> Displacement {
  match vehicle_type.spec().displacement {
    Some((lo, hi)) => Displacement::Cc(rng.random_range(lo..=hi)),
    None => Displacement::Electric,
  }
}

pub fn calculate_power<R: Rng + ?Sized>(
  displacement: Displacement,
  vehicle_type: VehicleType,
  rng: &mut R,
) -> Power {
  match displacement {
    Displacement::Electric => {
      let kw = round1(rng.random_range(ELECTRIC_KW.0..=ELECTRIC_KW.1));
      Power::Electric { kw, hp: round1(kw * KW_TO_HP) }
    }
    Displacement::Cc(cc) => {
      let base = cc as f64 * vehicle_type.spec().power_multiplier;
      Power::Combustion { hp: round1(base * rng.random_range(0.85..=1.15)) }
    }
  }
}

pub fn calculate_torque<R: Rng + ?Sized>(power: Power, rng: &mut R) -> NewtonMetres {
  let nm = match power {
    Power::Electric { kw, .. } => kw * rng.random_range(8.0..=12.0),
    Power::Combustion { hp } => hp * rng.random_range(0.75..=0.95) * 1.36,
  };
  NewtonMetres(round1(nm))
}

pub fn engine_architecture<R: Rng + ?Sized>(displacement: Displacement, rng: &mut R) -> String {
  let choices: &[&str] = match displacement {
    Displacement::Electric => ELECTRIC_MOTORS,
    Displacement::Cc(cc) => ENGINE_BUCKETS
      .iter()
      .find(|((lo, hi), _)| (*lo..=*hi).contains(&cc))
      .map(|(_, engines)| *engines)
      .unwrap_or(&[DEFAULT_ENGINE]),
  };
  choices.choose(rng).copied().unwrap_or(DEFAULT_ENGINE).to_string()
}

pub fn market_category(displacement: Displacement, vehicle_type: VehicleType) -> MarketCategory {
  let cc = match displacement {
    Displacement::Electric => return MarketCategory::Electric,
    Displacement::Cc(cc) => cc,
  };
  if vehicle_type.is_electric() {
    return MarketCategory::Electric;
  }

  let entry_types = [VehicleType::UrbanScooter, VehicleType::ClassicScooter];
  let sport_types = [VehicleType::SportBike, VehicleType::SportScooter];

  if cc <= 125 && entry_types.contains(&vehicle_type) {
    MarketCategory::EntryLevel
  } else if cc <= 150 && vehicle_type.is_scooter() {
    MarketCategory::Commuter
  } else if cc <= 250 {
    MarketCategory::Family
  } else if cc <= 400 && sport_types.contains(&vehicle_type) {
    MarketCategory::Sport
  } else if cc > 400 {
    MarketCategory::HeavyBike
  } else {
    MarketCategory::Premium
  }
}

/// Lowest `low` bound a quote in this category can carry
pub fn price_floor(category: MarketCategory, spread: f64) -> u64 {
  (category.price_band().0 * (1.0 - spread)) as u64
}

pub fn calculate_price<R: Rng + ?Sized>(
  brand_multiplier: f64,
  displacement: Displacement,
  vehicle_type: VehicleType,
  category: MarketCategory,
  spread: f64,
  rng: &mut R,
) -> PriceRange {
  let base = match displacement {
    Displacement::Electric => rng.random_range(ELECTRIC_BASE_PRICE.0..=ELECTRIC_BASE_PRICE.1),
    Displacement::Cc(cc) => {
      let floor = match cc {
        0..=125 => 40_000.0,
        126..=250 => 80_000.0,
        251..=500 => 150_000.0,
        _ => 200_000.0,
      };
      (cc as f64 * rng.random_range(0.6..=1.2)).max(floor)
    }
  };

  let computed = base * brand_multiplier * vehicle_type.spec().price_multiplier;
  let (band_low, band_high) = category.price_band();

  let premium_heavy = category == MarketCategory::HeavyBike
    && displacement.cc().is_some_and(|cc| cc > HEAVY_BIKE_PREMIUM_CC)
    && rng.random_bool(HEAVY_BIKE_PREMIUM_PROBABILITY);

  let midpoint = if premium_heavy {
    rng.random_range(HEAVY_BIKE_PREMIUM_PRICE.0..=HEAVY_BIKE_PREMIUM_PRICE.1)
  } else {
    computed.clamp(band_low, band_high)
  };

  PriceRange {
    low: (midpoint * (1.0 - spread)) as u64,
    high: (midpoint * (1.0 + spread)) as u64,
  }
}

pub fn feature_category<R: Rng + ?Sized>(
  vehicle_type: VehicleType,
  electric_brand: bool,
  rng: &mut R,
) -> FeatureCategory {
  if vehicle_type.is_electric() || electric_brand {
    FeatureCategory::Electric
  } else if vehicle_type.is_scooter() {
    FeatureCategory::Scooter
  } else if vehicle_type == VehicleType::SportBike {
    FeatureCategory::Sport
  } else if vehicle_type == VehicleType::NakedBike {
    FeatureCategory::Naked
  } else if vehicle_type.label().contains("Classic") || vehicle_type.label().contains("Retro") {
    FeatureCategory::Classic
  } else {
    FeatureCategory::FALLBACK.choose(rng).copied().unwrap_or(FeatureCategory::Naked)
  }
}

/// Samples `min..=max` distinct features; never more than the pool holds
pub fn sample_features<R: Rng + ?Sized>(
  category: FeatureCategory,
  min: u32,
  max: u32,
  rng: &mut R,
) -> Vec<String> {
  let wanted = rng.random_range(min..=max) as usize;
  category.pool().choose_multiple(rng, wanted).map(|f| f.to_string()).collect()
}

/// Nearest entry of the common displacement list; earlier entries win ties
pub fn nearest_common_displacement(cc: u32) -> u32 {
  COMMON_DISPLACEMENTS.iter().copied().min_by_key(|c| c.abs_diff(cc)).unwrap_or(cc)
}

fn with_variant<R: Rng + ?Sized>(name: String, rng: &mut R) -> String {
  match VARIANTS.choose(rng).copied().unwrap_or("") {
    "" => name,
    variant => format!("{name} {variant}"),
  }
}

pub fn model_name<R: Rng + ?Sized>(
  profile: &BrandProfile,
  brand: &str,
  displacement: Displacement,
  year: Option<u16>,
  rng: &mut R,
) -> String {
  let template = profile.templates.choose(rng).copied().unwrap_or("{brand} {cc}");
  let template = template.replace("{brand}", brand);

  // Pure-electric lineups use fixed series names with no variant suffix
  let mut name = match displacement {
    Displacement::Electric if profile.is_electric_only() => template,
    Displacement::Electric => with_variant(template.replace("{cc}", "Electric"), rng),
    Displacement::Cc(cc) => {
      let token = if rng.random_bool(RAW_DISPLACEMENT_NAME_PROBABILITY) {
        cc
      } else {
        nearest_common_displacement(cc)
      };
      with_variant(template.replace("{cc}", &token.to_string()), rng)
    }
  };
  if let Some(year) = year {
    name.push_str(&format!(" ({year})"));
  }
  name
}

pub fn availability_status<R: Rng + ?Sized>(model_year: u16, rng: &mut R) -> &'static str {
  let choices: &[&'static str] = match model_year {
    y if y >= 2023 => &["Available"],
    y if y >= 2021 => &["Available", "Limited Availability"],
    _ => &["Limited Availability", "Discontinued"],
  };
  choices.choose(rng).copied().unwrap_or("Available")
}

pub fn weight_and_seat_height<R: Rng + ?Sized>(
  displacement: Displacement,
  vehicle_type: VehicleType,
  rng: &mut R,
) -> (Kilograms, Millimetres) {
  let ((w_lo, w_hi), (s_lo, s_hi)) = match displacement {
    Displacement::Electric => ((80, 120), (740, 780)),
    Displacement::Cc(cc) if vehicle_type.is_scooter() => match cc {
      0..=125 => ((90, 120), (750, 780)),
      126..=250 => ((140, 180), (760, 790)),
      _ => ((180, 250), (770, 810)),
    },
    Displacement::Cc(cc) => match cc {
      0..=300 => ((140, 180), (780, 820)),
      301..=600 => ((180, 220), (800, 840)),
      _ => ((200, 280), (820, 860)),
    },
  };
  (Kilograms(rng.random_range(w_lo..=w_hi)), Millimetres(rng.random_range(s_lo..=s_hi)))
}

pub fn fuel_efficiency<R: Rng + ?Sized>(vehicle_type: VehicleType, rng: &mut R) -> FuelEfficiency {
  match vehicle_type.spec().fuel_efficiency {
    Some((lo, hi)) => FuelEfficiency::KmPerLitre(round1(rng.random_range(lo..=hi))),
    None => FuelEfficiency::Electric,
  }
}

/// Builds one listing for `brand`
///
/// `vehicle_type` is expected to come from the brand's lineup
/// (see [`pick_vehicle_type`]); generation itself never fails.
pub fn generate_record<R: Rng + ?Sized>(
  brand: &str,
  vehicle_type: VehicleType,
  config: &GeneratorConfig,
  rng: &mut R,
) -> Record {
  let (profile, brand) = resolve_brand(brand);
  let vehicle_type =
    if profile.is_electric_only() { VehicleType::ElectricScooter } else { vehicle_type };

  let displacement = sample_displacement(vehicle_type, rng);
  let years = config.model_years;
  let model_year = rng.random_range(years.start..=years.end);

  let suffix_year = config.year_suffix.then_some(model_year);
  let model = model_name(profile, &brand, displacement, suffix_year, rng);
  let power = calculate_power(displacement, vehicle_type, rng);
  let torque = calculate_torque(power, rng);
  let architecture = engine_architecture(displacement, rng);
  let category = market_category(displacement, vehicle_type);
  let price_range = calculate_price(
    profile.price_multiplier,
    displacement,
    vehicle_type,
    category,
    config.price_spread,
    rng,
  );
  let features = sample_features(
    feature_category(vehicle_type, profile.is_electric_only(), rng),
    config.features_per_record.start,
    config.features_per_record.end,
    rng,
  );
  let availability = availability_status(model_year, rng);
  let (weight, seat_height) = weight_and_seat_height(displacement, vehicle_type, rng);
  let fuel = fuel_efficiency(vehicle_type, rng);

  let (battery_capacity, range) = if displacement.is_electric() {
    let km = rng.random_range(ELECTRIC_RANGE_KM.0..=ELECTRIC_RANGE_KM.1);
    let kwh = round1(rng.random_range(BATTERY_KWH.0..=BATTERY_KWH.1));
    (Some(KilowattHours(kwh)), Some(Kilometres(km)))
  } else {
    (None, None)
  };

  Record {
    brand,
    model_english: Some(model.clone()),
    model,
    model_year: Some(model_year),
    vehicle_type: vehicle_type.label().to_string(),
    engine: Engine { displacement, architecture, power, torque: Some(torque) },
    features,
    price_range,
    fuel_efficiency: Some(fuel),
    weight: Some(weight),
    seat_height: Some(seat_height),
    availability: Some(availability.to_string()),
    category: Some(category.label().to_string()),
    target_audience: Some(category.target_audience().to_string()),
    battery_capacity,
    range,
  }
}

/// Walks the brand quota table and wraps the records in catalog metadata
pub fn generate_catalog<R: Rng + ?Sized>(
  config: &GeneratorConfig,
  last_updated: NaiveDate,
  rng: &mut R,
) -> Catalog {
  info!(target_entries = config.target_entries(), "generating catalog");

  let mut records = Vec::with_capacity(config.target_entries());
  for quota in &config.brands {
    debug!(brand = %quota.brand, count = quota.count, "generating brand entries");
    for _ in 0..quota.count {
      let vehicle_type = pick_vehicle_type(&quota.brand, rng);
      records.push(generate_record(&quota.brand, vehicle_type, config, rng));
    }
  }

  Catalog::new(config.title.clone(), config.description.clone(), last_updated, records)
}

/// Generates with the configured seed, or OS entropy when none is set
pub fn generate(config: &GeneratorConfig, last_updated: NaiveDate) -> Catalog {
  let mut rng = match config.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };
  generate_catalog(config, last_updated, &mut rng)
}
