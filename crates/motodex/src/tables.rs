//! Constant tables driving record generation
//!
//! Every brand, vehicle type, engine architecture, feature pool and market
//! category the generator knows about lives here. The generator only ever
//! reads these tables; tuning the catalog means editing this module or
//! overriding brand counts through [`crate::config::GeneratorConfig`].

/// Conversion factor used when presenting electric motor output in hp
pub const KW_TO_HP: f64 = 1.34;

/// Electric motor output band in kW
pub const ELECTRIC_KW: (f64, f64) = (3.0, 15.0);
/// Electric range band in km
pub const ELECTRIC_RANGE_KM: (u32, u32) = (80, 200);
/// Battery capacity band in kWh
pub const BATTERY_KWH: (f64, f64) = (1.2, 3.8);
/// Base price band for electric vehicles, before multipliers
pub const ELECTRIC_BASE_PRICE: (f64, f64) = (70_000.0, 200_000.0);

/// Probability that a model name uses the raw sampled displacement
pub const RAW_DISPLACEMENT_NAME_PROBABILITY: f64 = 0.7;

pub const COMMON_DISPLACEMENTS: &[u32] =
  &[50, 80, 100, 110, 115, 125, 150, 158, 200, 250, 300, 400, 500, 550, 650];

pub const VARIANTS: &[&str] =
  &["", "ABS", "CBS", "Limited", "Sport", "Premium", "Deluxe", "SE", "X", "S", "R"];

pub const DEFAULT_ENGINE: &str = "4-stroke, liquid-cooled";

pub const ELECTRIC_MOTORS: &[&str] =
  &["Permanent magnet synchronous motor", "Brushless DC motor"];

/// Engine architectures keyed by inclusive displacement bucket; first match wins
pub const ENGINE_BUCKETS: &[((u32, u32), &[&str])] = &[
  ((50, 125), &["4-stroke, air-cooled, single-cylinder", "4-stroke, liquid-cooled, single-cylinder"]),
  ((125, 250), &["4-stroke, air-cooled, single-cylinder", "4-stroke, liquid-cooled, single-cylinder"]),
  ((250, 500), &["4-stroke, liquid-cooled, single-cylinder", "4-stroke, liquid-cooled, parallel-twin"]),
  ((500, 800), &["4-stroke, liquid-cooled, parallel-twin", "4-stroke, liquid-cooled, inline-4"]),
  ((800, 1500), &["4-stroke, liquid-cooled, inline-4", "4-stroke, liquid-cooled, V-twin"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleType {
  UrbanScooter,
  SportScooter,
  MaxiScooter,
  ClassicScooter,
  RetroScooter,
  NakedBike,
  SportBike,
  Standard,
  Adventure,
  ElectricScooter,
}

/// Per-type generation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeSpec {
  /// Inclusive cc bounds; `None` for electric types
  pub displacement: Option<(u32, u32)>,
  pub power_multiplier: f64,
  /// km/L band; `None` for electric types
  pub fuel_efficiency: Option<(f64, f64)>,
  pub price_multiplier: f64,
}

impl VehicleType {
  pub const ALL: [VehicleType; 10] = [
    VehicleType::UrbanScooter,
    VehicleType::SportScooter,
    VehicleType::MaxiScooter,
    VehicleType::ClassicScooter,
    VehicleType::RetroScooter,
    VehicleType::NakedBike,
    VehicleType::SportBike,
    VehicleType::Standard,
    VehicleType::Adventure,
    VehicleType::ElectricScooter,
  ];

  pub fn label(self) -> &'static str {
    match self {
      VehicleType::UrbanScooter => "Urban Scooter",
      VehicleType::SportScooter => "Sport Scooter",
      VehicleType::MaxiScooter => "Maxi Scooter",
      VehicleType::ClassicScooter => "Classic Scooter",
      VehicleType::RetroScooter => "Retro Scooter",
      VehicleType::NakedBike => "Naked Bike",
      VehicleType::SportBike => "Sport Bike",
      VehicleType::Standard => "Standard",
      VehicleType::Adventure => "Adventure",
      VehicleType::ElectricScooter => "Electric Scooter",
    }
  }

  pub fn from_label(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.label().eq_ignore_ascii_case(label))
  }

  pub fn spec(self) -> TypeSpec {
    let ice = |lo: u32, hi: u32, power: f64, fuel: (f64, f64), price: f64| TypeSpec {
      displacement: Some((lo, hi)),
      power_multiplier: power,
      fuel_efficiency: Some(fuel),
      price_multiplier: price,
    };

    match self {
      VehicleType::UrbanScooter => ice(50, 150, 0.065, (45.0, 65.0), 1.0),
      VehicleType::SportScooter => ice(125, 300, 0.075, (35.0, 50.0), 1.1),
      VehicleType::MaxiScooter => ice(250, 650, 0.085, (25.0, 40.0), 1.3),
      VehicleType::ClassicScooter => ice(50, 125, 0.06, (50.0, 70.0), 0.9),
      VehicleType::RetroScooter => ice(125, 250, 0.065, (40.0, 55.0), 1.0),
      VehicleType::NakedBike => ice(250, 1000, 0.10, (20.0, 35.0), 1.2),
      VehicleType::SportBike => ice(250, 1000, 0.12, (15.0, 30.0), 1.5),
      VehicleType::Standard => ice(125, 500, 0.07, (25.0, 40.0), 1.0),
      VehicleType::Adventure => ice(400, 1200, 0.085, (18.0, 32.0), 1.4),
      VehicleType::ElectricScooter => TypeSpec {
        displacement: None,
        power_multiplier: 0.0,
        fuel_efficiency: None,
        price_multiplier: 1.2,
      },
    }
  }

  pub fn is_electric(self) -> bool {
    self == VehicleType::ElectricScooter
  }

  pub fn is_scooter(self) -> bool {
    self.label().contains("Scooter")
  }
}

const SCOOTER_LINEUP: &[VehicleType] = &[
  VehicleType::UrbanScooter,
  VehicleType::SportScooter,
  VehicleType::ClassicScooter,
  VehicleType::RetroScooter,
  VehicleType::MaxiScooter,
  VehicleType::Standard,
];

const SMART_LINEUP: &[VehicleType] = &[
  VehicleType::UrbanScooter,
  VehicleType::SportScooter,
  VehicleType::ElectricScooter,
  VehicleType::Standard,
];

const DIVERSE_LINEUP: &[VehicleType] = &[
  VehicleType::UrbanScooter,
  VehicleType::SportScooter,
  VehicleType::MaxiScooter,
  VehicleType::ClassicScooter,
  VehicleType::NakedBike,
  VehicleType::SportBike,
  VehicleType::Standard,
];

const PERFORMANCE_LINEUP: &[VehicleType] = &[
  VehicleType::SportBike,
  VehicleType::NakedBike,
  VehicleType::Adventure,
  VehicleType::SportScooter,
  VehicleType::MaxiScooter,
  VehicleType::Standard,
];

const ELECTRIC_LINEUP: &[VehicleType] = &[VehicleType::ElectricScooter];

/// A brand the generator can produce, with its pricing and lineup
#[derive(Debug)]
pub struct BrandProfile {
  pub name: &'static str,
  pub default_count: usize,
  pub price_multiplier: f64,
  /// Vehicle types this brand is allowed to produce
  pub lineup: &'static [VehicleType],
  /// Model name templates; `{cc}` is replaced by a displacement token
  pub templates: &'static [&'static str],
}

impl BrandProfile {
  /// Pure-electric brands never carry a displacement token in their names
  pub fn is_electric_only(&self) -> bool {
    self.lineup.iter().all(|t| t.is_electric())
  }
}

pub const BRANDS: &[BrandProfile] = &[
  BrandProfile {
    name: "SYM",
    default_count: 350,
    price_multiplier: 0.95,
    lineup: SCOOTER_LINEUP,
    templates: &[
      "全新迪爵{cc}", "迪爵{cc}", "JET SL+ {cc}", "Woo {cc}", "活力{cc}", "CLBCU {cc}",
      "DRG {cc}", "Jet 14 {cc}", "MAXSYM TL {cc}", "FNX {cc}", "GR {cc}", "HD {cc}",
      "Z1 {cc}", "RV {cc}", "Fighter {cc}", "Cruisym {cc}", "Wolf {cc}", "VS {cc}",
    ],
  },
  BrandProfile {
    name: "KYMCO",
    default_count: 300,
    price_multiplier: 1.0,
    lineup: SCOOTER_LINEUP,
    templates: &[
      "大地名流{cc}", "GP {cc}", "新豪邁{cc}", "Racing S {cc}", "iONEX", "AK {cc}",
      "Many {cc}", "G-Dink {cc}", "Xciting {cc}", "People S {cc}", "Agility {cc}",
      "Super 8 {cc}", "Downtown {cc}", "Venox {cc}", "Like {cc}", "X-Town {cc}",
    ],
  },
  BrandProfile {
    name: "PGO",
    default_count: 200,
    price_multiplier: 0.9,
    lineup: SCOOTER_LINEUP,
    templates: &[
      "Ur1", "Tigra {cc}", "G-Max {cc}", "T-Rex {cc}", "Hot {cc}", "Big Max {cc}",
      "PMX {cc}", "Blur {cc}", "X-Hot {cc}", "Comet {cc}", "Bon {cc}", "J-bubu {cc}",
    ],
  },
  BrandProfile {
    name: "AEON",
    default_count: 180,
    price_multiplier: 1.1,
    lineup: SMART_LINEUP,
    templates: &[
      "Ai-1 Sport", "Ai-1 Comfort", "Elite {cc}", "Cobra {cc}", "Crossland {cc}",
      "MyRoad {cc}", "Sporty {cc}", "Urban {cc}", "City {cc}", "Cross {cc}",
    ],
  },
  BrandProfile {
    name: "YAMAHA",
    default_count: 320,
    price_multiplier: 1.25,
    lineup: DIVERSE_LINEUP,
    templates: &[
      "Jog {cc}", "勁戰", "Force {cc}", "SMAX {cc}", "YZF-R{cc}", "MT-{cc}",
      "TMAX {cc}", "XMAX {cc}", "NMAX {cc}", "BWS {cc}", "Vino {cc}", "Cuxi {cc}",
    ],
  },
  BrandProfile {
    name: "HONDA",
    default_count: 280,
    price_multiplier: 1.3,
    lineup: DIVERSE_LINEUP,
    templates: &[
      "PCX {cc}", "Vario {cc}", "Vision {cc}", "CB{cc}R", "CBR{cc}", "Forza {cc}",
      "Lead {cc}", "Click {cc}", "Rebel {cc}", "NC{cc}", "CTX {cc}", "Vino {cc}",
    ],
  },
  BrandProfile {
    name: "SUZUKI",
    default_count: 200,
    price_multiplier: 1.2,
    lineup: PERFORMANCE_LINEUP,
    templates: &[
      "Address {cc}", "Burgman {cc}", "GSX-R{cc}", "GSX-S{cc}", "V-Strom {cc}",
      "SV{cc}", "Katana {cc}", "Swish {cc}", "Access {cc}", "Gixxer {cc}",
    ],
  },
  BrandProfile {
    name: "KAWASAKI",
    default_count: 120,
    price_multiplier: 1.4,
    lineup: PERFORMANCE_LINEUP,
    templates: &[
      "Ninja {cc}", "Z{cc}", "Versys {cc}", "W{cc}", "ZX-{cc}R", "ER-{cc}",
      "Vulcan {cc}", "KLX{cc}", "Concours {cc}", "Eliminator {cc}",
    ],
  },
  BrandProfile {
    name: "GOGORO",
    default_count: 50,
    price_multiplier: 1.5,
    lineup: ELECTRIC_LINEUP,
    templates: &[
      "GOGORO 2 Series", "GOGORO 3 Series", "GOGORO VIVA", "GOGORO Delight",
      "GOGORO S2", "GOGORO 2 Deluxe", "GOGORO 2 Premium", "GOGORO Viva Mix",
    ],
  },
];

/// Looks a brand up by name, ignoring ASCII case
pub fn brand_profile(name: &str) -> Option<&'static BrandProfile> {
  BRANDS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Brands grouped the way the reporter presents them
pub const DOMESTIC_BRANDS: &[&str] = &["SYM", "KYMCO", "PGO", "AEON"];
pub const JAPANESE_BRANDS: &[&str] = &["YAMAHA", "HONDA", "SUZUKI", "KAWASAKI"];
pub const ELECTRIC_BRANDS: &[&str] = &["GOGORO"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureCategory {
  Scooter,
  Sport,
  Naked,
  Electric,
  Classic,
}

impl FeatureCategory {
  /// Pools drawn from when a type matches no category
  pub const FALLBACK: [FeatureCategory; 3] =
    [FeatureCategory::Scooter, FeatureCategory::Sport, FeatureCategory::Naked];

  pub fn pool(self) -> &'static [&'static str] {
    match self {
      FeatureCategory::Scooter => &[
        "LED照明系統", "Under-seat storage", "USB charging port", "Smart key", "Digital display",
        "ABS braking", "CBS system", "Front disc brake", "Large glove box", "Anti-theft system",
        "前置物箱", "中央駐車架", "電動啟動", "LED尾燈", "數位儀表板",
      ],
      FeatureCategory::Sport => &[
        "Racing suspension", "Slipper clutch", "Quick shifter", "Track mode", "Traction control",
        "Wheelie control", "ABS system", "Racing tires", "Wind protection", "Sport ergonomics",
        "運動化懸吊", "競技化設計", "防滑離合器", "競技胎",
      ],
      FeatureCategory::Naked => &[
        "Upright riding position", "Exposed engine", "Minimalist design", "LED headlight",
        "Digital instruments", "ABS", "Assist and slipper clutch", "Comfortable ergonomics",
        "Easy maintenance", "Urban agility", "直立騎乘姿勢", "街車風格",
      ],
      FeatureCategory::Electric => &[
        "Smart connectivity", "Battery swapping system", "Zero emissions", "Digital dashboard",
        "Mobile app integration", "Regenerative braking", "GPS navigation", "Remote monitoring",
        "Voice assistant", "智慧連網", "換電系統", "零排放", "手機APP", "語音助理",
      ],
      FeatureCategory::Classic => &[
        "Retro styling", "Classic design", "Heritage appeal", "Chrome details",
        "Vintage instruments", "Classic ergonomics", "Timeless look", "Traditional controls",
        "復古造型", "經典設計", "傳統儀表", "鍍鉻飾條",
      ],
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketCategory {
  EntryLevel,
  Commuter,
  Family,
  Sport,
  Premium,
  HeavyBike,
  Electric,
}

impl MarketCategory {
  pub const ALL: [MarketCategory; 7] = [
    MarketCategory::EntryLevel,
    MarketCategory::Commuter,
    MarketCategory::Family,
    MarketCategory::Sport,
    MarketCategory::Premium,
    MarketCategory::HeavyBike,
    MarketCategory::Electric,
  ];

  pub fn label(self) -> &'static str {
    match self {
      MarketCategory::EntryLevel => "Entry Level",
      MarketCategory::Commuter => "Commuter",
      MarketCategory::Family => "Family",
      MarketCategory::Sport => "Sport",
      MarketCategory::Premium => "Premium",
      MarketCategory::HeavyBike => "Heavy Bike",
      MarketCategory::Electric => "Electric",
    }
  }

  pub fn from_label(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.label() == label)
  }

  /// Inclusive NT$ band a computed price is clamped into
  pub fn price_band(self) -> (f64, f64) {
    match self {
      MarketCategory::EntryLevel => (40_000.0, 80_000.0),
      MarketCategory::Commuter => (60_000.0, 120_000.0),
      MarketCategory::Family => (80_000.0, 150_000.0),
      MarketCategory::Sport => (100_000.0, 300_000.0),
      MarketCategory::Premium => (150_000.0, 400_000.0),
      MarketCategory::HeavyBike => (200_000.0, 1_200_000.0),
      MarketCategory::Electric => (70_000.0, 200_000.0),
    }
  }

  pub fn target_audience(self) -> &'static str {
    match self {
      MarketCategory::EntryLevel => "學生族群",
      MarketCategory::Commuter => "上班族通勤",
      MarketCategory::Family => "家庭用戶",
      MarketCategory::Sport => "運動騎士",
      MarketCategory::Premium => "品味人士",
      MarketCategory::HeavyBike => "重機玩家",
      MarketCategory::Electric => "環保意識",
    }
  }
}

/// Heavy bikes above this displacement may land in the collector price band
pub const HEAVY_BIKE_PREMIUM_CC: u32 = 600;
pub const HEAVY_BIKE_PREMIUM_PROBABILITY: f64 = 0.3;
pub const HEAVY_BIKE_PREMIUM_PRICE: (f64, f64) = (500_000.0, 1_200_000.0);
