use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use motodex::commands::{self, QueryOptions};
use motodex::console;
use motodex::error::CatalogError;

#[derive(Parser)]
#[command(name = "motodex")]
#[command(about = "Motodex - Taiwan Motorcycle Catalog\nGenerate, query and validate a synthetic motorcycle database")]
#[command(version)]
struct Cli {
  /// Configuration file (defaults to ./motodex.json when present)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Show diagnostic output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

/// Catalog location shared by every command
#[derive(Args)]
struct CatalogFile {
  /// Catalog JSON file (defaults to the configured output path)
  #[arg(short, long)]
  file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate a new catalog and save it
  Generate {
    #[command(flatten)]
    catalog: CatalogFile,
    /// Seed for a reproducible catalog
    #[arg(long)]
    seed: Option<u64>,
  },
  /// Print statistics and example queries for a catalog
  Report {
    #[command(flatten)]
    catalog: CatalogFile,
  },
  /// List records matching every given filter
  Query {
    #[command(flatten)]
    catalog: CatalogFile,
    /// Brand, ignoring case
    #[arg(short, long)]
    brand: Option<String>,
    /// Substring of the vehicle type, ignoring case
    #[arg(short = 't', long = "type")]
    vehicle_type: Option<String>,
    /// Smallest displacement in cc (excludes electric records)
    #[arg(long)]
    min_cc: Option<u32>,
    /// Largest displacement in cc (excludes electric records)
    #[arg(long)]
    max_cc: Option<u32>,
    /// Ceiling on the lower quoted price in NT$
    #[arg(long)]
    max_price: Option<u64>,
    /// Earliest model year
    #[arg(long)]
    min_year: Option<u16>,
    /// Market category such as "Entry Level"
    #[arg(short, long)]
    category: Option<String>,
    /// Availability status such as "Available" or "Discontinued"
    #[arg(short, long)]
    availability: Option<String>,
    /// Only electric records
    #[arg(short, long)]
    electric: bool,
    /// Maximum number of records to list
    #[arg(short, long, default_value_t = 20)]
    limit: usize,
  },
  /// Grade a catalog against the validation rubric
  Validate {
    #[command(flatten)]
    catalog: CatalogFile,
  },
}

/// Exit status for validation that ran but did not pass
const EXIT_VALIDATION_FAILED: u8 = 2;

fn run(cli: Cli) -> Result<ExitCode> {
  let config = commands::load_config(cli.config.as_deref())?;

  match cli.command {
    Commands::Generate { catalog, seed } => {
      let path = commands::catalog_path(&config, catalog.file);
      commands::generate(&config, &path, seed)?;
    }
    Commands::Report { catalog } => {
      let path = commands::catalog_path(&config, catalog.file);
      commands::report(&path)?;
    }
    Commands::Query {
      catalog,
      brand,
      vehicle_type,
      min_cc,
      max_cc,
      max_price,
      min_year,
      category,
      availability,
      electric,
      limit,
    } => {
      let path = commands::catalog_path(&config, catalog.file);
      let options = QueryOptions {
        brand,
        vehicle_type,
        min_cc,
        max_cc,
        max_price,
        min_year,
        category,
        availability,
        electric,
        limit,
      };
      commands::query(&path, &options)?;
    }
    Commands::Validate { catalog } => {
      let path = commands::catalog_path(&config, catalog.file);
      if !commands::validate(&config, &path)? {
        return Ok(ExitCode::from(EXIT_VALIDATION_FAILED));
      }
    }
  }

  Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  console::init_tracing(cli.verbose);

  match run(cli) {
    Ok(code) => code,
    Err(err) => match err.downcast_ref::<CatalogError>() {
      // A missing catalog is an expected first-run state
      Some(missing @ CatalogError::FileNotFound { .. }) => {
        console::error(&missing.to_string());
        ExitCode::SUCCESS
      }
      Some(malformed @ CatalogError::MalformedDocument { .. }) => {
        console::error(&malformed.to_string());
        ExitCode::FAILURE
      }
      _ => {
        console::error(&format!("Unexpected failure: {err:#}"));
        ExitCode::FAILURE
      }
    },
  }
}
