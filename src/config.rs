use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::constants::api;

/// Pokehunt - Pokemon catalog and encounter explorer
///
/// Offline-first catalog lookups plus location-based encounter generation.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "pokehunt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pokemon catalog and encounter explorer", long_about = None)]
pub struct CliArgs {
    /// Catalog API base URL
    #[arg(long, env = "POKEAPI_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Remote fetch timeout in milliseconds (1000-60000)
    #[arg(long, env = "FETCH_TIMEOUT_MS")]
    pub fetch_timeout_ms: Option<u64>,

    /// Highest catalog id to serve (1-1025)
    #[arg(long, env = "POKEMON_LIMIT")]
    pub pokemon_limit: Option<u32>,

    /// Path to the SQLite cache database
    #[arg(long, env = "SQLITE_DB_PATH")]
    pub sqlite_db_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a catalog entry by id or exact name
    Lookup {
        /// Numeric id or Pokemon name
        query: String,
    },
    /// Generate nearby encounters around a coordinate
    Hunt {
        /// Reference latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Reference longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Batch size override (default: random 3-5)
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed for reproducible batches
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub fetch_timeout_ms: u64,
    pub pokemon_limit: u32,
    pub sqlite_db_path: String,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<(Config, Command)> {
    let args = CliArgs::parse();

    let api_base_url = args
        .api_base_url
        .unwrap_or_else(|| api::BASE_URL.to_string());
    validate_url(&api_base_url, "POKEAPI_BASE_URL")?;
    // Trailing slash would double up when joining paths
    let api_base_url = api_base_url.trim_end_matches('/').to_string();

    let fetch_timeout_ms = args.fetch_timeout_ms.unwrap_or(api::FETCH_TIMEOUT_MS);
    let fetch_timeout_ms = validate_in_range(fetch_timeout_ms, 1000, 60000, "FETCH_TIMEOUT_MS")?;

    let pokemon_limit = args.pokemon_limit.unwrap_or(api::POKEMON_LIMIT);
    let pokemon_limit = validate_in_range(pokemon_limit, 1, 1025, "POKEMON_LIMIT")?;

    let sqlite_db_path = args
        .sqlite_db_path
        .unwrap_or_else(|| "./pokehunt_cache.db".to_string());

    Ok((
        Config {
            api_base_url,
            fetch_timeout_ms,
            pokemon_limit,
            sqlite_db_path,
        },
        args.command,
    ))
}
