// Native binary for Pokehunt - catalog lookups and encounter hunts

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use pokehunt::{
    cache::CatalogCache,
    config::{self, Command},
    hunt::HuntSession,
    notify::LogNotifier,
    poke_api::{CatalogSource, PokeApi},
    store::SqliteStore,
    types::GeoPoint,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();
    env_logger::init();

    let (cfg, command) = config::load().context("Failed to load configuration")?;

    let api = PokeApi::new(cfg.api_base_url.clone(), cfg.fetch_timeout_ms);
    let store = SqliteStore::open(&cfg.sqlite_db_path)
        .with_context(|| format!("Failed to open cache database at {}", cfg.sqlite_db_path))?;
    let cache = CatalogCache::new(api.clone(), store, cfg.pokemon_limit);

    match command {
        Command::Lookup { query } => {
            let results = cache.search(&query).await?;
            if results.is_empty() {
                println!("No catalog entry matches '{query}'");
            } else {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
        }
        Command::Hunt {
            lat,
            lon,
            count,
            seed,
        } => {
            let pool = api
                .fetch_id_pool(cfg.pokemon_limit)
                .await
                .context("Failed to fetch the id pool")?;

            let rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            let mut session = HuntSession::with_rng(pool, LogNotifier, rng);

            let origin = GeoPoint {
                latitude: lat,
                longitude: lon,
            };
            let batch = session.scout(&origin, count).to_vec();

            println!(
                "{} encounter(s) near ({lat:.5}, {lon:.5})",
                batch.len()
            );
            for encounter in &batch {
                match cache.get(encounter.pokemon_id).await {
                    Ok(pokemon) => println!(
                        "  #{:<4} {:<12} [{}] at ({:.5}, {:.5})",
                        pokemon.id,
                        pokemon.name,
                        encounter.biome,
                        encounter.location.latitude,
                        encounter.location.longitude
                    ),
                    Err(e) => {
                        log::warn!(
                            "[pokehunt] could not resolve #{}: {e}",
                            encounter.pokemon_id
                        );
                        println!(
                            "  #{:<4} <unresolved> [{}] at ({:.5}, {:.5})",
                            encounter.pokemon_id,
                            encounter.biome,
                            encounter.location.latitude,
                            encounter.location.longitude
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
