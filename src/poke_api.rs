//! Thin client for the public Pokemon catalog API.
//!
//! Wraps fetch-by-id, fetch-by-name, and the id-pool listing, reducing the
//! API's superset JSON to [`PokemonSummary`]. Error triage keeps 404s,
//! transport failures, and shape changes distinguishable.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::error::CatalogError;
use crate::types::PokemonSummary;

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client")
    })
}

/// Remote catalog source boundary.
///
/// The cache depends on this trait, not on the live client, so tests can
/// substitute a scripted source.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_by_id(&self, id: u32) -> Result<PokemonSummary, CatalogError>;
    async fn fetch_by_name(&self, name: &str) -> Result<PokemonSummary, CatalogError>;
    async fn fetch_id_pool(&self, limit: u32) -> Result<Vec<u32>, CatalogError>;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Arc<S> {
    async fn fetch_by_id(&self, id: u32) -> Result<PokemonSummary, CatalogError> {
        (**self).fetch_by_id(id).await
    }

    async fn fetch_by_name(&self, name: &str) -> Result<PokemonSummary, CatalogError> {
        (**self).fetch_by_name(name).await
    }

    async fn fetch_id_pool(&self, limit: u32) -> Result<Vec<u32>, CatalogError> {
        (**self).fetch_id_pool(limit).await
    }
}

/// Client for the live PokeAPI.
#[derive(Debug, Clone)]
pub struct PokeApi {
    base_url: String,
    timeout_ms: u64,
}

impl PokeApi {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, CatalogError> {
        log::debug!("[poke_api] GET {url}");

        let response = http_client()
            .get(url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| CatalogError::Transport(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            return Err(CatalogError::Transport(format!(
                "catalog API error ({status})"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CatalogError::Transport(format!("failed to read body: {e}")))?;
        serde_json::from_str(&text)
            .map_err(|e| CatalogError::Malformed(format!("invalid JSON from {url}: {e}")))
    }

    /// Best-effort English flavor text from the species endpoint.
    ///
    /// Failures only warn; the primary record is served without flavor.
    async fn fetch_flavor_text(&self, species_url: &str) -> String {
        match self.get_json(species_url).await {
            Ok(species) => species["flavor_text_entries"]
                .as_array()
                .and_then(|entries| {
                    entries
                        .iter()
                        .find(|e| e["language"]["name"].as_str() == Some("en"))
                })
                .and_then(|e| e["flavor_text"].as_str())
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                log::warn!("[poke_api] could not fetch flavor text: {e}");
                String::new()
            }
        }
    }

    async fn fetch_pokemon(&self, url: &str) -> Result<PokemonSummary, CatalogError> {
        let data = self.get_json(url).await?;
        let mut summary = normalize_pokemon(&data)?;

        if let Some(species_url) = data["species"]["url"].as_str() {
            summary.flavor_text = self.fetch_flavor_text(species_url).await;
        }

        Ok(summary)
    }
}

#[async_trait]
impl CatalogSource for PokeApi {
    async fn fetch_by_id(&self, id: u32) -> Result<PokemonSummary, CatalogError> {
        log::info!("[poke_api] fetching pokemon #{id}");
        self.fetch_pokemon(&format!("{}/pokemon/{id}", self.base_url))
            .await
    }

    async fn fetch_by_name(&self, name: &str) -> Result<PokemonSummary, CatalogError> {
        let slug = urlencoding::encode(&name.trim().to_lowercase()).into_owned();
        log::info!("[poke_api] fetching pokemon '{slug}'");
        self.fetch_pokemon(&format!("{}/pokemon/{slug}", self.base_url))
            .await
    }

    async fn fetch_id_pool(&self, limit: u32) -> Result<Vec<u32>, CatalogError> {
        let data = self
            .get_json(&format!("{}/pokemon?limit={limit}", self.base_url))
            .await?;
        let results = data["results"]
            .as_array()
            .ok_or_else(|| CatalogError::Malformed("list response without results".into()))?;

        // The catalog enumerates ids densely from 1.
        Ok((1..=results.len() as u32).collect())
    }
}

/// Reduce the API's superset record to the fields the app keeps.
///
/// `id` and `name` are required; everything else degrades to defaults rather
/// than failing the fetch.
fn normalize_pokemon(data: &Value) -> Result<PokemonSummary, CatalogError> {
    let id = data["id"]
        .as_u64()
        .ok_or_else(|| CatalogError::Malformed("record missing id".into()))? as u32;
    let name = data["name"]
        .as_str()
        .ok_or_else(|| CatalogError::Malformed("record missing name".into()))?
        .to_string();

    let types = data["types"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t["type"]["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(PokemonSummary {
        id,
        name,
        types,
        height: data["height"].as_u64().unwrap_or(0) as u32,
        weight: data["weight"].as_u64().unwrap_or(0) as u32,
        base_experience: data["base_experience"].as_u64().map(|v| v as u32),
        sprite_url: data["sprites"]["front_default"]
            .as_str()
            .map(str::to_string),
        artwork_url: data["sprites"]["other"]["official-artwork"]["front_default"]
            .as_str()
            .map(str::to_string),
        flavor_text: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_keeps_required_fields() {
        let data = json!({
            "id": 25,
            "name": "pikachu",
            "types": [
                {"slot": 1, "type": {"name": "electric", "url": "..."}}
            ],
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "sprites": {
                "front_default": "https://example.test/25.png",
                "other": {"official-artwork": {"front_default": "https://example.test/art/25.png"}}
            }
        });

        let summary = normalize_pokemon(&data).unwrap();
        assert_eq!(summary.id, 25);
        assert_eq!(summary.name, "pikachu");
        assert_eq!(summary.types, vec!["electric".to_string()]);
        assert_eq!(summary.base_experience, Some(112));
        assert_eq!(summary.sprite_url.as_deref(), Some("https://example.test/25.png"));
    }

    #[test]
    fn normalize_tolerates_missing_optionals() {
        let data = json!({"id": 1, "name": "bulbasaur"});
        let summary = normalize_pokemon(&data).unwrap();
        assert!(summary.types.is_empty());
        assert_eq!(summary.height, 0);
        assert_eq!(summary.base_experience, None);
        assert_eq!(summary.sprite_url, None);
    }

    #[test]
    fn normalize_rejects_record_without_id() {
        let data = json!({"name": "missingno"});
        assert!(matches!(
            normalize_pokemon(&data),
            Err(CatalogError::Malformed(_))
        ));
    }
}
