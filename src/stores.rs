use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::SheetsConfig;

/// Read-through directory of valid store names, backed by a spreadsheet
/// range. The list is deduplicated, trimmed and lexically sorted; results
/// are cached for the configured TTL and shared across requests.
pub struct StoreDirectory {
    config: SheetsConfig,
    client: reqwest::Client,
    ttl: Duration,
    cache: RwLock<Option<CacheEntry>>,
}

struct CacheEntry {
    stores: Arc<Vec<String>>,
    fetched_at: Instant,
}

/// Shape of the sheets values response. Anything without `values` (including
/// upstream error bodies) reads as an empty range.
#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl StoreDirectory {
    pub fn new(config: SheetsConfig, client: reqwest::Client, ttl: Duration) -> Self {
        Self {
            config,
            client,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// Fetch the store list, serving from cache inside the TTL window.
    pub async fn list(&self) -> Result<Arc<Vec<String>>, String> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.as_ref() {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&entry.stores));
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(entry) = cache.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.stores));
            }
        }

        let stores = Arc::new(self.fetch().await?);
        *cache = Some(CacheEntry {
            stores: Arc::clone(&stores),
            fetched_at: Instant::now(),
        });

        tracing::info!("Store directory refreshed: {} entries", stores.len());
        Ok(stores)
    }

    /// Exact-match membership check against the current list.
    pub async fn contains(&self, name: &str) -> Result<bool, String> {
        let stores = self.list().await?;
        Ok(stores.iter().any(|s| s == name))
    }

    async fn fetch(&self) -> Result<Vec<String>, String> {
        let SheetsConfig {
            endpoint,
            sheet_id,
            sheet_name,
            api_key,
            range,
        } = &self.config;

        let url =
            format!("{endpoint}/v4/spreadsheets/{sheet_id}/values/{sheet_name}!{range}?key={api_key}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Sheets request failed: {e}"))?;

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| format!("Sheets response parse failed: {e}"))?;

        Ok(normalize(body.values))
    }
}

/// First column of each row, trimmed, empties removed, deduplicated, sorted.
fn normalize(values: Vec<Vec<String>>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn normalize_trims_dedupes_and_sorts() {
        let values = vec![
            vec!["  Loja B ".to_string()],
            vec!["Loja A".to_string()],
            vec!["Loja A".to_string(), "ignored".to_string()],
            vec!["".to_string()],
            vec!["   ".to_string()],
        ];
        assert_eq!(normalize(values), vec!["Loja A", "Loja B"]);
    }

    #[test]
    fn normalize_skips_empty_rows() {
        let values = vec![vec![], vec!["Loja C".to_string()]];
        assert_eq!(normalize(values), vec!["Loja C"]);
    }

    #[test]
    fn normalize_of_nothing_is_empty() {
        assert!(normalize(Vec::new()).is_empty());
    }
}
