use std::net::IpAddr;
use std::time::Duration;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub log_level: String,
    pub store_validation: StoreValidationMode,
    pub upload_failure: UploadFailureMode,
    pub store_cache_ttl: Duration,
    pub webhook: Option<WebhookConfig>,
    pub sheets: Option<SheetsConfig>,
    pub blob: Option<BlobConfig>,
}

/// Workflow webhook that receives finished submissions.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub token: Option<String>,
}

/// Spreadsheet range backing the store directory.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub endpoint: String,
    pub sheet_id: String,
    pub sheet_name: String,
    pub api_key: String,
    pub range: String,
}

/// Blob store for evidence attachments.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub endpoint: String,
    pub token: String,
}

/// Whether a submitted store name must match the directory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreValidationMode {
    /// Unknown store names reject the submission.
    Strict,
    /// Unknown store names are logged and allowed.
    Advisory,
    Off,
}

/// What a failed evidence upload does to the overall submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UploadFailureMode {
    /// Log, drop the URL, proceed.
    Open,
    /// Fail the submission.
    Closed,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("CONTESTA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CONTESTA_HOST: {e}"))?;

        let port: u16 = env_or("CONTESTA_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid CONTESTA_PORT: {e}"))?;

        let max_body_size: usize = env_or("CONTESTA_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid CONTESTA_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("CONTESTA_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid CONTESTA_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let log_level = env_or("CONTESTA_LOG_LEVEL", "info");

        let store_validation = match env_or("CONTESTA_STORE_VALIDATION", "strict").as_str() {
            "off" => StoreValidationMode::Off,
            "advisory" => StoreValidationMode::Advisory,
            _ => StoreValidationMode::Strict,
        };

        let upload_failure = match env_or("CONTESTA_UPLOAD_FAILURE", "open").as_str() {
            "closed" => UploadFailureMode::Closed,
            _ => UploadFailureMode::Open,
        };

        let store_cache_ttl = Duration::from_secs(
            env_or("CONTESTA_STORE_CACHE_TTL_SECS", "3600")
                .parse()
                .map_err(|e| format!("Invalid CONTESTA_STORE_CACHE_TTL_SECS: {e}"))?,
        );

        let webhook = std::env::var("N8N_WEBHOOK_URL")
            .ok()
            .map(|url| WebhookConfig {
                url,
                token: std::env::var("N8N_WEBHOOK_TOKEN").ok(),
            });

        let sheets = match (
            std::env::var("GOOGLE_SHEET_ID").ok(),
            std::env::var("GOOGLE_SHEET_NAME").ok(),
            std::env::var("GOOGLE_API_KEY").ok(),
        ) {
            (Some(sheet_id), Some(sheet_name), Some(api_key)) => Some(SheetsConfig {
                endpoint: env_or("SHEETS_API_BASE", "https://sheets.googleapis.com"),
                sheet_id,
                sheet_name,
                api_key,
                range: env_or("GOOGLE_SHEET_RANGE", "A2:A2000"),
            }),
            _ => None,
        };

        let blob = match (
            std::env::var("BLOB_API_URL").ok(),
            std::env::var("BLOB_READ_WRITE_TOKEN").ok(),
        ) {
            (Some(endpoint), Some(token)) => Some(BlobConfig { endpoint, token }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            trusted_proxies,
            log_level,
            store_validation,
            upload_failure,
            store_cache_ttl,
            webhook,
            sheets,
            blob,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
