use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Where uploaded CV documents are written.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Local,
    S3,
}

/// S3 / MinIO settings. Only required when `STORAGE_BACKEND=s3`.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub json_logs: bool,
    pub storage_backend: StorageBackend,
    pub upload_dir: PathBuf,
    pub s3: Option<S3Config>,
    /// Enables the best-effort Gemini enrichment when present.
    pub gemini_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            json_logs: false,
            storage_backend: StorageBackend::Local,
            upload_dir: PathBuf::from("uploads"),
            s3: None,
            gemini_api_key: None,
            llm_timeout: Duration::from_secs(10),
            seed_demo_data: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let storage_backend = match optional_env("STORAGE_BACKEND").as_deref() {
            None | Some("local") => StorageBackend::Local,
            Some("s3") => StorageBackend::S3,
            Some(other) => bail!("STORAGE_BACKEND must be 'local' or 's3', got '{other}'"),
        };

        let s3 = if storage_backend == StorageBackend::S3 {
            Some(S3Config {
                bucket: require_env("S3_BUCKET")?,
                endpoint: require_env("S3_ENDPOINT")?,
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            })
        } else {
            None
        };

        let llm_timeout = match optional_env("LLM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => defaults.llm_timeout,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            json_logs: optional_env("LOG_FORMAT").is_some_and(|v| v == "json"),
            storage_backend,
            upload_dir: optional_env("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            s3,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            llm_timeout,
            seed_demo_data: optional_env("SEED_DEMO_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_demo_data),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(v), "{v} should be truthy");
        }
    }

    #[test]
    fn test_parse_flag_falsy_values() {
        for v in ["0", "false", "no", "", "maybe"] {
            assert!(!parse_flag(v), "{v} should be falsy");
        }
    }

    #[test]
    fn test_default_config_uses_local_storage() {
        let config = Config::default();
        assert_eq!(config.storage_backend, StorageBackend::Local);
        assert!(config.s3.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.port, 8080);
    }
}
