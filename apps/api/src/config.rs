use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Key-value medium behind the persistent store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    File { dir: PathBuf },
    Redis { url: String, prefix: String },
}

impl StorageConfig {
    pub fn label(&self) -> &'static str {
        match self {
            StorageConfig::Memory => "memory",
            StorageConfig::File { .. } => "file",
            StorageConfig::Redis { .. } => "redis",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage: StorageConfig,
    /// Baseline job document: `http(s)://` URL or local path.
    pub dataset_source: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage = match var("STORAGE_BACKEND", "file").to_lowercase().as_str() {
            "memory" => StorageConfig::Memory,
            "file" => StorageConfig::File {
                dir: PathBuf::from(var("STORAGE_DIR", "./data")),
            },
            "redis" => StorageConfig::Redis {
                url: lookup("REDIS_URL")
                    .context("Required environment variable 'REDIS_URL' is not set")?,
                prefix: var("STORAGE_PREFIX", "jobboard:"),
            },
            other => bail!("STORAGE_BACKEND must be memory, file or redis (got '{other}')"),
        };

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            storage,
            dataset_source: var("DATASET_SOURCE", "assets/data.json"),
        })
    }
}
