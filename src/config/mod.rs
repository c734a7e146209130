//! Application configuration for the shoe store.
//!
//! Settings come from an optional `config.toml` in the working directory;
//! anything missing falls back to the layout the desktop application shipped
//! with. `DATABASE_URL` from the environment (usually a `.env` file) wins
//! over the config file so deployments can redirect the store without
//! editing it.

/// Database connection and table creation
pub mod database;

/// Seed data loading from the TOML seed file
pub mod seed;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Store connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// TOML seed file imported at startup when present
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
    /// Product photo locations
    #[serde(default)]
    pub images: ImagesConfig,
}

/// Where product photos live and what stands in for a missing one
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    /// Directory product photos are copied into
    #[serde(default = "default_products_dir")]
    pub products_dir: PathBuf,
    /// Image shown when a product has no usable photo
    #[serde(default = "default_placeholder")]
    pub placeholder: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            seed_path: default_seed_path(),
            images: ImagesConfig::default(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            products_dir: default_products_dir(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_database_url() -> String {
    // mode=rwc lets SQLite create the file on first run
    "sqlite://data/shoestore.sqlite?mode=rwc".to_string()
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("seed.toml")
}

fn default_products_dir() -> PathBuf {
    PathBuf::from("resources/products")
}

fn default_placeholder() -> PathBuf {
    PathBuf::from("resources/images/placeholder.png")
}

/// Loads configuration from the default location (./config.toml).
///
/// A missing file is not an error; defaults apply. Environment overrides
/// are applied afterwards.
pub fn load() -> Result<AppConfig> {
    load_from("config.toml")
}

/// Loads configuration from an explicit path, then applies environment
/// overrides.
///
/// # Errors
/// Returns `Error::Config` when the file exists but cannot be read or
/// parsed.
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        tracing::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }

    Ok(config)
}
