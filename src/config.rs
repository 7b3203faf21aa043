//! Configuration management for the harvester

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// OAI-PMH endpoint, e.g. https://catalog.openresearchlibrary.org/oai
    pub endpoint: String,
    pub metadata_prefix: String,
    /// Stop after this many pages; 0 means follow resumption tokens to the end
    pub max_pages: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Base URL of the S3-compatible endpoint (pre-signed or anonymous PUT)
    pub endpoint: String,
    pub bucket: String,
    /// Key prefix under which every artifact lands
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Optional: language cross-referencing is skipped when unset
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    pub books_dir: String,
    pub images_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix ONIX_)
            .add_source(
                Environment::with_prefix("ONIX")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override database URL from DATABASE_URL env var if present
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            // Override storage endpoint from STORAGE_ENDPOINT env var if present
            .set_override_option("storage.endpoint", env::var("STORAGE_ENDPOINT").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://catalog.openresearchlibrary.org/oai".to_string(),
            metadata_prefix: "oai_dc".to_string(),
            max_pages: 0,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            bucket: "openresearchlibrary".to_string(),
            prefix: "content/open_research_library_iudilif".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            books_dir: "./books".to_string(),
            images_dir: "./images".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
