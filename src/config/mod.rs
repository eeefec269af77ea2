use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub catalog_store: CatalogStoreConfig,
    pub cache: CacheConfig,
    pub object_storage: ObjectStorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis connection URL. When absent the service runs with an in-process
    /// memory cache (single-instance deployments, tests).
    pub url: Option<String>,
    #[serde(default = "default_list_ttl_secs")]
    pub list_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    pub bucket: String,
    pub region: String,
    #[serde(default = "default_signed_url_expiry_secs")]
    pub signed_url_expiry_secs: u64,
    #[serde(default = "default_signed_url_ttl_skew_secs")]
    pub signed_url_ttl_skew_secs: u64,
}

fn default_list_ttl_secs() -> u64 {
    3600
}

fn default_signed_url_expiry_secs() -> u64 {
    3600
}

fn default_signed_url_ttl_skew_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            catalog_store: CatalogStoreConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "explore".to_string(),
                collection: "catalog".to_string(),
            },
            cache: CacheConfig {
                url: None,
                list_ttl_secs: default_list_ttl_secs(),
            },
            object_storage: ObjectStorageConfig {
                bucket: "explore-catalog-media".to_string(),
                region: "us-east-2".to_string(),
                signed_url_expiry_secs: default_signed_url_expiry_secs(),
                signed_url_ttl_skew_secs: default_signed_url_ttl_skew_secs(),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        let config: Self = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_file, contents)?;
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations where a cached signed URL could outlive the
    /// credential it holds.
    pub fn validate(&self) -> Result<()> {
        let storage = &self.object_storage;
        if storage.signed_url_ttl_skew_secs >= storage.signed_url_expiry_secs {
            anyhow::bail!(
                "signed_url_ttl_skew_secs ({}) must be smaller than signed_url_expiry_secs ({})",
                storage.signed_url_ttl_skew_secs,
                storage.signed_url_expiry_secs
            );
        }
        Ok(())
    }
}
