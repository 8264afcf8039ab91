use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Files checked, in order, when no explicit config path is given.
const CONFIG_PATHS: [&str; 2] = ["blog.toml", "data/blog.toml"];

/// Server configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Opaque store address, e.g. `memory://blog` or `file://data/posts.json`.
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "memory://blog".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Config {
    /// Load from the first config file found, then apply `BLOG_*` environment
    /// overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = CONFIG_PATHS.into_iter().map(Path::new).find(|p| p.exists());
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                tracing::info!("No configuration file found, using defaults");
                Config::default()
            }
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides named `BLOG_<SECTION>_<KEY>`, looked up through `var`.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("BLOG_SERVER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("BLOG_SERVER_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid BLOG_SERVER_PORT={val}"),
            }
        }
        if let Some(val) = var("BLOG_DATABASE_URL") {
            self.database.url = val;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
