//! Server configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ServerError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_RESULT_DIR: &str = "result";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}': expected an integer in 0..=65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Page, script, wasm bundle and logo.
    pub static_dir: PathBuf,
    /// Processed video and `video/bbox_data.json`.
    pub result_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            result_dir: PathBuf::from(DEFAULT_RESULT_DIR),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment, after merging an
    /// optional `.env` file.
    ///
    /// | Env Var      | Default   |
    /// |--------------|-----------|
    /// | `HOST`       | `0.0.0.0` |
    /// | `PORT`       | `5000`    |
    /// | `STATIC_DIR` | `static`  |
    /// | `RESULT_DIR` | `result`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) => tracing::debug!(error = %e, "no .env loaded"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            static_dir: var("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            result_dir: var("RESULT_DIR").map_or(defaults.result_dir, PathBuf::from),
        })
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create the static and result directories if they are missing.
    pub async fn ensure_directories(&self) -> Result<(), ServerError> {
        for dir in [&self.static_dir, &self.result_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| ServerError::Directory { path: dir.clone(), source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
