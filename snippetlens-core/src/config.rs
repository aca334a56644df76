//! Configuration management

use crate::error::{ErrorContext, SnippetLensError, SnippetLensResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetLensConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Document store connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection URL, e.g. `sqlite://data/snippets.db` or `memory://`
    pub url: String,
    /// Logical database name; collections live inside it
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://snippetlens.db".to_string(),
            database: "code_snippets".to_string(),
        }
    }
}

impl SnippetLensConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SnippetLensResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SnippetLensError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: SnippetLensConfig =
            toml::from_str(&content).map_err(|e| SnippetLensError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> SnippetLensResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| SnippetLensError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| SnippetLensError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Override fields from `SNIPPETLENS_*` environment variables
    pub fn apply_env_overrides(&mut self) -> SnippetLensResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> SnippetLensResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SNIPPETLENS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SNIPPETLENS_PORT") {
            self.server.port = port.parse().map_err(|_| {
                crate::validation_error!(
                    format!("SNIPPETLENS_PORT is not a valid port: {}", port),
                    "server.port",
                    "config"
                )
            })?;
        }
        if let Some(url) = lookup("SNIPPETLENS_STORE_URL") {
            self.store.url = url;
        }
        if let Some(database) = lookup("SNIPPETLENS_DATABASE") {
            self.store.database = database;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SnippetLensResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(crate::validation_error!(
                "Server host must not be empty",
                "server.host",
                "config"
            ));
        }

        if self.store.url.trim().is_empty() {
            return Err(crate::config_error!(
                "Store URL must not be empty",
                "config"
            ));
        }

        if self.store.database.trim().is_empty() {
            return Err(crate::config_error!(
                "Store database name must not be empty",
                "config"
            ));
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
