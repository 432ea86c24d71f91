//! Client configuration.
//!
//! ```ignore
//! use cplayer::config::ClientConfig;
//!
//! let config = ClientConfig::from_json(r#"{"database": "100.books", "default_limit": 50}"#)?;
//! let config = ClientConfig::builder("100.books").default_limit(50).build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{ClientError, ClientResult},
    scope::{DEFAULT_LIMIT, Scope},
};

/// Settings shared by every collection opened through a [`Client`](crate::client::Client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default collection path, optionally qualified (`"<account>.<database>"`).
    pub database: String,
    /// Row count applied to fresh scopes.
    pub default_limit: u64,
    /// Offset applied to fresh scopes.
    pub default_offset: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            database: String::new(),
            default_limit: DEFAULT_LIMIT,
            default_offset: 0,
        }
    }
}

impl ClientConfig {
    /// Creates a builder for the given collection path.
    pub fn builder(database: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(database)
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let config: ClientConfig = serde_json::from_str(json)
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        config.validate()
    }

    /// Returns a fresh scope carrying the configured pagination defaults.
    pub fn scope(&self) -> Scope {
        Scope::with_defaults(self.default_limit, self.default_offset)
    }

    fn validate(self) -> ClientResult<Self> {
        if self.database.trim().is_empty() {
            return Err(ClientError::Configuration("database must not be empty".to_string()));
        }
        if self.database.split('.').any(str::is_empty) {
            return Err(ClientError::Configuration(format!(
                "database path {:?} has an empty segment",
                self.database
            )));
        }
        Ok(self)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Creates a builder for the given collection path.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                database: database.into(),
                ..ClientConfig::default()
            },
        }
    }

    /// Sets the row count applied to fresh scopes.
    pub fn default_limit(mut self, limit: u64) -> Self {
        self.config.default_limit = limit;
        self
    }

    /// Sets the offset applied to fresh scopes.
    pub fn default_offset(mut self, offset: u64) -> Self {
        self.config.default_offset = offset;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> ClientResult<ClientConfig> {
        self.config.validate()
    }
}
