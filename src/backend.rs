//! Backend configuration and the relational store boundary.
//!
//! The site delegates persistence to a hosted backend; this module holds
//! the connection settings and the thin row-level boundary the rest of
//! the crate builds payloads for. Configuration problems are reported as
//! their own error, before any network call is attempted.

use thiserror::Error;

#[cfg(feature = "async")]
use serde_json::Value;

pub const ENV_BACKEND_URL: &str = "ARTIST_BACKEND_URL";
pub const ENV_BACKEND_ANON_KEY: &str = "ARTIST_BACKEND_ANON_KEY";

/// Table names used by the community site.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const BLOG_POSTS: &str = "blog_posts";
    pub const SOUTH_AFRICAN_TOWNS: &str = "south_african_towns";
    pub const RECORD_LABELS: &str = "record_labels";
    pub const DISTRIBUTORS: &str = "distributors";
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Database connection not configured: {0} is not set")]
    MissingVar(&'static str),
}

/// Connection settings for the remote backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// Reads the backend settings from the environment.
    ///
    /// A missing or empty variable is a configuration error and must be
    /// surfaced to the user before anything touches the network.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: read_var(ENV_BACKEND_URL)?,
            anon_key: read_var(ENV_BACKEND_ANON_KEY)?,
        })
    }

    /// True when both backend variables are present and non-empty.
    pub fn is_configured() -> bool {
        Self::from_env().is_ok()
    }
}

fn read_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// A failed store operation, as reported by the backend.
#[cfg(feature = "async")]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected the operation.
    #[error("{table} {operation} failed: {message}")]
    Request {
        table: String,
        operation: &'static str,
        message: String,
    },

    /// A row came back in an unexpected shape.
    #[error("unexpected row shape from {table}: {message}")]
    Decode { table: String, message: String },
}

/// Structured row access to the remote relational store.
///
/// The site only inserts, updates and reads rows by table name; anything
/// smarter lives on the other side of this boundary. Rows travel as JSON
/// objects matching the table columns.
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait RelationalStore: Send + Sync {
    /// Inserts one row and returns it as stored.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// Applies `changes` to the row with the given id.
    async fn update_by_id(&self, table: &str, id: &str, changes: Value) -> Result<(), StoreError>;

    /// Reads every row of a table, in the backend's default order.
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, StoreError>;
}
