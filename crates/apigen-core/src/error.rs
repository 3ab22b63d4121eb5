//! Error handling for the apigen library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Only fetch, configuration, parse,
//! template and I/O failures surface here; schema anomalies inside a document are
//! absorbed by the normalizer and never become errors.
//!
//! # Examples
//!
//! ```
//! use apigen_core::error::{Error, Result};
//!
//! fn check_url(url: &str) -> Result<()> {
//!     if url.is_empty() {
//!         return Err(Error::config("swagger_url must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_url("").is_err());
//! ```

use thiserror::Error;

/// Result type for apigen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apigen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document source could not be reached or answered with a non-success status
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The document body is not a usable Swagger/OpenAPI document
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new fetch error
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error came from the document source rather than local setup
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
