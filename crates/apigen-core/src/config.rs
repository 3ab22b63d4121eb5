//! Configuration management for apigen client generation.
//!
//! A [`Config`] describes one generation entry: where the document lives, which
//! base URL generated requests use and where the output goes. A [`ConfigFile`]
//! holds several entries for a batch run and can be written in YAML, TOML or JSON.
//!
//! # Examples
//!
//! ```no_run
//! use apigen_core::config::{Config, ConfigFile};
//!
//! # #[tokio::main]
//! # async fn main() -> apigen_core::Result<()> {
//! // Create a config programmatically
//! let config = Config::new("http://127.0.0.1:8088/api-json", "/api", "src/service");
//! config.validate()?;
//!
//! // Or load a batch from a config file
//! let batch = ConfigFile::from_file("apigen.yaml").await?;
//! for entry in &batch.configs {
//!     println!("{}", entry.swagger_url);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// One generation entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File path or URL of the Swagger/OpenAPI document
    pub swagger_url: String,

    /// Base URL prepended to every generated request
    pub api_base: String,

    /// Output directory for generated code
    pub out_path: String,

    /// Optional directory with custom templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpl_path: Option<String>,
}

impl Config {
    /// Create a new Config without a custom template directory
    pub fn new(
        swagger_url: impl Into<String>,
        api_base: impl Into<String>,
        out_path: impl Into<String>,
    ) -> Self {
        Self {
            swagger_url: swagger_url.into(),
            api_base: api_base.into(),
            out_path: out_path.into(),
            tpl_path: None,
        }
    }

    /// Use templates from `tpl_path` instead of the built-in ones
    pub fn with_tpl_path(mut self, tpl_path: impl Into<String>) -> Self {
        self.tpl_path = Some(tpl_path.into());
        self
    }

    /// Check that every required field is present.
    ///
    /// Runs before any fetch, so a bad entry fails without touching the network.
    pub fn validate(&self) -> crate::Result<()> {
        let missing: Vec<&str> = [
            ("swagger_url", &self.swagger_url),
            ("api_base", &self.api_base),
            ("out_path", &self.out_path),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        if self.swagger_url.starts_with("http://") || self.swagger_url.starts_with("https://") {
            Url::parse(&self.swagger_url).map_err(|e| {
                Error::config(format!("invalid swagger_url '{}': {}", self.swagger_url, e))
            })?;
        }

        Ok(())
    }

    /// Output directory as a path
    pub fn out_dir(&self) -> PathBuf {
        PathBuf::from(&self.out_path)
    }

    /// Custom template directory, when one is configured
    pub fn tpl_dir(&self) -> Option<PathBuf> {
        self.tpl_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// A batch of generation entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub configs: Vec<Config>,
}

impl ConfigFile {
    /// Load a batch from a file; the extension selects YAML, TOML or JSON
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let file: Self = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "unsupported config file format: {}",
                    path.display()
                )))
            }
        };
        Ok(file)
    }

    /// Save the batch as YAML
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl From<Config> for ConfigFile {
    fn from(config: Config) -> Self {
        Self {
            configs: vec![config],
        }
    }
}
