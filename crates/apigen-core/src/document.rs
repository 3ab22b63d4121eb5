//! Swagger / OpenAPI document loading and lookups.
//!
//! A [`SwaggerDocument`] wraps the raw JSON of a Swagger 2.0 or OpenAPI 3.x
//! document. Loading is the only fallible part; every accessor degrades to
//! `None` or an empty value when the document lacks the field.
//!
//! # Examples
//!
//! ```no_run
//! use apigen_core::document::{Dialect, SwaggerDocument};
//! use apigen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let doc = SwaggerDocument::from_file_or_url("http://127.0.0.1:8088/api-json").await?;
//! if doc.dialect() == Dialect::OpenApi3 {
//!     println!("{} paths", doc.paths().map_or(0, |p| p.len()));
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::{model::BaseInfo, utils::strip_line_breaks, Error};

// External imports (alphabetized)
use serde_json::{Map, Value as JsonValue};
use tokio::fs;

/// Which field names the document uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `definitions`, `schema`-wrapped body parameters
    Swagger2,
    /// `components.schemas`, `requestBody`
    OpenApi3,
}

/// A parsed Swagger 2.0 or OpenAPI 3.x document
#[derive(Debug, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct SwaggerDocument {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl From<JsonValue> for SwaggerDocument {
    fn from(json: JsonValue) -> Self {
        Self { json }
    }
}

impl SwaggerDocument {
    /// Load a document from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Load a document from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fetch a document from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        log::info!("Fetching document from {}", url);
        let response = reqwest::get(url).await.map_err(|e| Error::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(Error::fetch(url, format!("HTTP {}", response.status())));
        }

        let content = response.text().await.map_err(|e| Error::fetch(url, e))?;

        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse document from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(json) = serde_json::from_str::<JsonValue>(content) {
            return Self::accept(json);
        }

        if let Ok(json) = serde_yaml::from_str::<JsonValue>(content) {
            return Self::accept(json);
        }

        Err("content is neither valid JSON nor YAML".to_string())
    }

    fn accept(json: JsonValue) -> Result<Self, String> {
        if json.is_object() {
            Ok(Self { json })
        } else {
            Err("document root is not an object".to_string())
        }
    }

    /// The presence of a top-level `openapi` key selects the OpenAPI 3 field names
    pub fn dialect(&self) -> Dialect {
        if self.json.get("openapi").is_some() {
            Dialect::OpenApi3
        } else {
            Dialect::Swagger2
        }
    }

    /// Title, description and version from the `info` block
    pub fn base_info(&self) -> BaseInfo {
        let field = |name: &str| {
            self.json
                .get("info")
                .and_then(|info| info.get(name))
                .and_then(JsonValue::as_str)
                .map(strip_line_breaks)
                .unwrap_or_default()
        };
        BaseInfo {
            title: field("title"),
            description: field("description"),
            version: field("version"),
        }
    }

    /// Named schema definitions for the document's dialect
    pub fn definitions(&self) -> Option<&Map<String, JsonValue>> {
        match self.dialect() {
            Dialect::OpenApi3 => self.json.get("components")?.get("schemas")?.as_object(),
            Dialect::Swagger2 => self.json.get("definitions")?.as_object(),
        }
    }

    /// The `paths` object
    pub fn paths(&self) -> Option<&Map<String, JsonValue>> {
        self.json.get("paths")?.as_object()
    }

    /// Top-level tag declarations as `(name, description)` pairs
    pub fn tags(&self) -> Vec<(String, Option<String>)> {
        self.json
            .get("tags")
            .and_then(JsonValue::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| {
                        let name = tag.get("name")?.as_str()?.to_string();
                        let description = tag
                            .get("description")
                            .and_then(JsonValue::as_str)
                            .map(String::from);
                        Some((name, description))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Follow a local `$ref` such as `#/components/parameters/PageSize`
    pub fn resolve_ref(&self, reference: &str) -> Option<&JsonValue> {
        let pointer = reference.strip_prefix('#')?;
        self.json.pointer(pointer)
    }

    /// Return `fragment` itself, or its target when it is a local `$ref`
    pub fn deref<'a>(&'a self, fragment: &'a JsonValue) -> Option<&'a JsonValue> {
        match fragment.get("$ref").and_then(JsonValue::as_str) {
            Some(reference) => self.resolve_ref(reference),
            None => Some(fragment),
        }
    }
}
