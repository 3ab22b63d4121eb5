//! apigen Core Library
//!
//! This library turns Swagger 2.0 and OpenAPI 3.x documents into a normalized
//! API model of controllers, methods, parameters, models and enums, and renders
//! that model into a TypeScript client.
//!
//! # Examples
//!
//! ```
//! use apigen_core::{Normalizer, SwaggerDocument};
//! use serde_json::json;
//!
//! let doc = SwaggerDocument::from(json!({
//!     "openapi": "3.0.0",
//!     "paths": {"/users/{id}": {"get": {"tags": ["User"]}}}
//! }));
//! let data = Normalizer::default().normalize(&doc);
//! assert_eq!(data.controllers[0].name, "UserApi");
//! assert_eq!(data.controllers[0].methods[0].name, "id");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod generate;
pub mod model;
pub mod naming;
pub mod normalize;
pub mod schema;
pub mod templates;
pub mod utils;

pub use crate::{
    config::{Config, ConfigFile},
    document::{Dialect, SwaggerDocument},
    error::{Error, Result},
    generate::{generate, GenerateReport},
    model::ApiData,
    naming::NamingPolicy,
    normalize::Normalizer,
    templates::{BaseAction, OutputLayout, TemplateManager, TemplateOptions},
};
