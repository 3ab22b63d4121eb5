//! Caller-supplied naming policy for controllers, methods and models.
//!
//! The normalizer never formats names on its own; every controller tag, path and
//! schema name goes through a [`NamingPolicy`]. The defaults reproduce the usual
//! TypeScript client conventions:
//!
//! - controllers: `User` -> `UserApi` (unchanged when the tag already contains `Api`)
//! - methods: `/users/{id}` -> `id` (camel-cased last path segment)
//! - models: `Page[UserDto]` -> `PageUserDto` (`.`, `,`, `[` and `]` stripped)
//!
//! # Examples
//!
//! ```
//! use apigen_core::naming::NamingPolicy;
//!
//! let naming = NamingPolicy::default().with_model_name(|name| format!("I{name}"));
//! assert_eq!(naming.controller_name("User"), "UserApi");
//! assert_eq!(naming.model_name("UserDto"), "IUserDto");
//! ```

use std::{fmt, sync::Arc};

use crate::utils::to_camel_case;

type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The three naming functions used while building the API model
#[derive(Clone)]
pub struct NamingPolicy {
    controller: NameFn,
    method: NameFn,
    model: NameFn,
}

impl NamingPolicy {
    /// Format a controller name from an operation tag
    pub fn controller_name(&self, tag: &str) -> String {
        (self.controller)(tag)
    }

    /// Format a method name from a path template
    pub fn method_name(&self, path: &str) -> String {
        (self.method)(path)
    }

    /// Format a model or enum name from a schema name
    pub fn model_name(&self, name: &str) -> String {
        (self.model)(name)
    }

    /// Replace the controller naming function
    pub fn with_controller_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.controller = Arc::new(f);
        self
    }

    /// Replace the method naming function
    pub fn with_method_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.method = Arc::new(f);
        self
    }

    /// Replace the model naming function
    pub fn with_model_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.model = Arc::new(f);
        self
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            controller: Arc::new(default_controller_name),
            method: Arc::new(default_method_name),
            model: Arc::new(default_model_name),
        }
    }
}

impl fmt::Debug for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamingPolicy").finish_non_exhaustive()
    }
}

/// Append `Api` unless the tag already contains it
pub fn default_controller_name(tag: &str) -> String {
    if tag.contains("Api") {
        tag.to_string()
    } else {
        format!("{tag}Api")
    }
}

/// Camel-case the last segment of a path; the root path has no name
pub fn default_method_name(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return String::new();
    }
    let segment = path.rfind('/').map_or(path, |i| &path[i..]);
    to_camel_case(segment)
}

/// Strip `.`, `,`, `[` and `]` from a schema name
pub fn default_model_name(name: &str) -> String {
    name.replace(['.', ',', '[', ']'], "")
}
