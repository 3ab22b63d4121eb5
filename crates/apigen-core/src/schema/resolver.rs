//! Schema fragment to [`TypeDescriptor`] resolution

use serde_json::Value as JsonValue;

use super::shape::SchemaShape;
use crate::{model::TypeDescriptor, naming::NamingPolicy};

/// Resolves schema fragments against a naming policy.
///
/// Resolution is pure: it never follows `$ref` targets, performs no I/O and never
/// fails. Unions and compositions only look at their first member.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    naming: &'a NamingPolicy,
}

impl<'a> TypeResolver<'a> {
    pub fn new(naming: &'a NamingPolicy) -> Self {
        Self { naming }
    }

    /// Resolve a fragment, which may be absent
    pub fn resolve(&self, fragment: Option<&JsonValue>) -> TypeDescriptor {
        match SchemaShape::classify(fragment) {
            SchemaShape::Absent => TypeDescriptor::void(),
            SchemaShape::Union(first) | SchemaShape::Composition(first) => self.resolve(first),
            SchemaShape::Wrapped(inner) => self.resolve(Some(inner)),
            SchemaShape::Reference(reference) => {
                TypeDescriptor::reference(self.ref_name(reference))
            }
            SchemaShape::InlineEnum(values) => TypeDescriptor::inline_enum(values),
            SchemaShape::Array(items) => TypeDescriptor::array_of(self.resolve(items)),
            SchemaShape::Primitive(primitive) => TypeDescriptor::primitive(primitive.rendered()),
            SchemaShape::Unknown => TypeDescriptor::fallback(),
        }
    }

    /// Model name for a `$ref`: its last path segment through the model naming policy
    pub fn ref_name(&self, reference: &str) -> String {
        let segment = reference.rsplit('/').next().unwrap_or(reference);
        self.model_name(segment)
    }

    /// Model name for a schema definition key
    pub fn model_name(&self, name: &str) -> String {
        self.naming.model_name(name)
    }
}
