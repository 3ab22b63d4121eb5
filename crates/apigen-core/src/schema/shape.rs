//! Classification of raw schema fragments into a closed set of shapes

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Primitive `type` values with a fixed mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// `string`
    String,
    /// `number` and `integer`
    Number,
    /// `boolean`
    Boolean,
    /// Swagger 2 `file`
    File,
}

impl PrimitiveType {
    /// Map a `type` field value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "string" => Some(Self::String),
            "number" | "integer" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// The rendered type name
    pub fn rendered(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::File => "string | Blob",
        }
    }
}

/// The recognised shape of a schema fragment.
///
/// Checks run in a fixed order and the first match wins, so a fragment that has
/// both `allOf` and `$ref` is a [`SchemaShape::Composition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaShape<'a> {
    /// No fragment at all
    Absent,
    /// `oneOf` / `anyOf`, holding the first alternative
    Union(Option<&'a JsonValue>),
    /// `allOf`, holding the first member
    Composition(Option<&'a JsonValue>),
    /// A parameter or response object carrying its schema under `schema`
    Wrapped(&'a JsonValue),
    /// `$ref`, holding the reference string
    Reference(&'a str),
    /// Inline `enum` values
    InlineEnum(&'a [JsonValue]),
    /// `type: array`, holding `items`
    Array(Option<&'a JsonValue>),
    /// A known primitive `type`
    Primitive(PrimitiveType),
    /// Anything else, including a missing or unknown `type`
    Unknown,
}

impl<'a> SchemaShape<'a> {
    /// Classify a schema fragment
    pub fn classify(fragment: Option<&'a JsonValue>) -> Self {
        let Some(fragment) = fragment.filter(|f| !f.is_null()) else {
            return Self::Absent;
        };

        if let Some(members) = first_of(fragment, "oneOf").or_else(|| first_of(fragment, "anyOf")) {
            return Self::Union(members);
        }
        if let Some(members) = first_of(fragment, "allOf") {
            return Self::Composition(members);
        }
        if let Some(inner) = fragment.get("schema") {
            return Self::Wrapped(inner);
        }
        if let Some(reference) = fragment.get("$ref").and_then(JsonValue::as_str) {
            return Self::Reference(reference);
        }
        if let Some(values) = fragment.get("enum").and_then(JsonValue::as_array) {
            return Self::InlineEnum(values);
        }

        match fragment.get("type").and_then(JsonValue::as_str) {
            Some("array") => Self::Array(fragment.get("items")),
            Some(other) => PrimitiveType::parse(other).map_or(Self::Unknown, Self::Primitive),
            None => Self::Unknown,
        }
    }
}

/// `Some(first member)` when `key` holds an array; the inner option is `None` for an empty array
fn first_of<'a>(fragment: &'a JsonValue, key: &str) -> Option<Option<&'a JsonValue>> {
    fragment
        .get(key)
        .and_then(JsonValue::as_array)
        .map(|members| members.first())
}
