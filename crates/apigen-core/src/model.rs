//! The normalized API model handed to the rendering stage.
//!
//! Everything here is plain data: the normalizer builds it once and it is only
//! read afterwards. All types serialize with `serde` so they can be inserted into
//! a template context as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Rendered type used for an absent schema
pub const VOID_TYPE: &str = "void";
/// Rendered type used when a method has no `200` response
pub const ANY_TYPE: &str = "any";
/// Rendered type used for unrecognised schemas
pub const FALLBACK_TYPE: &str = "boolean";
/// Description used when the document does not provide one
pub const UNDOCUMENTED: &str = "No description provided";

/// Kind of a resolved type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// `string`, `number`, `boolean`, `void`, ...
    Primitive,
    /// A named model or enum
    Reference,
    /// A list of another type
    Array,
    /// A union of inline literal values
    Enum,
}

/// A normalized type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// What kind of type this is
    pub kind: TypeKind,
    /// The type as it should appear in generated code
    pub rendered: String,
    /// The model this type points at, directly or as an array element
    pub referenced_model: Option<String>,
}

impl TypeDescriptor {
    /// A primitive type
    pub fn primitive(rendered: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Primitive,
            rendered: rendered.into(),
            referenced_model: None,
        }
    }

    /// The type of an absent schema
    pub fn void() -> Self {
        Self::primitive(VOID_TYPE)
    }

    /// The type of an operation without a `200` response
    pub fn any() -> Self {
        Self::primitive(ANY_TYPE)
    }

    /// The type of a schema that matched no known shape.
    ///
    /// Renders as `boolean` for compatibility with clients generated from
    /// earlier releases, even though `any` would be the more accurate choice.
    pub fn fallback() -> Self {
        Self::primitive(FALLBACK_TYPE)
    }

    /// A reference to a named model
    pub fn reference(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            kind: TypeKind::Reference,
            rendered: model.clone(),
            referenced_model: Some(model),
        }
    }

    /// A list of `element`, keeping the element's model reference
    pub fn array_of(element: TypeDescriptor) -> Self {
        Self {
            kind: TypeKind::Array,
            rendered: format!("Array<{}>", element.rendered),
            referenced_model: element.referenced_model,
        }
    }

    /// A union of inline literals
    pub fn inline_enum(literals: &[JsonValue]) -> Self {
        let rendered = literals
            .iter()
            .map(JsonValue::to_string)
            .collect::<Vec<_>>()
            .join(" | ");
        Self {
            kind: TypeKind::Enum,
            rendered,
            referenced_model: None,
        }
    }
}

/// Title, description and version of the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

/// A property of a DTO model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProperty {
    pub name: String,
    pub description: String,
    pub data_type: TypeDescriptor,
    pub nullable: bool,
}

/// A DTO model built from a schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiModel {
    pub name: String,
    pub description: String,
    /// Parent model for `allOf` single inheritance
    pub base_model: Option<String>,
    pub properties: Vec<ApiProperty>,
    /// Whether any method takes or returns this model
    pub is_parameter: bool,
}

/// One member of an [`ApiEnum`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumItem {
    pub name: String,
    /// Numeric coercion of the raw value, if it has one
    pub value: Option<f64>,
    /// The raw value as a string
    pub literal: String,
}

/// A named enum built from a schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnum {
    pub name: String,
    pub description: String,
    pub items: Vec<EnumItem>,
}

/// Where a parameter is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterLocation {
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "formData")]
    FormData,
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "path")]
    Path,
}

impl ParameterLocation {
    /// Parse the `in` field of a parameter object
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "query" => Some(Self::Query),
            "body" => Some(Self::Body),
            "formData" => Some(Self::FormData),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    /// Returns the location as it appears in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::FormData => "formData",
            Self::Header => "header",
            Self::Path => "path",
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    /// Name as declared in the document
    pub name: String,
    /// Identifier for generated code, unique within the method
    pub camel_case_name: String,
    pub description: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub default: Option<JsonValue>,
    pub data_type: TypeDescriptor,
}

/// HTTP verb of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Parse an operation key of a path item
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "patch" => Some(Self::Patch),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

/// One operation of a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMethod {
    pub name: String,
    pub url: String,
    pub verb: HttpMethod,
    pub description: String,
    /// Every non-header parameter, required ones first
    pub parameters: Vec<ApiParameter>,
    pub parameters_query: Vec<ApiParameter>,
    pub parameters_body: Vec<ApiParameter>,
    pub parameters_form_data: Vec<ApiParameter>,
    pub parameters_header: Vec<ApiParameter>,
    pub parameters_path: Vec<ApiParameter>,
    pub response: TypeDescriptor,
}

/// A group of methods sharing a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiController {
    pub name: String,
    pub description: String,
    pub methods: Vec<ApiMethod>,
    /// Models used by any method, in first-use order
    pub import_models: Vec<String>,
}

/// The finished API model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiData {
    pub base_info: BaseInfo,
    pub controllers: Vec<ApiController>,
    pub models: Vec<ApiModel>,
    pub enums: Vec<ApiEnum>,
}

impl ApiData {
    /// Look up a controller by its normalized name
    pub fn controller(&self, name: &str) -> Option<&ApiController> {
        self.controllers.iter().find(|c| c.name == name)
    }

    /// Look up a model by its normalized name
    pub fn model(&self, name: &str) -> Option<&ApiModel> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Look up an enum by its normalized name
    pub fn enumeration(&self, name: &str) -> Option<&ApiEnum> {
        self.enums.iter().find(|e| e.name == name)
    }
}
