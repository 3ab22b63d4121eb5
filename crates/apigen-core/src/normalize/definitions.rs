//! DTO model and enum extraction from schema definitions

use serde_json::{Map, Value as JsonValue};

use crate::{
    document::SwaggerDocument,
    model::{ApiEnum, ApiModel, ApiProperty, EnumItem},
    schema::TypeResolver,
    utils::strip_line_breaks,
};

/// Extensions carrying display names for enum values, checked in order
const ENUM_NAME_EXTENSIONS: [&str; 2] = ["x-enumNames", "x-enum-varnames"];

/// Models and enums in definition order
#[derive(Debug, Default)]
pub struct Definitions {
    pub models: Vec<ApiModel>,
    pub enums: Vec<ApiEnum>,
}

/// Build a model or enum for every named schema definition
pub fn extract_definitions(doc: &SwaggerDocument, resolver: &TypeResolver<'_>) -> Definitions {
    let Some(definitions) = doc.definitions() else {
        log::debug!("Document has no schema definitions");
        return Definitions::default();
    };

    definitions
        .iter()
        .fold(Definitions::default(), |mut acc, (name, definition)| {
            if let Some(values) = definition.get("enum").and_then(JsonValue::as_array) {
                acc.enums.push(build_enum(name, definition, values, resolver));
            } else {
                acc.models.push(build_model(name, definition, resolver));
            }
            acc
        })
}

fn build_enum(
    name: &str,
    definition: &JsonValue,
    values: &[JsonValue],
    resolver: &TypeResolver<'_>,
) -> ApiEnum {
    let display_names = ENUM_NAME_EXTENSIONS
        .iter()
        .find_map(|ext| definition.get(*ext).and_then(JsonValue::as_array));

    let items = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let literal = literal_string(value);
            let item_name = display_names
                .and_then(|names| names.get(i))
                .map(literal_string)
                .unwrap_or_else(|| literal.clone());
            EnumItem {
                name: item_name,
                value: coerce_number(value),
                literal,
            }
        })
        .collect();

    ApiEnum {
        name: resolver.model_name(name),
        description: description_of(definition),
        items,
    }
}

fn build_model(name: &str, definition: &JsonValue, resolver: &TypeResolver<'_>) -> ApiModel {
    let mut model = ApiModel {
        name: resolver.model_name(name),
        description: description_of(definition),
        base_model: None,
        properties: Vec::new(),
        is_parameter: false,
    };

    if let Some(members) = definition.get("allOf").and_then(JsonValue::as_array) {
        for member in members {
            if let Some(reference) = member.get("$ref").and_then(JsonValue::as_str) {
                model.base_model = Some(resolver.ref_name(reference));
            } else if let Some(properties) = member.get("properties").and_then(JsonValue::as_object)
            {
                model
                    .properties
                    .extend(format_properties(properties, required_of(member), resolver));
            }
        }
    } else if let Some(properties) = definition.get("properties").and_then(JsonValue::as_object) {
        model.properties = format_properties(properties, required_of(definition), resolver);
    }

    model
}

/// Properties in declaration order.
///
/// An explicit `nullable` / `x-nullable` wins; otherwise a property is nullable
/// unless `required` names it.
fn format_properties(
    properties: &Map<String, JsonValue>,
    required: Vec<&str>,
    resolver: &TypeResolver<'_>,
) -> Vec<ApiProperty> {
    properties
        .iter()
        .map(|(name, property)| {
            let explicit = ["nullable", "x-nullable"]
                .iter()
                .find_map(|key| property.get(*key).and_then(JsonValue::as_bool));
            ApiProperty {
                name: name.clone(),
                description: description_of(property),
                data_type: resolver.resolve(Some(property)),
                nullable: explicit.unwrap_or_else(|| !required.contains(&name.as_str())),
            }
        })
        .collect()
}

fn required_of(schema: &JsonValue) -> Vec<&str> {
    schema
        .get("required")
        .and_then(JsonValue::as_array)
        .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default()
}

pub(crate) fn description_of(fragment: &JsonValue) -> String {
    fragment
        .get("description")
        .and_then(JsonValue::as_str)
        .map(strip_line_breaks)
        .unwrap_or_default()
}

fn literal_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Number conversion of a raw enum value
fn coerce_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) if s.trim().is_empty() => Some(0.0),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::Null => Some(0.0),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
