//! Normalization of a Swagger 2 / OpenAPI 3 document into [`ApiData`]

mod controllers;
mod definitions;
mod ordering;

pub use controllers::{ControllerBuilder, DEFAULT_BODY_NAME, DEFAULT_TAG};
pub use definitions::{extract_definitions, Definitions};
pub use ordering::{dedupe_name, finalize, required_first};

use crate::{
    document::SwaggerDocument,
    model::{ApiController, ApiData, ApiModel},
    naming::NamingPolicy,
    schema::TypeResolver,
};

/// Turns documents into API models under one naming policy
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    naming: NamingPolicy,
}

impl Normalizer {
    pub fn new(naming: NamingPolicy) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &NamingPolicy {
        &self.naming
    }

    /// Build the API model of `doc`.
    ///
    /// Never fails: missing sections produce empty collections and unknown
    /// schema shapes fall back to a primitive.
    pub fn normalize(&self, doc: &SwaggerDocument) -> ApiData {
        let resolver = TypeResolver::new(&self.naming);
        let Definitions { mut models, enums } = extract_definitions(doc, &resolver);
        let controllers = finalize(ControllerBuilder::new(doc, &self.naming).build());
        mark_parameter_models(&mut models, &controllers);

        let base_info = doc.base_info();
        log::info!(
            "Normalized {:?} document '{}': {} controllers, {} models, {} enums",
            doc.dialect(),
            base_info.title,
            controllers.len(),
            models.len(),
            enums.len()
        );

        ApiData {
            base_info,
            controllers,
            models,
            enums,
        }
    }
}

/// Flag every model some controller imports
fn mark_parameter_models(models: &mut [ApiModel], controllers: &[ApiController]) {
    for model in models.iter_mut() {
        model.is_parameter = controllers
            .iter()
            .any(|c| c.import_models.iter().any(|m| *m == model.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNDOCUMENTED;
    use serde_json::json;

    fn normalize(doc: serde_json::Value) -> ApiData {
        Normalizer::default().normalize(&SwaggerDocument::from(doc))
    }

    #[test]
    fn test_empty_document() {
        let data = normalize(json!({"openapi": "3.0.0"}));
        assert!(data.controllers.is_empty());
        assert!(data.models.is_empty());
        assert!(data.enums.is_empty());
        assert_eq!(data.base_info.title, "");
    }

    #[test]
    fn test_parameter_models_are_marked() {
        let data = normalize(json!({
            "swagger": "2.0",
            "info": {"title": "Pets", "version": "1"},
            "definitions": {
                "Pet": {"properties": {"owner": {"$ref": "#/definitions/Owner"}}},
                "Owner": {"properties": {"name": {"type": "string"}}},
                "PetQuery": {"properties": {"name": {"type": "string"}}}
            },
            "paths": {
                "/pet/find": {"post": {
                    "tags": ["Pet"],
                    "parameters": [{"name": "q", "in": "body", "schema": {"$ref": "#/definitions/PetQuery"}}],
                    "responses": {"200": {"schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}}}
                }}
            }
        }));
        assert!(data.model("PetQuery").is_some_and(|m| m.is_parameter));
        assert!(data.model("Pet").is_some_and(|m| m.is_parameter));
        assert!(data.model("Owner").is_some_and(|m| !m.is_parameter));
        assert_eq!(data.base_info.title, "Pets");
    }

    #[test]
    fn test_controllers_are_finalized() {
        let data = normalize(json!({
            "openapi": "3.0.0",
            "tags": [{"name": "Unused"}, {"name": "User", "description": "Users"}],
            "paths": {
                "/user/get": {"get": {"tags": ["User"]}},
                "/user/getList": {"get": {"tags": ["User"]}},
                "/user/add": {"post": {"tags": ["User"]}}
            }
        }));
        assert_eq!(data.controllers.len(), 1);
        let user = data.controller("UserApi").expect("UserApi");
        assert_eq!(user.description, "Users");
        let names: Vec<_> = user.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["getList", "get", "add"]);
        assert!(data.controller("UnusedApi").is_none());
    }

    #[test]
    fn test_custom_naming_policy() {
        let naming = NamingPolicy::default()
            .with_controller_name(|tag| format!("{tag}Service"))
            .with_model_name(|name| format!("I{name}"));
        let normalizer = Normalizer::new(naming);
        let data = normalizer.normalize(&SwaggerDocument::from(json!({
            "swagger": "2.0",
            "definitions": {"Pet": {"properties": {}}},
            "paths": {"/pet": {"get": {
                "tags": ["Pet"],
                "responses": {"200": {"schema": {"$ref": "#/definitions/Pet"}}}
            }}}
        })));
        assert_eq!(data.controllers[0].name, "PetService");
        assert_eq!(data.controllers[0].description, UNDOCUMENTED);
        assert_eq!(data.controllers[0].import_models, vec!["IPet".to_string()]);
        assert!(data.model("IPet").is_some_and(|m| m.is_parameter));
    }
}
