//! Controller and method building from the `paths` object

use indexmap::IndexMap;
use serde_json::{json, Map, Value as JsonValue};

use super::{
    definitions::description_of,
    ordering::{dedupe_name, required_first},
};
use crate::{
    document::{Dialect, SwaggerDocument},
    model::{
        ApiController, ApiMethod, ApiParameter, HttpMethod, ParameterLocation, TypeDescriptor,
        UNDOCUMENTED,
    },
    naming::NamingPolicy,
    schema::TypeResolver,
    utils::{strip_line_breaks, to_camel_case},
};

/// Tag used for operations that declare none
pub const DEFAULT_TAG: &str = "Default";

/// Name of the body parameter built from an OpenAPI `requestBody` without `x-name`
pub const DEFAULT_BODY_NAME: &str = "input";

/// Builds controllers in a single traversal of the document's paths
#[derive(Debug)]
pub struct ControllerBuilder<'a> {
    doc: &'a SwaggerDocument,
    dialect: Dialect,
    naming: &'a NamingPolicy,
    resolver: TypeResolver<'a>,
    controllers: IndexMap<String, ApiController>,
}

impl<'a> ControllerBuilder<'a> {
    /// Create a builder; controllers for the document's declared tags exist up front
    pub fn new(doc: &'a SwaggerDocument, naming: &'a NamingPolicy) -> Self {
        let mut builder = Self {
            doc,
            dialect: doc.dialect(),
            naming,
            resolver: TypeResolver::new(naming),
            controllers: IndexMap::new(),
        };
        for (tag, description) in doc.tags() {
            let controller = builder.controller_for(&tag);
            if let Some(description) = description.filter(|d| !d.is_empty()) {
                controller.description = strip_line_breaks(&description);
            }
        }
        builder
    }

    /// Walk every operation and return the controllers in first-seen order
    pub fn build(mut self) -> Vec<ApiController> {
        let doc = self.doc;
        let Some(paths) = doc.paths() else {
            log::warn!("Document has no paths");
            return self.controllers.into_values().collect();
        };

        for (url, path_item) in paths {
            let Some(path_item) = doc.deref(path_item).and_then(JsonValue::as_object) else {
                continue;
            };
            let shared = path_item.get("parameters").and_then(JsonValue::as_array);

            for (key, operation) in path_item {
                let Some(verb) = HttpMethod::parse(key) else {
                    continue;
                };
                self.add_operation(url, verb, operation, shared);
            }
        }

        self.controllers.into_values().collect()
    }

    fn controller_for(&mut self, tag: &str) -> &mut ApiController {
        let name = self.naming.controller_name(tag);
        self.controllers
            .entry(name.clone())
            .or_insert_with(|| ApiController {
                name,
                description: UNDOCUMENTED.to_string(),
                methods: Vec::new(),
                import_models: Vec::new(),
            })
    }

    fn add_operation(
        &mut self,
        url: &str,
        verb: HttpMethod,
        operation: &JsonValue,
        shared: Option<&Vec<JsonValue>>,
    ) {
        let tag = operation
            .get("tags")
            .and_then(JsonValue::as_array)
            .and_then(|tags| tags.first())
            .and_then(JsonValue::as_str)
            .unwrap_or(DEFAULT_TAG);

        let base_name = self.naming.method_name(url);
        let mut method = self.build_method(url, verb, operation, shared);

        let controller = self.controller_for(tag);
        method.name = dedupe_name(
            &base_name,
            controller.methods.iter().map(|m| m.name.as_str()),
        );
        log::debug!(
            "{} {:?} {} -> {}.{}",
            url,
            verb,
            tag,
            controller.name,
            method.name
        );

        let references = method
            .all_parameters()
            .map(|p| &p.data_type)
            .chain(std::iter::once(&method.response))
            .filter_map(|ty| ty.referenced_model.as_deref());
        for model in references {
            if !controller.import_models.iter().any(|m| m == model) {
                controller.import_models.push(model.to_string());
            }
        }

        controller.methods.push(method);
    }

    fn build_method(
        &self,
        url: &str,
        verb: HttpMethod,
        operation: &JsonValue,
        shared: Option<&Vec<JsonValue>>,
    ) -> ApiMethod {
        let description = ["summary", "description"]
            .iter()
            .filter_map(|key| operation.get(*key).and_then(JsonValue::as_str))
            .map(strip_line_breaks)
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| UNDOCUMENTED.to_string());

        let mut method = ApiMethod {
            name: String::new(),
            url: url.to_string(),
            verb,
            description,
            parameters: Vec::new(),
            parameters_query: Vec::new(),
            parameters_body: Vec::new(),
            parameters_form_data: Vec::new(),
            parameters_header: Vec::new(),
            parameters_path: Vec::new(),
            response: self.response_type(operation),
        };

        let mut taken: Vec<String> = Vec::new();
        for raw in self.raw_parameters(operation, shared) {
            let Some(parameter) = self.build_parameter(&raw, &taken) else {
                continue;
            };
            taken.push(parameter.camel_case_name.clone());

            match parameter.location {
                ParameterLocation::Query => method.parameters_query.push(parameter.clone()),
                ParameterLocation::Body => method.parameters_body.push(parameter.clone()),
                ParameterLocation::FormData => method.parameters_form_data.push(parameter.clone()),
                ParameterLocation::Path => method.parameters_path.push(parameter.clone()),
                ParameterLocation::Header => {
                    method.parameters_header.push(parameter);
                    continue;
                }
            }
            method.parameters.push(parameter);
        }
        required_first(&mut method.parameters);

        method
    }

    /// Parameter objects in processing order: the OpenAPI request body first, then
    /// path-level parameters not overridden by the operation, then the operation's own
    fn raw_parameters(
        &self,
        operation: &JsonValue,
        shared: Option<&Vec<JsonValue>>,
    ) -> Vec<JsonValue> {
        let mut raw = Vec::new();

        if self.dialect == Dialect::OpenApi3 {
            if let Some(body) = operation.get("requestBody") {
                match self.doc.deref(body) {
                    Some(body) => raw.push(self.body_parameter(body)),
                    None => log::warn!("Unresolvable request body {}", body),
                }
            }
        }

        let own = self.dereferenced(operation.get("parameters").and_then(JsonValue::as_array));
        let own_keys: Vec<_> = own.iter().map(parameter_key).collect();

        raw.extend(
            self.dereferenced(shared)
                .into_iter()
                .filter(|p| !own_keys.contains(&parameter_key(p))),
        );
        raw.extend(own);
        raw
    }

    fn dereferenced(&self, parameters: Option<&Vec<JsonValue>>) -> Vec<JsonValue> {
        parameters
            .into_iter()
            .flatten()
            .filter_map(|p| {
                let resolved = self.doc.deref(p).cloned();
                if resolved.is_none() {
                    log::warn!("Unresolvable parameter {}", p);
                }
                resolved
            })
            .collect()
    }

    /// Synthetic `in: body` parameter for an OpenAPI `requestBody`
    fn body_parameter(&self, body: &JsonValue) -> JsonValue {
        let name = body
            .get("x-name")
            .and_then(JsonValue::as_str)
            .unwrap_or(DEFAULT_BODY_NAME);
        let required = body
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(true);
        let description = Some(description_of(body))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UNDOCUMENTED.to_string());
        let schema = body
            .get("content")
            .and_then(JsonValue::as_object)
            .and_then(media_schema)
            .cloned()
            .unwrap_or(JsonValue::Null);

        json!({
            "name": name,
            "in": ParameterLocation::Body.as_str(),
            "required": required,
            "description": description,
            "schema": schema,
        })
    }

    fn build_parameter(&self, raw: &JsonValue, taken: &[String]) -> Option<ApiParameter> {
        let name = raw
            .get("name")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let location_str = raw.get("in").and_then(JsonValue::as_str).unwrap_or_default();
        let Some(location) = ParameterLocation::parse(location_str) else {
            log::warn!("Skipping parameter '{}' with unsupported location '{}'", name, location_str);
            return None;
        };

        let default = raw
            .get("default")
            .or_else(|| raw.get("schema").and_then(|s| s.get("default")))
            .cloned();

        Some(ApiParameter {
            name: name.to_string(),
            camel_case_name: dedupe_name(
                &parameter_identifier(name),
                taken.iter().map(String::as_str),
            ),
            description: description_of(raw),
            location,
            required: raw
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            default,
            data_type: self.resolver.resolve(Some(raw)),
        })
    }

    /// Only the `200` response is modelled
    fn response_type(&self, operation: &JsonValue) -> TypeDescriptor {
        let Some(ok) = operation
            .get("responses")
            .and_then(|responses| responses.get("200"))
            .and_then(|ok| self.doc.deref(ok))
        else {
            return TypeDescriptor::any();
        };

        match self.dialect {
            Dialect::OpenApi3 => match ok.get("content").and_then(JsonValue::as_object) {
                Some(content) => self.resolver.resolve(media_schema(content)),
                None => TypeDescriptor::any(),
            },
            Dialect::Swagger2 => self.resolver.resolve(ok.get("schema")),
        }
    }
}

impl ApiMethod {
    /// Every parameter, headers included
    fn all_parameters(&self) -> impl Iterator<Item = &ApiParameter> {
        self.parameters_body
            .iter()
            .chain(&self.parameters_path)
            .chain(&self.parameters_query)
            .chain(&self.parameters_form_data)
            .chain(&self.parameters_header)
    }
}

/// Schema of the JSON media type, or of the first media type when there is no JSON one
fn media_schema(content: &Map<String, JsonValue>) -> Option<&JsonValue> {
    content
        .get("application/json")
        .or_else(|| content.values().next())
        .and_then(|media| media.get("schema"))
}

/// A parameter is identified by its name together with its location
fn parameter_key(parameter: &JsonValue) -> (Option<&str>, Option<&str>) {
    (
        parameter.get("name").and_then(JsonValue::as_str),
        parameter.get("in").and_then(JsonValue::as_str),
    )
}

/// Identifier for a parameter; `number` and `string` would shadow TypeScript types
fn parameter_identifier(name: &str) -> String {
    let name = match name {
        "number" => "num",
        "string" => "str",
        other => other,
    };
    to_camel_case(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;

    fn build(doc: JsonValue) -> Vec<ApiController> {
        let naming = NamingPolicy::default();
        let doc = SwaggerDocument::from(doc);
        ControllerBuilder::new(&doc, &naming).build()
    }

    #[test]
    fn test_parameter_identifier() {
        assert_eq!(parameter_identifier("number"), "num");
        assert_eq!(parameter_identifier("string"), "str");
        assert_eq!(parameter_identifier("page_size"), "pageSize");
        assert_eq!(parameter_identifier("X-Request-Id"), "xRequestId");
    }

    #[test]
    fn test_groups_by_first_tag() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {
                "/user/list": {"get": {"tags": ["User", "Admin"], "summary": "List\nusers"}},
                "/pet/list": {"get": {"tags": ["PetApi"]}},
                "/health": {"get": {}}
            }
        }));
        let names: Vec<_> = controllers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["UserApi", "PetApi", "DefaultApi"]);
        assert_eq!(controllers[0].description, UNDOCUMENTED);
        assert_eq!(controllers[0].methods[0].name, "list");
        assert_eq!(controllers[0].methods[0].description, "Listusers");
        assert_eq!(controllers[1].methods[0].description, UNDOCUMENTED);
    }

    #[test]
    fn test_declared_tags_precreate_controllers() {
        let controllers = build(json!({
            "swagger": "2.0",
            "tags": [
                {"name": "Unused", "description": "never used"},
                {"name": "User", "description": "User\r\nendpoints"}
            ],
            "paths": {"/user": {"get": {"tags": ["User"]}}}
        }));
        assert_eq!(controllers.len(), 2);
        assert!(controllers[0].methods.is_empty());
        assert_eq!(controllers[1].description, "Userendpoints");
    }

    #[test]
    fn test_method_name_collisions() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {
                "/a/item": {"get": {"tags": ["T"]}, "post": {"tags": ["T"]}, "delete": {"tags": ["T"]}},
                "/b/item": {"get": {"tags": ["T"]}},
                "/c/item": {"get": {"tags": ["Other"]}}
            }
        }));
        let names: Vec<_> = controllers[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["item", "item_1", "item_2", "item_3"]);
        assert_eq!(controllers[1].methods[0].name, "item");
    }

    #[test]
    fn test_non_operation_keys_are_ignored() {
        let controllers = build(json!({
            "openapi": "3.0.0",
            "paths": {
                "/x": {
                    "summary": "shared",
                    "parameters": [],
                    "x-internal": true,
                    "get": {"tags": ["T"]}
                }
            }
        }));
        assert_eq!(controllers[0].methods.len(), 1);
        assert_eq!(controllers[0].methods[0].verb, HttpMethod::Get);
    }

    #[test]
    fn test_parameter_partitioning() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {"/upload/{id}": {"post": {
                "tags": ["File"],
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "type": "integer"},
                    {"name": "verbose", "in": "query", "type": "boolean"},
                    {"name": "Authorization", "in": "header", "required": true, "type": "string"},
                    {"name": "file", "in": "formData", "required": true, "type": "file"},
                    {"name": "session", "in": "cookie", "type": "string"},
                    {"name": "meta", "in": "body", "schema": {"$ref": "#/definitions/Meta"}}
                ]
            }}}
        }));
        let method = &controllers[0].methods[0];
        let combined: Vec<_> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(combined, vec!["id", "file", "verbose", "meta"]);
        assert_eq!(method.parameters_path.len(), 1);
        assert_eq!(method.parameters_query.len(), 1);
        assert_eq!(method.parameters_form_data[0].data_type.rendered, "string | Blob");
        assert_eq!(method.parameters_header[0].camel_case_name, "authorization");
        assert_eq!(method.parameters_body[0].data_type.kind, TypeKind::Reference);
        assert_eq!(controllers[0].import_models, vec!["Meta".to_string()]);
    }

    #[test]
    fn test_camel_case_names_are_unique_per_method() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {"/search": {"get": {
                "tags": ["S"],
                "parameters": [
                    {"name": "page_size", "in": "query", "type": "integer"},
                    {"name": "pageSize", "in": "query", "type": "integer"},
                    {"name": "page-size", "in": "header", "type": "integer"},
                    {"name": "number", "in": "query", "type": "integer"},
                    {"name": "string", "in": "query", "type": "string"}
                ]
            }}}
        }));
        let method = &controllers[0].methods[0];
        let names: Vec<_> = method
            .parameters
            .iter()
            .map(|p| p.camel_case_name.as_str())
            .collect();
        assert_eq!(names, vec!["pageSize", "pageSize_1", "num", "str"]);
        assert_eq!(method.parameters_header[0].camel_case_name, "pageSize_2");
    }

    #[test]
    fn test_openapi_request_body() {
        let controllers = build(json!({
            "openapi": "3.0.0",
            "paths": {"/user/{id}": {"put": {
                "tags": ["User"],
                "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
                "requestBody": {
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/UpdateUserDto"}}}
                },
                "responses": {"200": {"description": "ok"}}
            }}}
        }));
        let method = &controllers[0].methods[0];
        let names: Vec<_> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["input", "id"]);
        let body = &method.parameters_body[0];
        assert!(body.required);
        assert_eq!(body.description, UNDOCUMENTED);
        assert_eq!(body.data_type.rendered, "UpdateUserDto");
        assert_eq!(method.parameters_path[0].data_type.rendered, "number");
        assert_eq!(method.response, TypeDescriptor::any());
    }

    #[test]
    fn test_optional_named_request_body() {
        let controllers = build(json!({
            "openapi": "3.0.0",
            "components": {"requestBodies": {"Upload": {
                "x-name": "payload",
                "required": false,
                "description": "File\nupload",
                "content": {"multipart/form-data": {"schema": {"type": "string"}}}
            }}},
            "paths": {"/upload": {"post": {
                "tags": ["File"],
                "parameters": [{"name": "mode", "in": "query", "required": true, "schema": {"type": "string"}}],
                "requestBody": {"$ref": "#/components/requestBodies/Upload"}
            }}}
        }));
        let method = &controllers[0].methods[0];
        let names: Vec<_> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["mode", "payload"]);
        let body = &method.parameters_body[0];
        assert!(!body.required);
        assert_eq!(body.description, "Fileupload");
        assert_eq!(body.data_type.rendered, "string");
    }

    #[test]
    fn test_swagger_request_body_key_is_ignored() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {"/x": {"post": {"tags": ["T"], "requestBody": {"content": {}}}}}
        }));
        assert!(controllers[0].methods[0].parameters.is_empty());
    }

    #[test]
    fn test_path_level_parameters_and_refs() {
        let controllers = build(json!({
            "openapi": "3.0.0",
            "components": {"parameters": {
                "Page": {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}}
            }},
            "paths": {"/orders/{id}": {
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}},
                    {"name": "lang", "in": "header", "schema": {"type": "string"}}
                ],
                "get": {
                    "tags": ["Order"],
                    "parameters": [
                        {"$ref": "#/components/parameters/Page"},
                        {"$ref": "#/components/parameters/Missing"},
                        {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}
                    ]
                }
            }}
        }));
        let method = &controllers[0].methods[0];
        let names: Vec<_> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "page"]);
        assert_eq!(method.parameters[0].data_type.rendered, "number");
        assert_eq!(method.parameters[1].default, Some(json!(1)));
        assert_eq!(method.parameters_header[0].name, "lang");
    }

    #[test]
    fn test_response_resolution() {
        let controllers = build(json!({
            "openapi": "3.0.0",
            "components": {"responses": {"Users": {
                "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/UserDto"}}}}
            }}},
            "paths": {
                "/a": {"get": {"tags": ["T"], "responses": {"200": {"$ref": "#/components/responses/Users"}}}},
                "/b": {"get": {"tags": ["T"], "responses": {"201": {"content": {"application/json": {"schema": {"type": "string"}}}}}}},
                "/c": {"get": {"tags": ["T"], "responses": {"200": {"content": {"text/plain": {"schema": {"type": "string"}}}}}}},
                "/d": {"get": {"tags": ["T"], "responses": {"200": {"content": {"application/json": {}}}}}}
            }
        }));
        let methods = &controllers[0].methods;
        assert_eq!(methods[0].response.rendered, "Array<UserDto>");
        assert_eq!(methods[1].response, TypeDescriptor::any());
        assert_eq!(methods[2].response.rendered, "string");
        assert_eq!(methods[3].response, TypeDescriptor::void());
        assert_eq!(controllers[0].import_models, vec!["UserDto".to_string()]);
    }

    #[test]
    fn test_swagger_response_schema() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {
                "/pets": {"get": {"tags": ["Pet"], "responses": {"200": {"schema": {"$ref": "#/definitions/Pet"}}}}},
                "/ping": {"get": {"tags": ["Pet"], "responses": {"200": {"description": "pong"}}}}
            }
        }));
        let methods = &controllers[0].methods;
        assert_eq!(methods[0].response, TypeDescriptor::reference("Pet"));
        assert_eq!(methods[1].response, TypeDescriptor::void());
    }

    #[test]
    fn test_imports_are_deduplicated_in_first_use_order() {
        let controllers = build(json!({
            "swagger": "2.0",
            "paths": {
                "/a": {"post": {
                    "tags": ["T"],
                    "parameters": [{"name": "body", "in": "body", "schema": {"$ref": "#/definitions/B"}}],
                    "responses": {"200": {"schema": {"$ref": "#/definitions/A"}}}
                }},
                "/b": {"get": {
                    "tags": ["T"],
                    "parameters": [{"name": "x-trace", "in": "header", "schema": {"$ref": "#/definitions/C"}}],
                    "responses": {"200": {"schema": {"type": "array", "items": {"$ref": "#/definitions/B"}}}}
                }}
            }
        }));
        assert_eq!(
            controllers[0].import_models,
            vec!["B".to_string(), "A".to_string(), "C".to_string()]
        );
    }
}
