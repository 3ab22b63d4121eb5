//! Fetch, normalize and render against a mock document server

use apigen_core::{
    generate, BaseAction, Config, ConfigFile, Error, NamingPolicy, Result,
};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPENAPI: &str = include_str!("fixtures/users.openapi.v3.json");

#[tokio::test]
async fn test_generate_from_url() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api-json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OPENAPI))
        .mount(&server)
        .await;

    let out = tempdir()?;
    let config = Config::new(
        format!("{}/api-json", server.uri()),
        "http://localhost:8080",
        out.path().to_string_lossy(),
    );
    let report = generate(&config, &NamingPolicy::default(), BaseAction::Regenerate).await?;

    assert_eq!(report.controllers, 2);
    assert_eq!(report.models, 4);
    assert_eq!(report.enums, 1);
    assert_eq!(report.render.files.len(), 4);

    let base = tokio::fs::read_to_string(out.path().join("base/useAxios.ts")).await?;
    assert!(base.contains("'http://localhost:8080'"));

    let user = tokio::fs::read_to_string(out.path().join("api/UserApi.ts")).await?;
    assert!(user.contains("import { UserDto, PageUserDto, CreateUserDto } from '../model';"));
    assert!(user.contains("static async users_1("));
    assert!(user.contains("data: body,"));
    assert!(user.contains("'page_size': pageSize,"));

    let models = tokio::fs::read_to_string(out.path().join("model/index.ts")).await?;
    assert!(models.contains("export enum Role {"));
    assert!(models.contains("'Admin' = 0,"));
    assert!(models.contains("'Guest' = 1,"));
    assert!(models.contains("export interface PageUserDto {"));
    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_leaves_output_untouched() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api-json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let out = tempdir()?;
    tokio::fs::create_dir_all(out.path().join("base")).await?;
    let config = Config::new(
        format!("{}/api-json", server.uri()),
        "/api",
        out.path().to_string_lossy(),
    );
    let err = generate(&config, &NamingPolicy::default(), BaseAction::Regenerate)
        .await
        .unwrap_err();

    assert!(err.is_fetch());
    assert!(out.path().join("base").is_dir());
    Ok(())
}

#[tokio::test]
async fn test_batch_entries_are_independent() -> Result<()> {
    let dir = tempdir()?;
    let doc_path = dir.path().join("users.json");
    tokio::fs::write(&doc_path, OPENAPI).await?;

    let config_path = dir.path().join("apigen.yaml");
    let yaml = format!(
        "configs:\n  - swagger_url: {doc}\n    api_base: /api\n  - swagger_url: {doc}\n    api_base: /api\n    out_path: {out}\n",
        doc = doc_path.display(),
        out = dir.path().join("service").display(),
    );
    tokio::fs::write(&config_path, yaml).await?;

    let batch = ConfigFile::from_file(&config_path).await?;
    assert_eq!(batch.configs.len(), 2);

    let mut results = Vec::new();
    for entry in &batch.configs {
        results.push(generate(entry, &NamingPolicy::default(), BaseAction::Keep).await);
    }

    assert!(matches!(results[0], Err(Error::Config(_))));
    assert!(results[1].is_ok());
    assert!(dir.path().join("service/api/UserApi.ts").is_file());
    Ok(())
}

#[tokio::test]
async fn test_default_action_keeps_unrelated_files() -> Result<()> {
    let dir = tempdir()?;
    let doc_path = dir.path().join("users.json");
    tokio::fs::write(&doc_path, OPENAPI).await?;
    let out = dir.path().join("src");
    tokio::fs::create_dir_all(&out).await?;
    tokio::fs::write(out.join("main.ts"), "user code").await?;

    let config = Config::new(doc_path.to_string_lossy(), "/api", out.to_string_lossy());
    let report = generate(&config, &NamingPolicy::default(), BaseAction::default()).await?;

    assert!(report.render.base_written);
    assert_eq!(tokio::fs::read_to_string(out.join("main.ts")).await?, "user code");
    assert!(out.join("api/UserApi.ts").is_file());
    Ok(())
}
