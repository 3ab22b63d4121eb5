//! Code generation pipeline for one configuration entry

use std::path::PathBuf;

use crate::{
    config::Config,
    document::SwaggerDocument,
    error::Result,
    model::ApiData,
    naming::NamingPolicy,
    normalize::Normalizer,
    templates::{BaseAction, RenderReport, TemplateManager, TemplateOptions},
};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub out_dir: PathBuf,
    pub controllers: usize,
    pub models: usize,
    pub enums: usize,
    pub render: RenderReport,
}

/// Load and normalize the document an entry points at
pub async fn load_api_data(config: &Config, naming: &NamingPolicy) -> Result<ApiData> {
    config.validate()?;
    let doc = SwaggerDocument::from_file_or_url(&config.swagger_url).await?;
    Ok(Normalizer::new(naming.clone()).normalize(&doc))
}

/// Main entry point for code generation
pub async fn generate(
    config: &Config,
    naming: &NamingPolicy,
    action: BaseAction,
) -> Result<GenerateReport> {
    // 1. Validate, load and normalize the document
    let data = load_api_data(config, naming).await?;

    // 2. Initialize template manager with tpl_path from config if available
    let manager = TemplateManager::new(config.tpl_dir())?;

    // 3. Render into the output directory
    let options = TemplateOptions::new(config, data.base_info.clone());
    let out_dir = config.out_dir();
    let render = manager.render(&data, &options, &out_dir, action).await?;

    Ok(GenerateReport {
        out_dir,
        controllers: data.controllers.len(),
        models: data.models.len(),
        enums: data.enums.len(),
        render,
    })
}
