//! Template loading and rendering

// Internal imports (std, crate)
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use super::{BaseAction, OutputLayout, TemplateOptions};
use crate::{
    error::{Error, Result},
    model::{ApiController, ApiData},
};

// External imports (alphabetized)
use serde::Serialize;
use tera::{Context, Tera};

/// Renders the shared request helpers
pub const BASE_TEMPLATE: &str = "base.ts.tera";
/// Renders every model and enum into one file
pub const MODEL_TEMPLATE: &str = "model.ts.tera";
/// Renders one controller
pub const CONTROLLER_TEMPLATE: &str = "controller.ts.tera";

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    (
        BASE_TEMPLATE,
        include_str!("../../templates/typescript/base.ts.tera"),
    ),
    (
        MODEL_TEMPLATE,
        include_str!("../../templates/typescript/model.ts.tera"),
    ),
    (
        CONTROLLER_TEMPLATE,
        include_str!("../../templates/typescript/controller.ts.tera"),
    ),
];

/// Files written by one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub files: Vec<PathBuf>,
    /// False when an existing base was kept
    pub base_written: bool,
}

/// Manages loading and rendering of code generation templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
    /// Custom template directory, if any
    template_dir: Option<PathBuf>,
}

impl TemplateManager {
    /// Built-in TypeScript + axios templates
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES)?;
        Ok(Self {
            tera: Arc::new(tera),
            template_dir: None,
        })
    }

    /// Templates from `dir`; any of the three templates it lacks is taken from the built-ins
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::template(format!(
                "Template directory not found: {}",
                dir.display()
            )));
        }
        let dir_str = dir.to_str().ok_or_else(|| {
            Error::template(format!(
                "Template path contains invalid UTF-8: {}",
                dir.display()
            ))
        })?;

        let mut tera = Tera::new(&format!("{}/**/*.tera", dir_str))?;
        let loaded: Vec<String> = tera.get_template_names().map(String::from).collect();
        let missing: Vec<(&str, &str)> = BUILTIN_TEMPLATES
            .into_iter()
            .filter(|(name, _)| !loaded.iter().any(|l| l == name))
            .collect();
        for (name, _) in &missing {
            log::debug!("{} not in {}, using the built-in one", name, dir.display());
        }
        tera.add_raw_templates(missing)?;

        Ok(Self {
            tera: Arc::new(tera),
            template_dir: Some(dir.to_path_buf()),
        })
    }

    /// Custom templates when a directory is given, built-ins otherwise
    pub fn new(template_dir: Option<PathBuf>) -> Result<Self> {
        match template_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// Get the custom template directory
    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Get a reference to the Tera template engine
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// Render a template with an in-memory context
    pub fn render_to_string<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let context = Context::from_serialize(context).map_err(|e| {
            Error::template(format!("Failed to serialize context for {}: {}", template_name, e))
        })?;
        self.tera.render(template_name, &context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {:?}", template_name, e);
            Error::template(format!("Failed to render template '{}': {}", template_name, e))
        })
    }

    /// Generate a file from a template with a custom context
    pub async fn generate_with_context<T: Serialize>(
        &self,
        template_name: &str,
        context: &T,
        output_path: impl AsRef<Path>,
    ) -> Result<()> {
        let output_path = output_path.as_ref();
        let content = self.render_to_string(template_name, context)?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output_path, &content).await?;

        log::debug!(
            "Rendered {} -> {} ({} bytes)",
            template_name,
            output_path.display(),
            content.len()
        );
        Ok(())
    }

    /// Write the base, the model file and one file per controller under `out_dir`
    pub async fn render(
        &self,
        data: &ApiData,
        options: &TemplateOptions,
        out_dir: impl AsRef<Path>,
        action: BaseAction,
    ) -> Result<RenderReport> {
        let layout = OutputLayout::new(out_dir.as_ref());
        let base_written = layout.prepare(action).await?;
        let mut report = RenderReport {
            files: Vec::new(),
            base_written,
        };

        if base_written {
            let path = layout.base_file();
            self.generate_with_context(BASE_TEMPLATE, &BaseContext { options }, &path)
                .await?;
            report.files.push(path);
        }

        let path = layout.model_file();
        self.generate_with_context(MODEL_TEMPLATE, &ModelContext { api_data: data, options }, &path)
            .await?;
        report.files.push(path);

        for controller in &data.controllers {
            let path = layout.controller_file(&controller.name);
            self.generate_with_context(
                CONTROLLER_TEMPLATE,
                &ControllerContext {
                    controller,
                    options,
                },
                &path,
            )
            .await?;
            report.files.push(path);
        }

        log::info!(
            "Wrote {} files to {}",
            report.files.len(),
            layout.root().display()
        );
        Ok(report)
    }
}

#[derive(Serialize)]
struct BaseContext<'a> {
    options: &'a TemplateOptions,
}

#[derive(Serialize)]
struct ModelContext<'a> {
    api_data: &'a ApiData,
    options: &'a TemplateOptions,
}

#[derive(Serialize)]
struct ControllerContext<'a> {
    controller: &'a ApiController,
    options: &'a TemplateOptions,
}
