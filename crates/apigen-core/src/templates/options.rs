//! Values shared by every rendered file

use serde::{Deserialize, Serialize};

use crate::{config::Config, model::BaseInfo};

/// Exposed to templates as `options`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateOptions {
    /// Base URL prepended to every request
    pub api_base: String,
    /// Where the document was loaded from
    pub swagger_url: String,
    /// The document's `info` block
    pub base_info: BaseInfo,
}

impl TemplateOptions {
    pub fn new(config: &Config, base_info: BaseInfo) -> Self {
        Self {
            api_base: config.api_base.clone(),
            swagger_url: config.swagger_url.clone(),
            base_info,
        }
    }
}

/// What to do with an existing `base/` directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseAction {
    /// First run: write every file and remove nothing
    #[default]
    Fresh,
    /// Wipe the whole output directory and write the base again
    Regenerate,
    /// Leave `base/` alone; only `api/` and `model/` are rewritten
    Keep,
}
