//! Output directory layout and cleanup

use std::path::{Path, PathBuf};

use tokio::fs;

use super::BaseAction;
use crate::error::Result;

/// Shared request infrastructure
pub const BASE_DIR: &str = "base";
/// All models and enums
pub const MODEL_DIR: &str = "model";
/// One file per controller
pub const API_DIR: &str = "api";

/// Paths of every generated file under one output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn base_file(&self) -> PathBuf {
        self.root.join(BASE_DIR).join("useAxios.ts")
    }

    pub fn model_file(&self) -> PathBuf {
        self.root.join(MODEL_DIR).join("index.ts")
    }

    pub fn controller_file(&self, controller: &str) -> PathBuf {
        self.root.join(API_DIR).join(format!("{controller}.ts"))
    }

    /// Whether a previous run left a `base/` directory behind
    pub fn base_exists(&self) -> bool {
        self.root.join(BASE_DIR).is_dir()
    }

    /// Clear stale output for `action`.
    ///
    /// Returns whether the base has to be written.
    pub async fn prepare(&self, action: BaseAction) -> Result<bool> {
        let write_base = match action {
            BaseAction::Fresh => true,
            BaseAction::Regenerate => {
                remove_dir_if_exists(&self.root).await?;
                true
            }
            BaseAction::Keep => {
                remove_dir_if_exists(&self.root.join(API_DIR)).await?;
                remove_dir_if_exists(&self.root.join(MODEL_DIR)).await?;
                !self.base_file().is_file()
            }
        };
        fs::create_dir_all(&self.root).await?;
        Ok(write_base)
    }
}

async fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    if fs::metadata(dir).await.is_ok() {
        log::debug!("Removing {}", dir.display());
        fs::remove_dir_all(dir).await?;
    }
    Ok(())
}
