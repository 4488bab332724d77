//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::sources::global_file;
use super::TreepixConfig;
use config::ConfigError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Global config location, if a home directory is known
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Load configuration from files and environment.
    pub fn load(project_root: &Path) -> Result<TreepixConfig, ConfigError> {
        MergeService::load(project_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TreepixConfig, ConfigError> {
        MergeService::load_from_file(path)
    }
}
