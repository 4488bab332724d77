//! Shared test utilities for integration tests
//!
//! Builds fixture trees, snapshots directories for comparison, and isolates
//! the config-related environment variables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize HOME / XDG_CONFIG_HOME access across all tests
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME at `<test_dir>/home` and XDG_CONFIG_HOME at `<test_dir>/config`
///
/// Returns the config home so tests can drop a `treepix/config.toml` into it.
pub fn with_config_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("config");
    fs::create_dir_all(&test_home).unwrap();
    fs::create_dir_all(&test_config_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);

    let result = f(&test_config_home);

    env_state.restore();

    result
}

/// Create `files` (relative path, contents) and `dirs` (relative paths) under `root`
pub fn build_tree(root: &Path, dirs: &[&str], files: &[(&str, &[u8])]) {
    fs::create_dir_all(root).unwrap();
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for (path, contents) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }
}

/// What a directory holds, keyed by path relative to it
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub dirs: Vec<PathBuf>,
    pub files: BTreeMap<PathBuf, Vec<u8>>,
}

pub fn snapshot(root: &Path) -> Snapshot {
    let mut dirs = Vec::new();
    let mut files = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
        if entry.file_type().is_dir() {
            dirs.push(relative);
        } else {
            files.insert(relative, fs::read(entry.path()).unwrap());
        }
    }
    Snapshot { dirs, files }
}
