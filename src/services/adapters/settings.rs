use crate::services::config::{ConfigError, PartServiceConfig};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "partbench";
const CONFIG_FILE: &str = "config.json";
const CONFIG_ENV: &str = "PARTBENCH_CONFIG";

/// `$PARTBENCH_CONFIG`, else `<cache dir>/partbench/config.json`.
pub fn get_config_path() -> Option<PathBuf> {
    env_path(CONFIG_ENV).or_else(|| cache_root().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE)))
}

pub fn load_config(path: &Path) -> Result<PartServiceConfig, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    PartServiceConfig::from_json(&data)
}

/// Writes the default configuration to `path` unless a file already exists.
pub fn ensure_config_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        std::fs::write(path, PartServiceConfig::default().to_json_pretty())?;
    }
    Ok(())
}

/// Loads the configuration at the default path, falling back to defaults when
/// the file is absent or unreadable.
pub fn load_default_config() -> PartServiceConfig {
    let Some(path) = get_config_path() else {
        return PartServiceConfig::default();
    };
    if !path.exists() {
        return PartServiceConfig::default();
    }
    match load_config(&path) {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "load config failed");
            PartServiceConfig::default()
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Per-user cache directory; XDG layout on every unix but macOS.
fn cache_root() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        return env_path("HOME").map(|home| home.join("Library").join("Caches"));
    }
    if cfg!(windows) {
        return env_path("LOCALAPPDATA").or_else(|| env_path("APPDATA"));
    }
    env_path("XDG_CACHE_HOME").or_else(|| env_path("HOME").map(|home| home.join(".cache")))
}

#[cfg(test)]
#[path = "../../../tests/unit/services/settings.rs"]
mod tests;
