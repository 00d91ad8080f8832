use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};

use duckboard_app::config::AppConfig;

use super::paths::APP_DIR_NAME;

const CONFIG_FILE_NAME: &str = "config.toml";
pub const DUCKDB_BIN_ENV: &str = "DUCKBOARD_DUCKDB_BIN";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads `path` (or the default location) and applies environment overrides.
///
/// A missing file yields defaults; a file that exists but does not parse is
/// an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map(Path::to_path_buf).or_else(default_config_path);

    let mut config = match path {
        Some(path) if path.exists() => read_config_file(&path)?,
        _ => AppConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).wrap_err_with(|| format!("Invalid config file {}", path.display()))
}

fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(bin) = lookup(DUCKDB_BIN_ENV).filter(|bin| !bin.trim().is_empty()) {
        config.duckdb_bin = bin;
    }
}
