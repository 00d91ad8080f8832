use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};

pub const APP_DIR_NAME: &str = "duckboard";

/// `$XDG_CACHE_HOME/duckboard`, created on first use. Log files live here.
pub fn get_cache_dir() -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().ok_or_else(|| eyre!("Could not find cache directory"))?;
    let cache_dir = cache_base.join(APP_DIR_NAME);

    if !cache_dir.exists() {
        fs::create_dir_all(&cache_dir)?;
    }

    Ok(cache_dir)
}

/// `$XDG_DATA_HOME/duckboard`. Not created here; writers create it lazily.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_base = dirs::data_dir().ok_or_else(|| eyre!("Could not find data directory"))?;
    Ok(data_base.join(APP_DIR_NAME))
}
