pub mod app_config;
pub mod paths;

pub use app_config::{default_config_path, load_config};
