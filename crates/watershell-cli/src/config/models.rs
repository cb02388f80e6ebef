use std::path::PathBuf;
use watershell::engine::config as core_config;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: core_config::ExtractionConfig,
}
