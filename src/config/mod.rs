use anyhow::Context;
use config::{Config, FileFormat};
use serde::Deserialize;
use std::sync::LazyLock;

static CONFIG: LazyLock<AppConfig> =
    LazyLock::new(|| AppConfig::load().expect("Failed to initialize config"));

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub base_url: String,

    /// Subtract 543 from Buddhist-calendar years when building exam dates.
    pub apply_year_offset: bool,

    pub modal_wait_ms: u64,
    pub results_wait_ms: u64,
    pub detail_wait_ms: u64,

    pub max_modal_attempts: u32,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Config::builder()
            .add_source(
                config::File::with_name("application")
                    .format(FileFormat::Yaml)
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()
            .with_context(|| anyhow::anyhow!("Failed to load config"))?
            .try_deserialize()
            .with_context(|| anyhow::anyhow!("Failed to deserialize config"))
    }
}

pub fn get() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let config = AppConfig::load().expect("Failed to load config");
        assert!(config.base_url.starts_with("https://"));
        assert!(config.max_modal_attempts >= 1);
    }
}
