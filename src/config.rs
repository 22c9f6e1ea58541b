use std::env;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogLevel;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_WEB_UI_PORT: u16 = 3000;

const CONFIG_NAME: &str = "bizagent";
const ENV_PREFIX: &str = "BIZAGENT";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub web_ui_port: u16,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            web_ui_port: DEFAULT_WEB_UI_PORT,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Loads the process configuration once at startup: defaults, then the
    /// TOML file, then `BIZAGENT_*` variables. The credential falls back to
    /// `OPENAI_API_KEY`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from(path)?;
        Ok(config.with_fallback_api_key(env::var(API_KEY_VAR).ok()))
    }

    /// Same layering as [`Config::load`] without the credential fallback.
    /// An explicit `path` must exist; the default `bizagent.toml` is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(true)
            }
            None => ::config::File::with_name(CONFIG_NAME).required(false),
        };

        let config = ::config::Config::builder()
            .add_source(file)
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Config>()?;

        debug!(
            "Configuration: model={}, base_url={}, temperature={}, port={}, api key {}",
            config.model,
            config.api_base_url,
            config.temperature,
            config.web_ui_port,
            if config.openai_api_key.is_some() { "set" } else { "not set" }
        );
        Ok(config)
    }

    pub fn with_fallback_api_key(mut self, key: Option<String>) -> Self {
        if self.openai_api_key.as_deref().map_or(true, str::is_empty) {
            self.openai_api_key = key.filter(|k| !k.trim().is_empty());
        }
        self
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string(self)?;
        std::fs::write(path, toml)?;
        info!("Config saved to: {:?}", path);
        Ok(())
    }
}
