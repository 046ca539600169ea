use config::{Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use std::env;
use log::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DtoConfig {
    /// Directory generated client files are written to
    pub output_dir: String,
    /// File name of the generated fixture client
    pub client_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub log: LogConfig,
    pub dto: DtoConfig,
    pub rest: RestConfig,
}

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut config_builder = config::Config::builder()
            .set_default("log.level", defaults.log.level)?
            .set_default("dto.output_dir", defaults.dto.output_dir)?
            .set_default("dto.client_file", defaults.dto.client_file)?
            .set_default("rest.host", defaults.rest.host)?
            .set_default("rest.port", i64::from(defaults.rest.port))?;

        if let Some(path) = config_path {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        // e.g. `RESTDTO__DTO__OUTPUT_DIR=...` would override `dto.output_dir`
        config_builder = config_builder.add_source(
            Environment::with_prefix("RESTDTO")
                .prefix_separator("__")
                .separator("__")
                .ignore_empty(true)
        );

        // Direct environment variables for the common settings
        let env_vars = [
            ("DTO_OUTPUT_DIR", "dto.output_dir"),
            ("REST_HOST", "rest.host"),
            ("REST_PORT", "rest.port"),
        ];

        for (env_var, config_path) in &env_vars {
            if let Ok(value) = env::var(env_var) {
                if *env_var == "REST_PORT" {
                    if let Ok(port) = value.parse::<u16>() {
                        config_builder = config_builder.set_override(config_path, i64::from(port))?;
                    } else {
                        warn!("Invalid port value in {}: {}", env_var, value);
                    }
                } else if !value.is_empty() {
                    config_builder = config_builder.set_override(config_path, value)?;
                }
            }
        }

        Ok(config_builder.build()?.try_deserialize()?)
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig { level: "info".to_string() }
    }
}

impl Default for DtoConfig {
    fn default() -> Self {
        Self {
            output_dir: "generated".to_string(),
            client_file: "messages.ts".to_string(),
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load or parse configuration: {0}")]
    LoadError(#[from] config::ConfigError),
    #[error("Failed to render configuration: {0}")]
    RenderError(#[from] toml::ser::Error),
}
