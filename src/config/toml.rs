//! TOML configuration file parsing

use serde::Deserialize;

use crate::config::{AppConfig, StaticRoute};
use crate::error::ConfigError;

/// TOML configuration structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub interfaces: Option<Vec<String>>,
    pub routes: Option<Vec<TomlRoute>>,
    pub default_gateway: Option<TomlRoute>,
    pub logging: Option<LoggingConfig>,
}

/// TOML route configuration
#[derive(Debug, Deserialize)]
pub struct TomlRoute {
    pub destination: String,
    pub gateway: String,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl From<TomlRoute> for StaticRoute {
    fn from(route: TomlRoute) -> Self {
        StaticRoute::new(route.destination, route.gateway)
    }
}

/// Load configuration from TOML file
pub fn load_toml_config(path: &str) -> Result<TomlConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
}

/// Apply TOML file values over base configuration
pub fn apply_toml_config(mut base_config: AppConfig, file: TomlConfig) -> AppConfig {
    if let Some(level) = file.logging.and_then(|l| l.level) {
        base_config.log_level = level;
    }

    if let Some(interfaces) = file.interfaces {
        base_config.interfaces = interfaces;
    }

    if let Some(routes) = file.routes {
        base_config.routes = routes.into_iter().map(StaticRoute::from).collect();
    }

    if let Some(route) = file.default_gateway {
        base_config.default_gateway = Some(route.into());
    }

    base_config
}
