//! Configuration System
//!
//! Hierarchical configuration for layout, scanning and logging. Sources are
//! merged in order (later wins): built-in defaults, the global config file,
//! the workspace config files, then `CODECITY__SECTION__KEY` environment
//! variables.

use crate::error::CityError;
use crate::layout::LayoutConfig;
use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

/// Filesystem scanning settings
pub type WalkConfig = WalkerConfig;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// Layout engine settings
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Filesystem scanner settings
    #[serde(default)]
    pub walk: WalkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CityConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), CityError> {
        self.layout
            .validate()
            .map_err(|e| CityError::ConfigError(format!("layout: {}", e)))
    }

    /// Render as TOML, the same shape the config files use
    pub fn to_toml(&self) -> Result<String, CityError> {
        toml::to_string_pretty(self).map_err(|e| CityError::SerializationError(e.to_string()))
    }
}

/// Loads `CityConfig` from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `.codecity/config.toml`, `.codecity/{CODECITY_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<CityConfig, CityError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder.add_source(Self::environment()).build()?;
        Self::finish(config)
    }

    /// Load configuration from one explicit file (plus environment overrides)
    pub fn load_from_file(path: &Path) -> Result<CityConfig, CityError> {
        if !path.exists() {
            return Err(CityError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(Self::environment())
            .build()?;
        Self::finish(config)
    }

    /// Path of the global config file, if a home directory is known
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    /// Built-in defaults only
    pub fn default() -> CityConfig {
        CityConfig::default()
    }

    fn environment() -> Environment {
        Environment::with_prefix("CODECITY")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(config: Config) -> Result<CityConfig, CityError> {
        let city: CityConfig = config.try_deserialize()?;
        city.validate()?;
        Ok(city)
    }
}
