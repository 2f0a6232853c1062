use config::{Config, ConfigError, Environment, File, FileFormat};
use log::debug;
use serde::Deserialize;
use std::path::Path;

use crate::ingredient::DEFAULT_UNIT;

/// Settings for recipe assembly and the command-line tool
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecipeConfig {
    /// Unit given to structured ingredients that do not name one
    #[serde(default = "default_unit")]
    pub default_unit: String,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            default_unit: default_unit(),
            pretty: default_pretty(),
        }
    }
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

fn default_pretty() -> bool {
    true
}

fn environment() -> Environment {
    // Use double underscore for nested: JSONRECIPE__DEFAULT_UNIT
    Environment::with_prefix("JSONRECIPE")
        .separator("__")
        .try_parsing(true)
}

impl RecipeConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with JSONRECIPE__ prefix
    /// 2. jsonrecipe.toml file in current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Load configuration from an explicit file (which must exist), still
    /// honouring environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(environment())
            .build()?;
        settings.try_deserialize()
    }

    /// Parse configuration from TOML text, without environment overrides.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<RecipeConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("jsonrecipe").required(false))
        .add_source(environment())
        .build()?;

    let config: RecipeConfig = settings.try_deserialize()?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
