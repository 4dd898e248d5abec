//! Copy configuration
//!
//! Defaults copy jpg/png images from the fixed source directory into
//! `images` next to the executable. A toml file and `IMAGE_COPIER_*`
//! environment variables can override them.

use std::{env, path::PathBuf};

use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "image_copier.toml";

/// Prefix of environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "IMAGE_COPIER_";

const DEFAULT_SOURCE_DIR: &str = "/Users/oosterhouse/Desktop/website pics";
const DEFAULT_DESTINATION_NAME: &str = "images";
const DEFAULT_PATTERNS: [&str; 4] = ["*.jpg", "*.png", "*.JPG", "*.PNG"];

/// Copy configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory to select images from (not searched recursively)
    pub source_dir: PathBuf,
    /// Directory the images are copied into, created if missing
    pub destination_dir: PathBuf,
    /// Glob patterns matched against base names, processed in order
    pub patterns: Vec<String>,
    /// Copy a file matched by several patterns only once
    pub deduplicate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            destination_dir: default_destination_dir(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            deduplicate: true,
        }
    }
}

impl Config {
    /// Try loading the configuration from defaults, the toml file and the environment
    pub fn try_load(toml: &str) -> Result<Self> {
        Self::figment(toml).extract().map_err(Into::into)
    }

    fn figment(toml: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(toml))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

/// `images` next to the running executable
fn default_destination_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DESTINATION_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION_NAME))
}
