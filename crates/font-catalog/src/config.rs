// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_OUTPUT_DIR: &str = "resources/fonts";
pub const DEFAULT_FALLBACK_FONT: &str = "resources-dev/Fonts/NotoSans-Regular.ttf";

/// Optional settings read from a TOML file. Command-line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Root directory for generated assets and catalogs.
    pub output_dir: Option<PathBuf>,

    /// Font providing the replacement character.
    pub fallback_font: Option<PathBuf>,

    /// Unicode block table to use instead of the built-in one.
    pub blocks: Option<PathBuf>,
}

impl Config {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into())
    }

    pub fn fallback_font(&self) -> PathBuf {
        self.fallback_font
            .clone()
            .unwrap_or_else(|| DEFAULT_FALLBACK_FONT.into())
    }
}

/// Gets the system directory for font catalog configuration files, if the platform has one.
pub fn get_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("rs", "font-catalog", "font-catalog")
        .map(|dirs| dirs.config_dir().to_owned())
}

/// Gets the path to the default configuration file.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Loads a configuration file from the given path.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    info!("Loading configuration file from {:?}", path);
    let config = std::fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("Failed to load config file at {:?}: {:?}", path, err))?;
    toml::from_str(&config)
        .map_err(|err| anyhow::anyhow!("Failed to deserialize config: {:?}", err))
}
