//! Configuration — parser options and shorthand tables loaded from ~/.harte/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chord::{ShorthandDef, ShorthandTable, TableError};
use crate::grammar::HarteParser;
use crate::pitch::Western;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid shorthand table: {0}")]
    InvalidShorthand(#[from] TableError),
}

/// Parser configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarteConfig {
    /// Strip surrounding whitespace from every input.
    #[serde(default = "HarteConfig::default_trim_input")]
    pub trim_input: bool,
    /// Octave of the root when chords are turned into pitches.
    #[serde(default = "HarteConfig::default_octave")]
    pub default_octave: i8,
    /// Replaces the built-in table entirely, in prettify priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthands: Option<Vec<ShorthandDef>>,
    /// Added to (or redefined in) whichever table is in effect.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_shorthands: Vec<ShorthandDef>,
}

impl HarteConfig {
    fn default_trim_input() -> bool {
        true
    }

    fn default_octave() -> i8 {
        4
    }

    /// Standard config location (~/.harte/config.yaml).
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".harte");
        path.push("config.yaml");
        path
    }

    /// Load config from the standard path.
    /// Returns None if the file is missing or unreadable.
    pub fn load() -> Option<Self> {
        let path = Self::default_path();
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_yaml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(io_err)
    }

    /// The shorthand table this config describes.
    pub fn shorthand_table(&self) -> Result<ShorthandTable, TableError> {
        let mut table = match &self.shorthands {
            Some(defs) => ShorthandTable::new(defs.clone())?,
            None => ShorthandTable::default(),
        };
        for def in &self.extra_shorthands {
            if table.contains(&def.name) {
                tracing::warn!(shorthand = %def.name, "config redefines shorthand");
            }
        }
        table.extend(self.extra_shorthands.clone())?;
        Ok(table)
    }

    /// A parser built from this config.
    pub fn parser(&self) -> Result<HarteParser, ConfigError> {
        Ok(HarteParser::with_table(self.shorthand_table()?).trim_input(self.trim_input))
    }

    pub fn pitch_model(&self) -> Western {
        Western::new(self.default_octave)
    }
}

impl Default for HarteConfig {
    fn default() -> Self {
        Self {
            trim_input: Self::default_trim_input(),
            default_octave: Self::default_octave(),
            shorthands: None,
            extra_shorthands: Vec::new(),
        }
    }
}
