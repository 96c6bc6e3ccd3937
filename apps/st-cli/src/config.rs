//! Optional YAML configuration: where the tables live and which units to show.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use st_core::{QuantityKind, Unit, catalog};
use st_tables::LoaderConfig;

use crate::error::{CliError, CliResult};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "steamtab.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tables_dir: PathBuf,
    pub title_block_lines: usize,
    pub delimiter: char,
    pub display: DisplayUnits,
}

impl Default for Config {
    fn default() -> Self {
        let loader = LoaderConfig::default();
        Self {
            tables_dir: PathBuf::from("data"),
            title_block_lines: loader.title_block_lines,
            delimiter: loader.delimiter,
            display: DisplayUnits::default(),
        }
    }
}

/// Display unit symbol per quantity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub temperature: String,
    pub pressure: String,
    pub specific_volume: String,
    pub density: String,
    pub specific_energy: String,
    pub entropy: String,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        let symbol = |kind| st_tables::native_unit(kind).symbol.to_string();
        Self {
            temperature: symbol(QuantityKind::Temperature),
            pressure: symbol(QuantityKind::Pressure),
            specific_volume: symbol(QuantityKind::SpecificVolume),
            density: symbol(QuantityKind::Density),
            specific_energy: symbol(QuantityKind::SpecificEnergy),
            entropy: symbol(QuantityKind::Entropy),
        }
    }
}

impl DisplayUnits {
    pub fn symbol(&self, kind: QuantityKind) -> &str {
        match kind {
            QuantityKind::Temperature => &self.temperature,
            QuantityKind::Pressure => &self.pressure,
            QuantityKind::SpecificVolume => &self.specific_volume,
            QuantityKind::Density => &self.density,
            QuantityKind::SpecificEnergy => &self.specific_energy,
            QuantityKind::Entropy => &self.entropy,
        }
    }

    /// Unit for `kind`: the explicit override if given, else the configured default.
    pub fn resolve(&self, kind: QuantityKind, explicit: Option<&str>) -> CliResult<&'static Unit> {
        let symbol = explicit.unwrap_or_else(|| self.symbol(kind));
        catalog::find_for_kind(kind, symbol).ok_or_else(|| CliError::UnknownUnit {
            unit: symbol.to_string(),
            kind: kind.to_string(),
        })
    }
}

impl Config {
    pub fn loader(&self) -> LoaderConfig {
        LoaderConfig {
            title_block_lines: self.title_block_lines,
            delimiter: self.delimiter,
        }
    }

    pub fn from_yaml(text: &str, path: &Path) -> CliResult<Self> {
        serde_yaml::from_str(text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load `explicit` if given (it must exist), else `steamtab.yaml` if present,
/// else the defaults.
pub fn load(explicit: Option<&Path>) -> CliResult<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                tracing::debug!("no config file, using defaults");
                return Ok(Config::default());
            }
            default
        }
    };
    let text = std::fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let cfg = Config::from_yaml(&text, &path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}
