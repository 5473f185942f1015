//! Configuration handling for the GenoScale CLI
//!
//! Settings come from `genoscale.toml` and are overridden by CLI flags.

use anyhow::{Context, Result};
use genoscale_core::{ChromSizesParser, CoordinateSpace, EngineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Chromosome sizes file used when `--sizes` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<PathBuf>,

    /// Default number of ticks for `genoscale ticks`
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,

    /// Print JSON instead of text
    #[serde(default)]
    pub json: bool,
}

fn default_tick_count() -> usize {
    10
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            sizes: None,
            tick_count: default_tick_count(),
            json: false,
        }
    }
}

const EXAMPLE_TOML: &str = r#"# GenoScale configuration

[general]
# Chromosome sizes table (<name><TAB><size>, optionally gzipped)
# sizes = "hg38.chrom.sizes"
tick_count = 10
json = false

[engine]
# Buckets per geometry batch range index
bin_count = 50
# Transition when a zoomable domain changes with new data
domain_transition_ms = 500.0
# Default zoom_to transition
zoom_transition_ms = 700.0
"#;

impl Config {
    /// Load configuration from file, `./genoscale.toml`, or defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)
            }
            None => {
                let default_path = PathBuf::from("genoscale.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: genoscale.toml");
                    Self::load_from_file(&default_path)
                } else {
                    log::debug!("Using default configuration");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        let config: Config = toml::from_str(&content).map_err(CliError::from)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(CliError::from)?)
    }

    /// Annotated template with the default values
    pub fn example_toml() -> &'static str {
        EXAMPLE_TOML
    }

    /// Loads the configured sizes table as a coordinate space.
    pub fn load_genome(&self) -> Result<CoordinateSpace> {
        let path = self.general.sizes.as_ref().ok_or(CliError::MissingSizes)?;
        if !path.exists() {
            return Err(CliError::file_not_found(path.clone()).into());
        }
        let genome = ChromSizesParser::parse_file(path)
            .map_err(|err| CliError::parse(path.display().to_string(), err.to_string()))?;
        Ok(genome)
    }
}
