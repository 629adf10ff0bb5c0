//! Configuration loading from TOML files
//!
//! Config file is selected via the --config command line argument, default
//! config/dev.toml. A missing or unparsable file falls back to defaults
//! with a warning rather than aborting.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Dataset identifier; persistence is keyed by this so catalogs for
    /// different localities never collide
    #[serde(default = "default_dataset_id")]
    pub id: String,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
}

fn default_dataset_id() -> String {
    "default".to_string()
}

fn default_catalog_file() -> String {
    "data/catalog.json".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { id: default_dataset_id(), catalog_file: default_catalog_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Inside this radius a question goes on screen (boundary exclusive)
    #[serde(default = "default_active_radius_m")]
    pub active_radius_m: f64,
    /// Inside this radius the distance hint shows (boundary inclusive)
    #[serde(default = "default_info_radius_m")]
    pub info_radius_m: f64,
    /// Post-answer suppression window
    #[serde(default = "default_answer_cooldown_ms")]
    pub answer_cooldown_ms: u64,
}

fn default_active_radius_m() -> f64 {
    50.0
}

fn default_info_radius_m() -> f64 {
    500.0
}

fn default_answer_cooldown_ms() -> u64 {
    3000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            active_radius_m: default_active_radius_m(),
            info_radius_m: default_info_radius_m(),
            answer_cooldown_ms: default_answer_cooldown_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_persistence_file")]
    pub file: String,
}

fn default_persistence_file() -> String {
    "answers.json".to_string()
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { file: default_persistence_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Render intent output: "-" for stdout, otherwise a JSONL file path
    #[serde(default = "default_render_output")]
    pub output: String,
}

fn default_render_output() -> String {
    "-".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { output: default_render_output() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CompassConfig {
    /// Show the raw bearing as a north-relative arrow when no heading is
    /// available (explicit degraded mode, off by default)
    #[serde(default)]
    pub north_relative_fallback: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub compass: CompassConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    dataset_id: String,
    catalog_file: String,
    active_radius_m: f64,
    info_radius_m: f64,
    answer_cooldown_ms: u64,
    persistence_file: String,
    render_output: String,
    north_relative_fallback: bool,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_id: default_dataset_id(),
            catalog_file: default_catalog_file(),
            active_radius_m: default_active_radius_m(),
            info_radius_m: default_info_radius_m(),
            answer_cooldown_ms: default_answer_cooldown_ms(),
            persistence_file: default_persistence_file(),
            render_output: default_render_output(),
            north_relative_fallback: false,
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        anyhow::ensure!(
            toml_config.engine.active_radius_m < toml_config.engine.info_radius_m,
            "active_radius_m must be smaller than info_radius_m"
        );

        Ok(Self {
            dataset_id: toml_config.dataset.id,
            catalog_file: toml_config.dataset.catalog_file,
            active_radius_m: toml_config.engine.active_radius_m,
            info_radius_m: toml_config.engine.info_radius_m,
            answer_cooldown_ms: toml_config.engine.answer_cooldown_ms,
            persistence_file: toml_config.persistence.file,
            render_output: toml_config.render.output,
            north_relative_fallback: toml_config.compass.north_relative_fallback,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub fn catalog_file(&self) -> &str {
        &self.catalog_file
    }

    pub fn active_radius_m(&self) -> f64 {
        self.active_radius_m
    }

    pub fn info_radius_m(&self) -> f64 {
        self.info_radius_m
    }

    pub fn answer_cooldown_ms(&self) -> u64 {
        self.answer_cooldown_ms
    }

    pub fn persistence_file(&self) -> &str {
        &self.persistence_file
    }

    pub fn render_output(&self) -> &str {
        &self.render_output
    }

    pub fn north_relative_fallback(&self) -> bool {
        self.north_relative_fallback
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to shrink the cooldown
    #[cfg(test)]
    pub fn with_answer_cooldown_ms(mut self, ms: u64) -> Self {
        self.answer_cooldown_ms = ms;
        self
    }

    /// Builder method for tests to pin the band boundaries
    #[cfg(test)]
    pub fn with_radii(mut self, active_m: f64, info_m: f64) -> Self {
        self.active_radius_m = active_m;
        self.info_radius_m = info_m;
        self
    }

    /// Builder method for tests to enable the degraded compass mode
    #[cfg(test)]
    pub fn with_north_relative_fallback(mut self, enabled: bool) -> Self {
        self.north_relative_fallback = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dataset_id(), "default");
        assert_eq!(config.active_radius_m(), 50.0);
        assert_eq!(config.info_radius_m(), 500.0);
        assert_eq!(config.answer_cooldown_ms(), 3000);
        assert_eq!(config.render_output(), "-");
        assert!(!config.north_relative_fallback());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let toml_config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(toml_config.engine.active_radius_m, 50.0);
        assert_eq!(toml_config.persistence.file, "answers.json");
    }
}
