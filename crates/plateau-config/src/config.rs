//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_NAME: &str = "plateau";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain synthesis settings.
    pub terrain: TerrainConfig,
    /// Debug image export settings.
    pub export: ExportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Edge length of the height grid in cells. Must be a power of two.
    pub edge_length: u32,
    /// Seed for the displacement source. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

/// Debug image export configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Write heightmap and material PNGs after generation.
    pub enabled: bool,
    /// Directory the PNGs are written to.
    pub directory: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            edge_length: 32,
            seed: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("terrain-export"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for the generator (`<config_dir>/plateau`).
///
/// Returns `None` if the OS does not expose a configuration directory.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Where [`Config::load_or_create`] got its settings from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written here.
    Created(PathBuf),
}

impl ConfigOrigin {
    /// Path of the config file that was read or written.
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(path) | Self::Created(path) => path,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    ///
    /// Also reports which of the two happened, so the caller can log it once
    /// logging is up.
    pub fn load_or_create(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if !config_path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            return Ok((config, ConfigOrigin::Created(config_path)));
        }

        let contents = match std::fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: config_path,
                    source,
                });
            }
        };
        match ron::from_str(&contents) {
            Ok(config) => Ok((config, ConfigOrigin::Loaded(config_path))),
            Err(source) => Err(ConfigError::ParseError {
                path: config_path,
                source,
            }),
        }
    }

    /// Save config to the given directory as `config.ron`, creating the
    /// directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("edge_length: 32"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip_with_seed() {
        let mut config = Config::default();
        config.terrain.seed = Some(1234);
        config.export.enabled = true;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(terrain: (edge_length: 64))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.edge_length, 64);
        assert_eq!(config.terrain.seed, None);
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(canvas_width: 800)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.edge_length = 128;
        config.terrain.seed = Some(7);

        config.save(dir.path()).unwrap();
        let (loaded, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
        assert_eq!(origin, ConfigOrigin::Loaded(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(origin, ConfigOrigin::Created(dir.path().join(CONFIG_FILE)));
        assert!(origin.path().exists());

        // A second call finds the file it just wrote.
        let (_, origin) = Config::load_or_create(dir.path()).unwrap();
        assert!(matches!(origin, ConfigOrigin::Loaded(_)));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(&err, ConfigError::ParseError { path: p, .. } if *p == path));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_unreadable_config_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be fails to read as a string.
        let path = dir.path().join(CONFIG_FILE);
        std::fs::create_dir(&path).unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_save_into_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let err = Config::default().save(&blocker).unwrap_err();
        assert!(matches!(err, ConfigError::WriteError { .. }));
        assert!(err.to_string().contains("not-a-dir"));
    }

    #[test]
    fn test_default_config_dir_ends_with_app_name() {
        if let Some(dir) = default_config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
