//! Configuration management using the prefer crate for file discovery.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::{Pacing, RandomDelay, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, DEFAULT_START_DELAY};

/// Name used for config file discovery (`typewriter.toml`, `typewriter.yaml`, ...).
pub const CONFIG_NAME: &str = "typewriter";

const ENV_START_DELAY: &str = "TYPEWRITER_START_DELAY_MS";
const ENV_MIN_DELAY: &str = "TYPEWRITER_MIN_DELAY_MS";
const ENV_MAX_DELAY: &str = "TYPEWRITER_MAX_DELAY_MS";
const ENV_SEED: &str = "TYPEWRITER_SEED";

fn default_start_delay_ms() -> u64 {
    DEFAULT_START_DELAY.as_millis() as u64
}

fn default_min_delay_ms() -> u64 {
    DEFAULT_MIN_DELAY.as_millis() as u64
}

fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY.as_millis() as u64
}

/// Reveal pacing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause before the first character, in milliseconds.
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,
    /// Lower bound of the per-character delay, in milliseconds.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound of the per-character delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Seed for reproducible pacing (random when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Clear the target before rendering.
    #[serde(default)]
    pub clear_first: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay_ms(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            seed: None,
            clear_first: false,
        }
    }
}

impl PacingConfig {
    /// Apply `TYPEWRITER_*` environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = env_u64(ENV_START_DELAY) {
            self.start_delay_ms = ms;
        }
        if let Some(ms) = env_u64(ENV_MIN_DELAY) {
            self.min_delay_ms = ms;
        }
        if let Some(ms) = env_u64(ENV_MAX_DELAY) {
            self.max_delay_ms = ms;
        }
        if let Some(seed) = env_u64(ENV_SEED) {
            self.seed = Some(seed);
        }
        self
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            start_delay: Duration::from_millis(self.start_delay_ms),
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }

    /// Random delay policy, seeded when a seed is configured.
    pub fn delay_policy(&self) -> RandomDelay {
        match self.seed {
            Some(seed) => RandomDelay::seeded(seed),
            None => RandomDelay::from_entropy(),
        }
    }
}

/// Parse a numeric environment variable, ignoring unset or invalid values.
fn env_u64(var: &str) -> Option<u64> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", var, raw);
            None
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: PacingConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// Options for loading configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, preferring an explicit path over discovery.
    ///
    /// An explicit path that cannot be read or parsed is an error. A discovered
    /// file that fails to load is logged and replaced by defaults.
    pub async fn load_with_options(options: &LoadOptions) -> Result<Self, ConfigError> {
        if let Some(ref path) = options.config_path {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            return Self::load_from_path(Path::new(&expanded)).await;
        }
        Ok(Self::load().await)
    }

    /// Discover a config file in the standard locations, falling back to defaults.
    pub async fn load() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}; using defaults", e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => {
                tracing::debug!("No {} config file found, using defaults", CONFIG_NAME);
                Self::default_with_env()
            }
        }
    }

    /// Defaults with environment overrides applied.
    pub fn default_with_env() -> Self {
        Self {
            render: PacingConfig::default().with_env_overrides(),
            source_path: None,
        }
    }

    /// Load configuration from a file. The format follows the extension
    /// (`toml`, `yaml`/`yml`, anything else is read as JSON).
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        config.render = config.render.with_env_overrides();
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_error(e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| parse_error(e.to_string())),
            _ => serde_json::from_str(contents).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine() {
        let pacing = PacingConfig::default().pacing();
        assert_eq!(pacing, Pacing::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::parse(
            "[render]\nstart_delay_ms = 0\nmax_delay_ms = 12\nseed = 5\n",
            Path::new("typewriter.toml"),
        )
        .unwrap();
        assert_eq!(config.render.start_delay_ms, 0);
        assert_eq!(config.render.min_delay_ms, 0);
        assert_eq!(config.render.max_delay_ms, 12);
        assert_eq!(config.render.seed, Some(5));
        assert!(!config.render.clear_first);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = Config::parse("render:\n  clear_first: true\n", Path::new("c.yml")).unwrap();
        assert!(yaml.render.clear_first);
        assert_eq!(yaml.render.start_delay_ms, 150);

        let json = Config::parse(r#"{"render": {"min_delay_ms": 4}}"#, Path::new("c.json")).unwrap();
        assert_eq!(json.render.min_delay_ms, 4);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("", Path::new("typewriter.toml")).unwrap();
        assert_eq!(config.render, PacingConfig::default());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Config::parse("render = [", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[tokio::test]
    async fn test_missing_explicit_path_is_error() {
        let options = LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/typewriter.toml")),
        };
        let err = Config::load_with_options(&options).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed = Config::parse(&text, Path::new("x.toml")).unwrap();
        assert_eq!(parsed.render, config.render);
    }
}
