//! # Configuration
//!
//! Override hierarchy: defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.paddock/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PaddockConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub race: RaceConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RaceConfig {
    pub event_id: Option<String>,
    pub target_date: Option<String>,
    pub name: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_base: Option<String>,
    pub race_id: Option<String>,
    pub race_date: Option<String>,
    pub race_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_RACE_EVENT_ID: &str = "FEB-S-2024";
pub const DEFAULT_TARGET_DATE: &str = "2024-02-03";
pub const DEFAULT_RACE_NAME: &str = "February Stakes";

pub const API_BASE_ENV: &str = "PADDOCK_API_BASE";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base: String,
    pub race_event_id: String,
    pub target_date: String,
    pub race_name: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with_env(&PaddockConfig::default(), &CliOverrides::default(), None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.paddock/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".paddock").join("config.toml"))
}

/// Load config from `~/.paddock/config.toml`.
pub fn load_config() -> Result<PaddockConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(PaddockConfig::default());
    };
    load_config_from(&path)
}

/// Load config from an explicit path. A missing file generates a
/// commented-out default and yields `PaddockConfig::default()`.
pub fn load_config_from(path: &Path) -> Result<PaddockConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PaddockConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PaddockConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = format!(
        r#"# Paddock Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "{DEFAULT_API_BASE}"   # Or set {API_BASE_ENV}

# [race]
# event_id = "{DEFAULT_RACE_EVENT_ID}"
# target_date = "{DEFAULT_TARGET_DATE}"
# name = "{DEFAULT_RACE_NAME}"
"#
    );

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse defaults → config file → env → CLI into concrete values.
pub fn resolve(config: &PaddockConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(API_BASE_ENV).ok())
}

fn resolve_with_env(
    config: &PaddockConfig,
    cli: &CliOverrides,
    env_api_base: Option<String>,
) -> ResolvedConfig {
    let api_base = cli
        .api_base
        .clone()
        .or(env_api_base)
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let race_event_id = cli
        .race_id
        .clone()
        .or_else(|| config.race.event_id.clone())
        .unwrap_or_else(|| DEFAULT_RACE_EVENT_ID.to_string());

    let target_date = cli
        .race_date
        .clone()
        .or_else(|| config.race.target_date.clone())
        .unwrap_or_else(|| DEFAULT_TARGET_DATE.to_string());

    let race_name = cli
        .race_name
        .clone()
        .or_else(|| config.race.name.clone())
        .unwrap_or_else(|| DEFAULT_RACE_NAME.to_string());

    ResolvedConfig {
        api_base,
        race_event_id,
        target_date,
        race_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved =
            resolve_with_env(&PaddockConfig::default(), &CliOverrides::default(), None);
        assert_eq!(resolved.api_base, DEFAULT_API_BASE);
        assert_eq!(resolved.race_event_id, DEFAULT_RACE_EVENT_ID);
        assert_eq!(resolved.target_date, DEFAULT_TARGET_DATE);
        assert_eq!(resolved.race_name, DEFAULT_RACE_NAME);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = PaddockConfig {
            service: ServiceConfig {
                base_url: Some("http://analysis.local/api".into()),
            },
            race: RaceConfig {
                event_id: Some("ARIMA-2025".into()),
                target_date: None,
                name: Some("Arima Kinen".into()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.api_base, "http://analysis.local/api");
        assert_eq!(resolved.race_event_id, "ARIMA-2025");
        assert_eq!(resolved.target_date, DEFAULT_TARGET_DATE);
        assert_eq!(resolved.race_name, "Arima Kinen");
    }

    #[test]
    fn test_env_beats_file_and_cli_beats_env() {
        let config = PaddockConfig {
            service: ServiceConfig {
                base_url: Some("http://file/api".into()),
            },
            ..Default::default()
        };
        let from_env =
            resolve_with_env(&config, &CliOverrides::default(), Some("http://env/api".into()));
        assert_eq!(from_env.api_base, "http://env/api");

        let cli = CliOverrides {
            api_base: Some("http://cli/api".into()),
            race_id: Some("JC-2024".into()),
            ..Default::default()
        };
        let from_cli = resolve_with_env(&config, &cli, Some("http://env/api".into()));
        assert_eq!(from_cli.api_base, "http://cli/api");
        assert_eq!(from_cli.race_event_id, "JC-2024");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[race]
event_id = "FEB-S-2025"
"#;
        let config: PaddockConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.race.event_id.as_deref(), Some("FEB-S-2025"));
        assert!(config.race.target_date.is_none());
        assert!(config.service.base_url.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[service]
base_url = "http://192.168.1.10:8000/api"

[race]
event_id = "FEB-S-2024"
target_date = "2024-02-03"
name = "February Stakes"
"#;
        let config: PaddockConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.service.base_url.as_deref(),
            Some("http://192.168.1.10:8000/api")
        );
        assert_eq!(config.race.name.as_deref(), Some("February Stakes"));
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("paddock-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.race.event_id.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [race]"));

        // The generated file is all comments, so it parses back to defaults.
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.service.base_url.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("paddock-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[race\nevent_id = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_dir_all(&dir);
    }
}
