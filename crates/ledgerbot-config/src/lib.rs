//! Configuration management for ledgerbot
//!
//! Loads and validates the process-wide configuration from a YAML file.
//! The configuration is read once at startup and immutable thereafter.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Chat transport settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransportConfig {
    /// Bot access token for the chat transport
    #[serde(default)]
    pub token: String,
}

/// Spreadsheet store settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SheetConfig {
    /// Identifier of the spreadsheet holding the ledger tables
    #[serde(default)]
    pub spreadsheet_id: String,
    /// Path to the store credentials file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

/// Listing settings for selection keyboards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// How many recent entries the edit/delete dialogs offer
    #[serde(default = "default_listing_limit")]
    pub limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            limit: default_listing_limit(),
        }
    }
}

fn default_listing_limit() -> usize {
    10
}

/// Scheduled report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the periodic report broadcasts run
    #[serde(default = "default_true")]
    pub enable: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enable: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chat transport settings
    #[serde(default)]
    pub transport: TransportConfig,
    /// Spreadsheet store settings
    #[serde(default)]
    pub sheet: SheetConfig,
    /// IANA time zone identifier for timestamps and report windows
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Listing settings
    #[serde(default)]
    pub listing: ListingConfig,
    /// Scheduled report settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        self.tz()?;

        if self.listing.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.limit".to_string(),
                reason: "Listing limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve the configured time zone
    pub fn tz(&self) -> ConfigResult<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "timezone".to_string(),
                reason: format!("Unknown time zone: {}", self.timezone),
            })
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.listing.limit, 10);
        assert!(config.scheduler.enable);
        assert_eq!(config.logging.level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
transport:
  token: "abc123"
sheet:
  spreadsheet_id: "sheet-1"
  credentials_path: "/etc/ledgerbot/creds.json"
timezone: "America/Sao_Paulo"
listing:
  limit: 5
scheduler:
  enable: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.transport.token, "abc123");
        assert_eq!(config.sheet.spreadsheet_id, "sheet-1");
        assert_eq!(config.listing.limit, 5);
        assert!(!config.scheduler.enable);
        assert_eq!(config.tz().unwrap(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_zero_listing_limit_rejected() {
        let config = Config {
            listing: ListingConfig { limit: 0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        config.validate().unwrap();
    }
}
