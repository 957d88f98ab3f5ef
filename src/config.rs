use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Severity;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Process-wide reporting configuration, set once before installation and
/// read on every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destination addresses for mailed reports (empty disables the mail sink)
    pub recipients: Vec<String>,

    /// Append reports to this file (absent disables the file sink)
    pub log_file: Option<PathBuf>,

    /// Which numeric severities to report
    pub severity_mask: Severity,

    /// Whether uncaught structured exceptions are reported
    pub report_exceptions: bool,

    /// "From" address of mailed reports
    pub sender_address: String,

    /// Display name accompanying the sender address
    pub sender_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipients: Vec::new(),
            log_file: None,
            severity_mask: Severity::ALL,
            report_exceptions: true,
            sender_address: String::new(),
            sender_name: None,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the environment: a whole-config `ERRMAIL_CONFIG` TOML
    /// variable when present, individual `ERRMAIL_*` variables otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(full) = std::env::var("ERRMAIL_CONFIG") {
            return Self::from_toml_str(&full);
        }

        let mut config = Config::default();

        if let Ok(value) = std::env::var("ERRMAIL_RECIPIENTS") {
            config.recipients = value
                .split(',')
                .map(|addr| addr.trim().to_string())
                .filter(|addr| !addr.is_empty())
                .collect();
        }
        load_env_path_opt("ERRMAIL_LOG_FILE", &mut config.log_file);
        if let Ok(value) = std::env::var("ERRMAIL_SEVERITY_MASK") {
            let bits = value.parse::<u32>().map_err(|e| {
                ConfigError::EnvError(format!("Invalid ERRMAIL_SEVERITY_MASK: {e}"))
            })?;
            config.severity_mask = Severity::from_bits(bits);
        }
        load_env_var("ERRMAIL_REPORT_EXCEPTIONS", &mut config.report_exceptions)?;
        load_env_string("ERRMAIL_SENDER_ADDRESS", &mut config.sender_address);
        load_env_string_opt("ERRMAIL_SENDER_NAME", &mut config.sender_name);

        config.validate()?;
        Ok(config)
    }

    /// True when at least one delivery sink is configured.
    pub fn has_sink(&self) -> bool {
        !self.recipients.is_empty() || self.log_file.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for recipient in &self.recipients {
            if !recipient.contains('@') {
                return Err(ConfigError::InvalidConfig(format!(
                    "Invalid recipient address: {recipient}"
                )));
            }
        }

        if !self.recipients.is_empty() && !self.sender_address.contains('@') {
            return Err(ConfigError::InvalidConfig(
                "Sender address is required when recipients are configured".to_string(),
            ));
        }

        if let Some(path) = &self.log_file
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Log file parent directory does not exist: {}",
                parent.display()
            )));
        }

        Ok(())
    }
}

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Helper function to load a string environment variable.
fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

/// Helper function to load an optional string environment variable.
fn load_env_string_opt(name: &str, target: &mut Option<String>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(value);
    }
}

/// Helper function to load an optional PathBuf environment variable.
fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(PathBuf::from(value));
    }
}
