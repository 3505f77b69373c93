//! Configuration loading
//!
//! The file has two sections, `smtp` and `disk`. Values are read as strings;
//! numeric scalars are accepted and stringified. The raw file is validated once
//! into an [`AlertConfig`] that the rest of the program borrows.
//!
//! ```yaml
//! smtp:
//!   from: alerts@example.com
//!   password: secret
//!   to: ops@example.com
//!   host: smtp.example.com
//!   port: 587
//! disk:
//!   path: /data
//!   pct: 90
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AlertError, ConfigError};
use crate::types::AlertThreshold;

/// Config file names tried in each search directory, in order
const CONFIG_FILE_NAMES: &[&str] = &["sysalert.yaml", "sysalert.yml", "sysalert.toml"];

/// Directories searched for a config file.
///
/// Search order:
/// 1. Current directory
/// 2. /etc/sysalert/
/// 3. ~/.sysalert/
/// 4. Platform config dir (e.g. ~/.config/sysalert/)
fn search_dirs() -> Vec<PathBuf> {
    let mut dirs_list = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs_list.push(cwd);
    }

    dirs_list.push(PathBuf::from("/etc/sysalert"));

    if let Some(home) = dirs::home_dir() {
        dirs_list.push(home.join(".sysalert"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_list.push(config_dir.join("sysalert"));
    }

    dirs_list
}

/// Find the first existing config file in `dirs_list`
fn find_config_file(dirs_list: &[PathBuf]) -> Option<PathBuf> {
    dirs_list
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// Raw file layout
// ============================================================================

/// A scalar config value; everything is consumed as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ConfigValue {
    fn into_string(self) -> String {
        match self {
            ConfigValue::Text(s) => s,
            ConfigValue::Integer(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Bool(b) => b.to_string(),
        }
    }
}

/// `smtp.to`: one address or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    fn into_vec(self) -> Vec<String> {
        match self {
            Recipients::One(addr) => vec![addr],
            Recipients::Many(addrs) => addrs,
        }
    }
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS when the server offers it
    #[default]
    Opportunistic,
    /// STARTTLS must succeed
    Required,
    /// Implicit TLS from the first byte (SMTPS)
    Wrapper,
    /// Never use TLS
    None,
}

#[derive(Debug, Default, Deserialize)]
pub struct SmtpSection {
    pub from: Option<ConfigValue>,
    pub password: Option<ConfigValue>,
    pub to: Option<Recipients>,
    pub host: Option<ConfigValue>,
    pub port: Option<ConfigValue>,
    #[serde(default)]
    pub tls: TlsMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiskSection {
    pub path: Option<ConfigValue>,
    pub pct: Option<ConfigValue>,
}

/// Configuration file as written on disk
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub smtp: SmtpSection,
    #[serde(default)]
    pub disk: DiskSection,
}

impl FileConfig {
    /// Parse a file, choosing YAML or TOML from its extension
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

// ============================================================================
// Validated configuration
// ============================================================================

/// SMTP delivery settings
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// Sender address, also the PLAIN auth username
    pub from: String,
    pub password: String,
    /// Never empty
    pub recipients: Vec<String>,
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
}

impl SmtpSettings {
    /// `host:port` of the SMTP server
    pub fn server(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Disk check settings
#[derive(Debug, Clone)]
pub struct DiskSettings {
    pub path: PathBuf,
    pub threshold: AlertThreshold,
}

/// Validated configuration, built once at startup
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub smtp: SmtpSettings,
    pub disk: DiskSettings,
}

impl AlertConfig {
    /// Load from `explicit` if given, otherwise search the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self, AlertError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let dirs_list = search_dirs();
                match find_config_file(&dirs_list) {
                    Some(path) => path,
                    None => {
                        let searched = dirs_list
                            .iter()
                            .map(|dir| dir.display().to_string())
                            .collect();
                        return Err(ConfigError::NotFound { searched }.into());
                    }
                }
            }
        };

        tracing::debug!("Loading config from: {}", path.display());
        Self::load_from_path(&path)
    }

    /// Load and validate a specific file
    pub fn load_from_path(path: &Path) -> Result<Self, AlertError> {
        Self::from_file_config(FileConfig::load_from_path(path)?)
    }

    /// Validate the raw sections. The threshold is parsed here so a bad `pct`
    /// fails before any disk query runs.
    pub fn from_file_config(file: FileConfig) -> Result<Self, AlertError> {
        let FileConfig { smtp, disk } = file;

        let recipients: Vec<String> = smtp
            .to
            .map(Recipients::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|addr| addr.trim().to_string())
            .filter(|addr| !addr.is_empty())
            .collect();
        if recipients.is_empty() {
            return Err(ConfigError::MissingKey("smtp.to").into());
        }

        let port_text = required(smtp.port, "smtp.port")?;
        let port: u16 = port_text.parse().map_err(|_| ConfigError::InvalidValue {
            key: "smtp.port",
            reason: format!("'{}' is not a valid port", port_text),
        })?;

        let smtp = SmtpSettings {
            from: required(smtp.from, "smtp.from")?,
            password: required(smtp.password, "smtp.password")?,
            recipients,
            host: required(smtp.host, "smtp.host")?,
            port,
            tls: smtp.tls,
        };

        let path = PathBuf::from(required(disk.path, "disk.path")?);
        let threshold: AlertThreshold = required(disk.pct, "disk.pct")?.parse()?;

        Ok(Self {
            smtp,
            disk: DiskSettings { path, threshold },
        })
    }
}

/// Fetch a key as a trimmed, non-empty string
fn required(value: Option<ConfigValue>, key: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.into_string().trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingKey(key))
}
