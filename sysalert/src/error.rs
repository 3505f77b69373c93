//! Error types for the disk alert pipeline
//!
//! Each stage of a check has its own error type. [`AlertError`] unifies them
//! so the notifier can propagate any failure with `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or validating the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists in any search location
    #[error("no configuration file found (searched: {})", searched.join(", "))]
    NotFound { searched: Vec<String> },

    /// The configuration file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file extension is neither YAML nor TOML
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A required key is absent or empty
    #[error("missing required config key '{0}'")]
    MissingKey(&'static str),

    /// A key is present but its value cannot be used
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// The configured alert percentage is not a usable number
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdParseError {
    #[error("threshold '{0}' is not a number")]
    NotANumber(String),

    #[error("threshold {0} is outside the range 0-100")]
    OutOfRange(f64),
}

/// Errors raised while querying filesystem usage
#[derive(Error, Debug)]
pub enum QueryError {
    /// The path cannot be handed to the OS (e.g. contains a NUL byte)
    #[error("invalid path {}", path.display())]
    InvalidPath { path: PathBuf },

    /// The OS call for the path failed
    #[error("disk usage query failed for {}: {source}", path.display())]
    Os {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No mounted filesystem contains the path
    #[error("no mounted filesystem found for {}", path.display())]
    NotMounted { path: PathBuf },
}

/// Errors raised while delivering the alert email
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// A sender or recipient address does not parse
    #[error("invalid email address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The SMTP envelope could not be built
    #[error("invalid envelope: {0}")]
    Envelope(#[from] lettre::error::Error),

    /// Connection, TLS, authentication or protocol failure
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Any failure of a disk check run
#[derive(Error, Debug)]
pub enum AlertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Threshold(#[from] ThresholdParseError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Result type alias for check runs
pub type AlertResult<T> = Result<T, AlertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_searched_paths() {
        let err = ConfigError::NotFound {
            searched: vec!["./sysalert.yaml".into(), "/etc/sysalert/sysalert.yaml".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("./sysalert.yaml"));
        assert!(msg.contains("/etc/sysalert/sysalert.yaml"));
    }

    #[test]
    fn test_alert_error_is_transparent() {
        let err: AlertError = ThresholdParseError::NotANumber("abc".into()).into();
        assert_eq!(err.to_string(), "threshold 'abc' is not a number");
    }
}
