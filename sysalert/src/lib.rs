//! Disk usage alerting
//!
//! Checks the filesystem holding a configured path and emails an alert when
//! its used percentage is above a threshold. Meant to be run from cron or a
//! systemd timer; each invocation performs one check.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use sysalert::{AlertConfig, CheckOptions, Notifier, PlatformProvider, SmtpMailer};
//!
//! let config = AlertConfig::load(None)?;
//! let mailer = SmtpMailer::new(&config.smtp)?;
//! let outcome = Notifier::new(&config, &PlatformProvider::default(), &mailer)
//!     .run(CheckOptions::default())
//!     .await?;
//! ```
//!
//! # Usage as Binary
//!
//! Run `sysalert` with a `sysalert.yaml` in the working directory,
//! `/etc/sysalert/` or `~/.sysalert/`, or point at one with `--config`.

pub mod alert;
pub mod config;
pub mod error;
pub mod format;
pub mod info;
pub mod init;
pub mod mail;
pub mod message;
pub mod notifier;
pub mod report;
pub mod types;

pub use alert::should_alert;
pub use config::{AlertConfig, DiskSettings, SmtpSettings, TlsMode};
pub use error::{AlertError, AlertResult, ConfigError, DeliveryError, QueryError, ThresholdParseError};
pub use info::{DiskUsageProvider, PlatformProvider, SysinfoProvider};
pub use mail::{MailSender, SmtpMailer};
pub use message::{build_message, DISK_ALERT_SUBJECT};
pub use notifier::{CheckOptions, CheckOutcome, Checked, Notifier};
pub use report::get_usage;
pub use types::{AlertThreshold, MailMessage, Partition, RawUsage, UsageSummary};
