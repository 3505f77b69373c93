//! Check-and-notify orchestration
//!
//! One run queries usage for the configured path, compares it with the
//! threshold and, when it is exceeded, sends a single alert email. Every
//! failure is returned to the caller; nothing is retried.

use tracing::{error, info, warn};

use crate::alert::should_alert;
use crate::config::AlertConfig;
use crate::error::AlertResult;
use crate::info::DiskUsageProvider;
use crate::mail::MailSender;
use crate::message::{build_message, disk_alert_message};
use crate::report::get_usage;
use crate::types::{MailMessage, UsageSummary};

/// Flags that alter a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Build the message but do not send it
    pub dry_run: bool,
    /// Alert even when usage is at or below the threshold
    pub force: bool,
}

/// What a run did
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    /// Usage did not exceed the threshold; nothing was sent
    BelowThreshold(UsageSummary),
    /// The alert was delivered
    Sent {
        summary: UsageSummary,
        message: MailMessage,
    },
    /// The alert was built but `dry_run` suppressed delivery
    DryRun {
        summary: UsageSummary,
        raw_message: String,
    },
}

impl CheckOutcome {
    pub fn summary(&self) -> &UsageSummary {
        match self {
            CheckOutcome::BelowThreshold(summary) => summary,
            CheckOutcome::Sent { summary, .. } => summary,
            CheckOutcome::DryRun { summary, .. } => summary,
        }
    }
}

/// Result of the usage query, before any mail is built
#[derive(Debug, Clone)]
pub struct Checked {
    pub summary: UsageSummary,
    /// Usage is strictly above the threshold
    pub exceeded: bool,
}

/// Runs one disk check against injected capabilities
pub struct Notifier<'a, P: ?Sized, M: ?Sized> {
    config: &'a AlertConfig,
    provider: &'a P,
    mailer: &'a M,
}

impl<'a, P, M> Notifier<'a, P, M>
where
    P: DiskUsageProvider + ?Sized,
    M: MailSender + ?Sized,
{
    pub fn new(config: &'a AlertConfig, provider: &'a P, mailer: &'a M) -> Self {
        Self {
            config,
            provider,
            mailer,
        }
    }

    /// Query usage for the configured path and decide whether it is over the
    /// threshold. Callers can report the summary before any mail is attempted.
    pub fn check(&self) -> AlertResult<Checked> {
        let disk = &self.config.disk;
        let summary = get_usage(self.provider, &disk.path)?;

        let exceeded = should_alert(&summary, disk.threshold);
        info!(
            path = %summary.path.display(),
            used_percent = summary.used_percent,
            threshold = disk.threshold.percent(),
            exceeded,
            "disk usage checked"
        );

        Ok(Checked { summary, exceeded })
    }

    /// Send at most one alert for a finished check
    pub async fn notify(
        &self,
        checked: Checked,
        options: CheckOptions,
    ) -> AlertResult<CheckOutcome> {
        let Checked { summary, exceeded } = checked;

        if !exceeded && !options.force {
            return Ok(CheckOutcome::BelowThreshold(summary));
        }

        if exceeded {
            warn!(
                path = %summary.path.display(),
                used_percent = summary.used_percent,
                "disk usage above threshold"
            );
        } else {
            info!("forcing alert below threshold");
        }

        let smtp = &self.config.smtp;
        let message = disk_alert_message(
            &smtp.from,
            &smtp.recipients,
            self.config.disk.threshold,
            &summary,
            exceeded,
        );
        let raw_message = build_message(&message);

        if options.dry_run {
            info!("dry run, alert not sent");
            return Ok(CheckOutcome::DryRun {
                summary,
                raw_message,
            });
        }

        if let Err(e) = self
            .mailer
            .send(&message.sender, &message.recipients, raw_message.as_bytes())
            .await
        {
            error!(server = %smtp.server(), "failed to deliver alert: {}", e);
            return Err(e.into());
        }

        info!(recipients = message.recipients.len(), "alert sent");
        Ok(CheckOutcome::Sent { summary, message })
    }

    /// Check usage and send at most one alert
    pub async fn run(&self, options: CheckOptions) -> AlertResult<CheckOutcome> {
        let checked = self.check()?;
        self.notify(checked, options).await
    }
}
