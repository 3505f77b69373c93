//! Mail delivery
//!
//! [`MailSender`] hands a pre-rendered MIME message to a transport.
//! [`SmtpMailer`] is the production implementation over lettre's async
//! SMTP client, authenticating with the PLAIN mechanism.

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, instrument};

use crate::config::{SmtpSettings, TlsMode};
use crate::error::DeliveryError;

/// Transport for a raw, already-rendered message
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver `raw` from `from` to every address in `recipients`
    async fn send(
        &self,
        from: &str,
        recipients: &[String],
        raw: &[u8],
    ) -> Result<(), DeliveryError>;
}

/// SMTP delivery with PLAIN authentication
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// Build a transport for the configured server.
    ///
    /// The sender address doubles as the auth username. TLS setup happens
    /// here, so runs that never send are unaffected by TLS errors.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let settings = &self.settings;
        let tls_params = || TlsParameters::new(settings.host.clone());

        let tls = match settings.tls {
            TlsMode::None => Tls::None,
            TlsMode::Opportunistic => Tls::Opportunistic(tls_params()?),
            TlsMode::Required => Tls::Required(tls_params()?),
            TlsMode::Wrapper => Tls::Wrapper(tls_params()?),
        };

        Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .credentials(Credentials::new(
                settings.from.clone(),
                settings.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .tls(tls)
            .build())
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    #[instrument(skip(self, raw), fields(server = %self.settings.server()))]
    async fn send(
        &self,
        from: &str,
        recipients: &[String],
        raw: &[u8],
    ) -> Result<(), DeliveryError> {
        let envelope = build_envelope(from, recipients)?;
        let transport = self.transport()?;
        debug!(bytes = raw.len(), "sending message");
        transport.send_raw(&envelope, raw).await?;
        Ok(())
    }
}

fn parse_address(address: &str) -> Result<Address, DeliveryError> {
    address
        .parse()
        .map_err(|source| DeliveryError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

/// SMTP envelope for the sender and recipient list
fn build_envelope(from: &str, recipients: &[String]) -> Result<Envelope, DeliveryError> {
    let from = parse_address(from)?;
    let to = recipients
        .iter()
        .map(|addr| parse_address(addr))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Envelope::new(Some(from), to)?)
}
