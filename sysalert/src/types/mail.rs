//! Outgoing mail types

/// An email ready to be rendered by the message builder
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub sender: String,
    /// Never empty; config validation rejects an empty recipient list
    pub recipients: Vec<String>,
    pub subject: String,
    pub body_html: String,
}
