//! Outbound-notification collaborator interface.
//!
//! The rendered report goes out as an e-mail attachment; composing and
//! delivering the message (SMTP in production) is not this crate's
//! concern. The core hands over a named attachment and a recipient and
//! expects delivery failures back, never silently dropped.

use async_trait::async_trait;

use crate::errors::Result;

/// A rendered report ready to attach.
#[derive(Clone, Debug)]
pub struct ReportAttachment {
    /// Attachment file name (see [`Report::file_name`](crate::report::Report::file_name)).
    pub file_name: String,
    /// Rendered CSV contents.
    pub contents: String,
}

/// Best-effort delivery of the daily report to one recipient.
///
/// Implementations report delivery failures as
/// [`Error::Notify`](crate::errors::Error::Notify).
#[async_trait]
pub trait ReportNotifier: Send + Sync {
    /// Attach and send the report.
    async fn send(&self, attachment: &ReportAttachment, recipient: &str) -> Result<()>;
}
