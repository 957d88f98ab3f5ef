use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::warn;

use crate::format::Report;

/// MIME type reports are mailed as.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=UTF-8";

/// Failure reported by the host mail transport.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct MailError(pub String);

/// An address/display-name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub address: String,
    pub name: Option<String>,
}

impl MailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn with_name(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => f.write_str(&self.address),
        }
    }
}

/// Host-provided mail transport, consumed as-is and never reimplemented.
pub trait Mailer {
    fn send(
        &self,
        to: &MailAddress,
        from: &MailAddress,
        subject: &str,
        body: &str,
        content_type: &str,
    ) -> Result<(), MailError>;
}

/// Sends one copy of a report to each configured recipient.
pub struct MailFanout {
    recipients: Vec<MailAddress>,
    sender: MailAddress,
    mailer: Rc<dyn Mailer>,
}

impl MailFanout {
    pub fn new(recipients: Vec<MailAddress>, sender: MailAddress, mailer: Rc<dyn Mailer>) -> Self {
        Self {
            recipients,
            sender,
            mailer,
        }
    }

    /// Deliver to every recipient independently; a transport failure for
    /// one is logged and the rest are still attempted. Returns
    /// (sent, failed) counts.
    pub fn send_all(&self, report: &Report) -> (usize, usize) {
        let mut sent = 0;
        let mut failed = 0;
        for to in &self.recipients {
            match self.mailer.send(
                to,
                &self.sender,
                &report.subject,
                &report.body,
                TEXT_PLAIN_UTF8,
            ) {
                Ok(()) => sent += 1,
                Err(e) => {
                    failed += 1;
                    warn!(recipient = %to, error = %e, "mail delivery failed");
                }
            }
        }
        (sent, failed)
    }
}
