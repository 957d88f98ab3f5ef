//! Delivery sinks for rendered reports.
//!
//! Delivery is the terminal point of the pipeline: sink failures are logged
//! on the host's generic fault channel and swallowed here, never surfaced
//! back through the reporting path and never allowed to abort the request
//! being reported on.

pub mod file;
pub mod mail;

use std::rc::Rc;

use tracing::warn;

use crate::config::Config;
use crate::format::Report;

pub use file::FileSink;
pub use mail::{MailAddress, MailError, MailFanout, Mailer, TEXT_PLAIN_UTF8};

/// Summary of one best-effort delivery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub file_written: bool,
    pub mails_sent: usize,
    pub mails_failed: usize,
}

/// Fans a report out to every configured sink.
pub struct ReportSender {
    file: Option<FileSink>,
    mail: Option<MailFanout>,
}

impl ReportSender {
    pub fn from_config(config: &Config, mailer: Rc<dyn Mailer>) -> Self {
        let file = config.log_file.as_ref().map(|path| FileSink::new(path.clone()));
        let mail = if config.recipients.is_empty() {
            None
        } else {
            let recipients = config
                .recipients
                .iter()
                .map(|addr| MailAddress::new(addr.clone()))
                .collect();
            let sender = MailAddress {
                address: config.sender_address.clone(),
                name: config.sender_name.clone(),
            };
            Some(MailFanout::new(recipients, sender, mailer))
        };
        Self { file, mail }
    }

    /// Dispatch to the configured sinks, best-effort.
    pub fn deliver(&self, report: &Report) -> DeliveryOutcome {
        let mut outcome = DeliveryOutcome::default();
        if let Some(file) = &self.file {
            match file.append(report) {
                Ok(()) => outcome.file_written = true,
                Err(e) => warn!(
                    error = %e,
                    path = %file.path().display(),
                    "failed to append report to log file"
                ),
            }
        }
        if let Some(mail) = &self.mail {
            let (sent, failed) = mail.send_all(report);
            outcome.mails_sent = sent;
            outcome.mails_failed = failed;
        }
        outcome
    }
}
