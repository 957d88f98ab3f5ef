#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. MailError in mail module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod config;
pub mod context;
pub mod domain;
pub mod filter;
pub mod format;
pub mod reporter;
pub mod sink;

// Re-export main types for easy access
pub use config::{Config, ConfigError};
pub use context::{Host, HostContext, LastError, ParamMap, ParamValue};
pub use domain::{ErrorEvent, EventKind, RawError, Severity, SourceLocation, StackFrame};
pub use format::{Report, build_report, build_report_at};
pub use reporter::{ErrorHandlerFn, ErrorReporter, ExceptionKind, Handled, HookRegistry};
pub use sink::{DeliveryOutcome, FileSink, MailAddress, MailError, Mailer, ReportSender};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
