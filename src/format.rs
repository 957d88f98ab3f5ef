//! Report rendering.
//!
//! Pure and deterministic given an event, a host-context snapshot, the
//! captured frames, and a clock value; the only I/O-free stage of the
//! pipeline.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::context::{HostContext, dump_params};
use crate::domain::{ErrorEvent, EventKind, StackFrame};

/// A rendered report: built fresh per event, immutable once built, handed
/// straight to delivery and then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub subject: String,
    pub body: String,
    pub timestamp: NaiveDateTime,
}

/// Render `event` against the local wall clock.
pub fn build_report(event: &ErrorEvent, ctx: &HostContext, frames: &[StackFrame]) -> Report {
    build_report_at(event, ctx, frames, Local::now().naive_local())
}

/// Render `event` against an explicit clock value.
///
/// Two calls with identical inputs produce byte-identical bodies.
pub fn build_report_at(
    event: &ErrorEvent,
    ctx: &HostContext,
    frames: &[StackFrame],
    now: NaiveDateTime,
) -> Report {
    let label = event.kind.label();

    let mut subject = format!("[{}] {}", ctx.site_name, label);
    if let Some(title) = &ctx.title {
        let _ = write!(subject, " at {title}");
    }

    let mut body = String::new();
    let _ = writeln!(
        body,
        "{} {}, Title: {}",
        now.format("[%Y-%m-%d %H:%M:%S]"),
        ctx.site_name,
        ctx.title.as_deref().unwrap_or("-")
    );
    let _ = writeln!(body, "User: {}, IP: {}", ctx.user_name, ctx.client_ip);
    body.push('\n');

    // Exception messages already embed their location.
    if let (EventKind::Severity(_), Some(location)) = (&event.kind, &event.location) {
        let _ = writeln!(body, "{label} at {location}");
    }
    let _ = writeln!(body, "{}", event.message.trim());
    body.push('\n');

    if event.include_stack {
        body.push_str("Stack trace:\n");
        for (i, frame) in frames.iter().enumerate() {
            let _ = write!(body, "#{i}: ");
            if let Some(owner) = &frame.owner {
                body.push_str(owner);
                body.push_str(frame.call_op.as_deref().unwrap_or("::"));
            }
            let _ = writeln!(
                body,
                "{} at {}:{}",
                frame.function,
                rewrite_path(&frame.file, &ctx.install_root),
                frame.line
            );
        }
        body.push('\n');
    }

    let _ = writeln!(body, "URL: {}{}", ctx.server_base, ctx.request_uri);
    let _ = writeln!(body, "\nquery = {}", dump_params(&ctx.query));
    let _ = writeln!(body, "form = {}", dump_params(&ctx.form));
    let _ = writeln!(body, "cookies = {}", dump_params(&ctx.cookies));

    Report {
        subject,
        body,
        timestamp: now,
    }
}

/// Rewrite a path under the host installation root as `./…`; anything else
/// is returned untouched.
///
/// Matching is component-wise, so the prefix only strips when followed by a
/// path separator: a sibling like `/srv/wiki2` never matches `/srv/wiki`,
/// and the root itself is left alone.
pub fn rewrite_path(file: &str, install_root: &Path) -> String {
    match Path::new(file).strip_prefix(install_root) {
        Ok(rest) if !rest.as_os_str().is_empty() => format!("./{}", rest.display()),
        _ => file.to_string(),
    }
}
