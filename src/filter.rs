//! Per-event reporting decision.
//!
//! Explicit host suppression always wins over configuration: when the live
//! reporting mask is empty or a suppress/restore pair is active, the live
//! mask replaces the configured one for that check.

use crate::config::Config;
use crate::domain::{ErrorEvent, EventKind, Severity};

/// Host suppression state sampled when an event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionState {
    /// The host's live error-reporting mask.
    pub live_mask: Severity,
    /// Nesting depth of explicit suppress/restore pairs.
    pub depth: u32,
}

impl Default for SuppressionState {
    fn default() -> Self {
        Self {
            live_mask: Severity::ALL,
            depth: 0,
        }
    }
}

/// The mask an event is actually checked against.
pub fn effective_mask(configured: Severity, suppression: &SuppressionState) -> Severity {
    if suppression.live_mask.is_empty() || suppression.depth > 0 {
        suppression.live_mask
    } else {
        configured
    }
}

/// Decide whether `event` qualifies for reporting.
pub fn should_report(
    config: &Config,
    event: &ErrorEvent,
    suppression: &SuppressionState,
    in_flight: bool,
) -> bool {
    if in_flight {
        return false;
    }
    if !config.has_sink() {
        return false;
    }
    match event.kind {
        EventKind::Exception => config.report_exceptions,
        EventKind::Severity(severity) => {
            effective_mask(config.severity_mask, suppression).intersects(severity)
        }
    }
}
