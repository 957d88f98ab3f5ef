use std::fmt;

use super::severity::Severity;

/// The arguments the host passes to the active error handler.
///
/// Chaining re-invokes whatever handler was installed before with this
/// exact value, so pre-existing host behavior stays layered underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct RawError {
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: u32,
    /// Opaque host-supplied context; carried through to the chained
    /// handler untouched.
    pub context: Option<serde_json::Value>,
}

/// What kind of raising an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A runtime error with a numeric severity level.
    Severity(Severity),
    /// An uncaught structured exception.
    Exception,
}

impl EventKind {
    /// Label used in subjects and report headers: the level name, the raw
    /// numeric value for unknown levels, or "Exception".
    pub fn label(&self) -> String {
        match self {
            EventKind::Severity(severity) => severity.to_string(),
            EventKind::Exception => "Exception".to_string(),
        }
    }
}

/// File/line pair identifying where an error was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single captured event flowing through the pipeline.
///
/// Built fresh per raising, consumed synchronously, then discarded; nothing
/// survives past one handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    pub kind: EventKind,
    pub message: String,
    /// Absent for exceptions, whose message already embeds the location.
    pub location: Option<SourceLocation>,
    /// False when the message is already self-describing (shutdown and
    /// exception paths), so no stack is collected or rendered.
    pub include_stack: bool,
}

impl ErrorEvent {
    pub fn from_raw(raw: &RawError, include_stack: bool) -> Self {
        Self {
            kind: EventKind::Severity(raw.severity),
            message: raw.message.clone(),
            location: Some(SourceLocation {
                file: raw.file.clone(),
                line: raw.line,
            }),
            include_stack,
        }
    }

    pub fn exception(message: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Exception,
            message: message.into(),
            location: None,
            include_stack: false,
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match self.kind {
            EventKind::Severity(severity) => Some(severity),
            EventKind::Exception => None,
        }
    }
}

/// One frame of the host's call-stack introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: String,
    pub file: String,
    pub line: u32,
    /// Type the called function belongs to, when the frame is a method call.
    pub owner: Option<String>,
    /// Call operator rendered between owner and function; only meaningful
    /// when `owner` is present.
    pub call_op: Option<String>,
}
