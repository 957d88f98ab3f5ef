use std::fmt::Write as _;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{Severity, StackFrame};

/// A request parameter value as the host supplies it: a plain string or a
/// nested string mapping (e.g. `a[b]=c` style form fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Map(IndexMap<String, ParamValue>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// A request parameter container, in original insertion order.
pub type ParamMap = IndexMap<String, ParamValue>;

/// Render a parameter map as a debuggable key => value dump.
///
/// Insertion order is preserved; nested maps indent two further spaces per
/// level. An empty map renders as `{}` on one line.
pub fn dump_params(map: &ParamMap) -> String {
    let mut out = String::from("{");
    if map.is_empty() {
        out.push('}');
        return out;
    }
    out.push('\n');
    write_entries(&mut out, map, 1);
    out.push('}');
    out
}

fn write_entries(out: &mut String, map: &ParamMap, depth: usize) {
    for (key, value) in map {
        indent(out, depth);
        match value {
            ParamValue::Text(text) => {
                let _ = writeln!(out, "{key:?} => {text:?},");
            }
            ParamValue::Map(nested) => {
                let _ = writeln!(out, "{key:?} => {{");
                write_entries(out, nested, depth + 1);
                indent(out, depth);
                out.push_str("},\n");
            }
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Snapshot of the host request state a report is rendered against.
///
/// Built by the host integration once per event and injected as a plain
/// value, so formatting stays pure and testable with no ambient globals.
#[derive(Debug, Clone)]
pub struct HostContext {
    /// Site display name, used in subjects and the report header.
    pub site_name: String,
    /// Server base URL, e.g. `https://wiki.example.org`.
    pub server_base: String,
    /// Raw request path and query string.
    pub request_uri: String,
    /// Current page/title, when one is known.
    pub title: Option<String>,
    /// Display name of the acting user.
    pub user_name: String,
    /// Client network address.
    pub client_ip: String,
    /// Installation root; frame paths underneath it are rewritten relative.
    pub install_root: PathBuf,
    /// Query parameters.
    pub query: ParamMap,
    /// Form-body parameters.
    pub form: ParamMap,
    /// Request cookies.
    pub cookies: ParamMap,
}

/// The host's record of the last fatal failure, exposed after execution
/// stopped before the live handler path could run.
#[derive(Debug, Clone, PartialEq)]
pub struct LastError {
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: u32,
}

/// Live host accessors consumed by the pipeline.
///
/// Everything the host owns — request state, the live reporting mask, the
/// suppression counter, stack introspection, the last-fatal record — comes
/// through this seam. The pipeline never reads ambient globals.
pub trait Host {
    /// Snapshot of the current request state for formatting.
    fn snapshot(&self) -> HostContext;

    /// The host's live error-reporting mask.
    fn live_mask(&self) -> Severity;

    /// Nesting depth of explicit suppress/restore pairs currently active.
    fn suppression_depth(&self) -> u32;

    /// Ordered call stack at the raising site, innermost first. The first
    /// frame is the pipeline's own callback; the reporter skips it.
    fn backtrace(&self) -> Vec<StackFrame>;

    /// The last fatal error the host recorded, if any.
    fn last_fatal(&self) -> Option<LastError>;
}
