#![allow(dead_code)]
//! Shared fixtures: a scripted host, a recording mail transport, and an
//! in-memory hook registry.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use errmail::{
    ErrorHandlerFn, ExceptionKind, Handled, Host, HostContext, HookRegistry, LastError,
    MailAddress, MailError, Mailer, ParamMap, RawError, Severity, StackFrame,
};

/// Host context used across tests; values mirror a small wiki request.
pub fn sample_context() -> HostContext {
    let mut query = ParamMap::new();
    query.insert("action".to_string(), "edit".into());
    let mut cookies = ParamMap::new();
    cookies.insert("session".to_string(), "abc123".into());
    HostContext {
        site_name: "ExampleWiki".to_string(),
        server_base: "https://wiki.example.org".to_string(),
        request_uri: "/index?action=edit".to_string(),
        title: Some("Main_Page".to_string()),
        user_name: "Alice".to_string(),
        client_ip: "203.0.113.7".to_string(),
        install_root: PathBuf::from("/srv/wiki"),
        query,
        form: ParamMap::new(),
        cookies,
    }
}

pub fn sample_frames() -> Vec<StackFrame> {
    vec![
        StackFrame {
            function: "handle".to_string(),
            file: "/srv/wiki/errmail/reporter.rs".to_string(),
            line: 1,
            owner: Some("ErrorReporter".to_string()),
            call_op: Some("::".to_string()),
        },
        StackFrame {
            function: "query".to_string(),
            file: "/srv/wiki/includes/db.rs".to_string(),
            line: 42,
            owner: Some("Database".to_string()),
            call_op: Some("::".to_string()),
        },
        StackFrame {
            function: "main".to_string(),
            file: "/opt/other/main.rs".to_string(),
            line: 7,
            owner: None,
            call_op: None,
        },
    ]
}

pub fn warning_raw(message: &str) -> RawError {
    RawError {
        severity: Severity::WARNING,
        message: message.to_string(),
        file: "/srv/wiki/includes/db.rs".to_string(),
        line: 42,
        context: None,
    }
}

/// Scripted host whose state stays reachable after the reporter takes
/// ownership of a clone.
#[derive(Clone)]
pub struct MockHost {
    inner: Rc<MockHostState>,
}

pub struct MockHostState {
    pub context: RefCell<HostContext>,
    pub live_mask: Cell<Severity>,
    pub depth: Cell<u32>,
    pub frames: RefCell<Vec<StackFrame>>,
    pub last: RefCell<Option<LastError>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(MockHostState {
                context: RefCell::new(sample_context()),
                live_mask: Cell::new(Severity::ALL),
                depth: Cell::new(0),
                frames: RefCell::new(sample_frames()),
                last: RefCell::new(None),
            }),
        }
    }

    pub fn set_live_mask(&self, mask: Severity) {
        self.inner.live_mask.set(mask);
    }

    pub fn set_depth(&self, depth: u32) {
        self.inner.depth.set(depth);
    }

    pub fn set_last_fatal(&self, last: Option<LastError>) {
        *self.inner.last.borrow_mut() = last;
    }
}

impl Host for MockHost {
    fn snapshot(&self) -> HostContext {
        self.inner.context.borrow().clone()
    }

    fn live_mask(&self) -> Severity {
        self.inner.live_mask.get()
    }

    fn suppression_depth(&self) -> u32 {
        self.inner.depth.get()
    }

    fn backtrace(&self) -> Vec<StackFrame> {
        self.inner.frames.borrow().clone()
    }

    fn last_fatal(&self) -> Option<LastError> {
        self.inner.last.borrow().clone()
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub content_type: String,
}

/// Mail transport double: records every send, optionally failing for a
/// fixed set of recipient addresses.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: RefCell<Vec<SentMail>>,
    pub fail_for: RefCell<Vec<String>>,
}

impl RecordingMailer {
    pub fn failing_for(address: &str) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_for: RefCell::new(vec![address.to_string()]),
        }
    }
}

impl Mailer for RecordingMailer {
    fn send(
        &self,
        to: &MailAddress,
        from: &MailAddress,
        subject: &str,
        body: &str,
        content_type: &str,
    ) -> Result<(), MailError> {
        if self.fail_for.borrow().contains(&to.address) {
            return Err(MailError("simulated transport failure".to_string()));
        }
        self.sent.borrow_mut().push(SentMail {
            to: to.address.clone(),
            from: from.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

/// In-memory stand-in for the host's hook registration primitives.
#[derive(Default)]
pub struct MockRegistry {
    pub active: Option<ErrorHandlerFn>,
    pub shutdown_hooks: Vec<Box<dyn FnOnce()>>,
    pub exception_hooks: Vec<(ExceptionKind, Box<dyn Fn(&str) -> Handled>)>,
}

impl HookRegistry for MockRegistry {
    fn swap_error_handler(&mut self, handler: ErrorHandlerFn) -> Option<ErrorHandlerFn> {
        self.active.replace(handler)
    }

    fn register_shutdown_hook(&mut self, hook: Box<dyn FnOnce()>) {
        self.shutdown_hooks.push(hook);
    }

    fn register_exception_hook(&mut self, kind: ExceptionKind, hook: Box<dyn Fn(&str) -> Handled>) {
        self.exception_hooks.push((kind, hook));
    }
}
