//! Pipeline orchestration: registration against the host's hooks, the
//! per-event control flow, the re-entrancy guard, and chaining to whatever
//! handler was active before installation.

pub mod hooks;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::context::Host;
use crate::domain::{ErrorEvent, RawError, Severity};
use crate::filter::{SuppressionState, should_report};
use crate::format::build_report;
use crate::sink::{Mailer, ReportSender};

pub use hooks::{ErrorHandlerFn, ExceptionKind, Handled, HookRegistry};

/// Whatever error handler was active before installation: nothing, or a
/// delegate invoked with the original raw arguments once this pipeline is
/// done with an event.
pub enum ChainedHandler {
    None,
    Prior(ErrorHandlerFn),
}

impl ChainedHandler {
    fn forward(&self, raw: &RawError) {
        if let ChainedHandler::Prior(handler) = self {
            handler(raw);
        }
    }
}

/// Clears the in-flight flag when the pipeline scope ends, including on
/// unwind out of formatting or delivery.
struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlightGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.get() {
            return None;
        }
        flag.set(true);
        Some(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// The error sink for one execution context.
///
/// Owns the configuration, the host seam, the delivery sinks, the chained
/// prior handler, and the re-entrancy guard. Hook closures share an
/// instance through `Rc`. Create one instance per execution context: the
/// guard is context-local state, not a cross-request global.
pub struct ErrorReporter {
    config: Config,
    host: Box<dyn Host>,
    sender: ReportSender,
    chain: RefCell<ChainedHandler>,
    in_flight: Cell<bool>,
}

impl ErrorReporter {
    pub fn new(
        config: Config,
        host: Box<dyn Host>,
        mailer: Rc<dyn Mailer>,
    ) -> Result<Rc<Self>, ConfigError> {
        config.validate()?;
        let sender = ReportSender::from_config(&config, mailer);
        Ok(Rc::new(Self {
            config,
            host,
            sender,
            chain: RefCell::new(ChainedHandler::None),
            in_flight: Cell::new(false),
        }))
    }

    /// Install this reporter as the host's active error sink: the error
    /// handler (capturing the prior one for chaining), a shutdown hook, and
    /// both exception hook categories. Takes a handle by value; callers
    /// keeping one around clone first.
    pub fn install(self: Rc<Self>, registry: &mut dyn HookRegistry) {
        let reporter = Rc::clone(&self);
        let prior =
            registry.swap_error_handler(Rc::new(move |raw: &RawError| reporter.handle_error(raw)));
        *self.chain.borrow_mut() = match prior {
            Some(handler) => ChainedHandler::Prior(handler),
            None => ChainedHandler::None,
        };

        let reporter = Rc::clone(&self);
        registry.register_shutdown_hook(Box::new(move || reporter.on_shutdown()));

        for kind in [ExceptionKind::Structured, ExceptionKind::Preformatted] {
            let reporter = Rc::clone(&self);
            registry.register_exception_hook(
                kind,
                Box::new(move |message: &str| reporter.on_exception(message)),
            );
        }
    }

    /// Live error-handler entry point.
    pub fn handle_error(&self, raw: &RawError) {
        self.report(raw, true);
    }

    /// Shutdown entry point: picks up a fatal error the host recorded after
    /// execution stopped before the live handler path could run. The
    /// recorded message already names the location, so no stack is rendered.
    pub fn on_shutdown(&self) {
        if let Some(last) = self.host.last_fatal()
            && last.severity.intersects(Severity::FATAL_SET)
        {
            let raw = RawError {
                severity: last.severity,
                message: last.message,
                file: last.file,
                line: last.line,
                context: None,
            };
            self.report(&raw, false);
        }
    }

    /// Uncaught-exception entry point. The message is the host's rendering
    /// and already embeds location and stack. Exceptions carry no numeric
    /// severity, so they are handled distinctly and never chained.
    pub fn on_exception(&self, message: &str) -> Handled {
        let event = ErrorEvent::exception(message);
        self.run_pipeline(&event);
        Handled::Yes
    }

    fn report(&self, raw: &RawError, include_stack: bool) {
        let event = ErrorEvent::from_raw(raw, include_stack);
        self.run_pipeline(&event);

        // Chaining preserves whatever the host did before installation. The
        // live mask is re-read here, not taken from the filtering snapshot.
        if self.host.live_mask().intersects(raw.severity) {
            self.chain.borrow().forward(raw);
        }
    }

    fn run_pipeline(&self, event: &ErrorEvent) {
        let suppression = SuppressionState {
            live_mask: self.host.live_mask(),
            depth: self.host.suppression_depth(),
        };
        if !should_report(&self.config, event, &suppression, self.in_flight.get()) {
            debug!(kind = ?event.kind, "event filtered, not reporting");
            return;
        }
        let Some(_guard) = InFlightGuard::enter(&self.in_flight) else {
            return;
        };

        let ctx = self.host.snapshot();
        let frames = if event.include_stack {
            // Skip the pipeline's own callback frame.
            let mut frames = self.host.backtrace();
            if !frames.is_empty() {
                frames.remove(0);
            }
            frames
        } else {
            Vec::new()
        };
        let report = build_report(event, &ctx, &frames);
        let outcome = self.sender.deliver(&report);
        debug!(
            file_written = outcome.file_written,
            mails_sent = outcome.mails_sent,
            mails_failed = outcome.mails_failed,
            "report delivered"
        );
    }
}
