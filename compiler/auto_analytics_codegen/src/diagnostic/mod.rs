//! Diagnostics produced by the discovery and generation pass.
//!
//! Every message carries the [`Step`] that produced it so build output can be
//! traced back to the check that fired. Where the messages go is decided by
//! the [`DiagnosticSink`] the caller passes in:
//!
//! - [`DiagnosticBuffer`] collects them (tests, the CLI `discover` command)
//! - [`TracingSink`] forwards them to `tracing`
//! - [`CargoSink`] turns warnings and errors into `cargo:warning=` lines for
//!   build scripts

use std::fmt;
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    /// Aborts the pass.
    Error,
    /// An annotated declaration was skipped.
    Warning,
    /// Debug-level trace, e.g. a member excluded from a registry.
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// The pass step a diagnostic originates from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Step {
    LoadSources,
    Process,
    AnalyticsElement,
    DeclaredEvents,
    ValidMember,
    Generate,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::LoadSources => "load_sources",
            Step::Process => "process",
            Step::AnalyticsElement => "analytics_element",
            Step::DeclaredEvents => "declared_events",
            Step::ValidMember => "valid_member",
            Step::Generate => "generate",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message from the pass.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be emitted to a sink, not silently dropped"]
pub struct Diagnostic {
    pub severity: Severity,
    pub step: Step,
    pub message: String,
    /// Source file the message refers to, if any.
    pub file: Option<PathBuf>,
    /// 1-based line within `file`.
    pub line: Option<usize>,
}

impl Diagnostic {
    fn new(severity: Severity, step: Step, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            step,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    pub fn error(step: Step, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, step, message)
    }

    pub fn warning(step: Step, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, step, message)
    }

    pub fn note(step: Step, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, step, message)
    }

    /// Attach a source location.
    pub fn at(mut self, file: impl Into<PathBuf>, line: usize) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auto-analytics[{}] {}", self.step, self.message)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({}:{line})", file.display()),
            (Some(file), None) => write!(f, " ({})", file.display()),
            _ => Ok(()),
        }
    }
}

/// Destination for pass diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Collects diagnostics in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticBuffer {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn notes(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Note)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`.
///
/// Errors map to `error!`, warnings to `warn!` and notes to `debug!`.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let step = diagnostic.step.as_str();
        match diagnostic.severity {
            Severity::Error => tracing::error!(step, "{diagnostic}"),
            Severity::Warning => tracing::warn!(step, "{diagnostic}"),
            Severity::Note => tracing::debug!(step, "{diagnostic}"),
        }
    }
}

/// Sink for build scripts.
///
/// Warnings and errors are printed as `cargo:warning=` lines so they show up
/// in `cargo build` output; everything is also forwarded to `tracing`.
#[derive(Copy, Clone, Debug, Default)]
pub struct CargoSink {
    tracing: TracingSink,
}

impl DiagnosticSink for CargoSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity != Severity::Note {
            println!("cargo:warning={diagnostic}");
        }
        self.tracing.emit(diagnostic);
    }
}
