//! Diagnostic collection and exit-status classification.
use serde::Serialize;
use std::fmt;

/// Severity of a single diagnostic, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Section header used when rendering a report.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warnings",
            Severity::Error => "Errors",
            Severity::Fatal => "Fatals",
        }
    }
}

/// Process exit status derived from a validation run.
///
/// Variants are ordered so that a worse outcome compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatus {
    Ok,
    Warnings,
    Errors,
    Fatal,
    Exception,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::Warnings => 1,
            ExitStatus::Errors => 2,
            ExitStatus::Fatal => 3,
            ExitStatus::Exception => 255,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExitStatus::Ok => "OK",
            ExitStatus::Warnings => "WARNINGS",
            ExitStatus::Errors => "ERRORS",
            ExitStatus::Fatal => "FATAL",
            ExitStatus::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem reported while parsing or validating a document.
///
/// # Examples
/// ```rust
/// use xsdcheck_core::report::{Diagnostic, Severity};
///
/// let diagnostic = Diagnostic::new(Severity::Error, None, 4, "boom");
/// assert_eq!(diagnostic.to_string(), "URI=null Line=4: boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    severity: Severity,
    locator: Option<String>,
    line: i64,
    message: String,
}

impl Diagnostic {
    /// Line number used when the engine cannot tell where the problem is.
    pub const UNKNOWN_LINE: i64 = -1;

    pub fn new(
        severity: Severity,
        locator: Option<String>,
        line: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            locator,
            line,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    pub fn line(&self) -> i64 {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "URI={} Line={}: {}",
            self.locator.as_deref().unwrap_or("null"),
            self.line,
            self.message
        )
    }
}

/// Severity-bucketed sink for the diagnostics of exactly one validation pass.
///
/// Each bucket keeps detection order. A report is never reset: create a new one
/// for every pass.
///
/// Rendering with [`Display`](fmt::Display) writes a `Warnings:`, `Errors:` and
/// `Fatals:` section (in that order) for every non-empty bucket, one diagnostic
/// per line. Empty buckets are omitted, so a clean report renders as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
    fatals: Vec<Diagnostic>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    pub fn error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn fatal_error(&mut self, diagnostic: Diagnostic) {
        self.fatals.push(diagnostic);
    }

    /// Route a diagnostic to the bucket matching its own severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => self.warning(diagnostic),
            Severity::Error => self.error(diagnostic),
            Severity::Fatal => self.fatal_error(diagnostic),
        }
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn fatals(&self) -> &[Diagnostic] {
        &self.fatals
    }

    pub fn diagnostics(&self, severity: Severity) -> &[Diagnostic] {
        match severity {
            Severity::Warning => &self.warnings,
            Severity::Error => &self.errors,
            Severity::Fatal => &self.fatals,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics(severity).len()
    }

    /// Total number of diagnostics across all buckets.
    pub fn len(&self) -> usize {
        self.warnings.len() + self.errors.len() + self.fatals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    /// Classify the report. The most severe non-empty bucket wins.
    pub fn exit_status(&self) -> ExitStatus {
        if !self.fatals.is_empty() {
            ExitStatus::Fatal
        } else if !self.errors.is_empty() {
            ExitStatus::Errors
        } else if !self.warnings.is_empty() {
            ExitStatus::Warnings
        } else {
            ExitStatus::Ok
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for severity in [Severity::Warning, Severity::Error, Severity::Fatal] {
            let bucket = self.diagnostics(severity);
            if bucket.is_empty() {
                continue;
            }
            writeln!(f, "{}:", severity.label())?;
            for diagnostic in bucket {
                writeln!(f, "{diagnostic}")?;
            }
        }
        Ok(())
    }
}
