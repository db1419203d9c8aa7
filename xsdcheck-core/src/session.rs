//! One validation invocation: resolve, validate, classify.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::history::HistoryStore;
use crate::report::{ErrorReport, ExitStatus, Severity};
use crate::resolve::{ResolveError, Resolver};
use crate::validation::{SchemaValidator, ValidationError};

/// Reasons a validation could not be attempted at all.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not resolve document: {0}")]
    Resolution(#[from] ResolveError),
    #[error("parser configuration error: {0}")]
    Configuration(String),
    #[error("I/O error: {0}")]
    ParseIo(String),
    #[error("XML processing error: {0}")]
    Processing(String),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Configuration(message) => SessionError::Configuration(message),
            io @ ValidationError::Io { .. } => SessionError::ParseIo(io.to_string()),
            ValidationError::Processing(message) => SessionError::Processing(message),
        }
    }
}

/// Result of [`ValidationSession::run_validation`].
///
/// When validation ran, the outcome carries the populated report and no failure.
/// When it could not run, the status is [`ExitStatus::Exception`], the report is
/// absent, and [`ValidationOutcome::failure`] explains why.
#[derive(Debug)]
pub struct ValidationOutcome {
    status: ExitStatus,
    report: Option<ErrorReport>,
    failure: Option<SessionError>,
    kept_download: Option<PathBuf>,
}

impl ValidationOutcome {
    fn completed(report: ErrorReport) -> Self {
        Self {
            status: report.exit_status(),
            report: Some(report),
            failure: None,
            kept_download: None,
        }
    }

    fn failed(failure: SessionError) -> Self {
        Self {
            status: ExitStatus::Exception,
            report: None,
            failure: Some(failure),
            kept_download: None,
        }
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }

    pub fn report(&self) -> Option<&ErrorReport> {
        self.report.as_ref()
    }

    pub fn into_report(self) -> Option<ErrorReport> {
        self.report
    }

    pub fn failure(&self) -> Option<&SessionError> {
        self.failure.as_ref()
    }

    pub fn failure_message(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    /// Where the downloaded document was kept, when the session was configured to
    /// keep downloads and the input was fetched over the network.
    pub fn kept_download(&self) -> Option<&Path> {
        self.kept_download.as_deref()
    }

    fn with_kept_download(mut self, path: Option<PathBuf>) -> Self {
        self.kept_download = path;
        self
    }

    /// True when validation ran, whatever it found.
    pub fn ran(&self) -> bool {
        self.report.is_some()
    }
}

/// Entry point used by front-ends to validate one document.
///
/// A session holds no per-run state: `run_validation` can be called repeatedly
/// and from several threads at once.
///
/// # Examples
/// ```rust,no_run
/// use xsdcheck_core::config::Config;
/// use xsdcheck_core::report::ExitStatus;
/// use xsdcheck_core::session::ValidationSession;
///
/// let session = ValidationSession::new(Config::default())?;
/// let outcome = session.run_validation("https://example.com/note.xml");
/// if outcome.status() == ExitStatus::Exception {
///     eprintln!("{}", outcome.failure_message().unwrap_or_default());
/// }
/// # Ok::<(), xsdcheck_core::Error>(())
/// ```
pub struct ValidationSession {
    config: Config,
    resolver: Resolver,
    validator: SchemaValidator,
    history: Option<Arc<dyn HistoryStore>>,
}

impl std::fmt::Debug for ValidationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationSession")
            .field("config", &self.config)
            .field("history", &self.history.is_some())
            .finish()
    }
}

impl ValidationSession {
    /// # Errors
    /// Returns [`ResolveError::Client`] if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, ResolveError> {
        let resolver = Resolver::new(&config)?;
        Ok(Self {
            validator: SchemaValidator::new(resolver.clone()),
            resolver,
            config,
            history: None,
        })
    }

    /// Record every input whose validation ran into `history`.
    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_validation(&self, uri_or_path: &str) -> ValidationOutcome {
        info!(uri = uri_or_path, "validating");

        let document = match self.resolver.resolve(uri_or_path) {
            Ok(document) => document,
            Err(e) => {
                error!(uri = uri_or_path, error = %e, "could not resolve document");
                return ValidationOutcome::failed(e.into());
            }
        };
        let (document, kept_download) = if self.config.keep_downloads() && document.is_downloaded()
        {
            match document.keep() {
                Ok(kept) => {
                    info!(path = %kept.path().display(), "kept downloaded document");
                    let path = kept.path().to_path_buf();
                    (kept, Some(path))
                }
                Err(e) => return ValidationOutcome::failed(e.into()),
            }
        } else {
            (document, None)
        };

        let mut report = ErrorReport::new();
        if let Err(e) = self.validator.validate_resolved(&document, &mut report) {
            error!(uri = uri_or_path, error = %e, "validation could not run");
            return ValidationOutcome::failed(e.into()).with_kept_download(kept_download);
        }
        drop(document);

        debug!(
            warnings = report.count(Severity::Warning),
            errors = report.count(Severity::Error),
            fatals = report.count(Severity::Fatal),
            "validation finished"
        );
        if report.is_valid() {
            info!(uri = uri_or_path, "document is valid");
        } else {
            error!(uri = uri_or_path, status = %report.exit_status(), "document is invalid");
        }

        if let Some(history) = &self.history {
            if let Err(e) = history.record(uri_or_path) {
                warn!(error = %e, "could not record history");
            }
        }

        ValidationOutcome::completed(report).with_kept_download(kept_download)
    }
}
