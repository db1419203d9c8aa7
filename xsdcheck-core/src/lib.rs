//! Validate XML documents against the W3C XML Schema they declare.
//!
//! The input may be a local path or a URL. Diagnostics are collected per
//! severity and the outcome maps to a process exit status.
//!
//! # Examples
//! ```rust,no_run
//! use xsdcheck_core::config::Config;
//! use xsdcheck_core::session::ValidationSession;
//!
//! let session = ValidationSession::new(Config::default())?;
//! let outcome = session.run_validation("note.xml");
//! if let Some(report) = outcome.report() {
//!     print!("{report}");
//! }
//! std::process::exit(outcome.status().code());
//! # Ok::<(), xsdcheck_core::Error>(())
//! ```
pub mod config;
pub mod history;
pub mod report;
pub mod resolve;
pub mod session;
pub mod validation;

use thiserror::Error;

pub use report::{Diagnostic, ErrorReport, ExitStatus, Severity};
pub use session::{SessionError, ValidationOutcome, ValidationSession};

/// Top-level error wrapper for core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] resolve::ResolveError),
    #[error(transparent)]
    Validation(#[from] validation::ValidationError),
    #[error(transparent)]
    Session(#[from] session::SessionError),
    #[error(transparent)]
    History(#[from] history::HistoryError),
}
