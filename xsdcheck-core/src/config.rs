//! Configuration for fetching and validating documents.
use std::time::Duration;

/// Default `User-Agent` sent when downloading documents and schemas.
pub const DEFAULT_USER_AGENT: &str = concat!("xsdcheck/", env!("CARGO_PKG_VERSION"));

/// Configuration for the resolver and validation session.
///
/// The defaults impose no transport timeout and delete downloaded documents
/// once validation is over.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use xsdcheck_core::config::Config;
///
/// let config = Config::default().with_fetch_timeout(Some(Duration::from_secs(10)));
/// assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(10)));
/// assert!(!config.keep_downloads());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    fetch_timeout: Option<Duration>,
    user_agent: String,
    temp_prefix: String,
    keep_downloads: bool,
}

impl Config {
    pub fn new(fetch_timeout: Option<Duration>, keep_downloads: bool) -> Self {
        Self {
            fetch_timeout,
            keep_downloads,
            ..Self::default()
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn temp_prefix(&self) -> &str {
        &self.temp_prefix
    }

    pub fn keep_downloads(&self) -> bool {
        self.keep_downloads
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    pub fn with_keep_downloads(mut self, keep: bool) -> Self {
        self.keep_downloads = keep;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fetch_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            temp_prefix: "xsdcheck-".to_string(),
            keep_downloads: false,
        }
    }
}
