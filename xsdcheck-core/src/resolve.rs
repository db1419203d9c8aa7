//! Turning a user supplied path or URL into a readable local document.
use std::io::Write;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;

const SCHEME_SEPARATOR: &str = "://";

/// Errors raised while resolving or downloading a document.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("malformed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to fetch {url}: server answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("temporary file error: {0}")]
    TempFile(#[from] std::io::Error),
    #[error("HTTP client could not be built: {0}")]
    Client(#[source] reqwest::Error),
}

/// Returns true when `uri_or_path` names a URL rather than a filesystem path.
pub fn is_url(uri_or_path: &str) -> bool {
    uri_or_path.contains(SCHEME_SEPARATOR)
}

/// Location against which relative schema references of a document resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBase {
    Path(PathBuf),
    Url(Url),
}

/// Where a referenced schema document can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Local(PathBuf),
    Remote(Url),
}

impl DocumentBase {
    /// Resolve a schema reference (as written in `xsi:schemaLocation`).
    ///
    /// Returns `None` when the reference cannot be turned into a location.
    pub fn locate(&self, reference: &str) -> Option<SchemaSource> {
        if is_url(reference) {
            return Url::parse(reference).ok().map(source_from_url);
        }
        match self {
            DocumentBase::Url(base) => base.join(reference).ok().map(source_from_url),
            DocumentBase::Path(document) => {
                let reference = Path::new(reference);
                if reference.is_absolute() {
                    return Some(SchemaSource::Local(reference.to_path_buf()));
                }
                let dir = document.parent().unwrap_or_else(|| Path::new(""));
                Some(SchemaSource::Local(dir.join(reference)))
            }
        }
    }
}

fn source_from_url(url: Url) -> SchemaSource {
    if url.scheme() == "file" {
        if let Ok(path) = url.to_file_path() {
            return SchemaSource::Local(path);
        }
    }
    SchemaSource::Remote(url)
}

#[derive(Debug)]
enum Location {
    Local(PathBuf),
    Downloaded(NamedTempFile),
}

/// A document that is readable on the local filesystem.
///
/// A downloaded document lives in a temporary file that is removed when this
/// value is dropped, unless [`ResolvedDocument::keep`] was called.
#[derive(Debug)]
pub struct ResolvedDocument {
    origin: String,
    base: DocumentBase,
    location: Location,
}

impl ResolvedDocument {
    fn local(origin: &str, path: PathBuf) -> Self {
        Self {
            origin: origin.to_string(),
            base: DocumentBase::Path(path.clone()),
            location: Location::Local(path),
        }
    }

    /// Local path of the document.
    pub fn path(&self) -> &Path {
        match &self.location {
            Location::Local(path) => path,
            Location::Downloaded(file) => file.path(),
        }
    }

    /// The string this document was resolved from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn base(&self) -> &DocumentBase {
        &self.base
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self.location, Location::Downloaded(_))
    }

    /// Persist a downloaded document so it outlives this value.
    ///
    /// # Errors
    /// Returns [`ResolveError::TempFile`] if the temporary file cannot be persisted.
    pub fn keep(self) -> Result<Self, ResolveError> {
        let location = match self.location {
            Location::Downloaded(file) => {
                let (_, path) = file.keep().map_err(|e| ResolveError::TempFile(e.error))?;
                Location::Local(path)
            }
            local => local,
        };
        Ok(Self { location, ..self })
    }
}

/// Resolves paths and URLs to local documents.
///
/// # Examples
/// ```rust
/// use xsdcheck_core::config::Config;
/// use xsdcheck_core::resolve::Resolver;
///
/// let resolver = Resolver::new(&Config::default())?;
/// let document = resolver.resolve("docs/note.xml")?;
/// assert_eq!(document.path(), std::path::Path::new("docs/note.xml"));
/// # Ok::<(), xsdcheck_core::resolve::ResolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    temp_prefix: String,
}

impl Resolver {
    /// # Errors
    /// Returns [`ResolveError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(ResolveError::Client)?;
        Ok(Self {
            client,
            temp_prefix: config.temp_prefix().to_string(),
        })
    }

    /// Resolve `uri_or_path` to a readable local document.
    ///
    /// Strings without `://` are returned unchanged as a path; whether the path
    /// exists is left to the parser. `file://` URLs map to a local path, any
    /// other URL is downloaded once, with no retries.
    ///
    /// # Errors
    /// Returns [`ResolveError`] for malformed URLs, network failures, non-success
    /// HTTP statuses and temporary file failures.
    pub fn resolve(&self, uri_or_path: &str) -> Result<ResolvedDocument, ResolveError> {
        if !is_url(uri_or_path) {
            return Ok(ResolvedDocument::local(uri_or_path, PathBuf::from(uri_or_path)));
        }

        let url = Url::parse(uri_or_path).map_err(|e| ResolveError::InvalidUrl {
            url: uri_or_path.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() == "file" {
            let path = url.to_file_path().map_err(|()| ResolveError::InvalidUrl {
                url: uri_or_path.to_string(),
                reason: "not a local file URL".into(),
            })?;
            return Ok(ResolvedDocument::local(uri_or_path, path));
        }

        let file = self.fetch(&url, ".xml")?;
        Ok(ResolvedDocument {
            origin: uri_or_path.to_string(),
            base: DocumentBase::Url(url),
            location: Location::Downloaded(file),
        })
    }

    /// Download `url` into a new temporary file ending in `suffix`.
    ///
    /// # Errors
    /// See [`Resolver::resolve`].
    pub fn fetch(&self, url: &Url, suffix: &str) -> Result<NamedTempFile, ResolveError> {
        info!(url = %url, "downloading");
        let http_err = |source: reqwest::Error| ResolveError::Http {
            url: url.to_string(),
            source,
        };

        let mut response = self.client.get(url.as_str()).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status,
            });
        }

        let mut file = tempfile::Builder::new()
            .prefix(&self.temp_prefix)
            .suffix(suffix)
            .tempfile()?;
        let bytes = response.copy_to(&mut file).map_err(http_err)?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes, "download complete");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::new(&Config::default()).expect("resolver")
    }

    #[test]
    fn local_path_is_returned_unchanged() {
        for input in ["doc.xml", "./a b/ü.xml", "/tmp/../x.xml", ""] {
            let document = resolver().resolve(input).expect("local");
            assert_eq!(document.path().as_os_str(), input);
            assert_eq!(document.origin(), input);
            assert!(!document.is_downloaded());
        }
    }

    #[test]
    fn scheme_separator_marks_url() {
        assert!(is_url("http://example.com/a.xml"));
        assert!(is_url("ftp://host/x"));
        assert!(!is_url("C:\\docs\\a.xml"));
        assert!(!is_url("http:/not-quite"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = resolver().resolve("http://[::1/doc.xml").expect_err("bad url");
        assert!(matches!(err, ResolveError::InvalidUrl { .. }));
    }

    #[test]
    fn file_url_resolves_locally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.xml");
        let url = Url::from_file_path(&path).expect("file url");

        let document = resolver().resolve(url.as_str()).expect("file url");
        assert_eq!(document.path(), path.as_path());
        assert!(!document.is_downloaded());
    }

    #[test]
    fn unreachable_host_is_an_http_error() {
        let err = resolver()
            .resolve("http://127.0.0.1:1/doc.xml")
            .expect_err("connection refused");
        assert!(matches!(err, ResolveError::Http { .. }));
        assert!(err.to_string().contains("127.0.0.1:1"));
    }

    #[test]
    fn keep_on_local_document_is_noop() {
        let document = resolver().resolve("doc.xml").expect("local");
        let kept = document.keep().expect("keep");
        assert_eq!(kept.path(), Path::new("doc.xml"));
    }

    #[test]
    fn relative_reference_resolves_next_to_document() {
        let base = DocumentBase::Path(PathBuf::from("fixtures/docs/note.xml"));
        assert_eq!(
            base.locate("note.xsd"),
            Some(SchemaSource::Local(PathBuf::from("fixtures/docs/note.xsd")))
        );
    }

    #[test]
    fn relative_reference_resolves_against_url() {
        let base = DocumentBase::Url(Url::parse("https://example.com/docs/note.xml").unwrap());
        assert_eq!(
            base.locate("../schemas/note.xsd"),
            Some(SchemaSource::Remote(
                Url::parse("https://example.com/schemas/note.xsd").unwrap()
            ))
        );
    }

    #[test]
    fn absolute_reference_ignores_base() {
        let base = DocumentBase::Path(PathBuf::from("docs/note.xml"));
        assert_eq!(
            base.locate("https://example.com/note.xsd"),
            Some(SchemaSource::Remote(
                Url::parse("https://example.com/note.xsd").unwrap()
            ))
        );
    }
}
