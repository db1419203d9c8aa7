//! Schema-aware validation of XML documents.
//!
//! A pass runs in two stages. A namespace-aware well-formedness scan (quick-xml)
//! stops at the first violation and records it as a fatal diagnostic. It also
//! picks up the schema declared on the root element through `xsi:schemaLocation`
//! or `xsi:noNamespaceSchemaLocation`. libxml2 then parses the document with
//! recovery turned off; anything it rejects is a fatal too. Otherwise libxml2
//! compiles the declared W3C XML Schema and validates the document against it.
//! Every problem libxml2 reports becomes a diagnostic at the level it was raised.
use std::fs;
use std::path::{Path, PathBuf};

use libxml::{
    error::{StructuredError, XmlErrorLevel},
    parser::{Parser, ParserOptions, XmlParseFailure},
    tree::Document,
    schemas::{SchemaParserContext, SchemaValidationContext},
};
use quick_xml::{
    NsReader,
    escape::{EscapeError, escape},
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::report::{Diagnostic, ErrorReport, Severity};
use crate::resolve::{DocumentBase, ResolvedDocument, Resolver, SchemaSource};

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Failures that stop a validation pass before it can produce a result.
///
/// Schema and well-formedness problems are never reported here; they are
/// collected in the [`ErrorReport`] instead.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("schema validator could not be configured: {0}")]
    Configuration(String),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("XML processing failed: {0}")]
    Processing(String),
}

/// A schema declared by the document through an `xsi` hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaHint {
    pub namespace: Option<String>,
    pub location: String,
}

/// What the well-formedness scan learned about the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootElement {
    pub name: String,
    pub line: i64,
    pub hints: Vec<SchemaHint>,
    /// Raw `xsi:schemaLocation` value when it held an odd number of URIs.
    pub unpaired_location: Option<String>,
}

/// First well-formedness violation found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellFormednessError {
    pub line: i64,
    pub message: String,
}

/// Validates documents against the W3C XML Schema they declare.
///
/// # Examples
/// ```rust,no_run
/// use std::path::Path;
/// use xsdcheck_core::config::Config;
/// use xsdcheck_core::report::ErrorReport;
/// use xsdcheck_core::resolve::Resolver;
/// use xsdcheck_core::validation::SchemaValidator;
///
/// let validator = SchemaValidator::new(Resolver::new(&Config::default())?);
/// let mut report = ErrorReport::new();
/// validator.validate(Path::new("note.xml"), &mut report)?;
/// println!("{report}");
/// # Ok::<(), xsdcheck_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    resolver: Resolver,
}

struct LoadedSchemas {
    files: Vec<(Option<String>, PathBuf)>,
    // downloaded schemas must stay on disk until libxml2 has compiled them
    _downloads: Vec<NamedTempFile>,
}

impl SchemaValidator {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// Validate the document at `path`, routing every diagnostic into `report`.
    ///
    /// Relative schema locations resolve next to `path`.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the document cannot be read or the
    /// validation engine cannot run; diagnostics never produce an error.
    pub fn validate(&self, path: &Path, report: &mut ErrorReport) -> Result<(), ValidationError> {
        let origin = path.to_string_lossy();
        let base = DocumentBase::Path(path.to_path_buf());
        self.run(path, &origin, &base, report)
    }

    /// Like [`SchemaValidator::validate`], for a document produced by the resolver.
    ///
    /// Diagnostics about the document carry its origin (for example the URL it was
    /// downloaded from) rather than the temporary path.
    ///
    /// # Errors
    /// See [`SchemaValidator::validate`].
    pub fn validate_resolved(
        &self,
        document: &ResolvedDocument,
        report: &mut ErrorReport,
    ) -> Result<(), ValidationError> {
        self.run(document.path(), document.origin(), document.base(), report)
    }

    fn run(
        &self,
        path: &Path,
        origin: &str,
        base: &DocumentBase,
        report: &mut ErrorReport,
    ) -> Result<(), ValidationError> {
        let bytes = fs::read(path).map_err(|source| ValidationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let root = match scan_document(&bytes) {
            Ok(root) => root,
            Err(fatal) => {
                debug!(line = fatal.line, "document is not well-formed");
                report.fatal_error(Diagnostic::new(
                    Severity::Fatal,
                    Some(origin.to_string()),
                    fatal.line,
                    fatal.message,
                ));
                return Ok(());
            }
        };

        let document = match parse_strict(&bytes)? {
            Ok(document) => document,
            Err(fatal) => {
                debug!(line = fatal.line, "libxml2 rejected the document");
                report.fatal_error(Diagnostic::new(
                    Severity::Fatal,
                    Some(origin.to_string()),
                    fatal.line,
                    fatal.message,
                ));
                return Ok(());
            }
        };

        if let Some(value) = &root.unpaired_location {
            report.warning(Diagnostic::new(
                Severity::Warning,
                Some(origin.to_string()),
                root.line,
                format!(
                    "SchemaLocation: schemaLocation value = '{value}' must have even number of URI's."
                ),
            ));
        }

        let schemas = self.load_schemas(&root, base, origin, report);
        if schemas.files.is_empty() {
            report.error(Diagnostic::new(
                Severity::Error,
                Some(origin.to_string()),
                root.line,
                format!(
                    "cvc-elt.1: Cannot find the declaration of element '{}'.",
                    root.name
                ),
            ));
            return Ok(());
        }

        let mut parser_ctx = schema_parser_context(&schemas)?;
        let mut validation_ctx = match SchemaValidationContext::from_parser(&mut parser_ctx) {
            Ok(ctx) => ctx,
            Err(errors) if errors.is_empty() => {
                return Err(ValidationError::Configuration(
                    "schema validation context could not be created".into(),
                ));
            }
            Err(errors) => {
                debug!(count = errors.len(), "schema failed to compile");
                for error in errors {
                    report.push(diagnostic_from(error, None));
                }
                return Ok(());
            }
        };

        // the binding synthesizes a diagnostic when libxml2 fails without one
        if let Err(errors) = validation_ctx.validate_document(&document) {
            for error in errors {
                report.push(diagnostic_from(error, Some(origin)));
            }
        }
        Ok(())
    }

    fn load_schemas(
        &self,
        root: &RootElement,
        base: &DocumentBase,
        origin: &str,
        report: &mut ErrorReport,
    ) -> LoadedSchemas {
        let mut loaded = LoadedSchemas {
            files: Vec::new(),
            _downloads: Vec::new(),
        };

        for hint in &root.hints {
            // only the first location given for a namespace is used
            if loaded.files.iter().any(|(ns, _)| *ns == hint.namespace) {
                continue;
            }
            match self.read_schema(base, &hint.location) {
                Ok((path, download)) => {
                    debug!(location = %hint.location, path = %path.display(), "schema located");
                    loaded.files.push((hint.namespace.clone(), path));
                    loaded._downloads.extend(download);
                }
                Err(reason) => {
                    debug!(location = %hint.location, %reason, "schema unreadable");
                    report.warning(Diagnostic::new(
                        Severity::Warning,
                        Some(origin.to_string()),
                        root.line,
                        format!(
                            "schema_reference.4: Failed to read schema document '{}', because 1) could not find the document; 2) the document could not be read; 3) the root element of the document is not <xsd:schema>.",
                            hint.location
                        ),
                    ));
                }
            }
        }
        loaded
    }

    fn read_schema(
        &self,
        base: &DocumentBase,
        location: &str,
    ) -> Result<(PathBuf, Option<NamedTempFile>), String> {
        match base.locate(location) {
            None => Err("unresolvable reference".into()),
            Some(SchemaSource::Local(path)) => {
                let path = fs::canonicalize(&path).map_err(|e| e.to_string())?;
                if !path.is_file() {
                    return Err("not a file".into());
                }
                Ok((path, None))
            }
            Some(SchemaSource::Remote(url)) => {
                let file = self
                    .resolver
                    .fetch(&url, ".xsd")
                    .map_err(|e| e.to_string())?;
                Ok((file.path().to_path_buf(), Some(file)))
            }
        }
    }
}

fn schema_parser_context(schemas: &LoadedSchemas) -> Result<SchemaParserContext, ValidationError> {
    if let [(_, path)] = schemas.files.as_slice() {
        let path = path.to_str().ok_or_else(|| {
            ValidationError::Configuration(format!(
                "schema path is not valid UTF-8: {}",
                path.display()
            ))
        })?;
        return Ok(SchemaParserContext::from_file(path));
    }
    Ok(SchemaParserContext::from_buffer(wrapper_schema(&schemas.files)))
}

/// Parse `bytes` with recovery off, so libxml2 rejects whatever the scan let through.
///
/// The outer error means the parser itself could not run.
fn parse_strict(bytes: &[u8]) -> Result<Result<Document, WellFormednessError>, ValidationError> {
    let options = ParserOptions {
        recover: false,
        ..ParserOptions::default()
    };
    match Parser::default().parse_string_with_diagnostics(bytes, options) {
        Ok((document, _)) => Ok(Ok(document)),
        Err(XmlParseFailure::ParseFailed(diagnostics)) => {
            let first = diagnostics.into_iter().next();
            let line = first
                .as_ref()
                .and_then(|error| error.line)
                .map(i64::from)
                .unwrap_or(Diagnostic::UNKNOWN_LINE);
            let message = first
                .and_then(|error| error.message)
                .map(|message| message.trim().to_string())
                .unwrap_or_else(|| "The document is not well-formed.".into());
            Ok(Err(WellFormednessError { line, message }))
        }
        Err(e) => Err(ValidationError::Processing(e.to_string())),
    }
}

/// Build a schema that pulls in every located schema, so several namespaces
/// can be validated in one pass.
fn wrapper_schema(files: &[(Option<String>, PathBuf)]) -> String {
    let mut xsd = format!("<xs:schema xmlns:xs=\"{XS_NAMESPACE}\">");
    for (namespace, path) in files {
        let location = Url::from_file_path(path)
            .map(|url| url.to_string())
            .unwrap_or_else(|()| path.display().to_string());
        let location = escape(location.as_str());
        match namespace {
            Some(namespace) => xsd.push_str(&format!(
                "<xs:import namespace=\"{}\" schemaLocation=\"{location}\"/>",
                escape(namespace.as_str())
            )),
            // a no-namespace schema cannot be imported into a no-namespace wrapper
            None => xsd.push_str(&format!("<xs:include schemaLocation=\"{location}\"/>")),
        }
    }
    xsd.push_str("</xs:schema>");
    xsd
}

/// Convert a libxml2 error. Errors raised against the in-memory document carry no
/// filename and are attributed to `document_origin`.
fn diagnostic_from(error: StructuredError, document_origin: Option<&str>) -> Diagnostic {
    let severity = match error.level {
        XmlErrorLevel::Fatal => Severity::Fatal,
        XmlErrorLevel::Error => Severity::Error,
        XmlErrorLevel::Warning | XmlErrorLevel::None => Severity::Warning,
    };
    let locator = error
        .filename
        .or_else(|| document_origin.map(str::to_string));
    let line = error
        .line
        .map(|line| line as i64)
        .unwrap_or(Diagnostic::UNKNOWN_LINE);
    let message = error
        .message
        .as_deref()
        .map(str::trim)
        .unwrap_or("unknown libxml2 error")
        .to_string();
    Diagnostic::new(severity, locator, line, message)
}

/// Check that `bytes` is a namespace well-formed XML document and describe its
/// root element.
///
/// # Errors
/// Returns the first violation found; scanning does not continue past it.
pub fn scan_document(bytes: &[u8]) -> Result<RootElement, WellFormednessError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let fail = |offset: u64, message: String| WellFormednessError {
        line: line_at(bytes, offset),
        message,
    };

    let mut reader = NsReader::from_reader(bytes);
    let mut depth = 0usize;
    let mut root: Option<RootElement> = None;
    // entities declared in a DTD are left for libxml2 to expand
    let mut has_dtd = false;

    loop {
        let offset = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| fail(reader.error_position() as u64, e.to_string()))?;

        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                if depth == 0 && root.is_some() {
                    return Err(fail(
                        offset,
                        "The markup in the document following the root element must be well-formed.".into(),
                    ));
                }
                let hints =
                    inspect_element(&reader, element, has_dtd).map_err(|m| fail(offset, m))?;
                if root.is_none() {
                    let (hints, unpaired_location) = hints;
                    root = Some(RootElement {
                        name: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
                        line: line_at(bytes, offset),
                        hints,
                        unpaired_location,
                    });
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(ref text) => {
                if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(fail(offset, misplaced_content(root.is_some())));
                }
                if !has_dtd {
                    if let Err(e) = text.unescape() {
                        let (at, message) = reference_error(text, &e);
                        return Err(fail(offset + at as u64, message));
                    }
                }
            }
            Event::DocType(_) => has_dtd = true,
            Event::CData(_) if depth == 0 => {
                return Err(fail(offset, misplaced_content(root.is_some())));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let end = bytes.len() as u64;
    if depth > 0 {
        return Err(fail(
            end,
            "XML document structures must start and end within the same entity.".into(),
        ));
    }
    root.ok_or_else(|| fail(end, "Premature end of file.".into()))
}

fn misplaced_content(after_root: bool) -> String {
    if after_root {
        "Content is not allowed in trailing section.".into()
    } else {
        "Content is not allowed in prolog.".into()
    }
}

type ElementHints = (Vec<SchemaHint>, Option<String>);

fn inspect_element(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
    has_dtd: bool,
) -> Result<ElementHints, String> {
    let element_name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    if let (ResolveResult::Unknown(prefix), _) = reader.resolve_element(element.name()) {
        return Err(format!(
            "The prefix \"{}\" for element \"{element_name}\" is not bound.",
            String::from_utf8_lossy(&prefix)
        ));
    }

    let mut hints = Vec::new();
    let mut unpaired = None;
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if !has_dtd {
            attr.unescape_value()
                .map_err(|e| reference_error(&attr.value, &e).1)?;
        }
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (namespace, local) = reader.resolve_attribute(attr.key);
        match namespace {
            ResolveResult::Unknown(prefix) => {
                return Err(format!(
                    "The prefix \"{}\" for attribute \"{}\" associated with an element type \"{element_name}\" is not bound.",
                    String::from_utf8_lossy(&prefix),
                    String::from_utf8_lossy(key)
                ));
            }
            ResolveResult::Bound(Namespace(ns)) if ns == XSI_NAMESPACE.as_bytes() => {
                let value = attr.unescape_value().map_err(|e| e.to_string())?;
                match local.as_ref() {
                    b"noNamespaceSchemaLocation" => {
                        if let Some(location) = value.split_whitespace().next() {
                            hints.push(SchemaHint {
                                namespace: None,
                                location: location.to_string(),
                            });
                        }
                    }
                    b"schemaLocation" => {
                        let uris: Vec<&str> = value.split_whitespace().collect();
                        if uris.len() % 2 != 0 {
                            unpaired = Some(value.to_string());
                        }
                        for pair in uris.chunks_exact(2) {
                            hints.push(SchemaHint {
                                namespace: Some(pair[0].to_string()),
                                location: pair[1].to_string(),
                            });
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
    Ok((hints, unpaired))
}

/// Describe a bad entity or character reference in `raw`, returning the offset of
/// the offending `&` within it.
fn reference_error(raw: &[u8], error: &quick_xml::Error) -> (usize, String) {
    let quick_xml::Error::Escape(escape) = error else {
        return (0, error.to_string());
    };
    let amp = match escape {
        EscapeError::UnrecognizedEntity(range, _) => range.start.saturating_sub(1),
        EscapeError::UnterminatedEntity(range) => range.start,
        EscapeError::InvalidCharRef(e) => {
            return (0, format!("Invalid character reference: {e}."));
        }
    };
    let rest = raw.get(amp + 1..).unwrap_or_default();
    let name_len = rest
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b >= 0x80 || b"_:-.".contains(&b))
        .count();
    let name = String::from_utf8_lossy(&rest[..name_len]);
    let message = if name.is_empty() {
        "The entity name must immediately follow the '&' in the entity reference.".to_string()
    } else if rest.get(name_len) != Some(&b';') {
        format!("The reference to entity \"{name}\" must end with the ';' delimiter.")
    } else {
        format!("The entity \"{name}\" was referenced, but not declared.")
    };
    (amp, message)
}

fn line_at(bytes: &[u8], offset: u64) -> i64 {
    let end = usize::try_from(offset).unwrap_or(usize::MAX).min(bytes.len());
    1 + bytes[..end].iter().filter(|&&b| b == b'\n').count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(xml: &str) -> Result<RootElement, WellFormednessError> {
        scan_document(xml.as_bytes())
    }

    #[test]
    fn collects_no_namespace_hint() {
        let root = scan(
            r#"<?xml version="1.0"?>
<note xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
      xsi:noNamespaceSchemaLocation="note.xsd">
  <to>Tove</to>
</note>"#,
        )
        .expect("well-formed");
        assert_eq!(root.name, "note");
        assert_eq!(root.line, 2);
        assert_eq!(
            root.hints,
            vec![SchemaHint {
                namespace: None,
                location: "note.xsd".into()
            }]
        );
        assert_eq!(root.unpaired_location, None);
    }

    #[test]
    fn collects_namespace_pairs() {
        let root = scan(
            r#"<po:order xmlns:po="urn:po" xmlns:x="http://www.w3.org/2001/XMLSchema-instance"
   x:schemaLocation="urn:po po.xsd   urn:addr
   addr.xsd"/>"#,
        )
        .expect("well-formed");
        assert_eq!(root.name, "po:order");
        assert_eq!(root.hints.len(), 2);
        assert_eq!(root.hints[1].namespace.as_deref(), Some("urn:addr"));
        assert_eq!(root.hints[1].location, "addr.xsd");
    }

    #[test]
    fn odd_schema_location_is_flagged() {
        let root = scan(
            r#"<a xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:a a.xsd urn:b"/>"#,
        )
        .expect("well-formed");
        assert_eq!(root.hints.len(), 1);
        assert!(root.unpaired_location.is_some());
    }

    #[test]
    fn attribute_outside_xsi_namespace_is_ignored() {
        let root = scan(r#"<a schemaLocation="x.xsd"/>"#).expect("well-formed");
        assert!(root.hints.is_empty());
    }

    #[test]
    fn unclosed_element_is_fatal() {
        let err = scan("<a>\n  <b>text</b>\n").expect_err("unclosed");
        assert_eq!(
            err.message,
            "XML document structures must start and end within the same entity."
        );
        assert_eq!(err.line, 3);
    }

    #[test]
    fn mismatched_end_tag_is_fatal() {
        let err = scan("<a>\n<b>\n</a>").expect_err("mismatch");
        assert!(err.line >= 2);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn second_root_is_fatal() {
        let err = scan("<a/>\n<b/>").expect_err("two roots");
        assert_eq!(
            err.message,
            "The markup in the document following the root element must be well-formed."
        );
        assert_eq!(err.line, 2);
    }

    #[test]
    fn text_around_root_is_fatal() {
        let err = scan("hello<a/>").expect_err("prolog text");
        assert_eq!(err.message, "Content is not allowed in prolog.");
        let err = scan("<a/>trailing").expect_err("trailing text");
        assert_eq!(err.message, "Content is not allowed in trailing section.");
    }

    #[test]
    fn empty_document_is_fatal() {
        let err = scan("<?xml version=\"1.0\"?>\n").expect_err("no root");
        assert_eq!(err.message, "Premature end of file.");
    }

    #[test]
    fn unbound_prefix_is_fatal() {
        let err = scan("<a>\n<x:b/></a>").expect_err("unbound");
        assert_eq!(err.message, "The prefix \"x\" for element \"x:b\" is not bound.");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn bare_ampersand_is_fatal() {
        let err = scan("<a>\n<b>Tom & Jerry</b></a>").expect_err("bare &");
        assert_eq!(
            err.message,
            "The entity name must immediately follow the '&' in the entity reference."
        );
        assert_eq!(err.line, 2);
    }

    #[test]
    fn undeclared_entity_is_fatal() {
        let err = scan("<a>fish &nope; chips</a>").expect_err("undeclared");
        assert_eq!(err.message, "The entity \"nope\" was referenced, but not declared.");

        let err = scan("<a>&amp done</a>").expect_err("unterminated");
        assert_eq!(
            err.message,
            "The reference to entity \"amp\" must end with the ';' delimiter."
        );
    }

    #[test]
    fn bad_reference_in_attribute_is_fatal() {
        let err = scan(r#"<a title="R&D"/>"#).expect_err("attribute");
        assert_eq!(
            err.message,
            "The reference to entity \"D\" must end with the ';' delimiter."
        );
    }

    #[test]
    fn predefined_and_character_references_are_accepted() {
        assert!(scan(r#"<a t="&quot;x&quot;">&lt;&amp;&gt; &#65;&#x42;</a>"#).is_ok());
    }

    #[test]
    fn dtd_entities_are_left_to_libxml2() {
        let xml = "<!DOCTYPE a [<!ENTITY who \"world\">]>\n<a>hello &who;</a>";
        assert!(scan(xml).is_ok());
        assert!(matches!(parse_strict(xml.as_bytes()), Ok(Ok(_))));
    }

    #[test]
    fn strict_parse_rejects_what_recovery_would_repair() {
        let fatal = match parse_strict(b"<a>\n<b c=\"x<y\"/></a>") {
            Ok(Err(fatal)) => fatal,
            other => panic!("expected a well-formedness error, got {:?}", other.map(|r| r.err())),
        };
        assert!(!fatal.message.is_empty());
        assert_eq!(fatal.line, 2);
    }

    #[test]
    fn byte_order_mark_is_accepted() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<a/>");
        assert!(scan_document(&bytes).is_ok());
    }

    #[test]
    fn wrapper_schema_imports_and_includes() {
        let dir = std::env::temp_dir();
        let xsd = wrapper_schema(&[
            (Some("urn:a&b".into()), dir.join("a.xsd")),
            (None, dir.join("plain.xsd")),
        ]);
        assert!(xsd.starts_with("<xs:schema"));
        assert!(xsd.contains("<xs:import namespace=\"urn:a&amp;b\" schemaLocation=\"file://"));
        assert!(xsd.contains("<xs:include schemaLocation=\"file://"));
        assert!(xsd.ends_with("</xs:schema>"));
    }

    #[test]
    fn line_numbers_count_newlines() {
        assert_eq!(line_at(b"abc", 0), 1);
        assert_eq!(line_at(b"a\nb\nc", 4), 3);
        assert_eq!(line_at(b"a\n", 99), 2);
    }
}
