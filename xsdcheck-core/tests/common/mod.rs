use std::path::{Path, PathBuf};

use xsdcheck_core::config::Config;
use xsdcheck_core::resolve::Resolver;
use xsdcheck_core::session::ValidationSession;
use xsdcheck_core::validation::SchemaValidator;

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[allow(dead_code)]
pub fn fixture_str(name: &str) -> String {
    fixture(name)
        .to_str()
        .expect("fixture path is UTF-8")
        .to_string()
}

#[allow(dead_code)]
pub fn validator() -> SchemaValidator {
    SchemaValidator::new(Resolver::new(&Config::default()).expect("resolver"))
}

#[allow(dead_code)]
pub fn session() -> ValidationSession {
    ValidationSession::new(Config::default()).expect("session")
}

/// Serve fixtures over plain HTTP on an ephemeral local port.
///
/// `GET /<name>` answers with fixture `<name>`, or 404 when it does not exist.
/// Each response closes its connection. Returns the base URL, ending in `/`.
#[allow(dead_code)]
pub fn serve_fixtures() -> String {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // drain headers
            let mut header = String::new();
            while reader.read_line(&mut header).map(|n| n > 2).unwrap_or(false) {
                header.clear();
            }

            let name = request_line
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .trim_start_matches('/');
            let (status, body) = match std::fs::read(fixture(name)) {
                Ok(body) if !name.is_empty() => ("200 OK", body),
                _ => ("404 Not Found", b"not found".to_vec()),
            };
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        }
    });
    format!("http://127.0.0.1:{port}/")
}

/// Files in the temp dir whose name starts with `prefix`.
#[allow(dead_code)]
pub fn temp_files(prefix: &str) -> Vec<PathBuf> {
    std::fs::read_dir(std::env::temp_dir())
        .expect("temp dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .map(|entry| entry.path())
        .collect()
}
