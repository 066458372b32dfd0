//! Synchronous client for the external spreadsheet-analysis service.
//!
//! One endpoint matters: `POST {base_url}/analyze`, a multipart upload
//! of a single `.xlsx`/`.xls` file. The response is the full
//! [`AnalysisResult`] payload; error responses carry a human-readable
//! `detail` string which is surfaced verbatim. There are no retries:
//! every failure is terminal for the current attempt and needs a new
//! user-initiated upload.
//!
//! Typical usage:
//! ```no_run
//! # use sheetviz::Client;
//! let client = Client::default();
//! let result = client.analyze("sales.xlsx")?;
//! println!("{} charts", result.charts.len());
//! # Ok::<(), sheetviz::AnalyzeError>(())
//! ```

use crate::models::AnalysisResult;
use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::blocking::multipart::Form;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Hosted analysis service used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://excel-analyzer-api.onrender.com";

/// Soft upload limit; larger files are sent anyway but logged.
const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const GENERIC_FAILURE: &str = "The analysis service could not process the file. Please try again.";

/// Upload failure. `Display` on every variant is suitable for direct
/// user presentation.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("unsupported file type '{0}': expected .xlsx or .xls")]
    UnsupportedExtension(String),
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Non-2xx response; `detail` is the service's own message when it
    /// sent one, else a generic fallback.
    #[error("{detail}")]
    Service { status: u16, detail: String },
    #[error("could not reach the analysis service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unreadable analysis response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("sheetviz/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: DEFAULT_ENDPOINT.into(),
            http,
        }
    }
}

impl Client {
    /// Client against a non-default endpoint (self-hosted service,
    /// staging, a local mock in tests).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Upload one spreadsheet and return the parsed analysis payload.
    ///
    /// The extension is validated before any I/O; files past the 10 MB
    /// soft limit are sent anyway with a warning. One request, no
    /// retries.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult, AnalyzeError> {
        let path = path.as_ref();

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if ext != "xlsx" && ext != "xls" {
            return Err(AnalyzeError::UnsupportedExtension(path.display().to_string()));
        }

        let meta = std::fs::metadata(path).map_err(|source| AnalyzeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if meta.len() > MAX_UPLOAD_BYTES {
            warn!(
                "'{}' is {} bytes, past the {} byte soft limit; the service may reject it",
                path.display(),
                meta.len(),
                MAX_UPLOAD_BYTES
            );
        }

        let form = Form::new()
            .file("file", path)
            .map_err(|source| AnalyzeError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let url = format!("{}/analyze", self.base_url);
        debug!("POST {url} ({} bytes)", meta.len());
        let resp = self.http.post(&url).multipart(form).send()?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<Value>()
                .ok()
                .and_then(|v| {
                    v.get("detail")
                        .and_then(Value::as_str)
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(AnalyzeError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        let body = resp.text()?;
        serde_json::from_str(&body).map_err(AnalyzeError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_extensions_before_io() {
        let client = Client::default();
        let err = client.analyze("notes.txt").unwrap_err();
        assert!(matches!(err, AnalyzeError::UnsupportedExtension(_)));
        let err = client.analyze("no_extension").unwrap_err();
        assert!(matches!(err, AnalyzeError::UnsupportedExtension(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let client = Client::default();
        let err = client.analyze("does_not_exist.xlsx").unwrap_err();
        assert!(matches!(err, AnalyzeError::Io { .. }));
    }
}
