#![forbid(unsafe_code)]

//! Blocking HTTP client for the chord-catalog service.
//!
//! Every endpoint wraps its payload in an [`ApiResponse`] envelope; this
//! crate unwraps the envelope and turns non-success responses into
//! [`CatalogError::Api`] carrying the server's error text. The catalog is a
//! boundary collaborator: the parsing and layout core never touches it.

use std::time::Duration;

use fg_core::{ApiResponse, Chord, ChordQuality, HealthStatus};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog error: {0}")]
    Api(String),
}

/// Client for one catalog service instance.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl CatalogClient {
    /// Build a client for the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { base_url, http })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub fn health(&self) -> Result<HealthStatus, CatalogError> {
        self.get("/health")
    }

    /// `GET /chords/qualities`
    pub fn qualities(&self) -> Result<Vec<ChordQuality>, CatalogError> {
        self.get("/chords/qualities")
    }

    /// `GET /chords/{root}` — every chord catalogued for a root note.
    pub fn chords_by_root(&self, root: &str) -> Result<Vec<Chord>, CatalogError> {
        self.get(&format!("/chords/{}", encode_segment(root)))
    }

    /// `GET /chords/{root}/{quality}` — one chord by root and quality.
    pub fn chord(&self, root: &str, quality: &str) -> Result<Chord, CatalogError> {
        self.get(&format!(
            "/chords/{}/{}",
            encode_segment(root),
            encode_segment(quality)
        ))
    }

    fn get<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Catalog request: GET {url}");
        let envelope: ApiResponse<T> = self.http.get(&url).send()?.json()?;
        unwrap_envelope(envelope)
    }
}

/// Unwrap a catalog envelope: success with data yields the value; anything
/// else surfaces the server's error text (or a generic message).
pub fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, CatalogError> {
    match envelope {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiResponse {
            error: Some(error), ..
        } => Err(CatalogError::Api(error)),
        _ => Err(CatalogError::Api(
            "catalog response carried no data".to_string(),
        )),
    }
}

/// Percent-encode a path segment. Root notes like `A#` would otherwise
/// truncate the request at the fragment marker.
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_data_unwraps() {
        let envelope: ApiResponse<Vec<ChordQuality>> = serde_json::from_str(
            r#"{"success":true,"data":[{"name":"major","displayName":"Major"}]}"#,
        )
        .expect("deserialize envelope");
        let qualities = unwrap_envelope(envelope).expect("unwrap envelope");
        assert_eq!(qualities.len(), 1);
        assert_eq!(qualities[0].display_name, "Major");
    }

    #[test]
    fn envelope_error_text_is_surfaced() {
        let envelope: ApiResponse<Chord> =
            serde_json::from_str(r#"{"success":false,"error":"no chords for key H"}"#)
                .expect("deserialize envelope");
        let err = unwrap_envelope(envelope).expect_err("should fail");
        assert_eq!(err.to_string(), "catalog error: no chords for key H");
    }

    #[test]
    fn success_without_data_is_still_an_error() {
        let envelope: ApiResponse<Chord> =
            serde_json::from_str(r#"{"success":true}"#).expect("deserialize envelope");
        let err = unwrap_envelope(envelope).expect_err("should fail");
        assert!(err.to_string().contains("no data"));
    }

    #[test]
    fn chord_payload_round_trips() {
        let json = r#"{
            "key": "C",
            "quality": "major",
            "representation": "C",
            "variations": [
                {"name": "C Major (open)", "diagram": "Ex,a3,d2,g0,b1,e0", "difficultyLevel": 1}
            ]
        }"#;
        let chord: Chord = serde_json::from_str(json).expect("deserialize chord");
        assert_eq!(chord.variations.len(), 1);
        assert_eq!(chord.variations[0].difficulty_level, Some(1));
        assert_eq!(chord.variations[0].diagram, "Ex,a3,d2,g0,b1,e0");
    }

    #[test]
    fn sharp_roots_are_percent_encoded() {
        assert_eq!(encode_segment("A#"), "A%23");
        assert_eq!(encode_segment("suspended2"), "suspended2");
        assert_eq!(encode_segment("f sharp"), "f%20sharp");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = CatalogClient::new("http://localhost:8080/").expect("build client");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
