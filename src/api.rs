// API client module: a small blocking HTTP client that posts JSON
// payloads to the image-processing backend and hands back the binary
// body it returns (a zip archive or an image).

use crate::error::SubmitError;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

/// Status the backend uses when no face was found in the upload.
pub const NO_FACES_STATUS: u16 = 421;

/// Anything that can take a JSON body for a route and return the blob
/// produced by the backend. The controller only talks to this trait so
/// it can be driven without a network in tests.
pub trait Backend {
    fn post_json(&self, route: &str, body: String) -> Result<Vec<u8>, SubmitError>;
}

/// Holds a reqwest blocking client and the base URL of the backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`. A trailing slash is dropped so
    /// routes can be appended as-is.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Backend for ApiClient {
    /// POST `body` to `route`. Only a 200 counts as success; 421 means
    /// no faces were found; every other status is a generic failure.
    fn post_json(&self, route: &str, body: String) -> Result<Vec<u8>, SubmitError> {
        let url = format!("{}{}", self.base_url, route);
        debug!(%url, bytes = body.len(), "sending request");

        let res = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()?;

        let status = res.status();
        debug!(%url, status = status.as_u16(), "response received");
        if status.as_u16() == NO_FACES_STATUS {
            warn!(%url, "backend found no faces");
            return Err(SubmitError::NoFaces);
        }
        if status != StatusCode::OK {
            let txt = res.text().unwrap_or_default();
            warn!(%url, status = status.as_u16(), body = %txt, "request failed");
            return Err(SubmitError::Http(status.as_u16()));
        }
        Ok(res.bytes()?.to_vec())
    }
}
