//! HTTP client for the remote content API.
//!
//! The API stores files at fixed paths in a version-controlled repository:
//! `GET .../contents/{path}?ref={branch}` returns the file as a base64
//! payload plus its concurrency token ("sha"), and
//! `PUT .../contents/{path}` writes a new revision, rejecting the write
//! when the supplied token is stale.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::MirrorConfig;

use super::SyncError;

/// Client for one remote repository.
pub struct RemoteClient {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

impl RemoteClient {
    /// Creates a client from mirror configuration.
    pub fn new(config: &MirrorConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        }
    }

    /// Fetches a remote file. Returns `Ok(None)` when the remote reports
    /// not-found, which callers treat as "no data yet".
    pub fn fetch(&self, path: &str) -> Result<Option<RemoteBlob>, SyncError> {
        let url = self.contents_url(path);
        let response = self
            .client
            .get(&url)
            .query(&[("ref", self.branch.as_str())])
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(server_error(response));
        }

        let blob: RemoteBlob = response.json()?;
        Ok(Some(blob))
    }

    /// Writes a remote file revision.
    ///
    /// `sha` must be the token from the latest fetch when the file already
    /// exists, and `None` to create it. A stale token maps to
    /// [`SyncError::Conflict`].
    pub fn upload(
        &self,
        path: &str,
        content_base64: &str,
        sha: Option<&str>,
        message: &str,
    ) -> Result<(), SyncError> {
        let url = self.contents_url(path);
        let payload = UploadRequest {
            message,
            content: content_base64,
            branch: &self.branch,
            sha,
        };

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .json(&payload)
            .send()?;

        match response.status() {
            s if s.is_success() => Ok(()),
            // The API signals a stale sha as 409; some deployments use 422.
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Err(SyncError::Conflict),
            _ => Err(server_error(response)),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, self.owner, self.repo, path
        )
    }
}

const USER_AGENT: &str = concat!("habit-cli/", env!("CARGO_PKG_VERSION"));

fn server_error(response: reqwest::blocking::Response) -> SyncError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    SyncError::Server { status, message }
}

/// Decodes the transport encoding of a content payload.
///
/// The API wraps base64 at fixed line width, so whitespace is stripped
/// before decoding.
pub fn decode_content(content: &str) -> Result<String, SyncError> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encodes local table content for upload.
pub fn encode_content(content: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    STANDARD.encode(content)
}

// ==================== API Types ====================

/// A remote file: its base64 payload and concurrency token.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteBlob {
    /// Base64-encoded file content, possibly line-wrapped.
    pub content: String,

    /// Opaque concurrency token issued by the remote.
    pub sha: String,
}

/// Request payload for writing a file revision.
#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}
