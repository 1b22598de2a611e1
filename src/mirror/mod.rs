//! Remote mirror for the table files.
//!
//! Each table file can be replicated to a fixed path in a remote
//! version-controlled content repository. The remote issues an opaque
//! concurrency token (its "sha") with every read and expects it back on
//! the next write, so a stale write is rejected instead of silently
//! clobbering someone else's update.
//!
//! # Submodules
//!
//! - `client` - HTTP client speaking the content API
//! - `sync` - pull/push of one local table against one remote path

pub mod client;
pub mod sync;

pub use client::RemoteClient;
pub use sync::RemoteMirror;

/// Default content API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default remote branch.
pub const DEFAULT_BRANCH: &str = "main";

/// Custom error type for mirror operations.
///
/// A rejected optimistic write gets its own variant so callers can tell
/// "someone else wrote first" apart from "the network broke".
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote returned an error response other than not-found.
    #[error("remote error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The remote rejected a stale concurrency token.
    #[error("remote rejected stale concurrency token; re-pull and retry")]
    Conflict,

    /// The content payload was not valid base64.
    #[error("invalid content payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded content was not valid UTF-8.
    #[error("remote content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Local file I/O failed during a pull or push.
    #[error("local table I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// True when the failure was a lost-update race rather than transport.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SyncError::Conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_display_server() {
        let err = SyncError::Server {
            status: 500,
            message: "Internal error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal error"));
    }

    #[test]
    fn test_conflict_is_distinguishable() {
        assert!(SyncError::Conflict.is_conflict());
        let server = SyncError::Server {
            status: 500,
            message: String::new(),
        };
        assert!(!server.is_conflict());
    }
}
