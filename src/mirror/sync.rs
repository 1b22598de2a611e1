//! Pull/push of one local table file against one remote path.

use std::fs;
use std::path::Path;

use crate::store::table;

use super::client::{decode_content, encode_content, RemoteBlob, RemoteClient};
use super::SyncError;

/// Mirror of one table file.
///
/// Holds the remote path and the table's header row; the header is needed
/// to materialize an empty table when the remote file does not exist yet.
pub struct RemoteMirror {
    client: RemoteClient,
    remote_path: String,
    header: &'static str,
}

impl RemoteMirror {
    pub fn new(client: RemoteClient, remote_path: String, header: &'static str) -> Self {
        Self {
            client,
            remote_path,
            header,
        }
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// Downloads the remote table over the local file.
    ///
    /// An absent remote file yields a local empty-with-header table. The
    /// local file is only touched after the full payload has been decoded,
    /// so a transport or decode failure never leaves it half-written.
    pub fn pull(&self, local_path: &Path) -> Result<(), SyncError> {
        match self.client.fetch(&self.remote_path)? {
            Some(blob) => {
                let content = decode_content(&blob.content)?;
                table::write_atomic(local_path, &content)?;
                tracing::debug!(
                    "Pulled {} ({} bytes) to {}",
                    self.remote_path,
                    content.len(),
                    local_path.display()
                );
            }
            None => {
                table::write_atomic(local_path, &format!("{}\n", self.header))?;
                tracing::debug!(
                    "Remote {} absent; reset {} to empty table",
                    self.remote_path,
                    local_path.display()
                );
            }
        }
        Ok(())
    }

    /// Uploads the local table as a new remote revision.
    ///
    /// Fetches the current concurrency token first; the token is omitted
    /// when the remote file does not exist (create). A stale token surfaces
    /// as [`SyncError::Conflict`] — no automatic retry or merge.
    pub fn push(&self, local_path: &Path) -> Result<(), SyncError> {
        let content = if local_path.exists() {
            fs::read_to_string(local_path)?
        } else {
            format!("{}\n", self.header)
        };

        let sha = self
            .client
            .fetch(&self.remote_path)?
            .map(|RemoteBlob { sha, .. }| sha);

        let message = format!("Update {}", self.remote_path);
        self.client
            .upload(&self.remote_path, &encode_content(&content), sha.as_deref(), &message)?;
        tracing::debug!("Pushed {} to {}", local_path.display(), self.remote_path);
        Ok(())
    }
}
