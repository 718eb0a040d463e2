//! Authenticated-session handle: a Netscape-format cookie jar on disk.
//!
//! Produced by the external login helper; consumed read-only for the whole
//! run. libcurl reads the jar natively (`Easy::cookie_file`) and the
//! retrieval tool takes its path via `--cookies`.

use std::path::{Path, PathBuf};

use crate::error::DownloadError;

/// Opaque credential handle shared by all fetches in a run.
#[derive(Debug, Clone)]
pub struct Credential {
    cookie_file: PathBuf,
}

impl Credential {
    /// Wraps an existing cookie jar. Fails with `CredentialMissing` if the
    /// file is not there, so the run aborts before any course starts.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        let cookie_file = path.into();
        if !cookie_file.is_file() {
            return Err(DownloadError::CredentialMissing(cookie_file));
        }
        Ok(Self { cookie_file })
    }

    pub fn cookie_file(&self) -> &Path {
        &self.cookie_file
    }
}
