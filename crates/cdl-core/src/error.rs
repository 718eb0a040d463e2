//! Error taxonomy for the download pipeline.
//!
//! Each variant maps to one failure class with a distinct blast radius:
//! filesystem and retrieval-tool errors abort the enclosing course,
//! transport errors are recorded and recovered locally, and a missing
//! credential aborts the whole run before any course starts.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Directory or file creation failed. Fatal for the course pipeline.
    #[error("filesystem error at {}: {}", .path.display(), .source)]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP failure on an asset fetch. Non-fatal; recorded as a failed outcome.
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The external retrieval tool wrote to stderr or produced no output.
    /// Fatal for the enclosing course; sibling courses are unaffected.
    #[error("retrieval tool failed on \"{artifact}\": {detail}")]
    RetrievalTool { artifact: String, detail: String },

    /// No cookie jar available. Fatal for the whole run.
    #[error("cookie file not found at {}", .0.display())]
    CredentialMissing(PathBuf),
}

impl DownloadError {
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_shows_path() {
        let err = DownloadError::fs(
            "/tmp/course",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/course"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }

    #[test]
    fn retrieval_tool_error_names_artifact() {
        let err = DownloadError::RetrievalTool {
            artifact: "01 - Welcome".to_string(),
            detail: "ERROR: unable to extract".to_string(),
        };
        assert!(err.to_string().contains("01 - Welcome"));
    }
}
