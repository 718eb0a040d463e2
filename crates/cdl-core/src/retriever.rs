//! External retrieval tool seam.
//!
//! The core never fetches lecture video itself; it invokes a retrieval
//! tool and interprets the captured output. The tool is behind the
//! `Retriever` trait so the real subprocess and a deterministic test stub
//! satisfy the same contract.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;

use crate::credential::Credential;

/// Captured stdout/stderr of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Where the tool should place one lecture's files. The extension is
/// chosen by the tool, so the tool gets a template while the idempotency
/// guard checks the concrete video filename.
#[derive(Debug, Clone)]
pub struct LectureDest {
    pub dir: PathBuf,
    pub stem: String,
}

impl LectureDest {
    /// Expected video path; its existence makes the whole retrieval a no-op.
    pub fn video_path(&self) -> PathBuf {
        self.dir.join(format!("{}.mp4", self.stem))
    }

    /// Output-path template in the tool's own placeholder syntax.
    pub fn output_template(&self) -> String {
        format!("{}/{}.%(ext)s", self.dir.display(), self.stem)
    }
}

/// One-shot retrieval of a lecture (video + subtitle) to `dest`.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(
        &self,
        locator: &str,
        dest: &LectureDest,
        credential: &Credential,
    ) -> Result<ToolOutput>;
}

/// Runs `youtube-dl` (or a compatible tool) as a subprocess with the
/// session cookie jar, capturing both output streams in full.
pub struct YoutubeDlRetriever {
    program: String,
}

impl YoutubeDlRetriever {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Retriever for YoutubeDlRetriever {
    async fn retrieve(
        &self,
        locator: &str,
        dest: &LectureDest,
        credential: &Credential,
    ) -> Result<ToolOutput> {
        tracing::debug!(tool = %self.program, %locator, stem = %dest.stem, "invoking retrieval tool");
        let output = tokio::process::Command::new(&self.program)
            .arg("--output")
            .arg(dest.output_template())
            .arg("--write-sub")
            .arg("--cookies")
            .arg(credential.cookie_file())
            .arg(locator)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("spawn retrieval tool `{}`", self.program))?;

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
