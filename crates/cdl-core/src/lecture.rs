//! Lecture retrieval task: guard, invoke, interpret.
//!
//! Interpretation policy (deliberately strict, mirroring the upstream
//! tool contract): anything on stderr means the tool is broken for this
//! session and will fail every following lecture, so it aborts the
//! enclosing course; the same goes for a silent exit with no output.

use std::path::Path;

use crate::course::LectureRef;
use crate::credential::Credential;
use crate::error::DownloadError;
use crate::outcome::TaskOutcome;
use crate::retriever::{LectureDest, Retriever, ToolOutput};

/// Retrieves one lecture (video + subtitle) into `chapter_dir`.
///
/// Returns `Ok(Skipped)` without launching the tool when the expected
/// video file already exists. Fatal tool failures come back as
/// `Err(RetrievalTool)` so the scheduler can abort the course.
pub async fn retrieve_lecture(
    retriever: &dyn Retriever,
    lecture: &LectureRef,
    chapter_dir: &Path,
    credential: &Credential,
) -> Result<TaskOutcome, DownloadError> {
    let dest = LectureDest {
        dir: chapter_dir.to_path_buf(),
        stem: lecture.name.clone(),
    };
    if dest.video_path().is_file() {
        tracing::info!(lecture = %lecture.name, "already exists, skipping");
        return Ok(TaskOutcome::Skipped);
    }

    let output = retriever
        .retrieve(&lecture.url, &dest, credential)
        .await
        .map_err(|e| DownloadError::RetrievalTool {
            artifact: lecture.name.clone(),
            detail: format!("{e:#}"),
        })?;

    interpret_output(&lecture.name, &output)
}

/// Maps captured tool output to an outcome per the fail-fast policy:
/// anything on stderr is fatal, otherwise anything on stdout is success,
/// a fully silent exit is fatal. Raw emptiness decides; the tool's own
/// whitespace (progress-bar redraws, trailing newlines) still counts as
/// output.
pub fn interpret_output(name: &str, output: &ToolOutput) -> Result<TaskOutcome, DownloadError> {
    if !output.stderr.is_empty() {
        return Err(DownloadError::RetrievalTool {
            artifact: name.to_string(),
            detail: output.stderr.trim().to_string(),
        });
    }
    if !output.stdout.is_empty() {
        tracing::info!(lecture = name, "downloaded");
        return Ok(TaskOutcome::Downloaded);
    }
    Err(DownloadError::RetrievalTool {
        artifact: name.to_string(),
        detail: "tool produced no output".to_string(),
    })
}
