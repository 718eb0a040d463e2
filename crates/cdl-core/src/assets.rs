//! One-shot asset retrievals: thumbnail image and exercise archive.
//!
//! Streamed HTTP GET via libcurl, written to disk verbatim. Asset failures
//! are never fatal; they surface as `TaskOutcome::Failed` and the course
//! pipeline continues. Blocking transfers run on the blocking pool.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::course::CourseDescriptor;
use crate::credential::Credential;
use crate::error::DownloadError;
use crate::layout::DownloadTarget;
use crate::outcome::TaskOutcome;

fn transport(url: &str, reason: impl ToString) -> DownloadError {
    DownloadError::Transport {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

fn new_easy(url: &str, cookie_file: Option<&Path>) -> Result<curl::easy::Easy, DownloadError> {
    // Reject junk locators before handing them to libcurl.
    url::Url::parse(url).map_err(|e| transport(url, e))?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(|e| transport(url, e))?;
    easy.follow_location(true).map_err(|e| transport(url, e))?;
    easy.max_redirections(10).map_err(|e| transport(url, e))?;
    easy.connect_timeout(Duration::from_secs(30))
        .map_err(|e| transport(url, e))?;
    easy.timeout(Duration::from_secs(3600))
        .map_err(|e| transport(url, e))?;
    if let Some(jar) = cookie_file {
        easy.cookie_file(jar).map_err(|e| transport(url, e))?;
    }
    Ok(easy)
}

/// Streams `url` to `dest`, returning the byte count. Non-200 responses
/// remove the partial file and fail with `Transport`.
fn blocking_fetch_to_file(
    url: &str,
    dest: &Path,
    cookie_file: Option<&Path>,
) -> Result<u64, DownloadError> {
    let mut easy = new_easy(url, cookie_file)?;

    let file = fs::File::create(dest).map_err(|e| DownloadError::fs(dest, e))?;
    let mut writer = BufWriter::new(file);
    let mut written: u64 = 0;
    let mut write_err: Option<std::io::Error> = None;

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match writer.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(|e| transport(url, e))?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        let _ = fs::remove_file(dest);
        return Err(DownloadError::fs(dest, e));
    }
    if let Err(e) = perform_result {
        let _ = fs::remove_file(dest);
        return Err(transport(url, e));
    }
    writer
        .flush()
        .map_err(|e| DownloadError::fs(dest, e))?;

    let code = easy.response_code().map_err(|e| transport(url, e))?;
    if code != 200 {
        let _ = fs::remove_file(dest);
        return Err(transport(url, format!("HTTP {}", code)));
    }
    Ok(written)
}

/// Follows the redirect chain of an authenticated GET and returns the
/// final URL. Used to turn the exercise-archive redirect stub into a
/// directly downloadable URL.
fn blocking_effective_url(url: &str, cookie_file: &Path) -> Result<String, DownloadError> {
    let mut easy = new_easy(url, Some(cookie_file))?;
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| Ok(data.len()))
            .map_err(|e| transport(url, e))?;
        transfer.perform().map_err(|e| transport(url, e))?;
    }
    let code = easy.response_code().map_err(|e| transport(url, e))?;
    if code != 200 {
        return Err(transport(url, format!("HTTP {}", code)));
    }
    match easy.effective_url().map_err(|e| transport(url, e))? {
        Some(real) => Ok(real.to_string()),
        None => Err(transport(url, "no effective URL after redirects")),
    }
}

/// Fetches one asset to `target`, honoring the idempotency guard.
/// All errors are folded into `TaskOutcome::Failed`; asset trouble never
/// aborts the course.
pub async fn fetch_asset(
    url: &str,
    target: &DownloadTarget,
    credential: Option<&Credential>,
) -> TaskOutcome {
    if target.exists() {
        tracing::info!(artifact = target.filename(), "already exists, skipping");
        return TaskOutcome::Skipped;
    }
    let url = url.to_string();
    let dest = target.path();
    let jar: Option<PathBuf> = credential.map(|c| c.cookie_file().to_path_buf());

    let fetched = tokio::task::spawn_blocking(move || {
        blocking_fetch_to_file(&url, &dest, jar.as_deref())
    })
    .await;

    match fetched {
        Ok(Ok(bytes)) => {
            tracing::info!(artifact = target.filename(), bytes, "asset downloaded");
            TaskOutcome::Downloaded
        }
        Ok(Err(e)) => {
            tracing::warn!(artifact = target.filename(), error = %e, "asset fetch failed");
            TaskOutcome::Failed(e.to_string())
        }
        Err(join_err) => TaskOutcome::Failed(format!("fetch task join: {join_err}")),
    }
}

/// Resolves the exercise redirect stub with the session cookie jar.
pub async fn resolve_redirect(
    url: &str,
    credential: &Credential,
) -> Result<String, DownloadError> {
    let url = url.to_string();
    let jar = credential.cookie_file().to_path_buf();
    tokio::task::spawn_blocking(move || blocking_effective_url(&url, &jar))
        .await
        .map_err(|e| DownloadError::Transport {
            url: String::new(),
            reason: format!("resolve task join: {e}"),
        })?
}

/// Downloads `<title>.jpg` into the course root. Returns None when the
/// descriptor carries no thumbnail URL.
pub async fn fetch_thumbnail(
    descriptor: &CourseDescriptor,
    course_root: &Path,
) -> Option<(String, TaskOutcome)> {
    let url = descriptor.thumbnail_url.as_deref()?;
    let target = DownloadTarget::new(course_root, format!("{}.jpg", descriptor.title));
    let outcome = fetch_asset(url, &target, None).await;
    Some((target.filename().to_string(), outcome))
}

/// Downloads `<title>-exercise.zip` into the course root, first resolving
/// the redirect stub with an authenticated GET. Returns None when the
/// course has no exercise archive.
pub async fn fetch_exercise(
    descriptor: &CourseDescriptor,
    course_root: &Path,
    credential: &Credential,
) -> Option<(String, TaskOutcome)> {
    let stub = descriptor.exercise_url.as_deref()?;
    let target = DownloadTarget::new(course_root, format!("{}-exercise.zip", descriptor.title));
    if target.exists() {
        tracing::info!(artifact = target.filename(), "already exists, skipping");
        return Some((target.filename().to_string(), TaskOutcome::Skipped));
    }
    let real_url = match resolve_redirect(stub, credential).await {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(error = %e, "could not resolve exercise file url");
            return Some((target.filename().to_string(), TaskOutcome::Failed(e.to_string())));
        }
    };
    let outcome = fetch_asset(&real_url, &target, Some(credential)).await;
    Some((target.filename().to_string(), outcome))
}
