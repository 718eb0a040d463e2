//! On-disk course layout: directory tree, resolved targets, info file.
//!
//! `build_layout` is idempotent; existing directories are left untouched
//! and file existence is the only idempotency signal the pipeline uses.

use std::fs;
use std::path::{Path, PathBuf};

use crate::course::CourseDescriptor;
use crate::error::DownloadError;

/// A resolved (directory, filename) pair for one artifact. Ephemeral;
/// computed on demand from the descriptor.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    dir: PathBuf,
    filename: String,
}

impl DownloadTarget {
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The idempotency guard: a target whose file exists is never fetched.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }
}

/// Creates the course root directory and one subdirectory per chapter.
/// Pre-existing directories are not an error. Returns the course root.
pub fn build_layout(
    descriptor: &CourseDescriptor,
    download_root: &Path,
) -> Result<PathBuf, DownloadError> {
    let course_root = download_root.join(&descriptor.title);
    fs::create_dir_all(&course_root).map_err(|e| DownloadError::fs(&course_root, e))?;
    tracing::debug!(course = %descriptor.title, root = %course_root.display(), "course root ready");

    for chapter in &descriptor.chapters {
        let chapter_dir = course_root.join(&chapter.name);
        fs::create_dir_all(&chapter_dir).map_err(|e| DownloadError::fs(&chapter_dir, e))?;
    }

    Ok(course_root)
}

/// Writes `<root>/<title>.txt`: the human-readable metadata summary plus
/// the chapter/lecture table of contents in descriptor order.
pub fn write_info_file(
    descriptor: &CourseDescriptor,
    course_root: &Path,
) -> Result<PathBuf, DownloadError> {
    let path = course_root.join(format!("{}.txt", descriptor.title));
    let text = render_info(descriptor);
    fs::write(&path, text).map_err(|e| DownloadError::fs(&path, e))?;
    Ok(path)
}

fn render_info(descriptor: &CourseDescriptor) -> String {
    let meta = &descriptor.meta;
    let mut text = String::new();
    text.push_str(&format!("Title: {}\n\n", descriptor.title));
    text.push_str(&format!("Course Url: {}\n\n", descriptor.url));
    text.push_str(&format!("Author: {}\n\n", meta.author));
    text.push_str(&format!("Released Date: {}\n\n", meta.released_at));
    text.push_str(&format!("Duration: {}\n\n", meta.duration));
    text.push_str(&format!("Views: {}\n\n", meta.views));
    text.push_str(&format!("Skill Level: {}\n\n", meta.level));
    text.push_str(&format!("Category: {}\n\n", meta.category));
    text.push_str(&format!("Subject Tags: {}\n\n", meta.subject_tags.join(", ")));
    text.push_str(&format!("Software Tags: {}\n\n", meta.software_tags.join(", ")));
    text.push_str(&format!("Description: \n{}\n\n", meta.description));

    text.push_str("Course Content: \n");
    for chapter in &descriptor.chapters {
        text.push_str(&chapter.name);
        text.push('\n');
        for lecture in &chapter.lectures {
            text.push_str("  ");
            text.push_str(&lecture.name);
            text.push('\n');
        }
    }
    text.push_str(&format!(
        "\nDownloaded at: {}\n",
        chrono::Local::now().format("%b %d, %Y")
    ));
    text
}
