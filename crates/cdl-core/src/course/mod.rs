//! Course descriptor model.
//!
//! The descriptor is produced once by the external scraping collaborator
//! and is immutable afterwards. Chapter and lecture names are sanitized on
//! construction so every name is safe to use as a path component.

mod sanitize;

pub use sanitize::{sanitize_chapter_name, sanitize_course_title, scrub_path_component};

use sha2::{Digest, Sha256};

/// One video (plus optional subtitle) unit. The name is filesystem-safe;
/// the URL is handed verbatim to the external retrieval tool.
#[derive(Debug, Clone)]
pub struct LectureRef {
    pub name: String,
    pub url: String,
}

impl LectureRef {
    pub fn new(name: &str, url: impl Into<String>) -> Self {
        Self {
            name: scrub_path_component(name),
            url: url.into(),
        }
    }
}

/// A named, ordered group of lectures. Names are unique within a course.
#[derive(Debug, Clone)]
pub struct Chapter {
    pub name: String,
    pub lectures: Vec<LectureRef>,
}

/// Course metadata written into the info file; display-only.
#[derive(Debug, Clone, Default)]
pub struct CourseMeta {
    pub author: String,
    pub released_at: String,
    pub duration: String,
    pub views: String,
    pub level: String,
    pub category: String,
    pub subject_tags: Vec<String>,
    pub software_tags: Vec<String>,
    pub description: String,
}

/// Structured, already-parsed representation of one course.
#[derive(Debug, Clone)]
pub struct CourseDescriptor {
    /// Sanitized title; doubles as the course root directory name.
    pub title: String,
    /// Stable hex id derived from the sanitized title.
    pub id: String,
    /// The course page URL this descriptor was extracted from.
    pub url: String,
    pub meta: CourseMeta,
    pub thumbnail_url: Option<String>,
    /// Redirect stub for the exercise archive, if the course has one.
    pub exercise_url: Option<String>,
    /// Ordered chapters; order determines display order only.
    pub chapters: Vec<Chapter>,
}

impl CourseDescriptor {
    /// Builds a descriptor from raw scraped values, sanitizing the title and
    /// all chapter names.
    pub fn new(
        raw_title: &str,
        url: impl Into<String>,
        meta: CourseMeta,
        thumbnail_url: Option<String>,
        exercise_url: Option<String>,
        chapters: Vec<(String, Vec<LectureRef>)>,
    ) -> Self {
        let title = sanitize_course_title(raw_title);
        let id = course_id(&title);
        let chapters = chapters
            .into_iter()
            .map(|(name, lectures)| Chapter {
                name: sanitize_chapter_name(&name),
                lectures,
            })
            .collect();
        Self {
            title,
            id,
            url: url.into(),
            meta,
            thumbnail_url,
            exercise_url,
            chapters,
        }
    }

    pub fn lecture_count(&self) -> usize {
        self.chapters.iter().map(|c| c.lectures.len()).sum()
    }
}

/// Stable id for a course: hex SHA-256 of the sanitized title.
pub fn course_id(title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    hex::encode(digest)
}
