//! Manifest-backed course provider.
//!
//! The scraper collaborator hands descriptors over as a TOML manifest
//! keyed by course URL; this provider deserializes them and resolves
//! site-relative asset links against the configured base URL.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

use cdl_core::course::{CourseDescriptor, CourseMeta, LectureRef};
use cdl_core::provider::CourseProvider;

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "course")]
    courses: Vec<ManifestCourse>,
}

#[derive(Debug, Deserialize)]
struct ManifestCourse {
    url: String,
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    released_at: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    views: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    subject_tags: Vec<String>,
    #[serde(default)]
    software_tags: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    exercise_url: Option<String>,
    #[serde(default, rename = "chapter")]
    chapters: Vec<ManifestChapter>,
}

#[derive(Debug, Deserialize)]
struct ManifestChapter {
    name: String,
    #[serde(default)]
    lectures: Vec<ManifestLecture>,
}

#[derive(Debug, Deserialize)]
struct ManifestLecture {
    name: String,
    url: String,
}

pub struct ManifestProvider {
    base_url: Url,
    courses: HashMap<String, ManifestCourse>,
}

impl ManifestProvider {
    pub fn load(path: &Path, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid base_url in config")?;
        let data = std::fs::read_to_string(path)?;
        let manifest: ManifestFile = toml::from_str(&data).context("parse manifest TOML")?;
        let courses = manifest
            .courses
            .into_iter()
            .map(|c| (c.url.clone(), c))
            .collect();
        Ok(Self { base_url, courses })
    }

    /// Site-relative hrefs (e.g. the exercise stub) are joined onto the
    /// base URL; absolute URLs pass through untouched.
    fn absolutize(&self, href: &str) -> Result<String> {
        if Url::parse(href).is_ok() {
            return Ok(href.to_string());
        }
        Ok(self
            .base_url
            .join(href)
            .with_context(|| format!("join {} onto base url", href))?
            .to_string())
    }

    fn to_descriptor(&self, course: &ManifestCourse) -> Result<CourseDescriptor> {
        let thumbnail_url = course
            .thumbnail_url
            .as_deref()
            .map(|u| self.absolutize(u))
            .transpose()?;
        let exercise_url = course
            .exercise_url
            .as_deref()
            .map(|u| self.absolutize(u))
            .transpose()?;
        let chapters = course
            .chapters
            .iter()
            .map(|ch| {
                let lectures = ch
                    .lectures
                    .iter()
                    .map(|l| Ok(LectureRef::new(&l.name, self.absolutize(&l.url)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok((ch.name.clone(), lectures))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CourseDescriptor::new(
            &course.title,
            &course.url,
            CourseMeta {
                author: course.author.clone(),
                released_at: course.released_at.clone(),
                duration: course.duration.clone(),
                views: course.views.clone(),
                level: course.level.clone(),
                category: course.category.clone(),
                subject_tags: course.subject_tags.clone(),
                software_tags: course.software_tags.clone(),
                description: course.description.clone(),
            },
            thumbnail_url,
            exercise_url,
            chapters,
        ))
    }
}

#[async_trait]
impl CourseProvider for ManifestProvider {
    async fn fetch_course(&self, url: &str) -> Result<CourseDescriptor> {
        let Some(course) = self.courses.get(url) else {
            bail!("course {} not present in manifest", url);
        };
        self.to_descriptor(course)
    }
}
