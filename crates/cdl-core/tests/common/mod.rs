//! Shared test doubles: deterministic retriever/provider stubs, a cookie
//! jar fixture, and a minimal HTTP server for asset-fetch scenarios.
#![allow(dead_code)]

pub mod asset_server;

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use cdl_core::course::{CourseDescriptor, CourseMeta, LectureRef};
use cdl_core::credential::Credential;
use cdl_core::provider::CourseProvider;
use cdl_core::retriever::{LectureDest, Retriever, ToolOutput};

/// What the stub tool does for a given lecture stem.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Write the video (and a subtitle) and report progress on stdout.
    Succeed,
    /// Write the given text to stderr and nothing to disk.
    Stderr(String),
    /// Exit silently: no output, no files.
    Silent,
}

/// Deterministic stand-in for the external retrieval tool. Records every
/// invocation so tests can assert the tool was (not) launched.
pub struct StubRetriever {
    invocations: Mutex<Vec<String>>,
    behaviors: HashMap<String, StubBehavior>,
}

impl StubRetriever {
    pub fn new() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            behaviors: HashMap::new(),
        }
    }

    pub fn with_behavior(mut self, stem: &str, behavior: StubBehavior) -> Self {
        self.behaviors.insert(stem.to_string(), behavior);
        self
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn invoked_stems(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn retrieve(
        &self,
        _locator: &str,
        dest: &LectureDest,
        _credential: &Credential,
    ) -> Result<ToolOutput> {
        self.invocations.lock().unwrap().push(dest.stem.clone());
        let behavior = self
            .behaviors
            .get(&dest.stem)
            .cloned()
            .unwrap_or(StubBehavior::Succeed);
        match behavior {
            StubBehavior::Succeed => {
                std::fs::write(dest.video_path(), b"video-bytes")?;
                std::fs::write(dest.dir.join(format!("{}.en.srt", dest.stem)), b"1\n")?;
                Ok(ToolOutput {
                    stdout: format!("[download] {} finished\n", dest.stem),
                    stderr: String::new(),
                })
            }
            StubBehavior::Stderr(msg) => Ok(ToolOutput {
                stdout: String::new(),
                stderr: msg,
            }),
            StubBehavior::Silent => Ok(ToolOutput {
                stdout: String::new(),
                stderr: String::new(),
            }),
        }
    }
}

/// Provider serving pre-built descriptors from memory.
pub struct StubProvider {
    courses: HashMap<String, CourseDescriptor>,
}

impl StubProvider {
    pub fn new(courses: Vec<CourseDescriptor>) -> Self {
        Self {
            courses: courses.into_iter().map(|c| (c.url.clone(), c)).collect(),
        }
    }
}

#[async_trait]
impl CourseProvider for StubProvider {
    async fn fetch_course(&self, url: &str) -> Result<CourseDescriptor> {
        match self.courses.get(url) {
            Some(course) => Ok(course.clone()),
            None => bail!("course {} not present", url),
        }
    }
}

/// One-chapter course with lectures "Welcome" and "Setup".
pub fn two_lecture_course(title: &str, url: &str) -> CourseDescriptor {
    CourseDescriptor::new(
        title,
        url,
        CourseMeta {
            author: "Jane Doe".to_string(),
            ..CourseMeta::default()
        },
        None,
        None,
        vec![(
            "1. Basics".to_string(),
            vec![
                LectureRef::new("Welcome", format!("{url}/v/1")),
                LectureRef::new("Setup", format!("{url}/v/2")),
            ],
        )],
    )
}

/// Cookie jar fixture; keep the TempDir alive for the test's duration.
pub fn test_credential() -> (tempfile::TempDir, Credential) {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("cookies.txt");
    std::fs::write(&jar, "# Netscape HTTP Cookie File\n").unwrap();
    let credential = Credential::from_file(&jar).unwrap();
    (dir, credential)
}
