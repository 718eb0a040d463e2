//! Cross-course executor: bounded pool of independent course pipelines.
//!
//! Keeps up to `max_workers` pipelines in flight at once, refilling from
//! the queue as tasks finish, and collects results in finishing order.
//! Submission order is shuffled so a batch of workers does not hammer the
//! same part of the source service simultaneously. Each pipeline owns its
//! descriptor, directory subtree, and subprocess children; one course's
//! fatal failure never cancels a sibling course.

use rand::seq::SliceRandom;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

use anyhow::{Context, Result};

use crate::assets;
use crate::config::CdlConfig;
use crate::credential::Credential;
use crate::layout;
use crate::outcome::{CourseResult, CourseStatus, TaskOutcome};
use crate::provider::CourseProvider;
use crate::retriever::Retriever;
use crate::scheduler::{self, Mode};

pub struct Executor {
    cfg: CdlConfig,
    provider: Arc<dyn CourseProvider>,
    retriever: Arc<dyn Retriever>,
    credential: Credential,
}

impl Executor {
    pub fn new(
        cfg: CdlConfig,
        provider: Arc<dyn CourseProvider>,
        retriever: Arc<dyn Retriever>,
        credential: Credential,
    ) -> Self {
        Self {
            cfg,
            provider,
            retriever,
            credential,
        }
    }

    /// Runs the full pipeline for every course URL and returns one result
    /// per course, in the order they finished.
    pub async fn run(&self, urls: Vec<String>, mode: Mode) -> Vec<CourseResult> {
        let mut urls = urls;
        urls.shuffle(&mut rand::thread_rng());
        tracing::info!(courses = urls.len(), ?mode, "starting download run");

        let max_workers = self.cfg.max_workers.max(1);
        let mut queue: VecDeque<String> = urls.into();
        let mut join_set = JoinSet::new();
        // Task id → course URL, so a task that dies without yielding a
        // result (panic, cancellation) still produces an attributable entry.
        let mut in_flight: HashMap<tokio::task::Id, String> = HashMap::new();
        let mut results = Vec::new();

        loop {
            while join_set.len() < max_workers {
                let Some(url) = queue.pop_front() else {
                    break;
                };
                let provider = Arc::clone(&self.provider);
                let retriever = Arc::clone(&self.retriever);
                let credential = self.credential.clone();
                let cfg = self.cfg.clone();
                let task_url = url.clone();
                let handle = join_set.spawn(async move {
                    run_course(provider, retriever, cfg, credential, task_url, mode).await
                });
                in_flight.insert(handle.id(), url);
            }

            if join_set.is_empty() {
                break;
            }
            let Some(joined) = join_set.join_next_with_id().await else {
                break;
            };
            match joined {
                Ok((id, result)) => {
                    in_flight.remove(&id);
                    results.push(result);
                }
                Err(join_err) => {
                    let url = in_flight.remove(&join_err.id()).unwrap_or_default();
                    tracing::error!(course = %url, "course task join: {}", join_err);
                    results.push(CourseResult {
                        url,
                        title: None,
                        status: CourseStatus::Aborted(format!("course task join: {join_err}")),
                        outcomes: Vec::new(),
                        elapsed: Duration::ZERO,
                    });
                }
            }
        }

        results
    }
}

/// One course end-to-end; always yields a terminal `CourseResult`.
async fn run_course(
    provider: Arc<dyn CourseProvider>,
    retriever: Arc<dyn Retriever>,
    cfg: CdlConfig,
    credential: Credential,
    url: String,
    mode: Mode,
) -> CourseResult {
    let start = Instant::now();
    let mut outcomes = Vec::new();
    let mut title = None;

    let status = match course_pipeline(
        provider,
        retriever,
        &cfg,
        &credential,
        &url,
        mode,
        &mut outcomes,
        &mut title,
    )
    .await
    {
        Ok(()) => CourseStatus::Completed,
        Err(e) => {
            tracing::error!(course = %url, error = %format!("{e:#}"), "course pipeline aborted");
            CourseStatus::Aborted(format!("{e:#}"))
        }
    };

    let elapsed = start.elapsed();
    tracing::info!(
        course = title.as_deref().unwrap_or(&url),
        minutes = format!("{:.2}", elapsed.as_secs_f64() / 60.0),
        "course finished"
    );
    CourseResult {
        url,
        title,
        status,
        outcomes,
        elapsed,
    }
}

/// descriptor → layout → info file → thumbnail → lectures → exercise.
/// Outcomes collected so far survive an abort and end up in the report.
#[allow(clippy::too_many_arguments)]
async fn course_pipeline(
    provider: Arc<dyn CourseProvider>,
    retriever: Arc<dyn Retriever>,
    cfg: &CdlConfig,
    credential: &Credential,
    url: &str,
    mode: Mode,
    outcomes: &mut Vec<(String, TaskOutcome)>,
    title: &mut Option<String>,
) -> Result<()> {
    let descriptor = provider
        .fetch_course(url)
        .await
        .context("resolve course descriptor")?;
    tracing::info!(
        course = %descriptor.title,
        lectures = descriptor.lecture_count(),
        "course found"
    );
    *title = Some(descriptor.title.clone());

    let course_root = layout::build_layout(&descriptor, &cfg.download_dir)?;
    layout::write_info_file(&descriptor, &course_root)?;

    if let Some(entry) = assets::fetch_thumbnail(&descriptor, &course_root).await {
        outcomes.push(entry);
    }

    scheduler::run_lectures(retriever, &descriptor, &course_root, credential, mode, outcomes)
        .await?;

    if let Some(entry) = assets::fetch_exercise(&descriptor, &course_root, credential).await {
        outcomes.push(entry);
    }

    Ok(())
}
