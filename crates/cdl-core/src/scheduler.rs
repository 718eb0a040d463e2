//! Intra-course scheduler: fans out lecture retrieval tasks for one course.
//!
//! Sequential mode awaits lectures one at a time in descriptor order.
//! Concurrent mode launches every lecture onto the runtime together and
//! collects outcomes in finishing order; the first fatal outcome aborts
//! the remaining siblings and unwinds the course pipeline. Each lecture
//! writes a distinct file, so the set needs no locking.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::course::CourseDescriptor;
use crate::credential::Credential;
use crate::error::DownloadError;
use crate::lecture::retrieve_lecture;
use crate::outcome::TaskOutcome;
use crate::retriever::Retriever;

/// Lecture dispatch mode within one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// One lecture at a time, in descriptor order.
    #[default]
    Sequential,
    /// All lectures at once, jointly awaited, jointly cancelled on a
    /// fatal failure.
    Concurrent,
}

/// Dispatches every lecture of the course exactly once, pushing
/// (lecture name, outcome) pairs into `outcomes` as they settle. On a
/// fatal lecture failure the outstanding siblings are abandoned and the
/// error propagates; outcomes already collected stay in the vec so the
/// report can show them.
pub async fn run_lectures(
    retriever: Arc<dyn Retriever>,
    descriptor: &CourseDescriptor,
    course_root: &Path,
    credential: &Credential,
    mode: Mode,
    outcomes: &mut Vec<(String, TaskOutcome)>,
) -> Result<()> {
    match mode {
        Mode::Sequential => {
            run_sequential(retriever, descriptor, course_root, credential, outcomes).await
        }
        Mode::Concurrent => {
            run_concurrent(retriever, descriptor, course_root, credential, outcomes).await
        }
    }
}

async fn run_sequential(
    retriever: Arc<dyn Retriever>,
    descriptor: &CourseDescriptor,
    course_root: &Path,
    credential: &Credential,
    outcomes: &mut Vec<(String, TaskOutcome)>,
) -> Result<()> {
    for chapter in &descriptor.chapters {
        let chapter_dir = course_root.join(&chapter.name);
        for lecture in &chapter.lectures {
            let outcome =
                retrieve_lecture(retriever.as_ref(), lecture, &chapter_dir, credential).await?;
            outcomes.push((lecture.name.clone(), outcome));
        }
    }
    Ok(())
}

async fn run_concurrent(
    retriever: Arc<dyn Retriever>,
    descriptor: &CourseDescriptor,
    course_root: &Path,
    credential: &Credential,
    outcomes: &mut Vec<(String, TaskOutcome)>,
) -> Result<()> {
    let mut join_set: JoinSet<Result<(String, TaskOutcome), DownloadError>> = JoinSet::new();

    for chapter in &descriptor.chapters {
        let chapter_dir = course_root.join(&chapter.name);
        for lecture in &chapter.lectures {
            let retriever = Arc::clone(&retriever);
            let credential = credential.clone();
            let chapter_dir = chapter_dir.clone();
            let lecture = lecture.clone();
            join_set.spawn(async move {
                let outcome =
                    retrieve_lecture(retriever.as_ref(), &lecture, &chapter_dir, &credential)
                        .await?;
                Ok((lecture.name, outcome))
            });
        }
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(Ok(pair)) => outcomes.push(pair),
            Ok(Err(fatal)) => {
                // Abandon outstanding siblings; their subprocesses have
                // already been launched and are left to finish on their own.
                join_set.abort_all();
                while join_set.join_next().await.is_some() {}
                return Err(fatal.into());
            }
            Err(join_err) => {
                if join_err.is_cancelled() {
                    continue;
                }
                join_set.abort_all();
                while join_set.join_next().await.is_some() {}
                return Err(anyhow::anyhow!("lecture task join: {}", join_err));
            }
        }
    }
    Ok(())
}
