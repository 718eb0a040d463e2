//! Tagged results of fetch attempts and per-course aggregation.

use std::time::Duration;

/// Result of one fetch attempt (lecture, thumbnail, or exercise archive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Target file already existed on disk; nothing was fetched.
    Skipped,
    /// Fetched and written to disk.
    Downloaded,
    /// The fetch failed; the reason is recorded for the report.
    Failed(String),
}

impl TaskOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_))
    }

    /// Short label for report lines.
    pub fn label(&self) -> &str {
        match self {
            TaskOutcome::Skipped => "skipped",
            TaskOutcome::Downloaded => "downloaded",
            TaskOutcome::Failed(_) => "failed",
        }
    }
}

/// Terminal state of one course pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseStatus {
    /// Every lecture and asset reached a terminal outcome.
    Completed,
    /// A fatal error (filesystem, retrieval tool, descriptor resolution)
    /// unwound the pipeline; outcomes collected before the abort are kept.
    Aborted(String),
}

/// Final report entry for one course, collected in finishing order.
#[derive(Debug)]
pub struct CourseResult {
    pub url: String,
    /// Sanitized course title, if the descriptor was resolved before failure.
    pub title: Option<String>,
    pub status: CourseStatus,
    /// (artifact name, outcome) pairs in the order they finished.
    pub outcomes: Vec<(String, TaskOutcome)>,
    pub elapsed: Duration,
}

impl CourseResult {
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Downloaded))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| o.is_failed())
    }

    fn count(&self, pred: impl Fn(&TaskOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_counts() {
        let result = CourseResult {
            url: "https://example.com/course".to_string(),
            title: Some("Course".to_string()),
            status: CourseStatus::Completed,
            outcomes: vec![
                ("a".to_string(), TaskOutcome::Downloaded),
                ("b".to_string(), TaskOutcome::Skipped),
                ("c".to_string(), TaskOutcome::Downloaded),
                ("d".to_string(), TaskOutcome::Failed("HTTP 404".to_string())),
            ],
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(result.downloaded(), 2);
        assert_eq!(result.skipped(), 1);
        assert_eq!(result.failed(), 1);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(TaskOutcome::Skipped.label(), "skipped");
        assert_eq!(TaskOutcome::Downloaded.label(), "downloaded");
        assert_eq!(TaskOutcome::Failed("x".to_string()).label(), "failed");
        assert!(TaskOutcome::Failed("x".to_string()).is_failed());
    }
}
