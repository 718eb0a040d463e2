//! CLI for the CDL course downloader.

mod manifest;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use cdl_core::config;
use cdl_core::credential::Credential;
use cdl_core::executor::Executor;
use cdl_core::logging;
use cdl_core::outcome::{CourseResult, CourseStatus, TaskOutcome};
use cdl_core::retriever::YoutubeDlRetriever;
use cdl_core::scheduler::Mode;

use manifest::ManifestProvider;

/// Top-level CLI for the CDL course downloader.
#[derive(Debug, Parser)]
#[command(name = "cdl")]
#[command(about = "CDL: concurrent course downloader", long_about = None)]
pub struct Cli {
    /// Single course URL to download.
    #[arg(short, long)]
    pub url: Option<String>,

    /// File with one course URL per line.
    #[arg(short, long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// TOML manifest of pre-scraped course descriptors.
    #[arg(short, long, value_name = "PATH")]
    pub manifest: PathBuf,

    /// Download each course's lectures concurrently instead of one at a time.
    #[arg(long)]
    pub concurrent: bool,

    /// Process up to N courses simultaneously (overrides config).
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Netscape cookie jar for the authenticated session (overrides config).
    #[arg(long, value_name = "PATH")]
    pub cookies: Option<PathBuf>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        Cli::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        if let Some(n) = self.workers {
            cfg.max_workers = n;
        }
        if let Some(path) = &self.cookies {
            cfg.cookie_file = Some(path.clone());
        }

        let urls = self.load_urls()?;
        let jar = cfg.cookie_file_path()?;
        let credential = Credential::from_file(&jar)?;

        let provider = Arc::new(
            ManifestProvider::load(&self.manifest, &cfg.base_url)
                .with_context(|| format!("load manifest {}", self.manifest.display()))?,
        );
        let retriever = Arc::new(YoutubeDlRetriever::new(cfg.retrieval_tool()));
        let mode = if self.concurrent {
            Mode::Concurrent
        } else {
            Mode::Sequential
        };

        logging::log_run_header(&cfg, urls.len(), mode);
        println!("{} course(s) to download.", urls.len());
        let executor = Executor::new(cfg, provider, retriever, credential);
        let results = executor.run(urls, mode).await;
        print_report(&results);
        Ok(())
    }

    fn load_urls(&self) -> Result<Vec<String>> {
        if let Some(url) = &self.url {
            return Ok(vec![url.clone()]);
        }
        if let Some(path) = &self.file {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("read url file {}", path.display()))?;
            let urls: Vec<String> = data
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            if urls.is_empty() {
                bail!("url file {} contains no URLs", path.display());
            }
            return Ok(urls);
        }
        bail!("pass either --url or --file");
    }
}

fn print_report(results: &[CourseResult]) {
    for result in results {
        let name = result.title.as_deref().unwrap_or(&result.url);
        match &result.status {
            CourseStatus::Completed => println!(
                "\"{}\": {} downloaded, {} skipped, {} failed ({:.2} min)",
                name,
                result.downloaded(),
                result.skipped(),
                result.failed(),
                result.elapsed.as_secs_f64() / 60.0
            ),
            CourseStatus::Aborted(reason) => {
                println!("\"{}\": ABORTED: {}", name, reason)
            }
        }
        for (artifact, outcome) in &result.outcomes {
            match outcome {
                TaskOutcome::Failed(reason) => {
                    println!("  {:<10} {}  ({})", outcome.label(), artifact, reason)
                }
                _ => println!("  {:<10} {}", outcome.label(), artifact),
            }
        }
    }
}

#[cfg(test)]
mod tests;
