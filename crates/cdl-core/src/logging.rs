//! Logging init: append-only run log under the XDG state dir, with a
//! stderr fallback for environments where the state dir is unwritable.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::CdlConfig;
use crate::scheduler::Mode;

/// Per-event writer: the run log file, or stderr when the file handle
/// cannot be cloned.
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogSinkMaker(fs::File);

impl<'a> MakeWriter<'a> for LogSinkMaker {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cdl=debug"))
}

/// Initialize structured logging to `~/.local/state/cdl/cdl.log` and
/// return the log path. On failure (e.g. log dir unwritable), returns Err
/// so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
    let log_dir = xdg_dirs.get_state_home().join("cdl");

    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("cdl.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogSinkMaker(file)))
        .with_ansi(false)
        .init();

    tracing::info!("cdl logging initialized at {}", log_file_path.display());

    Ok(log_file_path)
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Emits a session header so successive runs are separable in the
/// append-only log: where the courses land, how wide the pool is, and
/// which lecture dispatch mode is in effect.
pub fn log_run_header(cfg: &CdlConfig, courses: usize, mode: Mode) {
    tracing::info!(
        download_dir = %cfg.download_dir.display(),
        max_workers = cfg.max_workers,
        courses,
        ?mode,
        "cdl session starting"
    );
}
