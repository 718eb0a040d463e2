use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default worker-pool size for the cross-course executor.
const DEFAULT_MAX_WORKERS: usize = 6;

/// Global configuration loaded from `~/.config/cdl/config.toml`.
///
/// Passed by value into the executor at construction; nothing in the core
/// reads process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdlConfig {
    /// Root directory that course trees are materialized under.
    pub download_dir: PathBuf,
    /// Maximum number of courses processed simultaneously.
    pub max_workers: usize,
    /// Base URL used to resolve site-relative asset links in descriptors.
    pub base_url: String,
    /// Cookie jar path; if missing, `~/.config/cdl/cookies.txt` is used.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
    /// External retrieval tool binary (default `youtube-dl`).
    #[serde(default)]
    pub retrieval_tool: Option<String>,
}

impl Default for CdlConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("courses"),
            max_workers: DEFAULT_MAX_WORKERS,
            base_url: "https://www.lynda.com".to_string(),
            cookie_file: None,
            retrieval_tool: None,
        }
    }
}

impl CdlConfig {
    pub fn retrieval_tool(&self) -> &str {
        self.retrieval_tool.as_deref().unwrap_or("youtube-dl")
    }

    /// Resolves the cookie jar path: explicit config value, or the default
    /// location under the XDG config dir.
    pub fn cookie_file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.cookie_file {
            return Ok(path.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
        Ok(xdg_dirs.get_config_home().join("cookies.txt"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
