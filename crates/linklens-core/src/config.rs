use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_split_offset() -> usize {
    287_552
}

fn default_part1_hash_count() -> u32 {
    20
}

fn default_part2_hash_count() -> u32 {
    21
}

/// On-disk layout of a filter blob (optional `[layout]` section in
/// config.toml). Passed into the loader so the split point and hash counts
/// are never module-level globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterLayout {
    /// Byte offset splitting the blob into its two regions.
    #[serde(default = "default_split_offset")]
    pub split_offset: usize,
    /// Hash iterations for the first region.
    #[serde(default = "default_part1_hash_count")]
    pub part1_hash_count: u32,
    /// Hash iterations for the second region.
    #[serde(default = "default_part2_hash_count")]
    pub part2_hash_count: u32,
}

impl Default for FilterLayout {
    fn default() -> Self {
        Self {
            split_offset: default_split_offset(),
            part1_hash_count: default_part1_hash_count(),
            part2_hash_count: default_part2_hash_count(),
        }
    }
}

/// Global configuration loaded from `~/.config/linklens/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinklensConfig {
    /// Directory holding `transphobic.dat` and `t-friendly.dat`; if missing,
    /// the XDG data dir is used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Filter blob layout; built-in defaults match the published filters.
    #[serde(default)]
    pub layout: FilterLayout,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linklens")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Default location of the bundled filter files.
pub fn default_data_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linklens")?;
    Ok(xdg_dirs.get_data_home())
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinklensConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LinklensConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LinklensConfig = toml::from_str(&data)?;
    Ok(cfg)
}
