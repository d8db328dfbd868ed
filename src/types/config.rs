use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration for the full pipeline. Defaults match the fixed
/// assignment setup: k=1, data under `data/`, output under `submissions/`.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct RunConfig {
    /// Number of neighbors shared by every channel model.
    #[serde(default = "default_k")]
    #[builder(default = default_k())]
    pub k: usize,

    /// Root directory containing the `LS/` and `TS/` splits.
    #[serde(default = "default_data_path")]
    #[builder(default = default_data_path())]
    pub data_path: PathBuf,

    /// Directory the submission file is written into.
    #[serde(default = "default_output_dir")]
    #[builder(default = default_output_dir())]
    pub output_dir: PathBuf,

    /// Submission file name.
    #[serde(default = "default_output_name")]
    #[builder(default = default_output_name())]
    pub output_name: String,

    /// Whether to drop degenerate training rows before fitting.
    #[serde(default = "default_filter")]
    #[builder(default = default_filter())]
    pub filter: bool,
}

fn default_k() -> usize {
    1
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("submissions")
}

fn default_output_name() -> String {
    "knn_splitted_1_filtered.csv".to_string()
}

fn default_filter() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// the defaults above.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config JSON: {}", e))?;
        Ok(config)
    }
}
