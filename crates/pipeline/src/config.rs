use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assembler::CategoryRoots;

/// File layout and split settings for a dataset run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding one subdirectory per swing category.
    pub base_dir: PathBuf,
    pub registry_path: PathBuf,
    pub calibration_path: PathBuf,
    pub output_path: PathBuf,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("data/raw_videos"),
            registry_path: PathBuf::from("data/golfer_metadata.csv"),
            calibration_path: PathBuf::from("data/calibration.txt"),
            output_path: PathBuf::from("data/swing_dataset.json"),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl PipelineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading pipeline config {}", path_ref.display()))?;
        let config: PipelineConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing pipeline config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn category_roots(&self) -> CategoryRoots {
        CategoryRoots::from_base_dir(&self.base_dir)
    }
}
