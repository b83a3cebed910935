use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use swing_domain::{Category, Dataset, DatasetRow, DomainError, NormalizedSequence};
use swing_registry::{GolferRegistry, GolferStore};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::joiner::MetadataJoiner;
use crate::keypoints::read_keypoints;
use crate::recording::{discover_recordings, RecordingFiles};

/// Directory scanned for each swing category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryRoots {
    roots: BTreeMap<Category, PathBuf>,
}

impl CategoryRoots {
    pub fn new() -> Self {
        Self::default()
    }

    /// One subdirectory per category, named with the canonical spelling.
    ///
    /// Hyphen-spelled directories left by older capture tooling are reported
    /// and not scanned; rename them to include their recordings.
    pub fn from_base_dir(base: &Path) -> Self {
        let mut roots = Self::new();
        for category in Category::ALL {
            roots.insert(category, base.join(category.as_str()));
            if let Some(legacy) = category.legacy_name() {
                let legacy_dir = base.join(legacy);
                if legacy_dir.is_dir() {
                    warn!(
                        dir = %legacy_dir.display(),
                        expected = %base.join(category.as_str()).display(),
                        "ignoring directory with legacy category spelling"
                    );
                }
            }
        }
        roots
    }

    pub fn insert(&mut self, category: Category, dir: impl Into<PathBuf>) {
        self.roots.insert(category, dir.into());
    }

    pub fn get(&self, category: Category) -> Option<&Path> {
        self.roots.get(&category).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Path)> {
        self.roots.iter().map(|(category, dir)| (*category, dir.as_path()))
    }
}

#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("no metadata sidecar")]
    MissingMetadata,
    #[error("keypoint sequence is empty")]
    EmptySequence,
    #[error("unreadable: {0}")]
    Unreadable(String),
    #[error("invalid keypoints: {0}")]
    Invalid(String),
}

#[derive(Debug)]
pub struct SkippedRecording {
    pub category: Category,
    pub keypoints: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedRecording>,
}

/// Builds the labeled dataset from category directories.
pub struct DatasetAssembler<'a, S: GolferStore> {
    joiner: MetadataJoiner<'a, S>,
}

impl<'a, S: GolferStore> DatasetAssembler<'a, S> {
    pub fn new(registry: &'a GolferRegistry<S>) -> Self {
        Self {
            joiner: MetadataJoiner::new(registry),
        }
    }

    /// Problems with a single recording are logged and recorded in the
    /// report; only registry failures abort the run.
    #[instrument(skip_all)]
    pub fn assemble(&self, roots: &CategoryRoots) -> Result<AssemblyReport> {
        let mut report = AssemblyReport::default();
        for (category, dir) in roots.iter() {
            if !dir.is_dir() {
                warn!(category = %category, dir = %dir.display(), "category directory missing");
                continue;
            }
            let recordings = match discover_recordings(dir) {
                Ok(recordings) => recordings,
                Err(err) => {
                    warn!(category = %category, error = %err, "cannot list category directory");
                    continue;
                }
            };
            debug!(category = %category, count = recordings.len(), "scanning recordings");
            for files in recordings {
                match self.assemble_one(category, &files)? {
                    Ok(row) => report.dataset.push(row),
                    Err(reason) => {
                        warn!(
                            category = %category,
                            recording = %files.stem,
                            reason = %reason,
                            "skipping recording"
                        );
                        report.skipped.push(SkippedRecording {
                            category,
                            keypoints: files.keypoints,
                            reason,
                        });
                    }
                }
            }
        }
        info!(
            rows = report.dataset.len(),
            skipped = report.skipped.len(),
            "dataset assembled"
        );
        Ok(report)
    }

    fn assemble_one(
        &self,
        category: Category,
        files: &RecordingFiles,
    ) -> Result<Result<DatasetRow, SkipReason>> {
        if !files.metadata.exists() {
            return Ok(Err(SkipReason::MissingMetadata));
        }
        let raw = match read_keypoints(&files.keypoints) {
            Ok(raw) => raw,
            Err(err) => return Ok(Err(SkipReason::Unreadable(format!("{:#}", err)))),
        };
        let metadata = match files.read_metadata() {
            Ok(metadata) => metadata,
            Err(err) => return Ok(Err(SkipReason::Unreadable(format!("{:#}", err)))),
        };
        let keypoints = match NormalizedSequence::from_raw(&raw) {
            Ok(keypoints) => keypoints,
            Err(DomainError::EmptyInput) => return Ok(Err(SkipReason::EmptySequence)),
            Err(err) => return Ok(Err(SkipReason::Invalid(err.to_string()))),
        };
        let features = self.joiner.join(&metadata)?;
        Ok(Ok(DatasetRow::new(
            files.stem.clone(),
            category,
            metadata.club_type.clone(),
            keypoints,
            features,
        )))
    }
}
