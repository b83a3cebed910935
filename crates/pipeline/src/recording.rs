use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use swing_domain::{FrameVector, SwingMetadata, MAX_CAPTURE_FRAMES};
use tracing::{info, warn};

use crate::keypoints::write_keypoints;

pub const KEYPOINTS_SUFFIX: &str = "_keypoints.csv";
pub const METADATA_SUFFIX: &str = "_metadata.json";

/// Files belonging to one captured swing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordingFiles {
    pub stem: String,
    pub keypoints: PathBuf,
    pub metadata: PathBuf,
}

impl RecordingFiles {
    pub fn new(dir: &Path, stem: impl Into<String>) -> Self {
        let stem = stem.into();
        Self {
            keypoints: dir.join(format!("{}{}", stem, KEYPOINTS_SUFFIX)),
            metadata: dir.join(format!("{}{}", stem, METADATA_SUFFIX)),
            stem,
        }
    }

    pub fn read_metadata(&self) -> Result<SwingMetadata> {
        let file = File::open(&self.metadata)
            .with_context(|| format!("open metadata {:?}", self.metadata))?;
        let metadata = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse metadata {:?}", self.metadata))?;
        Ok(metadata)
    }
}

/// Lists the recordings in `dir` by their keypoints files, sorted by stem.
pub fn discover_recordings(dir: &Path) -> Result<Vec<RecordingFiles>> {
    let mut recordings = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list recordings in {:?}", dir))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(KEYPOINTS_SUFFIX)) else {
            continue;
        };
        recordings.push(RecordingFiles::new(dir, stem));
    }
    recordings.sort_by(|a, b| a.stem.cmp(&b.stem));
    Ok(recordings)
}

/// Persists a captured swing as a keypoints table plus a JSON sidecar.
pub struct RecordingWriter;

impl RecordingWriter {
    pub fn write(
        &self,
        dir: &Path,
        mut metadata: SwingMetadata,
        frames: &[FrameVector],
    ) -> Result<RecordingFiles> {
        if frames.is_empty() {
            bail!("no frames captured for swing {}", metadata.swing_id);
        }
        if metadata.swing_id.is_empty() || metadata.swing_id.contains(['/', '\\']) {
            bail!("swing id {:?} is not a valid file stem", metadata.swing_id);
        }
        let frames = if frames.len() > MAX_CAPTURE_FRAMES {
            warn!(
                swing_id = %metadata.swing_id,
                captured = frames.len(),
                kept = MAX_CAPTURE_FRAMES,
                "recording exceeds capture limit, dropping trailing frames"
            );
            &frames[..MAX_CAPTURE_FRAMES]
        } else {
            frames
        };
        metadata.frame_count = frames.len();

        fs::create_dir_all(dir).with_context(|| format!("create output dir {:?}", dir))?;
        let files = RecordingFiles::new(dir, metadata.swing_id.clone());
        if files.keypoints.exists() || files.metadata.exists() {
            bail!("swing {} is already recorded in {:?}", metadata.swing_id, dir);
        }
        // create_new claims the swing id even if another writer races us here
        let mut sidecar = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&files.metadata)
            .with_context(|| format!("create metadata {:?}", files.metadata))?;
        sidecar
            .write_all(&serde_json::to_vec_pretty(&metadata)?)
            .with_context(|| format!("write metadata {:?}", files.metadata))?;
        write_keypoints(&files.keypoints, frames)?;
        info!(swing_id = %metadata.swing_id, frames = frames.len(), "swing recorded");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoints::read_keypoints;
    use swing_domain::{AngleType, KEYPOINT_WIDTH};
    use tempfile::tempdir;
    use time::OffsetDateTime;

    fn metadata() -> SwingMetadata {
        SwingMetadata::new(
            "ab12cd34",
            "driver",
            12.0,
            4.0,
            AngleType::FaceOn,
            OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            0,
            1.0,
        )
    }

    #[test]
    fn writes_keypoints_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("good");
        let frames = vec![vec![0.5; KEYPOINT_WIDTH]; 90];
        let files = RecordingWriter.write(&out, metadata(), &frames).unwrap();

        assert_eq!(files.stem, "ab12cd34_driver_face-on_1700000000");
        assert_eq!(read_keypoints(&files.keypoints).unwrap().len(), 90);
        let sidecar = files.read_metadata().unwrap();
        assert_eq!(sidecar.frame_count, 90);
        assert_eq!(sidecar.golfer_id.as_deref(), Some("ab12cd34"));

        let found = discover_recordings(&out).unwrap();
        assert_eq!(found, vec![files]);
    }

    #[test]
    fn caps_frames_at_capture_limit() {
        let dir = tempdir().unwrap();
        let frames = vec![vec![0.1; 4]; MAX_CAPTURE_FRAMES + 30];
        let files = RecordingWriter.write(dir.path(), metadata(), &frames).unwrap();
        assert_eq!(
            read_keypoints(&files.keypoints).unwrap().len(),
            MAX_CAPTURE_FRAMES
        );
        assert_eq!(files.read_metadata().unwrap().frame_count, MAX_CAPTURE_FRAMES);
    }

    #[test]
    fn existing_recording_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let first = RecordingWriter
            .write(dir.path(), metadata(), &vec![vec![1.0; 4]; 90])
            .unwrap();
        let second = RecordingWriter.write(dir.path(), metadata(), &vec![vec![2.0; 4]; 10]);
        assert!(second.is_err());

        let kept = read_keypoints(&first.keypoints).unwrap();
        assert_eq!(kept.len(), 90);
        assert_eq!(kept[0][0], 1.0);
        assert_eq!(first.read_metadata().unwrap().frame_count, 90);
        assert_eq!(discover_recordings(dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn club_with_slash_stays_inside_the_category_dir() {
        let dir = tempdir().unwrap();
        let meta = SwingMetadata::new(
            "g",
            "3/4-wood",
            12.0,
            4.0,
            AngleType::FaceOn,
            OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            0,
            1.0,
        );
        let files = RecordingWriter
            .write(dir.path(), meta, &vec![vec![0.5; 4]; 5])
            .unwrap();
        assert_eq!(files.keypoints.parent().unwrap(), dir.path());
        assert_eq!(files.read_metadata().unwrap().club_type, "3/4-wood");
    }

    #[test]
    fn path_like_swing_id_is_rejected() {
        let dir = tempdir().unwrap();
        let mut meta = metadata();
        meta.swing_id = "../escape".to_string();
        assert!(RecordingWriter
            .write(dir.path(), meta, &vec![vec![0.5; 4]; 5])
            .is_err());
        assert!(!dir.path().parent().unwrap().join("escape_keypoints.csv").exists());
    }

    #[test]
    fn refuses_empty_capture() {
        let dir = tempdir().unwrap();
        assert!(RecordingWriter.write(dir.path(), metadata(), &[]).is_err());
    }

    #[test]
    fn discovery_ignores_unrelated_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b_keypoints.csv"), "0\n1\n").unwrap();
        fs::write(dir.path().join("a_keypoints.csv"), "0\n1\n").unwrap();
        fs::write(dir.path().join("a_metadata.json"), "{}").unwrap();
        fs::write(dir.path().join("a.mp4"), "").unwrap();
        let stems: Vec<_> = discover_recordings(dir.path())
            .unwrap()
            .into_iter()
            .map(|r| r.stem)
            .collect();
        assert_eq!(stems, vec!["a", "b"]);
    }
}
