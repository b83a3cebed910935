use std::path::Path;

use anyhow::{Context, Result};
use swing_domain::FrameVector;

/// Reads a keypoints table: one header row of column indices, then one row
/// of landmark values per frame.
pub fn read_keypoints<P: AsRef<Path>>(path: P) -> Result<Vec<FrameVector>> {
    let path_ref = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path_ref)
        .with_context(|| format!("open keypoints file {:?}", path_ref))?;
    let mut frames = Vec::new();
    for (index, row) in reader.deserialize::<FrameVector>().enumerate() {
        let frame = row.with_context(|| format!("parse frame {} of {:?}", index, path_ref))?;
        frames.push(frame);
    }
    Ok(frames)
}

pub fn write_keypoints<P: AsRef<Path>>(path: P, frames: &[FrameVector]) -> Result<()> {
    let path_ref = path.as_ref();
    let width = frames.first().map(Vec::len).unwrap_or(0);
    let mut writer = csv::Writer::from_path(path_ref)
        .with_context(|| format!("create keypoints file {:?}", path_ref))?;
    writer.write_record((0..width).map(|column| column.to_string()))?;
    for frame in frames {
        writer.write_record(frame.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn written_frames_read_back_identically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("swing_keypoints.csv");
        let frames = vec![vec![0.51, 0.25, -0.125, 0.99], vec![0.0; 4]];
        write_keypoints(&path, &frames).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("0,1,2,3\n"));
        assert_eq!(read_keypoints(&path).unwrap(), frames);
    }

    #[test]
    fn header_only_file_has_no_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty_keypoints.csv");
        std::fs::write(&path, "0,1,2\n").unwrap();
        assert!(read_keypoints(&path).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_cell_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad_keypoints.csv");
        std::fs::write(&path, "0,1\n0.1,oops\n").unwrap();
        assert!(read_keypoints(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_keypoints("does-not-exist.csv").is_err());
    }
}
