use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::keypoints::FrameVector;
use crate::DomainError;

/// Frames fed to the classifier, shared by dataset assembly and inference.
pub const SEQUENCE_LENGTH: usize = 60;
/// Upper bound on captured frames (5 seconds at 30 fps).
pub const MAX_CAPTURE_FRAMES: usize = 150;

/// Brings a variable-length keypoint sequence to exactly `target_length` frames.
///
/// Longer sequences keep a window centred on the middle of the recording,
/// where impact usually happens. Shorter ones are padded at the end with
/// zero frames of the same width. An empty sequence is an error rather than
/// an all-zero sample.
pub fn normalize(
    sequence: &[FrameVector],
    target_length: usize,
) -> Result<Vec<FrameVector>, DomainError> {
    if target_length == 0 {
        return Err(DomainError::validation("target length must be positive"));
    }
    let first = sequence.first().ok_or(DomainError::EmptyInput)?;
    let width = first.len();
    if let Some((index, frame)) = sequence
        .iter()
        .enumerate()
        .find(|(_, frame)| frame.len() != width)
    {
        return Err(DomainError::validation(format!(
            "frame {} has width {}, expected {}",
            index,
            frame.len(),
            width
        )));
    }

    let len = sequence.len();
    if len > target_length {
        let start = (len / 2)
            .saturating_sub(target_length / 2)
            .min(len - target_length);
        return Ok(sequence[start..start + target_length].to_vec());
    }

    let mut frames = sequence.to_vec();
    frames.resize(target_length, vec![0.0; width]);
    Ok(frames)
}

/// A keypoint sequence of exactly [`SEQUENCE_LENGTH`] frames.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NormalizedSequence {
    frames: Vec<FrameVector>,
}

impl NormalizedSequence {
    pub fn from_raw(sequence: &[FrameVector]) -> Result<Self, DomainError> {
        Ok(Self {
            frames: normalize(sequence, SEQUENCE_LENGTH)?,
        })
    }

    pub fn frames(&self) -> &[FrameVector] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn width(&self) -> usize {
        self.frames.first().map(Vec::len).unwrap_or(0)
    }

    /// Frames as a `time x keypoint` matrix.
    pub fn to_array(&self) -> Result<Array2<f32>, DomainError> {
        let flat: Vec<f32> = self.frames.iter().flatten().copied().collect();
        Array2::from_shape_vec((self.len(), self.width()), flat)
            .map_err(|err| DomainError::validation(err.to_string()))
    }
}
