use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Pose landmarks reported per frame by the pose estimator.
pub const LANDMARK_COUNT: usize = 33;
/// Components stored per landmark: x, y, z, visibility.
pub const LANDMARK_COMPONENTS: usize = 4;
/// Width of a flattened frame vector.
pub const KEYPOINT_WIDTH: usize = LANDMARK_COUNT * LANDMARK_COMPONENTS;

/// One frame of flattened landmarks.
pub type FrameVector = Vec<f32>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }
}

/// Flattens one frame's landmarks into a frame vector.
///
/// A frame where no pose was detected becomes an all-zero vector, which is
/// indistinguishable from a genuine all-zero pose.
pub fn frame_from_landmarks(landmarks: Option<&[Landmark]>) -> Result<FrameVector, DomainError> {
    let Some(landmarks) = landmarks else {
        return Ok(vec![0.0; KEYPOINT_WIDTH]);
    };
    if landmarks.len() != LANDMARK_COUNT {
        return Err(DomainError::validation(format!(
            "expected {} landmarks per frame, got {}",
            LANDMARK_COUNT,
            landmarks.len()
        )));
    }
    let mut frame = Vec::with_capacity(KEYPOINT_WIDTH);
    for landmark in landmarks {
        frame.extend_from_slice(&[landmark.x, landmark.y, landmark.z, landmark.visibility]);
    }
    Ok(frame)
}
