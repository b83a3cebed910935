use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::DomainError;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AngleType {
    #[default]
    #[serde(rename = "face-on")]
    FaceOn,
    #[serde(rename = "down-the-line")]
    DownTheLine,
}

impl AngleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleType::FaceOn => "face-on",
            AngleType::DownTheLine => "down-the-line",
        }
    }

    /// Exact match only; anything else is an unrecognized angle.
    pub fn recognize(value: &str) -> Option<Self> {
        match value {
            "face-on" => Some(AngleType::FaceOn),
            "down-the-line" => Some(AngleType::DownTheLine),
            _ => None,
        }
    }
}

impl fmt::Display for AngleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AngleType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::recognize(value)
            .ok_or_else(|| DomainError::validation(format!("unknown camera angle '{}'", value)))
    }
}

fn unknown_club() -> String {
    "unknown".to_string()
}

fn uncalibrated() -> f32 {
    1.0
}

/// Swing ids double as file stems, so path separators cannot appear in them.
fn id_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

/// Sidecar metadata written next to each recording's keypoints.
///
/// Fields other than `swing_id` may be missing from older sidecars; the
/// feature join falls back to documented defaults for those.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SwingMetadata {
    #[serde(default)]
    pub swing_id: String,
    #[serde(default)]
    pub golfer_id: Option<String>,
    #[serde(default = "unknown_club")]
    pub club_type: String,
    #[serde(default)]
    pub camera_distance_ft: Option<f32>,
    #[serde(default)]
    pub camera_height_ft: Option<f32>,
    #[serde(default)]
    pub angle_type: Option<String>,
    /// Capture time in fractional Unix seconds.
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub frame_count: usize,
    #[serde(default = "uncalibrated")]
    pub px_per_inch: f32,
}

impl SwingMetadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        golfer_id: impl Into<String>,
        club_type: impl Into<String>,
        camera_distance_ft: f32,
        camera_height_ft: f32,
        angle: AngleType,
        captured_at: OffsetDateTime,
        frame_count: usize,
        px_per_inch: f32,
    ) -> Self {
        let golfer_id = golfer_id.into();
        let club_type = club_type.into();
        let swing_id = format!(
            "{}_{}_{}_{}",
            id_component(&golfer_id),
            id_component(&club_type),
            angle.as_str(),
            captured_at.unix_timestamp()
        );
        Self {
            swing_id,
            golfer_id: Some(golfer_id),
            club_type,
            camera_distance_ft: Some(camera_distance_ft),
            camera_height_ft: Some(camera_height_ft),
            angle_type: Some(angle.as_str().to_string()),
            timestamp: captured_at.unix_timestamp_nanos() as f64 / 1e9,
            frame_count,
            px_per_inch,
        }
    }

    pub fn angle(&self) -> Option<AngleType> {
        self.angle_type.as_deref().and_then(AngleType::recognize)
    }
}
