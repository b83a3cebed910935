use serde::{Deserialize, Serialize};

use crate::golfer::GolferProfile;
use crate::recording::{AngleType, SwingMetadata};

pub const DEFAULT_CAMERA_DISTANCE_FT: f32 = 12.0;
pub const DEFAULT_CAMERA_HEIGHT_FT: f32 = 4.0;

/// Column names of [`MetadataFeatures::to_array`], in order.
pub const FEATURE_NAMES: [&str; 10] = [
    "height_cm",
    "weight_kg",
    "handicap",
    "experience_years",
    "male",
    "female",
    "camera_distance_ft",
    "camera_height_ft",
    "face_on",
    "down_the_line",
];

/// Golfer and recording-condition features for one swing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetadataFeatures {
    pub height_cm: f32,
    pub weight_kg: f32,
    pub handicap: f32,
    pub experience_years: f32,
    pub male: f32,
    pub female: f32,
    pub camera_distance_ft: f32,
    pub camera_height_ft: f32,
    pub face_on: f32,
    pub down_the_line: f32,
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl MetadataFeatures {
    pub fn from_parts(profile: &GolferProfile, metadata: &SwingMetadata) -> Self {
        let angle = metadata.angle();
        Self {
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            handicap: profile.handicap,
            experience_years: profile.years_playing,
            male: flag(profile.is_male()),
            female: flag(profile.is_female()),
            camera_distance_ft: metadata
                .camera_distance_ft
                .unwrap_or(DEFAULT_CAMERA_DISTANCE_FT),
            camera_height_ft: metadata
                .camera_height_ft
                .unwrap_or(DEFAULT_CAMERA_HEIGHT_FT),
            face_on: flag(angle == Some(AngleType::FaceOn)),
            down_the_line: flag(angle == Some(AngleType::DownTheLine)),
        }
    }

    pub fn to_array(&self) -> [f32; 10] {
        [
            self.height_cm,
            self.weight_kg,
            self.handicap,
            self.experience_years,
            self.male,
            self.female,
            self.camera_distance_ft,
            self.camera_height_ft,
            self.face_on,
            self.down_the_line,
        ]
    }
}
