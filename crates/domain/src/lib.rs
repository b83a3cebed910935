pub mod category;
pub mod dataset;
pub mod error;
pub mod features;
pub mod golfer;
pub mod io;
pub mod keypoints;
pub mod recording;
pub mod sequence;

pub use crate::category::Category;
pub use crate::dataset::{Dataset, DatasetRow};
pub use crate::error::DomainError;
pub use crate::features::{MetadataFeatures, FEATURE_NAMES};
pub use crate::golfer::{GolferProfile, GolferRecord};
pub use crate::io::{DatasetExporter, ExportFormat, JsonExporter};
pub use crate::keypoints::{frame_from_landmarks, FrameVector, Landmark, KEYPOINT_WIDTH};
pub use crate::recording::{AngleType, SwingMetadata};
pub use crate::sequence::{normalize, NormalizedSequence, MAX_CAPTURE_FRAMES, SEQUENCE_LENGTH};
