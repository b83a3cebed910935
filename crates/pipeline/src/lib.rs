pub mod assembler;
pub mod calibration;
pub mod config;
pub mod evaluation;
pub mod inference;
pub mod joiner;
pub mod keypoints;
pub mod recording;

pub use assembler::{AssemblyReport, CategoryRoots, DatasetAssembler, SkipReason, SkippedRecording};
pub use calibration::Calibration;
pub use config::PipelineConfig;
pub use evaluation::{ClassReport, ConfusionMatrix, Prediction};
pub use inference::{analyze, InferenceInput, SwingAnalysis, SwingScorer};
pub use joiner::MetadataJoiner;
pub use recording::{discover_recordings, RecordingFiles, RecordingWriter};
