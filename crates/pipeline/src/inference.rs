use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use swing_domain::{Category, FrameVector, MetadataFeatures, NormalizedSequence};
use tracing::debug;

/// Model input, normalized exactly as the training rows were.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InferenceInput {
    pub sequence: NormalizedSequence,
    pub features: Option<MetadataFeatures>,
}

impl InferenceInput {
    pub fn prepare(raw: &[FrameVector], features: Option<MetadataFeatures>) -> Result<Self> {
        let sequence =
            NormalizedSequence::from_raw(raw).context("normalize keypoints for inference")?;
        Ok(Self { sequence, features })
    }
}

/// A trained classifier producing one score per category, in
/// [`Category::ALL`] order.
pub trait SwingScorer {
    fn score(&self, input: &InferenceInput) -> Result<[f32; 4]>;
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SwingAnalysis {
    pub detected: Category,
    pub confidence: f32,
    pub scores: BTreeMap<Category, f32>,
}

impl SwingAnalysis {
    /// The highest score wins; ties go to the earlier category.
    pub fn from_scores(scores: [f32; 4]) -> Self {
        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }
        Self {
            detected: Category::ALL[best],
            confidence: scores[best],
            scores: Category::ALL.into_iter().zip(scores).collect(),
        }
    }
}

pub fn analyze<S: SwingScorer>(
    scorer: &S,
    raw: &[FrameVector],
    features: Option<MetadataFeatures>,
) -> Result<SwingAnalysis> {
    let input = InferenceInput::prepare(raw, features)?;
    let scores = scorer.score(&input)?;
    let analysis = SwingAnalysis::from_scores(scores);
    debug!(
        detected = %analysis.detected,
        confidence = analysis.confidence,
        "swing analyzed"
    );
    Ok(analysis)
}
