use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::features::{MetadataFeatures, FEATURE_NAMES};
use crate::sequence::NormalizedSequence;
use crate::DomainError;

/// One labeled recording, ready for training.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DatasetRow {
    pub file_name: String,
    pub category: Category,
    pub club_type: String,
    pub keypoints: NormalizedSequence,
    pub features: MetadataFeatures,
    /// One-hot over [`Category::ALL`].
    pub labels: [u8; 4],
}

impl DatasetRow {
    pub fn new(
        file_name: impl Into<String>,
        category: Category,
        club_type: impl Into<String>,
        keypoints: NormalizedSequence,
        features: MetadataFeatures,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            category,
            club_type: club_type.into(),
            keypoints,
            features,
            labels: category.one_hot(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: DatasetRow) {
        self.rows.push(row);
    }

    pub fn count_by_category(&self, category: Category) -> usize {
        self.rows
            .iter()
            .filter(|row| row.category == category)
            .count()
    }

    /// Shuffled train/test split, reproducible for a given seed.
    ///
    /// The test side receives `ceil(len * test_fraction)` rows.
    pub fn split(&self, test_fraction: f64, seed: u64) -> Result<(Dataset, Dataset), DomainError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(DomainError::validation(
                "test fraction must be between 0 and 1",
            ));
        }
        let test_len = (self.len() as f64 * test_fraction).ceil() as usize;
        if self.len() < 2 || test_len >= self.len() {
            return Err(DomainError::validation(format!(
                "cannot split {} rows with test fraction {}",
                self.len(),
                test_fraction
            )));
        }
        let mut indices: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
        let (test_idx, train_idx) = indices.split_at(test_len);
        let pick = |idx: &[usize]| Dataset::new(idx.iter().map(|&i| self.rows[i].clone()).collect());
        Ok((pick(train_idx), pick(test_idx)))
    }

    /// Keypoints as `rows x time x keypoint`.
    pub fn pose_tensor(&self) -> Result<Array3<f32>, DomainError> {
        let (steps, width) = self
            .rows
            .first()
            .map(|row| (row.keypoints.len(), row.keypoints.width()))
            .unwrap_or((0, 0));
        let flat: Vec<f32> = self
            .rows
            .iter()
            .flat_map(|row| row.keypoints.frames().iter().flatten().copied())
            .collect();
        Array3::from_shape_vec((self.len(), steps, width), flat)
            .map_err(|err| DomainError::validation(format!("ragged keypoint tensor: {}", err)))
    }

    pub fn feature_matrix(&self) -> Array2<f32> {
        let mut matrix = Array2::zeros((self.len(), FEATURE_NAMES.len()));
        for (mut out, row) in matrix.rows_mut().into_iter().zip(&self.rows) {
            for (cell, value) in out.iter_mut().zip(row.features.to_array()) {
                *cell = value;
            }
        }
        matrix
    }

    pub fn label_matrix(&self) -> Array2<f32> {
        let mut matrix = Array2::zeros((self.len(), Category::ALL.len()));
        for (mut out, row) in matrix.rows_mut().into_iter().zip(&self.rows) {
            for (cell, value) in out.iter_mut().zip(row.labels) {
                *cell = value as f32;
            }
        }
        matrix
    }
}
