use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Static physical and skill profile of a registered golfer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GolferProfile {
    pub height_cm: f32,
    pub weight_kg: f32,
    /// Free text; only its first letter feeds the feature vector.
    pub gender: String,
    pub age: u32,
    pub handicap: f32,
    pub years_playing: f32,
    pub dominant_hand: String,
}

impl GolferProfile {
    pub const FALLBACK_HEIGHT_CM: f32 = 175.0;
    pub const FALLBACK_WEIGHT_KG: f32 = 75.0;
    pub const FALLBACK_HANDICAP: f32 = 15.0;
    pub const FALLBACK_YEARS_PLAYING: f32 = 5.0;

    /// Profile substituted when a recording references an unknown golfer.
    pub fn fallback() -> Self {
        Self {
            height_cm: Self::FALLBACK_HEIGHT_CM,
            weight_kg: Self::FALLBACK_WEIGHT_KG,
            gender: "unknown".to_string(),
            age: 0,
            handicap: Self::FALLBACK_HANDICAP,
            years_playing: Self::FALLBACK_YEARS_PLAYING,
            dominant_hand: "right".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(DomainError::validation("height must be a positive number"));
        }
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(DomainError::validation("weight must be a positive number"));
        }
        if !self.handicap.is_finite() {
            return Err(DomainError::validation("handicap must be a number"));
        }
        if !(self.years_playing.is_finite() && self.years_playing >= 0.0) {
            return Err(DomainError::validation(
                "years playing cannot be negative",
            ));
        }
        Ok(())
    }

    pub fn is_male(&self) -> bool {
        self.gender.to_lowercase().starts_with('m')
    }

    pub fn is_female(&self) -> bool {
        self.gender.to_lowercase().starts_with('f')
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GolferRecord {
    pub golfer_id: String,
    pub profile: GolferProfile,
}

impl GolferRecord {
    pub fn new(golfer_id: impl Into<String>, profile: GolferProfile) -> Self {
        Self {
            golfer_id: golfer_id.into(),
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: &str) -> GolferProfile {
        GolferProfile {
            gender: gender.to_string(),
            ..GolferProfile::fallback()
        }
    }

    #[test]
    fn gender_flags_are_prefix_based() {
        assert!(profile("Male").is_male());
        assert!(profile("m").is_male());
        assert!(profile("F").is_female());
        let other = profile("other");
        assert!(!other.is_male() && !other.is_female());
        assert!(!profile("").is_male());
    }

    #[test]
    fn fallback_is_neither_male_nor_female() {
        let fallback = GolferProfile::fallback();
        assert!(!fallback.is_male());
        assert!(!fallback.is_female());
        assert!(fallback.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_measurements() {
        let mut bad = GolferProfile::fallback();
        bad.height_cm = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = GolferProfile::fallback();
        bad.years_playing = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = GolferProfile::fallback();
        bad.handicap = f32::NAN;
        assert!(bad.validate().is_err());
    }
}
