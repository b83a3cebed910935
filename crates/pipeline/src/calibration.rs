use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Pixel scale measured from a reference club held upright in frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Calibration {
    pub px_per_inch: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self { px_per_inch: 1.0 }
    }
}

impl Calibration {
    pub fn from_reference(club_length_px: f32, club_length_in: f32) -> Result<Self> {
        if !(club_length_px.is_finite() && club_length_px > 0.0) {
            bail!("club length in pixels must be positive, got {}", club_length_px);
        }
        if !(club_length_in.is_finite() && club_length_in > 0.0) {
            bail!("club length in inches must be positive, got {}", club_length_in);
        }
        Ok(Self {
            px_per_inch: club_length_px / club_length_in,
        })
    }

    /// Loads a saved calibration; an uncalibrated setup yields the default.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            debug!(path = %path_ref.display(), "no calibration file, using 1.0 px/in");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading calibration {}", path_ref.display()))?;
        let px_per_inch: f32 = contents
            .trim()
            .parse()
            .with_context(|| format!("parsing calibration {}", path_ref.display()))?;
        if !(px_per_inch.is_finite() && px_per_inch > 0.0) {
            bail!("calibration {} is not a positive scale", path_ref.display());
        }
        Ok(Self { px_per_inch })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path_ref, self.px_per_inch.to_string())
            .with_context(|| format!("writing calibration {}", path_ref.display()))?;
        info!(px_per_inch = self.px_per_inch, "saved calibration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn scale_is_pixels_over_inches() {
        let calibration = Calibration::from_reference(300.0, 37.5).unwrap();
        assert_relative_eq!(calibration.px_per_inch, 8.0);
        assert!(Calibration::from_reference(300.0, 0.0).is_err());
        assert!(Calibration::from_reference(-1.0, 37.0).is_err());
    }

    #[test]
    fn missing_file_means_uncalibrated() {
        let dir = tempdir().unwrap();
        let calibration = Calibration::load(dir.path().join("calibration.txt")).unwrap();
        assert_eq!(calibration.px_per_inch, 1.0);
    }

    #[test]
    fn saved_scale_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("calibration.txt");
        let calibration = Calibration::from_reference(300.0, 36.0).unwrap();
        calibration.save(&path).unwrap();
        let loaded = Calibration::load(&path).unwrap();
        assert_relative_eq!(loaded.px_per_inch, calibration.px_per_inch);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calibration.txt");
        fs::write(&path, "not a number").unwrap();
        assert!(Calibration::load(&path).is_err());
    }
}
