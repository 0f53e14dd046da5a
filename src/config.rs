use crate::{
    animation::{BoneMask, Interpolation},
    kt_error::KtError,
    types::BoneId,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for playing an animation back onto a skeleton. Usually loaded
/// from a YAML file such as:
/// ```yaml
/// interpolation: spline
/// weight: 0.5
/// mask: [shoulder_left, elbow_left, wrist_left, hand_left]
/// ```
/// Missing fields take their default values. No mask means every bone.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(default)]
pub struct PlaybackOptions {
    pub interpolation: Interpolation,
    pub weight: f32,
    pub scale: f32,
    pub mask: Option<Vec<BoneId>>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Linear,
            weight: 1.0f32,
            scale: 1.0f32,
            mask: None,
        }
    }
}

impl PlaybackOptions {
    /// # Errors
    /// May return `KtError`
    pub fn from_yaml_str(yaml: &str) -> Result<Self, KtError> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    /// May return `KtError`
    pub fn load(path: &Path) -> Result<Self, KtError> {
        debug!("loading playback options from {:?}", path);
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// The mask as a `BoneMask`, selecting every bone if none was given
    #[must_use]
    pub fn bone_mask(&self) -> BoneMask {
        self.mask
            .as_ref()
            .map_or_else(BoneMask::all, |m| m.iter().copied().collect())
    }

    fn validate(&self) -> Result<(), KtError> {
        if !self.weight.is_finite() {
            return Err(KtError::InvalidOption(format!(
                "weight {} is not finite",
                self.weight
            )));
        }
        if !self.scale.is_finite() {
            return Err(KtError::InvalidOption(format!(
                "scale {} is not finite",
                self.scale
            )));
        }
        Ok(())
    }
}
