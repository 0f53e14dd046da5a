use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

/// How an `Animation` fills the time between keyframes. One setting applies
/// to every track of the animation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    Spline,
}

/// A time stamped sample owned by a `Track`.
///
/// `index` is the position of the keyframe within its track. It is not
/// independent state: the track rewrites it after every insertion or
/// deletion.
pub trait KeyFrame {
    fn new(time: f32) -> Self;
    fn time(&self) -> f32;
    fn index(&self) -> usize;
    fn set_index(&mut self, index: usize);
}

/// Keyframe holding a full bone transform
#[derive(Clone, Debug, PartialEq)]
pub struct TransformKeyFrame {
    time: f32,
    index: usize,
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    /// Rotation relative to the skeleton root rather than the parent bone.
    /// Only spline sampling fills this in.
    pub abs_rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl KeyFrame for TransformKeyFrame {
    fn new(time: f32) -> Self {
        Self {
            time,
            index: 0,
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::Quat::identity(),
            abs_rotation: glm::Quat::identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl TransformKeyFrame {
    /// Copies the transform channels of `other`, leaving time and index
    /// alone
    pub fn copy_transform(&mut self, other: &Self) {
        self.translation = other.translation;
        self.rotation = other.rotation;
        self.abs_rotation = other.abs_rotation;
        self.scale = other.scale;
    }

    /// Sets the rotation, normalizing it first
    pub fn set_rotation(&mut self, rotation: &glm::Quat) {
        self.rotation = glm::quat_normalize(rotation);
    }

    /// Sets the absolute rotation, normalizing it first
    pub fn set_abs_rotation(&mut self, rotation: &glm::Quat) {
        self.abs_rotation = glm::quat_normalize(rotation);
    }

    /// True if every transform channel matches `other` exactly
    #[must_use]
    pub fn same_transform(&self, other: &Self) -> bool {
        self.translation == other.translation
            && self.rotation == other.rotation
            && self.abs_rotation == other.abs_rotation
            && self.scale == other.scale
    }
}
