use crate::types::BoneId;
use ahash::{HashMap, HashMapExt};
use nalgebra_glm as glm;

/// Local pose of one bone, relative to its parent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bone {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Default for Bone {
    fn default() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::Quat::identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }
}

impl Bone {
    /// Returns to the identity pose
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Local transform matrix, translation * rotation * scale
    #[must_use]
    pub fn local_matrix(&self) -> glm::Mat4 {
        let m = glm::translation(&self.translation);
        let m = m * glm::quat_to_mat4(&self.rotation);
        glm::scale(&m, &self.scale)
    }
}

/// Target for animation playback. Holds a pose for some or all of the
/// fixed bones. `Animation::apply` writes into it and a renderer reads
/// from it.
#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: HashMap<BoneId, Bone>,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    /// Skeleton with every bone at the identity pose
    #[must_use]
    pub fn new() -> Self {
        Self::with_bones(BoneId::ALL)
    }

    /// Skeleton with no bones
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bones: HashMap::new(),
        }
    }

    /// Skeleton with only the given bones, each at the identity pose
    #[must_use]
    pub fn with_bones<I: IntoIterator<Item = BoneId>>(bones: I) -> Self {
        let mut skeleton = Self::empty();
        for bone in bones {
            skeleton.add_bone(bone);
        }
        skeleton
    }

    /// Adds a bone at the identity pose. An existing bone keeps its pose.
    pub fn add_bone(&mut self, bone: BoneId) -> &mut Bone {
        self.bones.entry(bone).or_default()
    }

    pub fn remove_bone(&mut self, bone: BoneId) -> Option<Bone> {
        self.bones.remove(&bone)
    }

    #[must_use]
    pub fn bone(&self, bone: BoneId) -> Option<&Bone> {
        self.bones.get(&bone)
    }

    pub fn bone_mut(&mut self, bone: BoneId) -> Option<&mut Bone> {
        self.bones.get_mut(&bone)
    }

    #[must_use]
    pub fn num_bones(&self) -> usize {
        self.bones.len()
    }

    /// Bones in index order
    #[must_use]
    pub fn bones(&self) -> impl Iterator<Item = (BoneId, &Bone)> {
        BoneId::ALL
            .into_iter()
            .filter_map(|id| self.bones.get(&id).map(|bone| (id, bone)))
    }

    /// Puts every bone back to the identity pose
    pub fn reset(&mut self) {
        for bone in self.bones.values_mut() {
            bone.reset();
        }
    }
}
