//! World space pose of a skeleton
//!
//! A preview renderer needs bone transforms in world space, which means
//! composing every local pose with its parents. `WorldPose` holds the result
//! of that walk. Callers own it and pass it around explicitly, so several
//! skeletons can be previewed at once and nothing is cached between
//! unrelated calls.
use crate::{
    skeleton::{Bone, Skeleton},
    types::{BoneId, BONE_COUNT},
};
use log::trace;
use nalgebra_glm as glm;

#[derive(Clone, Debug)]
pub struct WorldPose {
    transforms: [glm::Mat4; BONE_COUNT],
    computed: bool,
}

impl Default for WorldPose {
    fn default() -> Self {
        Self {
            transforms: [glm::Mat4::identity(); BONE_COUNT],
            computed: false,
        }
    }
}

impl WorldPose {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for a one off calculation
    #[must_use]
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let mut pose = Self::new();
        pose.compute(skeleton);
        pose
    }

    /// Walks the hierarchy from the root and stores each bone's world
    /// transform. Bones missing from `skeleton` contribute an identity local
    /// transform so their children still get a sensible result.
    pub fn compute(&mut self, skeleton: &Skeleton) {
        self.traverse(skeleton, BoneId::ROOT, &glm::Mat4::identity());
        self.computed = true;
        trace!("world pose computed for {} bones", skeleton.num_bones());
    }

    fn traverse(
        &mut self,
        skeleton: &Skeleton,
        bone: BoneId,
        parent_world: &glm::Mat4,
    ) {
        let local = skeleton
            .bone(bone)
            .map_or_else(glm::Mat4::identity, Bone::local_matrix);
        let world = parent_world * local;
        self.transforms[bone.index()] = world;
        for child in bone.children() {
            self.traverse(skeleton, child, &world);
        }
    }

    #[must_use]
    pub const fn is_computed(&self) -> bool {
        self.computed
    }

    /// Marks the pose as stale, for example after the skeleton changed
    pub fn invalidate(&mut self) {
        self.computed = false;
    }

    /// World transform of `bone`, or `None` before the first `compute`
    #[must_use]
    pub fn world_transform(&self, bone: BoneId) -> Option<&glm::Mat4> {
        if self.computed {
            Some(&self.transforms[bone.index()])
        } else {
            None
        }
    }

    /// World space origin of `bone`, or `None` before the first `compute`
    #[must_use]
    pub fn world_position(&self, bone: BoneId) -> Option<glm::Vec3> {
        self.world_transform(bone)
            .map(|m| glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)]))
    }
}
