use super::{
    track::Track,
    types::{Interpolation, KeyFrame, TransformKeyFrame},
};
use crate::{
    quat,
    skeleton::Skeleton,
    spline::{RotationalSpline, Spline},
    types::BoneId,
};
use itertools::Itertools;
use log::{debug, trace};
use nalgebra_glm as glm;
use std::ops::{Deref, DerefMut};

/// Splines through every keyframe of a `BoneTrack`, one per channel.
///
/// The cache counts as built once it holds any points. It is not updated
/// when keyframes change afterwards. Call `BoneTrack::rebuild_splines` after
/// editing a track that has already been sampled in spline mode.
#[derive(Clone, Debug, Default)]
pub struct TrackSplines {
    pub translation: Spline<glm::Vec3>,
    pub rotation: RotationalSpline,
    pub abs_rotation: RotationalSpline,
    pub scale: Spline<glm::Vec3>,
}

impl TrackSplines {
    #[must_use]
    pub fn is_built(&self) -> bool {
        !self.translation.is_empty()
    }

    fn build(&mut self, key_frames: &[TransformKeyFrame]) {
        self.clear();
        let Some(first) = key_frames.first() else {
            return;
        };
        let mut rotation = first.rotation;
        let mut abs_rotation = first.abs_rotation;
        for kf in key_frames {
            // q and -q are the same rotation but squad needs neighbouring
            // points in the same hemisphere
            rotation = same_hemisphere(&rotation, &kf.rotation);
            abs_rotation = same_hemisphere(&abs_rotation, &kf.abs_rotation);
            self.translation.add_control_point(kf.translation);
            self.rotation.add_control_point(rotation);
            self.abs_rotation.add_control_point(abs_rotation);
            self.scale.add_control_point(kf.scale);
        }
        self.translation.calc_tangents();
        self.rotation.calc_tangents();
        self.abs_rotation.calc_tangents();
        self.scale.calc_tangents();
    }

    fn clear(&mut self) {
        self.translation.clear();
        self.rotation.clear();
        self.abs_rotation.clear();
        self.scale.clear();
    }
}

/// `q` or `-q`, whichever is closer to `prev`
fn same_hemisphere(prev: &glm::Quat, q: &glm::Quat) -> glm::Quat {
    if prev.coords.dot(&q.coords) < 0.0 {
        -*q
    } else {
        *q
    }
}

/// Keyframe track driving one bone.
///
/// Derefs to the underlying `Track` for keyframe editing and raw access.
#[derive(Clone, Debug)]
pub struct BoneTrack {
    bone: BoneId,
    track: Track<TransformKeyFrame>,
    splines: TrackSplines,
}

impl Deref for BoneTrack {
    type Target = Track<TransformKeyFrame>;

    fn deref(&self) -> &Self::Target {
        &self.track
    }
}

impl DerefMut for BoneTrack {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.track
    }
}

impl BoneTrack {
    #[must_use]
    pub fn new(bone: BoneId) -> Self {
        Self {
            bone,
            track: Track::new(),
            splines: TrackSplines::default(),
        }
    }

    #[must_use]
    pub const fn bone(&self) -> BoneId {
        self.bone
    }

    #[must_use]
    pub const fn splines(&self) -> &TrackSplines {
        &self.splines
    }

    /// Builds the spline cache from the current keyframes unless it has
    /// already been built
    pub fn ensure_splines(&mut self) {
        if !self.splines.is_built() {
            self.rebuild_splines();
        }
    }

    /// Rebuilds the spline cache from the current keyframes
    pub fn rebuild_splines(&mut self) {
        self.splines.build(self.track.key_frames());
        debug!(
            "bone {} splines built from {} keyframes",
            self.bone,
            self.track.num_key_frames()
        );
    }

    /// Samples the track at `time`. Returns `None` if the track has no
    /// keyframes.
    ///
    /// A sample that lands exactly on a keyframe copies it without any
    /// arithmetic. Spline sampling builds the spline cache first if needed,
    /// which is why this takes `&mut self`.
    pub fn interpolated_key_frame(
        &mut self,
        time: f32,
        interpolation: Interpolation,
    ) -> Option<TransformKeyFrame> {
        if interpolation == Interpolation::Spline {
            self.ensure_splines();
        }
        self.sample(time, interpolation)
    }

    /// Same as `interpolated_key_frame` but never builds the spline cache.
    /// Spline sampling with an unbuilt cache returns the earlier keyframe.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn sample(
        &self,
        time: f32,
        interpolation: Interpolation,
    ) -> Option<TransformKeyFrame> {
        let pair = self.track.key_frames_at_time(time);
        let (k1, k2) = (pair.first?, pair.second?);
        let t = pair.t;

        let mut ret = TransformKeyFrame::new(time);
        ret.set_index(k1.index());
        if t == 0.0 {
            ret.copy_transform(k1);
            return Some(ret);
        }
        if t == 1.0 {
            ret.copy_transform(k2);
            return Some(ret);
        }

        match interpolation {
            Interpolation::Linear => {
                ret.translation = glm::lerp(&k1.translation, &k2.translation, t);
                ret.rotation = glm::quat_normalize(&quat::slerp(
                    &k1.rotation,
                    &k2.rotation,
                    t,
                ));
                ret.scale = glm::lerp(&k1.scale, &k2.scale, t);
            }
            Interpolation::Spline => {
                if !self.splines.is_built() {
                    trace!("bone {} spline cache not built", self.bone);
                    ret.copy_transform(k1);
                    return Some(ret);
                }
                let i = k1.index();
                ret.translation = self.splines.translation.point_at(i, t);
                ret.rotation = self.splines.rotation.point_at(i, t);
                ret.abs_rotation = self.splines.abs_rotation.point_at(i, t);
                ret.scale = self.splines.scale.point_at(i, t);
            }
        }
        Some(ret)
    }

    /// Samples the track at `time` and blends the result into this track's
    /// bone of `skeleton`. Does nothing if the skeleton has no such bone or
    /// the track is empty.
    ///
    /// The blend moves each channel away from identity by `weight`:
    /// translation is scaled by `weight * scale`, rotation is slerped from
    /// identity by `weight` and scale becomes
    /// `1 + (1 - sample) * weight * scale`.
    pub fn apply(
        &mut self,
        skeleton: &mut Skeleton,
        time: f32,
        weight: f32,
        scale: f32,
        interpolation: Interpolation,
    ) {
        if skeleton.bone(self.bone).is_none() {
            trace!("bone {} not in skeleton", self.bone);
            return;
        }
        let Some(kf) = self.interpolated_key_frame(time, interpolation) else {
            return;
        };
        let Some(bone) = skeleton.bone_mut(self.bone) else {
            return;
        };
        let ones = glm::vec3(1.0, 1.0, 1.0);
        bone.translation = kf.translation * (weight * scale);
        bone.rotation =
            quat::slerp(&glm::Quat::identity(), &kf.rotation, weight);
        bone.scale = ones + (ones - kf.scale) * (weight * scale);
    }

    /// Removes interior keyframes whose transform exactly matches both
    /// neighbours. Linear sampling gives the same poses before and after,
    /// up to rounding. Returns the number of keyframes removed.
    pub fn optimise(&mut self) -> usize {
        let redundant: Vec<usize> = self
            .track
            .key_frames()
            .iter()
            .tuple_windows()
            .filter(|(prev, cur, next)| {
                cur.same_transform(prev) && cur.same_transform(next)
            })
            .map(|(_, cur, _)| cur.index())
            .collect();
        self.track.delete_key_frames(&redundant);
        if !redundant.is_empty() {
            debug!(
                "bone {} optimised away {} keyframes",
                self.bone,
                redundant.len()
            );
        }
        redundant.len()
    }
}
