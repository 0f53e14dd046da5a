mod bone_track;
mod clip;
mod mask;
mod track;
mod types;

// Re-exports
pub use {
    bone_track::{BoneTrack, TrackSplines},
    clip::Animation,
    mask::BoneMask,
    track::{KeyFramePair, Track, KEYFRAME_EPSILON},
    types::{Interpolation, KeyFrame, TransformKeyFrame},
};
