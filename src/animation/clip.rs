use super::{bone_track::BoneTrack, mask::BoneMask, types::Interpolation};
use crate::{config::PlaybackOptions, skeleton::Skeleton, types::BoneId};
use ahash::{HashMap, HashMapExt};
use itertools::Itertools;
use log::{debug, info};
use nalgebra_glm as glm;
use std::mem::size_of;

/// Rough size of one stored keyframe, for display only
const KEYFRAME_SIZE: usize =
    size_of::<f32>() + 2 * size_of::<glm::Vec3>() + size_of::<glm::Quat>();

/// Named set of bone tracks sharing one interpolation setting
#[derive(Clone, Debug)]
pub struct Animation {
    name: String,
    interpolation: Interpolation,
    tracks: HashMap<BoneId, BoneTrack>,
}

impl Animation {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interpolation: Interpolation::default(),
            tracks: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Returns the track for `bone`, creating an empty one if there isn't
    /// one yet
    pub fn create_bone_track(&mut self, bone: BoneId) -> &mut BoneTrack {
        self.tracks.entry(bone).or_insert_with(|| {
            debug!("animation {:?} track created for {}", self.name, bone);
            BoneTrack::new(bone)
        })
    }

    /// Removes the track for `bone` and returns it
    pub fn delete_bone_track(&mut self, bone: BoneId) -> Option<BoneTrack> {
        self.tracks.remove(&bone)
    }

    pub fn delete_all_bone_tracks(&mut self) {
        self.tracks.clear();
    }

    /// # Panics
    /// Will panic if there is no track for `bone`. Use `get_bone_track` when
    /// the track may be missing.
    #[must_use]
    pub fn bone_track(&self, bone: BoneId) -> &BoneTrack {
        &self.tracks[&bone]
    }

    #[must_use]
    pub fn get_bone_track(&self, bone: BoneId) -> Option<&BoneTrack> {
        self.tracks.get(&bone)
    }

    pub fn get_bone_track_mut(&mut self, bone: BoneId) -> Option<&mut BoneTrack> {
        self.tracks.get_mut(&bone)
    }

    #[must_use]
    pub fn has_bone_track(&self, bone: BoneId) -> bool {
        self.tracks.contains_key(&bone)
    }

    #[must_use]
    pub fn num_bone_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Tracks in bone index order
    #[must_use]
    pub fn bone_tracks(&self) -> impl Iterator<Item = &BoneTrack> {
        self.tracks.values().sorted_by_key(|track| track.bone())
    }

    #[must_use]
    pub const fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Changes the interpolation used by every track.
    ///
    /// Switching to spline builds any spline cache that hasn't been built
    /// yet, so the first sample doesn't pay for it. Caches that already
    /// exist are left alone even if keyframes changed since they were
    /// built; use `rebuild_splines` for that.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
        if interpolation == Interpolation::Spline {
            for track in self.tracks.values_mut() {
                track.ensure_splines();
            }
        }
    }

    /// Rebuilds the spline cache of every track from its current keyframes
    pub fn rebuild_splines(&mut self) {
        for track in self.tracks.values_mut() {
            track.rebuild_splines();
        }
    }

    /// Samples every track at `time` and blends the results into
    /// `skeleton`. Only bones in `mask` are visited, or every bone if it is
    /// `None`. Tracks for bones the skeleton doesn't have are skipped.
    pub fn apply(
        &mut self,
        skeleton: &mut Skeleton,
        time: f32,
        weight: f32,
        scale: f32,
        mask: Option<&BoneMask>,
    ) {
        let interpolation = self.interpolation;
        match mask {
            Some(mask) => {
                for bone in mask.iter() {
                    if let Some(track) = self.tracks.get_mut(&bone) {
                        track.apply(skeleton, time, weight, scale, interpolation);
                    }
                }
            }
            None => {
                for track in self.tracks.values_mut() {
                    track.apply(skeleton, time, weight, scale, interpolation);
                }
            }
        }
    }

    /// `apply` with weight, scale, mask and interpolation taken from
    /// `options`
    pub fn apply_options(
        &mut self,
        skeleton: &mut Skeleton,
        time: f32,
        options: &PlaybackOptions,
    ) {
        if options.interpolation != self.interpolation {
            self.set_interpolation(options.interpolation);
        }
        let mask = options.bone_mask();
        self.apply(skeleton, time, options.weight, options.scale, Some(&mask));
    }

    /// Time of the last keyframe over all tracks, or 0 with no tracks
    #[must_use]
    pub fn length(&self) -> f32 {
        self.tracks
            .values()
            .map(|track| track.length())
            .reduce(f32::max)
            .unwrap_or(0.0)
    }

    /// Approximate memory used by the keyframes, for display
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.tracks
            .values()
            .map(|track| track.num_key_frames() * KEYFRAME_SIZE)
            .sum()
    }

    /// Removes redundant keyframes from every track. Returns the number of
    /// keyframes removed.
    pub fn optimise(&mut self) -> usize {
        let removed: usize =
            self.tracks.values_mut().map(BoneTrack::optimise).sum();
        info!(
            "animation {:?} optimised, {} keyframes removed",
            self.name, removed
        );
        removed
    }
}
