use crate::{animation::Animation, types::BoneId};
use log::{debug, warn};
use nalgebra_glm as glm;

/// One bone's transform from a capture frame
#[derive(Clone, Copy, Debug)]
pub struct BoneSample {
    pub bone: BoneId,
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
}

/// Builds an `Animation` from a stream of capture frames.
///
/// Frame times are taken relative to the first recorded frame, so the
/// animation always starts at 0 whatever clock the capture source uses.
#[derive(Clone, Debug)]
pub struct Recorder {
    animation: Animation,
    start_time: Option<f32>,
    frame_count: usize,
}

impl Recorder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            animation: Animation::new(name),
            start_time: None,
            frame_count: 0,
        }
    }

    /// Stores every sample of a frame captured at `time` as a keyframe.
    /// Scale is always 1. Returns the number of samples stored, which is 0
    /// if the frame is earlier than the first recorded frame or its time is
    /// not finite.
    pub fn record_frame(&mut self, time: f32, samples: &[BoneSample]) -> usize {
        if !time.is_finite() {
            warn!("frame time {} is not finite", time);
            return 0;
        }
        let start = *self.start_time.get_or_insert(time);
        let relative = time - start;
        if relative < 0.0 {
            warn!("frame at {} is before recording start {}", time, start);
            return 0;
        }
        for sample in samples {
            let kf = self
                .animation
                .create_bone_track(sample.bone)
                .create_key_frame(relative);
            kf.translation = sample.translation;
            kf.set_rotation(&sample.rotation);
            kf.scale = glm::vec3(1.0, 1.0, 1.0);
        }
        self.frame_count += 1;
        samples.len()
    }

    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Ends the session and hands over the recorded animation
    #[must_use]
    pub fn finish(self) -> Animation {
        debug!(
            "recording {:?} finished, {} frames, length {}",
            self.animation.name(),
            self.frame_count,
            self.animation.length()
        );
        self.animation
    }
}
