use super::types::KeyFrame;
use log::trace;

/// Keyframes closer together in time than this are treated as the same
/// keyframe
pub const KEYFRAME_EPSILON: f32 = 1.0e-5;

/// The keyframes either side of a query time and how far between them the
/// query falls. `t` is 0 at `first` and approaches 1 at `second`.
///
/// Both keyframes are `None` for an empty track. Before the first keyframe
/// or after the last one, both refer to that keyframe and `t` is 0.
#[derive(Clone, Copy, Debug)]
pub struct KeyFramePair<'a, K> {
    pub first: Option<&'a K>,
    pub second: Option<&'a K>,
    pub t: f32,
}

impl<'a, K> KeyFramePair<'a, K> {
    const fn same(kf: &'a K) -> Self {
        Self {
            first: Some(kf),
            second: Some(kf),
            t: 0.0,
        }
    }
}

/// Ordered sequence of keyframes for one channel. Keyframe times are
/// strictly increasing and no two are within `KEYFRAME_EPSILON`.
#[derive(Clone, Debug)]
pub struct Track<K> {
    key_frames: Vec<K>,
}

impl<K> Default for Track<K> {
    fn default() -> Self {
        Self {
            key_frames: Vec::new(),
        }
    }
}

impl<K: KeyFrame> Track<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keyframe at `time`, creating it if necessary. An existing
    /// keyframe within `KEYFRAME_EPSILON` of `time` is returned unchanged.
    /// A new keyframe is inserted in time order and the track is reindexed.
    ///
    /// # Panics
    /// Will panic if `time` is NaN or infinite
    pub fn create_key_frame(&mut self, time: f32) -> &mut K {
        assert!(time.is_finite(), "keyframe time {time} is not finite");
        let found = self.key_frames.iter().position(|kf| {
            (kf.time() - time).abs() < KEYFRAME_EPSILON || kf.time() > time
        });
        let index = match found {
            Some(i) if (self.key_frames[i].time() - time).abs()
                < KEYFRAME_EPSILON =>
            {
                trace!("keyframe {} reused for time {}", i, time);
                return &mut self.key_frames[i];
            }
            Some(i) => {
                self.key_frames.insert(i, K::new(time));
                i
            }
            None => {
                self.key_frames.push(K::new(time));
                self.key_frames.len() - 1
            }
        };
        self.reindex();
        trace!(
            "keyframe {} created at time {} count={}",
            index,
            time,
            self.key_frames.len()
        );
        &mut self.key_frames[index]
    }

    /// Removes the keyframe at `index`
    ///
    /// # Panics
    /// Will panic if `index` is out of range
    pub fn delete_key_frame(&mut self, index: usize) {
        self.key_frames.remove(index);
        self.reindex();
    }

    /// Removes every keyframe whose index is in `indices`, which must be
    /// sorted
    pub fn delete_key_frames(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let mut i = 0;
        self.key_frames.retain(|_| {
            let keep = indices.binary_search(&i).is_err();
            i += 1;
            keep
        });
        self.reindex();
    }

    pub fn delete_all_key_frames(&mut self) {
        self.key_frames.clear();
    }

    /// Finds the keyframes bracketing `time` with a binary search
    #[must_use]
    pub fn key_frames_at_time(&self, time: f32) -> KeyFramePair<'_, K> {
        let (Some(first), Some(last)) =
            (self.key_frames.first(), self.key_frames.last())
        else {
            return KeyFramePair {
                first: None,
                second: None,
                t: 0.0,
            };
        };
        if time.is_nan() || time <= first.time() {
            return KeyFramePair::same(first);
        }
        if time >= last.time() {
            return KeyFramePair::same(last);
        }

        // First keyframe after `time`. Can't be 0 or past the end because
        // of the checks above.
        let upper = self.key_frames.partition_point(|kf| kf.time() <= time);
        let k1 = &self.key_frames[upper - 1];
        let k2 = &self.key_frames[upper];
        KeyFramePair {
            first: Some(k1),
            second: Some(k2),
            t: (time - k1.time()) / (k2.time() - k1.time()),
        }
    }

    /// # Panics
    /// Will panic if `index` is out of range
    #[must_use]
    pub fn key_frame(&self, index: usize) -> &K {
        &self.key_frames[index]
    }

    /// # Panics
    /// Will panic if `index` is out of range
    pub fn key_frame_mut(&mut self, index: usize) -> &mut K {
        &mut self.key_frames[index]
    }

    #[must_use]
    pub fn get_key_frame(&self, index: usize) -> Option<&K> {
        self.key_frames.get(index)
    }

    #[must_use]
    pub fn key_frames(&self) -> &[K] {
        &self.key_frames
    }

    #[must_use]
    pub fn num_key_frames(&self) -> usize {
        self.key_frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_frames.is_empty()
    }

    /// Time of the last keyframe, or 0 for an empty track
    #[must_use]
    pub fn length(&self) -> f32 {
        self.key_frames.last().map_or(0.0, KeyFrame::time)
    }

    fn reindex(&mut self) {
        for (i, kf) in self.key_frames.iter_mut().enumerate() {
            kf.set_index(i);
        }
    }
}
