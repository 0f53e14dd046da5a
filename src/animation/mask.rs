use crate::types::{BoneId, BONE_COUNT};
use smallvec::SmallVec;

/// Set of bones an `Animation::apply` call is allowed to touch. Kept sorted
/// by bone index with no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoneMask {
    bones: SmallVec<[BoneId; BONE_COUNT]>,
}

impl BoneMask {
    /// Mask selecting every bone
    #[must_use]
    pub fn all() -> Self {
        BoneId::ALL.into_iter().collect()
    }

    /// Mask selecting no bones
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds a bone. Returns false if it was already present.
    pub fn insert(&mut self, bone: BoneId) -> bool {
        match self.bones.binary_search(&bone) {
            Ok(_) => false,
            Err(i) => {
                self.bones.insert(i, bone);
                true
            }
        }
    }

    /// Removes a bone. Returns false if it wasn't present.
    pub fn remove(&mut self, bone: BoneId) -> bool {
        match self.bones.binary_search(&bone) {
            Ok(i) => {
                self.bones.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    #[must_use]
    pub fn contains(&self, bone: BoneId) -> bool {
        self.bones.binary_search(&bone).is_ok()
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = BoneId> + '_ {
        self.bones.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Adds `bone` and every bone below it in the hierarchy
    pub fn insert_subtree(&mut self, bone: BoneId) {
        self.insert(bone);
        for child in bone.children() {
            self.insert_subtree(child);
        }
    }
}

impl FromIterator<BoneId> for BoneMask {
    fn from_iter<I: IntoIterator<Item = BoneId>>(iter: I) -> Self {
        let mut mask = Self::default();
        for bone in iter {
            mask.insert(bone);
        }
        mask
    }
}

impl Extend<BoneId> for BoneMask {
    fn extend<I: IntoIterator<Item = BoneId>>(&mut self, iter: I) {
        for bone in iter {
            self.insert(bone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_duplicates() {
        let mask: BoneMask =
            [BoneId::Head, BoneId::Spine, BoneId::Head].into_iter().collect();
        assert_eq!(mask.len(), 2);
        // Sorted regardless of insertion order
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![BoneId::Spine, BoneId::Head]
        );
    }

    #[test]
    fn insert_remove() {
        let mut mask = BoneMask::none();
        assert!(mask.insert(BoneId::KneeLeft));
        assert!(!mask.insert(BoneId::KneeLeft));
        assert!(mask.contains(BoneId::KneeLeft));
        assert!(mask.remove(BoneId::KneeLeft));
        assert!(!mask.remove(BoneId::KneeLeft));
        assert!(mask.is_empty());
    }

    #[test]
    fn all_bones() {
        let mask = BoneMask::all();
        assert_eq!(mask.len(), BONE_COUNT);
        assert!(BoneId::ALL.iter().all(|b| mask.contains(*b)));
    }

    #[test]
    fn subtree() {
        let mut mask = BoneMask::none();
        mask.insert_subtree(BoneId::ShoulderLeft);
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![
                BoneId::ShoulderLeft,
                BoneId::ElbowLeft,
                BoneId::WristLeft,
                BoneId::HandLeft
            ]
        );
    }
}
