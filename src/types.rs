use crate::kt_error::KtError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Number of bones in the fixed skeleton topology. This matches the joint
/// set reported by the capture device and can't be changed at runtime.
pub const BONE_COUNT: usize = 20;

/// Identifier for one bone of the fixed skeleton. The discriminants are the
/// capture device joint indices, so `BoneId::HipCenter as usize == 0`.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BoneId {
    HipCenter,
    Spine,
    ShoulderCenter,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

/// Parent of each bone, indexed by `BoneId::index`. The root has no parent.
const PARENTS: [Option<BoneId>; BONE_COUNT] = [
    None,                          // HipCenter
    Some(BoneId::HipCenter),       // Spine
    Some(BoneId::Spine),           // ShoulderCenter
    Some(BoneId::ShoulderCenter),  // Head
    Some(BoneId::ShoulderCenter),  // ShoulderLeft
    Some(BoneId::ShoulderLeft),    // ElbowLeft
    Some(BoneId::ElbowLeft),       // WristLeft
    Some(BoneId::WristLeft),       // HandLeft
    Some(BoneId::ShoulderCenter),  // ShoulderRight
    Some(BoneId::ShoulderRight),   // ElbowRight
    Some(BoneId::ElbowRight),      // WristRight
    Some(BoneId::WristRight),      // HandRight
    Some(BoneId::HipCenter),       // HipLeft
    Some(BoneId::HipLeft),         // KneeLeft
    Some(BoneId::KneeLeft),        // AnkleLeft
    Some(BoneId::AnkleLeft),       // FootLeft
    Some(BoneId::HipCenter),       // HipRight
    Some(BoneId::HipRight),        // KneeRight
    Some(BoneId::KneeRight),       // AnkleRight
    Some(BoneId::AnkleRight),      // FootRight
];

const NAMES: [&str; BONE_COUNT] = [
    "hip_center",
    "spine",
    "shoulder_center",
    "head",
    "shoulder_left",
    "elbow_left",
    "wrist_left",
    "hand_left",
    "shoulder_right",
    "elbow_right",
    "wrist_right",
    "hand_right",
    "hip_left",
    "knee_left",
    "ankle_left",
    "foot_left",
    "hip_right",
    "knee_right",
    "ankle_right",
    "foot_right",
];

impl BoneId {
    /// Every bone in index order. Parents always come before their children.
    pub const ALL: [Self; BONE_COUNT] = [
        Self::HipCenter,
        Self::Spine,
        Self::ShoulderCenter,
        Self::Head,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
    ];

    /// The root of the hierarchy
    pub const ROOT: Self = Self::HipCenter;

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        PARENTS[self as usize]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Bones whose parent is `self`, in index order
    #[must_use]
    pub fn children(self) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |b| b.parent() == Some(self))
    }
}

impl fmt::Display for BoneId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<usize> for BoneId {
    type Error = KtError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(KtError::BoneOutOfRange(index))
    }
}

impl FromStr for BoneId {
    type Err = KtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .position(|name| *name == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| KtError::UnknownBone(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_match_table() {
        for (i, bone) in BoneId::ALL.iter().enumerate() {
            assert_eq!(bone.index(), i);
        }
    }

    #[test]
    fn parents_precede_children() {
        for bone in BoneId::ALL {
            if let Some(parent) = bone.parent() {
                assert!(parent.index() < bone.index());
            } else {
                assert_eq!(bone, BoneId::ROOT);
            }
        }
    }

    #[test]
    fn children() {
        let c: Vec<BoneId> = BoneId::ShoulderCenter.children().collect();
        assert_eq!(
            c,
            vec![BoneId::Head, BoneId::ShoulderLeft, BoneId::ShoulderRight]
        );
        assert_eq!(BoneId::HandLeft.children().count(), 0);
    }

    #[test]
    fn names() {
        assert_eq!("knee_right".parse::<BoneId>().unwrap(), BoneId::KneeRight);
        assert_eq!(BoneId::WristLeft.to_string(), "wrist_left");
        assert!(matches!(
            "tail".parse::<BoneId>(),
            Err(KtError::UnknownBone(_))
        ));
    }

    #[test]
    fn try_from_index() {
        assert_eq!(BoneId::try_from(3).unwrap(), BoneId::Head);
        assert!(matches!(
            BoneId::try_from(BONE_COUNT),
            Err(KtError::BoneOutOfRange(20))
        ));
    }
}
