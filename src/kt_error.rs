use std::{error, fmt};

/// Unified error type
///
/// Only configuration loading and bone id conversion return errors. Misuse
/// of the animation containers (an out of range keyframe index, the
/// unchecked bone track accessor on a missing bone) is a programming error
/// and panics instead. Expected absence, such as a bone the target skeleton
/// does not define, is reported with `Option`.
///
/// `serde_yaml::Error` is fairly large so it is boxed.
#[derive(Debug)]
pub enum KtError {
    UnknownBone(String),
    BoneOutOfRange(usize),
    InvalidOption(String),
    StdIoError(std::io::Error),
    SerdeYamlError(Box<serde_yaml::Error>),
}

impl error::Error for KtError {}

impl fmt::Display for KtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownBone(name) => write!(f, "unknown bone name {name:?}"),
            Self::BoneOutOfRange(a) => {
                write!(f, "bone index {a} is outside the skeleton")
            }
            Self::InvalidOption(msg) => {
                write!(f, "invalid playback option: {msg}")
            }
            Self::StdIoError(e) => write!(f, "std::io::Error: {}", e.kind()),
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
        }
    }
}

impl From<serde_yaml::Error> for KtError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}

impl From<std::io::Error> for KtError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}
