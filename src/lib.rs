//! Keyframe animation sampling and skeleton blending.
//!
//! Captured motion is stored as sparse keyframes per bone in an
//! [`Animation`](animation::Animation). Sampling at any time gives a pose
//! using linear or Catmull-Rom spline interpolation, which is then blended
//! onto a [`Skeleton`](skeleton::Skeleton) with a weight, a scale and an
//! optional bone mask.
pub mod animation;
pub mod config;
pub mod kt_error;
pub mod pose;
pub mod quat;
pub mod recorder;
pub mod skeleton;
pub mod spline;
pub mod types;
