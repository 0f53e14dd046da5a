//! Catmull-Rom splines
//!
//! A spline passes through every control point. Each segment between two
//! control points is a cubic Hermite curve whose tangents come from the
//! neighbouring points. Vector points use the usual central difference.
//! Quaternion points build their tangents in log space and evaluate
//! segments with squad, so rotations stay on the unit sphere.
//!
//! Tangents are not updated when points are added. Call `calc_tangents` once
//! all points are in place.
use crate::quat;
use nalgebra_glm as glm;

/// A value that can be used as a spline control point
pub trait SplinePoint: Copy + PartialEq {
    /// Tangent at `current` given the points on either side of it. Missing
    /// neighbours at the ends of an open spline are passed as `current`.
    fn tangent(prev: &Self, current: &Self, next: &Self) -> Self;

    /// Evaluates the segment from `p0` to `p1` at `t`, which is strictly
    /// between 0 and 1
    fn interpolate(p0: &Self, p1: &Self, tan0: &Self, tan1: &Self, t: f32)
        -> Self;
}

/// Cubic Hermite basis functions
fn hermite_basis(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        2.0f32.mul_add(t3, -3.0 * t2) + 1.0,
        (-2.0f32).mul_add(t3, 3.0 * t2),
        (-2.0f32).mul_add(t2, t3) + t,
        t3 - t2,
    ]
}

impl SplinePoint for f32 {
    fn tangent(prev: &Self, _current: &Self, next: &Self) -> Self {
        (next - prev) * 0.5
    }

    fn interpolate(p0: &Self, p1: &Self, tan0: &Self, tan1: &Self, t: f32)
        -> Self {
        let h = hermite_basis(t);
        p0 * h[0] + p1 * h[1] + tan0 * h[2] + tan1 * h[3]
    }
}

impl<const D: usize> SplinePoint for glm::TVec<f32, D> {
    fn tangent(prev: &Self, _current: &Self, next: &Self) -> Self {
        (next - prev) * 0.5
    }

    fn interpolate(p0: &Self, p1: &Self, tan0: &Self, tan1: &Self, t: f32)
        -> Self {
        let h = hermite_basis(t);
        p0 * h[0] + p1 * h[1] + tan0 * h[2] + tan1 * h[3]
    }
}

impl SplinePoint for glm::Quat {
    fn tangent(prev: &Self, current: &Self, next: &Self) -> Self {
        let inv = quat::inverse(current);
        let part1 = quat::log(&(inv * next));
        let part2 = quat::log(&(inv * prev));
        let pre_exp = (part1 + part2) * -0.25;
        current * quat::exp(&pre_exp)
    }

    fn interpolate(p0: &Self, p1: &Self, tan0: &Self, tan1: &Self, t: f32)
        -> Self {
        let slerp_t = 2.0 * t * (1.0 - t);
        let slerp_p = quat::slerp(p0, p1, t);
        let slerp_q = quat::slerp_direct(tan0, tan1, t);
        quat::slerp_direct(&slerp_p, &slerp_q, slerp_t)
    }
}

/// Catmull-Rom spline over control points of type `T`
#[derive(Clone, Debug)]
pub struct Spline<T> {
    points: Vec<T>,
    tangents: Vec<T>,
}

/// Spline through unit quaternions
pub type RotationalSpline = Spline<glm::Quat>;

impl<T> Default for Spline<T> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            tangents: Vec::new(),
        }
    }
}

impl<T: SplinePoint> Spline<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a control point. Tangents are not recalculated.
    pub fn add_control_point(&mut self, p: T) {
        self.points.push(p);
    }

    /// Replaces a control point. Tangents will be recalculated by the next
    /// `calc_tangents` call.
    ///
    /// # Panics
    /// Will panic if `index` is out of range
    pub fn update_point(&mut self, index: usize, p: T) {
        self.points[index] = p;
        self.tangents.clear();
    }

    #[must_use]
    pub fn control_point(&self, index: usize) -> Option<&T> {
        self.points.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True once `calc_tangents` has run for the current control points
    #[must_use]
    pub fn has_tangents(&self) -> bool {
        self.points.len() >= 2 && self.tangents.len() == self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.tangents.clear();
    }

    /// Calculates a tangent for every control point. Does nothing if there
    /// are fewer than two points or the tangents are already up to date.
    ///
    /// A spline whose first and last points are exactly equal is treated as
    /// closed and its end tangents wrap around.
    pub fn calc_tangents(&mut self) {
        let n = self.points.len();
        if n < 2 || self.tangents.len() == n {
            return;
        }
        let closed = self.points[0] == self.points[n - 1];

        self.tangents.clear();
        self.tangents.reserve(n);
        for i in 0..n {
            let current = &self.points[i];
            let prev = if i > 0 {
                &self.points[i - 1]
            } else if closed {
                // Last point is the same as this one
                &self.points[n - 2]
            } else {
                current
            };
            let next = if i + 1 < n {
                &self.points[i + 1]
            } else if closed {
                &self.points[1]
            } else {
                current
            };
            self.tangents.push(T::tangent(prev, current, next));
        }
    }

    /// Evaluates the segment starting at control point `index` at local
    /// parameter `t` in `[0, 1]`. An index on or past the last control point
    /// returns the last control point. The ends of a segment return the
    /// control points themselves without any arithmetic.
    ///
    /// # Panics
    /// Will panic if the spline is empty, or if an interior point is
    /// requested before `calc_tangents`
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn point_at(&self, index: usize, t: f32) -> T {
        assert!(!self.points.is_empty(), "point_at on an empty spline");
        let n = self.points.len();
        if index + 1 >= n {
            return self.points[n - 1];
        }
        if t == 0.0 {
            return self.points[index];
        }
        if t == 1.0 {
            return self.points[index + 1];
        }
        T::interpolate(
            &self.points[index],
            &self.points[index + 1],
            &self.tangents[index],
            &self.tangents[index + 1],
            t,
        )
    }

    /// Evaluates the whole spline at global parameter `t` in `[0, 1]`.
    /// Control points are assumed to be evenly spaced, so this is no good for
    /// keyframes recorded at irregular times. Use `point_at` for those.
    ///
    /// # Panics
    /// Same conditions as `point_at`
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn point(&self, t: f32) -> T {
        let segments = self.points.len().saturating_sub(1);
        let seg = t.clamp(0.0, 1.0) * segments as f32;
        let index = seg as usize;
        self.point_at(index, seg - index as f32)
    }
}

impl<T: SplinePoint> FromIterator<T> for Spline<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
            tangents: Vec::new(),
        }
    }
}
