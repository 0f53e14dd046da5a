//! Quaternion helpers
//!
//! `nalgebra_glm` covers most quaternion needs but its logarithm divides by
//! the length of the vector part, which is NaN for the identity rotation,
//! and its slerp always takes the shortest path. The spline code needs both
//! well defined at identity and a slerp that doesn't flip, so those are
//! implemented here on top of `glm::Quat`.
use nalgebra_glm as glm;

/// Below this the sine of an angle is treated as zero
const LOG_EPSILON: f32 = 1.0e-3;

/// Above this cosine the inputs of a slerp are treated as parallel
const SLERP_EPSILON: f32 = 1.0e-3;

/// Inverse of a quaternion. The zero quaternion has no inverse and is
/// returned unchanged.
#[must_use]
pub fn inverse(q: &glm::Quat) -> glm::Quat {
    let n2 = q.norm_squared();
    if n2 > 0.0 {
        q.conjugate() * (1.0 / n2)
    } else {
        *q
    }
}

/// Logarithm of a unit quaternion. The result is a pure quaternion (scalar
/// part 0) holding the rotation axis scaled by half the rotation angle.
#[must_use]
pub fn log(q: &glm::Quat) -> glm::Quat {
    let c = &q.coords;
    if c.w.abs() < 1.0 {
        let angle = c.w.acos();
        let sin = angle.sin();
        if sin.abs() >= LOG_EPSILON {
            let coeff = angle / sin;
            return glm::quat(c.x * coeff, c.y * coeff, c.z * coeff, 0.0);
        }
    }
    glm::quat(c.x, c.y, c.z, 0.0)
}

/// Exponential of a pure quaternion, the inverse of `log`. The scalar part
/// of the input is ignored.
#[must_use]
pub fn exp(q: &glm::Quat) -> glm::Quat {
    let c = &q.coords;
    let angle = c.z.mul_add(c.z, c.x.mul_add(c.x, c.y * c.y)).sqrt();
    let sin = angle.sin();
    let w = angle.cos();
    if sin.abs() >= LOG_EPSILON {
        let coeff = sin / angle;
        glm::quat(c.x * coeff, c.y * coeff, c.z * coeff, w)
    } else {
        glm::quat(c.x, c.y, c.z, w)
    }
}

/// Spherical linear interpolation along the shortest path
#[must_use]
pub fn slerp(a: &glm::Quat, b: &glm::Quat, t: f32) -> glm::Quat {
    if a.coords.dot(&b.coords) < 0.0 {
        slerp_direct(a, &-*b, t)
    } else {
        slerp_direct(a, b, t)
    }
}

/// Spherical linear interpolation without the shortest path correction.
/// Nearly parallel inputs fall back to a normalized linear interpolation.
#[must_use]
pub fn slerp_direct(a: &glm::Quat, b: &glm::Quat, t: f32) -> glm::Quat {
    let cos = a.coords.dot(&b.coords);
    if cos.abs() < 1.0 - SLERP_EPSILON {
        let angle = cos.acos();
        let inv_sin = 1.0 / angle.sin();
        let c0 = ((1.0 - t) * angle).sin() * inv_sin;
        let c1 = (t * angle).sin() * inv_sin;
        *a * c0 + *b * c1
    } else {
        glm::quat_normalize(&(*a * (1.0 - t) + *b * t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: &glm::Quat, b: &glm::Quat) {
        let c = glm::quat_equal_eps(a, b, EPSILON);
        assert!(c.x && c.y && c.z && c.w, "{a:?} != {b:?}");
    }

    #[test]
    fn log_of_identity_is_zero() {
        let l = log(&glm::Quat::identity());
        approx_eq(&l, &glm::quat(0.0, 0.0, 0.0, 0.0));
        approx_eq(&exp(&l), &glm::Quat::identity());
    }

    #[test]
    fn log_exp_inverse() {
        let q = glm::quat_angle_axis(1.2, &glm::vec3(0.0, 0.6, 0.8));
        let l = log(&q);
        // Half angle along the axis
        approx_eq(&l, &glm::quat(0.0, 0.36, 0.48, 0.0));
        approx_eq(&exp(&l), &q);
    }

    #[test]
    fn inverse_composes_to_identity() {
        let q = glm::quat_angle_axis(-0.7, &glm::vec3(1.0, 0.0, 0.0));
        approx_eq(&(inverse(&q) * q), &glm::Quat::identity());
    }

    #[test]
    fn slerp_halfway() {
        let a = glm::Quat::identity();
        let b = glm::quat_angle_axis(1.0, &glm::vec3(0.0, 0.0, 1.0));
        let expected = glm::quat_angle_axis(0.5, &glm::vec3(0.0, 0.0, 1.0));
        approx_eq(&slerp(&a, &b, 0.5), &expected);
    }

    #[test]
    fn slerp_takes_shortest_path() {
        let a = glm::Quat::identity();
        let b = glm::quat_angle_axis(1.0, &glm::vec3(0.0, 0.0, 1.0));
        let expected = glm::quat_angle_axis(0.5, &glm::vec3(0.0, 0.0, 1.0));
        // Same rotation with the opposite sign
        approx_eq(&slerp(&a, &-b, 0.5), &expected);
    }

    #[test]
    fn slerp_parallel_inputs() {
        let a = glm::quat_angle_axis(0.3, &glm::vec3(0.0, 1.0, 0.0));
        let r = slerp(&a, &a, 0.25);
        approx_eq(&r, &a);
        assert!((r.norm() - 1.0).abs() < EPSILON);
    }
}
