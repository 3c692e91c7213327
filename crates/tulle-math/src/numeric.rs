//! Safe numeric helpers used by constraint gradients.

use glam::DVec3;
use tulle_types::Scalar;

/// `acos` with the argument clamped to the valid domain [-1, +1].
///
/// Dot products of unit vectors drift slightly outside the domain under
/// floating-point arithmetic; a raw `acos` would return NaN there.
#[inline]
pub fn safe_acos(x: Scalar) -> Scalar {
    x.clamp(-1.0, 1.0).acos()
}

/// Cotangent of the angle between two vectors: cot θ = (a·b) / |a×b|.
///
/// Returns a non-finite value when the vectors are parallel; callers that
/// assemble cotangent weights substitute zero for non-finite entries.
#[inline]
pub fn cot_theta(a: DVec3, b: DVec3) -> Scalar {
    a.dot(b) / a.cross(b).length()
}

/// Area of the triangle (p0, p1, p2).
#[inline]
pub fn triangle_area(p0: DVec3, p1: DVec3, p2: DVec3) -> Scalar {
    0.5 * (p1 - p0).cross(p2 - p0).length()
}
