//! Scalar helpers shared by the geometric primitives.

use arrayvec::ArrayVec;

/// The tolerance below which a scalar is considered zero for the purpose of
/// degeneracy checks (2^-12, half a sub-pixel at typical resolutions).
pub const NEARLY_ZERO: f32 = 1.0 / (1 << 12) as f32;

/// `sqrt(2) / 2`.
pub const ROOT_2_OVER_2: f32 = 0.707_106_78;

/// Convenience methods on `f32` used throughout the stroking code.
pub trait Scalar {
    fn half(self) -> Self;
    fn invert(self) -> Self;
    fn is_nearly_zero(self) -> bool;
    fn is_nearly_zero_within_tolerance(self, tolerance: f32) -> bool;
}

impl Scalar for f32 {
    #[inline]
    fn half(self) -> f32 {
        self * 0.5
    }

    #[inline]
    fn invert(self) -> f32 {
        1.0 / self
    }

    #[inline]
    fn is_nearly_zero(self) -> bool {
        self.is_nearly_zero_within_tolerance(NEARLY_ZERO)
    }

    #[inline]
    fn is_nearly_zero_within_tolerance(self, tolerance: f32) -> bool {
        debug_assert!(tolerance >= 0.0);
        self.abs() <= tolerance
    }
}

/// Returns the real roots of `a·t² + b·t + c = 0` that lie strictly inside
/// the unit range `(0, 1)`.
///
/// Degrades to the linear solution when `a` is zero.
pub fn unit_quad_roots(a: f32, b: f32, c: f32) -> ArrayVec<f32, 2> {
    let mut roots = ArrayVec::new();

    let mut push = |t: f32| {
        if t > 0.0 && t < 1.0 && !roots.is_full() {
            roots.push(t);
        }
    };

    if a == 0.0 {
        if b != 0.0 {
            push(-c / b);
        }
        return roots;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return roots;
    }

    // The usual numerically stable form: compute the root that does not
    // suffer from cancellation first, derive the other from the product.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    push(q / a);
    if q != 0.0 {
        push(c / q);
    }

    if roots.len() == 2 && roots[0] > roots[1] {
        roots.swap(0, 1);
    }

    roots
}
