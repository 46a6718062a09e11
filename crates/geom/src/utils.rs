//! Normal computation and small vector helpers.
//!
//! The coordinate system is y-down, so a counter-clockwise rotation of the
//! forward tangent yields the left-hand normal.

use crate::math::{vector, Point, Vector};

/// Rotates a vector 90° counter-clockwise (y-down convention).
#[inline]
pub fn rotate_ccw(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// Rotates a vector 90° clockwise (y-down convention).
#[inline]
pub fn rotate_cw(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Normalizes a vector, or returns `None` if its length is zero or too small
/// to produce a finite unit vector.
///
/// The intermediate math is done in f64 so that very large and very small
/// coordinates normalize without overflowing.
pub fn try_normalize(v: Vector) -> Option<Vector> {
    let xx = v.x as f64;
    let yy = v.y as f64;
    let mag2 = xx * xx + yy * yy;
    if !(mag2 > 0.0) || !mag2.is_finite() {
        return None;
    }

    let scale = 1.0 / mag2.sqrt();
    let x = (xx * scale) as f32;
    let y = (yy * scale) as f32;
    if !x.is_finite() || !y.is_finite() || (x == 0.0 && y == 0.0) {
        return None;
    }

    Some(vector(x, y))
}

/// Scales a vector to the requested length, or returns `None` if the vector
/// is degenerate.
pub fn try_set_length(v: Vector, length: f32) -> Option<Vector> {
    try_normalize(v).map(|unit| unit * length)
}

/// Computes the scaled normal and the unit normal of the segment
/// `after - before`, rotated 90° counter-clockwise.
///
/// Returns `None` when `before == after` (a zero-length segment has no
/// direction so a normal is undefined). Callers that need cap geometry for
/// zero-length segments must substitute a canonical fallback direction.
pub fn normal_and_unit_normal(
    before: Point,
    after: Point,
    scale: f32,
    radius: f32,
) -> Option<(Vector, Vector)> {
    let unit = try_normalize(vector(
        (after.x - before.x) * scale,
        (after.y - before.y) * scale,
    ))?;
    let unit = rotate_ccw(unit);
    Some((unit * radius, unit))
}

/// Whether two points are equal within a per-axis tolerance.
#[inline]
pub fn points_within_tolerance(a: Point, b: Point, tolerance: f32) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn normal_of_horizontal_segment() {
        let (normal, unit) =
            normal_and_unit_normal(point(0.0, 0.0), point(10.0, 0.0), 1.0, 2.0).unwrap();
        // Forward direction (1, 0) rotated CCW in y-down coordinates.
        assert_eq!(unit, vector(0.0, -1.0));
        assert_eq!(normal, vector(0.0, -2.0));
    }

    #[test]
    fn normal_of_degenerate_segment() {
        assert!(normal_and_unit_normal(point(1.0, 1.0), point(1.0, 1.0), 1.0, 2.0).is_none());
    }

    #[test]
    fn normalize_extremes() {
        assert!(try_normalize(vector(0.0, 0.0)).is_none());
        assert!(try_normalize(vector(f32::NAN, 1.0)).is_none());

        let unit = try_normalize(vector(1e-30, 0.0)).unwrap();
        assert!((unit.x - 1.0).abs() < 1e-6);

        let unit = try_normalize(vector(3e20, 4e20)).unwrap();
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }
}
