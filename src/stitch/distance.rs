//! Point-to-segment distance
//!
//! Shared by the boundary clearance checks and the track overlap test.

use crate::board::Point;

/// Squared length below which a segment is treated as a single point
const DEGENERATE_LEN2: f64 = 1e-12;

/// Minimum distance from `p` to segment `a`-`b` and the nearest point on it.
///
/// The projection parameter is clamped to [0, 1] so the nearest point never
/// leaves the segment. A zero-length segment measures to its single point.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> (f64, [f64; 2]) {
    let [px, py] = p.as_f64();
    let [ax, ay] = a.as_f64();
    let [bx, by] = b.as_f64();

    let ab = [bx - ax, by - ay];
    let ap = [px - ax, py - ay];
    let ab_len2 = ab[0] * ab[0] + ab[1] * ab[1];

    if ab_len2 < DEGENERATE_LEN2 {
        // Degenerate segment
        let d = (ap[0] * ap[0] + ap[1] * ap[1]).sqrt();
        return (d, [ax, ay]);
    }

    let t = ((ap[0] * ab[0] + ap[1] * ab[1]) / ab_len2).clamp(0.0, 1.0);
    let nearest = [ax + t * ab[0], ay + t * ab[1]];
    let d = ((px - nearest[0]).powi(2) + (py - nearest[1]).powi(2)).sqrt();

    (d, nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_segment_distance() {
        let (d, nearest) = point_segment_distance(Point::new(0, 10), Point::new(0, 0), Point::new(20, 0));
        assert_relative_eq!(d, 10.0);
        assert_eq!(nearest, [0.0, 0.0]);

        let (d, nearest) = point_segment_distance(Point::new(7, -4), Point::new(0, 0), Point::new(20, 0));
        assert_relative_eq!(d, 4.0);
        assert_eq!(nearest, [7.0, 0.0]);
    }

    #[test]
    fn test_clamps_past_segment_end() {
        // Projection lands beyond `b`; distance is to the endpoint, not the line
        let (d, nearest) = point_segment_distance(Point::new(23, 4), Point::new(0, 0), Point::new(20, 0));
        assert_relative_eq!(d, 5.0);
        assert_eq!(nearest, [20.0, 0.0]);

        let (d, _) = point_segment_distance(Point::new(-3, -4), Point::new(0, 0), Point::new(20, 0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_zero_only_on_segment() {
        let a = Point::new(-50, -50);
        let b = Point::new(50, 50);
        let (d, _) = point_segment_distance(Point::new(10, 10), a, b);
        assert_relative_eq!(d, 0.0);
        let (d, _) = point_segment_distance(Point::new(10, 11), a, b);
        assert!(d > 0.0);
        let (d, _) = point_segment_distance(Point::new(60, 60), a, b);
        assert!(d > 0.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Point::new(5, 5);
        let (d, nearest) = point_segment_distance(Point::new(8, 9), a, a);
        assert!(d.is_finite());
        assert_relative_eq!(d, 5.0);
        assert_eq!(nearest, [5.0, 5.0]);

        let (d, _) = point_segment_distance(a, a, a);
        assert_relative_eq!(d, 0.0);
    }
}
