//! Planar geometry primitives used by the match engine.
//!
//! Coordinates are `(x, z)` arena units stored in a [`Vec2`] whose `y`
//! component is the forward (net-to-net) axis.

use nalgebra::Vector2;
use tracing::trace;

pub type Vec2 = Vector2<f32>;

/// Segments shorter than this are treated as points.
const DEGENERATE_SEGMENT_SQ: f32 = 1e-8;

#[inline]
pub fn vec2(x: f32, z: f32) -> Vec2 {
    Vec2::new(x, z)
}

/// `true` when a disc of `radius` at `point` overlaps a disc of the same
/// radius around any of `existing`.
pub fn collision_test(point: Vec2, existing: &[Vec2], radius: f32) -> bool {
    let min_dist = 2.0 * radius;
    existing.iter().any(|other| (point - other).norm() < min_dist)
}

/// Shortest distance from `point` to the segment `start -> end`.
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let seg = end - start;
    let len_sq = seg.norm_squared();
    if len_sq < DEGENERATE_SEGMENT_SQ {
        return (point - start).norm();
    }
    let t = ((point - start).dot(&seg) / len_sq).clamp(0.0, 1.0);
    (point - (start + seg * t)).norm()
}

/// Probability that a ball travelling `start -> end` gets past `defenders`.
///
/// Each defender closer than `intercept_radius` to the line scales the
/// survival chance by `distance / intercept_radius`; a defender standing on
/// the line stops the ball outright.
pub fn intercept_test(start: Vec2, end: Vec2, defenders: &[Vec2], intercept_radius: f32) -> f32 {
    let mut through = 1.0_f32;
    for defender in defenders {
        let dist = distance_to_segment(*defender, start, end);
        let factor = if intercept_radius > 0.0 { (dist / intercept_radius).clamp(0.0, 1.0) } else { 1.0 };
        trace!(defender_x = defender.x, defender_z = defender.y, dist, factor, "intercept candidate");
        through *= factor;
    }
    through
}

fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Segment/segment intersection, touching endpoints included.
pub fn segments_intersect(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> bool {
    let d1 = orientation(b0, b1, a0);
    let d2 = orientation(b0, b1, a1);
    let d3 = orientation(a0, a1, b0);
    let d4 = orientation(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}

/// Component-wise sign with an exact zero for zero input.
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Scale `v` down to `max_len` if it is longer.
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    let len = v.norm();
    if len > max_len && len > 0.0 {
        v * (max_len / len)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_test() {
        let existing = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        assert!(collision_test(vec2(1.5, 0.0), &existing, 1.0));
        assert!(!collision_test(vec2(5.0, 0.0), &existing, 1.0));
        assert!(!collision_test(vec2(0.0, 0.0), &[], 1.0));
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_segment(vec2(0.0, 3.0), vec2(-5.0, 0.0), vec2(5.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
        // beyond the end clamps to the endpoint
        let d = distance_to_segment(vec2(8.0, 4.0), vec2(-5.0, 0.0), vec2(5.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
        // degenerate segment
        let d = distance_to_segment(vec2(3.0, 4.0), vec2(0.0, 0.0), vec2(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_intercept_test() {
        let start = vec2(0.0, 0.0);
        let end = vec2(0.0, 10.0);
        assert_eq!(intercept_test(start, end, &[], 1.5), 1.0);
        assert_eq!(intercept_test(start, end, &[vec2(5.0, 5.0)], 1.5), 1.0);
        assert_eq!(intercept_test(start, end, &[vec2(0.0, 5.0)], 1.5), 0.0);

        let half = intercept_test(start, end, &[vec2(0.75, 5.0)], 1.5);
        assert!((half - 0.5).abs() < 1e-6);
        let quarter = intercept_test(start, end, &[vec2(0.75, 5.0), vec2(-0.75, 2.0)], 1.5);
        assert!((quarter - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_segments_intersect() {
        let post_l = vec2(-0.5, 10.0);
        let post_r = vec2(0.5, 10.0);
        assert!(segments_intersect(vec2(0.0, 8.0), vec2(0.0, 11.0), post_l, post_r));
        assert!(!segments_intersect(vec2(0.0, 8.0), vec2(0.0, 9.5), post_l, post_r));
        assert!(!segments_intersect(vec2(2.0, 8.0), vec2(2.0, 11.0), post_l, post_r));
        // touching the goal line counts
        assert!(segments_intersect(vec2(0.0, 8.0), vec2(0.0, 10.0), post_l, post_r));
        // clipping a post counts
        assert!(segments_intersect(vec2(-1.0, 9.0), vec2(0.0, 11.0), post_l, post_r));
    }

    #[test]
    fn test_sign_has_exact_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn test_clamp_length() {
        let v = clamp_length(vec2(3.0, 4.0), 1.0);
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert_eq!(clamp_length(vec2(0.3, 0.4), 1.0), vec2(0.3, 0.4));
    }
}
