//! Triangulation for the shapes without a dedicated renderer.
//!
//! Every function returns a triangle list ready for
//! [`DrawList::push_mesh`](crate::scene::DrawList::push_mesh).

use std::f32::consts::TAU;

use crate::coords::Vec2;

/// Segments used for a full ellipse of the given radius.
pub(crate) fn ellipse_segments(radius: f32) -> usize {
    ((radius.abs().sqrt() * 4.0) as usize).clamp(12, 256)
}

/// `segments + 1` points from `start` to `end` radians on an ellipse, both ends included.
pub(crate) fn arc_points(
    center: Vec2,
    (rx, ry): (f32, f32),
    start: f32,
    end: f32,
    segments: usize,
) -> Vec<Vec2> {
    let segments = segments.max(1);
    let step = (end - start) / segments as f32;
    (0..=segments)
        .map(|i| {
            let (s, c) = (start + step * i as f32).sin_cos();
            center + Vec2::new(c * rx, s * ry)
        })
        .collect()
}

/// Closed ring of `segments` points; the first point is not repeated.
pub(crate) fn ellipse_ring(center: Vec2, radii: (f32, f32), segments: usize) -> Vec<Vec2> {
    let mut ring = arc_points(center, radii, 0.0, TAU, segments.max(3));
    ring.pop();
    ring
}

/// Corners of a regular polygon, the first at `rotation` radians.
pub(crate) fn regular_polygon(center: Vec2, sides: usize, radius: f32, rotation: f32) -> Vec<Vec2> {
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| center + Vec2::new(radius, 0.0).rotated(rotation + step * i as f32))
        .collect()
}

/// Triangles fanning out from `hub` across consecutive `rim` points.
///
/// With `closed` the last rim point also connects back to the first.
pub(crate) fn fan(hub: Vec2, rim: &[Vec2], closed: bool) -> Vec<Vec2> {
    if rim.len() < 2 {
        return Vec::new();
    }
    let mut tris = Vec::with_capacity(rim.len() * 3);
    for pair in rim.windows(2) {
        tris.extend([hub, pair[0], pair[1]]);
    }
    if closed {
        tris.extend([hub, rim[rim.len() - 1], rim[0]]);
    }
    tris
}

/// One quad per segment of the polyline through `points`, `width` thick.
pub(crate) fn stroke(points: &[Vec2], closed: bool, width: f32) -> Vec<Vec2> {
    let half = width.max(0.0) * 0.5;
    let mut tris = Vec::new();
    let mut segment = |a: Vec2, b: Vec2| {
        let d = b - a;
        let len = d.length();
        if len <= 0.0 || half <= 0.0 {
            return;
        }
        let n = Vec2::new(-d.y, d.x) * (half / len);
        tris.extend([a + n, b + n, b - n, a + n, b - n, a - n]);
    };
    for pair in points.windows(2) {
        segment(pair[0], pair[1]);
    }
    if closed && points.len() > 2 {
        segment(points[points.len() - 1], points[0]);
    }
    tris
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn arc_includes_both_ends() {
        let pts = arc_points(Vec2::zero(), (10.0, 10.0), 0.0, std::f32::consts::PI, 4);
        assert_eq!(pts.len(), 5);
        assert!(close(pts[0], Vec2::new(10.0, 0.0)));
        assert!(close(pts[2], Vec2::new(0.0, 10.0)));
        assert!(close(pts[4], Vec2::new(-10.0, 0.0)));
    }

    #[test]
    fn ellipse_ring_uses_both_radii() {
        let ring = ellipse_ring(Vec2::new(5.0, 5.0), (20.0, 10.0), 4);
        assert_eq!(ring.len(), 4);
        assert!(close(ring[0], Vec2::new(25.0, 5.0)));
        assert!(close(ring[1], Vec2::new(5.0, 15.0)));
        assert!(close(ring[2], Vec2::new(-15.0, 5.0)));
    }

    #[test]
    fn polygon_starts_at_rotation() {
        let square = regular_polygon(Vec2::zero(), 4, 2.0, std::f32::consts::FRAC_PI_2);
        assert_eq!(square.len(), 4);
        assert!(close(square[0], Vec2::new(0.0, 2.0)));
        assert!(close(square[1], Vec2::new(-2.0, 0.0)));
    }

    #[test]
    fn fan_closes_only_when_asked() {
        let rim = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0)];
        assert_eq!(fan(Vec2::zero(), &rim, false).len(), 6);
        assert_eq!(fan(Vec2::zero(), &rim, true).len(), 9);
        assert!(fan(Vec2::zero(), &rim[..1], true).is_empty());
    }

    #[test]
    fn stroke_offsets_by_half_width() {
        let tris = stroke(&[Vec2::zero(), Vec2::new(10.0, 0.0)], false, 2.0);
        assert_eq!(tris.len(), 6);
        assert!(close(tris[0], Vec2::new(0.0, 1.0)));
        assert!(close(tris[5], Vec2::new(0.0, -1.0)));
        assert!(stroke(&[Vec2::zero(), Vec2::zero()], false, 2.0).is_empty());
    }

    #[test]
    fn closed_stroke_adds_the_closing_segment() {
        let tri = [Vec2::zero(), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        assert_eq!(stroke(&tri, false, 1.0).len(), 12);
        assert_eq!(stroke(&tri, true, 1.0).len(), 18);
    }

    #[test]
    fn segment_count_grows_with_radius() {
        assert_eq!(ellipse_segments(1.0), 12);
        assert!(ellipse_segments(400.0) > ellipse_segments(40.0));
        assert_eq!(ellipse_segments(1e9), 256);
    }
}
