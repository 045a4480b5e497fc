//! Boundary clearance checking
//!
//! A candidate must keep `clearance` from the fill region's own outline and
//! `clearance` plus its radius from every board outline edge.

use std::f64::consts::TAU;

use super::distance::point_segment_distance;
use super::types::ViaCandidate;
use crate::board::{Coord, OutlineEdge, Point, Polygon};

/// Check `via` against the region outline and the board edges.
///
/// With `clearance == 0` the region corner/edge checks are skipped; board
/// edges are still kept at least one via radius away.
pub fn is_clear(
    via: &ViaCandidate,
    outline: &Polygon,
    board_edges: &[OutlineEdge],
    clearance: Coord,
) -> bool {
    let p = via.position;
    let c = clearance as f64;

    if clearance > 0 {
        if outline.corners.iter().any(|&corner| p.distance(corner) < c) {
            return false;
        }
        if outline
            .edges()
            .any(|(a, b)| point_segment_distance(p, a, b).0 <= c)
        {
            return false;
        }
    }

    let reach = c + via.radius();
    !board_edges.iter().any(|edge| edge_too_close(p, edge, reach))
}

fn edge_too_close(p: Point, edge: &OutlineEdge, reach: f64) -> bool {
    match *edge {
        OutlineEdge::Line { start, end } => point_segment_distance(p, start, end).0 <= reach,
        OutlineEdge::Rect { start, end } => {
            let corners = [
                start,
                Point::new(end.x, start.y),
                end,
                Point::new(start.x, end.y),
            ];
            (0..4).any(|i| point_segment_distance(p, corners[i], corners[(i + 1) % 4]).0 <= reach)
        }
        OutlineEdge::Arc { center, start, end } => {
            let radius = center.distance(end);
            in_radial_band(p, center, radius, reach) && within_sweep(p, center, start, end)
        }
        OutlineEdge::Circle { center, radius } => {
            in_radial_band(p, center, radius as f64, reach)
        }
    }
}

/// Strictly inside the ring `radius ± reach` around `center`
fn in_radial_band(p: Point, center: Point, radius: f64, reach: f64) -> bool {
    let dist = p.distance(center);
    radius - reach < dist && dist < radius + reach
}

/// Angle of `p` around `center` lies on the counter-clockwise sweep `start` -> `end`
fn within_sweep(p: Point, center: Point, start: Point, end: Point) -> bool {
    let angle = |q: Point| ((q.y - center.y) as f64).atan2((q.x - center.x) as f64);

    let start_angle = angle(start);
    let mut end_angle = angle(end);
    if end_angle < start_angle {
        end_angle += TAU;
    }
    let mut point_angle = angle(p);
    if point_angle < start_angle {
        point_angle += TAU;
    }

    point_angle <= end_angle
}
