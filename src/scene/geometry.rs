//! Pure geometry helpers for connection clipping and box intersection.
//!
//! Arrows between nodes meet the node boundary rather than the node center;
//! these functions compute where the line between two box centers crosses
//! each box's edge. All functions are deterministic and side-effect-free.
//! Callers are responsible for passing well-formed boxes (positive extents).

use egui::{vec2, Pos2, Rect, Vec2};

/// Substituted for the center-to-center delta when both components are
/// exactly zero, so coincident centers never produce NaN downstream.
const MIN_DELTA: f32 = 0.001;

/// Returns the points where the straight line between two box centers
/// crosses each box's boundary.
///
/// `half_a` / `half_b` are the half-extents of the respective boxes. The
/// clip factor `t = max(|dx|/hw, |dy|/hh, 1)` is exact on the dominant axis
/// and clamped to at least 1 so the returned point never escapes its box,
/// even when the boxes overlap.
pub fn clip_segment_to_boxes(
    center_a: Pos2,
    half_a: Vec2,
    center_b: Pos2,
    half_b: Vec2,
) -> (Pos2, Pos2) {
    let delta = center_delta(center_a, center_b);
    (
        clip_toward(center_a, half_a, delta),
        clip_toward(center_b, half_b, -delta),
    )
}

/// Same clipping with box B degenerated to a point, for in-progress
/// connection arrows that follow the pointer.
pub fn clip_segment_to_point(center_a: Pos2, half_a: Vec2, target: Pos2) -> Pos2 {
    clip_toward(center_a, half_a, center_delta(center_a, target))
}

/// Standard AABB intersection test: the boxes intersect unless they are
/// separated on either axis. Touching edges count as intersecting.
pub fn boxes_intersect(a: &Rect, b: &Rect) -> bool {
    !(a.max.x < b.min.x || b.max.x < a.min.x || a.max.y < b.min.y || b.max.y < a.min.y)
}

fn clip_toward(center: Pos2, half: Vec2, delta: Vec2) -> Pos2 {
    let t = (delta.x.abs() / half.x)
        .max(delta.y.abs() / half.y)
        .max(1.0);
    center + delta / t
}

fn center_delta(from: Pos2, to: Pos2) -> Vec2 {
    let delta = to - from;
    if delta.x == 0.0 && delta.y == 0.0 {
        vec2(MIN_DELTA, MIN_DELTA)
    } else {
        delta
    }
}
