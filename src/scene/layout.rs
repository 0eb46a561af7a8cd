//! Overlap resolution for node placement.
//!
//! A deliberately simple greedy heuristic, not a packing solver:
//! reproducibility (same inputs, same output) matters more than optimality.

use egui::{pos2, vec2, Rect};

use crate::constants;
use crate::scene::geometry::boxes_intersect;

/// Tunable step sizes and limits for [`resolve_overlap`]. The defaults are
/// inherited from observed editor behavior and are heuristics, not
/// load-bearing values.
#[derive(Debug, Clone, Copy)]
pub struct NudgeConfig {
    /// Minimum rightward step per nudge; the actual step is at least half
    /// the intersecting obstacle's width.
    pub step_x: f32,
    /// Minimum downward step when wrapping to a new row; at least half the
    /// intersecting obstacle's height.
    pub step_y: f32,
    /// Once a nudged box's left edge passes this x, placement wraps to a
    /// new row. The UI passes twice the live canvas width.
    pub wrap_width: f32,
    /// Left margin a wrapped box resets to.
    pub reset_x: f32,
    /// Attempt ceiling; past it the last computed position is accepted.
    pub max_attempts: usize,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            step_x: constants::NUDGE_STEP_X,
            step_y: constants::NUDGE_STEP_Y,
            wrap_width: constants::WRAP_WIDTH_FALLBACK,
            reset_x: constants::WRAP_RESET_X,
            max_attempts: constants::RESOLVE_MAX_ATTEMPTS,
        }
    }
}

/// Displaces `candidate` until it intersects none of `obstacles`.
///
/// On each attempt the first intersecting obstacle (in iteration order)
/// pushes the candidate right; past the wrap threshold the candidate resets
/// to the left margin of the next row instead. Resolution is best-effort:
/// when the attempt ceiling is reached the last computed position is
/// returned even if it still overlaps.
pub fn resolve_overlap(candidate: Rect, obstacles: &[Rect], config: &NudgeConfig) -> Rect {
    let mut rect = candidate;

    for _ in 0..config.max_attempts {
        let Some(hit) = obstacles.iter().find(|o| boxes_intersect(&rect, o)) else {
            return rect;
        };

        let step = config.step_x.max(hit.width() / 2.0);
        rect = rect.translate(vec2(step, 0.0));

        if rect.min.x > config.wrap_width {
            let drop = config.step_y.max(hit.height() / 2.0);
            rect = Rect::from_min_size(pos2(config.reset_x, rect.min.y + drop), rect.size());
        }
    }

    log::warn!(
        "overlap resolution hit the {}-attempt ceiling; accepting a possibly overlapping box",
        config.max_attempts
    );
    rect
}
