//! Viewport transform between screen (pointer) and scene coordinates.
//!
//! Nodes live in scene coordinates, independent of pan and zoom; the
//! viewport carries the only state needed to project them onto the screen.

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants;

/// Pan offset and zoom scale for one canvas instance.
///
/// Initialized to identity (scale 1, offset 0); mutated only by pan and zoom
/// interactions and never persisted as part of node data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Current zoom factor (1.0 = normal)
    pub zoom: f32,
    /// Scene-to-screen offset (in screen space)
    #[serde(skip)]
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    /// Converts screen coordinates to scene coordinates.
    pub fn screen_to_scene(&self, screen_pos: Pos2) -> Pos2 {
        (screen_pos - self.offset) / self.zoom
    }

    /// Converts scene coordinates to screen coordinates.
    pub fn scene_to_screen(&self, scene_pos: Pos2) -> Pos2 {
        scene_pos * self.zoom + self.offset
    }

    /// Applies a multiplicative zoom anchored at the given screen point: the
    /// scene point under the cursor before the zoom is still under it after.
    ///
    /// The zoom factor is clamped to a sane positive range; when the clamp
    /// absorbs the whole change the offset is left untouched.
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let scene_before = self.screen_to_scene(anchor);
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(constants::MIN_ZOOM, constants::MAX_ZOOM);

        if (self.zoom - old_zoom).abs() > f32::EPSILON {
            let screen_after = self.scene_to_screen(scene_before);
            self.offset += anchor - screen_after;
        }
    }

    /// Pans by a screen-space delta; driven by background drag.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    const TOL: f32 = 1e-3;

    #[test]
    fn test_screen_scene_roundtrip() {
        let vp = Viewport {
            zoom: 2.0,
            offset: vec2(30.0, -40.0),
        };
        let screen = pos2(123.0, 456.0);
        let back = vp.scene_to_screen(vp.screen_to_scene(screen));
        assert!((back.x - screen.x).abs() < TOL);
        assert!((back.y - screen.y).abs() < TOL);
    }

    #[test]
    fn test_zoom_is_anchored_at_pointer() {
        let mut vp = Viewport {
            zoom: 1.0,
            offset: vec2(50.0, 80.0),
        };
        let anchor = pos2(200.0, 150.0);
        let scene_before = vp.screen_to_scene(anchor);

        vp.zoom_at(anchor, 1.5);
        let scene_after = vp.screen_to_scene(anchor);

        assert!((scene_before.x - scene_after.x).abs() < TOL);
        assert!((scene_before.y - scene_after.y).abs() < TOL);
        assert!((vp.zoom - 1.5).abs() < TOL);
    }

    #[test]
    fn test_zoom_anchor_holds_across_repeated_zooms() {
        let mut vp = Viewport::default();
        let anchor = pos2(640.0, 360.0);
        let scene_before = vp.screen_to_scene(anchor);

        for _ in 0..10 {
            vp.zoom_at(anchor, 1.05);
        }
        for _ in 0..4 {
            vp.zoom_at(anchor, 1.0 / 1.05);
        }

        let scene_after = vp.screen_to_scene(anchor);
        assert!((scene_before.x - scene_after.x).abs() < TOL);
        assert!((scene_before.y - scene_after.y).abs() < TOL);
    }

    #[test]
    fn test_zoom_clamps_at_minimum() {
        let mut vp = Viewport {
            zoom: constants::MIN_ZOOM,
            offset: vec2(10.0, 10.0),
        };
        let offset_before = vp.offset;

        vp.zoom_at(pos2(100.0, 100.0), 0.5);

        assert_eq!(vp.zoom, constants::MIN_ZOOM);
        assert_eq!(vp.offset, offset_before);
    }

    #[test]
    fn test_pan_is_additive() {
        let mut vp = Viewport::default();
        vp.pan_by(vec2(10.0, 5.0));
        vp.pan_by(vec2(-4.0, 2.0));
        assert_eq!(vp.offset, vec2(6.0, 7.0));
    }
}
