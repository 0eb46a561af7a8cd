//! Canvas rendering functionality for nodes, connections, and the dot grid.
//!
//! All geometry arrives in scene coordinates from the scene engine and is
//! projected through the viewport here; nothing in this module mutates the
//! board.

use super::state::WhiteboardApp;
use crate::constants;
use crate::scene::interaction::Interaction;
use crate::scene::sync;
use crate::types::{CanvasNode, MediaKind};
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Parses a `#rrggbb` hex color, falling back to the default node color for
/// anything malformed.
pub fn parse_hex_color(hex: &str) -> egui::Color32 {
    fn channels(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
    let (r, g, b) = channels(hex).unwrap_or((0xbb, 0xde, 0xfb));
    egui::Color32::from_rgb(r, g, b)
}

impl WhiteboardApp {
    /// Renders all board elements in layers: dot grid first, then arrows,
    /// then nodes, then media overlays on top.
    pub fn render_board(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.canvas.show_dots {
            self.draw_dot_grid(painter, canvas_rect);
        }

        // Arrows behind nodes, drawn from the synchronizer's cached
        // endpoints in render order
        for (source, target) in self.board.all_edges() {
            if let Some(segment) = self.sync.segment(source, target) {
                self.draw_arrow(painter, segment.start, segment.end);
            }
        }

        // In-progress connection arrow, snapped or following the pointer
        if let Some(preview) = sync::connection_preview(&self.board, &self.machine) {
            self.draw_connection_preview(painter, preview.start, preview.end);
        }

        for node in self.board.nodes() {
            self.draw_node(painter, node);
        }

        self.draw_overlays(painter);
    }

    /// Draws the zoom-aware background dot grid.
    ///
    /// Dots sit on a fixed scene-space lattice; when zooming out makes the
    /// lattice too dense to read, drawing is skipped entirely.
    fn draw_dot_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let spacing = constants::DOT_SPACING;
        let viewport = &self.canvas.viewport;

        let screen_spacing = spacing * viewport.zoom;
        if screen_spacing < 8.0 {
            return;
        }

        let dot_color = egui::Color32::from_rgba_unmultiplied(25, 118, 210, 102);
        let top_left = viewport.screen_to_scene(canvas_rect.min);
        let bottom_right = viewport.screen_to_scene(canvas_rect.max);

        let start_x = (top_left.x / spacing).floor() * spacing;
        let start_y = (top_left.y / spacing).floor() * spacing;

        let mut x = start_x;
        while x <= bottom_right.x {
            let mut y = start_y;
            while y <= bottom_right.y {
                let screen = viewport.scene_to_screen(egui::pos2(x, y));
                if canvas_rect.contains(screen) {
                    painter.circle_filled(screen, constants::DOT_RADIUS, dot_color);
                }
                y += spacing;
            }
            x += spacing;
        }
    }

    /// Draws a committed connection as a line with an arrow head at the
    /// target's clipped boundary point.
    fn draw_arrow(&self, painter: &egui::Painter, start: egui::Pos2, end: egui::Pos2) {
        let viewport = &self.canvas.viewport;
        let start_screen = viewport.scene_to_screen(start);
        let end_screen = viewport.scene_to_screen(end);

        let color = egui::Color32::from_gray(150);
        painter.line_segment([start_screen, end_screen], egui::Stroke::new(2.0, color));
        self.draw_arrow_head(painter, start_screen, end_screen, color);
    }

    /// Filled triangle pointing along the segment, sized with the zoom.
    fn draw_arrow_head(
        &self,
        painter: &egui::Painter,
        start: egui::Pos2,
        end: egui::Pos2,
        color: egui::Color32,
    ) {
        let direction = (end - start).normalized();
        if !direction.x.is_finite() || !direction.y.is_finite() {
            return;
        }
        let size = constants::ARROW_HEAD_SIZE * self.canvas.viewport.zoom;
        let perpendicular = egui::vec2(-direction.y, direction.x);

        let tip = end;
        let left = end - direction * size + perpendicular * (size * 0.6);
        let right = end - direction * size - perpendicular * (size * 0.6);

        painter.add(egui::Shape::convex_polygon(
            vec![tip, left, right],
            color,
            egui::Stroke::NONE,
        ));
    }

    /// Renders the arrow being drawn during a connect gesture. The endpoint
    /// is already snapped by the scene engine when a target is hovered.
    fn draw_connection_preview(
        &self,
        painter: &egui::Painter,
        start: egui::Pos2,
        end: egui::Pos2,
    ) {
        let viewport = &self.canvas.viewport;
        let start_screen = viewport.scene_to_screen(start);
        let end_screen = viewport.scene_to_screen(end);

        let color = egui::Color32::from_rgb(100, 150, 255);
        painter.line_segment([start_screen, end_screen], egui::Stroke::new(2.0, color));
        painter.circle_filled(end_screen, 4.0, color);
    }

    /// Renders a single node: rounded fill, header label, and (when
    /// expanded) wrapped body text plus the media caption line.
    fn draw_node(&self, painter: &egui::Painter, node: &CanvasNode) {
        let viewport = &self.canvas.viewport;
        let scene_rect = crate::scene::store::node_rect(node);
        let rect = egui::Rect::from_min_max(
            viewport.scene_to_screen(scene_rect.min),
            viewport.scene_to_screen(scene_rect.max),
        );

        let mut fill = parse_hex_color(&node.color);

        // Darken while being dragged
        if self.machine.dragging_node() == Some(node.id) {
            fill = egui::Color32::from_rgba_unmultiplied(
                (fill.r() as f32 * 0.8) as u8,
                (fill.g() as f32 * 0.8) as u8,
                (fill.b() as f32 * 0.8) as u8,
                fill.a(),
            );
        }

        let hovered_for_connect = matches!(
            self.machine.state(),
            Interaction::ConnectingFrom { hovered_target: Some(t), .. } if *t == node.id
        );
        let (stroke_color, stroke_width) = if hovered_for_connect {
            (egui::Color32::from_rgb(100, 150, 255), 2.5)
        } else {
            (egui::Color32::from_gray(107), 1.0)
        };

        painter.rect_filled(rect, constants::NODE_CORNER_RADIUS, fill);
        painter.rect_stroke(
            rect,
            constants::NODE_CORNER_RADIUS,
            egui::Stroke::new(stroke_width, stroke_color),
            StrokeKind::Outside,
        );

        let zoom = viewport.zoom;
        let label_font = egui::FontId::proportional((16.0 * zoom).clamp(8.0, 48.0));
        painter.text(
            rect.min + egui::vec2(8.0 * zoom, 8.0 * zoom),
            egui::Align2::LEFT_TOP,
            &node.label,
            label_font,
            egui::Color32::BLACK,
        );

        if node.expanded {
            self.draw_node_body(painter, node, rect);
        }
    }

    /// Body text and media caption inside an expanded node.
    fn draw_node_body(&self, painter: &egui::Painter, node: &CanvasNode, rect: egui::Rect) {
        let zoom = self.canvas.viewport.zoom;
        let body_font = egui::FontId::proportional((12.0 * zoom).clamp(6.0, 36.0));
        let inset = 8.0 * zoom;
        let max_width = (rect.width() - 2.0 * inset).max(8.0);

        let body_top = rect.min.y + constants::COLLAPSED_HEIGHT * zoom;
        let mut cursor_y = body_top;

        if !node.text.is_empty() {
            let line_height = painter.fonts_mut(|f| f.row_height(&body_font));
            for line in self.wrap_text(&node.text, max_width, &body_font, painter) {
                painter.text(
                    egui::pos2(rect.min.x + inset, cursor_y),
                    egui::Align2::LEFT_TOP,
                    line,
                    body_font.clone(),
                    egui::Color32::from_gray(51),
                );
                cursor_y += line_height;
                if cursor_y > rect.max.y {
                    break;
                }
            }
        }

        if node.media_type != MediaKind::None {
            let kind = match node.media_type {
                MediaKind::None => "none",
                MediaKind::Image => "image",
                MediaKind::Video => "video",
                MediaKind::Audio => "audio",
                MediaKind::Pdf => "pdf",
            };
            let caption = format!("Media: {kind}");
            painter.text(
                egui::pos2(rect.min.x + inset, rect.max.y - inset),
                egui::Align2::LEFT_BOTTOM,
                caption,
                body_font,
                egui::Color32::from_gray(85),
            );
        }
    }

    /// Renders open media overlays as framed placeholder panels; actual
    /// decoding and playback belong to an external collaborator.
    fn draw_overlays(&self, painter: &egui::Painter) {
        let viewport = &self.canvas.viewport;
        for descriptor in self.overlays.iter() {
            let rect = descriptor.screen_rect(viewport);
            painter.rect_filled(rect, 6.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 200));
            painter.rect_stroke(
                rect,
                6.0,
                egui::Stroke::new(1.5, egui::Color32::from_gray(200)),
                StrokeKind::Inside,
            );
            let font = egui::FontId::proportional(12.0);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{:?}: {}", descriptor.kind, descriptor.src),
                font,
                egui::Color32::WHITE,
            );
        }
    }

    /// Wraps text to fit within the specified width, returning a vector of
    /// lines. Breaks at word boundaries; a single word too long for the
    /// width gets its own line anyway.
    pub fn wrap_text(
        &self,
        text: &str,
        max_width: f32,
        font_id: &egui::FontId,
        painter: &egui::Painter,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let words: Vec<&str> = text.split_whitespace().collect();

        if words.is_empty() {
            return vec![text.to_string()];
        }

        let mut current_line = String::new();

        for word in words {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };

            let text_width = painter
                .layout_no_wrap(test_line.clone(), font_id.clone(), egui::Color32::BLACK)
                .size()
                .x;

            if text_width <= max_width {
                current_line = test_line;
            } else if !current_line.is_empty() {
                lines.push(current_line);
                current_line = word.to_string();
            } else {
                // Single word too long, add it anyway
                lines.push(word.to_string());
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }

        if lines.is_empty() {
            lines.push(text.to_string());
        }

        lines
    }
}
