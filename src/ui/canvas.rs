//! Canvas interaction and navigation functionality.
//!
//! This module feeds pointer and keyboard input into the scene engine's
//! interaction machine, handles wheel zooming, and keeps the render
//! synchronizer in step with the board once all of a frame's mutations have
//! been applied.

use super::state::WhiteboardApp;
use crate::constants;
use crate::scene::layout::NudgeConfig;
use crate::scene::overlay::{OverlayDescriptor, OverlayKind};
use crate::types::{CanvasNode, NodeId, NodePatch};
use eframe::egui;

impl WhiteboardApp {
    /// Renders the main canvas area and handles all canvas interactions.
    ///
    /// Input is processed before the synchronizer runs, so within a frame
    /// every store mutation lands before derived geometry is read.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        // Center the scene origin on the first frame of an empty board
        if self.canvas.viewport.offset == egui::Vec2::ZERO && self.node_counter == 0 {
            self.canvas.viewport.offset = response.rect.center().to_vec2();
        }

        self.handle_canvas_zoom(ui, &response);
        self.handle_pointer_events(ui, &response);
        self.handle_cancel_key(ui);

        // All mutations for this frame are in; refresh derived geometry once
        self.sync.sync(&mut self.board);
        if self.sync.take_repaint() {
            ui.ctx().request_repaint();
        }

        self.render_board(&painter, response.rect);
    }

    /// Handles scroll wheel zooming anchored at the pointer.
    ///
    /// Each wheel notch multiplies the zoom by a fixed step, clamped inside
    /// the viewport; the scene point under the cursor stays put.
    fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }

        let mouse_pos = ui
            .input(|i| i.pointer.hover_pos())
            .or_else(|| response.interact_pointer_pos());

        if let Some(mouse_pos) = mouse_pos {
            // Only zoom if the cursor is over the canvas
            if !response.rect.contains(mouse_pos) {
                return;
            }

            let factor = if scroll_delta > 0.0 {
                constants::WHEEL_ZOOM_STEP
            } else {
                1.0 / constants::WHEEL_ZOOM_STEP
            };
            self.canvas.viewport.zoom_at(mouse_pos, factor);
            self.sync.request_repaint();
        }
    }

    /// Routes pointer presses, motion, and releases into the interaction
    /// machine, and handles the click actions layered on top of it
    /// (expand/collapse toggle, media overlay toggle).
    fn handle_pointer_events(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let connect_modifier = ui.input(|i| i.modifiers.shift);
        let pointer_pos = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.hover_pos()));

        if let Some(pos) = pointer_pos {
            if ui.input(|i| i.pointer.primary_pressed()) && response.rect.contains(pos) {
                self.machine.pointer_down(
                    &mut self.board,
                    &self.canvas.viewport,
                    pos,
                    connect_modifier,
                );
            }

            if !self.machine.is_idle() {
                self.machine
                    .pointer_move(&mut self.board, &mut self.canvas.viewport, pos);
                // Pan and connect previews change no node geometry; still
                // need a fresh frame to stay glued to the pointer.
                self.sync.request_repaint();
            }

            if ui.input(|i| i.pointer.primary_released()) {
                let was_interacting = !self.machine.is_idle();
                self.machine
                    .pointer_up(&mut self.board, &self.canvas.viewport, pos);
                if was_interacting && self.machine.is_idle() {
                    self.file.has_unsaved_changes = true;
                }
            }
        }

        // A plain click (press and release without dragging) toggles
        // expansion from the header zone or the media overlay from the body.
        if response.clicked() && !connect_modifier {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_canvas_click(pos);
            }
        }
    }

    /// Click dispatch: header zone toggles expansion, the media zone of an
    /// expanded node toggles its overlay.
    fn handle_canvas_click(&mut self, screen_pos: egui::Pos2) {
        let scene_pos = self.canvas.viewport.screen_to_scene(screen_pos);
        let Some(node_id) = self.board.hit_test(scene_pos) else {
            return;
        };
        let Some(node) = self.board.get(node_id) else {
            return;
        };

        let in_header = scene_pos.y <= node.y + constants::COLLAPSED_HEIGHT;
        if in_header {
            let expanded = !node.expanded;
            self.board.update_node(node_id, NodePatch::expanded(expanded));
            // Collapsing hides the media zone, so close any open overlay
            if !expanded {
                self.overlays.clear(node_id);
            }
            self.file.has_unsaved_changes = true;
        } else if node.expanded && !node.media_type.is_none() {
            self.toggle_media_overlay(node_id);
        }
    }

    /// Opens or closes the media overlay anchored to a node's media zone.
    fn toggle_media_overlay(&mut self, node_id: NodeId) {
        let Some(node) = self.board.get(node_id) else {
            return;
        };
        let Some(kind) = OverlayKind::from_media(node.media_type) else {
            return;
        };
        let Some(rect) = self.board.rect(node_id) else {
            return;
        };
        // The zone below the header, inset like the node's body content
        let media_rect = egui::Rect::from_min_max(
            egui::pos2(rect.min.x + 8.0, rect.min.y + constants::COLLAPSED_HEIGHT),
            egui::pos2(rect.max.x - 8.0, rect.max.y - 8.0),
        );
        self.overlays.toggle(OverlayDescriptor {
            node: node_id,
            kind,
            src: node.media_src.clone(),
            rect: media_rect,
        });
    }

    /// Escape aborts the interaction in progress, restoring pre-interaction
    /// state.
    fn handle_cancel_key(&mut self, ui: &mut egui::Ui) {
        if !self.machine.is_idle() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.machine.cancel(&mut self.board);
        }
    }

    /// Creates a node at the center of the given canvas rect, routed through
    /// the overlap resolver so it never lands on an existing node.
    pub fn create_node_at_view_center(&mut self, canvas_rect: egui::Rect) {
        self.node_counter += 1;
        let center_scene = self
            .canvas
            .viewport
            .screen_to_scene(canvas_rect.center());

        let node = CanvasNode::new(
            format!("Node {}", self.node_counter),
            center_scene.x - constants::NODE_WIDTH / 2.0,
            center_scene.y - constants::NODE_HEIGHT / 2.0,
        );

        let config = NudgeConfig {
            wrap_width: canvas_rect.width().max(1.0) * 2.0,
            ..NudgeConfig::default()
        };
        let resolved = self
            .board
            .resolve_placement(crate::scene::store::node_rect(&node), None, &config);

        let node = CanvasNode {
            x: resolved.min.x,
            y: resolved.min.y,
            ..node
        };
        self.board.add_node(node);
        self.file.has_unsaved_changes = true;
    }
}
