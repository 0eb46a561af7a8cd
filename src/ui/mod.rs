//! User interface components and rendering logic for the whiteboard tool.
//!
//! This module contains the egui frontend: the main application struct, the
//! canvas input glue, drawing, and file operations.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main WhiteboardApp
//! - `file_ops` - Async file save/load plumbing
//! - `canvas` - Pointer/wheel handling feeding the interaction machine
//! - `rendering` - Drawing the dot grid, arrows, nodes, and overlays

mod canvas;
mod file_ops;
mod rendering;
mod state;

pub use state::WhiteboardApp;

use eframe::egui;

impl eframe::App for WhiteboardApp {
    /// Persist app state (board plus UI preferences) between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string("app_state", json);
            }
            Err(err) => {
                log::error!("failed to serialize app state: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Input handling and store mutations run before the canvas pass reads
    /// derived geometry, so a frame never renders a half-updated board.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        // Apply results of async save/load operations
        self.handle_pending_operations(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl WhiteboardApp {
    /// Renders the toolbar: node creation, file operations, and view
    /// toggles.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("+ Add Node").clicked() {
                let canvas_rect = ui.ctx().input(|i| i.screen_rect());
                self.create_node_at_view_center(canvas_rect);
            }

            ui.separator();

            if ui.button("New").clicked() {
                self.new_board();
            }
            if ui.button("Open").clicked() {
                self.load_board();
            }
            let save_label = if self.file.has_unsaved_changes {
                "Save*"
            } else {
                "Save"
            };
            if ui.button(save_label).clicked() {
                self.save_board();
            }
            if ui.button("Save As").clicked() {
                self.save_board_as();
            }

            ui.separator();

            ui.checkbox(&mut self.canvas.show_dots, "Dots");
            ui.checkbox(&mut self.dark_mode, "Dark");

            ui.separator();
            ui.label(format!("{:.0}%", self.canvas.viewport.zoom * 100.0));
            if ui.button("Reset View").clicked() {
                self.canvas.viewport = Default::default();
                self.sync.request_repaint();
            }
        });
    }
}

// Tests live in a child module so they can exercise private helpers like
// `draw_canvas` without exposing them publicly.
#[cfg(test)]
mod tests;
