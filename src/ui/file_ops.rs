//! File operations for saving and loading boards.
//!
//! Dialogs run asynchronously on the surrounding tokio runtime; results come
//! back to the UI thread over an mpsc channel and are applied on the next
//! frame. The scene engine itself never blocks on I/O.

use super::state::{FileOperationResult, PendingLoadOperation, PendingSaveOperation, WhiteboardApp};
use crate::scene::store::Board;
use crate::types::BoardDocument;
use eframe::egui;

impl WhiteboardApp {
    /// Processes completed async file operations and initiates pending ones.
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        // First, process any completed file operations from the channel
        if let Some(receiver) = &self.file.file_operation_receiver {
            while let Ok(result) = receiver.try_recv() {
                match result {
                    FileOperationResult::SaveCompleted(path) => {
                        self.file.current_path = Some(path);
                        self.file.has_unsaved_changes = false;
                        log::info!("board saved");
                    }
                    FileOperationResult::LoadCompleted(path, content) => {
                        match BoardDocument::from_json(&content) {
                            Ok(document) => {
                                self.board = Board::from_document(document);
                                self.sync.rebuild(&mut self.board);
                                self.machine = Default::default();
                                self.overlays = Default::default();
                                self.file.current_path = Some(path);
                                self.file.has_unsaved_changes = false;
                                self.node_counter = self.board.len() as u32;
                                log::info!("board loaded with {} nodes", self.board.len());
                            }
                            Err(e) => {
                                // A document that fails to parse degrades to
                                // an empty board rather than a crash
                                log::error!("failed to parse board: {e}");
                                self.board = Board::new();
                                self.sync.rebuild(&mut self.board);
                                self.machine = Default::default();
                                self.overlays = Default::default();
                                self.file.current_path = None;
                            }
                        }
                    }
                    FileOperationResult::OperationFailed(error) => {
                        log::error!("file operation failed: {error}");
                    }
                }
            }
        }

        // Handle pending save operations
        if let Some(save_op) = self.file.pending_save_operation.take() {
            let ctx = ctx.clone();
            let document_json = self
                .board
                .to_document()
                .to_json()
                .unwrap_or_else(|_| "{\"nodes\":[]}".to_string());
            let sender = self.file.file_operation_sender.clone();

            match save_op {
                PendingSaveOperation::SaveAs => {
                    tokio::spawn(async move {
                        if let Some(handle) = rfd::AsyncFileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("board.json")
                            .save_file()
                            .await
                        {
                            let path = handle.path();
                            match std::fs::write(path, document_json) {
                                Ok(_) => {
                                    if let Some(tx) = sender {
                                        let _ = tx.send(FileOperationResult::SaveCompleted(
                                            path.display().to_string(),
                                        ));
                                    }
                                }
                                Err(e) => {
                                    if let Some(tx) = sender {
                                        let _ = tx.send(FileOperationResult::OperationFailed(
                                            format!("Failed to save file: {}", e),
                                        ));
                                    }
                                }
                            }
                        }
                        ctx.request_repaint();
                    });
                }
                PendingSaveOperation::Save => {
                    if let Some(path) = self.file.current_path.clone() {
                        tokio::spawn(async move {
                            match std::fs::write(&path, document_json) {
                                Ok(_) => {
                                    if let Some(tx) = sender {
                                        let _ = tx.send(FileOperationResult::SaveCompleted(path));
                                    }
                                }
                                Err(e) => {
                                    if let Some(tx) = sender {
                                        let _ = tx.send(FileOperationResult::OperationFailed(
                                            format!("Failed to save file: {}", e),
                                        ));
                                    }
                                }
                            }
                            ctx.request_repaint();
                        });
                    } else {
                        self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
                    }
                }
            }
        }

        // Handle pending load operations
        if let Some(_load_op) = self.file.pending_load_operation.take() {
            let ctx = ctx.clone();
            let sender = self.file.file_operation_sender.clone();

            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                    .await
                {
                    let path = handle.path();
                    match std::fs::read_to_string(path) {
                        Ok(json) => {
                            if let Some(tx) = sender {
                                let _ = tx.send(FileOperationResult::LoadCompleted(
                                    path.display().to_string(),
                                    json,
                                ));
                            }
                        }
                        Err(e) => {
                            if let Some(tx) = sender {
                                let _ = tx.send(FileOperationResult::OperationFailed(format!(
                                    "Failed to read file: {}",
                                    e
                                )));
                            }
                        }
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Opens a file dialog to save the board with a new name.
    pub fn save_board_as(&mut self) {
        self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
    }

    /// Saves the board to the current file path, or triggers "Save As" if no
    /// path is set.
    pub fn save_board(&mut self) {
        if self.file.current_path.is_some() {
            self.file.pending_save_operation = Some(PendingSaveOperation::Save);
        } else {
            self.save_board_as();
        }
    }

    /// Opens a file dialog to load a board from disk.
    pub fn load_board(&mut self) {
        self.file.pending_load_operation = Some(PendingLoadOperation::Load);
    }

    /// Creates a new empty board, resetting interaction and viewport state.
    pub fn new_board(&mut self) {
        self.board = Board::new();
        self.sync.rebuild(&mut self.board);
        self.overlays = Default::default();
        self.machine = Default::default();
        self.file.current_path = None;
        self.file.has_unsaved_changes = false;
        self.node_counter = 0;
        self.canvas.viewport = Default::default();
    }
}
