//! Application state management structures.
//!
//! This module contains the state structures that track the application's
//! current UI state: canvas navigation, file operations, and the main
//! `WhiteboardApp` tying the scene engine to the egui frontend.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::scene::interaction::InteractionMachine;
use crate::scene::overlay::OverlayRegistry;
use crate::scene::store::Board;
use crate::scene::sync::RenderSync;
use crate::scene::viewport::Viewport;

/// State related to canvas navigation and display.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    /// Pan/zoom transform for the canvas (offset is per-session)
    pub viewport: Viewport,
    /// Whether the background dot grid is drawn
    pub show_dots: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            show_dots: true,
        }
    }
}

/// State related to file operations and persistence.
///
/// Manages file paths, unsaved-changes tracking, and the channel used to
/// bring async dialog results back onto the UI thread.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FileState {
    /// Current file path for save/load operations
    #[serde(skip)]
    pub current_path: Option<String>,
    /// Flag indicating the board has unsaved changes
    #[serde(skip)]
    pub has_unsaved_changes: bool,
    /// Pending file operation kicked off by the toolbar
    #[serde(skip)]
    pub pending_save_operation: Option<PendingSaveOperation>,
    #[serde(skip)]
    pub pending_load_operation: Option<PendingLoadOperation>,
    /// Channel for receiving file operation results from async contexts
    #[serde(skip)]
    pub file_operation_sender: Option<Sender<FileOperationResult>>,
    #[serde(skip)]
    pub file_operation_receiver: Option<Receiver<FileOperationResult>>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            current_path: None,
            has_unsaved_changes: false,
            pending_save_operation: None,
            pending_load_operation: None,
            file_operation_sender: Some(sender),
            file_operation_receiver: Some(receiver),
        }
    }
}

/// Represents a pending save operation type.
#[derive(Debug)]
pub enum PendingSaveOperation {
    /// Save with a new file path (show file picker)
    SaveAs,
    /// Save to the existing file path
    Save,
}

/// Represents a pending load operation type.
#[derive(Debug)]
pub enum PendingLoadOperation {
    /// Load from a file (show file picker)
    Load,
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Save operation completed successfully with the given path
    SaveCompleted(String),
    /// Load operation completed successfully with path and content
    LoadCompleted(String, String),
    /// Operation failed with an error message
    OperationFailed(String),
}

/// The main application structure containing UI state and the board.
///
/// This struct implements the `eframe::App` trait and wires pointer and
/// keyboard input into the scene engine's interaction machine, then renders
/// from the synchronizer's cached geometry.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardApp {
    /// The board being edited
    pub board: Board,
    /// Canvas navigation and display state
    pub canvas: CanvasState,
    /// Interaction state machine
    #[serde(skip)]
    pub machine: InteractionMachine,
    /// Render synchronizer draining the board's dirty set each frame
    #[serde(skip)]
    pub sync: RenderSync,
    /// Open media overlays keyed by node id
    #[serde(skip)]
    pub overlays: OverlayRegistry,
    /// File operations state
    pub file: FileState,
    /// Counter for generating unique default node labels
    pub node_counter: u32,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
}

impl Default for WhiteboardApp {
    fn default() -> Self {
        Self {
            board: Board::default(),
            canvas: CanvasState::default(),
            machine: InteractionMachine::default(),
            sync: RenderSync::default(),
            overlays: OverlayRegistry::default(),
            file: FileState::default(),
            node_counter: 0,
            dark_mode: true,
        }
    }
}

impl WhiteboardApp {
    /// Serializes the application state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes application state from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
