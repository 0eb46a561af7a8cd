//! # Whiteboard Tool
//!
//! An infinite-canvas whiteboard: draggable, collapsible nodes carrying text
//! and media references, linked with directional arrows, on a pannable and
//! zoomable plane.
//!
//! ## Features
//! - Interactive node creation, dragging, and expand/collapse
//! - Shift-drag connection drawing with snap-to-target
//! - Pointer-anchored zooming and background panning
//! - Deterministic overlap resolution when placing nodes
//! - Dirty-tracked rendering sync that bounds per-frame geometry work
//! - JSON save/load of the flat node-list document

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod scene;
mod types;
mod ui;

// Re-export public types and functions
pub use scene::*;
pub use types::*;
use ui::WhiteboardApp;

/// Runs the whiteboard application with default settings.
///
/// Initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an
/// `eframe::Error` if initialization fails.
///
/// # Example
///
/// ```no_run
/// use whiteboard_tool::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Whiteboard Tool",
        options,
        Box::new(|_cc| Ok(Box::new(WhiteboardApp::default()))),
    )
}
