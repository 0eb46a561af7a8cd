//! Shared application-wide constants.
//! Centralizes tweakable values used across the scene engine and UI rendering.

// Node dimensions
/// Default node width in scene units.
pub const NODE_WIDTH: f32 = 180.0;
/// Default node height in scene units (when expanded).
pub const NODE_HEIGHT: f32 = 150.0;
/// Height every node collapses to, in scene units. All geometry consumers
/// must use this instead of the stored height when a node is not expanded.
pub const COLLAPSED_HEIGHT: f32 = 40.0;
/// Default fill color for freshly created nodes.
pub const NODE_COLOR: &str = "#bbdefb";
/// Corner radius for node rectangles (in screen pixels after transform).
pub const NODE_CORNER_RADIUS: f32 = 10.0;

// Viewport
/// Smallest allowed zoom factor; guards against degenerate/inverted zoom.
pub const MIN_ZOOM: f32 = 0.25;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f32 = 5.0;
/// Multiplicative zoom step applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 1.05;

// Connection interactions
/// Distance (in scene units) within which an in-progress connection snaps
/// its endpoint to a nearby node's clipped edge point.
pub const SNAP_MARGIN: f32 = 8.0;
/// Length of the arrow head drawn at a connection's target end (screen pixels
/// before zoom scaling).
pub const ARROW_HEAD_SIZE: f32 = 8.0;

// Overlap resolution
/// Minimum rightward nudge applied when a placed box intersects an obstacle.
pub const NUDGE_STEP_X: f32 = 24.0;
/// Minimum downward nudge applied when wrapping to a new row.
pub const NUDGE_STEP_Y: f32 = 40.0;
/// Left margin a wrapped box resets to.
pub const WRAP_RESET_X: f32 = 16.0;
/// Fallback wrap threshold when no viewport width is known; the UI passes
/// twice the live canvas width instead.
pub const WRAP_WIDTH_FALLBACK: f32 = 2560.0;
/// Attempt ceiling for overlap resolution; past it the last computed
/// position is accepted even if still overlapping.
pub const RESOLVE_MAX_ATTEMPTS: usize = 200;

// Background dots
/// Spacing between background dots in scene units.
pub const DOT_SPACING: f32 = 60.0;
/// Radius of background dots (in screen pixels).
pub const DOT_RADIUS: f32 = 3.0;
