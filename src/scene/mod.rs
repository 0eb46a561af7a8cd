//! The scene geometry and rendering-sync engine.
//!
//! Everything here is independent of the drawing backend: it maintains
//! consistent spatial state (node boxes, connection endpoints, the viewport
//! transform) under continuous mutation and hands the UI layer ready-to-draw
//! geometry in scene coordinates.
//!
//! # Module Organization
//!
//! - `geometry` - pure edge-clipping and box-intersection math
//! - `viewport` - pan/zoom transform between screen and scene coordinates
//! - `store` - the authoritative node collection with derived caches
//! - `layout` - deterministic overlap resolution for node placement
//! - `graph` - the connection graph implied by node connection lists
//! - `interaction` - the drag/pan/connect state machine
//! - `sync` - bounded per-frame refresh of derived arrow geometry
//! - `overlay` - media overlay descriptors projected by the backend

pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod overlay;
pub mod store;
pub mod sync;
pub mod viewport;
