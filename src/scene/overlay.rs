//! Overlay descriptors for media panels anchored to nodes.
//!
//! The scene engine never decodes media. When a node's media zone is
//! activated, the registry records a descriptor (kind, source, placement
//! rect in scene coordinates) and the rendering backend is responsible for
//! projecting it into an actual widget. This keeps the geometry core free
//! of any presentation technology.

use std::collections::HashMap;

use egui::Rect;

use crate::scene::viewport::Viewport;
use crate::types::{MediaKind, NodeId};

/// What an overlay should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Full-size image view
    Image,
    /// Video player
    Video,
    /// Audio controls
    Audio,
    /// PDF viewer
    Pdf,
}

impl OverlayKind {
    /// Maps a node's media kind to an overlay kind; `None` media has no
    /// overlay.
    pub fn from_media(kind: MediaKind) -> Option<Self> {
        match kind {
            MediaKind::None => None,
            MediaKind::Image => Some(Self::Image),
            MediaKind::Video => Some(Self::Video),
            MediaKind::Audio => Some(Self::Audio),
            MediaKind::Pdf => Some(Self::Pdf),
        }
    }
}

/// One overlay: which node it belongs to, what it shows, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDescriptor {
    /// Node this overlay is anchored to
    pub node: NodeId,
    /// What kind of widget to present
    pub kind: OverlayKind,
    /// Opaque media source locator
    pub src: String,
    /// Placement in scene coordinates
    pub rect: Rect,
}

impl OverlayDescriptor {
    /// Where the overlay lands on screen under the current viewport.
    pub fn screen_rect(&self, viewport: &Viewport) -> Rect {
        Rect::from_min_max(
            viewport.scene_to_screen(self.rect.min),
            viewport.scene_to_screen(self.rect.max),
        )
    }
}

/// At most one overlay per node, keyed by node id.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    entries: HashMap<NodeId, OverlayDescriptor>,
}

impl OverlayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the overlay for a node.
    pub fn set(&mut self, descriptor: OverlayDescriptor) {
        self.entries.insert(descriptor.node, descriptor);
    }

    /// Removes a node's overlay, returning it if one was open.
    pub fn clear(&mut self, node: NodeId) -> Option<OverlayDescriptor> {
        self.entries.remove(&node)
    }

    /// Opens the overlay if the node has none, closes it otherwise.
    /// Returns true when the overlay is open afterwards.
    pub fn toggle(&mut self, descriptor: OverlayDescriptor) -> bool {
        if self.entries.remove(&descriptor.node).is_some() {
            false
        } else {
            self.entries.insert(descriptor.node, descriptor);
            true
        }
    }

    /// The overlay currently open for a node, if any.
    pub fn get(&self, node: NodeId) -> Option<&OverlayDescriptor> {
        self.entries.get(&node)
    }

    /// All open overlays, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayDescriptor> {
        self.entries.values()
    }

    /// Returns true when no overlay is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
