//! Core data types and structures for the whiteboard tool.
//!
//! This module defines the node record placed on the canvas, the patch type
//! used for in-place mutation, and the flat document shape exchanged with
//! persistence collaborators.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants;

/// Unique identifier for canvas nodes.
pub type NodeId = Uuid;

/// The kind of media attached to a node.
///
/// The source locator is opaque to the scene engine; only the presence of a
/// media kind affects layout, never decoded content.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// No media attached
    #[default]
    None,
    /// A still image
    Image,
    /// A video clip
    Video,
    /// An audio clip
    Audio,
    /// A PDF document
    Pdf,
}

impl MediaKind {
    /// Returns true when no media is attached.
    pub fn is_none(self) -> bool {
        self == MediaKind::None
    }
}

/// A single node placed on the canvas.
///
/// Position is the top-left corner in scene coordinates. `height` is the
/// expanded height; when `expanded` is false every geometry consumer must use
/// [`CanvasNode::effective_height`] instead, otherwise arrows desync from the
/// rendered box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasNode {
    /// Unique identifier, assigned at creation and immutable afterwards
    pub id: NodeId,
    /// Short display name shown in the node's header zone
    pub label: String,
    /// Body text shown while the node is expanded
    pub text: String,
    /// Kind of attached media, if any
    pub media_type: MediaKind,
    /// Opaque media source locator (URL or path)
    pub media_src: String,
    /// Left edge in scene coordinates
    pub x: f32,
    /// Top edge in scene coordinates
    pub y: f32,
    /// Node width in scene units
    pub width: f32,
    /// Expanded node height in scene units
    pub height: f32,
    /// Fill color as a hex string (e.g. "#bbdefb")
    pub color: String,
    /// Whether the node shows its body or only the collapsed header
    pub expanded: bool,
    /// Ordered list of target node ids this node points to.
    /// Maintained duplicate-free and self-reference-free by the store.
    pub connections: Vec<NodeId>,
}

impl Default for CanvasNode {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            label: "Untitled".to_string(),
            text: String::new(),
            media_type: MediaKind::None,
            media_src: String::new(),
            x: 0.0,
            y: 0.0,
            width: constants::NODE_WIDTH,
            height: constants::NODE_HEIGHT,
            color: constants::NODE_COLOR.to_string(),
            expanded: true,
            connections: Vec::new(),
        }
    }
}

impl CanvasNode {
    /// Creates a node with the given label and top-left position, applying
    /// defaults for everything else.
    pub fn new(label: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            ..Self::default()
        }
    }

    /// Height used for all geometry purposes: the stored height while
    /// expanded, the fixed collapsed header height otherwise.
    pub fn effective_height(&self) -> f32 {
        if self.expanded {
            self.height
        } else {
            constants::COLLAPSED_HEIGHT
        }
    }
}

/// A partial update merged into a node by the store.
///
/// Every field is optional; an empty patch is a no-op (no cache invalidation,
/// no dirty marking).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    /// New display label
    pub label: Option<String>,
    /// New body text
    pub text: Option<String>,
    /// New media kind
    pub media_type: Option<MediaKind>,
    /// New media source locator
    pub media_src: Option<String>,
    /// New left edge
    pub x: Option<f32>,
    /// New top edge
    pub y: Option<f32>,
    /// New width
    pub width: Option<f32>,
    /// New expanded height
    pub height: Option<f32>,
    /// New fill color
    pub color: Option<String>,
    /// New expansion state
    pub expanded: Option<bool>,
}

impl NodePatch {
    /// Patch that only moves a node.
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that only resizes a node.
    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Patch that only toggles expansion.
    pub fn expanded(expanded: bool) -> Self {
        Self {
            expanded: Some(expanded),
            ..Self::default()
        }
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true when applying the patch can change the node's box
    /// (position, size, or expansion), requiring a center-cache recompute.
    pub fn affects_geometry(&self) -> bool {
        self.x.is_some()
            || self.y.is_some()
            || self.width.is_some()
            || self.height.is_some()
            || self.expanded.is_some()
    }
}

/// The flat node-list document exchanged with persistence collaborators.
///
/// Field names serialize in camelCase to match the stored `nodes.json`
/// schema; the store accepts this exact shape back without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardDocument {
    /// All nodes in insertion order
    pub nodes: Vec<CanvasNode>,
}

impl BoardDocument {
    /// Serialize the document to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation_defaults() {
        let node = CanvasNode::new("Idea", 100.0, 200.0);

        assert_eq!(node.label, "Idea");
        assert_eq!((node.x, node.y), (100.0, 200.0));
        assert_eq!(node.width, constants::NODE_WIDTH);
        assert_eq!(node.height, constants::NODE_HEIGHT);
        assert_eq!(node.color, constants::NODE_COLOR);
        assert!(node.expanded);
        assert!(node.media_type.is_none());
        assert!(node.connections.is_empty());
        assert!(!node.id.is_nil());
    }

    #[test]
    fn test_effective_height_follows_expansion() {
        let mut node = CanvasNode::new("A", 0.0, 0.0);
        node.height = 320.0;

        assert_eq!(node.effective_height(), 320.0);

        node.expanded = false;
        assert_eq!(node.effective_height(), constants::COLLAPSED_HEIGHT);
    }

    #[test]
    fn test_media_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Image).unwrap(),
            "\"image\""
        );
        assert_eq!(serde_json::to_string(&MediaKind::Pdf).unwrap(), "\"pdf\"");
        let kind: MediaKind = serde_json::from_str("\"none\"").unwrap();
        assert!(kind.is_none());
    }

    #[test]
    fn test_node_serializes_camel_case_fields() {
        let mut node = CanvasNode::new("A", 1.0, 2.0);
        node.media_type = MediaKind::Video;
        node.media_src = "https://example.com/clip".to_string();

        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"mediaType\":\"video\""));
        assert!(json.contains("\"mediaSrc\""));
        assert!(!json.contains("media_type"));
    }

    #[test]
    fn test_node_deserializes_with_missing_fields() {
        // A minimal record from an older document still loads with defaults.
        let json = r#"{"id":"8f9b3a34-02a5-4c1b-9f6a-6f2a5d9e1b10","label":"Old","x":5.0,"y":6.0}"#;
        let node: CanvasNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.label, "Old");
        assert_eq!((node.x, node.y), (5.0, 6.0));
        assert_eq!(node.width, constants::NODE_WIDTH);
        assert!(node.expanded);
        assert!(node.media_type.is_none());
    }

    #[test]
    fn test_empty_patch_is_empty() {
        let patch = NodePatch::default();
        assert!(patch.is_empty());
        assert!(!patch.affects_geometry());
    }

    #[test]
    fn test_geometry_patches_flagged() {
        assert!(NodePatch::position(1.0, 2.0).affects_geometry());
        assert!(NodePatch::size(10.0, 10.0).affects_geometry());
        assert!(NodePatch::expanded(false).affects_geometry());
        let label_only = NodePatch {
            label: Some("renamed".to_string()),
            ..NodePatch::default()
        };
        assert!(!label_only.affects_geometry());
    }

    #[test]
    fn test_document_roundtrip() {
        let mut doc = BoardDocument::default();
        for i in 0..5 {
            doc.nodes
                .push(CanvasNode::new(format!("n{i}"), i as f32 * 50.0, 0.0));
        }
        let (a, b, c) = (doc.nodes[0].id, doc.nodes[1].id, doc.nodes[2].id);
        doc.nodes[0].connections.push(b);
        doc.nodes[1].connections.push(c);
        doc.nodes[3].connections.push(a);
        doc.nodes[2].expanded = false;
        doc.nodes[4].media_type = MediaKind::Audio;
        doc.nodes[4].media_src = "song.mp3".to_string();

        let json = doc.to_json().unwrap();
        let restored = BoardDocument::from_json(&json).unwrap();

        assert_eq!(restored, doc);
        assert_eq!(restored.nodes[3].connections, vec![a]);
        assert!(!restored.nodes[2].expanded);
        assert_eq!(restored.nodes.len(), 5);
        assert_eq!(restored.nodes[1].id, doc.nodes[1].id);
    }
}
