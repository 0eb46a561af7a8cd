//! The node spatial store: canonical node records plus derived geometry.
//!
//! The [`Board`] exclusively owns the node records; every other component
//! reads through it or merges short-lived copies back via
//! [`Board::update_node`]. Alongside the records it maintains a derived
//! center cache (recomputed on any geometry-affecting mutation) and a dirty
//! set drained by the render synchronizer.

use std::collections::{HashMap, HashSet};

use egui::{pos2, vec2, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::scene::layout::{self, NudgeConfig};
use crate::types::{BoardDocument, CanvasNode, NodeId, NodePatch};

/// The box a node currently occupies, honoring effective height.
pub fn node_rect(node: &CanvasNode) -> Rect {
    Rect::from_min_size(
        pos2(node.x, node.y),
        vec2(node.width, node.effective_height()),
    )
}

/// The geometric center of a node's current box.
pub fn node_center(node: &CanvasNode) -> Pos2 {
    node_rect(node).center()
}

/// Authoritative collection of nodes with cached centers and dirty tracking.
///
/// Nodes are kept in insertion order; identifiers never collide (v4 UUIDs
/// assigned at creation). Serializes as the flat [`BoardDocument`] shape so
/// persisted boards round-trip without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BoardDocument", into = "BoardDocument")]
pub struct Board {
    nodes: Vec<CanvasNode>,
    index: HashMap<NodeId, usize>,
    centers: HashMap<NodeId, Pos2>,
    dirty: HashSet<NodeId>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes on the board.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the board has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a node, seeds its center cache entry, and marks it dirty.
    ///
    /// Returns the node's id. A record whose id is already present is
    /// ignored (can only happen with a corrupt document).
    pub fn add_node(&mut self, node: CanvasNode) -> NodeId {
        let id = node.id;
        if self.index.contains_key(&id) {
            log::warn!("ignoring node with duplicate id {id}");
            return id;
        }
        self.centers.insert(id, node_center(&node));
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        self.dirty.insert(id);
        id
    }

    /// Merges a patch into the node.
    ///
    /// Recomputes the cached center when the patch can change the node's box
    /// and marks the node dirty. An empty patch changes nothing; an unknown
    /// id is a silent no-op (expected under concurrent UI events).
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) {
        if patch.is_empty() {
            return;
        }
        let Some(&slot) = self.index.get(&id) else {
            return;
        };
        let affects_geometry = patch.affects_geometry();
        let node = &mut self.nodes[slot];

        if let Some(label) = patch.label {
            node.label = label;
        }
        if let Some(text) = patch.text {
            node.text = text;
        }
        if let Some(media_type) = patch.media_type {
            node.media_type = media_type;
        }
        if let Some(media_src) = patch.media_src {
            node.media_src = media_src;
        }
        if let Some(x) = patch.x {
            node.x = x;
        }
        if let Some(y) = patch.y {
            node.y = y;
        }
        if let Some(width) = patch.width {
            node.width = width;
        }
        if let Some(height) = patch.height {
            node.height = height;
        }
        if let Some(color) = patch.color {
            node.color = color;
        }
        if let Some(expanded) = patch.expanded {
            node.expanded = expanded;
        }

        if affects_geometry {
            self.centers.insert(id, node_center(&self.nodes[slot]));
        }
        self.dirty.insert(id);
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&CanvasNode> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Returns true when a node with this id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    /// The cached center of a node's box, falling back to a live computation
    /// when the cache entry is transiently absent.
    pub fn center(&self, id: NodeId) -> Option<Pos2> {
        self.centers
            .get(&id)
            .copied()
            .or_else(|| self.get(id).map(node_center))
    }

    /// The box a node currently occupies.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(node_rect)
    }

    /// The topmost node whose box contains the scene position. Later
    /// insertions render on top and therefore win.
    pub fn hit_test(&self, scene_pos: Pos2) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node_rect(node).contains(scene_pos))
            .map(|node| node.id)
    }

    /// Like [`Board::hit_test`] with each box grown by `margin` scene units;
    /// used for snapping in-progress connections to nearby nodes.
    pub fn hit_test_with_margin(&self, scene_pos: Pos2, margin: f32) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node_rect(node).expand(margin).contains(scene_pos))
            .map(|node| node.id)
    }

    /// Routes a proposed box through the overlap resolver against every
    /// other node's box (insertion order), optionally excluding one node
    /// (the one being placed).
    pub fn resolve_placement(
        &self,
        candidate: Rect,
        exclude: Option<NodeId>,
        config: &NudgeConfig,
    ) -> Rect {
        let obstacles: Vec<Rect> = self
            .nodes
            .iter()
            .filter(|node| Some(node.id) != exclude)
            .map(node_rect)
            .collect();
        layout::resolve_overlap(candidate, &obstacles, config)
    }

    /// Marks a node as needing visual resynchronization.
    pub fn mark_dirty(&mut self, id: NodeId) {
        if self.contains(id) {
            self.dirty.insert(id);
        }
    }

    /// Drains and returns the set of nodes mutated since the last drain.
    pub fn take_dirty(&mut self) -> HashSet<NodeId> {
        std::mem::take(&mut self.dirty)
    }

    /// Mutable access to a node's outgoing-connection list, for the
    /// connection-graph operations. Never hands out geometry fields, so the
    /// center cache cannot be bypassed.
    pub(crate) fn connections_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        let slot = *self.index.get(&id)?;
        Some(&mut self.nodes[slot].connections)
    }

    /// Snapshot of the board as the flat persistence document.
    pub fn to_document(&self) -> BoardDocument {
        BoardDocument {
            nodes: self.nodes.clone(),
        }
    }

    /// Rebuilds a board from a persisted document, reindexing and reseeding
    /// the center cache. All nodes start dirty so the first sync pass
    /// refreshes everything.
    pub fn from_document(document: BoardDocument) -> Self {
        let mut board = Self::new();
        for node in document.nodes {
            board.add_node(node);
        }
        board
    }
}

impl From<BoardDocument> for Board {
    fn from(document: BoardDocument) -> Self {
        Self::from_document(document)
    }
}

impl From<Board> for BoardDocument {
    fn from(board: Board) -> Self {
        BoardDocument { nodes: board.nodes }
    }
}
