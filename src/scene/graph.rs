//! Connection-graph view over the board.
//!
//! Edges are not stored separately; the directed adjacency is implied by
//! each node's outgoing-connection list. Everything here keeps that list
//! duplicate-free and self-reference-free, and tolerates dangling targets
//! by skipping them.

use crate::scene::store::Board;
use crate::types::NodeId;

impl Board {
    /// Adds a directed edge from `source` to `target`.
    ///
    /// Self-edges, duplicates, and references to absent nodes are silently
    /// ignored (not errors). Returns true when an edge was actually added.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> bool {
        if source == target || !self.contains(target) {
            return false;
        }
        let Some(connections) = self.connections_mut(source) else {
            return false;
        };
        if connections.contains(&target) {
            return false;
        }
        connections.push(target);
        self.mark_dirty(source);
        true
    }

    /// Removes the directed edge from `source` to `target`, if present.
    pub fn disconnect(&mut self, source: NodeId, target: NodeId) -> bool {
        let Some(connections) = self.connections_mut(source) else {
            return false;
        };
        let Some(slot) = connections.iter().position(|&id| id == target) else {
            return false;
        };
        connections.remove(slot);
        self.mark_dirty(source);
        true
    }

    /// The ordered outgoing targets of a node; empty for unknown ids.
    pub fn outgoing(&self, source: NodeId) -> &[NodeId] {
        self.get(source)
            .map(|node| node.connections.as_slice())
            .unwrap_or_default()
    }

    /// Every (source, target) edge in render order, skipping edges whose
    /// target is no longer present in the store.
    pub fn all_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes()
            .iter()
            .flat_map(|node| {
                node.connections
                    .iter()
                    .filter(|&&target| self.contains(target))
                    .map(move |&target| (node.id, target))
            })
            .collect()
    }
}
