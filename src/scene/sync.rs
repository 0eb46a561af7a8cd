//! Render synchronization: bounded per-frame refresh of derived geometry.
//!
//! Mutations mark nodes dirty in the store; each frame the synchronizer
//! drains that set and recomputes only the clipped arrow endpoints of edges
//! incident to dirty nodes. Edges untouched by the frame's mutations keep
//! their cached endpoints, which is what keeps dragging smooth as the node
//! and edge count grows. Zoom and pan never touch the cache: endpoints are
//! stored in scene coordinates and projected at draw time.

use std::collections::HashMap;

use egui::Pos2;

use crate::scene::geometry;
use crate::scene::interaction::{Interaction, InteractionMachine};
use crate::scene::store::Board;
use crate::types::NodeId;

/// A connection arrow's clipped endpoints in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    /// Point on the source node's boundary
    pub start: Pos2,
    /// Point on the target node's boundary
    pub end: Pos2,
}

/// Keeps the arrow-endpoint cache in step with the store.
#[derive(Debug, Default)]
pub struct RenderSync {
    endpoints: HashMap<(NodeId, NodeId), EdgeSegment>,
    repaint_queued: bool,
}

impl RenderSync {
    /// Creates an empty synchronizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the store's dirty set and refreshes affected edge geometry.
    ///
    /// Cached endpoints are recomputed only for edges incident to a dirty
    /// node (as source or target); stale entries for edges that no longer
    /// exist are dropped at the same time. A no-op when nothing is dirty.
    pub fn sync(&mut self, board: &mut Board) {
        let dirty = board.take_dirty();
        if dirty.is_empty() {
            return;
        }
        self.repaint_queued = true;

        self.endpoints
            .retain(|(source, target), _| !dirty.contains(source) && !dirty.contains(target));

        for (source, target) in board.all_edges() {
            if dirty.contains(&source)
                || dirty.contains(&target)
                || !self.endpoints.contains_key(&(source, target))
            {
                if let Some(segment) = clip_edge(board, source, target) {
                    self.endpoints.insert((source, target), segment);
                }
            }
        }
    }

    /// Full consistency pass: discards the cache and recomputes every edge.
    /// Used after document loads and other wholesale changes.
    pub fn rebuild(&mut self, board: &mut Board) {
        board.take_dirty();
        self.endpoints.clear();
        for (source, target) in board.all_edges() {
            if let Some(segment) = clip_edge(board, source, target) {
                self.endpoints.insert((source, target), segment);
            }
        }
        self.repaint_queued = true;
    }

    /// Cached endpoints for one edge.
    pub fn segment(&self, source: NodeId, target: NodeId) -> Option<EdgeSegment> {
        self.endpoints.get(&(source, target)).copied()
    }

    /// Number of cached edge segments.
    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Queues a repaint without any geometry change (e.g. pure pan/zoom).
    pub fn request_repaint(&mut self) {
        self.repaint_queued = true;
    }

    /// Consumes the single pending repaint token. At most one is pending at
    /// a time, and interaction teardown clears it by consuming it here.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint_queued)
    }
}

/// Clips the segment between two nodes' centers to their boundaries.
/// Returns `None` when either endpoint is missing from the store.
fn clip_edge(board: &Board, source: NodeId, target: NodeId) -> Option<EdgeSegment> {
    let source_rect = board.rect(source)?;
    let target_rect = board.rect(target)?;
    let source_center = board.center(source)?;
    let target_center = board.center(target)?;

    let (start, end) = geometry::clip_segment_to_boxes(
        source_center,
        source_rect.size() / 2.0,
        target_center,
        target_rect.size() / 2.0,
    );
    Some(EdgeSegment { start, end })
}

/// The in-progress connection arrow, if one is being drawn.
///
/// The start is the source box's clipped boundary point. The end snaps to
/// the hovered target's clipped boundary when the pointer is within the
/// snap margin, and follows the raw pointer otherwise.
pub fn connection_preview(board: &Board, machine: &InteractionMachine) -> Option<EdgeSegment> {
    let Interaction::ConnectingFrom {
        source,
        pointer,
        hovered_target,
    } = *machine.state()
    else {
        return None;
    };

    if let Some(target) = hovered_target {
        return clip_edge(board, source, target);
    }

    let source_rect = board.rect(source)?;
    let source_center = board.center(source)?;
    let start = geometry::clip_segment_to_point(source_center, source_rect.size() / 2.0, pointer);
    Some(EdgeSegment {
        start,
        end: pointer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::interaction::InteractionMachine;
    use crate::scene::viewport::Viewport;
    use crate::types::{CanvasNode, NodePatch};
    use egui::pos2;

    fn collapsed(x: f32, y: f32) -> CanvasNode {
        let mut node = CanvasNode::new("n", x, y);
        node.width = 150.0;
        node.expanded = false;
        node
    }

    #[test]
    fn test_sync_populates_clipped_endpoints() {
        let mut board = Board::new();
        let a = board.add_node(collapsed(0.0, 0.0));
        let b = board.add_node(collapsed(400.0, 0.0));
        board.connect(a, b);

        let mut sync = RenderSync::new();
        sync.sync(&mut board);

        let segment = sync.segment(a, b).expect("edge cached");
        // Facing edges of two 150x40 collapsed boxes on the same row.
        assert_eq!(segment.start, pos2(150.0, 20.0));
        assert_eq!(segment.end, pos2(400.0, 20.0));
    }

    #[test]
    fn test_sync_refreshes_only_dirty_incident_edges() {
        let mut board = Board::new();
        let a = board.add_node(collapsed(0.0, 0.0));
        let b = board.add_node(collapsed(400.0, 0.0));
        let c = board.add_node(collapsed(0.0, 300.0));
        let d = board.add_node(collapsed(400.0, 300.0));
        board.connect(a, b);
        board.connect(c, d);

        let mut sync = RenderSync::new();
        sync.sync(&mut board);
        let untouched_before = sync.segment(c, d).unwrap();

        // Drag A: only the A->B segment may change.
        board.update_node(a, NodePatch::position(0.0, 100.0));
        sync.sync(&mut board);

        assert_eq!(sync.segment(c, d).unwrap(), untouched_before);
        let moved = sync.segment(a, b).unwrap();
        assert_ne!(moved.start, pos2(150.0, 20.0));
    }

    #[test]
    fn test_expansion_toggle_moves_target_endpoint() {
        let mut board = Board::new();
        let a = board.add_node(collapsed(0.0, 0.0));
        let mut tall = collapsed(200.0, 300.0);
        tall.height = 320.0;
        let b = board.add_node(tall);
        board.connect(a, b);

        let mut sync = RenderSync::new();
        sync.sync(&mut board);
        let before = sync.segment(a, b).unwrap();

        board.update_node(b, NodePatch::expanded(true));
        sync.sync(&mut board);
        let after = sync.segment(a, b).unwrap();

        // The target center dropped from y+20 to y+160, so the clipped
        // endpoint on B's boundary moved with it.
        assert_eq!(board.center(b).unwrap().y, 460.0);
        assert_ne!(before.end, after.end);
        assert_eq!(after.end.y, 300.0, "still enters through B's top edge");
    }

    #[test]
    fn test_disconnect_drops_cached_segment() {
        let mut board = Board::new();
        let a = board.add_node(collapsed(0.0, 0.0));
        let b = board.add_node(collapsed(400.0, 0.0));
        board.connect(a, b);

        let mut sync = RenderSync::new();
        sync.sync(&mut board);
        assert_eq!(sync.edge_count(), 1);

        board.disconnect(a, b);
        sync.sync(&mut board);

        assert_eq!(sync.edge_count(), 0);
        assert!(sync.segment(a, b).is_none());
    }

    #[test]
    fn test_repaint_token_is_single_shot() {
        let mut board = Board::new();
        let a = board.add_node(collapsed(0.0, 0.0));

        let mut sync = RenderSync::new();
        sync.sync(&mut board);
        assert!(sync.take_repaint());
        assert!(!sync.take_repaint());

        // Nothing dirty: no work, no repaint.
        sync.sync(&mut board);
        assert!(!sync.take_repaint());

        board.update_node(a, NodePatch::position(5.0, 5.0));
        sync.sync(&mut board);
        assert!(sync.take_repaint());
    }

    #[test]
    fn test_rebuild_recomputes_everything() {
        let mut board = Board::new();
        let a = board.add_node(collapsed(0.0, 0.0));
        let b = board.add_node(collapsed(400.0, 0.0));
        board.connect(a, b);

        let mut sync = RenderSync::new();
        sync.rebuild(&mut board);

        assert_eq!(sync.edge_count(), 1);
        assert!(sync.take_repaint());
        assert!(board.take_dirty().is_empty(), "rebuild consumes dirt");
    }

    #[test]
    fn test_preview_snaps_to_hovered_target_box() {
        let mut board = Board::new();
        let source = board.add_node(collapsed(0.0, 0.0));
        let target = board.add_node(collapsed(400.0, 0.0));
        let mut machine = InteractionMachine::default();
        let mut viewport = Viewport::default();

        machine.pointer_down(&mut board, &viewport, pos2(10.0, 10.0), true);
        // Within the snap margin of the target's left edge.
        machine.pointer_move(&mut board, &mut viewport, pos2(395.0, 20.0));

        let preview = connection_preview(&board, &machine).expect("preview");
        let expected = clip_edge(&board, source, target).unwrap();
        assert_eq!(preview, expected);
        assert_ne!(preview.end, pos2(395.0, 20.0), "not the raw pointer");
    }

    #[test]
    fn test_preview_follows_pointer_when_nothing_near() {
        let mut board = Board::new();
        board.add_node(collapsed(0.0, 0.0));
        let mut machine = InteractionMachine::default();
        let mut viewport = Viewport::default();

        machine.pointer_down(&mut board, &viewport, pos2(10.0, 10.0), true);
        machine.pointer_move(&mut board, &mut viewport, pos2(250.0, 200.0));

        let preview = connection_preview(&board, &machine).expect("preview");
        assert_eq!(preview.end, pos2(250.0, 200.0));
        // The start stays clipped to the source boundary.
        let rect = board.rect(board.nodes()[0].id).unwrap();
        assert!(!rect.shrink(0.1).contains(preview.start));
    }
}
