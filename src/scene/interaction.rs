//! Transient interaction modes and their transitions.
//!
//! At most one non-idle interaction exists at a time, and `Idle` is the only
//! legal origin for entering one; a concurrent drag-plus-connect is
//! impossible by construction. Cancelling an interaction leaves the store
//! exactly as it was before the interaction began.

use egui::{Pos2, Vec2};

use crate::constants;
use crate::scene::store::Board;
use crate::scene::viewport::Viewport;
use crate::types::{NodeId, NodePatch};

/// Tunables for pointer interactions.
#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// Scene-unit margin within which an in-progress connection snaps to a
    /// nearby node's box.
    pub snap_margin: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snap_margin: constants::SNAP_MARGIN,
        }
    }
}

/// The current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// Nothing in progress
    #[default]
    Idle,
    /// A node follows the pointer
    DraggingNode {
        /// The node being dragged
        node: NodeId,
        /// Offset from the pointer to the node's top-left corner, so the
        /// node does not jump to the pointer on grab
        grab_offset: Vec2,
        /// Top-left position when the drag began, restored on cancel
        origin: Pos2,
    },
    /// The background drag pans the viewport
    PanningViewport {
        /// Last pointer position in screen space
        last_screen: Pos2,
    },
    /// An arrow is being drawn from a node
    ConnectingFrom {
        /// The node the connection starts at
        source: NodeId,
        /// Current pointer position in scene coordinates
        pointer: Pos2,
        /// Node currently within the snap margin, if any
        hovered_target: Option<NodeId>,
    },
}

/// Drives [`Interaction`] transitions from pointer events.
///
/// The machine mutates the board and viewport directly: node positions
/// update continuously while dragging, the viewport offset while panning.
/// The connect gesture starts with the connect modifier held on
/// pointer-down over a node; releasing over a target commits the edge,
/// pressing on empty background (or [`InteractionMachine::cancel`]) aborts
/// without creating one.
#[derive(Debug, Default)]
pub struct InteractionMachine {
    state: Interaction,
    config: InteractionConfig,
}

impl InteractionMachine {
    /// Creates a machine with the given tunables.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: Interaction::Idle,
            config,
        }
    }

    /// The current interaction mode.
    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// Returns true when no interaction is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == Interaction::Idle
    }

    /// The node currently being dragged, if any.
    pub fn dragging_node(&self) -> Option<NodeId> {
        match self.state {
            Interaction::DraggingNode { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Handles a pointer press at a screen position.
    ///
    /// From idle: a press on a node starts a drag (or, with the connect
    /// modifier held, a connection); a press on the background starts a pan.
    /// While connecting: a press on a node commits the edge (a press on the
    /// source cancels), a press on the background cancels.
    pub fn pointer_down(
        &mut self,
        board: &mut Board,
        viewport: &Viewport,
        screen: Pos2,
        connect_modifier: bool,
    ) {
        let scene = viewport.screen_to_scene(screen);
        match self.state {
            Interaction::Idle => match board.hit_test(scene) {
                Some(node) if connect_modifier => {
                    self.state = Interaction::ConnectingFrom {
                        source: node,
                        pointer: scene,
                        hovered_target: None,
                    };
                }
                Some(node) => {
                    if let Some(rect) = board.rect(node) {
                        self.state = Interaction::DraggingNode {
                            node,
                            grab_offset: rect.min - scene,
                            origin: rect.min,
                        };
                    }
                }
                None => {
                    self.state = Interaction::PanningViewport {
                        last_screen: screen,
                    };
                }
            },
            Interaction::ConnectingFrom { source, .. } => {
                if let Some(target) = board.hit_test(scene) {
                    if target != source {
                        board.connect(source, target);
                    }
                }
                self.state = Interaction::Idle;
            }
            // A second press while dragging or panning cannot occur with a
            // single pointer; ignore it rather than corrupting state.
            _ => {}
        }
    }

    /// Handles pointer motion at a screen position.
    pub fn pointer_move(&mut self, board: &mut Board, viewport: &mut Viewport, screen: Pos2) {
        let snap_margin = self.config.snap_margin;
        match &mut self.state {
            Interaction::Idle => {}
            Interaction::DraggingNode {
                node, grab_offset, ..
            } => {
                let top_left = viewport.screen_to_scene(screen) + *grab_offset;
                board.update_node(*node, NodePatch::position(top_left.x, top_left.y));
            }
            Interaction::PanningViewport { last_screen } => {
                viewport.pan_by(screen - *last_screen);
                *last_screen = screen;
            }
            Interaction::ConnectingFrom {
                source,
                pointer,
                hovered_target,
            } => {
                let scene = viewport.screen_to_scene(screen);
                *pointer = scene;
                *hovered_target = board
                    .hit_test_with_margin(scene, snap_margin)
                    .filter(|target| target != source);
            }
        }
    }

    /// Handles a pointer release at a screen position.
    ///
    /// Ends a drag by committing the final position (one authoritative
    /// mutation) and ends a pan. While connecting, a release over a node
    /// commits the edge — unless it is the source, which cancels — and a
    /// release over the background keeps the connection live so the target
    /// can still be clicked.
    pub fn pointer_up(&mut self, board: &mut Board, viewport: &Viewport, screen: Pos2) {
        match self.state {
            Interaction::DraggingNode {
                node, grab_offset, ..
            } => {
                let top_left = viewport.screen_to_scene(screen) + grab_offset;
                board.update_node(node, NodePatch::position(top_left.x, top_left.y));
                self.state = Interaction::Idle;
            }
            Interaction::PanningViewport { .. } => {
                self.state = Interaction::Idle;
            }
            Interaction::ConnectingFrom { source, .. } => {
                let scene = viewport.screen_to_scene(screen);
                match board.hit_test(scene) {
                    Some(target) if target == source => {
                        self.state = Interaction::Idle;
                    }
                    Some(target) => {
                        board.connect(source, target);
                        self.state = Interaction::Idle;
                    }
                    None => {}
                }
            }
            Interaction::Idle => {}
        }
    }

    /// Aborts the current interaction (Escape, focus loss).
    ///
    /// A cancelled drag restores the node to its pre-drag position; a
    /// cancelled connection creates no edge.
    pub fn cancel(&mut self, board: &mut Board) {
        if let Interaction::DraggingNode { node, origin, .. } = self.state {
            board.update_node(node, NodePatch::position(origin.x, origin.y));
        }
        self.state = Interaction::Idle;
    }
}
