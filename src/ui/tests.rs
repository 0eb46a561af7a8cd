use super::*;
use crate::scene::geometry::boxes_intersect;
use crate::scene::interaction::Interaction;
use crate::scene::store::node_rect;
use crate::types::CanvasNode;
use eframe::egui;

/// Run a single headless egui frame with the provided input and drive the
/// canvas through it.
fn run_canvas_frame(
    ctx: &egui::Context,
    app: &mut WhiteboardApp,
    events: Vec<egui::Event>,
    modifiers: egui::Modifiers,
) {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw.modifiers = modifiers;

    let _ = ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

/// A deterministic app: no auto-centering, identity viewport.
fn stable_app() -> WhiteboardApp {
    let mut app = WhiteboardApp::default();
    app.node_counter = 1; // skip first-frame auto-centering
    app.canvas.viewport = Default::default();
    app
}

fn collapsed_node(x: f32, y: f32) -> CanvasNode {
    let mut node = CanvasNode::new("n", x, y);
    node.width = 150.0;
    node.expanded = false;
    node
}

#[test]
fn dragging_node_moves_it_and_commits_on_release() {
    let mut app = stable_app();
    let id = app.board.add_node(collapsed_node(100.0, 100.0));

    let ctx = egui::Context::default();
    let press = egui::pos2(110.0, 110.0);
    let drop = egui::pos2(260.0, 180.0);

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(press)],
        egui::Modifiers::NONE,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![
            egui::Event::PointerMoved(press),
            egui::Event::PointerButton {
                pos: press,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
        egui::Modifiers::NONE,
    );
    assert_eq!(app.machine.dragging_node(), Some(id));

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(drop)],
        egui::Modifiers::NONE,
    );
    let node = app.board.get(id).unwrap();
    assert_eq!((node.x, node.y), (250.0, 170.0));

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerButton {
            pos: drop,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
        egui::Modifiers::NONE,
    );
    assert!(app.machine.is_idle());
    let node = app.board.get(id).unwrap();
    assert_eq!((node.x, node.y), (250.0, 170.0));
    assert!(app.file.has_unsaved_changes);
}

#[test]
fn shift_press_starts_connection_and_escape_cancels() {
    let mut app = stable_app();
    app.board.add_node(collapsed_node(100.0, 100.0));
    app.board.add_node(collapsed_node(500.0, 100.0));

    let ctx = egui::Context::default();
    let press = egui::pos2(110.0, 110.0);

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(press)],
        egui::Modifiers::SHIFT,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![
            egui::Event::PointerMoved(press),
            egui::Event::PointerButton {
                pos: press,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::SHIFT,
            },
        ],
        egui::Modifiers::SHIFT,
    );
    assert!(matches!(
        app.machine.state(),
        Interaction::ConnectingFrom { .. }
    ));

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: Some(egui::Key::Escape),
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }],
        egui::Modifiers::NONE,
    );

    assert!(app.machine.is_idle());
    assert!(app.board.all_edges().is_empty());
}

#[test]
fn background_drag_pans_viewport() {
    let mut app = stable_app();
    app.board.add_node(collapsed_node(700.0, 700.0));

    let ctx = egui::Context::default();
    let start = egui::pos2(300.0, 300.0);
    let end = egui::pos2(340.0, 320.0);

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(start)],
        egui::Modifiers::NONE,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![
            egui::Event::PointerMoved(start),
            egui::Event::PointerButton {
                pos: start,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
        egui::Modifiers::NONE,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(end)],
        egui::Modifiers::NONE,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerButton {
            pos: end,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
        egui::Modifiers::NONE,
    );

    assert!(app.machine.is_idle());
    assert_eq!(app.canvas.viewport.offset, egui::vec2(40.0, 20.0));
}

#[test]
fn clicking_header_toggles_expansion() {
    let mut app = stable_app();
    let mut node = CanvasNode::new("n", 100.0, 100.0);
    node.width = 150.0;
    let id = app.board.add_node(node);
    assert!(app.board.get(id).unwrap().expanded);

    let ctx = egui::Context::default();
    let click = egui::pos2(110.0, 110.0);

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(click)],
        egui::Modifiers::NONE,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![
            egui::Event::PointerMoved(click),
            egui::Event::PointerButton {
                pos: click,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
        egui::Modifiers::NONE,
    );
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerButton {
            pos: click,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
        egui::Modifiers::NONE,
    );

    assert!(app.machine.is_idle());
    assert!(!app.board.get(id).unwrap().expanded);
}

#[test]
fn toolbar_node_creation_resolves_overlaps() {
    let mut app = stable_app();
    let canvas_rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1200.0, 800.0));

    app.create_node_at_view_center(canvas_rect);
    app.create_node_at_view_center(canvas_rect);

    let nodes = app.board.nodes();
    assert_eq!(nodes.len(), 2);
    let first = node_rect(&nodes[0]);
    let second = node_rect(&nodes[1]);
    assert!(
        !boxes_intersect(&first, &second),
        "second node must be displaced off the first"
    );
    assert!(app.file.has_unsaved_changes);
}

#[test]
fn first_frame_centers_origin_for_empty_board() {
    let mut app = WhiteboardApp::default();
    assert_eq!(app.canvas.viewport.offset, egui::Vec2::ZERO);

    let ctx = egui::Context::default();
    run_canvas_frame(&ctx, &mut app, vec![], egui::Modifiers::NONE);

    assert_ne!(app.canvas.viewport.offset, egui::Vec2::ZERO);
}
