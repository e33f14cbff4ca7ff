//! Tests for curve geometry, the connector registry and frame coalescing.
mod common;
use common::*;
use flowdraft::geometry::{ConnectorRegistry, FrameScheduler, compute_curves};
use flowdraft::prelude::*;

fn connection(from: &str, to: &str) -> Connection {
    Connection {
        from: BlockId::from(from),
        to: BlockId::from(to),
        tipo: "fluxo".to_string(),
    }
}

#[test]
fn test_curve_is_relative_to_canvas() {
    let mut registry = ConnectorRegistry::new(Rect::new(100.0, 50.0, 1000.0, 600.0));
    registry.record(
        BlockId::from("a"),
        Endpoint::Output,
        Rect::new(400.0, 150.0, 20.0, 20.0),
    );
    registry.record(
        BlockId::from("b"),
        Endpoint::Input,
        Rect::new(600.0, 250.0, 20.0, 20.0),
    );

    let paths = compute_curves(&registry, &[connection("a", "b")], 80.0);
    assert_eq!(paths.len(), 1);
    let curve = paths[0].curve;
    assert_eq!(curve.start, Point::new(310.0, 110.0));
    assert_eq!(curve.end, Point::new(510.0, 210.0));
    assert_eq!(curve.control1, Point::new(390.0, 110.0));
    assert_eq!(curve.control2, Point::new(430.0, 210.0));
    assert_eq!(paths[0].key, "a-b");
}

#[test]
fn test_svg_path_format() {
    let curve = CubicCurve::s_curve(Point::new(10.0, 20.0), Point::new(200.5, 40.0), 80.0);
    assert_eq!(curve.to_svg_path(), "M 10 20 C 90 20, 120.5 40, 200.5 40");
}

#[test]
fn test_curve_endpoints_and_midpoint() {
    let curve = CubicCurve::s_curve(Point::new(0.0, 0.0), Point::new(100.0, 100.0), 80.0);
    assert_eq!(curve.point_at(0.0), curve.start);
    assert_eq!(curve.point_at(1.0), curve.end);
    let mid = curve.point_at(0.5);
    assert!((mid.x - 50.0).abs() < 1e-9);
    assert!((mid.y - 50.0).abs() < 1e-9);
}

#[test]
fn test_missing_connector_skips_edge() {
    let mut registry = ConnectorRegistry::default();
    registry.record(BlockId::from("a"), Endpoint::Output, Rect::new(0.0, 0.0, 10.0, 10.0));
    registry.record(BlockId::from("b"), Endpoint::Input, Rect::new(50.0, 0.0, 10.0, 10.0));

    let edges = [connection("a", "b"), connection("a", "c"), connection("c", "b")];
    let paths = compute_curves(&registry, &edges, 80.0);
    let keys: Vec<&str> = paths.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["a-b"]);
}

#[test]
fn test_recompute_is_idempotent() {
    let (mut editor, ids) = editor_with_blocks(&[ActionKind::SendMessage, ActionKind::EndFlow]);
    editor.connector_click(&ids[0], Endpoint::Output).unwrap();
    editor.connector_click(&ids[1], Endpoint::Input).unwrap();
    lay_out(&mut editor);

    let first = editor.recompute_now().to_vec();
    let second = editor.recompute_now().to_vec();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].curve.start, Point::new(320.0, 112.0));
    assert_eq!(first[0].curve.end, Point::new(400.0, 112.0));
}

#[test]
fn test_forget_removes_both_endpoints() {
    let mut registry = ConnectorRegistry::default();
    let a = BlockId::from("a");
    registry.record(a.clone(), Endpoint::Input, Rect::default());
    registry.record(a.clone(), Endpoint::Output, Rect::default());
    registry.record(BlockId::from("b"), Endpoint::Input, Rect::default());
    registry.forget(&a);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&a, Endpoint::Output), None);
}

#[test]
fn test_scheduler_coalesces_requests() {
    let mut scheduler = FrameScheduler::new();
    assert_eq!(scheduler.on_frame(|| 1), None);

    for _ in 0..50 {
        scheduler.request();
    }
    let mut runs = 0;
    assert_eq!(
        scheduler.on_frame(|| {
            runs += 1;
            "ran"
        }),
        Some("ran")
    );
    assert_eq!(scheduler.on_frame(|| runs += 1), None);
    assert_eq!(runs, 1);
    assert_eq!(scheduler.requests(), 50);
    assert_eq!(scheduler.runs(), 1);
}

#[test]
fn test_animation_frame_runs_once_per_burst() {
    let (mut editor, ids) = editor_with_blocks(&[ActionKind::SendMessage, ActionKind::EndFlow]);
    editor.connector_click(&ids[0], Endpoint::Output).unwrap();
    editor.connector_click(&ids[1], Endpoint::Input).unwrap();
    lay_out(&mut editor);

    let curves = editor.on_animation_frame().map(<[ConnectionPath]>::to_vec);
    assert_eq!(curves.map(|c| c.len()), Some(1));
    assert!(editor.on_animation_frame().is_none());

    editor.pointer_down(Point::new(0.0, 0.0), true);
    for step in 1..=20 {
        editor.pointer_move(Point::new(step as f64, 0.0));
    }
    editor.pointer_up();
    let runs_before = editor.scheduler().runs();
    assert!(editor.on_animation_frame().is_some());
    assert!(editor.on_animation_frame().is_none());
    assert_eq!(editor.scheduler().runs(), runs_before + 1);
}

#[test]
fn test_pan_shifts_curves_with_layout() {
    let (mut editor, ids) = editor_with_blocks(&[ActionKind::SendMessage, ActionKind::EndFlow]);
    editor.connector_click(&ids[0], Endpoint::Output).unwrap();
    editor.connector_click(&ids[1], Endpoint::Input).unwrap();
    lay_out(&mut editor);
    let before = editor.recompute_now()[0].curve;

    editor.pointer_down(Point::new(500.0, 300.0), true);
    editor.pointer_move(Point::new(530.0, 290.0));
    editor.pointer_up();

    let after = editor.recompute_now()[0].curve;
    assert_eq!(after.start, before.start + Point::new(30.0, -10.0));
    assert_eq!(after.end, before.end + Point::new(30.0, -10.0));
}

#[test]
fn test_deleted_block_connectors_are_forgotten() {
    let (mut editor, ids) = editor_with_blocks(&[ActionKind::SendMessage, ActionKind::EndFlow]);
    lay_out(&mut editor);
    assert_eq!(editor.registry().len(), 4);
    editor.delete_block(&ids[0]).unwrap();
    assert_eq!(editor.registry().len(), 2);
}

#[test]
fn test_registry_endpoints_are_independent() {
    let mut registry = ConnectorRegistry::default();
    let a = BlockId::from("a");
    registry.record(a.clone(), Endpoint::Output, Rect::new(10.0, 10.0, 4.0, 4.0));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&a, Endpoint::Input), None);

    registry.record(a.clone(), Endpoint::Input, Rect::new(0.0, 0.0, 4.0, 4.0));
    registry.record(a.clone(), Endpoint::Output, Rect::new(20.0, 10.0, 4.0, 4.0));
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get(&a, Endpoint::Output),
        Some(Rect::new(20.0, 10.0, 4.0, 4.0))
    );

    registry.record(BlockId::from("b"), Endpoint::Input, Rect::new(50.0, 0.0, 4.0, 4.0));
    registry.shift_all(Point::new(5.0, -5.0));
    assert_eq!(
        registry.get(&a, Endpoint::Input),
        Some(Rect::new(5.0, -5.0, 4.0, 4.0))
    );
    assert_eq!(
        registry.get(&BlockId::from("b"), Endpoint::Input),
        Some(Rect::new(55.0, -5.0, 4.0, 4.0))
    );
    assert_eq!(registry.get(&BlockId::from("b"), Endpoint::Output), None);
    assert_eq!(registry.len(), 3);
}
