#![allow(clippy::float_cmp)]

use super::*;

fn replay() -> Replay {
    Replay::new(BoardConfig::default())
}

fn run(replay: &mut Replay, json: &str) {
    let steps = parse(json).unwrap();
    replay.run(&steps).unwrap();
}

// --- Parsing ---

#[test]
fn parses_tagged_steps() {
    let steps = parse(
        r#"[
            {"op": "add", "name": "Note"},
            {"op": "add_next"},
            {"op": "down", "widget": "Note", "x": 10, "y": 20},
            {"op": "down", "widget": "Note", "x": 10, "y": 20, "hotspot": "se"},
            {"op": "leave", "widget": "Note"}
        ]"#,
    )
    .unwrap();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0], Step::Add { name: "Note".into() });
    assert_eq!(steps[1], Step::AddNext);
    assert_eq!(steps[2], Step::Down { widget: "Note".into(), x: 10.0, y: 20.0, hotspot: None });
    assert_eq!(steps[3], Step::Down { widget: "Note".into(), x: 10.0, y: 20.0, hotspot: Some(Direction::Se) });
    assert_eq!(steps[4], Step::Leave { widget: "Note".into() });
}

#[test]
fn rejects_unknown_op() {
    assert!(parse(r#"[{"op": "spin", "name": "Note"}]"#).is_err());
}

// --- Widget list ---

#[test]
fn add_renders_default_box() {
    let mut r = replay();
    run(&mut r, r#"[{"op": "add", "name": "Note"}]"#);
    let rect = r.surface("Note").unwrap().box_rect().unwrap();
    assert_eq!(rect, PixelRect::new(0.0, 0.0, 200.0, 150.0));
}

#[test]
fn toggle_and_remove_drop_surfaces() {
    let mut r = replay();
    run(
        &mut r,
        r#"[
            {"op": "add_next"},
            {"op": "toggle", "name": "Poster"},
            {"op": "toggle", "name": "Poster"},
            {"op": "remove", "name": "Widget 1"}
        ]"#,
    );
    assert!(r.surface("Poster").is_none());
    assert!(r.surface("Widget 1").is_none());
    assert!(r.core().widgets().is_empty());
}

// --- Pointer sessions ---

#[test]
fn drag_from_center_keeps_grab_point() {
    let mut r = replay();
    run(
        &mut r,
        r#"[
            {"op": "add", "name": "Note"},
            {"op": "down", "widget": "Note", "x": 100, "y": 75},
            {"op": "move", "widget": "Note", "x": 400, "y": 300},
            {"op": "up", "widget": "Note"}
        ]"#,
    );
    let record = r.core().widget("Note").unwrap();
    assert_eq!(record.position.left, 37.5);
    assert_eq!(record.position.top, 37.5);
    assert_eq!(record.size.width, 25.0);
    let rect = r.surface("Note").unwrap().box_rect().unwrap();
    assert_eq!(rect.left, 300.0);
    assert_eq!(rect.top, 225.0);
}

#[test]
fn down_on_east_strip_resizes_and_snaps() {
    let mut r = replay();
    run(
        &mut r,
        r#"[
            {"op": "add", "name": "Note"},
            {"op": "down", "widget": "Note", "x": 195, "y": 75},
            {"op": "move", "widget": "Note", "x": 792, "y": 75}
        ]"#,
    );
    let record = r.core().widget("Note").unwrap();
    assert_eq!(record.size.width, 100.0);
    assert_eq!(record.size.height, 25.0);
    assert_eq!(r.surface("Note").unwrap().hotspots().active(), Some(Direction::E));

    run(&mut r, r#"[{"op": "up", "widget": "Note"}]"#);
    assert_eq!(r.surface("Note").unwrap().hotspots().active(), None);
}

#[test]
fn explicit_hotspot_overrides_hit_test() {
    let mut r = replay();
    run(
        &mut r,
        r#"[
            {"op": "add", "name": "Note"},
            {"op": "down", "widget": "Note", "x": 100, "y": 75, "hotspot": "s"},
            {"op": "move", "widget": "Note", "x": 100, "y": 300}
        ]"#,
    );
    let record = r.core().widget("Note").unwrap();
    assert_eq!(record.size.height, 50.0);
    assert_eq!(record.size.width, 25.0);
}

#[test]
fn move_without_session_changes_nothing() {
    let mut r = replay();
    run(
        &mut r,
        r#"[
            {"op": "add", "name": "Note"},
            {"op": "move", "widget": "Note", "x": 400, "y": 300}
        ]"#,
    );
    let record = r.core().widget("Note").unwrap();
    assert_eq!(record.position.left, 0.0);
    assert_eq!(record.position.top, 0.0);
}

#[test]
fn failure_reports_step_index() {
    let mut r = replay();
    let steps = parse(
        r#"[
            {"op": "add", "name": "Note"},
            {"op": "down", "widget": "Ghost", "x": 1, "y": 1}
        ]"#,
    )
    .unwrap();
    let err = r.run(&steps).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.source, EngineError::UnknownWidget("Ghost".into()));
}

#[test]
fn duplicate_add_fails() {
    let mut r = replay();
    let steps = parse(r#"[{"op": "add", "name": "Note"}, {"op": "add", "name": "Note"}]"#).unwrap();
    let err = r.run(&steps).unwrap_err();
    assert_eq!(err.index, 1);
    assert!(matches!(err.source, EngineError::Store(_)));
}

// --- Report ---

#[test]
fn report_marks_placed_catalog_entries() {
    let mut r = replay();
    run(&mut r, r#"[{"op": "add", "name": "Note"}]"#);
    let report = r.report(true);
    let catalog = report.catalog.as_ref().unwrap();
    assert_eq!(catalog.len(), WIDGET_CATALOG.len());
    assert!(catalog.iter().any(|e| e.name == "Note" && e.placed));
    assert_eq!(catalog.iter().filter(|e| e.placed).count(), 1);
}

#[test]
fn report_omits_catalog_by_default() {
    let mut r = replay();
    run(&mut r, r#"[{"op": "add", "name": "Note"}]"#);
    let json: serde_json::Value = serde_json::to_value(r.report(false)).unwrap();
    assert!(json.get("catalog").is_none());
    assert_eq!(json["widgets"][0]["name"], "Note");
    assert_eq!(json["widgets"][0]["z_index"], 1);
}
