#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================
// Helpers
// =============================================================

type Snapshots = Rc<RefCell<Vec<Vec<WidgetRecord>>>>;

fn recording_store() -> (LayoutStore, Snapshots) {
    let snapshots: Snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    let store = LayoutStore::with_output(move |widgets: &[WidgetRecord]| sink.borrow_mut().push(widgets.to_vec()));
    (store, snapshots)
}

fn store_with(names: &[&str]) -> LayoutStore {
    let mut store = LayoutStore::with_output(|_: &[WidgetRecord]| {});
    for name in names {
        store.add(name).unwrap();
    }
    store
}

fn stack(store: &LayoutStore, name: &str) -> u32 {
    store.get(name).unwrap().stack_index
}

fn assert_dense(store: &LayoutStore) {
    let mut indices: Vec<u32> = store.widgets().iter().map(|r| r.stack_index).collect();
    indices.sort_unstable();
    let expected: Vec<u32> = (1..=u32::try_from(store.len()).unwrap()).collect();
    assert_eq!(indices, expected);
}

fn geometry(name: &str, left: f64, top: f64, width: f64, height: f64) -> WidgetGeometry {
    WidgetGeometry::from_rect(name, PercentRect::new(left, top, width, height))
}

// =============================================================
// add
// =============================================================

#[test]
fn add_uses_default_box() {
    let mut store = store_with(&[]);
    let r = store.add("News Feed").unwrap();
    assert_eq!(r.name, "News Feed");
    assert_eq!(r.position, Position { top: 0.0, left: 0.0 });
    assert_eq!(r.size, Size { width: 25.0, height: 25.0 });
    assert_eq!(r.stack_index, 1);
}

#[test]
fn add_appends_with_next_stack_index() {
    let store = store_with(&["A", "B", "C"]);
    assert_eq!(stack(&store, "A"), 1);
    assert_eq!(stack(&store, "B"), 2);
    assert_eq!(stack(&store, "C"), 3);
    let names: Vec<&str> = store.widgets().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn add_rejects_duplicate_name() {
    let mut store = store_with(&["A"]);
    let err = store.add("A").unwrap_err();
    assert_eq!(err, StoreError::DuplicateName("A".into()));
    assert_eq!(store.len(), 1);
}

#[test]
fn add_notifies_with_full_collection() {
    let (mut store, snapshots) = recording_store();
    store.add("A").unwrap();
    store.add("B").unwrap();
    let snaps = snapshots.borrow();
    assert_eq!(snaps.len(), 2);
    assert_eq!(snaps[1].len(), 2);
    assert_eq!(snaps[1][1].name, "B");
}

#[test]
fn duplicate_add_does_not_notify() {
    let (mut store, snapshots) = recording_store();
    store.add("A").unwrap();
    assert!(store.add("A").is_err());
    assert_eq!(snapshots.borrow().len(), 1);
}

#[test]
fn custom_default_box() {
    let mut store = store_with(&[]).default_box(PercentRect::new(10.0, 20.0, 30.0, 40.0));
    let r = store.add("A").unwrap();
    assert_eq!(r.rect(), PercentRect::new(10.0, 20.0, 30.0, 40.0));
}

#[test]
fn add_next_numbers_from_count() {
    let mut store = store_with(&[]);
    assert_eq!(store.add_next().unwrap().name, "Widget 1");
    assert_eq!(store.add_next().unwrap().name, "Widget 2");
}

#[test]
fn add_next_collides_after_removal() {
    let mut store = store_with(&[]);
    store.add_next().unwrap();
    store.add_next().unwrap();
    store.remove("Widget 1");
    // One widget left, so the next name is "Widget 2" again.
    assert_eq!(store.add_next().unwrap_err(), StoreError::DuplicateName("Widget 2".into()));
}

#[test]
fn many_adds_are_dense() {
    let names: Vec<String> = (0..25).map(|i| format!("w{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let store = store_with(&refs);
    assert_dense(&store);
    assert_eq!(store.topmost().unwrap().name, "w24");
}

// =============================================================
// remove
// =============================================================

#[test]
fn remove_absent_is_a_silent_noop() {
    let (mut store, snapshots) = recording_store();
    store.add("A").unwrap();
    assert!(store.remove("missing").is_none());
    assert_eq!(store.len(), 1);
    assert_eq!(snapshots.borrow().len(), 1);
}

#[test]
fn remove_returns_record_and_notifies() {
    let (mut store, snapshots) = recording_store();
    store.add("A").unwrap();
    store.add("B").unwrap();
    let removed = store.remove("A").unwrap();
    assert_eq!(removed.name, "A");
    let snaps = snapshots.borrow();
    assert_eq!(snaps.last().unwrap().len(), 1);
    assert_eq!(snaps.last().unwrap()[0].name, "B");
}

#[test]
fn remove_renumbers_densely_preserving_order() {
    let mut store = store_with(&["A", "B", "C", "D"]);
    store.remove("B");
    assert_dense(&store);
    assert_eq!(stack(&store, "A"), 1);
    assert_eq!(stack(&store, "C"), 2);
    assert_eq!(stack(&store, "D"), 3);
}

#[test]
fn remove_topmost_keeps_rest() {
    let mut store = store_with(&["A", "B", "C"]);
    store.remove("C");
    assert_eq!(stack(&store, "A"), 1);
    assert_eq!(stack(&store, "B"), 2);
}

// =============================================================
// toggle
// =============================================================

#[test]
fn toggle_adds_then_removes() {
    let mut store = store_with(&[]);
    assert_eq!(store.toggle("Note").unwrap(), Toggled::Added);
    assert!(store.get("Note").is_some());
    assert_eq!(store.toggle("Note").unwrap(), Toggled::Removed);
    assert!(store.get("Note").is_none());
}

#[test]
fn toggle_twice_restores_membership() {
    for target in ["A", "B", "C", "New"] {
        let mut store = store_with(&["A", "B", "C"]);
        let before: Vec<String> = {
            let mut v: Vec<String> = store.widgets().iter().map(|r| r.name.clone()).collect();
            v.sort();
            v
        };
        store.toggle(target).unwrap();
        store.toggle(target).unwrap();
        let mut after: Vec<String> = store.widgets().iter().map(|r| r.name.clone()).collect();
        after.sort();
        assert_eq!(before, after, "toggling {target} twice");
        assert_dense(&store);
    }
}

// =============================================================
// update
// =============================================================

#[test]
fn update_promotes_and_swaps_with_topmost() {
    let mut store = store_with(&["A", "B"]);
    assert!(store.update(&geometry("A", 5.0, 6.0, 30.0, 40.0)));
    assert_eq!(stack(&store, "A"), 2);
    assert_eq!(stack(&store, "B"), 1);
    let a = store.get("A").unwrap();
    assert_eq!(a.rect(), PercentRect::new(5.0, 6.0, 30.0, 40.0));
}

#[test]
fn update_topmost_keeps_stack() {
    let mut store = store_with(&["A", "B"]);
    assert!(store.update(&geometry("B", 50.0, 50.0, 25.0, 25.0)));
    assert_eq!(stack(&store, "A"), 1);
    assert_eq!(stack(&store, "B"), 2);
    assert_eq!(store.get("B").unwrap().position.left, 50.0);
}

#[test]
fn update_demotes_prior_topmost_to_second() {
    let mut store = store_with(&["A", "B", "C", "D", "E"]);
    store.update(&geometry("B", 0.0, 0.0, 25.0, 25.0));
    assert_eq!(stack(&store, "B"), 5);
    assert_eq!(stack(&store, "E"), 4);
    // Below the target: untouched.
    assert_eq!(stack(&store, "A"), 1);
    assert_dense(&store);
}

#[test]
fn update_slides_middle_records_down() {
    let mut store = store_with(&["A", "B", "C", "D"]);
    store.update(&geometry("A", 0.0, 0.0, 25.0, 25.0));
    assert_eq!(stack(&store, "A"), 4);
    assert_eq!(stack(&store, "B"), 1);
    assert_eq!(stack(&store, "C"), 2);
    assert_eq!(stack(&store, "D"), 3);
}

#[test]
fn update_unknown_name_changes_nothing() {
    let mut store = store_with(&["A", "B"]);
    assert!(!store.update(&geometry("Z", 1.0, 1.0, 10.0, 10.0)));
    assert_eq!(stack(&store, "A"), 1);
    assert_eq!(stack(&store, "B"), 2);
}

#[test]
fn update_does_not_notify() {
    let (mut store, snapshots) = recording_store();
    store.add("A").unwrap();
    store.update(&geometry("A", 1.0, 1.0, 10.0, 10.0));
    assert_eq!(snapshots.borrow().len(), 1);
}

#[test]
fn stack_stays_dense_across_mixed_mutations() {
    let mut store = store_with(&["A", "B", "C", "D", "E", "F"]);
    let ops: [(&str, bool); 8] = [
        ("C", false),
        ("A", false),
        ("E", true),
        ("F", false),
        ("B", true),
        ("D", false),
        ("A", false),
        ("C", false),
    ];
    for (name, remove) in ops {
        if remove {
            store.remove(name);
        } else {
            store.update(&geometry(name, 1.0, 2.0, 20.0, 20.0));
            assert_eq!(store.topmost().unwrap().name, name);
        }
        assert_dense(&store);
    }
}

// =============================================================
// Queries and serialization
// =============================================================

#[test]
fn sorted_by_stack_is_paint_order() {
    let mut store = store_with(&["A", "B", "C"]);
    store.update(&geometry("A", 0.0, 0.0, 25.0, 25.0));
    let order: Vec<&str> = store.sorted_by_stack().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, ["B", "C", "A"]);
}

#[test]
fn empty_store() {
    let store = LayoutStore::default();
    assert!(store.is_empty());
    assert!(store.topmost().is_none());
    assert_eq!(store.snapshot_json().unwrap(), "[]");
}

#[test]
fn record_serializes_flat() {
    let store = store_with(&["Poster"]);
    let json: serde_json::Value = serde_json::from_str(&store.snapshot_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "Poster",
            "top": 0.0,
            "left": 0.0,
            "width": 25.0,
            "height": 25.0,
            "z_index": 1,
        }])
    );
}

#[test]
fn record_deserializes_flat() {
    let r: WidgetRecord =
        serde_json::from_str(r#"{"name":"A","top":1,"left":2,"width":3,"height":4,"z_index":5}"#).unwrap();
    assert_eq!(r.position, Position { top: 1.0, left: 2.0 });
    assert_eq!(r.size, Size { width: 3.0, height: 4.0 });
    assert_eq!(r.stack_index, 5);
}
