//! Tests for dispatch, listeners and the simple tree actions

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{
    assert_active_valid, assert_conserved, assert_selection_bounds, handle, laid_out, rect_of,
    sample_document, sample_model,
};
use flexdock::{Action, DockLocation, LayoutError, Model, NodeEvent, NodeId, Rect};
use serde_json::json;

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_tab_updates_selection_and_active() {
    let mut model = laid_out(
        &json!({
            "layout": { "type": "row", "children": [
                { "type": "tabset", "id": "main", "children": [
                    { "type": "tab", "id": "a", "name": "A" },
                    { "type": "tab", "id": "b", "name": "B" }
                ]}
            ]}
        }),
        400.0,
        300.0,
    );
    let main = handle(&model, "main");
    let b = handle(&model, "b");
    assert_eq!(model.node(main).unwrap().as_tab_set().unwrap().selected, Some(0));
    assert_eq!(model.active_tab_set(), None);

    model.dispatch(Action::select_tab(b)).unwrap();

    assert_eq!(model.node(main).unwrap().as_tab_set().unwrap().selected, Some(1));
    assert_eq!(model.active_tab_set(), Some(main));
    // only the selected tab is laid out
    assert!(rect_of(&model, handle(&model, "a")).is_empty());
    assert!(!rect_of(&model, b).is_empty());
}

#[test]
fn test_set_active_tab_set_and_clear() {
    let mut model = sample_model();
    let right = handle(&model, "right");

    model.dispatch(Action::set_active_tab_set(Some(right))).unwrap();
    assert_eq!(model.active_tab_set(), Some(right));

    model.dispatch(Action::set_active_tab_set(None)).unwrap();
    assert_eq!(model.active_tab_set(), None);
}

#[test]
fn test_set_active_rejects_non_tab_set() {
    let mut model = sample_model();
    let a = handle(&model, "a");
    let result = model.dispatch(Action::set_active_tab_set(Some(a)));
    assert!(matches!(result, Err(LayoutError::InvalidAction(_))));
}

#[test]
fn test_active_tab_set_resets_when_removed() {
    let mut model = sample_model();
    let right = handle(&model, "right");
    let c = handle(&model, "c");
    model.dispatch(Action::set_active_tab_set(Some(right))).unwrap();

    model.dispatch(Action::delete_tab(c)).unwrap();

    assert!(model.node(right).is_none());
    assert_eq!(model.active_tab_set(), None);
    assert_active_valid(&model);
}

// ============================================================================
// Maximize
// ============================================================================

#[test]
fn test_maximize_toggle_twice_restores_layout() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let right = handle(&model, "right");
    let before_json = model.to_json();
    let before_rects = (rect_of(&model, left), rect_of(&model, right));

    model.dispatch(Action::maximize_toggle(left)).unwrap();
    assert_eq!(model.maximized_tab_set(), Some(left));
    assert_eq!(rect_of(&model, left), model.rect());
    assert_eq!(model.active_tab_set(), Some(left));

    model.dispatch(Action::maximize_toggle(left)).unwrap();
    assert_eq!(model.maximized_tab_set(), None);
    assert!(!model.node(left).unwrap().as_tab_set().unwrap().maximized);
    assert_eq!((rect_of(&model, left), rect_of(&model, right)), before_rects);
    assert_eq!(model.to_json(), before_json);
}

#[test]
fn test_maximize_moves_between_tab_sets() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let right = handle(&model, "right");

    model.dispatch(Action::maximize_toggle(left)).unwrap();
    model.dispatch(Action::maximize_toggle(right)).unwrap();

    assert_eq!(model.maximized_tab_set(), Some(right));
    assert!(!model.node(left).unwrap().as_tab_set().unwrap().maximized);
}

// ============================================================================
// Rename, attributes, viewport
// ============================================================================

#[test]
fn test_rename_tab() {
    let mut model = sample_model();
    let a = handle(&model, "a");
    model.dispatch(Action::rename_tab(a, "Main.rs")).unwrap();
    assert_eq!(model.node(a).unwrap().as_tab().unwrap().name, "Main.rs");
}

#[test]
fn test_rename_rejects_tab_set() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let result = model.dispatch(Action::rename_tab(left, "nope"));
    assert!(matches!(result, Err(LayoutError::InvalidAction(_))));
}

#[test]
fn test_update_model_attributes_relayouts() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    assert_eq!(rect_of(&model, left).width, 400.0);

    let attrs = json!({ "splitterSize": 4 }).as_object().cloned().unwrap();
    model.dispatch(Action::update_model_attributes(attrs)).unwrap();

    assert_eq!(model.splitter_size(), 4.0);
    assert_eq!(rect_of(&model, left).width, 402.0);
    assert_conserved(&model);
}

#[test]
fn test_update_node_attributes_is_atomic() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let before = model.to_json();

    let attrs = json!({ "weight": 10, "maximized": "yes" })
        .as_object()
        .cloned()
        .unwrap();
    let result = model.dispatch(Action::update_node_attributes(left, attrs));

    assert!(matches!(
        result,
        Err(LayoutError::InvalidAttribute { ref key, .. }) if key == "maximized"
    ));
    assert_eq!(model.to_json(), before);
}

#[test]
fn test_update_node_attributes_rejects_out_of_range_selection() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let attrs = json!({ "selected": 5 }).as_object().cloned().unwrap();
    let result = model.dispatch(Action::update_node_attributes(left, attrs));
    assert!(matches!(result, Err(LayoutError::InvalidAttribute { .. })));
    assert_selection_bounds(&model);
}

#[test]
fn test_update_node_attributes_overrides_header() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let attrs = json!({ "name": "Files", "headerHeight": 30 })
        .as_object()
        .cloned()
        .unwrap();
    model.dispatch(Action::update_node_attributes(left, attrs)).unwrap();

    let bands = model.tab_set_bands(left).unwrap();
    assert_eq!(bands.header.height, 30.0);
    assert_eq!(bands.content.y, 50.0);
    let effective = model.effective_attributes(left).unwrap();
    assert_eq!(effective["headerHeight"], json!(30));
    assert_eq!(effective["tabStripHeight"], json!(20));
}

#[test]
fn test_set_rect_rejects_negative_size() {
    let mut model = sample_model();
    let before = model.rect();
    let result = model.set_rect(Rect::new(0.0, 0.0, -10.0, 100.0));
    assert!(matches!(result, Err(LayoutError::InvalidAction(_))));
    assert_eq!(model.rect(), before);
}

#[test]
fn test_invalid_reference_leaves_model_untouched() {
    let mut model = sample_model();
    let before = model.to_json();
    let result = model.dispatch(Action::select_tab(NodeId(9999)));
    assert!(matches!(result, Err(LayoutError::InvalidReference(NodeId(9999)))));
    assert_eq!(model.to_json(), before);
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_listener_called_after_successful_dispatch_only() {
    let mut model = sample_model();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    model.add_listener(move |_: &Model| counter.set(counter.get() + 1));

    let a = handle(&model, "a");
    model.dispatch(Action::rename_tab(a, "x")).unwrap();
    assert_eq!(calls.get(), 1);

    let _ = model.dispatch(Action::rename_tab(NodeId(9999), "y"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_listener_sees_updated_model() {
    let mut model = sample_model();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    model.add_listener(move |m: &Model| sink.borrow_mut().push(m.active_tab_set()));

    let c = handle(&model, "c");
    let right = handle(&model, "right");
    model.dispatch(Action::select_tab(c)).unwrap();
    assert_eq!(*seen.borrow(), vec![Some(right)]);
}

#[test]
fn test_removed_listener_is_not_called() {
    let mut model = sample_model();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let id = model.add_listener(move |_: &Model| counter.set(counter.get() + 1));
    model.remove_listener(id);
    model.remove_listener(id);

    model.set_rect(Rect::new(0.0, 0.0, 500.0, 500.0)).unwrap();
    assert_eq!(calls.get(), 0);
}

// ============================================================================
// Node events
// ============================================================================

fn record_events(model: &mut Model, node: NodeId) -> Rc<RefCell<Vec<NodeEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    model
        .set_node_listener(node, move |event| sink.borrow_mut().push(event))
        .unwrap();
    events
}

#[test]
fn test_maximize_toggle_fires_node_event() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let events = record_events(&mut model, left);

    model.dispatch(Action::maximize_toggle(left)).unwrap();
    model.dispatch(Action::maximize_toggle(left)).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            NodeEvent::Maximize { maximized: true },
            NodeEvent::Maximize { maximized: false },
        ]
    );
}

#[test]
fn test_maximizing_another_tab_set_restores_the_first() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let right = handle(&model, "right");
    let left_events = record_events(&mut model, left);
    let right_events = record_events(&mut model, right);

    model.dispatch(Action::maximize_toggle(left)).unwrap();
    model.dispatch(Action::maximize_toggle(right)).unwrap();

    assert_eq!(
        *left_events.borrow(),
        vec![
            NodeEvent::Maximize { maximized: true },
            NodeEvent::Maximize { maximized: false },
        ]
    );
    assert_eq!(*right_events.borrow(), vec![NodeEvent::Maximize { maximized: true }]);
}

#[test]
fn test_to_json_fires_save_for_every_listening_node() {
    let mut model = sample_model();
    let a = handle(&model, "a");
    let right = handle(&model, "right");
    let tab_events = record_events(&mut model, a);
    let tab_set_events = record_events(&mut model, right);

    model.to_json();
    model.to_json_string().unwrap();

    assert_eq!(*tab_events.borrow(), vec![NodeEvent::Save, NodeEvent::Save]);
    assert_eq!(*tab_set_events.borrow(), vec![NodeEvent::Save, NodeEvent::Save]);
}

#[test]
fn test_node_listener_follows_moved_tab_and_can_be_removed() {
    let mut model = sample_model();
    let a = handle(&model, "a");
    let right = handle(&model, "right");
    let events = record_events(&mut model, a);

    model
        .dispatch(Action::move_node(a, right, DockLocation::Center, None))
        .unwrap();
    model.to_json();
    assert_eq!(*events.borrow(), vec![NodeEvent::Save]);

    model.remove_node_listener(a);
    model.to_json();
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_node_listener_rejects_unknown_node() {
    let mut model = sample_model();
    let result = model.set_node_listener(NodeId(9999), |_| {});
    assert!(matches!(result, Err(LayoutError::InvalidReference(NodeId(9999)))));
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_visit_nodes_is_pre_order_with_splitters() {
    let model = sample_model();
    let mut seen = Vec::new();
    model.visit_nodes(|node, depth| seen.push((node.node_type(), depth)));
    assert_eq!(
        seen,
        vec![
            ("row", 0),
            ("tabset", 1),
            ("tab", 2),
            ("tab", 2),
            ("splitter", 1),
            ("tabset", 1),
            ("tab", 2),
        ]
    );
}

#[test]
fn test_tree_dump_lists_ids() {
    let model = laid_out(&sample_document(), 808.0, 600.0);
    let dump = model.to_string();
    assert!(dump.starts_with("row root"));
    assert!(dump.contains("tabset left"));
    assert!(dump.contains("tab c"));
}
