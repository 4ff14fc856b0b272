//! Tests for layout documents and serialized actions

mod common;

use common::{handle, laid_out, sample_document, sample_model};
use flexdock::{Action, DockLocation, LayoutError, Model, NodeId, Rect};
use serde_json::json;

// ============================================================================
// Documents
// ============================================================================

#[test]
fn test_round_trip_preserves_attributes_and_order() {
    let doc = sample_document();
    let model = Model::from_json(&doc).unwrap();
    assert_eq!(model.to_json(), doc);
}

#[test]
fn test_round_trip_of_rich_document() {
    let doc = json!({
        "global": { "tabSetHeaderHeight": 24, "enableEdgeDock": false, "tabIcon": "file.svg" },
        "layout": {
            "type": "row",
            "weight": 100,
            "children": [
                { "type": "tabset", "width": 250, "name": "Explorer", "enableClose": false, "children": [
                    { "type": "tab", "name": "Files", "component": "tree", "config": { "root": "/" } }
                ]},
                { "type": "row", "weight": 75, "children": [
                    { "type": "tabset", "selected": 1, "maximized": true, "children": [
                        { "type": "tab", "id": "one", "name": "one.rs", "enableRename": false },
                        { "type": "tab", "id": "two", "name": "two.rs", "icon": "rust.svg" }
                    ]},
                    { "type": "tabset", "height": 200, "minHeight": 80, "children": [
                        { "type": "tab", "name": "Terminal", "className": "term" }
                    ]}
                ]}
            ]
        }
    });

    let model = Model::from_json(&doc).unwrap();
    let out = model.to_json();

    // the root weight equals its default, so it is not written back
    assert_eq!(out["global"], doc["global"]);
    assert_eq!(out["layout"]["children"], doc["layout"]["children"]);
    assert!(out["layout"].get("weight").is_none());
    assert_eq!(Model::from_json(&out).unwrap().to_json(), out);
}

#[test]
fn test_round_trip_keeps_fractional_sizes() {
    let doc = json!({
        "global": { "splitterSize": 2.3, "tabSetHeaderHeight": 18.5 },
        "layout": { "type": "row", "children": [
            { "type": "tabset", "width": 100.3, "minHeight": 40.1 },
            { "type": "tabset", "weight": 33.3 }
        ]}
    });
    let model = laid_out(&doc, 800.0, 600.0);
    assert_eq!(model.to_json(), doc);
}

#[test]
fn test_fractional_size_survives_attribute_update() {
    let mut model = sample_model();
    let left = handle(&model, "left");
    let attrs = json!({ "width": 120.7 }).as_object().cloned().unwrap();
    model.dispatch(Action::update_node_attributes(left, attrs)).unwrap();

    assert_eq!(model.to_json()["layout"]["children"][0]["width"], json!(120.7));
    assert_eq!(model.node(left).unwrap().sizing().unwrap().width, Some(120.7));
}

#[test]
fn test_defaults_are_not_written() {
    let model = Model::new();
    assert_eq!(
        model.to_json(),
        json!({
            "global": {},
            "layout": { "type": "row", "children": [{ "type": "tabset" }] }
        })
    );
}

#[test]
fn test_missing_and_unknown_keys() {
    let model = Model::from_json(&json!({
        "layout": { "type": "row", "flavour": "vanilla", "children": [
            { "type": "tabset", "weight": "heavy", "children": [
                { "type": "tab", "colour": "red" }
            ]}
        ]}
    }))
    .unwrap();

    let tab_set = model.root_node().children()[0];
    assert_eq!(model.node(tab_set).unwrap().sizing().unwrap().weight, 100.0);
    let tab = model.node(tab_set).unwrap().children()[0];
    assert_eq!(model.node(tab).unwrap().as_tab().unwrap().name, "[Unnamed Tab]");
    assert_eq!(model.splitter_size(), 8.0);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let result = Model::from_json(&json!({
        "layout": { "type": "row", "children": [
            { "type": "tabset", "id": "same", "children": [{ "type": "tab", "id": "same" }] }
        ]}
    }));
    assert!(matches!(result, Err(LayoutError::DuplicateId(ref id)) if id == "same"));
}

#[test]
fn test_out_of_range_selection_is_clamped() {
    let model = Model::from_json(&json!({
        "layout": { "type": "row", "children": [
            { "type": "tabset", "id": "ts", "selected": 9, "children": [
                { "type": "tab" }, { "type": "tab" }
            ]},
            { "type": "tabset", "id": "empty", "selected": 3 }
        ]}
    }))
    .unwrap();
    let ts = handle(&model, "ts");
    let empty = handle(&model, "empty");
    assert_eq!(model.node(ts).unwrap().as_tab_set().unwrap().selected, Some(1));
    assert_eq!(model.node(empty).unwrap().as_tab_set().unwrap().selected, None);
}

#[test]
fn test_second_maximized_tab_set_is_cleared() {
    let model = Model::from_json(&json!({
        "layout": { "type": "row", "children": [
            { "type": "tabset", "id": "first", "maximized": true },
            { "type": "tabset", "id": "second", "maximized": true }
        ]}
    }))
    .unwrap();
    assert_eq!(model.maximized_tab_set(), Some(handle(&model, "first")));
    assert!(!model.node_by_id("second").unwrap().as_tab_set().unwrap().maximized);
}

#[test]
fn test_non_row_root_is_wrapped() {
    let model = Model::from_json(&json!({
        "layout": { "type": "tabset", "id": "lonely", "children": [{ "type": "tab" }] }
    }))
    .unwrap();
    assert!(model.root_node().is_row());
    assert_eq!(model.root_node().children(), &[handle(&model, "lonely")]);
}

#[test]
fn test_malformed_document_is_an_error() {
    let result = Model::from_json_str("{ \"layout\": [1, 2, 3] }");
    assert!(matches!(result, Err(LayoutError::Document(_))));
    assert!(Model::from_json_str("not json").is_err());
}

#[test]
fn test_to_json_string_parses_back() {
    let model = sample_model();
    let text = model.to_json_string().unwrap();
    let reloaded = Model::from_json_str(&text).unwrap();
    assert_eq!(reloaded.to_json(), model.to_json());
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_action_wire_format() {
    let action = Action::move_node(NodeId(3), NodeId(7), DockLocation::Left, Some(2));
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({ "type": "MOVE_NODE", "from_node": 3, "to_node": 7, "location": "left", "index": 2 })
    );
}

#[test]
fn test_actions_parse_from_script() {
    let actions: Vec<Action> = serde_json::from_value(json!([
        { "type": "SELECT_TAB", "tab_node": 4 },
        { "type": "SET_ACTIVE_TABSET" },
        { "type": "SET_RECT", "rect": { "x": 0, "y": 0, "width": 640, "height": 480 } },
        { "type": "ADD_NODE", "json": { "name": "New" }, "to_node": 2, "location": "center" },
        { "type": "UPDATE_MODEL_ATTRIBUTES", "json": { "splitterSize": 2 } }
    ]))
    .unwrap();

    assert_eq!(actions[0], Action::select_tab(NodeId(4)));
    assert_eq!(actions[1], Action::set_active_tab_set(None));
    assert_eq!(actions[2], Action::set_rect(Rect::new(0.0, 0.0, 640.0, 480.0)));
    assert_eq!(
        actions[3],
        Action::add_node(json!({ "name": "New" }), NodeId(2), DockLocation::Center, None)
    );
    assert_eq!(actions[4].name(), "UPDATE_MODEL_ATTRIBUTES");
}

#[test]
fn test_scripted_actions_drive_the_model() {
    let mut model = sample_model();
    let c = handle(&model, "c");
    let left = handle(&model, "left");
    let script = json!([
        { "type": "MOVE_NODE", "from_node": c.0, "to_node": left.0, "location": "center" },
        { "type": "RENAME_TAB", "node": c.0, "text": "Console" }
    ]);
    let actions: Vec<Action> = serde_json::from_value(script).unwrap();
    for action in actions {
        model.dispatch(action).unwrap();
    }
    assert_eq!(model.node(c).unwrap().as_tab().unwrap().name, "Console");
    assert_eq!(model.node(c).unwrap().parent(), Some(left));
}
