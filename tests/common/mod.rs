//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use flexdock::{Model, NodeId, NodeKind, Rect};
use serde_json::{json, Value};

/// Root row with two tab sets: `left` holds tabs `a` and `b`, `right` holds `c`
pub fn sample_document() -> Value {
    json!({
        "global": { "tabSetMinWidth": 40 },
        "layout": {
            "type": "row",
            "id": "root",
            "children": [
                {
                    "type": "tabset",
                    "id": "left",
                    "weight": 50,
                    "children": [
                        { "type": "tab", "id": "a", "name": "A", "component": "editor" },
                        { "type": "tab", "id": "b", "name": "B", "component": "editor" }
                    ]
                },
                {
                    "type": "tabset",
                    "id": "right",
                    "weight": 50,
                    "children": [
                        { "type": "tab", "id": "c", "name": "C", "component": "terminal" }
                    ]
                }
            ]
        }
    })
}

/// Load a document and lay it out at `width` x `height`
pub fn laid_out(doc: &Value, width: f32, height: f32) -> Model {
    let mut model = Model::from_json(doc).expect("document should load");
    model
        .set_rect(Rect::new(0.0, 0.0, width, height))
        .expect("viewport should be valid");
    model
}

/// The sample document laid out at 808 x 600
pub fn sample_model() -> Model {
    laid_out(&sample_document(), 808.0, 600.0)
}

/// Handle of the node with external id `id`
pub fn handle(model: &Model, id: &str) -> NodeId {
    model
        .node_by_id(id)
        .unwrap_or_else(|| panic!("no node with id {}", id))
        .handle()
}

pub fn rect_of(model: &Model, id: NodeId) -> Rect {
    model.node(id).expect("node should be in the tree").rect()
}

/// Tab names of a tab set, in order
pub fn tab_names(model: &Model, tab_set: NodeId) -> Vec<String> {
    model
        .node(tab_set)
        .expect("tab set should be in the tree")
        .children()
        .iter()
        .map(|tab| model.node(*tab).unwrap().as_tab().unwrap().name.clone())
        .collect()
}

/// Every row's children and splitters exactly fill the row along its axis
pub fn assert_conserved(model: &Model) {
    let splitter = model.splitter_size();
    model.visit_nodes(|node, _| {
        let NodeKind::Row(row) = node.kind() else {
            return;
        };
        if node.children().is_empty() {
            return;
        }
        let used: f32 = node
            .children()
            .iter()
            .map(|c| model.node(*c).unwrap().rect().main_extent(row.orientation))
            .sum::<f32>()
            + (node.children().len() - 1) as f32 * splitter;
        let extent = node.rect().main_extent(row.orientation);
        assert!(
            (used - extent).abs() < 0.01,
            "row {} uses {} of {}",
            node.id(),
            used,
            extent
        );
    });
}

/// Every tab set selects one of its tabs, or nothing when empty
pub fn assert_selection_bounds(model: &Model) {
    model.visit_nodes(|node, _| {
        if let Some(attrs) = node.as_tab_set() {
            match attrs.selected {
                None => assert!(node.children().is_empty()),
                Some(i) => assert!(i < node.children().len()),
            }
        }
    });
}

/// The active tab set, if any, is a tab set in the tree
pub fn assert_active_valid(model: &Model) {
    if let Some(active) = model.active_tab_set() {
        assert!(model.node(active).is_some_and(|n| n.is_tab_set()));
    }
}
