//! Drop resolution for ADD_NODE and MOVE_NODE
//!
//! A drop is checked in full before anything moves: the target must accept the
//! location, and drops that would leave the tree as it is are skipped.

use serde_json::Value;

use crate::error::{LayoutError, Result};
use crate::messages::DockLocation;
use crate::model::attributes::DEFAULT_WEIGHT;
use crate::model::{Model, NodeId, NodeKind, Orientation, RowData, Sizing, TabSetAttributes};

use super::tree::tidy;

// ============================================================================
// Handlers
// ============================================================================

/// Create a tab from `json` and dock it at `to`
pub fn add_node(
    model: &mut Model,
    json: &Value,
    to: NodeId,
    location: DockLocation,
    index: Option<usize>,
) -> Result<()> {
    let (id, attrs) = model.tab_from_json(json)?;
    validate_target(model, to, location, index)?;

    let tab = model.alloc(id, NodeKind::Tab(attrs));
    drop_node(model, tab, to, location, index);
    Ok(())
}

/// Move an existing tab or tab set to `to`
pub fn move_node(
    model: &mut Model,
    from: NodeId,
    to: NodeId,
    location: DockLocation,
    index: Option<usize>,
) -> Result<()> {
    let dragged = model.get(from)?;
    if !(dragged.is_tab() || dragged.is_tab_set()) {
        return Err(LayoutError::invalid_action(format!(
            "only tabs and tab sets can be moved, {} is a {}",
            from,
            dragged.node_type()
        )));
    }
    model.get(to)?;
    if from != to && model.is_ancestor(from, to) {
        return Err(LayoutError::invalid_action(format!(
            "cannot drop {} inside itself",
            from
        )));
    }
    validate_target(model, to, location, index)?;

    if is_noop(model, from, to, location, index) {
        tracing::debug!(from = %from, to = %to, ?location, "ignoring drop onto itself");
        return Ok(());
    }

    drop_node(model, from, to, location, index);
    Ok(())
}

// ============================================================================
// Validation
// ============================================================================

fn validate_target(
    model: &Model,
    to: NodeId,
    location: DockLocation,
    index: Option<usize>,
) -> Result<()> {
    let target = model.get(to)?;
    let globals = model.attributes();
    match target.kind() {
        NodeKind::TabSet(attrs) => {
            if !attrs.enable_drop(globals) {
                return Err(LayoutError::invalid_action(format!(
                    "tab set {} does not accept drops",
                    to
                )));
            }
            match (location, index) {
                (DockLocation::Center, Some(i)) if i > target.children().len() => {
                    Err(LayoutError::invalid_action(format!(
                        "index {} out of range for tab set {} with {} tabs",
                        i,
                        to,
                        target.children().len()
                    )))
                }
                (DockLocation::Center, _) => Ok(()),
                _ if !attrs.enable_divide(globals) => Err(LayoutError::invalid_action(format!(
                    "tab set {} cannot be divided",
                    to
                ))),
                _ => Ok(()),
            }
        }
        NodeKind::Row(_) => {
            let is_root = to == model.root();
            if is_root && target.children().is_empty() {
                return Ok(());
            }
            if location == DockLocation::Center {
                return Err(LayoutError::invalid_action(format!(
                    "row {} only accepts edge drops",
                    to
                )));
            }
            if is_root && !model.is_enable_edge_dock() {
                return Err(LayoutError::invalid_action("edge docking is disabled"));
            }
            Ok(())
        }
        NodeKind::Tab(_) | NodeKind::Splitter(_) => Err(LayoutError::invalid_action(format!(
            "cannot drop onto a {}",
            target.node_type()
        ))),
    }
}

/// Drops that would leave the tree unchanged
fn is_noop(
    model: &Model,
    from: NodeId,
    to: NodeId,
    location: DockLocation,
    index: Option<usize>,
) -> bool {
    if from == to {
        return true;
    }
    let Some(dragged) = model.node(from) else {
        return false;
    };
    if !dragged.is_tab() || dragged.parent() != Some(to) {
        return false;
    }
    let (Some(pos), len) = (model.position(from), model.children_of(to).len()) else {
        return false;
    };
    match (location, index) {
        (DockLocation::Center, None) => pos + 1 == len,
        (DockLocation::Center, Some(i)) => i == pos || i == pos + 1,
        _ => len == 1,
    }
}

// ============================================================================
// Drop
// ============================================================================

fn drop_node(
    model: &mut Model,
    node: NodeId,
    to: NodeId,
    location: DockLocation,
    index: Option<usize>,
) {
    let mut index = index;
    if let Some((parent, pos)) = model.detach(node) {
        if parent == to {
            index = index.map(|i| if i > pos { i - 1 } else { i });
        }
    }

    let target_is_tab_set = model.node(to).is_some_and(|n| n.is_tab_set());
    let active = if target_is_tab_set && location == DockLocation::Center {
        dock_center(model, node, to, index);
        to
    } else if target_is_tab_set {
        dock_beside(model, node, to, location)
    } else {
        dock_in_row(model, node, to, location)
    };

    tidy(model);
    model.set_active(Some(active));
    tracing::debug!(node = %node, target = %to, ?location, "docked");
}

/// Insert a tab, or every tab of a dragged tab set, into `tab_set`
fn dock_center(model: &mut Model, node: NodeId, tab_set: NodeId, index: Option<usize>) {
    // the dragged node is detached, so look it up in the arena directly
    let merged = model.nodes.get(&node).and_then(|n| n.as_tab_set()).cloned();
    let (tabs, selected) = match merged {
        Some(ref attrs) => {
            let tabs = model.children_of(node);
            let selected = attrs.selected.and_then(|i| tabs.get(i).copied());
            (tabs, selected)
        }
        None => (vec![node], Some(node)),
    };

    for (k, tab) in tabs.iter().enumerate() {
        model.detach(*tab);
        model.attach(tab_set, *tab, index.map(|i| i + k));
    }
    if merged.is_some() {
        model.remove_subtree(node);
    }

    let shown = selected.or_else(|| tabs.first().copied());
    let pos = shown.and_then(|tab| model.position(tab));
    let len = model.children_of(tab_set).len();
    if let Some(attrs) = model.node_mut(tab_set).and_then(|n| n.tab_set_mut()) {
        if pos.is_some() {
            attrs.selected = pos;
        }
        attrs.normalize_selected(len);
    }
}

/// Place `node` next to `target` inside the target's parent row, wrapping the
/// pair in a new row when the parent runs along the other axis. Returns the
/// tab set that was placed.
fn dock_beside(model: &mut Model, node: NodeId, target: NodeId, location: DockLocation) -> NodeId {
    let placed = wrap_in_tab_set(model, node);
    let (Some(axis), Some(parent), Some(pos)) = (
        location.orientation(),
        model.node(target).and_then(|n| n.parent()),
        model.position(target),
    ) else {
        return placed;
    };
    let parent_axis = Orientation::for_depth(model.depth(parent).unwrap_or(0));
    let target_sizing = model
        .node(target)
        .and_then(|n| n.sizing())
        .cloned()
        .unwrap_or_default();

    if parent_axis == axis {
        let mut half = Sizing {
            weight: target_sizing.weight / 2.0,
            width: None,
            height: None,
        };
        match axis {
            Orientation::Horizontal => half.width = target_sizing.width.map(|w| w / 2.0),
            Orientation::Vertical => half.height = target_sizing.height.map(|h| h / 2.0),
        }
        if let Some(sizing) = model.node_mut(target).and_then(|n| n.sizing_mut()) {
            sizing.weight = half.weight;
            match axis {
                Orientation::Horizontal => sizing.width = half.width,
                Orientation::Vertical => sizing.height = half.height,
            }
        }
        set_sizing(model, placed, half);
        let at = if location.is_leading() { pos } else { pos + 1 };
        model.attach(parent, placed, Some(at));
    } else {
        model.detach(target);
        let row = model.alloc(None, NodeKind::Row(RowData::new(target_sizing)));
        model.attach(parent, row, Some(pos));
        set_sizing(model, target, weighted(50.0));
        set_sizing(model, placed, weighted(50.0));
        let order = if location.is_leading() {
            [placed, target]
        } else {
            [target, placed]
        };
        for child in order {
            model.attach(row, child, None);
        }
    }
    placed
}

/// Edge drop on a row: add at the row's near or far end when the row runs
/// along the drop axis, otherwise place beside the row (or, for the root,
/// wrap the existing content). Returns the tab set that was placed.
fn dock_in_row(model: &mut Model, node: NodeId, row: NodeId, location: DockLocation) -> NodeId {
    let placed = wrap_in_tab_set(model, node);
    let children = model.children_of(row);
    if children.is_empty() {
        model.attach(row, placed, None);
        return placed;
    }
    let Some(axis) = location.orientation() else {
        return placed;
    };
    let row_axis = model.orientation(row).unwrap_or(Orientation::Horizontal);

    if row_axis == axis {
        let total: f64 = children
            .iter()
            .filter_map(|c| model.node(*c).and_then(|n| n.sizing()))
            .map(|s| s.weight)
            .sum();
        let total = if total > 0.0 { total } else { DEFAULT_WEIGHT };
        set_sizing(model, placed, weighted(total / 3.0));
        let at = if location.is_leading() { 0 } else { children.len() };
        model.attach(row, placed, Some(at));
        return placed;
    }

    if row != model.root() {
        return dock_beside_row(model, placed, row, location);
    }

    // root runs horizontally: stack the new tab set over or under everything else
    let stack = model.alloc(None, NodeKind::Row(RowData::new(Sizing::default())));
    let rest = model.alloc(None, NodeKind::Row(RowData::new(weighted(75.0))));
    for child in children {
        model.detach(child);
        model.attach(rest, child, None);
    }
    set_sizing(model, placed, weighted(25.0));
    let order = if location.is_leading() {
        [placed, rest]
    } else {
        [rest, placed]
    };
    for child in order {
        model.attach(stack, child, None);
    }
    model.attach(row, stack, None);
    placed
}

/// A non-root row's parent always runs along the other axis, so dropping on
/// the row's cross edges splits the parent
fn dock_beside_row(
    model: &mut Model,
    placed: NodeId,
    row: NodeId,
    location: DockLocation,
) -> NodeId {
    let (Some(parent), Some(pos)) = (model.node(row).and_then(|n| n.parent()), model.position(row))
    else {
        return placed;
    };
    let weight = model
        .node(row)
        .and_then(|n| n.sizing())
        .map_or(DEFAULT_WEIGHT, |s| s.weight)
        / 2.0;
    if let Some(sizing) = model.node_mut(row).and_then(|n| n.sizing_mut()) {
        sizing.weight = weight;
    }
    set_sizing(model, placed, weighted(weight));
    let at = if location.is_leading() { pos } else { pos + 1 };
    model.attach(parent, placed, Some(at));
    placed
}

// ============================================================================
// Helpers
// ============================================================================

/// A dragged tab travels in a fresh tab set; a dragged tab set travels as is
fn wrap_in_tab_set(model: &mut Model, node: NodeId) -> NodeId {
    if model.nodes.get(&node).is_some_and(|n| n.is_tab_set()) {
        return node;
    }
    let tab_set = model.alloc(None, NodeKind::TabSet(TabSetAttributes::default()));
    model.attach(tab_set, node, None);
    if let Some(attrs) = model.node_mut(tab_set).and_then(|n| n.tab_set_mut()) {
        attrs.selected = Some(0);
    }
    tab_set
}

fn weighted(weight: f64) -> Sizing {
    Sizing {
        weight,
        ..Sizing::default()
    }
}

fn set_sizing(model: &mut Model, node: NodeId, sizing: Sizing) {
    if let Some(current) = model.node_mut(node).and_then(|n| n.sizing_mut()) {
        *current = sizing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_tabs() -> (Model, NodeId, NodeId, NodeId) {
        let model = Model::from_json(&json!({
            "layout": { "type": "row", "children": [
                { "type": "tabset", "id": "main", "children": [
                    { "type": "tab", "id": "a", "name": "A" },
                    { "type": "tab", "id": "b", "name": "B" }
                ]}
            ]}
        }))
        .unwrap();
        let main = model.node_by_id("main").unwrap().handle();
        let a = model.node_by_id("a").unwrap().handle();
        let b = model.node_by_id("b").unwrap().handle();
        (model, main, a, b)
    }

    #[test]
    fn test_reorder_within_tab_set() {
        let (mut model, main, a, b) = two_tabs();
        move_node(&mut model, a, main, DockLocation::Center, Some(2)).unwrap();
        assert_eq!(model.node(main).unwrap().children(), &[b, a]);
        assert_eq!(model.tab_set_attrs(main).unwrap().selected, Some(1));
    }

    #[test]
    fn test_tab_onto_own_slot_is_noop() {
        let (model, main, a, b) = two_tabs();
        assert!(is_noop(&model, a, main, DockLocation::Center, Some(0)));
        assert!(is_noop(&model, a, main, DockLocation::Center, Some(1)));
        assert!(is_noop(&model, b, main, DockLocation::Center, None));
        assert!(!is_noop(&model, a, main, DockLocation::Center, None));
        assert!(!is_noop(&model, a, main, DockLocation::Right, None));
    }

    #[test]
    fn test_edge_drop_splits_parent_row() {
        let (mut model, main, _, b) = two_tabs();
        move_node(&mut model, b, main, DockLocation::Right, None).unwrap();

        let root = model.root_node();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0], main);
        let placed = model.node(root.children()[1]).unwrap();
        assert_eq!(placed.children(), &[b]);
        assert_eq!(placed.sizing().unwrap().weight, 50.0);
        assert_eq!(model.node(main).unwrap().sizing().unwrap().weight, 50.0);
        assert_eq!(model.active_tab_set(), Some(placed.handle()));
    }

    #[test]
    fn test_cross_axis_drop_wraps_target() {
        let (mut model, main, a, _) = two_tabs();
        move_node(&mut model, a, main, DockLocation::Top, None).unwrap();

        let root = model.root_node();
        assert_eq!(root.children().len(), 1);
        let wrapper = model.node(root.children()[0]).unwrap();
        assert!(wrapper.is_row());
        assert_eq!(model.orientation(wrapper.handle()), Some(Orientation::Vertical));
        assert_eq!(wrapper.children()[1], main);
        let top = model.node(wrapper.children()[0]).unwrap();
        assert_eq!(top.children(), &[a]);
    }

    #[test]
    fn test_drop_onto_tab_is_rejected() {
        let (mut model, _, a, b) = two_tabs();
        let result = move_node(&mut model, a, b, DockLocation::Center, None);
        assert!(matches!(result, Err(LayoutError::InvalidAction(_))));
    }

    #[test]
    fn test_center_index_out_of_range() {
        let (mut model, main, _, _) = two_tabs();
        let tab = json!({ "name": "C" });
        let result = add_node(&mut model, &tab, main, DockLocation::Center, Some(5));
        assert!(matches!(result, Err(LayoutError::InvalidAction(_))));
        assert_eq!(model.tab_count(), 2);
    }
}
