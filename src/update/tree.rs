//! Tree mutation handlers (delete, rename, select, resize, maximize, attributes)
//! and the tidy pass that collapses emptied containers.
//!
//! Every handler checks its inputs before touching the model.

use serde_json::{Map, Value};

use crate::error::{LayoutError, Result};
use crate::model::{Model, NodeEvent, NodeId, NodeKind, Orientation, Rect};

use super::layout::child_extents;

// ============================================================================
// Handlers
// ============================================================================

/// Remove a tab, then collapse whatever it leaves empty
pub fn delete_tab(model: &mut Model, node: NodeId) -> Result<()> {
    model.tab_attrs(node)?;
    model.detach(node);
    model.remove_subtree(node);
    tidy(model);
    Ok(())
}

pub fn rename_tab(model: &mut Model, node: NodeId, text: String) -> Result<()> {
    model.tab_attrs(node)?;
    if let Some(attrs) = model.node_mut(node).and_then(|n| n.tab_mut()) {
        attrs.name = text;
    }
    Ok(())
}

/// Show a tab in its tab set and make that tab set active
pub fn select_tab(model: &mut Model, tab: NodeId) -> Result<()> {
    model.tab_attrs(tab)?;
    let (Some(parent), Some(pos)) = (model.get(tab)?.parent(), model.position(tab)) else {
        return Err(LayoutError::InvalidReference(tab));
    };
    if let Some(attrs) = model.node_mut(parent).and_then(|n| n.tab_set_mut()) {
        attrs.selected = Some(pos);
    }
    model.set_active(Some(parent));
    Ok(())
}

pub fn set_active_tab_set(model: &mut Model, tab_set: Option<NodeId>) -> Result<()> {
    if let Some(id) = tab_set {
        model.tab_set_attrs(id)?;
    }
    model.set_active(tab_set);
    Ok(())
}

pub fn set_rect(model: &mut Model, rect: Rect) -> Result<()> {
    if !rect.is_valid_viewport() {
        return Err(LayoutError::invalid_action(format!("invalid viewport {}", rect)));
    }
    model.rect = rect;
    Ok(())
}

/// Move pixels across a splitter between its two neighbours.
///
/// Extents come from the row's own distribution, so a maximized tab set in the
/// row does not skew the split. Weighted neighbours keep their combined weight
/// and fixed-size neighbours get their new pixel size. When only one side is
/// fixed, the weighted side is reweighted so the rest of the row keeps its
/// pixels. Neither side shrinks below its minimum extent.
pub fn adjust_split(model: &mut Model, splitter: NodeId, delta: f32) -> Result<()> {
    let node = model.get(splitter)?;
    let Some(data) = node.as_splitter() else {
        return Err(LayoutError::invalid_action(format!("{} is not a splitter", splitter)));
    };
    if !delta.is_finite() {
        return Err(LayoutError::invalid_action("split delta must be finite"));
    }
    let orientation = data.orientation;
    let index = data.index;
    let row = node
        .parent()
        .ok_or(LayoutError::InvalidReference(splitter))?;
    let children = model.children_of(row);
    let (Some(&first), Some(&second)) = (children.get(index), children.get(index + 1)) else {
        return Err(LayoutError::invalid_action(format!(
            "splitter {} has no neighbours",
            splitter
        )));
    };

    let extents = child_extents(model, row);
    let (Some(&a), Some(&b)) = (extents.get(index), extents.get(index + 1)) else {
        return Ok(());
    };
    let total = a + b;
    let min_a = min_extent(model, first, orientation);
    let min_b = min_extent(model, second, orientation);
    let upper = (total - min_b).max(min_a);
    let new_a = (a + delta).clamp(min_a, upper).min(total);
    let new_b = total - new_a;

    let fixed_a = fixed_extent(model, first, orientation);
    let fixed_b = fixed_extent(model, second, orientation);

    match (fixed_a, fixed_b) {
        (None, None) => {
            if total <= 0.0 {
                return Ok(());
            }
            let weight_a = weight_of(model, first);
            let combined = weight_a + weight_of(model, second);
            let new_weight_a = combined * f64::from(new_a) / f64::from(total);
            set_weight(model, first, new_weight_a);
            set_weight(model, second, combined - new_weight_a);
        }
        (Some(_), None) => {
            let weight = weight_for_extent(model, &children, &extents, second, new_b, orientation);
            set_fixed_extent(model, first, orientation, new_a);
            if let Some(weight) = weight {
                set_weight(model, second, weight);
            }
        }
        (None, Some(_)) => {
            let weight = weight_for_extent(model, &children, &extents, first, new_a, orientation);
            set_fixed_extent(model, second, orientation, new_b);
            if let Some(weight) = weight {
                set_weight(model, first, weight);
            }
        }
        (Some(_), Some(_)) => {
            set_fixed_extent(model, first, orientation, new_a);
            set_fixed_extent(model, second, orientation, new_b);
        }
    }
    Ok(())
}

/// Weight that gives `node` an extent of `size` while the other weighted
/// children of the row keep their current extents.
///
/// `None` when `node` is the only weighted child, since it already takes
/// whatever the fixed children leave.
fn weight_for_extent(
    model: &Model,
    children: &[NodeId],
    extents: &[f32],
    node: NodeId,
    size: f32,
    orientation: Orientation,
) -> Option<f64> {
    let (others_weight, others_extent) = children
        .iter()
        .zip(extents)
        .filter(|(c, _)| **c != node && fixed_extent(model, **c, orientation).is_none())
        .fold((0.0, 0.0), |(w, e), (c, extent)| {
            (w + weight_of(model, *c), e + f64::from(*extent))
        });
    (others_weight > 0.0 && others_extent > 0.0)
        .then(|| others_weight * f64::from(size) / others_extent)
}

/// Toggle maximize; maximizing clears any other maximized tab set
pub fn maximize_toggle(model: &mut Model, node: NodeId) -> Result<()> {
    let maximized = !model.tab_set_attrs(node)?.maximized;
    if maximized {
        clear_maximized(model);
    }
    if let Some(attrs) = model.node_mut(node).and_then(|n| n.tab_set_mut()) {
        attrs.maximized = maximized;
    }
    tracing::debug!(node = %node, maximized, "maximize toggled");
    model.fire_node_event(node, NodeEvent::Maximize { maximized });
    model.set_active(Some(node));
    Ok(())
}

pub fn update_model_attributes(model: &mut Model, json: &Map<String, Value>) -> Result<()> {
    model.registry.global.update(json, &mut model.attributes)
}

pub fn update_node_attributes(
    model: &mut Model,
    node: NodeId,
    json: &Map<String, Value>,
) -> Result<()> {
    let current = model.get(node)?;
    let len = current.children().len();
    match current.kind().clone() {
        NodeKind::Row(mut row) => {
            model.registry.row.update(json, &mut row.sizing)?;
            if let Some(n) = model.node_mut(node) {
                n.kind = NodeKind::Row(row);
            }
        }
        NodeKind::TabSet(mut attrs) => {
            model.registry.tab_set.update(json, &mut attrs)?;
            let selection_ok = match attrs.selected {
                None => len == 0,
                Some(i) => i < len,
            };
            if !selection_ok {
                return Err(LayoutError::invalid_attribute(
                    "selected",
                    format!("no tab at {:?} in a tab set of {}", attrs.selected, len),
                ));
            }
            if attrs.maximized && model.maximized_tab_set() != Some(node) {
                clear_maximized(model);
            }
            if let Some(n) = model.node_mut(node) {
                n.kind = NodeKind::TabSet(attrs);
            }
        }
        NodeKind::Tab(mut attrs) => {
            model.registry.tab.update(json, &mut attrs)?;
            if let Some(n) = model.node_mut(node) {
                n.kind = NodeKind::Tab(attrs);
            }
        }
        NodeKind::Splitter(_) => {
            return Err(LayoutError::invalid_action("splitters have no attributes"));
        }
    }
    Ok(())
}

// ============================================================================
// Tidy
// ============================================================================

/// Remove empty tab sets and rows, and collapse single-child rows into their
/// parent, bottom-up from the root
pub(crate) fn tidy(model: &mut Model) {
    let root = model.root;
    tidy_row(model, root);
}

fn tidy_row(model: &mut Model, row: NodeId) {
    let mut i = 0;
    while let Some(&child) = model.children_of(row).get(i) {
        let Some(node) = model.node(child) else {
            i += 1;
            continue;
        };
        let is_row = node.is_row();
        let is_empty_tab_set = node.is_tab_set() && node.children().is_empty();

        if is_empty_tab_set {
            model.detach(child);
            model.remove_subtree(child);
            continue;
        }

        if is_row {
            tidy_row(model, child);
            match model.children_of(child).len() {
                0 => {
                    model.detach(child);
                    model.remove_subtree(child);
                    continue;
                }
                1 => {
                    collapse_row(model, row, i, child);
                    continue;
                }
                _ => {}
            }
        }
        i += 1;
    }
}

/// Replace a single-child `row` at position `pos` of `parent` with its content.
///
/// A tab set takes over the row's sizing. A nested row has the same axis as
/// `parent`, so its children are spliced in directly with scaled weights.
fn collapse_row(model: &mut Model, parent: NodeId, pos: usize, row: NodeId) {
    let Some(&only) = model.children_of(row).first() else {
        return;
    };
    let sizing = model.get(row).ok().and_then(|n| n.sizing().cloned()).unwrap_or_default();
    let only_is_row = model.node(only).is_some_and(|n| n.is_row());

    model.detach(row);
    if only_is_row {
        let grandchildren = model.children_of(only);
        let total: f64 = grandchildren
            .iter()
            .filter_map(|g| model.node(*g).and_then(|n| n.sizing()).map(|s| s.weight))
            .sum();
        for (k, grandchild) in grandchildren.into_iter().enumerate() {
            model.detach(grandchild);
            if total > 0.0 {
                if let Some(s) = model.node_mut(grandchild).and_then(|n| n.sizing_mut()) {
                    s.weight = s.weight / total * sizing.weight;
                }
            }
            model.attach(parent, grandchild, Some(pos + k));
        }
    } else {
        model.detach(only);
        if let Some(s) = model.node_mut(only).and_then(|n| n.sizing_mut()) {
            *s = sizing;
        }
        model.attach(parent, only, Some(pos));
    }
    model.remove_subtree(row);
}

// ============================================================================
// Helpers
// ============================================================================

/// Restore the maximized tab set, if any, telling its listener
fn clear_maximized(model: &mut Model) {
    if let Some(previous) = model.maximized_tab_set() {
        if let Some(attrs) = model.node_mut(previous).and_then(|n| n.tab_set_mut()) {
            attrs.maximized = false;
        }
        model.fire_node_event(previous, NodeEvent::Maximize { maximized: false });
    }
}

fn weight_of(model: &Model, node: NodeId) -> f64 {
    model.node(node).and_then(|n| n.sizing()).map_or(0.0, |s| s.weight)
}

fn set_weight(model: &mut Model, node: NodeId, weight: f64) {
    if let Some(sizing) = model.node_mut(node).and_then(|n| n.sizing_mut()) {
        sizing.weight = weight.max(0.0);
    }
}

/// Fixed pixel size of a row child along `orientation`, if it has one
pub(crate) fn fixed_extent(model: &Model, node: NodeId, orientation: Orientation) -> Option<f32> {
    let sizing = model.node(node)?.sizing()?;
    match orientation {
        Orientation::Horizontal => sizing.width,
        Orientation::Vertical => sizing.height,
    }
    .map(|size| size as f32)
}

fn set_fixed_extent(model: &mut Model, node: NodeId, orientation: Orientation, size: f32) {
    if let Some(sizing) = model.node_mut(node).and_then(|n| n.sizing_mut()) {
        match orientation {
            Orientation::Horizontal => sizing.width = Some(f64::from(size)),
            Orientation::Vertical => sizing.height = Some(f64::from(size)),
        }
    }
}

/// Smallest extent a row child can be given along `orientation`
pub(crate) fn min_extent(model: &Model, node: NodeId, orientation: Orientation) -> f32 {
    let Some(n) = model.node(node) else {
        return 0.0;
    };
    match n.kind() {
        NodeKind::TabSet(attrs) => match orientation {
            Orientation::Horizontal => attrs.min_width(model.attributes()),
            Orientation::Vertical => attrs.min_height(model.attributes()),
        },
        NodeKind::Row(row) => {
            let mins = n.children().iter().map(|c| min_extent(model, *c, orientation));
            if row.orientation == orientation {
                let gaps = n.children().len().saturating_sub(1) as f32;
                mins.sum::<f32>() + gaps * model.splitter_size()
            } else {
                mins.fold(0.0, f32::max)
            }
        }
        _ => 0.0,
    }
}
