//! Layout pass: assigns a rectangle to every node from the viewport down
//!
//! The pass is a pure function of tree shape, attributes and viewport, so
//! running it twice without a mutation in between gives identical rectangles.

use crate::model::{
    Model, ModelAttributes, NodeId, NodeKind, Orientation, Rect, SplitterData, TabSetAttributes,
};

use super::tree::fixed_extent;

/// Header, tab strip and content areas of a laid-out tab set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TabSetBands {
    /// Empty unless the tab set has a name
    pub header: Rect,
    /// Empty when the tab strip is disabled
    pub tab_strip: Rect,
    /// Area given to the selected tab
    pub content: Rect,
}

impl TabSetBands {
    pub fn compute(attrs: &TabSetAttributes, globals: &ModelAttributes, rect: Rect) -> Self {
        let mut rest = rect;
        let mut bands = TabSetBands::default();
        if attrs.name.is_some() {
            let (header, remainder) = rest.split_top(attrs.header_height(globals));
            bands.header = header;
            rest = remainder;
        }
        if attrs.enable_tab_strip(globals) {
            let (strip, remainder) = rest.split_top(attrs.tab_strip_height(globals));
            bands.tab_strip = strip;
            rest = remainder;
        }
        bands.content = rest;
        bands
    }
}

impl Model {
    /// Bands of a tab set from its last layout
    pub fn tab_set_bands(&self, id: NodeId) -> Option<TabSetBands> {
        let node = self.node(id)?;
        let attrs = node.as_tab_set()?;
        Some(TabSetBands::compute(attrs, self.attributes(), node.rect()))
    }
}

/// Lay out the whole tree inside the model's viewport
pub fn layout(model: &mut Model) {
    let viewport = model.rect();
    let root = model.root();
    layout_node(model, root, viewport, 0, viewport);
}

fn layout_node(model: &mut Model, id: NodeId, rect: Rect, depth: usize, viewport: Rect) {
    let Some(node) = model.node(id) else {
        return;
    };
    match node.kind() {
        NodeKind::Row(_) => layout_row(model, id, rect, depth, viewport),
        NodeKind::TabSet(_) => layout_tab_set(model, id, rect, viewport),
        NodeKind::Tab(_) | NodeKind::Splitter(_) => set_rect(model, id, rect),
    }
}

fn layout_row(model: &mut Model, id: NodeId, rect: Rect, depth: usize, viewport: Rect) {
    let orientation = Orientation::for_depth(depth);
    let children = model.children_of(id);
    if let Some(NodeKind::Row(row)) = model.node_mut(id).map(|n| &mut n.kind) {
        row.orientation = orientation;
    }
    set_rect(model, id, rect);

    let splitters = sync_splitters(model, id, children.len(), orientation);
    if children.is_empty() {
        return;
    }

    let sizes = distribute(model, &children, rect.main_extent(orientation), orientation);
    let splitter_size = model.splitter_size();
    let mut offset = 0.0;
    for (i, (child, size)) in children.iter().zip(sizes).enumerate() {
        layout_node(model, *child, rect.slice(orientation, offset, size), depth + 1, viewport);
        offset += size;
        if let Some(&splitter) = splitters.get(i) {
            set_rect(model, splitter, rect.slice(orientation, offset, splitter_size));
            offset += splitter_size;
        }
    }
}

/// Main-axis sizes a row gives its children from its last layout, before any
/// maximized tab set takes over the viewport
pub(crate) fn child_extents(model: &Model, row: NodeId) -> Vec<f32> {
    let Some(node) = model.node(row) else {
        return Vec::new();
    };
    let Some(data) = node.as_row() else {
        return Vec::new();
    };
    let orientation = data.orientation;
    distribute(model, node.children(), node.rect().main_extent(orientation), orientation)
}

/// Main-axis sizes of a row's children.
///
/// Fixed sizes and splitters come off the top, the rest is shared by weight in
/// whole pixels. The last weighted child absorbs the rounding remainder.
fn distribute(
    model: &Model,
    children: &[NodeId],
    extent: f32,
    orientation: Orientation,
) -> Vec<f32> {
    let gaps = children.len().saturating_sub(1) as f32 * model.splitter_size();
    let fixed: Vec<Option<f32>> = children
        .iter()
        .map(|c| fixed_extent(model, *c, orientation))
        .collect();
    let fixed_total: f32 = fixed.iter().flatten().sum();
    let available = f64::from((extent - gaps - fixed_total).max(0.0));

    let weights: Vec<f64> = children
        .iter()
        .map(|c| model.node(*c).and_then(|n| n.sizing()).map_or(0.0, |s| s.weight))
        .collect();
    let weighted_count = fixed.iter().filter(|f| f.is_none()).count();
    let total_weight: f64 = weights
        .iter()
        .zip(&fixed)
        .filter(|(_, f)| f.is_none())
        .map(|(w, _)| *w)
        .sum();
    let last_weighted = fixed.iter().rposition(Option::is_none);

    let mut assigned = 0.0_f64;
    let mut sizes = Vec::with_capacity(children.len());
    for (i, (weight, fixed)) in weights.iter().zip(&fixed).enumerate() {
        if let Some(size) = fixed {
            sizes.push(*size);
            continue;
        }
        let size = if Some(i) == last_weighted {
            (available - assigned).max(0.0)
        } else {
            let share = if total_weight > 0.0 {
                available * weight / total_weight
            } else {
                available / weighted_count as f64
            };
            share.round().min(available - assigned).max(0.0)
        };
        assigned += size;
        sizes.push(size as f32);
    }
    sizes
}

/// Keep one splitter per gap, reusing existing handles by position
fn sync_splitters(
    model: &mut Model,
    row: NodeId,
    children: usize,
    orientation: Orientation,
) -> Vec<NodeId> {
    let wanted = children.saturating_sub(1);
    let mut splitters = model
        .node(row)
        .and_then(|n| n.as_row())
        .map(|r| r.splitters.clone())
        .unwrap_or_default();

    while splitters.len() > wanted {
        if let Some(stale) = splitters.pop() {
            model.nodes.remove(&stale);
        }
    }
    while splitters.len() < wanted {
        let index = splitters.len();
        let splitter = model.alloc(None, NodeKind::Splitter(SplitterData { orientation, index }));
        if let Some(node) = model.node_mut(splitter) {
            node.parent = Some(row);
        }
        splitters.push(splitter);
    }
    for (index, splitter) in splitters.iter().enumerate() {
        if let Some(NodeKind::Splitter(data)) = model.node_mut(*splitter).map(|n| &mut n.kind) {
            data.orientation = orientation;
            data.index = index;
        }
    }

    if let Some(NodeKind::Row(data)) = model.node_mut(row).map(|n| &mut n.kind) {
        data.splitters = splitters.clone();
    }
    splitters
}

fn layout_tab_set(model: &mut Model, id: NodeId, rect: Rect, viewport: Rect) {
    let Some(attrs) = model.node(id).and_then(|n| n.as_tab_set()).cloned() else {
        return;
    };
    let rect = if attrs.maximized { viewport } else { rect };
    set_rect(model, id, rect);

    let content = TabSetBands::compute(&attrs, model.attributes(), rect).content;
    for (i, tab) in model.children_of(id).into_iter().enumerate() {
        let tab_rect = if attrs.selected == Some(i) {
            content
        } else {
            Rect::default()
        };
        set_rect(model, tab, tab_rect);
    }
}

fn set_rect(model: &mut Model, id: NodeId, rect: Rect) {
    if let Some(node) = model.node_mut(id) {
        node.rect = rect;
    }
}
