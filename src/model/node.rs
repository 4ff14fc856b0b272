//! Layout tree nodes
//!
//! Nodes live in an arena owned by the [`Model`](super::Model) and refer to each
//! other through [`NodeId`] handles, so detaching and re-attaching a subtree never
//! invalidates a reference held elsewhere.

use serde::{Deserialize, Serialize};

use super::attributes::{Sizing, TabAttributes, TabSetAttributes};
use super::Rect;

// ============================================================================
// Identifiers
// ============================================================================

/// Arena handle of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// Axis a row stacks its children along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Children arranged left-to-right
    Horizontal,
    /// Children arranged top-to-bottom
    Vertical,
}

impl Orientation {
    /// Rows alternate axes with nesting depth, starting horizontal at the root
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

// ============================================================================
// Variants
// ============================================================================

/// A container splitting its main axis among rows and tab sets
#[derive(Debug, Clone)]
pub struct RowData {
    pub sizing: Sizing,
    /// Derived from depth on every layout pass
    pub orientation: Orientation,
    /// Synthesized splitters, one per gap between children
    pub(crate) splitters: Vec<NodeId>,
}

impl RowData {
    pub(crate) fn new(sizing: Sizing) -> Self {
        Self {
            sizing,
            orientation: Orientation::Horizontal,
            splitters: Vec::new(),
        }
    }

    pub fn splitters(&self) -> &[NodeId] {
        &self.splitters
    }
}

/// A resize handle between two adjacent children of a row. Never serialized.
#[derive(Debug, Clone)]
pub struct SplitterData {
    /// Orientation of the owning row
    pub orientation: Orientation,
    /// Position of the child before this splitter in the row
    pub index: usize,
}

/// The closed set of node variants
#[derive(Debug, Clone)]
pub enum NodeKind {
    Row(RowData),
    TabSet(TabSetAttributes),
    Tab(TabAttributes),
    Splitter(SplitterData),
}

// ============================================================================
// Node
// ============================================================================

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) handle: NodeId,
    pub(crate) id: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) rect: Rect,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(handle: NodeId, id: Option<String>, kind: NodeKind) -> Self {
        Self {
            handle,
            id,
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            kind,
        }
    }

    pub fn handle(&self) -> NodeId {
        self.handle
    }

    /// The external id, or a generated `#<n>` id when none was assigned
    pub fn id(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.handle.to_string())
    }

    /// The externally assigned id, if any
    pub fn external_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Rectangle assigned by the last layout pass
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Variant tag as used in documents
    pub fn node_type(&self) -> &'static str {
        match self.kind {
            NodeKind::Row(_) => "row",
            NodeKind::TabSet(_) => "tabset",
            NodeKind::Tab(_) => "tab",
            NodeKind::Splitter(_) => "splitter",
        }
    }

    pub fn as_row(&self) -> Option<&RowData> {
        match &self.kind {
            NodeKind::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_tab_set(&self) -> Option<&TabSetAttributes> {
        match &self.kind {
            NodeKind::TabSet(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_tab(&self) -> Option<&TabAttributes> {
        match &self.kind {
            NodeKind::Tab(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_splitter(&self) -> Option<&SplitterData> {
        match &self.kind {
            NodeKind::Splitter(splitter) => Some(splitter),
            _ => None,
        }
    }

    #[inline]
    pub fn is_row(&self) -> bool {
        matches!(self.kind, NodeKind::Row(_))
    }

    #[inline]
    pub fn is_tab_set(&self) -> bool {
        matches!(self.kind, NodeKind::TabSet(_))
    }

    #[inline]
    pub fn is_tab(&self) -> bool {
        matches!(self.kind, NodeKind::Tab(_))
    }

    /// Weight and fixed size for rows and tab sets
    pub fn sizing(&self) -> Option<&Sizing> {
        match &self.kind {
            NodeKind::Row(row) => Some(&row.sizing),
            NodeKind::TabSet(attrs) => Some(&attrs.sizing),
            _ => None,
        }
    }

    pub(crate) fn sizing_mut(&mut self) -> Option<&mut Sizing> {
        match &mut self.kind {
            NodeKind::Row(row) => Some(&mut row.sizing),
            NodeKind::TabSet(attrs) => Some(&mut attrs.sizing),
            _ => None,
        }
    }

    pub(crate) fn tab_set_mut(&mut self) -> Option<&mut TabSetAttributes> {
        match &mut self.kind {
            NodeKind::TabSet(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub(crate) fn tab_mut(&mut self) -> Option<&mut TabAttributes> {
        match &mut self.kind {
            NodeKind::Tab(attrs) => Some(attrs),
            _ => None,
        }
    }
}
