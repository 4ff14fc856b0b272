//! Model types for the layout engine
//!
//! The [`Model`] owns the node arena, the active tab set pointer, the viewport,
//! the id index and the listeners. All mutation goes through
//! [`Model::dispatch`]; everything else here is read access or arena plumbing
//! used by the update handlers.

pub mod attributes;
pub mod json;
pub mod node;
pub mod rect;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::{Map, Value};

pub use attributes::{
    AttributeMapper, AttributeRegistry, AttributeTarget, ModelAttributes, Sizing, TabAttributes,
    TabSetAttributes,
};
pub use json::{LayoutDocument, NodeDocument};
pub use node::{Node, NodeId, NodeKind, Orientation, RowData, SplitterData};
pub use rect::Rect;

use crate::config::EngineConfig;
use crate::error::{LayoutError, Result};
use crate::messages::Action;

// ============================================================================
// Listeners
// ============================================================================

/// Handle returned by [`Model::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Receives the model after every successful dispatch
pub trait LayoutListener {
    fn on_layout_change(&mut self, model: &Model);
}

impl<F: FnMut(&Model)> LayoutListener for F {
    fn on_layout_change(&mut self, model: &Model) {
        self(model)
    }
}

/// Something that happened to a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    /// A tab set was maximized or restored
    Maximize { maximized: bool },
    /// The node is about to be written into a document
    Save,
}

type NodeListener = Box<dyn FnMut(NodeEvent)>;

// ============================================================================
// Model
// ============================================================================

/// The layout model: a tree of rows, tab sets and tabs plus its geometry
pub struct Model {
    pub(crate) nodes: HashMap<NodeId, Node>,
    pub(crate) root: NodeId,
    /// Revalidated on read, hence the `Cell`
    pub(crate) active_tab_set: Cell<Option<NodeId>>,
    pub(crate) rect: Rect,
    pub(crate) id_index: HashMap<String, NodeId>,
    pub(crate) attributes: ModelAttributes,
    pub(crate) registry: AttributeRegistry,
    listeners: Vec<(ListenerId, Box<dyn LayoutListener>)>,
    /// Fired through `&self` while serializing, hence the `RefCell`
    node_listeners: RefCell<HashMap<NodeId, NodeListener>>,
    next_node_id: u64,
    next_listener_id: u64,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("active_tab_set", &self.active_tab_set.get())
            .field("rect", &self.rect)
            .field("listeners", &self.listeners.len())
            .field(
                "node_listeners",
                &self.node_listeners.try_borrow().map_or(0, |l| l.len()),
            )
            .finish()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// A model whose root row holds a single empty tab set
    pub fn new() -> Self {
        let mut model = Self::with_root(AttributeRegistry::new(), ModelAttributes::default());
        let root = model.root;
        let tab_set = model.alloc(None, NodeKind::TabSet(TabSetAttributes::default()));
        model.attach(root, tab_set, None);
        model
    }

    /// Like [`Model::new`], with the config's global attribute overrides applied
    pub fn with_config(config: &EngineConfig) -> Self {
        let mut model = Self::new();
        if let Err(e) = model.registry.global.update(&config.defaults, &mut model.attributes) {
            tracing::warn!("Ignoring configured attribute defaults: {}", e);
        }
        model
    }

    /// An empty root row, no other nodes
    pub(crate) fn with_root(registry: AttributeRegistry, attributes: ModelAttributes) -> Self {
        let mut model = Self {
            nodes: HashMap::new(),
            root: NodeId(0),
            active_tab_set: Cell::new(None),
            rect: Rect::default(),
            id_index: HashMap::new(),
            attributes,
            registry,
            listeners: Vec::new(),
            node_listeners: RefCell::new(HashMap::new()),
            next_node_id: 1,
            next_listener_id: 1,
        };
        model.root = model.alloc(None, NodeKind::Row(RowData::new(Sizing::default())));
        model
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Apply one action, lay out the tree and notify listeners.
    ///
    /// On error nothing has been changed and no listener is called.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        crate::update::update(self, action)
    }

    /// Replace the viewport and lay out again
    pub fn set_rect(&mut self, rect: Rect) -> Result<()> {
        self.dispatch(Action::set_rect(rect))
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[&self.root]
    }

    /// Look up a node that is currently part of the tree
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.contains(id).then(|| &self.nodes[&id])
    }

    /// Look up a node by its external id
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.id_index.get(id).and_then(|handle| self.node(*handle))
    }

    /// Whether `id` is reachable from the root
    pub fn contains(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(&current) else {
                return false;
            };
            match node.parent {
                Some(parent) => current = parent,
                None => return current == self.root,
            }
        }
    }

    /// Pre-order traversal passing each node and its depth. Splitters are
    /// visited right after the row child they follow.
    pub fn visit_nodes(&self, mut visitor: impl FnMut(&Node, usize)) {
        self.visit_from(self.root, 0, &mut visitor);
    }

    fn visit_from(&self, id: NodeId, depth: usize, visitor: &mut impl FnMut(&Node, usize)) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        visitor(node, depth);
        let splitters = node.as_row().map(|row| row.splitters.as_slice()).unwrap_or(&[]);
        for (i, child) in node.children.iter().enumerate() {
            self.visit_from(*child, depth + 1, visitor);
            if let Some(splitter) = splitters.get(i).and_then(|s| self.nodes.get(s)) {
                visitor(splitter, depth + 1);
            }
        }
    }

    /// The active tab set, reset to `None` if it has left the tree
    pub fn active_tab_set(&self) -> Option<NodeId> {
        let active = self
            .active_tab_set
            .get()
            .filter(|id| self.node(*id).is_some_and(Node::is_tab_set));
        self.active_tab_set.set(active);
        active
    }

    /// The tab set currently occupying the whole viewport, if any
    pub fn maximized_tab_set(&self) -> Option<NodeId> {
        let mut found = None;
        self.visit_nodes(|node, _| {
            if found.is_none() && node.as_tab_set().is_some_and(|attrs| attrs.maximized) {
                found = Some(node.handle);
            }
        });
        found
    }

    /// Current viewport
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Model-level attribute defaults
    pub fn attributes(&self) -> &ModelAttributes {
        &self.attributes
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn splitter_size(&self) -> f32 {
        self.attributes.splitter_size as f32
    }

    pub fn is_enable_edge_dock(&self) -> bool {
        self.attributes.enable_edge_dock
    }

    /// Number of tabs in the tree
    pub fn tab_count(&self) -> usize {
        let mut count = 0;
        self.visit_nodes(|node, _| {
            if node.is_tab() {
                count += 1;
            }
        });
        count
    }

    /// Nesting depth of a node, the root being 0
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.nodes.get(&parent)?;
        }
        Some(depth)
    }

    /// Axis a row stacks its children on
    pub fn orientation(&self, row: NodeId) -> Option<Orientation> {
        self.node(row)?.as_row()?;
        self.depth(row).map(Orientation::for_depth)
    }

    /// All attributes of a node keyed externally, unset ones resolved
    /// through the model defaults
    pub fn effective_attributes(&self, id: NodeId) -> Option<Map<String, Value>> {
        let node = self.node(id)?;
        let registry = &self.registry;
        let resolved = match &node.kind {
            NodeKind::Row(row) => {
                registry.row.resolve(&row.sizing, &self.attributes, &registry.global)
            }
            NodeKind::TabSet(attrs) => {
                registry.tab_set.resolve(attrs, &self.attributes, &registry.global)
            }
            NodeKind::Tab(attrs) => registry.tab.resolve(attrs, &self.attributes, &registry.global),
            NodeKind::Splitter(_) => Map::new(),
        };
        Some(resolved)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_listener(&mut self, listener: impl LayoutListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; unknown ids are ignored
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Route events of one node to `listener`, replacing any previous one.
    ///
    /// The listener lives as long as the node stays in the arena, so it follows
    /// the node through moves.
    pub fn set_node_listener(
        &mut self,
        node: NodeId,
        listener: impl FnMut(NodeEvent) + 'static,
    ) -> Result<()> {
        self.get(node)?;
        self.node_listeners.get_mut().insert(node, Box::new(listener));
        Ok(())
    }

    pub fn remove_node_listener(&mut self, node: NodeId) {
        self.node_listeners.get_mut().remove(&node);
    }

    pub(crate) fn fire_node_event(&self, node: NodeId, event: NodeEvent) {
        let Ok(mut listeners) = self.node_listeners.try_borrow_mut() else {
            tracing::warn!(node = %node, ?event, "node event raised from a node listener, dropped");
            return;
        };
        if let Some(listener) = listeners.get_mut(&node) {
            listener(event);
        }
    }

    pub(crate) fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener.on_layout_change(self);
        }
        self.listeners = listeners;
    }

    // =========================================================================
    // Lookup helpers for update handlers
    // =========================================================================

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(LayoutError::InvalidReference(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn tab_set_attrs(&self, id: NodeId) -> Result<&TabSetAttributes> {
        self.get(id)?
            .as_tab_set()
            .ok_or_else(|| LayoutError::invalid_action(format!("{} is not a tab set", id)))
    }

    pub(crate) fn tab_attrs(&self, id: NodeId) -> Result<&TabAttributes> {
        self.get(id)?
            .as_tab()
            .ok_or_else(|| LayoutError::invalid_action(format!("{} is not a tab", id)))
    }

    pub(crate) fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub(crate) fn position(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes.get(&id)?.parent?;
        self.nodes.get(&parent)?.children.iter().position(|c| *c == id)
    }

    pub(crate) fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(&parent).and_then(|n| n.parent);
        }
        false
    }

    pub(crate) fn id_in_use(&self, id: &str) -> bool {
        self.node_by_id(id).is_some()
    }

    // =========================================================================
    // Arena plumbing
    // =========================================================================

    /// Create a detached node, registering its external id
    pub(crate) fn alloc(&mut self, id: Option<String>, kind: NodeKind) -> NodeId {
        let handle = NodeId(self.next_node_id);
        self.next_node_id += 1;
        if let Some(ref external) = id {
            self.id_index.insert(external.clone(), handle);
        }
        self.nodes.insert(handle, Node::new(handle, id, kind));
        handle
    }

    /// Insert `child` into `parent`'s children at `index` (append when `None`)
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return;
        };
        let index = index
            .unwrap_or(parent_node.children.len())
            .min(parent_node.children.len());
        parent_node.children.insert(index, child);
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
    }

    /// Remove `child` from its parent, keeping the parent's selection valid.
    /// Returns the former parent and position.
    pub(crate) fn detach(&mut self, child: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.nodes.get_mut(&child)?.parent.take()?;
        let parent_node = self.nodes.get_mut(&parent)?;
        let pos = parent_node.children.iter().position(|c| *c == child)?;
        parent_node.children.remove(pos);
        let len = parent_node.children.len();
        if let Some(attrs) = parent_node.tab_set_mut() {
            if let Some(selected) = attrs.selected {
                if pos < selected {
                    attrs.selected = Some(selected - 1);
                }
            }
            attrs.normalize_selected(len);
        }
        Some((parent, pos))
    }

    /// Drop a node, its descendants and its splitters from the arena
    pub(crate) fn remove_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        self.node_listeners.get_mut().remove(&id);
        if let Some(ref external) = node.id {
            if self.id_index.get(external) == Some(&id) {
                self.id_index.remove(external);
            }
        }
        if let NodeKind::Row(row) = &node.kind {
            for splitter in &row.splitters {
                self.nodes.remove(splitter);
            }
        }
        for child in node.children {
            self.remove_subtree(child);
        }
    }

    pub(crate) fn set_active(&self, id: Option<NodeId>) {
        self.active_tab_set.set(id);
    }
}

// ============================================================================
// Debug Invariant Validation
// ============================================================================

impl Model {
    /// Validate tree invariants in debug builds.
    ///
    /// Checks parent/child links, child variants, selection bounds, the single
    /// maximized tab set and the id index. Panics if any invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let mut maximized = 0;
        self.visit_nodes(|node, _| {
            for child in &node.children {
                let child_node = &self.nodes[child];
                assert_eq!(
                    child_node.parent,
                    Some(node.handle),
                    "{} lists {} as child but its parent is {:?}",
                    node.handle,
                    child,
                    child_node.parent
                );
                let allowed = match node.kind {
                    NodeKind::Row(_) => child_node.is_row() || child_node.is_tab_set(),
                    NodeKind::TabSet(_) => child_node.is_tab(),
                    _ => false,
                };
                assert!(allowed, "{} cannot contain {}", node.node_type(), child_node.node_type());
            }
            if let Some(attrs) = node.as_tab_set() {
                match attrs.selected {
                    None => assert!(
                        node.children.is_empty(),
                        "{} has tabs but no selection",
                        node.handle
                    ),
                    Some(i) => assert!(
                        i < node.children.len(),
                        "{} selects {} of {} tabs",
                        node.handle,
                        i,
                        node.children.len()
                    ),
                }
                if attrs.maximized {
                    maximized += 1;
                }
            }
        });
        assert!(maximized <= 1, "{} tab sets are maximized", maximized);
        for (external, handle) in &self.id_index {
            if let Some(node) = self.nodes.get(handle) {
                assert_eq!(node.id.as_deref(), Some(external.as_str()));
            }
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

// ============================================================================
// Tree dump
// ============================================================================

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = Vec::new();
        self.visit_nodes(|node, depth| {
            let indent = "  ".repeat(depth);
            let detail = match &node.kind {
                NodeKind::Row(row) => format!("{:?} weight={}", row.orientation, row.sizing.weight),
                NodeKind::TabSet(attrs) => format!(
                    "weight={} selected={:?}{}",
                    attrs.sizing.weight,
                    attrs.selected,
                    if attrs.maximized { " maximized" } else { "" }
                ),
                NodeKind::Tab(attrs) => format!("name={:?}", attrs.name),
                NodeKind::Splitter(splitter) => format!("{:?}", splitter.orientation),
            };
            lines.push(format!(
                "{}{} {} {} {}",
                indent,
                node.node_type(),
                node.id(),
                detail,
                node.rect
            ));
        });
        write!(f, "{}", lines.join("\n"))
    }
}
