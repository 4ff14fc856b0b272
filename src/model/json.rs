//! Layout document (de)serialization
//!
//! A document has two sections: `global` holds model-level attribute keys and
//! `layout` mirrors the row/tab set/tab tree. Unknown keys and misplaced nodes
//! are skipped with a warning, missing keys take their defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::attributes::{
    AttributeRegistry, ModelAttributes, Sizing, TabAttributes, TabSetAttributes,
};
use super::node::{NodeId, NodeKind, RowData};
use super::{Model, NodeEvent};
use crate::error::{LayoutError, Result};

/// Top-level persisted document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default)]
    pub global: Map<String, Value>,
    pub layout: NodeDocument,
}

/// One node of the persisted tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,
}

impl From<NodeDocument> for Value {
    fn from(doc: NodeDocument) -> Self {
        let mut map = doc.attributes;
        map.insert("type".to_string(), Value::String(doc.node_type));
        if let Some(id) = doc.id {
            map.insert("id".to_string(), Value::String(id));
        }
        if !doc.children.is_empty() {
            let children = doc.children.into_iter().map(Value::from).collect();
            map.insert("children".to_string(), Value::Array(children));
        }
        Value::Object(map)
    }
}

impl From<LayoutDocument> for Value {
    fn from(doc: LayoutDocument) -> Self {
        let mut map = Map::new();
        map.insert("global".to_string(), Value::Object(doc.global));
        map.insert("layout".to_string(), doc.layout.into());
        Value::Object(map)
    }
}

impl Model {
    /// Build a model from a document value
    pub fn from_json(json: &Value) -> Result<Model> {
        let doc: LayoutDocument = serde_json::from_value(json.clone())?;
        Self::from_document(&doc)
    }

    pub fn from_json_str(json: &str) -> Result<Model> {
        let doc: LayoutDocument = serde_json::from_str(json)?;
        Self::from_document(&doc)
    }

    pub fn from_document(doc: &LayoutDocument) -> Result<Model> {
        let registry = AttributeRegistry::new();
        let mut attributes = ModelAttributes::default();
        registry.global.from_json(&doc.global, &mut attributes);

        let mut model = Model::with_root(registry, attributes);
        let root = model.root;

        if doc.layout.node_type == "row" {
            if let Some(ref id) = doc.layout.id {
                model.claim_id(id)?;
                model.assign_id(root, id.clone());
            }
            let mut sizing = Sizing::default();
            model.registry.row.from_json(&doc.layout.attributes, &mut sizing);
            if let Some(node) = model.node_mut(root) {
                node.kind = NodeKind::Row(RowData::new(sizing));
            }
            model.load_children(root, &doc.layout.children)?;
        } else {
            tracing::warn!(
                node_type = %doc.layout.node_type,
                "layout root is not a row, wrapping it"
            );
            model.load_children(root, std::slice::from_ref(&doc.layout))?;
        }

        Ok(model)
    }

    fn claim_id(&self, id: &str) -> Result<()> {
        if self.id_index.contains_key(id) {
            return Err(LayoutError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    fn assign_id(&mut self, handle: NodeId, id: String) {
        self.id_index.insert(id.clone(), handle);
        if let Some(node) = self.node_mut(handle) {
            node.id = Some(id);
        }
    }

    fn load_children(&mut self, parent: NodeId, docs: &[NodeDocument]) -> Result<()> {
        let parent_is_row = self.nodes.get(&parent).is_some_and(|n| n.is_row());

        for doc in docs {
            let kind = match (parent_is_row, doc.node_type.as_str()) {
                (true, "row") => {
                    let mut sizing = Sizing::default();
                    self.registry.row.from_json(&doc.attributes, &mut sizing);
                    NodeKind::Row(RowData::new(sizing))
                }
                (true, "tabset") => {
                    let mut attrs = TabSetAttributes::default();
                    self.registry.tab_set.from_json(&doc.attributes, &mut attrs);
                    if attrs.maximized && self.maximized_tab_set().is_some() {
                        tracing::warn!("more than one maximized tab set, clearing the later one");
                        attrs.maximized = false;
                    }
                    NodeKind::TabSet(attrs)
                }
                (false, "tab") => {
                    let mut attrs = TabAttributes::default();
                    self.registry.tab.from_json(&doc.attributes, &mut attrs);
                    NodeKind::Tab(attrs)
                }
                (_, other) => {
                    tracing::warn!(node_type = %other, "skipping node not allowed here");
                    continue;
                }
            };

            if let Some(ref id) = doc.id {
                self.claim_id(id)?;
            }
            let handle = self.alloc(doc.id.clone(), kind);
            self.attach(parent, handle, None);

            match doc.node_type.as_str() {
                "tab" if !doc.children.is_empty() => {
                    tracing::warn!("ignoring children of a tab");
                }
                "tab" => {}
                _ => self.load_children(handle, &doc.children)?,
            }

            let len = self.children_of(handle).len();
            if let Some(attrs) = self.node_mut(handle).and_then(|n| n.tab_set_mut()) {
                attrs.normalize_selected(len);
            }
        }
        Ok(())
    }

    /// Snapshot of the tree as a typed document
    ///
    /// Every node with a listener gets [`NodeEvent::Save`] first.
    pub fn to_document(&self) -> LayoutDocument {
        let mut nodes = Vec::new();
        self.visit_nodes(|node, _| nodes.push(node.handle()));
        for node in nodes {
            self.fire_node_event(node, NodeEvent::Save);
        }

        let mut global = Map::new();
        self.registry.global.to_json(&self.attributes, &mut global);
        LayoutDocument {
            global,
            layout: self.node_document(self.root),
        }
    }

    fn node_document(&self, id: NodeId) -> NodeDocument {
        let Some(node) = self.nodes.get(&id) else {
            return NodeDocument::default();
        };
        let mut attributes = Map::new();
        match &node.kind {
            NodeKind::Row(row) => self.registry.row.to_json(&row.sizing, &mut attributes),
            NodeKind::TabSet(attrs) => self.registry.tab_set.to_json(attrs, &mut attributes),
            NodeKind::Tab(attrs) => self.registry.tab.to_json(attrs, &mut attributes),
            NodeKind::Splitter(_) => {}
        }
        NodeDocument {
            node_type: node.node_type().to_string(),
            id: node.id.clone(),
            attributes,
            children: node
                .children
                .iter()
                .map(|child| self.node_document(*child))
                .collect(),
        }
    }

    /// Snapshot of the tree that [`Model::from_json`] restores
    pub fn to_json(&self) -> Value {
        self.to_document().into()
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }

    /// Build a detached-ready tab from its JSON description without touching the tree
    pub(crate) fn tab_from_json(&self, json: &Value) -> Result<(Option<String>, TabAttributes)> {
        let map = json
            .as_object()
            .ok_or_else(|| LayoutError::invalid_action("tab description must be an object"))?;
        if let Some(kind) = map.get("type").and_then(Value::as_str) {
            if kind != "tab" {
                return Err(LayoutError::invalid_action(format!(
                    "only tabs can be added, got '{}'",
                    kind
                )));
            }
        }
        let id = match map.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(other) => {
                return Err(LayoutError::invalid_attribute(
                    "id",
                    format!("expected a string, got {}", other),
                ))
            }
        };
        if let Some(ref id) = id {
            if self.id_in_use(id) {
                return Err(LayoutError::DuplicateId(id.clone()));
            }
        }
        let mut attrs = TabAttributes::default();
        self.registry.tab.update(map, &mut attrs)?;
        Ok((id, attrs))
    }
}
