//! Action types for the dispatch loop
//!
//! An [`Action`] describes exactly one tree mutation. Actions are plain values:
//! build them with the constructors below and hand them to
//! [`Model::dispatch`](crate::model::Model::dispatch).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{NodeId, Orientation, Rect};

/// Where a dragged node lands relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockLocation {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl DockLocation {
    /// Axis a row needs to place the dropped node beside the target, `None` for center
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            DockLocation::Left | DockLocation::Right => Some(Orientation::Horizontal),
            DockLocation::Top | DockLocation::Bottom => Some(Orientation::Vertical),
            DockLocation::Center => None,
        }
    }

    /// Whether the dropped node goes before the target
    pub fn is_leading(self) -> bool {
        matches!(self, DockLocation::Left | DockLocation::Top)
    }
}

/// A single tree mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Create a tab from its JSON description and dock it at the target
    AddNode {
        json: Value,
        to_node: NodeId,
        location: DockLocation,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Detach a tab or tab set and dock it at the target
    MoveNode {
        from_node: NodeId,
        to_node: NodeId,
        location: DockLocation,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Remove a tab, collapsing emptied containers
    DeleteTab { node: NodeId },

    /// Change a tab's display name
    RenameTab { node: NodeId, text: String },

    /// Make a tab the visible one in its tab set and activate the tab set
    SelectTab { tab_node: NodeId },

    /// Set or clear the active tab set
    SetActiveTabset {
        #[serde(default)]
        tabset_node: Option<NodeId>,
    },

    /// Replace the viewport rectangle
    SetRect { rect: Rect },

    /// Move a splitter by `delta` pixels along its row's axis
    AdjustSplit { node: NodeId, delta: f32 },

    /// Toggle the maximized state of a tab set
    MaximizeToggle { node: NodeId },

    /// Apply global attribute keys to the model
    UpdateModelAttributes { json: Map<String, Value> },

    /// Apply attribute keys to one node
    UpdateNodeAttributes {
        node: NodeId,
        json: Map<String, Value>,
    },
}

// Convenience constructors, one per action kind
impl Action {
    /// Add a new tab described by `json`; `index: None` appends
    pub fn add_node(
        json: Value,
        to_node: NodeId,
        location: DockLocation,
        index: Option<usize>,
    ) -> Self {
        Action::AddNode {
            json,
            to_node,
            location,
            index,
        }
    }

    pub fn move_node(
        from_node: NodeId,
        to_node: NodeId,
        location: DockLocation,
        index: Option<usize>,
    ) -> Self {
        Action::MoveNode {
            from_node,
            to_node,
            location,
            index,
        }
    }

    pub fn delete_tab(node: NodeId) -> Self {
        Action::DeleteTab { node }
    }

    pub fn rename_tab(node: NodeId, text: impl Into<String>) -> Self {
        Action::RenameTab {
            node,
            text: text.into(),
        }
    }

    pub fn select_tab(tab_node: NodeId) -> Self {
        Action::SelectTab { tab_node }
    }

    pub fn set_active_tab_set(tabset_node: Option<NodeId>) -> Self {
        Action::SetActiveTabset { tabset_node }
    }

    pub fn set_rect(rect: Rect) -> Self {
        Action::SetRect { rect }
    }

    pub fn adjust_split(splitter: NodeId, delta: f32) -> Self {
        Action::AdjustSplit {
            node: splitter,
            delta,
        }
    }

    pub fn maximize_toggle(node: NodeId) -> Self {
        Action::MaximizeToggle { node }
    }

    pub fn update_model_attributes(json: Map<String, Value>) -> Self {
        Action::UpdateModelAttributes { json }
    }

    pub fn update_node_attributes(node: NodeId, json: Map<String, Value>) -> Self {
        Action::UpdateNodeAttributes { node, json }
    }

    /// Action kind as used in serialized scripts
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddNode { .. } => "ADD_NODE",
            Action::MoveNode { .. } => "MOVE_NODE",
            Action::DeleteTab { .. } => "DELETE_TAB",
            Action::RenameTab { .. } => "RENAME_TAB",
            Action::SelectTab { .. } => "SELECT_TAB",
            Action::SetActiveTabset { .. } => "SET_ACTIVE_TABSET",
            Action::SetRect { .. } => "SET_RECT",
            Action::AdjustSplit { .. } => "ADJUST_SPLIT",
            Action::MaximizeToggle { .. } => "MAXIMIZE_TOGGLE",
            Action::UpdateModelAttributes { .. } => "UPDATE_MODEL_ATTRIBUTES",
            Action::UpdateNodeAttributes { .. } => "UPDATE_NODE_ATTRIBUTES",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actions_deserialize_from_script_form() {
        let action: Action = serde_json::from_value(json!({
            "type": "MOVE_NODE",
            "from_node": 4,
            "to_node": 2,
            "location": "left"
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::move_node(NodeId(4), NodeId(2), DockLocation::Left, None)
        );
        assert_eq!(action.name(), "MOVE_NODE");
    }

    #[test]
    fn test_serialized_tag_matches_name() {
        let action = Action::set_active_tab_set(None);
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], json!(action.name()));
    }

    #[test]
    fn test_dock_location_axis() {
        assert_eq!(DockLocation::Left.orientation(), Some(Orientation::Horizontal));
        assert_eq!(DockLocation::Bottom.orientation(), Some(Orientation::Vertical));
        assert_eq!(DockLocation::Center.orientation(), None);
        assert!(DockLocation::Top.is_leading());
        assert!(!DockLocation::Right.is_leading());
    }
}
