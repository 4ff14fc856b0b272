//! Update functions for the dispatch loop
//!
//! All tree mutations flow through [`update`]: validate, mutate, lay out, notify.

pub mod dock;
pub mod layout;
pub mod tree;

use crate::error::Result;
use crate::messages::Action;
use crate::model::Model;

#[cfg(debug_assertions)]
use crate::tracing::LayoutSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use dock::{add_node, move_node};
pub use layout::layout;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut Model, action: Action) -> Result<()> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, action)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, action)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut Model, action: Action) -> Result<()> {
    match action {
        Action::AddNode {
            json,
            to_node,
            location,
            index,
        } => dock::add_node(model, &json, to_node, location, index)?,
        Action::MoveNode {
            from_node,
            to_node,
            location,
            index,
        } => dock::move_node(model, from_node, to_node, location, index)?,
        Action::DeleteTab { node } => tree::delete_tab(model, node)?,
        Action::RenameTab { node, text } => tree::rename_tab(model, node, text)?,
        Action::SelectTab { tab_node } => tree::select_tab(model, tab_node)?,
        Action::SetActiveTabset { tabset_node } => tree::set_active_tab_set(model, tabset_node)?,
        Action::SetRect { rect } => tree::set_rect(model, rect)?,
        Action::AdjustSplit { node, delta } => tree::adjust_split(model, node, delta)?,
        Action::MaximizeToggle { node } => tree::maximize_toggle(model, node)?,
        Action::UpdateModelAttributes { json } => tree::update_model_attributes(model, &json)?,
        Action::UpdateNodeAttributes { node, json } => {
            tree::update_node_attributes(model, node, &json)?
        }
    }

    layout::layout(model);
    model.notify();
    Ok(())
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after tree state, logs diffs and checks invariants.
#[cfg(debug_assertions)]
fn update_traced(model: &mut Model, action: Action) -> Result<()> {
    let action_name = action.name();
    let _span = span!(Level::DEBUG, "dispatch", action = %action_name).entered();

    let before = LayoutSnapshot::from_model(model);
    debug!(target: "action", action = %action_name, "processing");

    let result = update_inner(model, action);

    match &result {
        Ok(()) => {
            let after = LayoutSnapshot::from_model(model);
            if let Some(diff) = before.diff(&after) {
                debug!(target: "tree", %diff, "state changed");
            }
        }
        Err(e) => debug!(target: "action", action = %action_name, error = %e, "rejected"),
    }

    model.assert_invariants();
    result
}
