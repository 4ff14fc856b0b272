//! flexdock - docking layout engine
//!
//! This crate maintains a tree of rows, tab sets and tabs, applies discrete
//! actions to it following the Elm Architecture pattern (one [`Action`] in,
//! one updated [`Model`] out) and recomputes pixel rectangles for every node
//! after each action.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{LayoutError, Result};
pub use messages::{Action, DockLocation};
pub use model::{
    LayoutListener, ListenerId, Model, Node, NodeEvent, NodeId, NodeKind, Orientation, Rect,
};
pub use update::layout::TabSetBands;
