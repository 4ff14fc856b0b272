//! Tracing setup and dispatch diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=action=debug,tree=debug` - dispatch and tree diffs only
//! - `RUST_LOG=flexdock::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/flexdock/logs/flexdock.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{Model, NodeId};

/// Initialize tracing subscriber with console and file logging
///
/// `default_level` is used for the console when RUST_LOG is unset.
/// The file layer always logs at debug level.
pub fn init(default_level: &str) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Console layer goes to stderr so command output stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "flexdock.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of tree state for diffing around a dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub node_count: usize,
    pub tab_count: usize,
    pub active: Option<NodeId>,
    pub maximized: Option<NodeId>,
    pub selections: Vec<(NodeId, Option<usize>)>,
}

impl LayoutSnapshot {
    pub fn from_model(model: &Model) -> Self {
        let mut node_count = 0;
        let mut tab_count = 0;
        let mut selections = Vec::new();
        model.visit_nodes(|node, _| {
            node_count += 1;
            if node.is_tab() {
                tab_count += 1;
            }
            if let Some(attrs) = node.as_tab_set() {
                selections.push((node.handle(), attrs.selected));
            }
        });
        Self {
            node_count,
            tab_count,
            active: model.active_tab_set(),
            maximized: model.maximized_tab_set(),
            selections,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.node_count != other.node_count {
            changes.push(format!("nodes: {} → {}", self.node_count, other.node_count));
        }
        if self.tab_count != other.tab_count {
            changes.push(format!("tabs: {} → {}", self.tab_count, other.tab_count));
        }
        if self.active != other.active {
            changes.push(format!(
                "active: {} → {}",
                describe(self.active),
                describe(other.active)
            ));
        }
        if self.maximized != other.maximized {
            changes.push(format!(
                "maximized: {} → {}",
                describe(self.maximized),
                describe(other.maximized)
            ));
        }
        for (id, after) in &other.selections {
            let before = self
                .selections
                .iter()
                .find(|(b, _)| b == id)
                .map(|(_, s)| *s);
            if let Some(before) = before {
                if before != *after {
                    changes.push(format!("{} selected: {:?} → {:?}", id, before, after));
                }
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe(id: Option<NodeId>) -> String {
    id.map_or_else(|| "none".to_string(), |id| id.to_string())
}
