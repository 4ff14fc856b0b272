//! Command-line argument parsing for the flexdock tool
//!
//! Supports:
//! - Printing the laid-out tree of a document
//! - Normalizing a document
//! - Applying a list of actions to a document
//! - Printing a fresh default document

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::Rect;

/// Inspect and drive docking layouts from the command line
#[derive(Parser, Debug)]
#[command(name = "flexdock", version, about = "Inspect and drive docking layouts")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/flexdock/config.yaml
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a document and print the node tree with rectangles
    Tree {
        /// Layout document (JSON)
        layout: PathBuf,

        #[command(flatten)]
        viewport: ViewportArgs,
    },

    /// Load a document and print it back with defaults stripped
    Normalize {
        /// Layout document (JSON)
        layout: PathBuf,
    },

    /// Dispatch a JSON list of actions against a document and print the result
    Apply {
        /// Layout document (JSON)
        layout: PathBuf,

        /// JSON array of actions, e.g. `[{"type": "SELECT_TAB", "tab_node": 3}]`
        actions: PathBuf,

        #[command(flatten)]
        viewport: ViewportArgs,

        /// Print the laid-out tree instead of the document
        #[arg(long)]
        tree: bool,
    },

    /// Print a new document: one empty tab set, configured defaults applied
    New,
}

/// Viewport the layout pass runs against
#[derive(Args, Debug, Clone, Copy)]
pub struct ViewportArgs {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,
}

impl ViewportArgs {
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
