//! Error types for graph editing, rendering and description loading.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while editing a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No vertex is registered under the name
    #[error("Vertex not found: {name}")]
    VertexNotFound { name: String },
}

/// Errors raised while driving the external renderer.
///
/// Only [`Graph::try_render`](crate::Graph::try_render) returns these;
/// [`Graph::render`](crate::Graph::render) logs them instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The tool could not be started
    #[error("Failed to start renderer '{}': {source}", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or waiting on the running tool failed
    #[error("I/O error talking to '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool did not exit before the deadline and was killed
    #[error("Renderer '{command}' timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

/// Errors raised while loading a JSON graph description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("Invalid graph description: {0}")]
    Json(#[from] serde_json::Error),
}
