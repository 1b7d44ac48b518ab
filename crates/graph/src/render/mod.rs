//! Graph output.
//!
//! - DOT text serialization of the reachable graph
//! - Rendering through an external Graphviz-compatible tool

mod dot;
mod process;

pub use dot::ArcDisplay;
pub use process::{RenderOptions, RenderOutput};
