//! # dotgraph
//!
//! Attributed digraph model, canonical DOT serialization, and Graphviz rendering.
//!
//! ## Features
//!
//! | Feature | Crate | Description |
//! |---------|-------|-------------|
//! | `graph` | [`dotgraph-graph`] | Graph model, DOT serializer, external renderer |
//!
//! `default = ["graph"]`.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! dotgraph = "0.1"
//! ```
//!
//! ```rust,no_run
//! use dotgraph::{Attributes, Graph, RenderOptions};
//!
//! let mut graph = Graph::new("tickets");
//! let a = graph.vertex("#1");
//! let b = graph.vertex("#2");
//! graph.connect(a, b, Attributes::new());
//!
//! let png = graph.render(&RenderOptions::new("dot", "png"));
//! std::fs::write("tickets.png", png).unwrap();
//! ```

#[cfg(feature = "graph")]
pub use dotgraph_graph as graph;

#[cfg(feature = "graph")]
pub use dotgraph_graph::{
    attrs, format_value, Arc, ArcId, AttrValue, Attributes, Element, Graph, GraphDescription,
    GraphError, RenderError, RenderOptions, RenderOutput, Vertex, VertexId,
};
