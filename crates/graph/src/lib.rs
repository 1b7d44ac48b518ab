//! # dotgraph-graph
//!
//! An attributed directed graph that serializes to canonical Graphviz DOT text
//! and can be piped through an external layout tool to produce an image.
//!
//! ## Features
//!
//! - **Attributed elements**: vertices, arcs and the graph itself carry ordered attributes
//! - **Name registry**: lookup-or-create access to vertices by name
//! - **Reachability**: serialization walks from the top-level objects and emits every
//!   reachable vertex and arc exactly once, in first-discovery order
//! - **Rendering**: runs `<tool> -T<format>` with the DOT text on stdin
//!
//! ## Example
//!
//! ```
//! use dotgraph_graph::{attrs, Graph};
//!
//! let mut graph = Graph::new("g");
//! let a = graph.vertex("A");
//! let b = graph.vertex("B");
//! graph[a].set("label", "start");
//! graph[b].set("label", "end");
//! let arc = graph.add_arc(a, b, attrs([("style", "dashed")]));
//! graph.register(arc);
//!
//! assert_eq!(
//!     graph.serialize(),
//!     "digraph \"g\" {\n\t\"A\" [label=\"start\"];\n\t\"B\" [label=\"end\"];\n\t\"A\" -> \"B\" [style=\"dashed\"];\n}"
//! );
//! ```

mod arc;
mod attributes;
pub mod description;
mod error;
pub mod render;
mod traversal;
mod vertex;

pub use arc::{Arc, ArcId, RESERVED_ARC_KEYS};
pub use attributes::{attrs, format_value, AttrValue, Attributes};
pub use description::{ArcDescription, GraphDescription, VertexDescription};
pub use error::{DescriptionError, GraphError, RenderError};
pub use render::{ArcDisplay, RenderOptions, RenderOutput};
pub use traversal::Reachable;
pub use vertex::{Vertex, VertexId};

use petgraph::graph::DiGraph;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// Anything that can be registered as a top-level object of a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Vertex(VertexId),
    Arc(ArcId),
}

impl From<VertexId> for Element {
    fn from(id: VertexId) -> Self {
        Element::Vertex(id)
    }
}

impl From<ArcId> for Element {
    fn from(id: ArcId) -> Self {
        Element::Arc(id)
    }
}

/// A named directed graph of attributed vertices and arcs.
///
/// Every vertex and arc lives in the graph's storage and is addressed by a
/// [`VertexId`] or [`ArcId`]. Only registered (top-level) objects are
/// traversal roots; anything reachable from them is emitted as well.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,

    /// Storage for every vertex and arc ever created on this graph
    graph: DiGraph<Vertex, Arc>,

    /// Top-level vertices in registration order
    vertices: Vec<VertexId>,

    /// Registered vertices by name
    registry: HashMap<String, VertexId>,

    /// Top-level arcs in registration order
    arcs: Vec<ArcId>,

    /// Graph-level attributes, emitted before any vertex
    attributes: Attributes,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: DiGraph::new(),
            vertices: Vec::new(),
            registry: HashMap::new(),
            arcs: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// The graph name used in the `digraph` header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Graph-level attributes, in insertion order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the graph-level attribute map.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Look up a graph-level attribute.
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Set a graph-level attribute, returning the previous value.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Create a vertex without registering it.
    ///
    /// The vertex is only emitted if it is later registered or becomes
    /// reachable through an arc.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> VertexId {
        VertexId(self.graph.add_node(Vertex::new(name)))
    }

    /// Create an arc without registering it or attaching it to its endpoints.
    ///
    /// # Panics
    ///
    /// Panics if either handle does not belong to this graph.
    pub fn add_arc(&mut self, source: VertexId, dest: VertexId, attributes: Attributes) -> ArcId {
        let arc = Arc::new(source, dest, attributes);
        ArcId(self.graph.add_edge(source.0, dest.0, arc))
    }

    /// Create an arc `from -> to` and append it to both endpoints' incident arcs.
    ///
    /// The arc is not registered as top-level; it is reached through its endpoints.
    ///
    /// # Panics
    ///
    /// Panics if either handle does not belong to this graph.
    pub fn connect(&mut self, from: VertexId, to: VertexId, attributes: Attributes) -> ArcId {
        let id = self.add_arc(from, to, attributes);
        self.graph[from.0].arcs.push(id);
        self.graph[to.0].arcs.push(id);
        id
    }

    /// Register a vertex or arc as a top-level object.
    ///
    /// A vertex is appended to the top-level list and indexed by name; a vertex
    /// registered under a name already taken replaces the previous one. An arc
    /// is appended to the top-level arc list. Removed vertices, handles that
    /// are already registered, and handles whose index is past the end of this
    /// graph's storage are ignored.
    ///
    /// Handles are plain indices, so a handle taken from another `Graph` whose
    /// index happens to be in range is not detected and registers whichever
    /// vertex or arc sits at that index here.
    pub fn register(&mut self, element: impl Into<Element>) {
        match element.into() {
            Element::Vertex(id) => {
                let Some(vertex) = self.graph.node_weight(id.0) else {
                    return;
                };
                if vertex.removed {
                    return;
                }
                let name = vertex.name().to_string();
                match self.registry.insert(name, id) {
                    Some(previous) if previous == id => {}
                    Some(previous) => {
                        self.vertices.retain(|v| *v != previous);
                        self.vertices.push(id);
                    }
                    None => self.vertices.push(id),
                }
            }
            Element::Arc(id) => {
                if self.graph.edge_weight(id.0).is_some() && !self.arcs.contains(&id) {
                    self.arcs.push(id);
                }
            }
        }
    }

    /// Get the registered vertex called `name`, creating and registering it if needed.
    pub fn vertex(&mut self, name: &str) -> VertexId {
        if let Some(id) = self.find(name) {
            return id;
        }
        let id = self.add_vertex(name);
        self.register(id);
        id
    }

    /// Unregister the vertex called `name`.
    ///
    /// The vertex is tombstoned: it stays in storage so existing handles remain
    /// valid, but it and every arc touching it are skipped by serialization.
    pub fn remove(&mut self, name: &str) -> Result<VertexId, GraphError> {
        let id = self
            .registry
            .remove(name)
            .ok_or_else(|| GraphError::VertexNotFound {
                name: name.to_string(),
            })?;
        self.vertices.retain(|v| *v != id);
        self.graph[id.0].removed = true;
        Ok(id)
    }

    /// Look up a registered vertex by name.
    pub fn find(&self, name: &str) -> Option<VertexId> {
        self.registry.get(name).copied()
    }

    /// Check whether a vertex is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Top-level vertices in registration order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Top-level arcs in registration order.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// Get a vertex by handle.
    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.graph.node_weight(id.0)
    }

    /// Get a vertex mutably by handle.
    pub fn get_vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.graph.node_weight_mut(id.0)
    }

    /// Get an arc by handle.
    pub fn get_arc(&self, id: ArcId) -> Option<&Arc> {
        self.graph.edge_weight(id.0)
    }

    /// Get an arc mutably by handle.
    pub fn get_arc_mut(&mut self, id: ArcId) -> Option<&mut Arc> {
        self.graph.edge_weight_mut(id.0)
    }

    /// Number of vertices in storage, registered or not.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of arcs in storage, registered or not.
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Index<VertexId> for Graph {
    type Output = Vertex;

    fn index(&self, id: VertexId) -> &Vertex {
        &self.graph[id.0]
    }
}

impl IndexMut<VertexId> for Graph {
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.graph[id.0]
    }
}

impl Index<ArcId> for Graph {
    type Output = Arc;

    fn index(&self, id: ArcId) -> &Arc {
        &self.graph[id.0]
    }
}

impl IndexMut<ArcId> for Graph {
    fn index_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.graph[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_lookup_is_idempotent() {
        let mut graph = Graph::new("g");
        let first = graph.vertex("A");
        let second = graph.vertex("A");

        assert_eq!(first, second);
        assert_eq!(graph.vertices(), &[first]);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_same_name_distinct_vertices() {
        let mut graph = Graph::new("g");
        let a1 = graph.add_vertex("A");
        let a2 = graph.add_vertex("A");

        assert_ne!(a1, a2);
        assert!(!graph.contains("A"));
        assert!(graph.vertices().is_empty());
    }

    #[test]
    fn test_remove_unregistered_name() {
        let mut graph = Graph::new("g");
        graph.vertex("A");

        assert_eq!(
            graph.remove("missing"),
            Err(GraphError::VertexNotFound {
                name: "missing".to_string()
            })
        );
        assert_eq!(graph.vertices().len(), 1);
    }

    #[test]
    fn test_remove_registered_name() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let b = graph.vertex("B");

        assert_eq!(graph.remove("A"), Ok(a));
        assert!(!graph.contains("A"));
        assert_eq!(graph.find("A"), None);
        assert_eq!(graph.vertices(), &[b]);
        assert!(graph[a].is_removed());

        // A fresh vertex takes the name over
        let a2 = graph.vertex("A");
        assert_ne!(a, a2);
        assert_eq!(graph.vertices(), &[b, a2]);
    }

    #[test]
    fn test_connect_appends_to_both_endpoints() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let b = graph.vertex("B");

        let arc = graph.connect(a, b, Attributes::new());

        assert_eq!(graph[a].incident_arcs(), &[arc]);
        assert_eq!(graph[b].incident_arcs(), &[arc]);
        assert_eq!(graph[arc].source(), a);
        assert_eq!(graph[arc].dest(), b);
        assert!(graph.arcs().is_empty());
    }

    #[test]
    fn test_connect_incoming_direction() {
        let mut graph = Graph::new("g");
        let me = graph.vertex("me");
        let us = graph.add_vertex("us");

        // "me has an incoming arc from us"
        let arc = graph.connect(us, me, attrs([("color", "blue")]));

        assert_eq!(graph[arc].source(), us);
        assert_eq!(graph[arc].dest(), me);
        assert_eq!(graph[me].incident_arcs(), &[arc]);
        assert_eq!(graph[us].incident_arcs(), &[arc]);
    }

    #[test]
    fn test_add_arc_is_detached() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let b = graph.vertex("B");

        let arc = graph.add_arc(a, b, Attributes::new());

        assert!(graph[a].incident_arcs().is_empty());
        assert!(graph[b].incident_arcs().is_empty());
        assert!(graph.arcs().is_empty());

        graph.register(arc);
        graph.register(arc);
        assert_eq!(graph.arcs(), &[arc]);
    }

    #[test]
    fn test_register_keeps_list_and_registry_in_step() {
        let mut graph = Graph::new("g");
        let a1 = graph.add_vertex("A");
        let b = graph.add_vertex("B");
        let a2 = graph.add_vertex("A");

        graph.register(a1);
        graph.register(b);
        graph.register(a1);
        assert_eq!(graph.vertices(), &[a1, b]);

        graph.register(a2);
        assert_eq!(graph.vertices(), &[b, a2]);
        assert_eq!(graph.find("A"), Some(a2));
    }

    #[test]
    fn test_register_ignores_removed_and_out_of_range_handles() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        graph.remove("A").unwrap();
        graph.register(a);
        assert!(graph.vertices().is_empty());

        let mut other = Graph::new("other");
        other.vertex("x");
        other.vertex("y");
        let out_of_range = other.vertex("z");
        graph.register(out_of_range);
        assert!(graph.vertices().is_empty());
    }

    #[test]
    fn test_graph_attributes() {
        let mut graph = Graph::new("deps");
        assert_eq!(graph.name(), "deps");
        assert_eq!(graph.set_attribute("rankdir", "LR"), None);
        assert_eq!(graph.attribute("rankdir").and_then(AttrValue::as_str), Some("LR"));

        graph.attributes_mut().shift_remove("rankdir");
        assert!(graph.attributes().is_empty());
    }

    #[test]
    fn test_attribute_access_through_handles() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let b = graph.vertex("B");
        let arc = graph.connect(a, b, Attributes::new());

        graph[a].set("label", "start");
        graph[arc].set("style", "dashed");
        if let Some(v) = graph.get_vertex_mut(b) {
            v.set("label", "end");
        }

        assert_eq!(graph.get_vertex(a).and_then(|v| v.get("label")), Some(&"start".into()));
        assert_eq!(graph.get_arc(arc).and_then(|e| e.get("style")), Some(&"dashed".into()));
        assert_eq!(graph[b].get("label"), Some(&AttrValue::from("end")));
        assert_eq!(graph.arc_count(), 1);
    }
}
