//! Serializable description of a graph.
//!
//! This is the JSON shape accepted by the command-line tool and produced for
//! external consumers:
//!
//! ```json
//! {
//!   "name": "g",
//!   "attributes": {"rankdir": "LR"},
//!   "vertices": [{"name": "A", "attributes": {"label": "start"}}],
//!   "arcs": [{"source": "A", "dest": "B", "attributes": {"style": "dashed"}}]
//! }
//! ```

use crate::error::DescriptionError;
use crate::{Attributes, Graph};
use serde::{Deserialize, Serialize};

/// Serializable representation of a [`Graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default)]
    pub vertices: Vec<VertexDescription>,
    #[serde(default)]
    pub arcs: Vec<ArcDescription>,
}

/// Serializable representation of a vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// Serializable representation of an arc, with endpoints given by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDescription {
    pub source: String,
    pub dest: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl GraphDescription {
    /// Parse a description from JSON text.
    pub fn from_json(source: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build a graph from this description.
    ///
    /// Vertices are registered in order, merging attributes of repeated names.
    /// Arcs are connected between the named vertices (creating any that were
    /// not listed) and registered as top-level arcs.
    pub fn into_graph(self) -> Graph {
        let mut graph = Graph::new(self.name);
        *graph.attributes_mut() = self.attributes;

        for vertex in self.vertices {
            let id = graph.vertex(&vertex.name);
            graph[id].attributes_mut().extend(vertex.attributes);
        }

        for arc in self.arcs {
            let source = graph.vertex(&arc.source);
            let dest = graph.vertex(&arc.dest);
            let id = graph.connect(source, dest, arc.attributes);
            graph.register(id);
        }

        graph
    }
}

impl From<&Graph> for GraphDescription {
    /// Describe the reachable part of a graph, in discovery order.
    fn from(graph: &Graph) -> Self {
        let reachable = graph.collect();

        let vertices = reachable
            .vertices
            .iter()
            .map(|&id| VertexDescription {
                name: graph[id].name().to_string(),
                attributes: graph[id].attributes().clone(),
            })
            .collect();

        let arcs = reachable
            .arcs
            .iter()
            .map(|&id| {
                let arc = &graph[id];
                ArcDescription {
                    source: graph[arc.source()].name().to_string(),
                    dest: graph[arc.dest()].name().to_string(),
                    attributes: arc.attributes().clone(),
                }
            })
            .collect();

        Self {
            name: graph.name().to_string(),
            attributes: graph.attributes().clone(),
            vertices,
            arcs,
        }
    }
}
