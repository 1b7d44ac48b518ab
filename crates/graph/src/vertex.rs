//! Vertex type for the graph.

use crate::arc::ArcId;
use crate::attributes::{format_attr_list, AttrValue, Attributes};
use petgraph::graph::NodeIndex;
use std::fmt;

/// Handle to a vertex stored in a [`Graph`](crate::Graph).
///
/// Vertex identity is the handle: two vertices sharing a name are still
/// distinct unless their handles are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) NodeIndex);

impl VertexId {
    /// Position of the vertex in the graph's storage.
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// A named vertex with ordered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    name: String,
    attributes: Attributes,
    /// Incident arcs in both directions, in connection order
    pub(crate) arcs: Vec<ArcId>,
    pub(crate) removed: bool,
}

impl Vertex {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            arcs: Vec::new(),
            removed: false,
        }
    }

    /// The vertex name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes, in insertion order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the attribute map.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Look up an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Set an attribute, returning the previous value.
    ///
    /// An existing key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Remove an attribute, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attributes.shift_remove(key)
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, AttrValue> {
        self.attributes.iter()
    }

    /// Arcs touching this vertex, in the order they were connected.
    pub fn incident_arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// Whether the vertex was removed from its graph.
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.attributes.is_empty() {
            write!(f, " [{}]", format_attr_list(&self.attributes, &[]))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Vertex {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
