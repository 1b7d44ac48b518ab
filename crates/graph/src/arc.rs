//! Arc type for the graph.

use crate::attributes::{AttrValue, Attributes};
use crate::vertex::VertexId;
use petgraph::graph::EdgeIndex;

/// Attribute keys that denote an arc's endpoints and are never emitted.
pub const RESERVED_ARC_KEYS: [&str; 2] = ["source", "dest"];

/// Handle to an arc stored in a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub(crate) EdgeIndex);

impl ArcId {
    /// Position of the arc in the graph's storage.
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// A directed arc between two vertices.
///
/// The arc refers to its endpoints by handle; it does not own them.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    source: VertexId,
    dest: VertexId,
    attributes: Attributes,
}

impl Arc {
    pub(crate) fn new(source: VertexId, dest: VertexId, attributes: Attributes) -> Self {
        Self {
            source,
            dest,
            attributes,
        }
    }

    /// The vertex this arc leaves.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// The vertex this arc enters.
    pub fn dest(&self) -> VertexId {
        self.dest
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
}

impl<'a> IntoIterator for &'a Arc {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
