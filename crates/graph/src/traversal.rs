//! Reachability collection over the graph.

use crate::{ArcId, Element, Graph, VertexId};
use std::collections::HashSet;

/// Vertices and arcs reachable from a graph's top-level objects.
///
/// Both lists are in first-discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachable {
    pub vertices: Vec<VertexId>,
    pub arcs: Vec<ArcId>,
}

impl Reachable {
    /// Check if nothing was reached.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.arcs.is_empty()
    }
}

impl Graph {
    /// Collect every vertex and arc reachable from the top-level objects.
    ///
    /// The walk is depth-first, rooted at the top-level vertices and then the
    /// top-level arcs. A vertex is followed by its incident arcs in connection
    /// order; an arc is followed by its source and then its destination. Each
    /// object is visited once. Removed vertices, and arcs touching them, are
    /// skipped.
    pub fn collect(&self) -> Reachable {
        let mut reachable = Reachable::default();
        let mut seen_vertices: HashSet<VertexId> = HashSet::new();
        let mut seen_arcs: HashSet<ArcId> = HashSet::new();

        // Roots are pushed in reverse so they pop in registration order
        let mut stack: Vec<Element> = self
            .arcs()
            .iter()
            .rev()
            .map(|&id| Element::Arc(id))
            .chain(self.vertices().iter().rev().map(|&id| Element::Vertex(id)))
            .collect();

        while let Some(element) = stack.pop() {
            match element {
                Element::Vertex(id) => {
                    let Some(vertex) = self.get_vertex(id) else {
                        continue;
                    };
                    if vertex.is_removed() || !seen_vertices.insert(id) {
                        continue;
                    }
                    reachable.vertices.push(id);
                    stack.extend(vertex.incident_arcs().iter().rev().map(|&a| Element::Arc(a)));
                }
                Element::Arc(id) => {
                    let Some(arc) = self.get_arc(id) else {
                        continue;
                    };
                    if !seen_arcs.insert(id) || self.touches_removed(id) {
                        continue;
                    }
                    reachable.arcs.push(id);
                    stack.push(Element::Vertex(arc.dest()));
                    stack.push(Element::Vertex(arc.source()));
                }
            }
        }

        reachable
    }

    fn touches_removed(&self, id: ArcId) -> bool {
        let arc = &self[id];
        [arc.source(), arc.dest()]
            .iter()
            .any(|&v| self.get_vertex(v).is_none_or(|v| v.is_removed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, Attributes};

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new("g");
        assert!(graph.collect().is_empty());
    }

    #[test]
    fn test_vertex_reached_twice_is_collected_once() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let b = graph.vertex("B");
        let arc = graph.connect(a, b, Attributes::new());
        graph.register(arc);

        let reachable = graph.collect();
        assert_eq!(reachable.vertices, vec![a, b]);
        assert_eq!(reachable.arcs, vec![arc]);
    }

    #[test]
    fn test_discovery_order_is_depth_first() {
        // me -> them, us -> me, with only `me` registered
        let mut graph = Graph::new("g");
        let me = graph.vertex("me");
        let them = graph.add_vertex("them");
        let us = graph.add_vertex("us");
        let out = graph.connect(me, them, Attributes::new());
        let inc = graph.connect(us, me, Attributes::new());
        let deeper = graph.add_vertex("deeper");
        let chain = graph.connect(them, deeper, attrs([("k", "v")]));

        let reachable = graph.collect();
        assert_eq!(reachable.vertices, vec![me, them, deeper, us]);
        assert_eq!(reachable.arcs, vec![out, chain, inc]);
    }

    #[test]
    fn test_top_level_arc_reaches_unregistered_endpoints() {
        let mut graph = Graph::new("g");
        let x = graph.add_vertex("x");
        let y = graph.add_vertex("y");
        let arc = graph.add_arc(x, y, Attributes::new());
        graph.register(arc);

        let reachable = graph.collect();
        assert_eq!(reachable.vertices, vec![x, y]);
        assert_eq!(reachable.arcs, vec![arc]);
    }

    #[test]
    fn test_removed_vertex_prunes_its_arcs() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let b = graph.vertex("B");
        let c = graph.vertex("C");
        graph.connect(a, b, Attributes::new());
        let kept = graph.connect(b, c, Attributes::new());

        graph.remove("A").unwrap();

        let reachable = graph.collect();
        assert_eq!(reachable.vertices, vec![b, c]);
        assert_eq!(reachable.arcs, vec![kept]);
    }

    #[test]
    fn test_self_loop() {
        let mut graph = Graph::new("g");
        let a = graph.vertex("A");
        let arc = graph.connect(a, a, Attributes::new());

        let reachable = graph.collect();
        assert_eq!(reachable.vertices, vec![a]);
        assert_eq!(reachable.arcs, vec![arc]);
    }
}
