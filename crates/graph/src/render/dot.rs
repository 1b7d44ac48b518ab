//! Canonical DOT serialization.
//!
//! The output is deterministic: vertices and arcs appear in the order the
//! reachability walk first discovers them, never sorted.

use crate::arc::RESERVED_ARC_KEYS;
use crate::attributes::{escape_quotes, format_attr_list, format_value};
use crate::{ArcId, Graph};
use std::fmt;

impl Graph {
    /// Serialize the graph to canonical DOT text.
    ///
    /// The text has a `digraph "<name>" {` header, one line per graph
    /// attribute, one line per reachable vertex, one line per reachable arc and
    /// a closing `}`. Names and values are always double-quoted.
    pub fn serialize(&self) -> String {
        let reachable = self.collect();
        let mut lines = Vec::with_capacity(
            2 + self.attributes.len() + reachable.vertices.len() + reachable.arcs.len(),
        );

        lines.push(format!("digraph \"{}\" {{", escape_quotes(self.name())));

        for (key, value) in &self.attributes {
            lines.push(format!("\t{}=\"{}\";", key, escape_quotes(&format_value(value))));
        }

        for &id in &reachable.vertices {
            let vertex = &self[id];
            lines.push(format!(
                "\t\"{}\" [{}];",
                escape_quotes(vertex.name()),
                format_attr_list(vertex.attributes(), &[])
            ));
        }

        for &id in &reachable.arcs {
            let arc = &self[id];
            lines.push(format!(
                "\t\"{}\" -> \"{}\" [{}];",
                escape_quotes(self[arc.source()].name()),
                escape_quotes(self[arc.dest()].name()),
                format_attr_list(arc.attributes(), &RESERVED_ARC_KEYS)
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Textual form of a single arc, or `None` for an unknown handle.
    pub fn display_arc(&self, id: ArcId) -> Option<ArcDisplay<'_>> {
        let arc = self.get_arc(id)?;
        let source = self.get_vertex(arc.source())?.name();
        let dest = self.get_vertex(arc.dest())?.name();
        Some(ArcDisplay {
            graph: self,
            id,
            source,
            dest,
        })
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Displays an arc as `"source" -> "dest"` with its attribute list.
#[derive(Debug, Clone, Copy)]
pub struct ArcDisplay<'a> {
    graph: &'a Graph,
    id: ArcId,
    source: &'a str,
    dest: &'a str,
}

impl fmt::Display for ArcDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" -> \"{}\"", escape_quotes(self.source), escape_quotes(self.dest))?;
        let attrs = format_attr_list(self.graph[self.id].attributes(), &RESERVED_ARC_KEYS);
        if !attrs.is_empty() {
            write!(f, " [{}]", attrs)?;
        }
        Ok(())
    }
}
