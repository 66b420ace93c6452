use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Bound::{Excluded, Unbounded},
};

use serde_derive::{Deserialize, Serialize};

use super::{edge::UndirectedEdge, Label, VertexId};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct VertexEntry {
    label: Label,
    neighbors: BTreeSet<VertexId>,
}

/// Undirected simple graph with an integer label per vertex. Vertices are kept
/// in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledGraph {
    vertices: BTreeMap<VertexId, VertexEntry>,
    number_of_edges: u32,
}

impl LabeledGraph {
    pub fn new() -> LabeledGraph {
        LabeledGraph::default()
    }

    /// Adds `vertex` with `label`. Adding an existing vertex replaces its label
    /// and keeps its edges.
    pub fn add_vertex(&mut self, vertex: VertexId, label: Label) {
        self.vertices.entry(vertex).or_default().label = label;
    }

    /// Inserts the edge. Returns `Err(vertex)` with the first endpoint that is
    /// not part of the graph, `Ok(false)` if the edge was already present.
    pub fn add_edge(&mut self, edge: UndirectedEdge) -> Result<bool, VertexId> {
        for vertex in [edge.low(), edge.high()] {
            if !self.vertices.contains_key(&vertex) {
                return Err(vertex);
            }
        }

        let inserted = self
            .vertices
            .get_mut(&edge.low())
            .map(|entry| entry.neighbors.insert(edge.high()))
            .unwrap_or(false);
        if let Some(entry) = self.vertices.get_mut(&edge.high()) {
            entry.neighbors.insert(edge.low());
        }

        if inserted {
            self.number_of_edges += 1;
        }
        Ok(inserted)
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains_key(&vertex)
    }

    pub fn label(&self, vertex: VertexId) -> Option<Label> {
        self.vertices.get(&vertex).map(|entry| entry.label)
    }

    pub fn degree(&self, vertex: VertexId) -> Option<u32> {
        self.vertices
            .get(&vertex)
            .map(|entry| entry.neighbors.len() as u32)
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.number_of_edges
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Every edge exactly once, ordered by lower then higher endpoint.
    pub fn edges(&self) -> impl Iterator<Item = UndirectedEdge> + '_ {
        self.vertices.iter().flat_map(|(&vertex, entry)| {
            entry
                .neighbors
                .range((Excluded(vertex), Unbounded))
                .filter_map(move |&neighbor| UndirectedEdge::new(vertex, neighbor))
        })
    }

    /// True if the vertex ids are exactly `0..number_of_vertices`.
    pub fn is_dense(&self) -> bool {
        self.vertices
            .keys()
            .enumerate()
            .all(|(index, &vertex)| VertexId::try_from(index) == Ok(vertex))
    }
}
