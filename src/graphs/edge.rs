use serde_derive::{Deserialize, Serialize};

use super::VertexId;

/// Undirected edge, always stored lower vertex first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord, Debug)]
pub struct UndirectedEdge {
    low: VertexId,
    high: VertexId,
}

impl UndirectedEdge {
    /// Returns `None` for self-loops.
    pub fn new(a: VertexId, b: VertexId) -> Option<UndirectedEdge> {
        if a == b {
            return None;
        }

        Some(UndirectedEdge {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn low(&self) -> VertexId {
        self.low
    }

    pub fn high(&self) -> VertexId {
        self.high
    }
}
