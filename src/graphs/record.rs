use serde_derive::{Deserialize, Serialize};

use super::labeled_graph::LabeledGraph;

/// A `q`/`d` line pair attached to a graph block of the grouped format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub query: String,
    pub decision: (String, String),
}

impl Annotation {
    pub fn new(
        query: impl Into<String>,
        decision: (impl Into<String>, impl Into<String>),
    ) -> Annotation {
        Annotation {
            query: query.into(),
            decision: (decision.0.into(), decision.1.into()),
        }
    }
}

/// One `#` block of the grouped format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub graph: LabeledGraph,
    pub annotations: Vec<Annotation>,
}
