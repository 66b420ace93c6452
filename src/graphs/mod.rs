pub mod edge;
pub mod graph_factory;
pub mod graph_writer;
pub mod labeled_graph;
pub mod record;

pub type VertexId = i64;
pub type Label = i64;
