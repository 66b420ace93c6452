use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use graphs::{
    graph_factory::GraphFactory, graph_writer::write_graph_files, labeled_graph::LabeledGraph,
};
use serde_derive::{Deserialize, Serialize};
use tracing::info;

pub mod error;
pub mod graphs;
pub mod utility;

pub use error::ConvertError;

/// Converts every graph block of the grouped file at `input` into its own
/// `<output>/<name>_<index>.graph` file. Returns the written paths in block
/// order.
pub fn run(input: &Path, output: &Path, name: &str) -> Result<Vec<PathBuf>, ConvertError> {
    convert(input, output, name).map(|(paths, _)| paths)
}

/// Like [`run`], additionally returning one manifest entry per written file.
pub fn convert(
    input: &Path,
    output: &Path,
    name: &str,
) -> Result<(Vec<PathBuf>, Vec<ManifestEntry>), ConvertError> {
    let graphs: Vec<LabeledGraph> = GraphFactory::from_grouped_file(input)?
        .into_iter()
        .map(|record| record.graph)
        .collect();
    info!("read {} graphs from {}", graphs.len(), input.display());

    let paths = write_graph_files(&graphs, output, name)?;
    let manifest = paths
        .iter()
        .zip(graphs.iter())
        .map(|(path, graph)| ManifestEntry {
            file: path.clone(),
            number_of_vertices: graph.number_of_vertices(),
            number_of_edges: graph.number_of_edges(),
        })
        .collect();
    Ok((paths, manifest))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: PathBuf,
    pub number_of_vertices: u32,
    pub number_of_edges: u32,
}

pub fn write_manifest(path: &Path, manifest: &[ManifestEntry]) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|source| ConvertError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writer
        .flush()
        .map_err(|source| ConvertError::io(path, source))
}
