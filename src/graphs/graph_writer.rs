use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{labeled_graph::LabeledGraph, record::GraphRecord};
use crate::{error::ConvertError, utility::get_progressbar_long_jobs};

/// Weight column of every written edge line. It carries no meaning.
const EDGE_WEIGHT: u32 = 0;

/// Writes `graph` as a `t` header, one `v <vertex> <label> <degree>` line per
/// vertex in ascending id order and one `e <low> <high> 0` line per edge.
pub fn write_graph<W: Write>(writer: &mut W, graph: &LabeledGraph) -> io::Result<()> {
    writeln!(
        writer,
        "t {} {}",
        graph.number_of_vertices(),
        graph.number_of_edges()
    )?;
    for vertex in graph.vertices() {
        writeln!(
            writer,
            "v {} {} {}",
            vertex,
            graph.label(vertex).unwrap_or_default(),
            graph.degree(vertex).unwrap_or_default()
        )?;
    }
    for edge in graph.edges() {
        writeln!(writer, "e {} {} {}", edge.low(), edge.high(), EDGE_WEIGHT)?;
    }
    Ok(())
}

pub fn graph_file_path(output_dir: &Path, name: &str, index: usize) -> PathBuf {
    output_dir.join(format!("{}_{}.graph", name, index))
}

/// Writes graph `i` to `<output_dir>/<name>_<i>.graph`, one file per graph.
/// Files already written are left in place if a later one fails.
pub fn write_graph_files(
    graphs: &[LabeledGraph],
    output_dir: &Path,
    name: &str,
) -> Result<Vec<PathBuf>, ConvertError> {
    if !output_dir.is_dir() {
        return Err(ConvertError::io(
            output_dir,
            io::Error::new(io::ErrorKind::NotFound, "output directory does not exist"),
        ));
    }

    let bar = get_progressbar_long_jobs("Writing graphs", graphs.len() as u64);
    let paths = graphs
        .par_iter()
        .enumerate()
        .progress_with(bar)
        .map(|(index, graph)| -> Result<PathBuf, ConvertError> {
            let path = graph_file_path(output_dir, name, index);
            if !graph.is_dense() {
                info!(
                    "graph {} has non contiguous vertex ids, writing them as they are",
                    index
                );
            }

            let file = File::create(&path).map_err(|source| ConvertError::io(&path, source))?;
            let mut writer = BufWriter::new(file);
            write_graph(&mut writer, graph)
                .and_then(|_| writer.flush())
                .map_err(|source| ConvertError::io(&path, source))?;
            debug!(
                "wrote {} with {} vertices and {} edges",
                path.display(),
                graph.number_of_vertices(),
                graph.number_of_edges()
            );
            Ok(path)
        })
        .collect::<Result<Vec<_>, ConvertError>>()?;

    info!("wrote {} graph files to {}", paths.len(), output_dir.display());
    Ok(paths)
}

/// Number of `#` headers in a grouped file whose trailing field is not `-1`.
pub fn count_grouped_graphs(path: &Path) -> Result<u32, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::io(path, source))?;
    let mut count = 0;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| ConvertError::Read {
            line: index + 1,
            source,
        })?;
        if line.starts_with('#') && line.split_whitespace().last() != Some("-1") {
            count += 1;
        }
    }
    Ok(count)
}

/// Appends `records` in the grouped format, numbering the new `#` blocks after
/// the graphs already present in `path`. Returns the number of the first
/// appended block.
pub fn append_grouped_file(path: &Path, records: &[GraphRecord]) -> Result<u32, ConvertError> {
    let base = if path.exists() {
        count_grouped_graphs(path)?
    } else {
        0
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConvertError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    write_grouped_records(&mut writer, records, base)
        .and_then(|_| writer.flush())
        .map_err(|source| ConvertError::io(path, source))?;

    info!(
        "appended {} graphs to {} starting at {}",
        records.len(),
        path.display(),
        base
    );
    Ok(base)
}

fn write_grouped_records<W: Write>(
    writer: &mut W,
    records: &[GraphRecord],
    base: u32,
) -> io::Result<()> {
    for (offset, record) in records.iter().enumerate() {
        let graph = &record.graph;
        writeln!(writer, "# {}", base + offset as u32)?;
        for vertex in graph.vertices() {
            writeln!(
                writer,
                "v {} {}",
                vertex,
                graph.label(vertex).unwrap_or_default()
            )?;
        }
        for edge in graph.edges() {
            writeln!(writer, "e {} {}", edge.low(), edge.high())?;
        }
        for annotation in &record.annotations {
            writeln!(writer, "q {}", annotation.query)?;
            writeln!(
                writer,
                "d {} {}",
                annotation.decision.0, annotation.decision.1
            )?;
        }
    }
    Ok(())
}
