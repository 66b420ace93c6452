use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::{FromStr, SplitWhitespace},
};

use tracing::{debug, warn};

use super::{
    edge::UndirectedEdge,
    labeled_graph::LabeledGraph,
    record::{Annotation, GraphRecord},
    Label, VertexId,
};
use crate::error::ConvertError;

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads every `#` block of a grouped edge-list file.
    pub fn from_grouped_file(path: &Path) -> Result<Vec<GraphRecord>, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::io(path, source))?;
        Self::from_grouped_reader(BufReader::new(file))
    }

    pub fn from_grouped_reader<R: BufRead>(reader: R) -> Result<Vec<GraphRecord>, ConvertError> {
        let mut records = Vec::new();
        let mut current: Option<GraphRecord> = None;
        let mut pending_query: Option<String> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| ConvertError::Read {
                line: line_number,
                source,
            })?;
            let Some(marker) = line.chars().next() else {
                continue;
            };

            if marker == '#' {
                if let Some(record) = current.take() {
                    records.push(finish_record(record, &mut pending_query));
                }
                current = Some(GraphRecord::default());
                continue;
            }

            if !matches!(marker, 'v' | 'e' | 'q' | 'd') {
                debug!("ignoring line {}: {}", line_number, line);
                continue;
            }

            let record = current
                .as_mut()
                .ok_or(ConvertError::Format { line: line_number })?;
            let mut values = line.split_whitespace();
            values.next();

            match marker {
                'v' => {
                    // v <vertex> <label>
                    let vertex: VertexId = next_field(&mut values, line_number, "vertex")?;
                    let label: Label = next_field(&mut values, line_number, "label")?;
                    record.graph.add_vertex(vertex, label);
                }
                'e' => {
                    // e <tail> <head>
                    let tail: VertexId = next_field(&mut values, line_number, "tail")?;
                    let head: VertexId = next_field(&mut values, line_number, "head")?;
                    add_edge(&mut record.graph, tail, head, line_number)?;
                }
                'q' => {
                    let query = line[1..].trim();
                    if let Some(dangling) = pending_query.replace(query.to_string()) {
                        warn!(
                            "line {}: query '{}' has no decision, dropping it",
                            line_number, dangling
                        );
                    }
                }
                _ => {
                    let query = pending_query.take().ok_or_else(|| {
                        ConvertError::parse(line_number, "decision line without preceding query")
                    })?;
                    let first: String = next_field(&mut values, line_number, "decision")?;
                    let second: String = next_field(&mut values, line_number, "decision")?;
                    record
                        .annotations
                        .push(Annotation::new(query, (first, second)));
                }
            }
        }

        match current {
            Some(record) if !record.graph.is_empty() => {
                records.push(finish_record(record, &mut pending_query))
            }
            Some(_) => warn!(
                "dropping trailing graph block {} as it has no vertices",
                records.len()
            ),
            None => {}
        }

        Ok(records)
    }

    /// Reads a single graph in the `t`/`v`/`e` format written by
    /// [`write_graph`](super::graph_writer::write_graph) and checks the header
    /// counts and the degree column against the parsed graph.
    pub fn from_graph_file(path: &Path) -> Result<LabeledGraph, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::io(path, source))?;
        Self::from_graph_reader(BufReader::new(file))
    }

    pub fn from_graph_reader<R: BufRead>(reader: R) -> Result<LabeledGraph, ConvertError> {
        let mut header: Option<(u32, u32)> = None;
        let mut graph = LabeledGraph::new();
        let mut written_degrees: Vec<(VertexId, u32)> = Vec::new();
        let mut edge_lines = 0u32;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| ConvertError::Read {
                line: line_number,
                source,
            })?;
            let mut values = line.split_whitespace();
            let Some(marker) = values.next() else {
                continue;
            };

            match marker {
                "t" => {
                    if header.is_some() {
                        return Err(ConvertError::parse(line_number, "second graph header"));
                    }
                    // t <number of vertices> <number of edges>
                    let vertices: u32 = next_field(&mut values, line_number, "vertex count")?;
                    let edges: u32 = next_field(&mut values, line_number, "edge count")?;
                    header = Some((vertices, edges));
                }
                "v" | "e" if header.is_none() => {
                    return Err(ConvertError::Format { line: line_number });
                }
                "v" => {
                    // v <vertex> <label> <degree>
                    let vertex: VertexId = next_field(&mut values, line_number, "vertex")?;
                    let label: Label = next_field(&mut values, line_number, "label")?;
                    let degree: u32 = next_field(&mut values, line_number, "degree")?;
                    graph.add_vertex(vertex, label);
                    written_degrees.push((vertex, degree));
                }
                "e" => {
                    // e <tail> <head> <weight>, weight is unused
                    let tail: VertexId = next_field(&mut values, line_number, "tail")?;
                    let head: VertexId = next_field(&mut values, line_number, "head")?;
                    add_edge(&mut graph, tail, head, line_number)?;
                    edge_lines += 1;
                }
                _ => debug!("ignoring line {}: {}", line_number, line),
            }
        }

        let (vertices, edges) = header.ok_or_else(|| ConvertError::Header {
            expected: "a `t` line".to_string(),
            found: "none".to_string(),
        })?;
        let found = (graph.number_of_vertices(), edge_lines);
        if (vertices, edges) != found || edge_lines != graph.number_of_edges() {
            return Err(ConvertError::Header {
                expected: format!("{} vertices and {} edges", vertices, edges),
                found: format!(
                    "{} vertices and {} distinct edges in {} lines",
                    found.0,
                    graph.number_of_edges(),
                    found.1
                ),
            });
        }

        for (vertex, found) in written_degrees {
            let expected = graph.degree(vertex).unwrap_or(0);
            if expected != found {
                return Err(ConvertError::Degree {
                    vertex,
                    expected,
                    found,
                });
            }
        }

        Ok(graph)
    }
}

fn finish_record(record: GraphRecord, pending_query: &mut Option<String>) -> GraphRecord {
    if let Some(dangling) = pending_query.take() {
        warn!("query '{}' has no decision, dropping it", dangling);
    }
    record
}

/// Self-loops are skipped, so they count neither towards the edge total nor
/// towards the degree of their vertex. Every written degree therefore matches
/// the written `e` lines.
fn add_edge(
    graph: &mut LabeledGraph,
    tail: VertexId,
    head: VertexId,
    line_number: usize,
) -> Result<(), ConvertError> {
    for vertex in [tail, head] {
        if !graph.contains_vertex(vertex) {
            return Err(ConvertError::Reference {
                line: line_number,
                vertex,
            });
        }
    }

    match UndirectedEdge::new(tail, head) {
        Some(edge) => {
            graph
                .add_edge(edge)
                .map_err(|vertex| ConvertError::Reference {
                    line: line_number,
                    vertex,
                })?;
        }
        None => warn!("line {}: skipping self-loop on vertex {}", line_number, tail),
    }
    Ok(())
}

fn next_field<T: FromStr>(
    values: &mut SplitWhitespace,
    line_number: usize,
    name: &str,
) -> Result<T, ConvertError> {
    values
        .next()
        .ok_or_else(|| ConvertError::parse(line_number, format!("no {} found", name)))?
        .parse()
        .map_err(|_| ConvertError::parse(line_number, format!("unable to parse {}", name)))
}
