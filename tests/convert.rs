use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use graph_convert::{
    convert,
    graphs::{
        graph_factory::GraphFactory,
        graph_writer::{append_grouped_file, count_grouped_graphs},
    },
    run, write_manifest, ConvertError, ManifestEntry,
};
use tempfile::TempDir;

const TWO_GRAPHS: &str = "\
# 17
v 0 1
v 1 2
v 2 1
v 3 3
e 0 1
e 1 2
e 2 0
e 2 3
e 1 0
# 4
v 0 9
v 1 9
e 1 0
";

fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("input.txt");
    fs::write(&path, content).unwrap();
    path
}

fn output_dir(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("out");
    fs::create_dir(&path).unwrap();
    path
}

fn graph_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[test]
fn single_graph_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "# 0\nv 0 5\nv 1 5\ne 0 1\n");
    let output = output_dir(&dir);

    let paths = run(&input, &output, "g").unwrap();

    assert_eq!(paths, vec![output.join("g_0.graph")]);
    assert_eq!(
        fs::read_to_string(&paths[0]).unwrap(),
        "t 2 1\nv 0 5 1\nv 1 5 1\ne 0 1 0\n"
    );
}

#[test]
fn files_are_indexed_by_parse_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, TWO_GRAPHS);
    let output = output_dir(&dir);

    run(&input, &output, "g").unwrap();

    assert_eq!(graph_files(&output), vec!["g_0.graph", "g_1.graph"]);
    assert_eq!(
        fs::read_to_string(output.join("g_1.graph")).unwrap(),
        "t 2 1\nv 0 9 1\nv 1 9 1\ne 0 1 0\n"
    );
}

#[test]
fn one_file_per_block() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, TWO_GRAPHS);
    let output = output_dir(&dir);

    let blocks = TWO_GRAPHS.lines().filter(|line| line.starts_with('#')).count();
    let paths = run(&input, &output, "blocks").unwrap();

    assert_eq!(paths.len(), blocks);
    assert_eq!(graph_files(&output).len(), blocks);
}

#[test]
fn written_degrees_match_edge_lines_and_edges_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, TWO_GRAPHS);
    let output = output_dir(&dir);

    for path in run(&input, &output, "g").unwrap() {
        let content = fs::read_to_string(&path).unwrap();
        let mut degrees = HashMap::new();
        let mut occurrences: HashMap<u32, u32> = HashMap::new();
        let mut edges = HashSet::new();

        for line in content.lines() {
            let values: Vec<&str> = line.split_whitespace().collect();
            match values[0] {
                "v" => {
                    let vertex: u32 = values[1].parse().unwrap();
                    let degree: u32 = values[3].parse().unwrap();
                    degrees.insert(vertex, degree);
                }
                "e" => {
                    let tail: u32 = values[1].parse().unwrap();
                    let head: u32 = values[2].parse().unwrap();
                    assert!(tail < head, "{} in {}", line, path.display());
                    assert_eq!(values[3], "0");
                    assert!(edges.insert((tail, head)), "duplicate edge {}", line);
                    *occurrences.entry(tail).or_default() += 1;
                    *occurrences.entry(head).or_default() += 1;
                }
                _ => {}
            }
        }

        for (vertex, degree) in degrees {
            assert_eq!(occurrences.get(&vertex).copied().unwrap_or(0), degree);
        }
    }
}

#[test]
fn reparsed_output_matches_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, TWO_GRAPHS);
    let output = output_dir(&dir);

    let (paths, manifest) = convert(&input, &output, "g").unwrap();

    assert_eq!(manifest[0].number_of_vertices, 4);
    assert_eq!(manifest[0].number_of_edges, 4);
    for (path, entry) in paths.iter().zip(manifest.iter()) {
        let graph = GraphFactory::from_graph_file(path).unwrap();
        assert_eq!(graph.number_of_vertices(), entry.number_of_vertices);
        assert_eq!(graph.number_of_edges(), entry.number_of_edges);
    }
}

#[test]
fn vertex_before_header_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "v 0 5\n# 0\nv 0 5\n");
    let output = output_dir(&dir);

    let result = run(&input, &output, "g");

    assert!(matches!(result, Err(ConvertError::Format { line: 1 })));
    assert!(graph_files(&output).is_empty());
}

#[test]
fn trailing_empty_block_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "# 0\nv 0 1\n# 1\n");
    let output = output_dir(&dir);

    assert_eq!(run(&input, &output, "g").unwrap().len(), 1);
}

#[test]
fn missing_output_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, TWO_GRAPHS);

    let result = run(&input, &dir.path().join("missing"), "g");

    assert!(matches!(result, Err(ConvertError::Io { .. })));
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = output_dir(&dir);

    let result = run(&dir.path().join("missing.txt"), &output, "g");

    assert!(matches!(result, Err(ConvertError::Io { .. })));
}

#[test]
fn negative_and_sparse_vertex_ids_are_converted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "# 0\nv 4 1\nv -2 1\nv 0 3\ne 4 -2\ne 0 -2\n");
    let output = output_dir(&dir);

    let paths = run(&input, &output, "sparse").unwrap();

    assert_eq!(
        fs::read_to_string(&paths[0]).unwrap(),
        "t 3 2\nv -2 1 2\nv 0 3 1\nv 4 1 1\ne -2 0 0\ne -2 4 0\n"
    );
    let graph = GraphFactory::from_graph_file(&paths[0]).unwrap();
    assert_eq!(graph.degree(-2), Some(2));
}

#[test]
fn manifest_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, TWO_GRAPHS);
    let output = output_dir(&dir);
    let manifest_path = dir.path().join("manifest.json");

    let (_, manifest) = convert(&input, &output, "g").unwrap();
    write_manifest(&manifest_path, &manifest).unwrap();

    let read: Vec<ManifestEntry> =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(read, manifest);
}

#[test]
fn append_numbers_after_existing_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let grouped = dir.path().join("grouped.txt");
    fs::write(&grouped, "# 0\nv 0 1\n# -1\n# 1\nv 0 2\n").unwrap();
    assert_eq!(count_grouped_graphs(&grouped).unwrap(), 2);

    let input = "# 0\nv 0 3\nv 1 4\ne 0 1\nq 1\nd 0 1\n";
    let mut records = GraphFactory::from_grouped_reader(input.as_bytes()).unwrap();
    records.push(records[0].clone());

    assert_eq!(append_grouped_file(&grouped, &records).unwrap(), 2);
    assert_eq!(count_grouped_graphs(&grouped).unwrap(), 4);

    let content = fs::read_to_string(&grouped).unwrap();
    assert!(content.ends_with(
        "# 2\nv 0 3\nv 1 4\ne 0 1\nq 1\nd 0 1\n# 3\nv 0 3\nv 1 4\ne 0 1\nq 1\nd 0 1\n"
    ));

    // the `# -1` block is read back as an empty graph
    let reread = GraphFactory::from_grouped_file(&grouped).unwrap();
    assert_eq!(reread.len(), 5);
    assert_eq!(reread[4], records[1]);
}

#[test]
fn append_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let grouped = dir.path().join("new.txt");
    let records = GraphFactory::from_grouped_reader("# 9\nv 0 3\n".as_bytes()).unwrap();

    assert_eq!(append_grouped_file(&grouped, &records).unwrap(), 0);
    assert_eq!(fs::read_to_string(&grouped).unwrap(), "# 0\nv 0 3\n");
}
