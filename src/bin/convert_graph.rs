use std::path::PathBuf;

use clap::Parser;
use graph_convert::{convert, utility::init_tracing, write_manifest, ConvertError};
use tracing::info;

/// Splits a grouped graph file (`#` blocks of `v <vertex> <label>` and
/// `e <tail> <head>` lines) into one `.graph` file per block, annotating every
/// vertex with its degree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in grouped `#`/`v`/`e` format
    #[arg(short, long)]
    input: PathBuf,
    /// Existing directory the `.graph` files are written to
    #[arg(short, long)]
    output: PathBuf,
    /// Prefix of the written files, `<name>_<index>.graph`
    #[arg(short, long)]
    name: String,
    /// Optional json file listing the written graphs
    #[arg(short, long)]
    manifest: Option<PathBuf>,
}

fn main() -> Result<(), ConvertError> {
    init_tracing();
    let args = Args::parse();

    let (paths, manifest) = convert(&args.input, &args.output, &args.name)?;

    if let Some(manifest_path) = args.manifest {
        write_manifest(&manifest_path, &manifest)?;
        info!("wrote manifest to {}", manifest_path.display());
    }

    info!("converted {} graphs", paths.len());
    Ok(())
}
