//! prism CLI - extrude outlines from the terminal
//!
//! Reads a JSON point list or an SVG file and writes the extruded solid
//! as binary STL or as JSON render buffers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use prism::{
    extrude_contours, simplify, source, DelaunayTriangulator, EarClipTriangulator,
    ExtrudeOptions, ExtrudedMesh, IndexBuffer, Point2, Triangulator,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Extrude 2D outlines into closed 3D solids", long_about = None)]
struct Cli {
    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extrude an outline and write the mesh
    Extrude {
        /// Input file: .json point list or .svg
        input: PathBuf,
        /// Output file (format determined by extension: .stl, .json)
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        params: ExtrudeArgs,
    },
    /// Extrude an outline and print mesh statistics
    Info {
        /// Input file: .json point list or .svg
        input: PathBuf,
        #[command(flatten)]
        params: ExtrudeArgs,
    },
}

#[derive(Args, Debug, Default)]
struct ExtrudeArgs {
    /// Distance between front and back cap
    #[arg(long)]
    depth: Option<f64>,
    /// Quads along the depth of each side wall
    #[arg(long)]
    depth_segments: Option<u32>,
    /// Cap interior point density (1-20, 1 disables)
    #[arg(long)]
    cap_density: Option<u32>,
    /// Points per boundary edge
    #[arg(long)]
    edge_subdivisions: Option<u32>,
    /// Merge distance for near-duplicate input points
    #[arg(long)]
    epsilon: Option<f64>,
    /// Douglas-Peucker tolerance applied to each outline before extruding
    #[arg(long, value_name = "TOL")]
    simplify: Option<f64>,
    /// Cap triangulation backend
    #[arg(long, value_enum, default_value_t = Backend::Delaunay)]
    backend: Backend,
    /// JSON file with extrusion options; flags override its fields
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Constrained Delaunay with interior points
    #[default]
    Delaunay,
    /// Boundary-only ear clipping
    Earclip,
}

impl Backend {
    fn triangulator(self) -> &'static dyn Triangulator {
        match self {
            Backend::Delaunay => &DelaunayTriangulator,
            Backend::Earclip => &EarClipTriangulator,
        }
    }
}

/// A point as written in JSON input: `{"x": 1, "y": 2}` or `[1, 2]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointRecord {
    Object { x: f64, y: f64 },
    Pair([f64; 2]),
}

impl From<PointRecord> for Point2 {
    fn from(record: PointRecord) -> Self {
        match record {
            PointRecord::Object { x, y } => Point2::new(x, y),
            PointRecord::Pair([x, y]) => Point2::new(x, y),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extrude {
            input,
            output,
            params,
        } => {
            let mesh = build_mesh(&input, &params)?;
            write_mesh(&mesh, &output)?;
        }
        Commands::Info { input, params } => {
            let mesh = build_mesh(&input, &params)?;
            show_info(&input, &mesh);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn build_mesh(input: &Path, params: &ExtrudeArgs) -> Result<ExtrudedMesh> {
    let options = resolve_options(params)?;
    let mut contours = load_contours(input)?;

    if let Some(tolerance) = params.simplify {
        for contour in &mut contours {
            let before = contour.len();
            *contour = simplify(contour, tolerance);
            log::debug!("simplified contour from {} to {} points", before, contour.len());
        }
    }

    extrude_contours(params.backend.triangulator(), &contours, &options).with_context(|| {
        format!(
            "no mesh produced from {}: outline is degenerate or could not be triangulated",
            input.display()
        )
    })
}

fn resolve_options(params: &ExtrudeArgs) -> Result<ExtrudeOptions> {
    let mut options = match &params.options {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing options in {}", path.display()))?
        }
        None => ExtrudeOptions::default(),
    };

    if let Some(depth) = params.depth {
        options.depth = depth;
    }
    if let Some(segments) = params.depth_segments {
        options.depth_segments = segments;
    }
    if let Some(density) = params.cap_density {
        options.cap_density = density;
    }
    if let Some(subdivisions) = params.edge_subdivisions {
        options.edge_subdivisions = subdivisions;
    }
    if let Some(epsilon) = params.epsilon {
        options.epsilon = epsilon;
    }

    options.validate()?;
    Ok(options)
}

fn load_contours(input: &Path) -> Result<Vec<Vec<Point2>>> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "json" => Ok(vec![parse_points(&text)?]),
        "svg" => {
            // A data URI saved to disk is accepted as well as plain markup
            let contours = if text.trim_start().starts_with("data:") {
                source::svg_contours(&text)?
            } else {
                source::contours_from_text(&text)?
            };
            log::info!("{} contours in {}", contours.len(), input.display());
            Ok(contours)
        }
        _ => anyhow::bail!("Unknown input format: {}", ext),
    }
}

fn parse_points(json: &str) -> Result<Vec<Point2>> {
    let records: Vec<PointRecord> =
        serde_json::from_str(json).context("expected an array of {x, y} objects or [x, y] pairs")?;
    Ok(records.into_iter().map(Point2::from).collect())
}

fn write_mesh(mesh: &ExtrudedMesh, output: &Path) -> Result<()> {
    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "stl" => {
            fs::write(output, mesh.to_stl_bytes())?;
            println!("Exported STL to {}", output.display());
        }
        "json" => {
            let json = serde_json::to_string(mesh)?;
            fs::write(output, json)?;
            println!("Exported buffers to {}", output.display());
        }
        _ => {
            anyhow::bail!("Unknown output format: {}", ext);
        }
    }
    Ok(())
}

fn show_info(input: &Path, mesh: &ExtrudedMesh) {
    let width = match mesh.indices {
        IndexBuffer::U16(_) => "u16",
        IndexBuffer::U32(_) => "u32",
    };

    println!("prism mesh: {}", input.display());
    println!("  Vertices: {}", mesh.num_vertices());
    println!("  Triangles: {}", mesh.num_triangles());
    println!("  Index width: {}", width);
    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "  Bounds: [{:.3}, {:.3}, {:.3}] to [{:.3}, {:.3}, {:.3}]",
            min[0], min[1], min[2], max[0], max[1], max[2]
        );
    }
}
