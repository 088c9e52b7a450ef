//! Procmesh CLI - procedural terrain, parametric solids and a sphere
//! simulation.

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;

use procmesh::export::{
    export_heightmap_png, export_mesh_json, export_mesh_obj, export_normal_map_png,
    PngExportOptions,
};
use procmesh::particles::{Simulation, SimulationConfig};
use procmesh::{
    init_logging, LoggingConfig, Mesh, MeshRequest, Pipeline, SolidConfig, SolidKind,
    TerrainConfig,
};

/// Procedural mesh generator.
#[derive(Parser)]
#[command(name = "procmesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fault-line terrain mesh.
    Terrain {
        /// Vertices per grid side (2-65535).
        #[arg(short, long, default_value = "64")]
        grid_size: usize,

        /// Number of random faults.
        #[arg(short, long, default_value = "100")]
        faults: usize,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Add texture coordinates.
        #[arg(long)]
        uv: bool,

        /// Height span after renormalization.
        #[arg(long, default_value = "1.0")]
        peak: f32,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "terrain")]
        name: String,

        /// Mesh file format.
        #[arg(long, default_value = "obj")]
        format: MeshFormat,

        /// Also export a 16-bit heightmap PNG.
        #[arg(long)]
        heightmap: bool,

        /// Also export an RGB normal map PNG.
        #[arg(long)]
        normal_map: bool,
    },

    /// Generate a sphere or torus mesh.
    Solid {
        /// Which solid to sweep.
        #[arg(short, long, default_value = "sphere")]
        kind: SolidArg,

        /// Latitude rings (sphere) or points around the tube (torus).
        #[arg(short, long, default_value = "16")]
        rings: u32,

        /// Longitude slices (sphere) or tube sections (torus), at least 3.
        #[arg(short = 'S', long, default_value = "32")]
        slices: u32,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files (defaults to the solid kind).
        #[arg(short, long)]
        name: Option<String>,

        /// Mesh file format.
        #[arg(long, default_value = "obj")]
        format: MeshFormat,
    },

    /// Run the bouncing-spheres simulation and print step summaries.
    Simulate {
        /// Number of frames to simulate.
        #[arg(long, default_value = "600")]
        steps: usize,

        /// Frame delta in seconds (clamped to the max time step).
        #[arg(long, default_value = "0.0166667")]
        dt: f32,

        /// Spheres per batch.
        #[arg(long, default_value = "10")]
        spheres: usize,

        /// Simulated seconds before the batch is replaced.
        #[arg(long, default_value = "5.0")]
        reset_window: f32,

        /// Random seed for spawn positions.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print a summary every N frames.
        #[arg(long, default_value = "60")]
        report_every: usize,

        /// Write the final particle state as JSON.
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Generate a mesh from a JSON request file.
    Request {
        /// Request file, e.g. {"type": "solid", "kind": "torus"}.
        input: PathBuf,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "mesh")]
        name: String,

        /// Mesh file format.
        #[arg(long, default_value = "obj")]
        format: MeshFormat,
    },

    /// Display mesh sizes for a set of parameters.
    Info {
        /// Terrain grid size.
        #[arg(short, long, default_value = "64")]
        grid_size: usize,

        /// Solid rings.
        #[arg(short, long, default_value = "16")]
        rings: u32,

        /// Solid slices.
        #[arg(short = 'S', long, default_value = "32")]
        slices: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MeshFormat {
    /// Wavefront OBJ.
    Obj,
    /// Pretty-printed JSON of the mesh buffers.
    Json,
}

impl MeshFormat {
    fn extension(self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Json => "json",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SolidArg {
    Sphere,
    Torus,
}

impl From<SolidArg> for SolidKind {
    fn from(arg: SolidArg) -> Self {
        match arg {
            SolidArg::Sphere => SolidKind::Sphere,
            SolidArg::Torus => SolidKind::Torus,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    });

    match cli.command {
        Commands::Terrain {
            grid_size,
            faults,
            seed,
            uv,
            peak,
            output,
            name,
            format,
            heightmap,
            normal_map,
        } => {
            let config = TerrainConfig {
                grid_size,
                fault_count: faults,
                seed: seed.unwrap_or_else(rand::random),
                with_uv: uv,
                highest_peak: peak,
            };
            run_terrain(config, &output, &name, format, heightmap, normal_map);
        }
        Commands::Solid {
            kind,
            rings,
            slices,
            output,
            name,
            format,
        } => {
            let config = SolidConfig {
                kind: kind.into(),
                rings,
                slices,
            };
            let name = name.unwrap_or_else(|| config.kind.name().to_string());
            run_solid(config, &output, &name, format);
        }
        Commands::Simulate {
            steps,
            dt,
            spheres,
            reset_window,
            seed,
            report_every,
            state,
        } => {
            let config = SimulationConfig {
                sphere_count: spheres,
                reset_window,
                seed: seed.unwrap_or_else(rand::random),
                ..Default::default()
            };
            run_simulate(config, steps, dt, report_every, state.as_deref());
        }
        Commands::Request {
            input,
            output,
            name,
            format,
        } => {
            run_request(&input, &output, &name, format);
        }
        Commands::Info {
            grid_size,
            rings,
            slices,
        } => {
            run_info(grid_size, rings, slices);
        }
    }
}

fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("Error {context}: {err}");
    std::process::exit(1);
}

fn write_mesh(mesh: &Mesh, output: &Path, name: &str, format: MeshFormat) -> PathBuf {
    if let Err(e) = std::fs::create_dir_all(output) {
        fail("creating output directory", e);
    }
    let path = output.join(format!("{name}.{}", format.extension()));
    let result = match format {
        MeshFormat::Obj => export_mesh_obj(mesh, &path),
        MeshFormat::Json => export_mesh_json(mesh, &path),
    };
    if let Err(e) = result {
        fail("exporting mesh", e);
    }
    path
}

fn print_mesh_summary(mesh: &Mesh) {
    println!("Vertices:  {}", mesh.vertex_count());
    println!("Triangles: {}", mesh.triangle_count());
    let attribute_bytes: usize = mesh.attributes.iter().map(|a| a.data.as_bytes().len()).sum();
    println!(
        "Buffers:   {} bytes attributes, {} bytes indices",
        attribute_bytes,
        mesh.index_bytes().len()
    );
}

fn run_terrain(
    config: TerrainConfig,
    output: &Path,
    name: &str,
    format: MeshFormat,
    heightmap: bool,
    normal_map: bool,
) {
    if let Err(e) = config.validate() {
        fail("in terrain parameters", e);
    }

    println!("Procmesh - Fault-line Terrain");
    println!("=============================");
    println!("Grid: {}x{}", config.grid_size, config.grid_size);
    println!("Faults: {}", config.fault_count);
    println!("Seed: {}", config.seed);
    println!("Output: {}", output.display());

    let start = Instant::now();
    println!("\nRunning terrain pipeline...");
    let mut grid = procmesh::terrain::Grid::new(config.grid_size);
    let pipeline = Pipeline::standard(config.clone());
    pipeline
        .run_with_callbacks(
            &mut grid,
            |name, i, total| println!("  [{}/{}] Starting: {}", i + 1, total, name),
            |name, i, total| println!("  [{}/{}] Completed: {}", i + 1, total, name),
        )
        .unwrap_or_else(|e| fail("during generation", e));

    let (min_h, max_h) = grid.height_range();
    let mesh = grid.into_mesh(config.with_uv);
    if let Err(e) = mesh.validate() {
        fail("validating terrain", e);
    }
    println!("Generation completed in {:.2?}", start.elapsed());
    println!("Height range: [{:.4}, {:.4}]", min_h, max_h);
    print_mesh_summary(&mesh);

    println!("\nExporting...");
    let path = write_mesh(&mesh, output, name, format);
    println!("  Exported mesh: {}", path.display());

    if heightmap {
        let path = output.join(format!("{name}_height.png"));
        let options = PngExportOptions::for_peak(config.highest_peak);
        export_heightmap_png(&mesh, &path, &options)
            .unwrap_or_else(|e| fail("exporting heightmap", e));
        println!("  Exported heightmap: {}", path.display());
    }
    if normal_map {
        let path = output.join(format!("{name}_normal.png"));
        export_normal_map_png(&mesh, &path).unwrap_or_else(|e| fail("exporting normal map", e));
        println!("  Exported normal map: {}", path.display());
    }
    println!("Done!");
}

fn run_solid(config: SolidConfig, output: &Path, name: &str, format: MeshFormat) {
    println!("Procmesh - Parametric Solid");
    println!("===========================");
    println!("Kind: {}", config.kind.name());
    println!("Rings: {}, slices: {}", config.rings, config.slices);

    let start = Instant::now();
    let mesh = procmesh::generate_solid(&config).unwrap_or_else(|e| fail("generating solid", e));
    println!("Generation completed in {:.2?}", start.elapsed());
    print_mesh_summary(&mesh);

    let path = write_mesh(&mesh, output, name, format);
    println!("Exported mesh: {}", path.display());
}

fn run_simulate(
    config: SimulationConfig,
    steps: usize,
    dt: f32,
    report_every: usize,
    state: Option<&Path>,
) {
    println!("Procmesh - Bouncing Spheres");
    println!("===========================");
    println!("Spheres: {}", config.sphere_count);
    println!("Reset window: {:.2}s", config.reset_window);
    println!("Seed: {}", config.seed);

    let mut sim = Simulation::new(config).unwrap_or_else(|e| fail("in simulation parameters", e));
    let report_every = report_every.max(1);
    let mut contacts = 0;

    for frame in 1..=steps {
        let report = sim.tick(dt);
        contacts += report.step.contacts;
        if report.restarted {
            println!("  frame {frame:>5}: batch {} spawned", sim.batch());
        }
        if frame % report_every == 0 {
            let lowest = sim
                .particles()
                .iter()
                .map(|p| p.position.z)
                .fold(f32::MAX, f32::min);
            let speed = sim
                .particles()
                .iter()
                .map(|p| p.velocity.length())
                .fold(0.0, f32::max);
            println!(
                "  frame {frame:>5}: t={:.2}s  contacts={contacts}  lowest z={lowest:.3}  max speed={speed:.3}",
                sim.window_elapsed()
            );
            contacts = 0;
        }
    }

    if let Some(path) = state {
        let json = serde_json::to_string_pretty(sim.particles())
            .unwrap_or_else(|e| fail("encoding particle state", e));
        std::fs::write(path, json).unwrap_or_else(|e| fail("writing particle state", e));
        println!("Wrote final state: {}", path.display());
    }
    println!("Done!");
}

fn run_request(input: &Path, output: &Path, name: &str, format: MeshFormat) {
    let text = std::fs::read_to_string(input).unwrap_or_else(|e| fail("reading request", e));
    let request = MeshRequest::from_json(&text).unwrap_or_else(|e| fail("parsing request", e));
    log::debug!("request: {request:?}");

    let mesh = request.generate().unwrap_or_else(|e| fail("generating mesh", e));
    print_mesh_summary(&mesh);
    let path = write_mesh(&mesh, output, name, format);
    println!("Exported mesh: {}", path.display());
}

fn run_info(grid_size: usize, rings: u32, slices: u32) {
    let terrain = TerrainConfig::new(grid_size, 0);
    let sphere = SolidConfig::sphere(rings, slices);
    let torus = SolidConfig::torus(rings, slices);

    println!("Procmesh - Configuration Info");
    println!("=============================");
    println!();
    print_counts(
        &format!("Terrain {grid_size}x{grid_size}"),
        terrain.vertex_count() as u64,
        terrain.triangle_count() as u64,
        terrain.validate().err(),
    );
    print_counts(
        &format!("Sphere {rings}x{slices}"),
        sphere.vertex_count(),
        sphere.triangle_count(),
        sphere.validate().err(),
    );
    print_counts(
        &format!("Torus {rings}x{slices}"),
        torus.vertex_count(),
        torus.triangle_count(),
        torus.validate().err(),
    );
}

fn print_counts(label: &str, vertices: u64, triangles: u64, error: Option<impl Display>) {
    // Positions and normals, 3 floats each.
    let bytes_attributes = vertices * 2 * 3 * 4;
    let bytes_indices = triangles * 3 * 4;

    println!("{label}:");
    if let Some(e) = error {
        println!("  Invalid: {e}");
        println!();
        return;
    }
    println!("  Vertices:   {:>12}", vertices);
    println!("  Triangles:  {:>12}", triangles);
    println!(
        "  Attributes: {:>12} bytes ({:.2} MB)",
        bytes_attributes,
        bytes_attributes as f64 / 1024.0 / 1024.0
    );
    println!(
        "  Indices:    {:>12} bytes ({:.2} MB)",
        bytes_indices,
        bytes_indices as f64 / 1024.0 / 1024.0
    );
    println!();
}
