use clap::{Parser, Subcommand, ValueEnum};
use sif_geom::{
    build_centerlines,
    io::{read_points_json, read_zones_json, write_centerlines_json, write_json, write_zones_geojson},
    GeometryConfig, GeometryError, ZoneLayout,
};

/// Builds track centerlines and zone polygons for the SIF railway map.
#[derive(Parser)]
#[command(name = "sif_geom_cli", version)]
struct Cli {
    /// JSON file overriding the default geometry settings
    #[arg(long, global = true)]
    config: Option<String>,
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Geojson,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpolate the centerline of every track and write its samples as JSON.
    Centerlines {
        points: String,
        output: String,
        /// PK spacing of the interpolated samples
        #[arg(long)]
        step: Option<f64>,
    },
    /// Print which tracks of each zone are drawn as pairs.
    Pairings { points: String, zones: String },
    /// Build the polygons of every zone.
    Zones {
        points: String,
        zones: String,
        output: String,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Geojson)]
        format: OutputFormat,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.try_init();
}

fn load_config(path: Option<&str>) -> Result<GeometryConfig, GeometryError> {
    match path {
        Some(path) => GeometryConfig::from_json_file(path),
        None => Ok(GeometryConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), GeometryError> {
    let mut config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Centerlines {
            points,
            output,
            step,
        } => {
            if let Some(step) = step {
                config.pk_step = step;
                config.validate()?;
            }
            let points = read_points_json(&points)?;
            let lines = build_centerlines(&points, config.pk_step);
            let written = write_centerlines_json(&output, lines.values())?;
            println!("Wrote {} centerlines to {}", written, output);
        }
        Commands::Pairings { points, zones } => {
            let points = read_points_json(&points)?;
            let zones = read_zones_json(&zones)?;
            let lines = build_centerlines(&points, config.pk_step);
            let layout = ZoneLayout::new(&lines, &config);
            for (name, pairings) in layout.pairings(&zones) {
                println!("{}:", name);
                for pair in &pairings.pairs {
                    println!("  {} <-> {} ({:.3})", pair.a, pair.b, pair.distance);
                }
                for key in &pairings.unpaired {
                    println!("  {} alone", key);
                }
            }
        }
        Commands::Zones {
            points,
            zones,
            output,
            zoom,
            format,
        } => {
            if !zoom.is_finite() || zoom <= 0.0 {
                return Err(GeometryError::InvalidConfig {
                    field: "zoom",
                    reason: format!("expected a positive finite number, got {zoom}"),
                });
            }
            let points = read_points_json(&points)?;
            let zones = read_zones_json(&zones)?;
            let lines = build_centerlines(&points, config.pk_step);
            let polygons = ZoneLayout::new(&lines, &config).build(&zones, zoom);
            match format {
                OutputFormat::Geojson => write_zones_geojson(&output, &polygons)?,
                OutputFormat::Json => write_json(&output, &polygons)?,
            }
            println!("Wrote {} polygons to {}", polygons.len(), output);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
