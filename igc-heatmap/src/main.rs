use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use igc_heatmap::output::{save_world_file, save_xyz, write_heat_png, write_mask_png};
use igc_heatmap::{
    read_track, render_heat, render_mask, GridGeometry, IgcTrack, Lv95Projection,
    RasterAccumulator, TrackRasterizer, TrackStream,
};

#[derive(clap::Parser)]
#[command(name = "igc-heatmap")]
#[command(about = "Rasterize IGC flight logs into an overflight heatmap over Switzerland")]
struct ClArgs {
    /// IGC flight logs (plain or gzip-compressed)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Edge length of a grid cell in metres
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    cell_size: i64,

    /// Output PNG file path; a .pgw world file is written next to it
    #[arg(short = 'o', long = "output", default_value = "heatmap.png")]
    output: PathBuf,

    /// Also write the per-cell counts as tab-separated x/y/count lines
    #[arg(long)]
    xyz: Option<PathBuf>,

    /// Directory for one black/white silhouette PNG per track
    #[arg(long)]
    mask_dir: Option<PathBuf>,

    /// Process at most this many tracks
    #[arg(long)]
    max_tracks: Option<usize>,

    /// Verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> Result<()> {
    let args = ClArgs::parse();
    init_tracing(args.verbosity);

    let geometry = GridGeometry::new(args.cell_size).context("Invalid --cell-size")?;
    info!(
        "Grid: {}x{} cells of {} m",
        geometry.nb_elem_x(),
        geometry.nb_elem_y(),
        geometry.cell_size()
    );

    let rasterizer = TrackRasterizer::new(&geometry, Lv95Projection);
    let mut accumulator = RasterAccumulator::new(geometry);

    if let Some(dir) = &args.mask_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create mask directory {}", dir.display()))?;
    }

    let limit = args.max_tracks.unwrap_or(usize::MAX);
    if args.inputs.len() > limit {
        warn!("Only the first {} of {} tracks will be processed", limit, args.inputs.len());
    }

    for path in args.inputs.iter().take(limit) {
        let track = match load_track(path) {
            Ok(track) => track,
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                continue;
            }
        };
        let (grid, stats) = rasterizer.rasterize_with_stats(&track.points);
        info!(
            "{}: {} fixes ({} malformed), {} cells, {} outside extent",
            path.display(),
            stats.points,
            track.malformed_fixes,
            stats.active_cells,
            stats.out_of_extent
        );

        if let Some(dir) = &args.mask_dir {
            let mask_path = dir.join(mask_file_name(path));
            write_mask_png(&mask_path, &render_mask(&grid))
                .with_context(|| format!("Cannot write {}", mask_path.display()))?;
        }
        accumulator.add(grid)?;
    }

    let summary = accumulator.finalize_sum();
    if summary.tracks == 0 {
        warn!("No track could be read; the heatmap will be empty");
    }
    let sum = accumulator.sum_field()?;
    let max_occurrence = accumulator.max_occurrence()?;

    write_heat_png(&args.output, &render_heat(sum, max_occurrence))
        .with_context(|| format!("Cannot write {}", args.output.display()))?;
    let world_file = save_world_file(&args.output, &geometry)
        .with_context(|| format!("Cannot write world file for {}", args.output.display()))?;
    info!("World file saved to: {}", world_file.display());

    if let Some(xyz) = &args.xyz {
        save_xyz(xyz, &geometry, sum).with_context(|| format!("Cannot write {}", xyz.display()))?;
    }

    println!(
        "{} tracks combined, max occurrence {}, {} active cells",
        summary.tracks, summary.max_occurrence, summary.active_cells
    );
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_track(path: &Path) -> Result<IgcTrack> {
    let stream = TrackStream::from_file(path).context("Cannot open track")?;
    read_track(stream).context("Cannot read track")
}

/// `flight.igc.gz` becomes `flight.png`.
fn mask_file_name(track: &Path) -> PathBuf {
    let name = track
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "track".to_string());
    let stem = name.split('.').next().filter(|s| !s.is_empty()).unwrap_or("track");
    PathBuf::from(format!("{}.png", stem))
}
