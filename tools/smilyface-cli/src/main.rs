//! Smilyface CLI: replay and inspect face overlay snapshot streams.
//!
//! Usage:
//!   smilyface render <PATH>      Render a snapshot stream to SVG frames or display lists
//!   smilyface simulate           Trace iris physics for a synthetic head motion
//!   smilyface validate <PATH>    Report landmark coverage of a snapshot stream
//!   smilyface tuning             Print or check overlay tuning

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use smilyface_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "smilyface",
    about = "Cartoon face overlay driven by face tracking data",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One SVG document per frame
    Svg,
    /// One JSONL file with every frame's draw commands
    Jsonl,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a snapshot stream through the overlay
    Render {
        /// Path to the snapshot stream (JSONL)
        path: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "svg")]
        format: OutputFormat,

        /// Output width (defaults to the configured replay width)
        #[arg(long)]
        width: Option<u32>,

        /// Output height (defaults to the configured replay height)
        #[arg(long)]
        height: Option<u32>,

        /// Width of the camera preview the snapshots were tracked in
        #[arg(long)]
        preview_width: Option<f64>,

        /// Height of the camera preview the snapshots were tracked in
        #[arg(long)]
        preview_height: Option<f64>,

        /// Snapshots come from the front camera and must be mirrored
        #[arg(long)]
        front: bool,

        /// Tuning file (JSON); defaults are used for missing fields
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// First frame to write
        #[arg(long)]
        start: Option<usize>,

        /// Frame to stop before
        #[arg(long)]
        end: Option<usize>,
    },

    /// Trace iris physics for a synthetic head motion
    Simulate {
        /// Number of frames to simulate
        #[arg(long, default_value = "40")]
        frames: usize,

        /// Horizontal head displacement per moving frame (px)
        #[arg(long, default_value = "30.0")]
        shift: f64,

        /// Number of frames during which the head moves
        #[arg(long, default_value = "3")]
        move_frames: usize,

        /// Eye radius (px)
        #[arg(long, default_value = "54.0")]
        eye_radius: f64,

        /// Iris radius (px)
        #[arg(long, default_value = "27.0")]
        iris_radius: f64,

        /// Tuning file (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report landmark coverage of a snapshot stream
    Validate {
        /// Path to the snapshot stream (JSONL)
        path: PathBuf,
    },

    /// Print the default tuning, or check a tuning file
    Tuning {
        /// Tuning file to check
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    smilyface_common::logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::Render {
            path,
            output,
            format,
            width,
            height,
            preview_width,
            preview_height,
            front,
            tuning,
            start,
            end,
        } => commands::render::run(commands::render::RenderArgs {
            path,
            output,
            format,
            width: width.unwrap_or(config.replay.frame_width),
            height: height.unwrap_or(config.replay.frame_height),
            preview_width,
            preview_height,
            front,
            tuning,
            start,
            end,
        }),
        Commands::Simulate {
            frames,
            shift,
            move_frames,
            eye_radius,
            iris_radius,
            tuning,
            json,
        } => commands::simulate::run(
            frames,
            shift,
            move_frames,
            eye_radius,
            iris_radius,
            tuning,
            json,
        ),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Tuning { check } => commands::tuning::run(check),
    }
}
