//! CLI for fpentropy — how much does your window size give away?

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fpentropy")]
#[command(about = "fpentropy — entropy of screen-resolution fingerprints under window resizing")]
#[command(version = fpentropy_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Entropy of the raw and filtered resolution distribution
    Baseline {
        /// Resolution count dump
        file: String,

        /// Input line format: pipe (SQL table output) or whitespace
        #[arg(long, default_value = "pipe", value_parser = ["pipe", "whitespace"])]
        format: String,

        /// Plausibility filter: min640 (>= 640x480) or plausible (800x600 to 16384x16384)
        #[arg(long, default_value = "min640", value_parser = ["min640", "plausible"])]
        bounds: String,

        /// Number of most common bins to list
        #[arg(long, default_value = "100")]
        top: usize,
    },

    /// Resize the filtered data with every configuration of a sweep and rank them
    Sweep {
        /// Resolution count dump
        file: String,

        /// Input line format: pipe (SQL table output) or whitespace
        #[arg(long, default_value = "pipe", value_parser = ["pipe", "whitespace"])]
        format: String,

        /// Plausibility filter: min640 (>= 640x480) or plausible (800x600 to 16384x16384)
        #[arg(long, default_value = "min640", value_parser = ["min640", "plausible"])]
        bounds: String,

        /// Built-in configuration table
        #[arg(long, default_value = "aspect-noise", value_parser = ["aspect-noise", "height-caps"])]
        preset: String,

        /// JSON file with a list of resize configurations (overrides --preset)
        #[arg(long)]
        configs: Option<String>,

        /// Seed for toolbar-height noise (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Write one <params>.csv per configuration into this directory
        #[arg(long)]
        csv_dir: Option<String>,

        /// Write the full sweep report as JSON
        #[arg(long)]
        output: Option<String>,

        /// Number of most common resized bins to list per configuration
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Resize a single resolution and show the resulting window
    Resize {
        /// Resolution string, e.g. 1920x1080x24
        resolution: String,

        #[arg(long, default_value = "200")]
        width_round_to: i64,

        #[arg(long, default_value = "100")]
        height_round_to: i64,

        /// Width cap (0 = none)
        #[arg(long, default_value = "1000")]
        max_width: i64,

        /// Height cap (0 = none)
        #[arg(long, default_value = "0")]
        max_height: i64,

        #[arg(long, default_value_t = fpentropy_core::DEFAULT_TOOLBAR_HEIGHT)]
        toolbar_height: i64,

        /// Minimum width/height ratio for tall screens (0 = off)
        #[arg(long, default_value = "0")]
        min_aspect_ratio: f64,

        /// Apply the aspect ratio only to screens taller than this
        #[arg(long, default_value = "800")]
        aspect_force_height: i64,

        /// Maximum toolbar-height jitter in pixels (0 = off)
        #[arg(long, default_value = "0")]
        toolbar_noise: f64,

        /// Seed for toolbar-height noise
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Baseline {
            file,
            format,
            bounds,
            top,
        } => commands::baseline::run(&file, &format, &bounds, top),
        Commands::Sweep {
            file,
            format,
            bounds,
            preset,
            configs,
            seed,
            csv_dir,
            output,
            top,
        } => commands::sweep::run(commands::sweep::SweepCommandConfig {
            file: &file,
            format: &format,
            bounds: &bounds,
            preset: &preset,
            configs_path: configs.as_deref(),
            seed,
            csv_dir: csv_dir.as_deref(),
            output_path: output.as_deref(),
            top,
        }),
        Commands::Resize {
            resolution,
            width_round_to,
            height_round_to,
            max_width,
            max_height,
            toolbar_height,
            min_aspect_ratio,
            aspect_force_height,
            toolbar_noise,
            seed,
        } => {
            let config = fpentropy_core::ResizeConfig {
                max_width,
                max_height,
                ..fpentropy_core::ResizeConfig::with_variants(
                    width_round_to,
                    height_round_to,
                    toolbar_height,
                    toolbar_noise,
                    min_aspect_ratio,
                    aspect_force_height,
                )
            };
            commands::resize::run(&resolution, &config, seed)
        }
    }
}
