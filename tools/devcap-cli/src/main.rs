//! devcap CLI — Command-line interface for capture device discovery and capture.
//!
//! Usage:
//!   devcap list                List capture devices
//!   devcap info [OPTIONS]      Show a device's modes and pixel formats
//!   devcap picture [OPTIONS]   Take a still picture
//!   devcap video [OPTIONS]     Record a video
//!   devcap check               Check that the media tool is available
//!   devcap config [--write]    Show (or write out) the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use devcap_device_model::Resolution;

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "devcap",
    about = "Discover capture devices and grab pictures or videos through ffmpeg",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Media tool binary (overrides the config file)
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List capture devices
    List,

    /// Detect and show a device's modes and pixel formats
    Info {
        /// Position of the device in `devcap list`
        #[arg(short, long, default_value = "0")]
        device: usize,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Take a still picture
    Picture {
        /// Position of the device in `devcap list`
        #[arg(short, long, default_value = "0")]
        device: usize,

        /// Output file (defaults to the configured picture output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Resolution as WIDTHxHEIGHT (defaults to the widest mode)
        #[arg(short, long)]
        resolution: Option<Resolution>,

        /// Pixel format (defaults to the first detected one)
        #[arg(long)]
        pixel_format: Option<String>,
    },

    /// Record a video
    Video {
        /// Position of the device in `devcap list`
        #[arg(short, long, default_value = "0")]
        device: usize,

        /// Output file (defaults to the configured video output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Length in seconds
        #[arg(long)]
        duration: Option<u64>,

        /// Resolution as WIDTHxHEIGHT (defaults to the widest mode)
        #[arg(short, long)]
        resolution: Option<Resolution>,

        /// Framerate (defaults to the highest the resolution supports)
        #[arg(long)]
        fps: Option<f64>,

        /// Pixel format (defaults to the first detected one)
        #[arg(long)]
        pixel_format: Option<String>,
    },

    /// Check that the media tool can be run
    Check,

    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_problem) = devcap_common::config::AppConfig::load_or_default();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(binary) = cli.ffmpeg {
        config.tool.binary = binary;
    }

    // Initialize logging
    devcap_common::logging::init_logging(&config.logging);
    if let Some(e) = config_problem {
        tracing::warn!(error = %e, "Using default configuration");
    }
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::List => commands::list::run(&config).await,
        Commands::Info { device, json } => commands::info::run(&config, device, json).await,
        Commands::Picture {
            device,
            output,
            resolution,
            pixel_format,
        } => commands::picture::run(&config, device, output, resolution, pixel_format).await,
        Commands::Video {
            device,
            output,
            duration,
            resolution,
            fps,
            pixel_format,
        } => {
            commands::video::run(
                &config,
                device,
                output,
                duration,
                resolution,
                fps,
                pixel_format,
            )
            .await
        }
        Commands::Check => commands::check::run(&config).await,
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
