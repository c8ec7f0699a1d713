//! Command-line arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "voxscribe",
    version,
    about = "Record or pick an audio clip and get a transcript from the VoxScribe backend"
)]
pub struct Args {
    /// Backend base URL (overrides VOXSCRIBE_BACKEND_URL and saved settings)
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Input device name for recording (default: system default)
    #[arg(long)]
    pub device: Option<String>,

    /// Enable verbose diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available audio input devices
    Devices,

    /// Show or update saved configuration
    Config {
        /// Save the backend base URL
        #[arg(long)]
        backend_url: Option<String>,

        /// Save the preferred input device name
        #[arg(long)]
        device: Option<String>,

        /// Print the current configuration
        #[arg(long)]
        show: bool,
    },
}
