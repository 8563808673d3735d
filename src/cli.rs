use std::path::PathBuf;

use clap::Parser;

use crate::data::sun_times::SUN_TIMES_URL;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "split-sky",
    version,
    about = "Two places, one terminal: local time, sky phase and a countdown"
)]
pub struct Cli {
    /// Sun-time service endpoint
    #[arg(long, default_value = SUN_TIMES_URL)]
    pub sun_url: String,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Freeze the star field
    #[arg(long)]
    pub no_animation: bool,

    /// Animation frames per second (5..30)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(5..=30))]
    pub fps: u8,

    /// Print both places once and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}
