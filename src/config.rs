use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Emissions dataset (.json or .csv)
    #[arg(short, long, default_value = "data.json")]
    pub data: PathBuf,

    /// JSON object mapping vehicle class to a "#rrggbb" colour
    #[arg(short, long, default_value = "colorPalette.json")]
    pub palette: PathBuf,
}
