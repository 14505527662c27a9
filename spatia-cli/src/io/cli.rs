use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Relates every pair of shapes in an instance file
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON instance: the shapes and the pairs to relate
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    /// Folder receiving the solution JSON and the optional SVG, created if missing
    #[arg(short, long, value_name = "FOLDER")]
    pub output_folder: PathBuf,
    /// JSON configuration, the geodetic defaults are used when absent
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
