//! CLI argument parsing for latedays

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "latedays")]
#[command(version)]
#[command(about = "Tally Gradescope homework and lab late days from a lateness export", long_about = None)]
pub struct Cli {
    /// Path to the Gradescope lateness export CSV
    pub input: PathBuf,
}
