use anyhow::Result;
use clap::Parser;
use latedays::{cli::Cli, pipeline};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for diagnostic output
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Cli::parse();

    // Output files land next to wherever the tool was invoked.
    let out_dir = std::env::current_dir()?;
    pipeline::run(&args.input, &out_dir)?;

    Ok(())
}
