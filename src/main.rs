//! Sketch Drawer - settings and navigation drawer for the Sketch demo viewer
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use sketch_core::prelude::*;
use sketch_drawer::Options;

/// Sketch Drawer - settings and navigation drawer for the Sketch demo viewer
#[derive(Parser, Debug)]
#[command(name = "sketch-drawer")]
#[command(about = "Settings and navigation drawer for the Sketch demo viewer", long_about = None)]
struct Args {
    /// Directory holding config.toml
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Directory for the disk cache and the synced log
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Run in headless mode (NDJSON output, commands on stdin, no TUI)
    #[arg(long)]
    headless: bool,

    /// Fill the caches with sample entries at startup
    #[arg(long)]
    seed_demo_data: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let options = Options::new(args.config_dir, args.cache_dir).seed_demo_data(args.seed_demo_data);

    if args.headless {
        sketch_drawer::run_headless(options).await
    } else {
        sketch_drawer::run(options).await
    }
}
