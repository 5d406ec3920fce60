use std::process::exit;
use clap::Parser;
use tracing::{error, Level};

use fanjoin::cli::{App, Args};

// Units interleave only at their await points.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::new();

    if let Err(e) = app.initialize_with_config(args.config.as_deref()) {
        error!("Failed to initialize application: {}", e);
        exit(1);
    }

    if let Err(e) = app.run_with_args(args).await {
        error!("Command execution failed: {:#}", e);
        exit(1);
    }
}
