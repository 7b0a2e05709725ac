//! Sleuth CLI entry point.

use clap::Parser;
use sleuth_app::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    sleuth_app::init_tracing(cli.verbose);

    if let Err(e) = sleuth_app::run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
