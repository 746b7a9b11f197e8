//! `lift-search` - render Lift search form markup from a query fixture.
//!
//! Commands:
//! - `lift-search form --context q.yaml`: primary search form
//! - `lift-search filters --context q.yaml`: JS filter panel
//! - `lift-search loop --context q.yaml --template loop.liquid`: results loop
//! - `lift-search widget --context q.yaml --title "Search"`: sidebar widget
//! - `lift-search config`: effective configuration
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use lift_search_cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("liquid=warn,{log_level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
