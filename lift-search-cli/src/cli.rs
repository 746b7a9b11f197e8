//! CLI definition for `lift-search`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lift search form renderer
///
/// Renders search form markup for a query described in a YAML fixture.
#[derive(Parser, Debug)]
#[command(name = "lift-search")]
#[command(version)]
#[command(about = "Render the Lift search form from a query fixture")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the site URL the form submits to
    #[arg(long, global = true)]
    pub site_url: Option<String>,

    /// Enable trace logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the primary search form
    Form {
        /// Query fixture; an empty, non-search query when omitted
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Render the JS-enhanced filter panel (empty unless the query is a search)
    Filters {
        /// Query fixture
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Render the results loop with a Liquid template
    Loop {
        /// Query fixture
        #[arg(long)]
        context: Option<PathBuf>,
        /// Liquid template file for the loop
        #[arg(long)]
        template: PathBuf,
    },
    /// Render the sidebar widget
    Widget {
        /// Query fixture
        #[arg(long)]
        context: Option<PathBuf>,
        /// Widget title; markup is stripped
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Print the effective configuration as YAML
    Config,
}
