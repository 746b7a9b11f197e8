//! Command-line front end for the Lift search form.
//!
//! Reads a query fixture (YAML) standing in for the host's request, builds a
//! `SearchForm` from configuration and prints the requested markup.

pub mod cli;
pub mod commands;
pub mod fixture;

pub use cli::{Cli, Commands};
pub use commands::run;
pub use fixture::Fixture;
