//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod distance;
pub mod geocode;
pub mod ip;
pub mod reverse;
pub mod search;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter, Report};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Geocoding, IP geolocation and great-circle distance
#[derive(Parser)]
#[command(name = "geo-lookup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output format: json or text
    #[arg(long, short = 'f', global = true)]
    pub format: Option<String>,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the config named on the command line, or the default one
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Format `report` with the chosen (or configured) format and print it
    pub fn emit(&self, config: &Config, report: &Report) -> Result<()> {
        let format = self.format.as_deref().unwrap_or(&config.defaults.format);
        let formatter = resolve_formatter(format)?;
        println!("{}", formatter.format(report)?);
        Ok(())
    }
}

/// Look up a formatter, listing the valid names if `name` is not one
fn resolve_formatter(name: &str) -> Result<Box<dyn OutputFormatter>> {
    get_formatter(name).ok_or_else(|| {
        let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown format: {} (available: {})",
            name,
            names.join(", ")
        ))
    })
}

#[derive(Subcommand)]
pub enum Commands {
    /// Great-circle distance between two points
    Distance(distance::DistanceArgs),

    /// Address for coordinates (Nominatim)
    Reverse(reverse::ReverseArgs),

    /// Places matching an address (Nominatim)
    Search(search::SearchArgs),

    /// Geocode an address with Google
    Geocode(geocode::GeocodeArgs),

    /// Locate an IP address
    Ip(ip::IpArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "geo_lookup=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let global = cli.global;
    match cli.command {
        Commands::Distance(args) => distance::run(args, &global),
        Commands::Reverse(args) => reverse::run(args, &global).await,
        Commands::Search(args) => search::run(args, &global).await,
        Commands::Geocode(args) => geocode::run(args, &global).await,
        Commands::Ip(args) => ip::run(args, &global).await,
        Commands::Config(args) => config::run(args, &global),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_distance_with_negative_numbers() {
        let cli = Cli::try_parse_from([
            "geo-lookup", "distance", "-33.8688", "151.2093", "51.5074", "-0.1278",
        ])
        .unwrap();

        match cli.command {
            Commands::Distance(args) => {
                assert_eq!(args.lat1, -33.8688);
                assert_eq!(args.lon2, -0.1278);
            }
            _ => panic!("expected distance"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["geo-lookup", "ip", "8.8.8.8", "--format", "json", "-v"])
            .unwrap();
        assert_eq!(cli.global.format.as_deref(), Some("json"));
        assert!(cli.global.verbose);
    }

    #[test]
    fn test_unknown_format_lists_available() {
        assert_eq!(resolve_formatter("JSON").unwrap().name(), "json");

        let err = resolve_formatter("gpx").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown format: gpx (available: json, text)"
        );
    }

    #[test]
    fn test_search_requires_query_or_fields() {
        assert!(Cli::try_parse_from(["geo-lookup", "search"]).is_err());
        assert!(Cli::try_parse_from(["geo-lookup", "search", "--city", "Bangkok"]).is_ok());
        assert!(Cli::try_parse_from(["geo-lookup", "search", "--query", "Bangkok"]).is_ok());
        assert!(
            Cli::try_parse_from(["geo-lookup", "search", "--query", "x", "--city", "y"]).is_err()
        );
    }
}
