//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Decode a Vehicle Identification Number with the NHTSA vPIC service.
#[derive(Debug, Parser)]
#[command(name = "vin-decode")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode a VIN with the NHTSA vPIC API")]
pub struct Cli {
    /// 17-character VIN; use * for unknown positions
    pub vin: String,

    /// Settings file (TOML, JSON, YAML...). Defaults to ./vin-decoder.* if present
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the service root, e.g. http://127.0.0.1:3000/api/vehicles
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the request timeout
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the record as JSON instead of a field list
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "vin-decode",
            "19UUA56922A021559",
            "--base-url",
            "http://127.0.0.1:3000/api/vehicles",
            "--timeout",
            "5",
            "--json",
            "-vv",
        ]);
        assert_eq!(cli.vin, "19UUA56922A021559");
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:3000/api/vehicles"));
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
    }

    #[test]
    fn vin_is_required() {
        assert!(Cli::try_parse_from(["vin-decode"]).is_err());
    }
}
