//! Command line definition
//!
//! Flags only override what they name; anything left out falls back to the
//! config file, the environment, then the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "fileserve")]
#[command(version)]
#[command(about = "Serve a directory of static files over HTTP")]
pub struct Cli {
    /// Server listen address, `[host]:port` [default: :5000]
    #[arg(long, value_name = "ADDR")]
    pub listen_addr: Option<String>,

    /// Directory to serve [default: ./static]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Runtime worker threads [default: number of CPUs]
    #[arg(long)]
    pub workers: Option<u64>,

    /// Write an access log line for every request
    #[arg(long)]
    pub access_log: bool,
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
    fn test_flags() {
        let cli = Cli::parse_from([
            "fileserve",
            "--listen-addr",
            ":0",
            "--root",
            "public",
            "--access-log",
        ]);
        assert_eq!(cli.listen_addr.as_deref(), Some(":0"));
        assert_eq!(cli.root, Some(PathBuf::from("public")));
        assert!(cli.access_log);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_no_flags_leaves_everything_unset() {
        let cli = Cli::parse_from(["fileserve"]);
        assert!(cli.listen_addr.is_none());
        assert!(cli.root.is_none());
        assert!(!cli.access_log);
    }
}
