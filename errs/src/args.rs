use std::path::PathBuf;

use clap::{Parser, Subcommand};
use errs_core::Kind;

/// Inspect how errors are answered over HTTP
#[derive(Debug, Parser)]
#[command(name = "errs", about = "Preview HTTP error responses for structured errors")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "ERRS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured log filter
    #[arg(long, env = "ERRS_LOG")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every error kind with the HTTP status it maps to
    Kinds,
    /// Print the response an error would produce
    Explain(Explain),
}

#[derive(Debug, clap::Args)]
pub struct Explain {
    /// Error kind, e.g. `Validation` or `NotExist`
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Kind,

    /// Machine-readable error code
    #[arg(long)]
    pub code: Option<String>,

    /// Offending parameter
    #[arg(long)]
    pub param: Option<String>,

    /// Underlying error message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Explicit HTTP status, builds a response error instead of a chain link
    #[arg(short, long)]
    pub status: Option<u16>,
}

fn parse_kind(raw: &str) -> Result<Kind, String> {
    raw.parse().map_err(|_| format!("unknown error kind `{raw}`"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn explain_parses_kind() {
        let args = Args::try_parse_from(["errs", "explain", "--kind", "NotExist", "--param", "id"]).unwrap();
        let Command::Explain(explain) = args.command else {
            panic!("expected explain");
        };
        assert_eq!(explain.kind, Kind::NotExist);
        assert_eq!(explain.param.as_deref(), Some("id"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Args::try_parse_from(["errs", "explain", "--kind", "Teapot"]).is_err());
    }
}
