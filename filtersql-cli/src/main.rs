//! `filtersql` - check filters against a policy file from the command line.
//!
//! Exit status: `0` when every filter is accepted, `1` when any is rejected,
//! `2` for usage or configuration errors.

mod config;
mod report;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filtersql::{Policy, validate_and_canonicalize};

use crate::report::Outcome;

/// Validate and canonicalize SQL filter expressions against an allow-list policy
#[derive(Parser, Debug)]
#[command(name = "filtersql")]
#[command(version)]
#[command(about = "Validate and canonicalize SQL filter expressions against an allow-list policy")]
struct Cli {
    /// Policy file (TOML)
    #[arg(short, long, env = "FILTERSQL_POLICY", global = true, value_name = "PATH")]
    policy: Option<PathBuf>,

    /// Log policy loading and rejections to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate filters and print their canonical form
    Check {
        /// Log each validator rejection with the offending node
        #[arg(long)]
        debug: bool,

        /// Print one JSON object per filter
        #[arg(long)]
        json: bool,

        /// Filters to check; read one per line from stdin when omitted
        filters: Vec<String>,
    },

    /// Print a summary of the loaded policy
    Policy,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            if cli.verbose {
                filtersql::log!(error, "command failed", error: format!("{err:#}"));
            }
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        },
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let path = cli
        .policy
        .as_deref()
        .context("no policy file given (use --policy or FILTERSQL_POLICY)")?;
    let policy = load_policy(path, cli.verbose)?;

    match &cli.command {
        Command::Policy => {
            print!("{}", report::describe_policy(&policy));
            Ok(true)
        },
        Command::Check {
            debug,
            json,
            filters,
        } => {
            let filters = if filters.is_empty() {
                read_stdin_filters()?
            } else {
                filters.clone()
            };
            check(&policy, &filters, *debug, *json, cli.verbose)
        },
    }
}

fn load_policy(path: &Path, verbose: bool) -> Result<Policy> {
    let policy = config::load(path)?;
    if verbose {
        filtersql::log!(
            info,
            "policy loaded",
            path: path.display(),
            columns: policy.columns.len(),
        );
    }
    Ok(policy)
}

/// Non-blank stdin lines.
fn read_stdin_filters() -> Result<Vec<String>> {
    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("failed to read filters from stdin")?;
    Ok(lines.into_iter().filter(|l| !l.trim().is_empty()).collect())
}

fn check(policy: &Policy, filters: &[String], debug: bool, json: bool, verbose: bool) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    let mut all_ok = true;

    for filter in filters {
        let result = validate_and_canonicalize(filter, policy, debug);
        if verbose && let Err(err) = &result {
            filtersql::log!(warn, "filter rejected", kind: err.kind(), filter: filter);
        }

        let outcome = Outcome::new(filter, &result);
        let line = if json {
            outcome.to_json()?
        } else {
            outcome.to_text()
        };
        writeln!(stdout, "{line}").context("failed to write to stdout")?;
        all_ok &= outcome.is_ok();
    }

    Ok(all_ok)
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
    fn test_parse_check_arguments() {
        let cli = Cli::try_parse_from([
            "filtersql",
            "check",
            "--policy",
            "p.toml",
            "--json",
            "a = 1",
            "b = 2",
        ])
        .unwrap();
        assert_eq!(cli.policy.as_deref(), Some(Path::new("p.toml")));
        match cli.command {
            Command::Check {
                debug,
                json,
                filters,
            } => {
                assert!(!debug);
                assert!(json);
                assert_eq!(filters, ["a = 1", "b = 2"]);
            },
            Command::Policy => panic!("expected check"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        assert!(Cli::try_parse_from(["filtersql"]).is_err());
    }
}
