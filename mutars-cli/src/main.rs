mod common;
mod load;
mod peptides;
mod verify;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "mutars";

    pub const LOAD_CMD: &str = "load";
    pub const VERIFY_CMD: &str = "verify";
    pub const PEPTIDES_CMD: &str = "peptides";

    pub const LOG_ENV: &str = "MUTARS_LOG";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Load cancer cohort mutation tables and verify their protein changes against RefSeq proteins.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every failing record (debug level)"),
        )
        .subcommand(load::cli::create_load_cli())
        .subcommand(verify::cli::create_verify_cli())
        .subcommand(peptides::cli::create_peptides_cli())
}

/// Logs go to stderr so tables and summaries can be piped from stdout.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(consts::LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_LOG_LEVEL))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        //
        // LOAD
        //
        Some((load::cli::LOAD_CMD, matches)) => {
            load::handlers::run_load(matches)?;
        }

        //
        // VERIFY
        //
        Some((verify::cli::VERIFY_CMD, matches)) => {
            verify::handlers::run_verify(matches)?;
        }

        //
        // MUTANT PEPTIDES
        //
        Some((peptides::cli::PEPTIDES_CMD, matches)) => {
            peptides::handlers::run_peptides(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_verify_args() {
        let matches = build_parser()
            .try_get_matches_from([
                "mutars", "verify", "--catalog", "catalog.yaml", "--cohort", "BRCA", "--cohort",
                "LUAD", "--threads", "2", "--json", "-v",
            ])
            .unwrap();
        assert!(matches.get_flag("verbose"));

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, consts::VERIFY_CMD);
        assert_eq!(
            sub.get_many::<String>("cohort")
                .unwrap()
                .map(String::as_str)
                .collect::<Vec<_>>(),
            vec!["BRCA", "LUAD"]
        );
        assert_eq!(sub.get_one::<usize>("threads"), Some(&2));
        assert!(sub.get_flag("json"));
    }

    #[rstest]
    fn test_peptide_lengths() {
        let matches = build_parser()
            .try_get_matches_from([
                "mutars", "peptides", "--catalog", "c.toml", "--lengths", "9,10", "--output",
                "out.tsv",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(
            sub.get_many::<usize>("lengths")
                .unwrap()
                .copied()
                .collect::<Vec<_>>(),
            vec![9, 10]
        );
    }

    #[rstest]
    fn test_catalog_is_required() {
        assert!(build_parser().try_get_matches_from(["mutars", "load"]).is_err());
    }
}
