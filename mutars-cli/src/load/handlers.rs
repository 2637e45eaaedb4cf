use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::info;

use crate::common::{build_fetcher, load_cohort_table, read_catalog};

pub fn run_load(matches: &ArgMatches) -> Result<()> {
    let output = matches
        .get_one::<String>("output")
        .context("An output path is required")?;
    let output = Path::new(output);

    let catalog = read_catalog(matches)?;
    let fetcher = build_fetcher(matches)?;
    let table = load_cohort_table(matches, &catalog, &fetcher)?;

    table
        .write_tsv(output)
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!(rows = table.n_rows(), output = %output.display(), "wrote merged table");

    Ok(())
}
