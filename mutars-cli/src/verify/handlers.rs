use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use mutars_core::consts::{COHORT_COLUMN, PROTEIN_CHANGE_COLUMN, REFSEQ_PROT_ID_COLUMN};
use mutars_core::models::{MafTable, MutationRecord};
use mutars_verify::{VerificationOutcome, VerificationReport, VerificationSummary};

use crate::common::run_verification;

pub const OUTCOME_COLUMN: &str = "Outcome";
pub const MESSAGE_COLUMN: &str = "Message";

/// Summary as printed with `--json`.
#[derive(Serialize, Debug)]
pub struct SummaryOutput {
    #[serde(flatten)]
    pub summary: VerificationSummary,
    pub failed: usize,
    pub attempted: usize,
}

impl From<VerificationSummary> for SummaryOutput {
    fn from(summary: VerificationSummary) -> Self {
        SummaryOutput {
            summary,
            failed: summary.failed(),
            attempted: summary.attempted(),
        }
    }
}

///
/// One row per record: the record's accession, notation and cohort, followed
/// by the outcome kind and its message.
///
pub fn outcome_table(
    records: &[MutationRecord],
    outcomes: &[VerificationOutcome],
) -> Result<MafTable> {
    let mut table = MafTable::new();
    table.push_column(
        REFSEQ_PROT_ID_COLUMN,
        records.iter().map(|r| Some(r.reference_id.clone())).collect(),
    )?;
    table.push_column(
        PROTEIN_CHANGE_COLUMN,
        records.iter().map(|r| Some(r.change_notation.clone())).collect(),
    )?;
    table.push_column(
        COHORT_COLUMN,
        records.iter().map(|r| r.cohort.clone()).collect(),
    )?;
    table.push_column(
        OUTCOME_COLUMN,
        outcomes.iter().map(|o| Some(o.kind().to_string())).collect(),
    )?;
    table.push_column(
        MESSAGE_COLUMN,
        outcomes.iter().map(|o| Some(o.to_string())).collect(),
    )?;
    Ok(table)
}

pub fn print_summary(report: &VerificationReport, json: bool) -> Result<()> {
    if json {
        let output = SummaryOutput::from(report.summary);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let summary = &report.summary;
        println!("verified\t{}", summary.verified);
        println!("unknown_reference\t{}", summary.unknown_reference);
        println!("position_out_of_range\t{}", summary.position_out_of_range);
        println!("residue_mismatch\t{}", summary.residue_mismatch);
        println!("unparsable_notation\t{}", summary.unparsable_notation);
        println!("{}", summary);
    }
    Ok(())
}

pub fn run_verify(matches: &ArgMatches) -> Result<()> {
    let (records, _index, report) = run_verification(matches)?;

    if let Some(output) = matches.get_one::<String>("output") {
        let output = Path::new(output);
        outcome_table(&records, &report.outcomes)?
            .write_tsv(output)
            .with_context(|| format!("Failed to write {:?}", output))?;
        info!(output = %output.display(), "wrote verification outcomes");
    }

    print_summary(&report, matches.get_flag("json"))
}
