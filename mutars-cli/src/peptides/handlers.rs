use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::info;

use mutars_core::consts::{PROTEIN_CHANGE_COLUMN, REFSEQ_PROT_ID_COLUMN};
use mutars_core::models::MafTable;
use mutars_verify::consts::DEFAULT_PEPTIDE_LENGTHS;
use mutars_verify::{MutantPeptide, extract_mutant_peptides};

use crate::common::{run_verification, spinner};

pub fn peptide_table(peptides: &[MutantPeptide]) -> Result<MafTable> {
    let column = |f: fn(&MutantPeptide) -> String| -> Vec<Option<String>> {
        peptides.iter().map(|p| Some(f(p))).collect()
    };

    let mut table = MafTable::new();
    table.push_column(REFSEQ_PROT_ID_COLUMN, column(|p| p.reference_id.clone()))?;
    table.push_column(PROTEIN_CHANGE_COLUMN, column(|p| p.change_notation.clone()))?;
    table.push_column("Length", column(|p| p.length.to_string()))?;
    table.push_column("Start", column(|p| p.start.to_string()))?;
    table.push_column("Wildtype", column(|p| p.wildtype.clone()))?;
    table.push_column("Mutant", column(|p| p.mutant.clone()))?;
    Ok(table)
}

pub fn run_peptides(matches: &ArgMatches) -> Result<()> {
    let output = matches
        .get_one::<String>("output")
        .context("An output path is required")?;
    let output = Path::new(output);

    let lengths: Vec<usize> = matches
        .get_many::<usize>("lengths")
        .map(|lengths| lengths.copied().collect())
        .unwrap_or_else(|| DEFAULT_PEPTIDE_LENGTHS.to_vec());

    let (_records, index, report) = run_verification(matches)?;
    println!("{}", report.summary);

    let pb = spinner("Extracting mutant peptides")?;
    let peptides = extract_mutant_peptides(&report.outcomes, &index, &lengths);
    pb.finish_with_message(format!("Extracted {} mutant peptides", peptides.len()));

    peptide_table(&peptides)?
        .write_tsv(output)
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!(peptides = peptides.len(), output = %output.display(), "wrote mutant peptides");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_peptide_table() {
        let peptides = vec![MutantPeptide {
            reference_id: "NP_000001".to_string(),
            change_notation: "p.K2R".to_string(),
            length: 3,
            start: 1,
            wildtype: "MKT".to_string(),
            mutant: "MRT".to_string(),
        }];

        let table = peptide_table(&peptides).unwrap();

        assert_eq!(
            table.row(0).unwrap(),
            vec![
                Some("NP_000001"),
                Some("p.K2R"),
                Some("3"),
                Some("1"),
                Some("MKT"),
                Some("MRT")
            ]
        );
    }
}
