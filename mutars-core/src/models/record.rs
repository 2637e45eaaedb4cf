use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{COHORT_COLUMN, PROTEIN_CHANGE_COLUMN, REFSEQ_PROT_ID_COLUMN};
use crate::errors::{MutarsError, Result};
use crate::models::MafTable;

///
/// One mutation call to verify: the protein accession it is annotated
/// against and the raw protein change notation.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MutationRecord {
    pub reference_id: String,
    pub change_notation: String,

    /// Row of the merged table this record was taken from.
    pub source_row: Option<usize>,
    pub cohort: Option<String>,
}

impl MutationRecord {
    pub fn new(reference_id: &str, change_notation: &str) -> Self {
        MutationRecord {
            reference_id: reference_id.to_string(),
            change_notation: change_notation.to_string(),
            source_row: None,
            cohort: None,
        }
    }

    ///
    /// Select the accession and protein change columns of a table, dropping
    /// rows where either is missing.
    ///
    /// # Arguments:
    /// - table: a merged mutation table, usually from the cohort loader
    pub fn from_table(table: &MafTable) -> Result<Vec<MutationRecord>> {
        let ids = table
            .column(REFSEQ_PROT_ID_COLUMN)
            .ok_or_else(|| MutarsError::MissingColumn(REFSEQ_PROT_ID_COLUMN.to_string()))?;
        let changes = table
            .column(PROTEIN_CHANGE_COLUMN)
            .ok_or_else(|| MutarsError::MissingColumn(PROTEIN_CHANGE_COLUMN.to_string()))?;
        let cohorts = table.column(COHORT_COLUMN);

        let records = ids
            .iter()
            .zip(changes.iter())
            .enumerate()
            .filter_map(|(row, (id, change))| match (id, change) {
                (Some(id), Some(change)) => Some(MutationRecord {
                    reference_id: id.clone(),
                    change_notation: change.clone(),
                    source_row: Some(row),
                    cohort: cohorts.and_then(|c| c[row].clone()),
                }),
                _ => None,
            })
            .collect();

        Ok(records)
    }
}

impl Display for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.reference_id, self.change_notation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[rstest]
    fn test_from_table_drops_incomplete_rows() {
        let table = MafTable::from_rows(
            vec![
                "Hugo_Symbol".to_string(),
                "Refseq_prot_Id".to_string(),
                "Protein_Change".to_string(),
                "Cancer Type".to_string(),
            ],
            vec![
                vec![cell("KRAS"), cell("NP_004976"), cell("p.G12D"), cell("LUAD")],
                vec![cell("TTN"), None, cell("p.A1T"), cell("LUAD")],
                vec![cell("TP53"), cell("NP_000537"), None, cell("BRCA")],
                vec![cell("BRAF"), cell("NP_004324"), cell("p.V600E"), cell("SKCM")],
            ],
        )
        .unwrap();

        let records = MutationRecord::from_table(&table).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference_id, "NP_004976");
        assert_eq!(records[0].change_notation, "p.G12D");
        assert_eq!(records[0].source_row, Some(0));
        assert_eq!(records[1].source_row, Some(3));
        assert_eq!(records[1].cohort.as_deref(), Some("SKCM"));
        assert_eq!(records[1].to_string(), "NP_004324:p.V600E");
    }

    #[rstest]
    #[case("Refseq_prot_Id")]
    #[case("Protein_Change")]
    fn test_from_table_requires_columns(#[case] missing: &str) {
        let header: Vec<String> = ["Refseq_prot_Id", "Protein_Change"]
            .iter()
            .filter(|name| **name != missing)
            .map(|name| name.to_string())
            .collect();
        let table = MafTable::from_rows(header, vec![]).unwrap();

        let result = MutationRecord::from_table(&table);
        assert!(matches!(result, Err(MutarsError::MissingColumn(name)) if name == missing));
    }
}
