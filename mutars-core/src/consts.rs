/// Column of a MAF holding the RefSeq protein accession of the mutated transcript.
pub const REFSEQ_PROT_ID_COLUMN: &str = "Refseq_prot_Id";

/// Column of a MAF holding the protein change notation, e.g. `p.Q206E`.
pub const PROTEIN_CHANGE_COLUMN: &str = "Protein_Change";

/// Column added to every row of a merged table naming the cohort it came from.
pub const COHORT_COLUMN: &str = "Cancer Type";

/// Lines starting with this prefix before the header row of a MAF are comments.
pub const MAF_COMMENT_PREFIX: char = '#';

/// Cell values that are read as "missing" rather than as text.
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_value(value: &str) -> bool {
    MISSING_VALUE_TOKENS.contains(&value)
}
