/// Prefix of the protein change notations handled here, e.g. `p.Q206E`.
pub const PROTEIN_CHANGE_PREFIX: &str = "p.";

/// Single amino acid substitution, e.g. `p.Q206E`.
pub const SINGLE_AMINO_ACID_SUBSTITUTION: &str = r"^p\.([A-Z])([0-9]+)([A-Z])$";

/// Single residue deletion, e.g. `p.K117del`.
pub const DELETION: &str = r"^p\.([A-Z])([0-9]+)del$";

/// Separator between the fields of a composite sequence identifier,
/// e.g. `gi|12345|ref|NP_000001.2|`.
pub const IDENTIFIER_DELIMITER: char = '|';

/// Field of a composite identifier holding the accession (0-based).
pub const ACCESSION_FIELD: usize = 3;

/// RefSeq curated protein accessions start with this.
pub const CURATED_PROTEIN_PREFIX: &str = "NP_";

/// Separates an accession from its version, e.g. `NP_000001.2`.
pub const VERSION_SEPARATOR: char = '.';

/// Peptide lengths extracted around each verified substitution by default.
pub const DEFAULT_PEPTIDE_LENGTHS: &[usize] = &[8, 9, 10, 11];
