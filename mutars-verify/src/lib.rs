//! # Protein change verification
//!
//! This crate checks mutation annotations against reference protein
//! sequences. It provides:
//!
//! - a parser for single amino acid substitutions (`p.Q206E`) and deletions
//! - an index of RefSeq curated proteins keyed by version-less accession
//! - batch verification with per-record outcomes and a failure summary
//! - mutant peptide windows around verified substitutions

pub mod consts;
pub mod index;
pub mod notation;
pub mod peptides;
pub mod verifier;

pub use index::{
    AccessionSkip, DuplicatePolicy, IndexBuildStats, ReferenceSequenceIndex, extract_accession,
};
pub use notation::{
    NotationKind, ProteinChange, SubstitutionDescriptor, classify, parse_substitution,
};
pub use peptides::{MutantPeptide, extract_mutant_peptides, peptide_windows};
pub use verifier::{
    OutcomeKind, VerificationOutcome, VerificationReport, VerificationSummary, verify_mutations,
    verify_mutations_sequential, verify_record,
};
