//! Cross-checks protein change annotations against reference sequences.
//!
//! Every record goes through the same ladder: parse the notation, resolve the
//! accession, bounds-check the position, compare the wildtype residue. The
//! first failing step decides the outcome. Records are independent of each
//! other, so batches are verified on the rayon thread pool.

use std::fmt::{self, Display};

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, info};

use mutars_core::models::MutationRecord;

use crate::index::ReferenceSequenceIndex;
use crate::notation::{NotationKind, ProteinChange, SubstitutionDescriptor, classify};

/// Result of verifying one [MutationRecord].
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum VerificationOutcome {
    Verified {
        reference_id: String,
        substitution: SubstitutionDescriptor,
    },
    UnknownReference {
        reference_id: String,
        substitution: SubstitutionDescriptor,
    },
    PositionOutOfRange {
        reference_id: String,
        substitution: SubstitutionDescriptor,
        sequence_length: usize,
    },
    ResidueMismatch {
        reference_id: String,
        substitution: SubstitutionDescriptor,
        actual_residue: char,
    },
    UnparsableNotation {
        reference_id: String,
        change_notation: String,
        kind: NotationKind,
    },
}

/// Fieldless mirror of [VerificationOutcome] for counting and reporting.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum OutcomeKind {
    Verified,
    UnknownReference,
    PositionOutOfRange,
    ResidueMismatch,
    UnparsableNotation,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Verified => "verified",
            OutcomeKind::UnknownReference => "unknown_reference",
            OutcomeKind::PositionOutOfRange => "position_out_of_range",
            OutcomeKind::ResidueMismatch => "residue_mismatch",
            OutcomeKind::UnparsableNotation => "unparsable_notation",
        }
    }
}

impl Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerificationOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            VerificationOutcome::Verified { .. } => OutcomeKind::Verified,
            VerificationOutcome::UnknownReference { .. } => OutcomeKind::UnknownReference,
            VerificationOutcome::PositionOutOfRange { .. } => OutcomeKind::PositionOutOfRange,
            VerificationOutcome::ResidueMismatch { .. } => OutcomeKind::ResidueMismatch,
            VerificationOutcome::UnparsableNotation { .. } => OutcomeKind::UnparsableNotation,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified { .. })
    }

    pub fn reference_id(&self) -> &str {
        match self {
            VerificationOutcome::Verified { reference_id, .. }
            | VerificationOutcome::UnknownReference { reference_id, .. }
            | VerificationOutcome::PositionOutOfRange { reference_id, .. }
            | VerificationOutcome::ResidueMismatch { reference_id, .. }
            | VerificationOutcome::UnparsableNotation { reference_id, .. } => reference_id,
        }
    }

    /// The parsed substitution, for every outcome past the parsing step.
    pub fn substitution(&self) -> Option<&SubstitutionDescriptor> {
        match self {
            VerificationOutcome::Verified { substitution, .. }
            | VerificationOutcome::UnknownReference { substitution, .. }
            | VerificationOutcome::PositionOutOfRange { substitution, .. }
            | VerificationOutcome::ResidueMismatch { substitution, .. } => Some(substitution),
            VerificationOutcome::UnparsableNotation { .. } => None,
        }
    }
}

impl Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerificationOutcome::Verified {
                reference_id,
                substitution,
            } => write!(f, "Verified {} in {}", substitution, reference_id),
            VerificationOutcome::UnknownReference { reference_id, .. } => {
                write!(f, "Couldn't find refseq ID {}", reference_id)
            }
            VerificationOutcome::PositionOutOfRange {
                reference_id,
                substitution,
                sequence_length,
            } => write!(
                f,
                "Protein {} too short, needed position {} but len {}",
                reference_id, substitution.position, sequence_length
            ),
            VerificationOutcome::ResidueMismatch {
                reference_id,
                substitution,
                actual_residue,
            } => write!(
                f,
                "Expected {} but got {} at position {} in {}",
                substitution.wildtype_residue, actual_residue, substitution.position, reference_id
            ),
            VerificationOutcome::UnparsableNotation {
                reference_id,
                change_notation,
                kind,
            } => match kind {
                NotationKind::Deletion => write!(
                    f,
                    "Deletion {} in {} is not a substitution",
                    change_notation, reference_id
                ),
                NotationKind::Unrecognized => write!(
                    f,
                    "Unrecognized protein change {:?} in {}",
                    change_notation, reference_id
                ),
            },
        }
    }
}

///
/// Aggregate counts over a batch of outcomes. `total` is every record
/// considered; `deletions` is the subset of `unparsable_notation` that were
/// well-formed deletions.
///
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VerificationSummary {
    pub total: usize,
    pub verified: usize,
    pub unknown_reference: usize,
    pub position_out_of_range: usize,
    pub residue_mismatch: usize,
    pub unparsable_notation: usize,
    pub deletions: usize,
}

impl VerificationSummary {
    pub fn record(&mut self, outcome: &VerificationOutcome) {
        self.total += 1;
        match outcome {
            VerificationOutcome::Verified { .. } => self.verified += 1,
            VerificationOutcome::UnknownReference { .. } => self.unknown_reference += 1,
            VerificationOutcome::PositionOutOfRange { .. } => self.position_out_of_range += 1,
            VerificationOutcome::ResidueMismatch { .. } => self.residue_mismatch += 1,
            VerificationOutcome::UnparsableNotation { kind, .. } => {
                self.unparsable_notation += 1;
                if *kind == NotationKind::Deletion {
                    self.deletions += 1;
                }
            }
        }
    }

    /// Combine partial sums from two workers.
    pub fn merge(self, other: VerificationSummary) -> VerificationSummary {
        VerificationSummary {
            total: self.total + other.total,
            verified: self.verified + other.verified,
            unknown_reference: self.unknown_reference + other.unknown_reference,
            position_out_of_range: self.position_out_of_range + other.position_out_of_range,
            residue_mismatch: self.residue_mismatch + other.residue_mismatch,
            unparsable_notation: self.unparsable_notation + other.unparsable_notation,
            deletions: self.deletions + other.deletions,
        }
    }

    /// Every record that didn't verify, unparsable ones included.
    pub fn failed(&self) -> usize {
        self.total - self.verified
    }

    /// Records that parsed as substitutions and went on to the reference checks.
    pub fn attempted(&self) -> usize {
        self.total - self.unparsable_notation
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Verified => self.verified,
            OutcomeKind::UnknownReference => self.unknown_reference,
            OutcomeKind::PositionOutOfRange => self.position_out_of_range,
            OutcomeKind::ResidueMismatch => self.residue_mismatch,
            OutcomeKind::UnparsableNotation => self.unparsable_notation,
        }
    }

    /// Fraction of records that failed, 0 for an empty batch.
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed() as f64 / self.total as f64
        }
    }
}

impl<'a> FromIterator<&'a VerificationOutcome> for VerificationSummary {
    fn from_iter<I: IntoIterator<Item = &'a VerificationOutcome>>(iter: I) -> Self {
        let mut summary = VerificationSummary::default();
        for outcome in iter {
            summary.record(outcome);
        }
        summary
    }
}

impl Display for VerificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} / {} failed", self.failed(), self.total)
    }
}

/// Outcomes in input order plus their summary.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VerificationReport {
    pub outcomes: Vec<VerificationOutcome>,
    pub summary: VerificationSummary,
}

/// Residue at a 0-based offset, `None` past the end of the sequence.
fn residue_at(sequence: &str, offset: usize) -> Option<char> {
    if sequence.is_ascii() {
        sequence.as_bytes().get(offset).map(|b| *b as char)
    } else {
        sequence.chars().nth(offset)
    }
}

///
/// Verify a single record against the index.
///
pub fn verify_record(record: &MutationRecord, index: &ReferenceSequenceIndex) -> VerificationOutcome {
    let reference_id = record.reference_id.clone();

    let substitution = match classify(&record.change_notation) {
        ProteinChange::Substitution(substitution) => substitution,
        other => {
            return VerificationOutcome::UnparsableNotation {
                reference_id,
                change_notation: record.change_notation.clone(),
                kind: other.kind().unwrap_or(NotationKind::Unrecognized),
            };
        }
    };

    let Some(sequence) = index.get(&record.reference_id) else {
        return VerificationOutcome::UnknownReference {
            reference_id,
            substitution,
        };
    };

    let Some(actual_residue) = substitution
        .offset()
        .and_then(|offset| residue_at(sequence, offset))
    else {
        return VerificationOutcome::PositionOutOfRange {
            reference_id,
            substitution,
            sequence_length: sequence.chars().count(),
        };
    };

    if actual_residue != substitution.wildtype_residue {
        return VerificationOutcome::ResidueMismatch {
            reference_id,
            substitution,
            actual_residue,
        };
    }

    VerificationOutcome::Verified {
        reference_id,
        substitution,
    }
}

fn log_report(report: &VerificationReport) {
    for outcome in report.outcomes.iter().filter(|o| !o.is_verified()) {
        debug!(kind = %outcome.kind(), "{}", outcome);
    }
    let summary = &report.summary;
    info!(
        verified = summary.verified,
        unknown_reference = summary.unknown_reference,
        position_out_of_range = summary.position_out_of_range,
        residue_mismatch = summary.residue_mismatch,
        unparsable_notation = summary.unparsable_notation,
        "{}",
        summary
    );
}

///
/// Verify a batch of records on the rayon thread pool.
///
/// Never fails: every record gets exactly one outcome, in input order, and
/// the summary counts them. Partial summaries are summed per worker and
/// merged at the end.
///
/// # Arguments
/// - records: accession/notation pairs to check
/// - index: reference sequences to check them against
pub fn verify_mutations(
    records: &[MutationRecord],
    index: &ReferenceSequenceIndex,
) -> VerificationReport {
    let outcomes: Vec<VerificationOutcome> = records
        .par_iter()
        .map(|record| verify_record(record, index))
        .collect();

    let summary = outcomes
        .par_iter()
        .fold(VerificationSummary::default, |mut partial, outcome| {
            partial.record(outcome);
            partial
        })
        .reduce(VerificationSummary::default, VerificationSummary::merge);

    let report = VerificationReport { outcomes, summary };
    log_report(&report);
    report
}

/// Single threaded [verify_mutations]; same result.
pub fn verify_mutations_sequential(
    records: &[MutationRecord],
    index: &ReferenceSequenceIndex,
) -> VerificationReport {
    let outcomes: Vec<VerificationOutcome> = records
        .iter()
        .map(|record| verify_record(record, index))
        .collect();
    let summary = outcomes.iter().collect();

    let report = VerificationReport { outcomes, summary };
    log_report(&report);
    report
}
