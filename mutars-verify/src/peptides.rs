//! Mutant peptide windows around verified substitutions.

use fxhash::FxHashSet;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::index::ReferenceSequenceIndex;
use crate::notation::SubstitutionDescriptor;
use crate::verifier::VerificationOutcome;

/// A window of the reference protein with the substitution applied.
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MutantPeptide {
    pub reference_id: String,
    pub change_notation: String,
    pub length: usize,
    /// 1-based position of the first residue in the reference protein
    pub start: usize,
    pub wildtype: String,
    pub mutant: String,
}

///
/// Every window of each requested length that covers the substituted
/// position, clipped to the ends of the protein.
///
/// Lengths of 0 or longer than the protein produce nothing. The caller is
/// expected to have verified the wildtype residue already.
pub fn peptide_windows(
    reference_id: &str,
    sequence: &str,
    substitution: &SubstitutionDescriptor,
    lengths: &[usize],
) -> Vec<MutantPeptide> {
    let residues: Vec<char> = sequence.chars().collect();
    let Some(offset) = substitution.offset().filter(|o| *o < residues.len()) else {
        return Vec::new();
    };

    let change_notation = substitution.to_string();
    let mut peptides = Vec::new();

    for &length in lengths {
        if length == 0 || length > residues.len() {
            continue;
        }
        let first = offset.saturating_sub(length - 1);
        let last = offset.min(residues.len() - length);

        for begin in first..=last {
            let window = &residues[begin..begin + length];
            let wildtype: String = window.iter().collect();
            let mutant: String = window
                .iter()
                .enumerate()
                .map(|(i, residue)| {
                    if begin + i == offset {
                        substitution.mutant_residue
                    } else {
                        *residue
                    }
                })
                .collect();

            peptides.push(MutantPeptide {
                reference_id: reference_id.to_string(),
                change_notation: change_notation.clone(),
                length,
                start: begin + 1,
                wildtype,
                mutant,
            });
        }
    }

    peptides
}

///
/// Mutant peptides for every verified, non-synonymous substitution.
///
/// The same substitution on the same protein is only expanded once, in
/// first-seen order. Peptides come out grouped by substitution, then by
/// length, then by start.
///
/// # Arguments
/// - outcomes: verification results, usually [crate::VerificationReport::outcomes]
/// - index: the index the outcomes were verified against
/// - lengths: peptide lengths to generate
pub fn extract_mutant_peptides(
    outcomes: &[VerificationOutcome],
    index: &ReferenceSequenceIndex,
    lengths: &[usize],
) -> Vec<MutantPeptide> {
    let mut seen: FxHashSet<(&str, SubstitutionDescriptor)> = FxHashSet::default();
    let mut unique: Vec<(&str, &str, SubstitutionDescriptor)> = Vec::new();

    for outcome in outcomes {
        let VerificationOutcome::Verified {
            reference_id,
            substitution,
        } = outcome
        else {
            continue;
        };
        if substitution.is_synonymous() {
            continue;
        }
        let Some(sequence) = index.get(reference_id) else {
            continue;
        };
        if seen.insert((reference_id.as_str(), *substitution)) {
            unique.push((reference_id.as_str(), sequence, *substitution));
        }
    }

    unique
        .par_iter()
        .map(|(reference_id, sequence, substitution)| {
            peptide_windows(reference_id, sequence, substitution, lengths)
        })
        .collect::<Vec<Vec<MutantPeptide>>>()
        .into_iter()
        .flatten()
        .collect()
}
