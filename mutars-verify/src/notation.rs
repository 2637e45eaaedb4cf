//! Protein change notation parsing.
//!
//! Only two grammars are recognised: a single amino acid substitution
//! (`p.Q206E`) and a single residue deletion (`p.K117del`). Matching is
//! anchored and case sensitive, so anything with surrounding whitespace,
//! lowercase residues or more than one residue/position is not a match.

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::{Captures, Regex};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::consts::{DELETION, PROTEIN_CHANGE_PREFIX, SINGLE_AMINO_ACID_SUBSTITUTION};

static SUBSTITUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SINGLE_AMINO_ACID_SUBSTITUTION).expect("valid substitution pattern"));

static DELETION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DELETION).expect("valid deletion pattern"));

///
/// A parsed single amino acid substitution. `position` is 1-based, as written
/// in the notation, and always at least 1.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SubstitutionDescriptor {
    pub wildtype_residue: char,
    pub position: u32,
    pub mutant_residue: char,
}

impl SubstitutionDescriptor {
    /// 0-based offset of the substituted residue in the protein sequence,
    /// `None` for position 0.
    pub fn offset(&self) -> Option<usize> {
        (self.position as usize).checked_sub(1)
    }

    /// Substitutions that leave the residue unchanged.
    pub fn is_synonymous(&self) -> bool {
        self.wildtype_residue == self.mutant_residue
    }
}

impl Display for SubstitutionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            PROTEIN_CHANGE_PREFIX, self.wildtype_residue, self.position, self.mutant_residue
        )
    }
}

/// Which grammar, if any, a notation that is not a substitution matched.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NotationKind {
    Deletion,
    Unrecognized,
}

/// A classified protein change notation.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ProteinChange {
    Substitution(SubstitutionDescriptor),
    Deletion { residue: char, position: u32 },
    Unrecognized,
}

impl ProteinChange {
    /// The [NotationKind] of anything that isn't a substitution.
    pub fn kind(&self) -> Option<NotationKind> {
        match self {
            ProteinChange::Substitution(_) => None,
            ProteinChange::Deletion { .. } => Some(NotationKind::Deletion),
            ProteinChange::Unrecognized => Some(NotationKind::Unrecognized),
        }
    }
}

/// Residue and 1-based position from the first two capture groups.
fn residue_and_position(caps: &Captures) -> Option<(char, u32)> {
    let residue = caps.get(1)?.as_str().chars().next()?;
    let position = caps
        .get(2)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|p| *p >= 1)?;
    Some((residue, position))
}

///
/// Parse a single amino acid substitution such as `p.Q206E`.
///
/// Returns `None` for anything else, including positions of zero or
/// positions too large to represent.
pub fn parse_substitution(change_notation: &str) -> Option<SubstitutionDescriptor> {
    let caps = SUBSTITUTION_RE.captures(change_notation)?;
    let (wildtype_residue, position) = residue_and_position(&caps)?;
    let mutant_residue = caps.get(3)?.as_str().chars().next()?;
    Some(SubstitutionDescriptor {
        wildtype_residue,
        position,
        mutant_residue,
    })
}

/// Classify a notation as a substitution, a deletion, or neither.
pub fn classify(change_notation: &str) -> ProteinChange {
    if let Some(substitution) = parse_substitution(change_notation) {
        return ProteinChange::Substitution(substitution);
    }
    DELETION_RE
        .captures(change_notation)
        .and_then(|caps| residue_and_position(&caps))
        .map(|(residue, position)| ProteinChange::Deletion { residue, position })
        .unwrap_or(ProteinChange::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("p.Q206E", 'Q', 206, 'E')]
    #[case("p.M1T", 'M', 1, 'T')]
    #[case("p.G12D", 'G', 12, 'D')]
    #[case("p.V600E", 'V', 600, 'E')]
    #[case("p.R0175H", 'R', 175, 'H')]
    fn test_parse_substitution(
        #[case] notation: &str,
        #[case] wildtype: char,
        #[case] position: u32,
        #[case] mutant: char,
    ) {
        let parsed = parse_substitution(notation).unwrap();
        assert_eq!(
            parsed,
            SubstitutionDescriptor {
                wildtype_residue: wildtype,
                position,
                mutant_residue: mutant,
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("p.del")]
    #[case("p.q206e")]
    #[case("p.Q206e")]
    #[case("Q206E")]
    #[case(" p.Q206E")]
    #[case("p.Q206E ")]
    #[case("p.Q206E\n")]
    #[case("p.QQ206E")]
    #[case("p.Q206EF")]
    #[case("p.Q206_E207delinsKK")]
    #[case("p.Q206*")]
    #[case("p.Q0E")]
    #[case("p.Q99999999999E")]
    #[case("pxQ206E")]
    #[case("p.Q٣E")]
    fn test_parse_substitution_no_match(#[case] notation: &str) {
        assert_eq!(parse_substitution(notation), None);
    }

    #[rstest]
    fn test_position_zero_has_no_offset() {
        let substitution = SubstitutionDescriptor {
            wildtype_residue: 'M',
            position: 0,
            mutant_residue: 'T',
        };
        assert_eq!(substitution.offset(), None);
        assert_eq!(parse_substitution("p.M0T"), None);
    }

    #[rstest]
    fn test_display_and_offset() {
        let parsed = parse_substitution("p.Q206E").unwrap();
        assert_eq!(parsed.to_string(), "p.Q206E");
        assert_eq!(parsed.offset(), Some(205));
        assert!(!parsed.is_synonymous());
        assert!(parse_substitution("p.M1M").unwrap().is_synonymous());
    }

    #[rstest]
    fn test_classify() {
        assert!(matches!(classify("p.Q206E"), ProteinChange::Substitution(_)));
        assert_eq!(
            classify("p.K117del"),
            ProteinChange::Deletion {
                residue: 'K',
                position: 117
            }
        );
        assert_eq!(classify("p.K0del"), ProteinChange::Unrecognized);
        assert_eq!(classify("p.E746_A750del"), ProteinChange::Unrecognized);
        assert_eq!(classify("p.G12fs"), ProteinChange::Unrecognized);
        assert_eq!(classify("p.K117del").kind(), Some(NotationKind::Deletion));
        assert_eq!(classify("p.Q206E").kind(), None);
    }
}
