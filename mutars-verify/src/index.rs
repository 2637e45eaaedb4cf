//! Reference protein sequences keyed by version-less RefSeq accession.

use fxhash::FxHashMap;
use tracing::info;

use crate::consts::{
    ACCESSION_FIELD, CURATED_PROTEIN_PREFIX, IDENTIFIER_DELIMITER, VERSION_SEPARATOR,
};

/// Why a raw identifier was left out of the index.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AccessionSkip {
    /// Fewer pipe-delimited fields than the accession field needs.
    MalformedIdentifier,
    /// The accession isn't a curated (`NP_`) protein.
    NonCuratedAccession,
}

///
/// Pull the version-less curated protein accession out of a composite
/// identifier, e.g. `gi|12345|ref|NP_000001.2|` gives `NP_000001`.
///
pub fn extract_accession(raw_identifier: &str) -> Result<&str, AccessionSkip> {
    let accession = raw_identifier
        .split(IDENTIFIER_DELIMITER)
        .nth(ACCESSION_FIELD)
        .ok_or(AccessionSkip::MalformedIdentifier)?;

    if !accession.starts_with(CURATED_PROTEIN_PREFIX) {
        return Err(AccessionSkip::NonCuratedAccession);
    }

    Ok(accession
        .split_once(VERSION_SEPARATOR)
        .map_or(accession, |(before_dot, _)| before_dot))
}

/// Which sequence to keep when several raw records map to the same accession.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum DuplicatePolicy {
    /// The last record in input order wins.
    #[default]
    LastWins,
    /// The first record in input order wins.
    FirstWins,
    /// The longest sequence wins; ties keep the earlier record.
    Longest,
}

/// Counters collected while building a [ReferenceSequenceIndex].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct IndexBuildStats {
    pub records_seen: usize,
    pub indexed: usize,
    pub skipped_malformed: usize,
    pub skipped_non_curated: usize,
    pub duplicates_collapsed: usize,
}

///
/// Mapping from version-less protein accession (e.g. `NP_000001`) to the full
/// amino acid sequence. Built once and only read afterwards, so it can be
/// shared between verification workers.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSequenceIndex {
    sequences: FxHashMap<String, String>,
}

impl ReferenceSequenceIndex {
    ///
    /// Build an index from `(raw_identifier, sequence)` records with the
    /// default [DuplicatePolicy].
    ///
    /// # Arguments
    /// - records: identifier/sequence pairs as read from a FASTA archive
    pub fn build<I, S, T>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        Self::build_with_stats(records, DuplicatePolicy::default()).0
    }

    ///
    /// Build an index, choosing how duplicate accessions collapse, and report
    /// what was skipped.
    ///
    /// Records whose identifier has too few fields or whose accession isn't
    /// curated are skipped without error. Sequences are stored verbatim.
    pub fn build_with_stats<I, S, T>(records: I, policy: DuplicatePolicy) -> (Self, IndexBuildStats)
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut sequences: FxHashMap<String, String> = FxHashMap::default();
        let mut stats = IndexBuildStats::default();

        for (raw_identifier, sequence) in records {
            stats.records_seen += 1;

            let accession = match extract_accession(raw_identifier.as_ref()) {
                Ok(accession) => accession,
                Err(AccessionSkip::MalformedIdentifier) => {
                    stats.skipped_malformed += 1;
                    continue;
                }
                Err(AccessionSkip::NonCuratedAccession) => {
                    stats.skipped_non_curated += 1;
                    continue;
                }
            };

            let sequence: String = sequence.into();
            match sequences.get_mut(accession) {
                None => {
                    sequences.insert(accession.to_string(), sequence);
                }
                Some(existing) => {
                    stats.duplicates_collapsed += 1;
                    let replace = match policy {
                        DuplicatePolicy::LastWins => true,
                        DuplicatePolicy::FirstWins => false,
                        DuplicatePolicy::Longest => sequence.len() > existing.len(),
                    };
                    if replace {
                        *existing = sequence;
                    }
                }
            }
        }

        stats.indexed = sequences.len();
        info!(
            records = stats.records_seen,
            indexed = stats.indexed,
            malformed = stats.skipped_malformed,
            non_curated = stats.skipped_non_curated,
            duplicates = stats.duplicates_collapsed,
            "built reference sequence index"
        );

        (ReferenceSequenceIndex { sequences }, stats)
    }

    pub fn get(&self, reference_id: &str) -> Option<&str> {
        self.sequences.get(reference_id).map(|s| s.as_str())
    }

    pub fn contains(&self, reference_id: &str) -> bool {
        self.sequences.contains_key(reference_id)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sequences
            .iter()
            .map(|(id, seq)| (id.as_str(), seq.as_str()))
    }
}

/// Collect already-keyed `(accession, sequence)` pairs; later keys win.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReferenceSequenceIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ReferenceSequenceIndex {
            sequences: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("gi|12345|ref|NP_000001.2|description", Ok("NP_000001"))]
    #[case("gi|12345|ref|NP_000001.2|", Ok("NP_000001"))]
    #[case("gi|12345|ref|NP_000001", Ok("NP_000001"))]
    #[case("gi|12345|ref|NP_000001.2.7|", Ok("NP_000001"))]
    #[case("gi|12345|ref|XP_000002.1|", Err(AccessionSkip::NonCuratedAccession))]
    #[case("gi|12345|ref||", Err(AccessionSkip::NonCuratedAccession))]
    #[case("gi|12345|ref", Err(AccessionSkip::MalformedIdentifier))]
    #[case("NP_000001.2", Err(AccessionSkip::MalformedIdentifier))]
    #[case("", Err(AccessionSkip::MalformedIdentifier))]
    fn test_extract_accession(#[case] raw: &str, #[case] expected: Result<&str, AccessionSkip>) {
        assert_eq!(extract_accession(raw), expected);
    }

    #[rstest]
    fn test_build_keys_by_stripped_accession() {
        let index = ReferenceSequenceIndex::build(vec![(
            "gi|12345|ref|NP_000001.2|description",
            "MKTAYIAKQR",
        )]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("NP_000001"), Some("MKTAYIAKQR"));
        assert_eq!(index.get("NP_000001.2"), None);
    }

    #[rstest]
    fn test_build_skips_and_counts() {
        let (index, stats) = ReferenceSequenceIndex::build_with_stats(
            vec![
                ("gi|1|ref|NP_000001.1|", "MK"),
                ("gi|2|ref|XP_000002.1|", "MA"),
                ("gi|3|ref", "MB"),
                ("gi|4|ref|NP_000004.3|", "mkta"),
            ],
            DuplicatePolicy::LastWins,
        );

        assert_eq!(
            stats,
            IndexBuildStats {
                records_seen: 4,
                indexed: 2,
                skipped_malformed: 1,
                skipped_non_curated: 1,
                duplicates_collapsed: 0,
            }
        );
        assert!(!index.contains("XP_000002"));
        // stored verbatim, no case normalisation
        assert_eq!(index.get("NP_000004"), Some("mkta"));
    }

    #[rstest]
    #[case(DuplicatePolicy::LastWins, "MKTAYIAKQR")]
    #[case(DuplicatePolicy::FirstWins, "MKTAY")]
    #[case(DuplicatePolicy::Longest, "MKTAYIAKQRQISFVK")]
    fn test_duplicate_policy(#[case] policy: DuplicatePolicy, #[case] expected: &str) {
        let records = vec![
            ("gi|1|ref|NP_000001.1|", "MKTAY"),
            ("gi|2|ref|NP_000001.2|", "MKTAYIAKQRQISFVK"),
            ("gi|3|ref|NP_000001.3|", "MKTAYIAKQR"),
        ];
        let (index, stats) = ReferenceSequenceIndex::build_with_stats(records, policy);
        assert_eq!(index.len(), 1);
        assert_eq!(stats.duplicates_collapsed, 2);
        assert_eq!(index.get("NP_000001"), Some(expected));
    }

    #[rstest]
    fn test_from_iterator_uses_keys_as_given() {
        let index: ReferenceSequenceIndex = [("NP_000001", "MKTAYIAKQR")].into_iter().collect();
        assert_eq!(index.get("NP_000001"), Some("MKTAYIAKQR"));
        assert_eq!(index.iter().count(), 1);
        assert!(!index.is_empty());
    }
}
