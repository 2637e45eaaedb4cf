use std::io::BufRead;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use mutars_core::traits::SequenceParser;
use mutars_core::utils::get_dynamic_reader;

use crate::consts::FASTA_HEADER_PREFIX;

/// One record of a FASTA file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    /// Header text up to the first whitespace, e.g. `gi|12345|ref|NP_000001.2|`
    pub id: String,
    /// Rest of the header line, if any
    pub description: Option<String>,
    pub sequence: String,
}

/// Split a FASTA header line (with or without the leading `>`) into id and description.
pub fn parse_fasta_header(header: &str) -> (String, Option<String>) {
    let header = header
        .strip_prefix(FASTA_HEADER_PREFIX)
        .unwrap_or(header)
        .trim();
    match header.split_once(char::is_whitespace) {
        Some((id, description)) => {
            let description = description.trim();
            (
                id.to_string(),
                (!description.is_empty()).then(|| description.to_string()),
            )
        }
        None => (header.to_string(), None),
    }
}

///
/// Read every record of a FASTA file from a buffered reader.
///
/// Sequence lines are concatenated with surrounding whitespace removed;
/// anything before the first header is ignored.
pub fn read_fasta_from<R: BufRead>(mut reader: R) -> Result<Vec<FastaRecord>> {
    let mut results = Vec::new();
    let mut line = String::new();
    let mut current: Option<FastaRecord> = None;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            // EOF - finalize the last sequence if any
            if let Some(record) = current.take() {
                results.push(record);
            }
            break;
        }

        if line.starts_with(FASTA_HEADER_PREFIX) {
            if let Some(record) = current.take() {
                results.push(record);
            }
            let (id, description) = parse_fasta_header(&line);
            current = Some(FastaRecord {
                id,
                description,
                sequence: String::new(),
            });
        } else if let Some(record) = current.as_mut() {
            record.sequence.push_str(line.trim());
        }
    }

    Ok(results)
}

///
/// Read every record of a FASTA file, gzipped or not.
///
/// # Arguments
///
/// * `file_path` - path to the FASTA file
pub fn read_fasta<T: AsRef<Path>>(file_path: T) -> Result<Vec<FastaRecord>> {
    let reader = get_dynamic_reader(file_path.as_ref())?;
    let records = read_fasta_from(reader)?;
    debug!(
        path = %file_path.as_ref().display(),
        records = records.len(),
        "read FASTA file"
    );
    Ok(records)
}

/// [SequenceParser] over FASTA files, yielding `(id, sequence)` pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastaReader;

impl SequenceParser for FastaReader {
    fn parse_sequences(&self, path: &Path) -> Result<Vec<(String, String)>> {
        Ok(read_fasta(path)?
            .into_iter()
            .map(|record| (record.id, record.sequence))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(">gi|12345|ref|NP_000001.2| some protein [Homo sapiens]", "gi|12345|ref|NP_000001.2|", Some("some protein [Homo sapiens]"))]
    #[case(">NP_000001.2", "NP_000001.2", None)]
    #[case("NP_000001.2   \n", "NP_000001.2", None)]
    #[case(">", "", None)]
    fn test_parse_fasta_header(
        #[case] header: &str,
        #[case] id: &str,
        #[case] description: Option<&str>,
    ) {
        let (parsed_id, parsed_description) = parse_fasta_header(header);
        assert_eq!(parsed_id, id);
        assert_eq!(parsed_description.as_deref(), description);
    }

    #[rstest]
    fn test_multiline_records() {
        let text = "junk before header\n\
                    >gi|1|ref|NP_000001.2| first\n\
                    MKTAY\n\
                    IAKQR\n\
                    \n\
                    >gi|2|ref|XP_000002.1| second\r\n\
                    MEEPQ\r\n";
        let records = read_fasta_from(Cursor::new(text)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "gi|1|ref|NP_000001.2|");
        assert_eq!(records[0].sequence, "MKTAYIAKQR");
        assert_eq!(records[1].description.as_deref(), Some("second"));
        assert_eq!(records[1].sequence, "MEEPQ");
    }

    #[rstest]
    fn test_empty_record_is_kept() {
        let records = read_fasta_from(Cursor::new(">a\n>b\nMK\n")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, "");
        assert_eq!(records[1].sequence, "MK");
    }

    #[rstest]
    fn test_sequence_parser_on_disk() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("proteins.faa");
        std::fs::write(&path, ">gi|1|ref|NP_1.1| x\nMK\nTA\n").unwrap();

        let pairs = FastaReader.parse_sequences(&path).unwrap();
        assert_eq!(
            pairs,
            vec![("gi|1|ref|NP_1.1|".to_string(), "MKTA".to_string())]
        );
    }
}
