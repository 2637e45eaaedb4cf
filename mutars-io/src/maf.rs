use std::io::{BufRead, Cursor, Read};
use std::path::Path;

use anyhow::Result;
use csv::ReaderBuilder;
use tracing::debug;

use mutars_core::consts::{MAF_COMMENT_PREFIX, is_missing_value};
use mutars_core::models::MafTable;
use mutars_core::traits::TableParser;
use mutars_core::utils::get_dynamic_reader;

use crate::consts::MAF_DELIMITER;
use crate::error::MafIoError;

///
/// Reads MAF (Mutation Annotation Format) files, or any other tab separated
/// table with a leading block of `#` comment lines, into a [MafTable].
///
#[derive(Clone, Debug)]
pub struct MafReader {
    delimiter: u8,
}

impl Default for MafReader {
    fn default() -> Self {
        MafReader {
            delimiter: MAF_DELIMITER,
        }
    }
}

impl MafReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    ///
    /// Read a table from disk; `.gz` files are decompressed on the fly.
    ///
    /// # Arguments
    /// - path: path to the MAF file
    pub fn read<T: AsRef<Path>>(&self, path: T) -> Result<MafTable> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        let mut table = self.read_from(reader, path)?;
        table.path = Some(path.to_path_buf());
        Ok(table)
    }

    ///
    /// Read a table from any buffered reader. `path` is only used in error messages.
    ///
    pub fn read_from<R: BufRead>(&self, mut reader: R, path: &Path) -> Result<MafTable> {
        let (header_line, skipped) = match skip_comment_block(&mut reader)? {
            Some(found) => found,
            None => return Err(MafIoError::MissingHeader(path.to_path_buf()).into()),
        };
        debug!(path = %path.display(), skipped, "skipped leading comment lines");

        let rest = Cursor::new(header_line.into_bytes()).chain(reader);
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(rest);

        let to_table_error = |source: csv::Error| MafIoError::Table {
            path: path.to_path_buf(),
            source,
        };

        let header: Vec<String> = csv_reader
            .headers()
            .map_err(to_table_error)?
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(to_table_error)?;
            rows.push(
                record
                    .iter()
                    .map(|cell| {
                        if is_missing_value(cell) {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect(),
            );
        }

        Ok(MafTable::from_rows(header, rows)?)
    }
}

impl TableParser for MafReader {
    fn parse_table(&self, path: &Path) -> Result<MafTable> {
        self.read(path)
    }
}

///
/// Load a MAF file with the default settings.
///
pub fn read_maf<T: AsRef<Path>>(path: T) -> Result<MafTable> {
    MafReader::new().read(path)
}

///
/// Consume leading comment and blank lines, returning the first other line
/// (the header) and how many comment lines came before it. `None` if the
/// input ends first.
fn skip_comment_block<R: BufRead>(reader: &mut R) -> std::io::Result<Option<(String, usize)>> {
    let mut skipped = 0;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.starts_with(MAF_COMMENT_PREFIX) {
            skipped += 1;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        return Ok(Some((line, skipped)));
    }
}
