//! Seams to the collaborators that sit outside the reconciliation core:
//! retrieving source files, parsing tables and parsing sequence archives.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::models::MafTable;

pub trait Fetcher {
    ///
    /// Resolve a source to a local file, downloading and caching it if needed.
    /// Repeated calls with the same arguments must return a usable path
    /// without fetching again.
    ///
    /// # Arguments
    /// - logical_name: name the file is cached under, e.g. `BRCA.maf`
    /// - locator: where the file comes from, a URL or a local path
    fn fetch(&self, logical_name: &str, locator: &str) -> Result<PathBuf>;
}

pub trait TableParser {
    ///
    /// Parse a tab separated table from disk, skipping any leading block of
    /// `#` comment lines before the header row.
    fn parse_table(&self, path: &Path) -> Result<MafTable>;
}

pub trait SequenceParser {
    ///
    /// Parse a sequence archive into `(raw_identifier, sequence)` pairs, in file order.
    fn parse_sequences(&self, path: &Path) -> Result<Vec<(String, String)>>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, logical_name: &str, locator: &str) -> Result<PathBuf> {
        (**self).fetch(logical_name, locator)
    }
}

impl<T: TableParser + ?Sized> TableParser for &T {
    fn parse_table(&self, path: &Path) -> Result<MafTable> {
        (**self).parse_table(path)
    }
}

impl<T: SequenceParser + ?Sized> SequenceParser for &T {
    fn parse_sequences(&self, path: &Path) -> Result<Vec<(String, String)>> {
        (**self).parse_sequences(path)
    }
}
