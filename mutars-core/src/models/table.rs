use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::errors::{MutarsError, Result};

///
/// A single named column of a [MafTable]. Missing cells are `None`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<String>>,
}

///
/// MafTable struct, a minimal column oriented table: an ordered collection of
/// named columns that all have the same number of rows.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MafTable {
    columns: Vec<Column>,
    n_rows: usize,
    pub path: Option<PathBuf>,
}

impl MafTable {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Build a table from a header and row-major cells.
    ///
    /// Rows shorter than the header are padded with missing cells, cells past
    /// the last header field are dropped.
    ///
    /// # Arguments:
    /// - header: column names, in order
    /// - rows: cell values for each row
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut columns: Vec<Column> = Vec::with_capacity(header.len());
        for name in header {
            if columns.iter().any(|c| c.name == name) {
                return Err(MutarsError::DuplicateColumn(name));
            }
            columns.push(Column {
                name,
                values: Vec::with_capacity(rows.len()),
            });
        }

        let n_rows = rows.len();
        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.values.push(cells.next().flatten());
            }
        }

        Ok(MafTable {
            columns,
            n_rows,
            path: None,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    ///
    /// Get a single cell, `None` if the column doesn't exist, the row is out
    /// of range or the cell is missing.
    ///
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        self.column(name)?.get(row)?.as_deref()
    }

    /// All cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<Option<&str>>> {
        if row >= self.n_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[row].as_deref())
                .collect(),
        )
    }

    ///
    /// Append a column. The first column pushed onto a table without columns
    /// sets the row count.
    ///
    pub fn push_column(&mut self, name: &str, values: Vec<Option<String>>) -> Result<()> {
        if self.column(name).is_some() {
            return Err(MutarsError::DuplicateColumn(name.to_string()));
        }
        if self.columns.is_empty() {
            self.n_rows = values.len();
        } else if values.len() != self.n_rows {
            return Err(MutarsError::ColumnLengthMismatch {
                name: name.to_string(),
                expected: self.n_rows,
                found: values.len(),
            });
        }
        self.columns.push(Column {
            name: name.to_string(),
            values,
        });
        Ok(())
    }

    ///
    /// Tag every row with the same value under `name`. An existing column of
    /// that name is overwritten.
    ///
    pub fn push_constant_column(&mut self, name: &str, value: &str) {
        let values = vec![Some(value.to_string()); self.n_rows];
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column {
                name: name.to_string(),
                values,
            }),
        }
    }

    ///
    /// Concatenate tables top to bottom.
    ///
    /// The result has the union of all columns in first-seen order; cells of
    /// columns a table doesn't have are missing. Rows keep their input order.
    ///
    pub fn concat<I>(tables: I) -> MafTable
    where
        I: IntoIterator<Item = MafTable>,
    {
        let tables: Vec<MafTable> = tables.into_iter().collect();

        let mut names: Vec<String> = Vec::new();
        for table in &tables {
            for name in table.column_names() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        let n_rows: usize = tables.iter().map(|t| t.n_rows).sum();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(n_rows),
            })
            .collect();

        for mut table in tables {
            for column in columns.iter_mut() {
                match table.columns.iter_mut().find(|c| c.name == column.name) {
                    Some(source) => column.values.append(&mut source.values),
                    None => column
                        .values
                        .extend(std::iter::repeat_n(None, table.n_rows)),
                }
            }
        }

        MafTable {
            columns,
            n_rows,
            path: None,
        }
    }

    ///
    /// Write the table as tab separated text, missing cells left empty.
    /// Cells holding a tab, newline or quote are quoted so the table reads
    /// back unchanged.
    ///
    pub fn to_writer<W: Write>(&self, writer: W) -> std::io::Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }

        let mut csv_writer = WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record(self.column_names())?;
        for row in 0..self.n_rows {
            csv_writer.write_record(
                self.columns
                    .iter()
                    .map(|c| c.values[row].as_deref().unwrap_or("")),
            )?;
        }
        csv_writer.flush()
    }

    ///
    /// Write the table to disk, gzip compressed if the path ends in `.gz`.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    pub fn write_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            self.to_writer(&mut encoder)?;
            encoder.finish()?;
            Ok(())
        } else {
            self.to_writer(BufWriter::new(file))
        }
    }
}
