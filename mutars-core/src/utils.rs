use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

///
/// Check whether a path looks gzip compressed, by extension.
///
pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file. Files are treated as
/// gzip'd if they end in `.gz` or start with the gzip magic bytes, so cached
/// downloads decompress whatever name they were stored under.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let mut file = BufReader::new(file);
    let head = file
        .fill_buf()
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    let compressed = is_gzipped(path) || head.starts_with(&GZIP_MAGIC);

    let file: Box<dyn Read> = match compressed {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}
