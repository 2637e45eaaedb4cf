/// Environment variable name for setting the cache directory location.
///
/// When set, this overrides the default cache location (`~/.mutars/`).
///
/// # Example
///
/// ```bash
/// export MUTARS_CACHE=/custom/cache/path
/// ```
pub const MUTARS_CACHE_ENV: &str = "MUTARS_CACHE";

/// Default cache directory name, created under the user's home directory.
pub const DEFAULT_CACHE_FOLDER: &str = ".mutars";

/// Field separator of MAF files.
pub const MAF_DELIMITER: u8 = b'\t';

/// Prefix of FASTA header lines.
pub const FASTA_HEADER_PREFIX: char = '>';
