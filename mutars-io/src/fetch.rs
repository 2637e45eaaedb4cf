//! Caching file fetcher.
//!
//! Resolves a `(logical_name, locator)` pair to a local file. Remote sources
//! are downloaded once into the cache folder under their logical name and
//! served from there afterwards.

use std::env;
use std::fs::{create_dir_all, remove_file};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::home_dir;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use ureq::Error as UreqError;

use mutars_core::traits::Fetcher;

use crate::consts::{DEFAULT_CACHE_FOLDER, MUTARS_CACHE_ENV};
use crate::error::MafIoError;

/// Get default cache folder from environment variable, if not available then create it in home folder
///
/// # Returns
/// - path to cache folder
pub fn get_default_cache_folder() -> PathBuf {
    if let Ok(val) = env::var(MUTARS_CACHE_ENV) {
        PathBuf::from(val)
    } else {
        let home = env::var("HOME")
            .or_else(|_| {
                home_dir()
                    .map(|p| p.to_string_lossy().into_owned())
                    .ok_or(std::env::VarError::NotPresent)
            })
            .unwrap_or_else(|_| "/tmp".to_string());

        let mut path = PathBuf::from(home);
        path.push(DEFAULT_CACHE_FOLDER);
        path
    }
}

/// Where a locator points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Local(PathBuf),
    Remote(String),
}

impl Locator {
    ///
    /// Classify a locator string. `ftp://` URLs are rewritten to `https://`
    /// since the download client speaks HTTP only.
    pub fn parse(locator: &str) -> Locator {
        if let Some(path) = locator.strip_prefix("file://") {
            Locator::Local(PathBuf::from(path))
        } else if let Some(rest) = locator.strip_prefix("ftp://") {
            Locator::Remote(format!("https://{}", rest))
        } else if locator.starts_with("http://") || locator.starts_with("https://") {
            Locator::Remote(locator.to_string())
        } else {
            Locator::Local(PathBuf::from(locator))
        }
    }
}

/// Builder for constructing a [`CachingFetcher`] with custom configuration.
#[derive(Default)]
pub struct CachingFetcherBuilder {
    cache_folder: Option<PathBuf>,
}

impl CachingFetcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache folder for the fetcher.
    pub fn with_cache_folder(mut self, path: PathBuf) -> Self {
        self.cache_folder = Some(path);
        self
    }

    /// Consumes the builder and creates the cache folder if needed.
    pub fn finish(self) -> Result<CachingFetcher> {
        let raw_path = self.cache_folder.unwrap_or_else(get_default_cache_folder);
        let raw_str = raw_path.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw_str)
            .unwrap_or_else(|_| raw_str.clone().into())
            .into_owned();
        let cache_folder = PathBuf::from(expanded);
        create_dir_all(&cache_folder)
            .with_context(|| format!("Failed to create cache folder {:?}", cache_folder))?;

        Ok(CachingFetcher { cache_folder })
    }
}

///
/// Fetcher backed by a folder of downloaded files, one per logical name.
///
/// ```rust,no_run
/// use mutars_io::fetch::CachingFetcher;
/// use mutars_core::traits::Fetcher;
///
/// # fn main() -> anyhow::Result<()> {
/// let fetcher = CachingFetcher::builder().finish()?;
/// let path = fetcher.fetch("BRCA.maf", "https://example.org/brca.maf")?;
/// println!("Cached at: {:?}", path);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CachingFetcher {
    pub cache_folder: PathBuf,
}

impl CachingFetcher {
    pub fn builder() -> CachingFetcherBuilder {
        CachingFetcherBuilder::default()
    }

    ///
    /// Path a logical name is cached under. Names must be a single plain file name.
    pub fn cached_path(&self, logical_name: &str) -> Result<PathBuf> {
        let is_plain = !logical_name.is_empty()
            && logical_name != "."
            && logical_name != ".."
            && !logical_name.contains(['/', '\\']);
        if !is_plain {
            return Err(MafIoError::InvalidLogicalName(logical_name.to_string()).into());
        }
        Ok(self.cache_folder.join(logical_name))
    }

    /// Location of a cached file, if it has been fetched already.
    pub fn seek(&self, logical_name: &str) -> Option<PathBuf> {
        self.cached_path(logical_name)
            .ok()
            .filter(|path| path.is_file())
    }

    /// Drop a cached file. Removing something that isn't cached is not an error.
    pub fn remove(&self, logical_name: &str) -> Result<()> {
        if let Some(path) = self.seek(logical_name) {
            remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
            info!(name = logical_name, "removed cached file");
        }
        Ok(())
    }

    ///
    /// Download `url` into the cache as `destination`. The body is streamed
    /// to a temporary file in the cache folder and renamed into place, so an
    /// interrupted download never leaves a partial file under the final name.
    fn download(&self, url: &str, destination: &Path) -> Result<()> {
        info!(url, destination = %destination.display(), "downloading");

        let response = ureq::get(url).call().map_err(|e| {
            let reason = match e {
                UreqError::StatusCode(code) => format!("HTTP status {}", code),
                other => other.to_string(),
            };
            MafIoError::Download {
                url: url.to_string(),
                reason,
            }
        })?;

        let mut tmp = NamedTempFile::new_in(&self.cache_folder)?;
        let mut body = response.into_body().into_reader();
        std::io::copy(&mut body, &mut tmp).map_err(|e| MafIoError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tmp.persist(destination).map_err(|e| e.error)?;

        Ok(())
    }
}

impl Fetcher for CachingFetcher {
    fn fetch(&self, logical_name: &str, locator: &str) -> Result<PathBuf> {
        match Locator::parse(locator) {
            Locator::Local(path) => {
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(MafIoError::LocalSourceNotFound(locator.to_string()).into())
                }
            }
            Locator::Remote(url) => {
                if locator.starts_with("ftp://") {
                    warn!(locator, url = %url, "ftp is not supported, fetching over https");
                }
                let destination = self.cached_path(logical_name)?;
                if destination.is_file() {
                    info!(name = logical_name, "using cached file");
                    return Ok(destination);
                }
                self.download(&url, &destination)?;
                Ok(destination)
            }
        }
    }
}
