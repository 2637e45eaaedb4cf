use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CohortError, CohortResult};

/// Where one cohort's mutation table comes from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CohortSource {
    /// Cohort name, e.g. `BRCA`. Rows loaded from this source are tagged with it.
    pub name: String,
    /// URL or local path of the MAF file
    pub locator: String,
}

///
/// Ordered mapping from cohort name to source locator, plus the optional
/// location of the reference protein archive.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CohortCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refseq_protein: Option<String>,
    #[serde(default)]
    pub cohorts: Vec<CohortSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFileType {
    Yaml,
    Toml,
}

impl CatalogFileType {
    pub fn from_path(path: &Path) -> CohortResult<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("yaml") | Some("yml") => Ok(CatalogFileType::Yaml),
            Some("toml") => Ok(CatalogFileType::Toml),
            _ => Err(CohortError::InvalidCatalogType(path.to_path_buf())),
        }
    }
}

impl CohortCatalog {
    ///
    /// Build a catalog from `(name, locator)` pairs, rejecting repeated names.
    ///
    pub fn from_entries<I, N, L>(entries: I) -> CohortResult<Self>
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: Into<String>,
    {
        let catalog = CohortCatalog {
            refseq_protein: None,
            cohorts: entries
                .into_iter()
                .map(|(name, locator)| CohortSource {
                    name: name.into(),
                    locator: locator.into(),
                })
                .collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> CohortResult<Self> {
        let catalog: CohortCatalog = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> CohortResult<Self> {
        let catalog: CohortCatalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    ///
    /// Load a catalog file, picking the format from its extension.
    ///
    /// # Arguments
    /// - path: path to a `.yaml`, `.yml` or `.toml` catalog
    pub fn from_path(path: &Path) -> CohortResult<Self> {
        let file_type = CatalogFileType::from_path(path)?;
        let content = read_to_string(path)?;
        match file_type {
            CatalogFileType::Yaml => Self::from_yaml_str(&content),
            CatalogFileType::Toml => Self::from_toml_str(&content),
        }
    }

    fn validate(&self) -> CohortResult<()> {
        for (i, source) in self.cohorts.iter().enumerate() {
            if self.cohorts[..i].iter().any(|s| s.name == source.name) {
                return Err(CohortError::DuplicateCohort(source.name.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CohortSource> {
        self.cohorts.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Cohort names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cohorts.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}

impl TryFrom<&Path> for CohortCatalog {
    type Error = CohortError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        CohortCatalog::from_path(path)
    }
}
