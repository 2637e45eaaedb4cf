use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CohortError {
    #[error("Unknown cohort: {0}")]
    UnknownCohort(String),
    #[error("Cohort {0} is listed more than once in the catalog")]
    DuplicateCohort(String),
    #[error("No cohorts selected")]
    EmptySelection,
    #[error(
        "Missing or invalid file extension for cohort catalog {0:?}. It must be `yaml`, `yml` or `toml`"
    )]
    InvalidCatalogType(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("Failed to load cohort {name}: {source:#}")]
    Source {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type CohortResult<T> = std::result::Result<T, CohortError>;
