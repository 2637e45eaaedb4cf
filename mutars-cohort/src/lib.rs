//! # Cohort loading
//!
//! A cohort catalog maps cancer cohort names (e.g. `BRCA`) to the location of
//! their mutation annotation file. [load_cohorts] fetches the selected
//! cohorts, tags each row with its cohort and merges everything into one
//! [mutars_core::models::MafTable].

pub mod catalog;
pub mod error;
pub mod loader;

pub use catalog::{CatalogFileType, CohortCatalog, CohortSource};
pub use error::{CohortError, CohortResult};
pub use loader::{CohortSelector, cohort_file_name, load_cohorts};
