use tracing::info;

use mutars_core::consts::COHORT_COLUMN;
use mutars_core::models::MafTable;
use mutars_core::traits::{Fetcher, TableParser};

use crate::catalog::CohortCatalog;
use crate::error::{CohortError, CohortResult};

/// Which cohorts of a catalog to load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CohortSelector {
    /// Every cohort, in catalog order
    #[default]
    All,
    One(String),
    /// The named cohorts, in the order given
    Many(Vec<String>),
}

impl CohortSelector {
    /// No names means every cohort.
    pub fn from_names(mut names: Vec<String>) -> Self {
        match names.len() {
            0 => CohortSelector::All,
            1 => CohortSelector::One(names.remove(0)),
            _ => CohortSelector::Many(names),
        }
    }

    ///
    /// Resolve the selection to cohort names, checking every requested name
    /// against the catalog before anything is fetched.
    ///
    pub fn resolve<'a>(&'a self, catalog: &'a CohortCatalog) -> CohortResult<Vec<&'a str>> {
        let names: Vec<&str> = match self {
            CohortSelector::All => catalog.names().collect(),
            CohortSelector::One(name) => vec![name.as_str()],
            CohortSelector::Many(names) => names.iter().map(String::as_str).collect(),
        };

        if let Some(unknown) = names.iter().find(|name| !catalog.contains(name)) {
            return Err(CohortError::UnknownCohort(unknown.to_string()));
        }
        if names.is_empty() {
            return Err(CohortError::EmptySelection);
        }
        Ok(names)
    }
}

impl From<Option<&str>> for CohortSelector {
    fn from(name: Option<&str>) -> Self {
        match name {
            Some(name) => CohortSelector::One(name.to_string()),
            None => CohortSelector::All,
        }
    }
}

/// File name a cohort's MAF is cached under, e.g. `BRCA.maf` or `BRCA.maf.gz`.
pub fn cohort_file_name(name: &str, locator: &str) -> String {
    if locator.ends_with(".gz") {
        format!("{}.maf.gz", name)
    } else {
        format!("{}.maf", name)
    }
}

///
/// Load the selected cohorts into one table.
///
/// Each cohort's MAF is fetched, parsed and tagged with the cohort name under
/// the `Cancer Type` column; the tables are then stacked in cohort order with
/// the rows of each cohort in file order.
///
/// # Arguments
/// - selector: cohorts to load
/// - catalog: cohort name to source mapping
/// - fetcher: resolves a locator to a local file
/// - parser: reads a MAF file into a table
pub fn load_cohorts<F, P>(
    selector: &CohortSelector,
    catalog: &CohortCatalog,
    fetcher: &F,
    parser: &P,
) -> CohortResult<MafTable>
where
    F: Fetcher + ?Sized,
    P: TableParser + ?Sized,
{
    let names = selector.resolve(catalog)?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let source = catalog
            .get(name)
            .ok_or_else(|| CohortError::UnknownCohort(name.to_string()))?;
        let mut table = load_cohort(name, &source.locator, fetcher, parser).map_err(|err| {
            CohortError::Source {
                name: name.to_string(),
                source: err,
            }
        })?;
        table.push_constant_column(COHORT_COLUMN, name);
        info!(cohort = name, rows = table.n_rows(), "loaded cohort");
        tables.push(table);
    }

    let merged = MafTable::concat(tables);
    info!(
        rows = merged.n_rows(),
        columns = merged.n_columns(),
        "merged cohort tables"
    );
    Ok(merged)
}

fn load_cohort<F, P>(name: &str, locator: &str, fetcher: &F, parser: &P) -> anyhow::Result<MafTable>
where
    F: Fetcher + ?Sized,
    P: TableParser + ?Sized,
{
    let path = fetcher.fetch(&cohort_file_name(name, locator), locator)?;
    parser.parse_table(&path)
}
