//! Loading cohorts from a catalog file with the real fetcher and MAF reader.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use mutars_cohort::{CohortCatalog, CohortError, CohortSelector, load_cohorts};
use mutars_core::models::MutationRecord;
use mutars_io::{CachingFetcher, MafReader};

#[test]
fn test_load_local_cohorts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let brca = dir.path().join("brca.maf");
    let luad = dir.path().join("luad.maf");
    fs::write(
        &brca,
        "#version 2.4\nRefseq_prot_Id\tProtein_Change\nNP_000001\tp.M1T\nNP_000002\tNA\n",
    )
    .expect("Failed to write");
    fs::write(
        &luad,
        "#version 2.4\n#more\n#and more\nRefseq_prot_Id\tProtein_Change\tHugo_Symbol\nNP_000003\tp.K2R\tKRAS\n",
    )
    .expect("Failed to write");

    let catalog_path = dir.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        format!(
            "[[cohorts]]\nname = \"BRCA\"\nlocator = {:?}\n\n[[cohorts]]\nname = \"LUAD\"\nlocator = {:?}\n",
            brca.display().to_string(),
            luad.display().to_string()
        ),
    )
    .expect("Failed to write");

    let catalog = CohortCatalog::from_path(&catalog_path).expect("Failed to read catalog");
    let fetcher = CachingFetcher::builder()
        .with_cache_folder(dir.path().join("cache"))
        .finish()
        .expect("Failed to create fetcher");

    let table = load_cohorts(&CohortSelector::All, &catalog, &fetcher, &MafReader::new())
        .expect("Failed to load cohorts");

    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.get(2, "Hugo_Symbol"), Some("KRAS"));
    assert_eq!(table.get(0, "Hugo_Symbol"), None);

    let records = MutationRecord::from_table(&table).expect("Failed to extract records");
    let summary: Vec<(String, Option<String>)> = records
        .iter()
        .map(|r| (r.to_string(), r.cohort.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("NP_000001:p.M1T".to_string(), Some("BRCA".to_string())),
            ("NP_000003:p.K2R".to_string(), Some("LUAD".to_string())),
        ]
    );

    // local sources are used in place, nothing lands in the cache
    assert_eq!(fetcher.seek("BRCA.maf"), None);

    let missing = load_cohorts(
        &CohortSelector::One("OV".to_string()),
        &catalog,
        &fetcher,
        &MafReader::new(),
    );
    assert!(matches!(missing, Err(CohortError::UnknownCohort(_))));
}
