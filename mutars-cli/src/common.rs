//! Arguments and steps shared by the subcommands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use mutars_cohort::{CohortCatalog, CohortSelector, load_cohorts};
use mutars_core::models::{MafTable, MutationRecord};
use mutars_core::traits::{Fetcher, SequenceParser};
use mutars_io::{CachingFetcher, FastaReader, MafReader, get_default_cache_folder};
use mutars_verify::{
    DuplicatePolicy, IndexBuildStats, ReferenceSequenceIndex, VerificationReport,
    verify_mutations,
};

pub const REFSEQ_PROTEIN_NAME: &str = "refseq_protein.faa";
pub const DEFAULT_THREAD_COUNT: usize = 4;

pub fn catalog_args() -> Vec<Arg> {
    vec![
        Arg::new("catalog")
            .long("catalog")
            .short('c')
            .value_name("FILE")
            .required(true)
            .help("Cohort catalog (.yaml, .yml or .toml) mapping cohort names to MAF locations"),
        Arg::new("cohort")
            .long("cohort")
            .value_name("NAME")
            .action(ArgAction::Append)
            .help("Cohort to load, may be repeated (default: every cohort in the catalog)"),
        Arg::new("cache-folder")
            .long("cache-folder")
            .short('f')
            .value_name("DIR")
            .help("Cache folder path (default: $MUTARS_CACHE or ~/.mutars)"),
    ]
}

pub fn verification_args() -> Vec<Arg> {
    vec![
        Arg::new("refseq")
            .long("refseq")
            .value_name("LOCATOR")
            .help(
                "RefSeq protein FASTA, URL or path (default: the catalog's refseq_protein). \
                 Headers must be pipe-delimited with the accession in the fourth field, \
                 e.g. >gi|12345|ref|NP_000001.2|description",
            ),
        Arg::new("threads")
            .short('t')
            .long("threads")
            .value_name("NUMBER")
            .value_parser(clap::value_parser!(usize))
            .help("Number of threads for verification (default: 4)"),
    ]
}

pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

pub fn configure_threads(matches: &ArgMatches) {
    let thread_count = matches
        .get_one::<usize>("threads")
        .copied()
        .unwrap_or(DEFAULT_THREAD_COUNT);

    // the global pool can only be set up once per process
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build_global()
    {
        debug!("Thread pool already configured: {}", e);
    }
}

pub fn build_fetcher(matches: &ArgMatches) -> Result<CachingFetcher> {
    let cache_folder = matches
        .get_one::<String>("cache-folder")
        .map(PathBuf::from)
        .unwrap_or_else(get_default_cache_folder);

    CachingFetcher::builder()
        .with_cache_folder(cache_folder)
        .finish()
        .context("Failed to set up the file cache")
}

pub fn read_catalog(matches: &ArgMatches) -> Result<CohortCatalog> {
    let path = matches
        .get_one::<String>("catalog")
        .context("A cohort catalog is required")?;
    let path = Path::new(path);
    CohortCatalog::from_path(path).with_context(|| format!("Failed to read catalog {:?}", path))
}

pub fn cohort_selector(matches: &ArgMatches) -> CohortSelector {
    let names = matches
        .get_many::<String>("cohort")
        .map(|names| names.cloned().collect())
        .unwrap_or_default();
    CohortSelector::from_names(names)
}

/// Fetch, parse and merge the selected cohorts.
pub fn load_cohort_table(
    matches: &ArgMatches,
    catalog: &CohortCatalog,
    fetcher: &CachingFetcher,
) -> Result<MafTable> {
    let selector = cohort_selector(matches);
    let pb = spinner("Loading cohorts")?;
    let table = load_cohorts(&selector, catalog, fetcher, &MafReader::new())?;
    pb.finish_with_message(format!("Loaded {} mutations", table.n_rows()));
    Ok(table)
}

fn refseq_file_name(locator: &str) -> String {
    if locator.ends_with(".gz") {
        format!("{}.gz", REFSEQ_PROTEIN_NAME)
    } else {
        REFSEQ_PROTEIN_NAME.to_string()
    }
}

///
/// Describe an index that came out empty or mostly malformed, which usually
/// means the archive headers are not in the pipe-delimited RefSeq form.
///
pub fn index_stats_warning(stats: &IndexBuildStats) -> Option<String> {
    if stats.records_seen == 0 {
        return None;
    }
    if stats.indexed == 0 {
        return Some(format!(
            "No reference proteins indexed from {} records; headers must look like \
             >gi|12345|ref|NP_000001.2|description",
            stats.records_seen
        ));
    }
    if stats.skipped_malformed * 2 > stats.records_seen {
        return Some(format!(
            "{} of {} reference headers are not pipe-delimited and were skipped",
            stats.skipped_malformed, stats.records_seen
        ));
    }
    None
}

/// Fetch the RefSeq protein archive and index it by accession.
pub fn load_reference_index(
    matches: &ArgMatches,
    catalog: &CohortCatalog,
    fetcher: &CachingFetcher,
) -> Result<ReferenceSequenceIndex> {
    let locator = matches
        .get_one::<String>("refseq")
        .map(String::as_str)
        .or(catalog.refseq_protein.as_deref())
        .context("No reference protein archive: pass --refseq or set refseq_protein in the catalog")?;

    let pb = spinner(format!("Indexing reference proteins from {}", locator))?;
    let path = fetcher.fetch(&refseq_file_name(locator), locator)?;
    let sequences = FastaReader
        .parse_sequences(&path)
        .with_context(|| format!("Failed to parse reference proteins {:?}", path))?;
    let (index, stats) = ReferenceSequenceIndex::build_with_stats(sequences, DuplicatePolicy::LastWins);
    pb.finish_with_message(format!(
        "Indexed {} of {} reference proteins",
        stats.indexed, stats.records_seen
    ));
    if let Some(message) = index_stats_warning(&stats) {
        warn!(locator, "{}", message);
    }
    Ok(index)
}

/// Everything `verify` and `peptides` have in common: load, index, verify.
pub fn run_verification(
    matches: &ArgMatches,
) -> Result<(Vec<MutationRecord>, ReferenceSequenceIndex, VerificationReport)> {
    configure_threads(matches);

    let catalog = read_catalog(matches)?;
    let fetcher = build_fetcher(matches)?;
    let table = load_cohort_table(matches, &catalog, &fetcher)?;
    let records = MutationRecord::from_table(&table)?;
    info!(records = records.len(), "extracted protein changes");

    let index = load_reference_index(matches, &catalog, &fetcher)?;
    let report = verify_mutations(&records, &index);

    Ok((records, index, report))
}
