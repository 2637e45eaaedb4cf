//! # mutars
//!
//! Umbrella crate for the mutars tools. Each member crate is behind a cargo
//! feature of the same name:
//!
//! - `core`: the `MafTable` and `MutationRecord` data model and collaborator traits
//! - `io`: MAF and FASTA readers and the caching file fetcher
//! - `verify`: protein change parsing, the RefSeq protein index and the verifier
//! - `cohort`: cohort catalogs and merged cohort loading

#[cfg(feature = "core")]
#[doc(inline)]
pub use mutars_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use mutars_io as io;

#[cfg(feature = "verify")]
#[doc(inline)]
pub use mutars_verify as verify;

#[cfg(feature = "cohort")]
#[doc(inline)]
pub use mutars_cohort as cohort;
