//! # Input/Output utilities for mutation data.
//!
//! Concrete implementations of the collaborators the reconciliation core is
//! fed by: a reader for MAF (Mutation Annotation Format) tables, a FASTA
//! reader for reference protein archives, and a fetcher that resolves a
//! source locator to a local file, downloading and caching it on first use.
//!
pub mod consts;
pub mod error;
pub mod fasta;
pub mod fetch;
pub mod maf;

// re-expose core functions
pub use consts::*;
pub use error::*;
pub use fasta::*;
pub use fetch::*;
pub use maf::*;
