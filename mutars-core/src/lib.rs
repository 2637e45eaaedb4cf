//! # Core data model for mutars
//!
//! Shared types for the mutars crates: the [`models::MafTable`] table
//! abstraction that merged mutation annotation files are held in, the
//! [`models::MutationRecord`] rows that get verified against reference
//! proteins, and the [`traits`] implemented by the file fetcher and parsers.

pub mod consts;
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;
