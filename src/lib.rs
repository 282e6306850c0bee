//! `pkachu`: relevance search, filtering and export over pKa datasets.
//!
//! The engine lives in `pkachu-core` and is re-exported here so embedders
//! only need one dependency. This crate adds directory discovery and the
//! logging setup used by the command-line binary.

pub mod app_dirs;
pub mod logging;

pub use pkachu_core::*;
