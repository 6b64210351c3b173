//! # Solremap Lib
//!
//! `solremap_lib` provides the preprocessing and configuration services used by the
//! `solremap` tool for Solidity contract projects.
//!
//! ## Solremap Lib Design
//!
//! `solremap_lib` provides the following facilities:
//! - Parse a `remappings.txt` style mapping file into an ordered remapping table.
//! - Rewrite the import lines of Solidity source text using the table.
//! - Load and validate a project configuration file: compiler settings, project
//!   paths, contract-size report settings, and network declarations.
//! - Resolve a declared network against the process environment with explicit
//!   errors for missing required values.

pub use self::error::SolremapError;
pub use self::preprocessor::ImportRemapper;
pub use self::remapping::{Remapping, RemappingTable};

pub mod config;
pub mod error;
mod json;
pub mod network;
pub mod preprocessor;
pub mod remapping;
