//! Data layer for the project library.
//!
//! Loads the catalog from a directory of `project-*.json` files, filters and
//! ranks it, and keeps the user's favorites, likes, read markers and voyage
//! requests on disk.

pub mod filter;
pub mod flags;
pub mod ranking;
pub mod reader;

pub use library_core as core;
