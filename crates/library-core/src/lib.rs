//! Core types for the project library.
//!
//! Catalog models, the monthly-revenue analyzer, display formatting, time
//! helpers, detail-section ordering and CLI settings. Nothing here touches
//! the catalog directory; loading lives in `library-data`.

pub mod error;
pub mod formatting;
pub mod labels;
pub mod models;
pub mod ordering;
pub mod revenue;
pub mod settings;
pub mod time_utils;

pub use error::{LibraryError, Result};
pub use models::Project;
