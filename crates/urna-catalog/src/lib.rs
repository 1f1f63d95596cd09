//! Ballot-unit catalog for urna.
//!
//! A region's catalog is a nested registry of councils, zones and sections.
//! This crate parses it into explicit record types and flattens it into the
//! ordered list of [`Identifier`]s the fetch pipeline works on.
//!
//! # Architecture
//!
//! - [`record`] - Typed catalog records, validated at parse time
//! - [`reader`] - File loading and flattening
//! - [`summary`] - Per-region counts

mod error;
mod id;
pub mod reader;
pub mod record;
pub mod summary;

pub use error::{CatalogError, Result};
pub use id::Identifier;
pub use reader::{CatalogReader, catalog_file_name, flatten, parse_region, parse_region_str};
pub use record::{Catalog, Council, RegionRecord, Section, Zone};
pub use summary::{
    BATCHED_SECS_PER_UNIT, CatalogSummary, SEQUENTIAL_SECS_PER_UNIT, projected_secs, summarize,
    total_units,
};
