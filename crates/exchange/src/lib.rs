//! Keyword ingestion, cluster rendering and export.
//!
//! Everything around the clustering engine that talks to files and
//! terminals: reading keyword lists, printing cluster tables and trees, and
//! writing CSV or JSON exports.

mod error;
mod export;
mod ingest;
mod render;

pub use error::{ExchangeError, Result};
pub use export::{export_csv, export_json, CsvOptions, CSV_HEADER};
pub use ingest::{parse_csv_upload, parse_keywords, read_keywords, KeywordSource};
pub use render::{render_table, render_tree, HierarchyNode};
