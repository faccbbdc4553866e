//! Spreadsheet export
//!
//! - [`schema`] - per-request column layout computation
//! - [`renderer`] - xlsx painting over the computed schema

pub mod renderer;
pub mod schema;

pub use renderer::{ExportData, ExportFile, ExportRow, load, render};
pub use schema::{Column, ColumnRole, TableKind, build_columns};
