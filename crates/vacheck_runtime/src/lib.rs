//! Record files, reports, serialization, and the `vacheck` command-line tool.
//!
//! This crate provides:
//! - [`RecordSet`] - Reading and writing record files against a codebook
//! - [`OutcomeReport`] - A self-contained view of one checked record
//! - [`render_text`] - The pass-by-pass discrepancy log
//! - JSON and `MessagePack` serialization of reports
//! - [`cli`] - Argument parsing and execution for the binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod records;
pub mod report;
pub mod serialize;

pub use cli::{Args, OutputFormat, RunSummary, execute};
pub use records::RecordSet;
pub use report::{CorrectionRecord, OutcomeReport, render_text};
pub use serialize::{from_msgpack, load_from_file, save_to_file, to_json, to_msgpack};
