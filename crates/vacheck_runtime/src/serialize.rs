//! Report serialization using JSON and `MessagePack`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use vacheck_foundation::{Error, Result};

use crate::report::OutcomeReport;

/// Serializes reports to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(reports: &[OutcomeReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).map_err(|e| Error::serialization(e.to_string()))
}

/// Serializes reports to `MessagePack`, keeping field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_msgpack(reports: &[OutcomeReport]) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(reports).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes reports from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_msgpack(bytes: &[u8]) -> Result<Vec<OutcomeReport>> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
}

/// Saves reports to a file as `MessagePack`.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(reports: &[OutcomeReport], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    let bytes = to_msgpack(reports)?;

    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush file '{}': {e}", path.display())))?;

    Ok(())
}

/// Loads reports from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<OutcomeReport>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;

    from_msgpack(&bytes)
}
