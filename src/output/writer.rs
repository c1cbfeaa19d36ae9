//! JSON snapshot writer

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Indentation of snapshot files
const INDENT: &[u8] = b"    ";

/// Writes snapshot files into one directory
#[derive(Debug, Clone)]
pub struct JsonWriter {
    dir: PathBuf,
}

impl JsonWriter {
    /// Create a writer for a directory (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path a file name would be written to
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Write items as a top-level JSON array, returning the file path
    pub fn write(&self, file_name: &str, items: &[Value]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::output(format!(
                "Failed to create output directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(file_name);
        let file = File::create(&path).map_err(|e| {
            Error::output(format!("Failed to create {}: {e}", path.display()))
        })?;

        let mut writer = BufWriter::new(file);
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        items.serialize(&mut ser)?;
        writer.flush()?;

        debug!(path = %path.display(), items = items.len(), "Wrote snapshot");
        Ok(path)
    }
}

/// Read a snapshot file back into its items
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}
