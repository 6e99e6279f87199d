//! File I/O utilities with atomic writes
//!
//! Every write goes to a sibling temp file that is synced and then renamed
//! over the target, so a crash leaves either the old or the new contents.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinboardError, FinboardResult};

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> FinboardResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no file yet, using defaults");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| FinboardError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| FinboardError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> FinboardResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| FinboardError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Write arbitrary text to a file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> FinboardResult<()> {
    write_atomic(path, |writer| {
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| FinboardError::Io(format!("Failed to write data: {}", e)))
    })
}

fn write_atomic<P, F>(path: P, fill: F) -> FinboardResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> FinboardResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FinboardError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let file = File::create(temp_path)
        .map_err(|e| FinboardError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = fill(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| FinboardError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| FinboardError::Storage(format!("Failed to sync data: {}", e)))
    });

    drop(writer);

    if let Err(e) = written {
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        FinboardError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}
