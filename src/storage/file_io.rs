//! JSON file helpers
//!
//! Writes go to a sibling temp file that is synced and renamed over the
//! target, so a crash leaves either the old snapshot or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{BudgetError, BudgetResult};

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> BudgetError {
    BudgetError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> BudgetResult<T> {
    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Read JSON from `path`, or `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> BudgetResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "file absent, using defaults");
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from `path`, failing when the file is absent
pub fn read_json_required<T, P>(path: P) -> BudgetResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(BudgetError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

/// Write `data` as pretty JSON to `path`, atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> BudgetResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", &temp_path, e))?;
    writer
        .flush()
        .map_err(|e| storage_error("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_error("replace", path, e)
    })?;

    tracing::debug!(path = %path.display(), "wrote json");
    Ok(())
}
