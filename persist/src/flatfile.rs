//! Raw flat-file helpers for the counter and promise files the hooks
//! keep next to the session state.

use std::path::Path;

use crate::state::StateError;

/// Read a decimal counter from a flat file. A missing file reads as 0;
/// garbage content is an error.
pub fn read_counter(path: &Path) -> Result<u32, StateError> {
    if !path.exists() {
        return Ok(0);
    }
    let text = std::fs::read_to_string(path).map_err(|e| StateError::Io(e.to_string()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|e| StateError::Serialization(format!("bad counter value '{trimmed}': {e}")))
}

/// Write a decimal counter to a flat file, creating parent directories.
pub fn write_counter(path: &Path, value: u32) -> Result<(), StateError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StateError::Io(e.to_string()))?;
    }
    std::fs::write(path, format!("{value}\n")).map_err(|e| StateError::Io(e.to_string()))
}

/// Read a trimmed text file; `None` when the file is missing or blank.
pub fn read_text(path: &Path) -> Result<Option<String>, StateError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|e| StateError::Io(e.to_string()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Write a text file, creating parent directories.
pub fn write_text(path: &Path, text: &str) -> Result<(), StateError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StateError::Io(e.to_string()))?;
    }
    std::fs::write(path, text).map_err(|e| StateError::Io(e.to_string()))
}
