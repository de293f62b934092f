use std::path::{Path, PathBuf};

use warden_persist::flatfile::{read_counter, write_counter};
use warden_persist::StateError;

/// File-backed iteration counter. The file holds a single decimal
/// value; a missing file reads as 0.
#[derive(Debug, Clone)]
pub struct IterationCounter {
    path: PathBuf,
}

impl IterationCounter {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    pub fn current(&self) -> Result<u32, StateError> {
        read_counter(&self.path)
    }

    /// Increment and persist, returning the new value.
    pub fn increment(&self) -> Result<u32, StateError> {
        let next = self.current()?.saturating_add(1);
        write_counter(&self.path, next)?;
        Ok(next)
    }

    pub fn reset(&self) -> Result<(), StateError> {
        write_counter(&self.path, 0)
    }

    /// Iterations left before the cap; `None` when max is 0 (no cap).
    pub fn remaining(&self, max: u32) -> Result<Option<u32>, StateError> {
        if max == 0 {
            return Ok(None);
        }
        Ok(Some(max.saturating_sub(self.current()?)))
    }
}
