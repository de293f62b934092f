use std::path::Path;

use warden_persist::flatfile::{read_text, write_text};
use warden_persist::StateError;

/// The magic string whose appearance in assistant output ends the
/// loop. Stored in a flat file next to the iteration counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPromise {
    text: String,
    case_insensitive: bool,
}

impl CompletionPromise {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            case_insensitive: false,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Load the promise from its flat file; `None` when the file is
    /// missing or blank (the promise check is then disabled).
    pub fn load(path: &Path) -> Result<Option<Self>, StateError> {
        Ok(read_text(path)?.map(|text| Self::new(&text)))
    }

    pub fn store(&self, path: &Path) -> Result<(), StateError> {
        write_text(path, &self.text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the promise appears in the given output.
    pub fn detect(&self, output: &str) -> bool {
        if self.text.is_empty() {
            return false;
        }
        if self.case_insensitive {
            output.to_lowercase().contains(&self.text.to_lowercase())
        } else {
            output.contains(&self.text)
        }
    }
}
