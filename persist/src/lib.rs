pub mod flatfile;
pub mod state;

// Re-export key types for convenience.
pub use flatfile::{read_counter, read_text, write_counter, write_text};
pub use state::{HookState, JsonFileStore, StateError, StateStore};
