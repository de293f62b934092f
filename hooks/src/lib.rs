pub mod event;
pub mod io;
pub mod transcript;

// Re-export key types for convenience.
pub use event::{HookEvent, HookRegistry, HookSpec};
pub use io::{HookDecision, HookInput, HookResponse};
pub use transcript::last_assistant_text;
