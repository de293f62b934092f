pub mod audit;
pub mod guard;
pub mod redact;
pub mod rules;
pub mod scope;

// Re-export key types for convenience.
pub use audit::{AuditEntry, AuditLog};
pub use guard::Guard;
pub use redact::RedactionPolicy;
pub use rules::{GuardDecision, GuardRule, GuardVerdict, RuleSet, RuleSetError};
pub use scope::{CommandScope, FilesystemScope};
