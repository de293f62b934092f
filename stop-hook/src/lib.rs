pub mod counter;
pub mod decision;
pub mod promise;

// Re-export key types for convenience.
pub use counter::IterationCounter;
pub use decision::{
    run_stop_check, GitWorkProbe, ProbeError, StopContext, StopDecision, StopOutcome, StopReason,
    WorkProbe,
};
pub use promise::CompletionPromise;
