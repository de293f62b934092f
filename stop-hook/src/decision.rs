use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::promise::CompletionPromise;

/// Whether the assistant may stop, or must keep iterating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopDecision {
    AllowStop,
    /// Block the stop and re-inject this prompt.
    Continue { prompt: String },
}

/// Why the decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A stop hook already fired this turn; never re-enter.
    StopHookLoop,
    /// The completion promise appeared in the last output.
    PromiseDetected,
    /// The iteration cap was reached.
    MaxIterations,
    /// Uncommitted work remains; the loop continues.
    PendingWork,
    /// Nothing left to do.
    NothingPending,
}

/// Full outcome of a stop check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopOutcome {
    pub decision: StopDecision,
    pub reason: StopReason,
    /// Human-readable notes about the checks that ran.
    pub messages: Vec<String>,
}

impl StopOutcome {
    /// Exit code for the hook process: 0 allows the stop, 2 blocks it.
    pub fn exit_code(&self) -> i32 {
        match self.decision {
            StopDecision::AllowStop => 0,
            StopDecision::Continue { .. } => 2,
        }
    }
}

/// Probe for work that should keep the loop alive.
pub trait WorkProbe {
    /// A short summary of pending work, or `None` when clean.
    fn pending_work(&self) -> Result<Option<String>, ProbeError>;
}

#[derive(Debug, thiserror::Error)]
#[error("work probe failed: {0}")]
pub struct ProbeError(pub String);

/// Probe backed by `git status --porcelain` in a working directory.
#[derive(Debug, Clone)]
pub struct GitWorkProbe {
    workdir: PathBuf,
}

impl GitWorkProbe {
    pub fn new(workdir: &Path) -> Self {
        Self { workdir: workdir.to_path_buf() }
    }
}

impl WorkProbe for GitWorkProbe {
    fn pending_work(&self) -> Result<Option<String>, ProbeError> {
        let output = Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| ProbeError(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError(stderr.trim().to_string()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let changed = stdout.lines().filter(|l| !l.trim().is_empty()).count();
        if changed == 0 {
            Ok(None)
        } else {
            Ok(Some(format!("{changed} uncommitted change(s)")))
        }
    }
}

/// Inputs to one stop check.
#[derive(Debug, Clone, Default)]
pub struct StopContext<'a> {
    /// `stop_hook_active` from the hook input.
    pub stop_hook_active: bool,
    /// Last assistant output, scanned for the promise.
    pub last_output: Option<&'a str>,
    pub promise: Option<&'a CompletionPromise>,
    /// Iterations already spent (the persisted counter).
    pub iteration: u32,
    /// 0 disables the cap.
    pub max_iterations: u32,
    /// Prompt to re-inject when continuing.
    pub prompt: Option<&'a str>,
}

const DEFAULT_CONTINUE_PROMPT: &str =
    "There is still uncommitted work. Continue until it is finished and committed.";

/// The stop decision procedure: a fixed sequence of checks, first hit
/// wins.
pub fn run_stop_check(ctx: &StopContext<'_>, probe: &dyn WorkProbe) -> StopOutcome {
    let mut messages = Vec::new();

    // Re-entry guard
    if ctx.stop_hook_active {
        return StopOutcome {
            decision: StopDecision::AllowStop,
            reason: StopReason::StopHookLoop,
            messages: vec!["stop hook already ran this turn".into()],
        };
    }

    // Promise check runs before the cap so a finished loop exits clean
    // even on its last allowed iteration.
    if let (Some(promise), Some(output)) = (ctx.promise, ctx.last_output) {
        if promise.detect(output) {
            return StopOutcome {
                decision: StopDecision::AllowStop,
                reason: StopReason::PromiseDetected,
                messages: vec![format!("completion promise '{}' detected", promise.text())],
            };
        }
        messages.push("completion promise not found in output".into());
    }

    if ctx.max_iterations > 0 && ctx.iteration >= ctx.max_iterations {
        messages.push(format!(
            "iteration cap reached: {}/{}",
            ctx.iteration, ctx.max_iterations
        ));
        return StopOutcome {
            decision: StopDecision::AllowStop,
            reason: StopReason::MaxIterations,
            messages,
        };
    }

    match probe.pending_work() {
        Ok(Some(summary)) => {
            messages.push(format!("pending work: {summary}"));
            let prompt = ctx.prompt.unwrap_or(DEFAULT_CONTINUE_PROMPT).to_string();
            StopOutcome {
                decision: StopDecision::Continue { prompt },
                reason: StopReason::PendingWork,
                messages,
            }
        }
        Ok(None) => {
            messages.push("working tree clean".into());
            StopOutcome {
                decision: StopDecision::AllowStop,
                reason: StopReason::NothingPending,
                messages,
            }
        }
        // A broken probe must not trap the session; allow and say why.
        Err(err) => {
            messages.push(format!("work probe unavailable: {err}"));
            StopOutcome {
                decision: StopDecision::AllowStop,
                reason: StopReason::NothingPending,
                messages,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProbe(Result<Option<String>, String>);

    impl WorkProbe for FakeProbe {
        fn pending_work(&self) -> Result<Option<String>, ProbeError> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(ProbeError(e.clone())),
            }
        }
    }

    fn clean() -> FakeProbe {
        FakeProbe(Ok(None))
    }

    fn dirty() -> FakeProbe {
        FakeProbe(Ok(Some("3 uncommitted change(s)".into())))
    }

    #[test]
    fn test_reentry_guard_allows_immediately() {
        let ctx = StopContext {
            stop_hook_active: true,
            ..Default::default()
        };
        let outcome = run_stop_check(&ctx, &dirty());
        assert_eq!(outcome.decision, StopDecision::AllowStop);
        assert_eq!(outcome.reason, StopReason::StopHookLoop);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_promise_detected_allows_stop() {
        let promise = CompletionPromise::new("ALL TESTS PASS");
        let ctx = StopContext {
            last_output: Some("final report: ALL TESTS PASS"),
            promise: Some(&promise),
            ..Default::default()
        };
        // Promise wins even with pending work.
        let outcome = run_stop_check(&ctx, &dirty());
        assert_eq!(outcome.decision, StopDecision::AllowStop);
        assert_eq!(outcome.reason, StopReason::PromiseDetected);
    }

    #[test]
    fn test_promise_beats_iteration_cap() {
        let promise = CompletionPromise::new("DONE");
        let ctx = StopContext {
            last_output: Some("DONE"),
            promise: Some(&promise),
            iteration: 10,
            max_iterations: 10,
            ..Default::default()
        };
        let outcome = run_stop_check(&ctx, &clean());
        assert_eq!(outcome.reason, StopReason::PromiseDetected);
    }

    #[test]
    fn test_iteration_cap_allows_stop() {
        let ctx = StopContext {
            iteration: 5,
            max_iterations: 5,
            ..Default::default()
        };
        let outcome = run_stop_check(&ctx, &dirty());
        assert_eq!(outcome.decision, StopDecision::AllowStop);
        assert_eq!(outcome.reason, StopReason::MaxIterations);
    }

    #[test]
    fn test_zero_cap_never_triggers() {
        let ctx = StopContext {
            iteration: 1000,
            max_iterations: 0,
            ..Default::default()
        };
        let outcome = run_stop_check(&ctx, &clean());
        assert_eq!(outcome.reason, StopReason::NothingPending);
    }

    #[test]
    fn test_pending_work_continues_with_stored_prompt() {
        let ctx = StopContext {
            prompt: Some("finish the migration"),
            max_iterations: 10,
            iteration: 2,
            ..Default::default()
        };
        let outcome = run_stop_check(&ctx, &dirty());
        assert_eq!(outcome.reason, StopReason::PendingWork);
        assert_eq!(outcome.exit_code(), 2);
        match outcome.decision {
            StopDecision::Continue { prompt } => assert_eq!(prompt, "finish the migration"),
            other => panic!("expected Continue, got {other:?}"),
        }
    }

    #[test]
    fn test_pending_work_without_prompt_uses_default() {
        let ctx = StopContext::default();
        let outcome = run_stop_check(&ctx, &dirty());
        match outcome.decision {
            StopDecision::Continue { prompt } => {
                assert!(prompt.contains("uncommitted work"));
            }
            other => panic!("expected Continue, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_tree_allows_stop() {
        let ctx = StopContext::default();
        let outcome = run_stop_check(&ctx, &clean());
        assert_eq!(outcome.decision, StopDecision::AllowStop);
        assert_eq!(outcome.reason, StopReason::NothingPending);
    }

    #[test]
    fn test_probe_failure_allows_stop_with_message() {
        let ctx = StopContext::default();
        let outcome = run_stop_check(&ctx, &FakeProbe(Err("not a git repository".into())));
        assert_eq!(outcome.decision, StopDecision::AllowStop);
        assert!(outcome
            .messages
            .iter()
            .any(|m| m.contains("not a git repository")));
    }

    #[test]
    fn test_promise_not_found_noted_in_messages() {
        let promise = CompletionPromise::new("NEVER SAID");
        let ctx = StopContext {
            last_output: Some("still working"),
            promise: Some(&promise),
            ..Default::default()
        };
        let outcome = run_stop_check(&ctx, &clean());
        assert!(outcome
            .messages
            .iter()
            .any(|m| m.contains("promise not found")));
    }

    #[test]
    fn test_git_probe_reports_error_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let probe = GitWorkProbe::new(dir.path());
        // A bare temp dir is not a repository.
        assert!(probe.pending_work().is_err());
    }
}
