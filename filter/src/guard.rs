use crate::audit::AuditLog;
use crate::redact::RedactionPolicy;
use crate::rules::{GuardDecision, GuardVerdict, RuleSet};
use crate::scope::{CommandScope, FilesystemScope};

/// Full filter pipeline: regex rule set, then command scope for shell
/// commands or path scope for file writes, with the redacted input
/// recorded in the audit log.
#[derive(Debug, Clone)]
pub struct Guard {
    rules: RuleSet,
    scope: CommandScope,
    paths: FilesystemScope,
    redaction: RedactionPolicy,
    audit: AuditLog,
}

impl Guard {
    pub fn new(rules: RuleSet, scope: CommandScope) -> Self {
        Self {
            rules,
            scope,
            paths: FilesystemScope::default(),
            redaction: RedactionPolicy::new(),
            audit: AuditLog::new(256),
        }
    }

    /// Guard with the builtin rule set and an open command scope.
    pub fn with_defaults() -> Self {
        Self::new(RuleSet::builtin(), CommandScope::default())
    }

    pub fn with_paths(mut self, paths: FilesystemScope) -> Self {
        self.paths = paths;
        self
    }

    /// Evaluate a command and record the (redacted) outcome.
    pub fn check(&mut self, command: &str) -> GuardVerdict {
        let mut verdict = self.rules.evaluate(command);
        // Scope only tightens: it cannot downgrade a rule Block.
        if verdict.decision != GuardDecision::Block && !self.scope.is_command_allowed(command) {
            verdict = GuardVerdict {
                decision: GuardDecision::Block,
                rule: Some("command-scope".into()),
                reason: Some("command is outside the configured scope".into()),
            };
        }
        let redacted = self.redaction.redact(command);
        self.audit.record(&redacted, &verdict);
        verdict
    }

    /// Evaluate a target path for a file-writing tool and record the
    /// outcome.
    pub fn check_path(&mut self, path: &str) -> GuardVerdict {
        let verdict = if self.paths.is_path_allowed(path) {
            GuardVerdict {
                decision: GuardDecision::Allow,
                rule: None,
                reason: None,
            }
        } else {
            GuardVerdict {
                decision: GuardDecision::Block,
                rule: Some("path-scope".into()),
                reason: Some("path is outside the writable scope".into()),
            }
        };
        self.audit.record(path, &verdict);
        verdict
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }
}
