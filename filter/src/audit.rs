use serde::{Deserialize, Serialize};

use crate::rules::GuardVerdict;

/// A single audit log entry. The command is stored post-redaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub command: String,
    pub decision: String,
    pub rule: Option<String>,
    pub reason: Option<String>,
    pub timestamp: String,
}

/// Bounded audit log buffer; oldest entries are evicted first.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
    max_entries: usize,
}

impl AuditLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn record(&mut self, command: &str, verdict: &GuardVerdict) {
        let id = format!("audit-{}", self.entries.len() + 1);
        let decision = match serde_json::to_value(verdict.decision) {
            Ok(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };
        self.entries.push(AuditEntry {
            id,
            command: command.into(),
            decision,
            rule: verdict.rule.clone(),
            reason: verdict.reason.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GuardDecision, GuardVerdict};

    fn verdict(decision: GuardDecision, rule: Option<&str>) -> GuardVerdict {
        GuardVerdict {
            decision,
            rule: rule.map(String::from),
            reason: rule.map(|r| format!("{r} matched")),
        }
    }

    #[test]
    fn test_new_audit_log_is_empty() {
        let log = AuditLog::new(100);
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_record_entry() {
        let mut log = AuditLog::new(100);
        log.record("ls -la", &verdict(GuardDecision::Allow, None));
        assert_eq!(log.len(), 1);

        let entry = &log.entries()[0];
        assert_eq!(entry.id, "audit-1");
        assert_eq!(entry.command, "ls -la");
        assert_eq!(entry.decision, "allow");
        assert!(entry.rule.is_none());
        assert!(!entry.timestamp.is_empty());
    }

    #[test]
    fn test_record_block_with_rule() {
        let mut log = AuditLog::new(100);
        log.record(
            "git push --force",
            &verdict(GuardDecision::Block, Some("git-force-push")),
        );
        let entry = &log.entries()[0];
        assert_eq!(entry.decision, "block");
        assert_eq!(entry.rule.as_deref(), Some("git-force-push"));
        assert!(entry.reason.is_some());
    }

    #[test]
    fn test_max_entries_cap() {
        let mut log = AuditLog::new(3);
        for cmd in ["a", "b", "c", "d"] {
            log.record(cmd, &verdict(GuardDecision::Allow, None));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].command, "b");
        assert_eq!(log.entries()[2].command, "d");
    }

    #[test]
    fn test_audit_entry_serialization() {
        let mut log = AuditLog::new(10);
        log.record("echo hi", &verdict(GuardDecision::Warn, Some("production-keyword")));
        let json = serde_json::to_string(&log.entries()[0]).unwrap();
        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.command, "echo hi");
        assert_eq!(parsed.decision, "warn");
    }
}
