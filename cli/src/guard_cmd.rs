use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;
use warden_filter::{CommandScope, FilesystemScope, Guard, GuardDecision, RuleSet};
use warden_hooks::{HookEvent, HookInput, HookResponse};

#[derive(Debug, Args)]
pub struct GuardArgs {
    /// Command prefixes to allow; empty allows everything not denied.
    #[arg(long = "allow")]
    pub allow: Vec<String>,
    /// Substrings to deny outright, on top of the builtin rules.
    #[arg(long = "deny")]
    pub deny: Vec<String>,
    /// Path prefixes writable by file tools; empty allows everything
    /// not denied.
    #[arg(long = "allow-path")]
    pub allow_path: Vec<String>,
    /// Path prefixes file tools may never write, on top of the builtin
    /// denylist.
    #[arg(long = "deny-path")]
    pub deny_path: Vec<String>,
}

pub fn run(args: &GuardArgs) -> Result<u8> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading hook input from stdin")?;
    let input: HookInput = serde_json::from_str(&raw).context("parsing hook input")?;
    if let Some(event) = input.hook_event_name {
        if event != HookEvent::PreToolUse {
            tracing::warn!(event = event.as_str(), "guard invoked for unexpected event");
        }
    }
    let response = evaluate(args, &input);
    println!("{}", serde_json::to_string(&response)?);
    Ok(response.exit_code() as u8)
}

fn evaluate(args: &GuardArgs, input: &HookInput) -> HookResponse {
    let scope = CommandScope {
        allowed_commands: args.allow.clone(),
        denied_commands: args.deny.clone(),
    };
    let mut paths = FilesystemScope::default();
    paths.allowed_paths.extend(args.allow_path.iter().cloned());
    paths.denied_paths.extend(args.deny_path.iter().cloned());
    let mut guard = Guard::new(RuleSet::builtin(), scope).with_paths(paths);

    let verdict = if let Some(command) = input.command() {
        guard.check(command)
    } else if let Some(path) = input.file_path() {
        guard.check_path(path)
    } else {
        // Nothing to inspect for other tools.
        return HookResponse::approve();
    };
    if let Some(entry) = guard.audit().entries().last() {
        tracing::info!(
            command = %entry.command,
            decision = %entry.decision,
            rule = ?entry.rule,
            "command checked"
        );
    }
    let rule = verdict.rule.unwrap_or_default();
    let reason = verdict.reason.unwrap_or_else(|| "pattern matched".into());
    match verdict.decision {
        GuardDecision::Allow => HookResponse::approve(),
        GuardDecision::Warn => HookResponse::warn(&format!("warning ({rule}): {reason}")),
        GuardDecision::Block => HookResponse::block(&format!("blocked by {rule}: {reason}")),
    }
}
