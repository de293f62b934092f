use serde::{Deserialize, Serialize};

/// Lifecycle points at which the host assistant invokes hooks.
///
/// The host names the event in the `hook_event_name` field of the
/// stdin payload, PascalCase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    SessionStart,
    PreToolUse,
    PostToolUse,
    Stop,
    SessionEnd,
}

impl HookEvent {
    /// Whether an exit code of 2 from the hook blocks the triggering
    /// action. Only tool gates and stop checks can block; the session
    /// boundary events are notify-only.
    pub fn can_block(self) -> bool {
        matches!(self, HookEvent::PreToolUse | HookEvent::Stop)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HookEvent::SessionStart => "SessionStart",
            HookEvent::PreToolUse => "PreToolUse",
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::Stop => "Stop",
            HookEvent::SessionEnd => "SessionEnd",
        }
    }
}

const ALL_EVENTS: [HookEvent; 5] = [
    HookEvent::SessionStart,
    HookEvent::PreToolUse,
    HookEvent::PostToolUse,
    HookEvent::Stop,
    HookEvent::SessionEnd,
];

/// One hook as it would be wired into the host assistant's settings
/// file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSpec {
    pub name: String,
    pub event: HookEvent,
    pub command: String,
    /// Tool-name pattern the host matches before running the hook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    /// Seconds the host waits before killing the hook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    pub enabled: bool,
}

impl HookSpec {
    pub fn new(name: &str, event: HookEvent, command: &str) -> Self {
        Self {
            name: name.into(),
            event,
            command: command.into(),
            matcher: None,
            timeout: None,
            enabled: true,
        }
    }

    pub fn with_matcher(mut self, matcher: &str) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }
}

/// The set of hooks a bundle wires into the host, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<HookSpec>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// This bundle's own wiring: the command guard on PreToolUse and
    /// the loop check on Stop.
    pub fn bundled() -> Self {
        let mut registry = Self::new();
        registry.register(
            HookSpec::new("guard", HookEvent::PreToolUse, "warden guard")
                .with_matcher("Bash|Write|Edit"),
        );
        registry.register(HookSpec::new("loop", HookEvent::Stop, "warden stop").with_timeout(30));
        registry
    }

    /// Add a hook; a spec with an already-registered name replaces the
    /// earlier entry.
    pub fn register(&mut self, spec: HookSpec) {
        if let Some(existing) = self.hooks.iter_mut().find(|h| h.name == spec.name) {
            *existing = spec;
        } else {
            self.hooks.push(spec);
        }
    }

    /// Flip a hook on or off by name; false when no such hook exists.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.hooks.iter_mut().find(|h| h.name == name) {
            Some(hook) => {
                hook.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Enabled hooks for one event.
    pub fn hooks_for_event(&self, event: HookEvent) -> Vec<&HookSpec> {
        self.hooks
            .iter()
            .filter(|h| h.event == event && h.enabled)
            .collect()
    }

    pub fn all(&self) -> &[HookSpec] {
        &self.hooks
    }

    /// Render the `hooks` object for the host settings file, enabled
    /// hooks only, grouped by event.
    pub fn settings(&self) -> serde_json::Value {
        let mut by_event = serde_json::Map::new();
        for event in ALL_EVENTS {
            let entries: Vec<serde_json::Value> = self
                .hooks_for_event(event)
                .iter()
                .map(|h| {
                    let mut entry = serde_json::Map::new();
                    if let Some(matcher) = &h.matcher {
                        entry.insert("matcher".into(), matcher.as_str().into());
                    }
                    entry.insert("command".into(), h.command.as_str().into());
                    if let Some(timeout) = h.timeout {
                        entry.insert("timeout".into(), timeout.into());
                    }
                    entry.into()
                })
                .collect();
            if !entries.is_empty() {
                by_event.insert(event.as_str().into(), entries.into());
            }
        }
        serde_json::json!({ "hooks": by_event })
    }
}
