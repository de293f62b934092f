use serde::{Deserialize, Serialize};

use crate::event::HookEvent;

/// Payload the host assistant pipes to a hook on stdin.
///
/// Fields not sent for a given event deserialize as `None`; the Bash
/// tool carries its command string at `tool_input.command`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub hook_event_name: Option<HookEvent>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
    /// True when a stop hook already fired for this turn. Used to
    /// break re-entry loops.
    #[serde(default)]
    pub stop_hook_active: bool,
}

impl HookInput {
    /// The shell command under inspection, if this input came from the
    /// Bash tool.
    pub fn command(&self) -> Option<&str> {
        self.tool_input
            .as_ref()
            .and_then(|v| v.get("command"))
            .and_then(|v| v.as_str())
    }

    /// The target path, if this input came from a file-writing tool
    /// such as Write or Edit.
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input
            .as_ref()
            .and_then(|v| v.get("file_path"))
            .and_then(|v| v.as_str())
    }
}

/// Hook gate decision carried in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookDecision {
    Approve,
    Block,
}

/// JSON a hook writes to stdout for the host assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<HookDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Shown to the user without being fed back to the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

impl HookResponse {
    pub fn approve() -> Self {
        Self {
            decision: Some(HookDecision::Approve),
            reason: None,
            system_message: None,
        }
    }

    pub fn block(reason: &str) -> Self {
        Self {
            decision: Some(HookDecision::Block),
            reason: Some(reason.into()),
            system_message: None,
        }
    }

    /// Allow the action but surface a warning to the user.
    pub fn warn(message: &str) -> Self {
        Self {
            decision: None,
            reason: None,
            system_message: Some(message.into()),
        }
    }

    pub fn with_system_message(mut self, message: &str) -> Self {
        self.system_message = Some(message.into());
        self
    }

    /// Process exit code the hook should terminate with. The host
    /// treats 2 as a blocking failure and feeds stderr to the model.
    pub fn exit_code(&self) -> i32 {
        match self.decision {
            Some(HookDecision::Block) => 2,
            _ => 0,
        }
    }
}
