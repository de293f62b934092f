use serde::{Deserialize, Serialize};

/// Path scope consulted for file-writing tools. Denied prefixes
/// always win; an empty allowlist permits any path not denied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemScope {
    pub allowed_paths: Vec<String>,
    pub denied_paths: Vec<String>,
}

impl Default for FilesystemScope {
    /// Open allowlist. The denylist covers system configuration and
    /// credential stores a coding session has no business writing.
    fn default() -> Self {
        Self {
            allowed_paths: Vec::new(),
            denied_paths: ["/etc", "/usr", "/boot", "~/.ssh", "~/.gnupg", "~/.aws"]
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }
}

impl FilesystemScope {
    pub fn is_path_allowed(&self, path: &str) -> bool {
        if self
            .denied_paths
            .iter()
            .any(|d| path.starts_with(d.as_str()))
        {
            return false;
        }
        self.allowed_paths.is_empty()
            || self
                .allowed_paths
                .iter()
                .any(|a| path.starts_with(a.as_str()))
    }
}

/// Command execution scope. Prefix allowlist, substring denylist;
/// an empty allowlist permits everything not denied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandScope {
    pub allowed_commands: Vec<String>,
    pub denied_commands: Vec<String>,
}

impl CommandScope {
    pub fn is_command_allowed(&self, cmd: &str) -> bool {
        for denied in &self.denied_commands {
            if cmd.contains(denied.as_str()) {
                return false;
            }
        }
        if self.allowed_commands.is_empty() {
            return true;
        }
        self.allowed_commands
            .iter()
            .any(|a| cmd.starts_with(a.as_str()))
    }
}
