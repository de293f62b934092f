use serde::{Deserialize, Serialize};

use crate::frontmatter::split_frontmatter;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("io error reading {path}: {message}")]
    Io { path: String, message: String },
    #[error("bad frontmatter in {path}: {message}")]
    Frontmatter { path: String, message: String },
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: String, name: String },
}

fn parse_meta<T: Default + for<'de> Deserialize<'de>>(
    path: &str,
    meta: Option<&str>,
) -> Result<T, AssetError> {
    match meta {
        None => Ok(T::default()),
        Some(raw) => serde_yaml::from_str(raw).map_err(|e| AssetError::Frontmatter {
            path: path.to_string(),
            message: e.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// SlashCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
struct CommandMeta {
    name: Option<String>,
    description: Option<String>,
    #[serde(default, alias = "allowed-tools")]
    allowed_tools: Vec<String>,
}

/// A scripted prompt workflow invoked by name in the chat interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlashCommand {
    pub name: String,
    pub description: Option<String>,
    pub allowed_tools: Vec<String>,
    pub body: String,
}

impl SlashCommand {
    /// Parse a command document. `stem` (the file stem) names the
    /// command when the frontmatter does not.
    pub fn parse(path: &str, stem: &str, text: &str) -> Result<Self, AssetError> {
        let (meta, body) = split_frontmatter(text);
        let meta: CommandMeta = parse_meta(path, meta)?;
        Ok(Self {
            name: meta.name.unwrap_or_else(|| stem.to_string()),
            description: meta.description,
            allowed_tools: meta.allowed_tools,
            body: body.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// AgentPersona
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
struct AgentMeta {
    name: Option<String>,
    description: Option<String>,
    model: Option<String>,
    #[serde(default)]
    tools: Vec<String>,
}

/// A named agent definition with its system-prompt body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPersona {
    pub name: String,
    pub description: Option<String>,
    pub model: Option<String>,
    pub tools: Vec<String>,
    pub body: String,
}

impl AgentPersona {
    pub fn parse(path: &str, stem: &str, text: &str) -> Result<Self, AssetError> {
        let (meta, body) = split_frontmatter(text);
        let meta: AgentMeta = parse_meta(path, meta)?;
        Ok(Self {
            name: meta.name.unwrap_or_else(|| stem.to_string()),
            description: meta.description,
            model: meta.model,
            tools: meta.tools,
            body: body.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Skill
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
struct SkillMeta {
    name: Option<String>,
    description: Option<String>,
}

/// Reference knowledge injected into context on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: Option<String>,
    pub body: String,
}

impl Skill {
    pub fn parse(path: &str, stem: &str, text: &str) -> Result<Self, AssetError> {
        let (meta, body) = split_frontmatter(text);
        let meta: SkillMeta = parse_meta(path, meta)?;
        Ok(Self {
            name: meta.name.unwrap_or_else(|| stem.to_string()),
            description: meta.description,
            body: body.to_string(),
        })
    }
}
