use std::path::Path;

use walkdir::WalkDir;

use crate::asset::{AgentPersona, AssetError, Skill, SlashCommand};

/// Loaded assets for a bundle, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    commands: Vec<SlashCommand>,
    agents: Vec<AgentPersona>,
    skills: Vec<Skill>,
}

/// Result of walking a bundle directory: whatever loaded cleanly plus
/// every problem found, so validation can report all of them at once.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub registry: AssetRegistry,
    pub errors: Vec<AssetError>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command(&mut self, cmd: SlashCommand) -> Result<(), AssetError> {
        if self.commands.iter().any(|c| c.name == cmd.name) {
            return Err(AssetError::DuplicateName {
                kind: "command".into(),
                name: cmd.name,
            });
        }
        self.commands.push(cmd);
        Ok(())
    }

    pub fn register_agent(&mut self, agent: AgentPersona) -> Result<(), AssetError> {
        if self.agents.iter().any(|a| a.name == agent.name) {
            return Err(AssetError::DuplicateName {
                kind: "agent".into(),
                name: agent.name,
            });
        }
        self.agents.push(agent);
        Ok(())
    }

    pub fn register_skill(&mut self, skill: Skill) -> Result<(), AssetError> {
        if self.skills.iter().any(|s| s.name == skill.name) {
            return Err(AssetError::DuplicateName {
                kind: "skill".into(),
                name: skill.name,
            });
        }
        self.skills.push(skill);
        Ok(())
    }

    pub fn command(&self, name: &str) -> Option<&SlashCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn agent(&self, name: &str) -> Option<&AgentPersona> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn commands(&self) -> &[SlashCommand] {
        &self.commands
    }

    pub fn agents(&self) -> &[AgentPersona] {
        &self.agents
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.agents.is_empty() && self.skills.is_empty()
    }

    /// Walk a bundle root, loading `commands/`, `agents/`, and
    /// `skills/` subtrees. Non-markdown files are skipped.
    pub fn load_dir(root: &Path) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();
        for (subdir, kind) in [("commands", Kind::Command), ("agents", Kind::Agent), ("skills", Kind::Skill)] {
            let dir = root.join(subdir);
            if !dir.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                let display = path.display().to_string();
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unnamed")
                    .to_string();
                let text = match std::fs::read_to_string(path) {
                    Ok(t) => t,
                    Err(e) => {
                        outcome.errors.push(AssetError::Io {
                            path: display,
                            message: e.to_string(),
                        });
                        continue;
                    }
                };
                let result = match kind {
                    Kind::Command => SlashCommand::parse(&display, &stem, &text)
                        .and_then(|c| outcome.registry.register_command(c)),
                    Kind::Agent => AgentPersona::parse(&display, &stem, &text)
                        .and_then(|a| outcome.registry.register_agent(a)),
                    Kind::Skill => Skill::parse(&display, &stem, &text)
                        .and_then(|s| outcome.registry.register_skill(s)),
                };
                if let Err(e) = result {
                    outcome.errors.push(e);
                }
            }
        }
        outcome
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Command,
    Agent,
    Skill,
}
