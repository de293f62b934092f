pub mod asset;
pub mod frontmatter;
pub mod registry;

// Re-export key types for convenience.
pub use asset::{AgentPersona, AssetError, Skill, SlashCommand};
pub use frontmatter::split_frontmatter;
pub use registry::{AssetRegistry, LoadOutcome};
