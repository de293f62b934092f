use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use warden_assets::AssetRegistry;

#[derive(Debug, Args)]
pub struct AssetsArgs {
    #[command(subcommand)]
    action: AssetsAction,
}

#[derive(Debug, Subcommand)]
enum AssetsAction {
    /// List the bundle's commands, agents, and skills.
    List {
        /// Bundle root containing commands/, agents/, and skills/.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Check that every asset parses and names are unique.
    Validate {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

pub fn run(args: &AssetsArgs) -> Result<u8> {
    match &args.action {
        AssetsAction::List { dir } => {
            let outcome = AssetRegistry::load_dir(dir);
            let reg = &outcome.registry;
            println!("commands ({}):", reg.commands().len());
            for cmd in reg.commands() {
                println!("  /{} {}", cmd.name, cmd.description.as_deref().unwrap_or(""));
            }
            println!("agents ({}):", reg.agents().len());
            for agent in reg.agents() {
                println!("  {} {}", agent.name, agent.model.as_deref().unwrap_or(""));
            }
            println!("skills ({}):", reg.skills().len());
            for skill in reg.skills() {
                println!("  {}", skill.name);
            }
            if !outcome.errors.is_empty() {
                eprintln!("{} asset(s) failed to load; run validate", outcome.errors.len());
            }
            Ok(0)
        }
        AssetsAction::Validate { dir } => {
            let outcome = AssetRegistry::load_dir(dir);
            if outcome.errors.is_empty() {
                println!(
                    "ok: {} commands, {} agents, {} skills",
                    outcome.registry.commands().len(),
                    outcome.registry.agents().len(),
                    outcome.registry.skills().len()
                );
                Ok(0)
            } else {
                for err in &outcome.errors {
                    eprintln!("{err}");
                }
                Ok(1)
            }
        }
    }
}
