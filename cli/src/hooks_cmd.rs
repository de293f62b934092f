use anyhow::Result;
use clap::{Args, Subcommand};
use warden_hooks::HookRegistry;

#[derive(Debug, Args)]
pub struct HooksArgs {
    #[command(subcommand)]
    action: HooksAction,
}

#[derive(Debug, Subcommand)]
enum HooksAction {
    /// List the bundle's hook wiring.
    List,
    /// Print the settings-file snippet that wires the bundle's hooks
    /// into the host assistant.
    Print,
}

pub fn run(args: &HooksArgs) -> Result<u8> {
    let registry = HookRegistry::bundled();
    match args.action {
        HooksAction::List => {
            for spec in registry.all() {
                let kind = if spec.event.can_block() { "gate" } else { "notify" };
                println!(
                    "{:<14} {:<7} {:<8} {}",
                    spec.event.as_str(),
                    kind,
                    spec.name,
                    spec.command
                );
            }
            Ok(0)
        }
        HooksAction::Print => {
            println!("{}", serde_json::to_string_pretty(&registry.settings())?);
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_print_succeed() {
        let list = HooksArgs {
            action: HooksAction::List,
        };
        assert_eq!(run(&list).unwrap(), 0);

        let print = HooksArgs {
            action: HooksAction::Print,
        };
        assert_eq!(run(&print).unwrap(), 0);
    }

    #[test]
    fn test_bundled_settings_cover_both_gates() {
        let settings = HookRegistry::bundled().settings();
        let hooks = settings.get("hooks").unwrap();
        assert!(hooks.get("PreToolUse").is_some());
        assert!(hooks.get("Stop").is_some());
    }
}
