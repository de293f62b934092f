use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod assets_cmd;
mod guard_cmd;
mod hooks_cmd;
mod init_cmd;
mod stop_cmd;

#[derive(Debug, Parser)]
#[command(name = "warden", version, about = "Lifecycle hooks for an AI coding assistant")]
struct Cli {
    /// Log more to stderr. Stdout is reserved for hook JSON.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// PreToolUse hook: filter a shell command read from stdin.
    Guard(guard_cmd::GuardArgs),
    /// Stop hook: decide whether the assistant may stop.
    Stop(stop_cmd::StopArgs),
    /// Seed the session state files the stop hook reads.
    Init(init_cmd::InitArgs),
    /// Show the bundle's hook wiring for the host settings.
    Hooks(hooks_cmd::HooksArgs),
    /// Inspect the markdown asset bundle.
    Assets(assets_cmd::AssetsArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let result = match cli.command {
        Command::Guard(args) => guard_cmd::run(&args),
        Command::Stop(args) => stop_cmd::run(&args),
        Command::Init(args) => init_cmd::run(&args),
        Command::Hooks(args) => hooks_cmd::run(&args),
        Command::Assets(args) => assets_cmd::run(&args),
    };
    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("warden: {err:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_guard_subcommand_parses() {
        let cli = Cli::try_parse_from(["warden", "guard", "--deny", "shutdown"]).unwrap();
        match cli.command {
            Command::Guard(args) => assert_eq!(args.deny, vec!["shutdown"]),
            other => panic!("expected guard, got {other:?}"),
        }
    }

    #[test]
    fn test_init_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "warden",
            "init",
            "--promise",
            "ALL TESTS PASS",
            "--prompt",
            "keep going",
        ])
        .unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.session, "default");
                assert_eq!(args.promise.as_deref(), Some("ALL TESTS PASS"));
            }
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn test_stop_subcommand_defaults() {
        let cli = Cli::try_parse_from(["warden", "stop"]).unwrap();
        match cli.command {
            Command::Stop(args) => {
                assert_eq!(args.max_iterations, 25);
                assert_eq!(args.state_dir.to_str(), Some(".warden"));
            }
            other => panic!("expected stop, got {other:?}"),
        }
    }
}
