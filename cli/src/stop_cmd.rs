use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use warden_hooks::{last_assistant_text, HookInput, HookResponse};
use warden_persist::flatfile::read_text;
use warden_persist::{JsonFileStore, StateStore};
use warden_stop::{
    run_stop_check, CompletionPromise, GitWorkProbe, IterationCounter, StopContext, StopDecision,
    StopOutcome,
};

#[derive(Debug, Args)]
pub struct StopArgs {
    /// Loop iterations allowed before the stop is let through; 0
    /// disables the cap.
    #[arg(long, default_value_t = 25)]
    pub max_iterations: u32,
    /// Directory holding per-session state files.
    #[arg(long, default_value = ".warden")]
    pub state_dir: PathBuf,
    /// Working directory probed for uncommitted changes.
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,
}

pub fn run(args: &StopArgs) -> Result<u8> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading hook input from stdin")?;
    let input: HookInput = serde_json::from_str(&raw).context("parsing hook input")?;
    let outcome = decide(args, &input)?;
    let response = respond(&outcome);
    println!("{}", serde_json::to_string(&response)?);
    Ok(outcome.exit_code() as u8)
}

/// Run the stop check against the session's flat files and persist the
/// updated counter. The per-session directory under `state_dir` holds
/// `iterations`, `promise`, and `prompt`; `warden init` seeds them.
fn decide(args: &StopArgs, input: &HookInput) -> Result<StopOutcome> {
    let session = input.session_id.clone().unwrap_or_else(|| "default".into());
    let session_dir = args.state_dir.join(&session);
    let counter = IterationCounter::new(&session_dir.join("iterations"));
    let promise = CompletionPromise::load(&session_dir.join("promise"))
        .context("loading promise file")?;
    let prompt = read_text(&session_dir.join("prompt")).context("loading prompt file")?;
    let iteration = counter.current().context("reading iteration counter")?;

    let last_output = input
        .transcript_path
        .as_deref()
        .and_then(|p| last_assistant_text(Path::new(p)));

    let ctx = StopContext {
        stop_hook_active: input.stop_hook_active,
        last_output: last_output.as_deref(),
        promise: promise.as_ref(),
        iteration,
        max_iterations: args.max_iterations,
        prompt: prompt.as_deref(),
    };
    let probe = GitWorkProbe::new(&args.workdir);
    let outcome = run_stop_check(&ctx, &probe);

    let iteration = match &outcome.decision {
        StopDecision::Continue { .. } => {
            counter.increment().context("bumping iteration counter")?
        }
        // The loop is over; the next run starts from a clean counter.
        StopDecision::AllowStop => {
            counter.reset().context("resetting iteration counter")?;
            0
        }
    };

    // Session record mirroring the flat-file state, for `warden`
    // tooling and postmortems.
    let store = JsonFileStore::new(args.state_dir.clone());
    let mut state = store.load_or_new(&session);
    state.iteration = iteration;
    state.promise = promise.map(|p| p.text().to_string());
    state.prompt = prompt;
    state.touch();
    store.save(&state).context("saving session record")?;

    tracing::info!(
        session = %session,
        reason = ?outcome.reason,
        iteration,
        "stop check"
    );
    Ok(outcome)
}

fn respond(outcome: &StopOutcome) -> HookResponse {
    match &outcome.decision {
        StopDecision::AllowStop => {
            let response = HookResponse::approve();
            if outcome.messages.is_empty() {
                response
            } else {
                response.with_system_message(&outcome.messages.join("; "))
            }
        }
        StopDecision::Continue { prompt } => HookResponse::block(prompt),
    }
}
