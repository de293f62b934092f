use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use warden_persist::flatfile::write_text;
use warden_persist::{JsonFileStore, StateStore};
use warden_stop::{CompletionPromise, IterationCounter};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Session the stop hook will be tracking.
    #[arg(long, default_value = "default")]
    pub session: String,
    /// Directory holding per-session state files.
    #[arg(long, default_value = ".warden")]
    pub state_dir: PathBuf,
    /// Marker string whose appearance in assistant output ends the
    /// loop.
    #[arg(long)]
    pub promise: Option<String>,
    /// Prompt re-injected while work is unfinished.
    #[arg(long)]
    pub prompt: Option<String>,
}

/// Seed the flat files `warden stop` reads: a zeroed iteration
/// counter plus optional promise and prompt.
pub fn run(args: &InitArgs) -> Result<u8> {
    let session_dir = args.state_dir.join(&args.session);
    IterationCounter::new(&session_dir.join("iterations"))
        .reset()
        .context("resetting iteration counter")?;
    if let Some(promise) = &args.promise {
        CompletionPromise::new(promise)
            .store(&session_dir.join("promise"))
            .context("storing promise")?;
    }
    if let Some(prompt) = &args.prompt {
        write_text(&session_dir.join("prompt"), prompt).context("storing prompt")?;
    }

    let store = JsonFileStore::new(args.state_dir.clone());
    let mut state = store.load_or_new(&args.session);
    state.iteration = 0;
    state.promise = args.promise.clone();
    state.prompt = args.prompt.clone();
    state.touch();
    store.save(&state).context("saving session record")?;

    println!(
        "initialized session '{}' under {}",
        args.session,
        args.state_dir.display()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_persist::flatfile::read_text;

    #[test]
    fn test_init_seeds_flat_files() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            session: "s1".into(),
            state_dir: dir.path().to_path_buf(),
            promise: Some("ALL TESTS PASS".into()),
            prompt: Some("keep going".into()),
        };
        assert_eq!(run(&args).unwrap(), 0);

        let session_dir = dir.path().join("s1");
        let counter = IterationCounter::new(&session_dir.join("iterations"));
        assert_eq!(counter.current().unwrap(), 0);

        let promise = CompletionPromise::load(&session_dir.join("promise"))
            .unwrap()
            .unwrap();
        assert_eq!(promise.text(), "ALL TESTS PASS");
        assert_eq!(
            read_text(&session_dir.join("prompt")).unwrap().as_deref(),
            Some("keep going")
        );

        let state = JsonFileStore::new(dir.path().to_path_buf()).load("s1").unwrap();
        assert_eq!(state.iteration, 0);
        assert_eq!(state.promise.as_deref(), Some("ALL TESTS PASS"));
    }

    #[test]
    fn test_init_without_promise_leaves_check_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            session: "bare".into(),
            state_dir: dir.path().to_path_buf(),
            promise: None,
            prompt: None,
        };
        assert_eq!(run(&args).unwrap(), 0);

        let session_dir = dir.path().join("bare");
        assert!(CompletionPromise::load(&session_dir.join("promise"))
            .unwrap()
            .is_none());
        assert!(read_text(&session_dir.join("prompt")).unwrap().is_none());
    }

    #[test]
    fn test_reinit_resets_a_running_counter() {
        let dir = tempfile::tempdir().unwrap();
        let counter = IterationCounter::new(&dir.path().join("s2").join("iterations"));
        counter.increment().unwrap();
        counter.increment().unwrap();

        let args = InitArgs {
            session: "s2".into(),
            state_dir: dir.path().to_path_buf(),
            promise: None,
            prompt: None,
        };
        assert_eq!(run(&args).unwrap(), 0);
        assert_eq!(counter.current().unwrap(), 0);
    }
}
