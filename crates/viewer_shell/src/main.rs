mod script;

use anyhow::{Context, Result};
use clap::Parser;
use settings::{SettingsStore, UserSettings};
use std::{
    io::{self, Read},
    path::PathBuf,
};
use tracing::{info, warn};
use view_sync::{EventOutcome, ViewerSession};

use script::Script;

/// Replay recorded pointer input through the viewer core and print the final state.
#[derive(Parser, Debug)]
#[command(name = "viewer_shell")]
struct Args {
    /// Event script (JSON); read from stdin when omitted
    script: Option<PathBuf>,

    /// Settings file to use instead of the platform config directory
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let settings_store = match &args.settings {
        Some(path) => SettingsStore::at_path(path),
        None => SettingsStore::new().context("settings store init failed")?,
    };
    let user_settings = match settings_store.load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("Using default settings (failed to load): {err}");
            UserSettings::default()
        }
    };

    let script = match &args.script {
        Some(path) => Script::from_path(path)?,
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read script from stdin")?;
            Script::parse(&raw)?
        }
    };

    let mut session = ViewerSession::new(&user_settings, script.window(), script.scene())
        .context("failed to start viewer session")?;

    for (index, event) in script.events.iter().enumerate() {
        let outcome = session
            .handle(*event)
            .with_context(|| format!("event #{index} ({event:?}) failed"))?;
        log_outcome(index, &outcome, &session);
    }

    let snapshot = session.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("failed to encode final state")?
    );
    Ok(())
}

fn log_outcome(index: usize, outcome: &EventOutcome, session: &ViewerSession) {
    match outcome {
        EventOutcome::Ignored => {}
        EventOutcome::MainCameraMoved | EventOutcome::OverlayCameraMoved => info!(
            index,
            main = ?session.main_camera().position,
            overlay = ?session.overlay_camera().position,
            "{outcome:?}"
        ),
        EventOutcome::Highlight(change) => {
            for event in change.events() {
                info!(index, "{event:?}");
            }
        }
        EventOutcome::FaceSnapped(face) => info!(
            index,
            %face,
            main = ?session.main_camera().position,
            "snapped to face"
        ),
        EventOutcome::Selection(hit) => info!(index, hit = ?hit.map(|h| h.point), "selection"),
        EventOutcome::Resized => info!(index, viewport = ?session.main_viewport(), "resized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_path_and_settings_flag() {
        let args = Args::try_parse_from(["viewer_shell", "run.json", "--settings", "s.json"]).unwrap();
        assert_eq!(args.script, Some(PathBuf::from("run.json")));
        assert_eq!(args.settings, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn script_defaults_to_stdin() {
        let args = Args::try_parse_from(["viewer_shell"]).unwrap();
        assert!(args.script.is_none());
        assert!(args.settings.is_none());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["viewer_shell", "--teleport"]).is_err());
    }
}
