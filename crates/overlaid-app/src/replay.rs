//! Replaying intent scripts against an editor.

use overlaid_core::{ConfigError, Editor, EditorConfig, Intent, Signals, Snapshot};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid intent script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of a replay, printed as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Intents that changed something.
    pub applied: usize,
    /// Intents that degraded to no-ops.
    pub ignored: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub signals: Signals,
    pub surface: Snapshot,
}

fn read(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<EditorConfig, ReplayError> {
    Ok(EditorConfig::from_json(&read(path)?)?)
}

/// Parse a JSON array of intents.
pub fn parse_script(json: &str) -> Result<Vec<Intent>, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

/// Dispatch every intent in order and summarize the result.
pub fn replay(editor: &mut Editor, intents: impl IntoIterator<Item = Intent>) -> ReplayReport {
    let mut applied = 0;
    let mut ignored = 0;
    for (step, intent) in intents.into_iter().enumerate() {
        if editor.dispatch(intent) {
            applied += 1;
        } else {
            log::info!("step {step}: no-op");
            ignored += 1;
        }
        for event in editor.take_events() {
            log::debug!("step {step}: {event:?}");
        }
    }

    ReplayReport {
        applied,
        ignored,
        undo_depth: editor.history().undo_depth(),
        redo_depth: editor.history().redo_depth(),
        signals: editor.signals(),
        surface: editor.export_surface(),
    }
}

/// Read, parse and replay a script file.
pub fn replay_file(editor: &mut Editor, path: &Path) -> Result<ReplayReport, ReplayError> {
    let intents = parse_script(&read(path)?)?;
    Ok(replay(editor, intents))
}
