// Storage module - writes the selection session log in JSON Lines format
//
// Each session gets its own file: selections-YYYYMMDD-HHMMSS-XXXX.jsonl
// Example: jq -r 'select(.type=="galaxy_selected") | .galaxy' logs/selections-*.jsonl
//
// The UI thread never touches the file. Selections are pushed into a bounded
// channel by a coordinator subscription and drained here on a tokio task.

use crate::events::SelectionEvent;
use crate::selection::{EntityKey, SelectionCoordinator};
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Buffered selections before new ones are dropped
pub const CHANNEL_CAPACITY: usize = 256;

/// Writes selection events to a JSON Lines file
pub struct Storage {
    log_path: PathBuf,
    event_rx: mpsc::Receiver<SelectionEvent>,
}

impl Storage {
    /// Create the log directory and the session's file path
    pub fn new(
        log_dir: &Path,
        session_id: &str,
        event_rx: mpsc::Receiver<SelectionEvent>,
    ) -> Result<Self> {
        fs::create_dir_all(log_dir).context("Failed to create session log directory")?;

        Ok(Self {
            log_path: log_dir.join(format!("selections-{}.jsonl", session_id)),
            event_rx,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Write events as they arrive until every sender is dropped
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Session log: {}", self.log_path.display());

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.write_event(&event) {
                tracing::error!("Failed to write selection event: {:?}", e);
            }
        }

        tracing::debug!("Session log closed");
        Ok(())
    }

    fn write_event(&self, event: &SelectionEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .context("Failed to open session log")?;

        let json = serde_json::to_string(event).context("Failed to serialize event")?;
        writeln!(file, "{}", json).context("Failed to write to session log")?;
        file.flush().context("Failed to flush session log")?;

        Ok(())
    }
}

/// Subscribe a sender to the coordinator so every selection is logged
pub fn attach(coordinator: &mut SelectionCoordinator, tx: mpsc::Sender<SelectionEvent>) {
    let mut sequence = 0u64;
    coordinator.subscribe("session-log", move |key: &EntityKey| {
        sequence += 1;
        let event = SelectionEvent::galaxy_selected(sequence, key.as_str());
        if let Err(e) = tx.try_send(event) {
            tracing::warn!("Session log dropped selection of {}: {}", key, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn writes_one_line_per_selection() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let storage = Storage::new(dir.path(), "test", rx).unwrap();
        let path = storage.log_path().to_path_buf();
        let handle = tokio::spawn(storage.run());

        tx.send(SelectionEvent::SessionStarted {
            timestamp: Utc::now(),
            session_id: "test".into(),
            version: "0".into(),
            sed_source: "seds.csv".into(),
            uncertainty_source: "unc.csv".into(),
            initial_galaxy: Some("A".into()),
        })
        .await
        .unwrap();

        let mut coordinator = SelectionCoordinator::new(None);
        attach(&mut coordinator, tx);
        coordinator.select("A");
        coordinator.select("B");

        // Dropping the coordinator drops the last sender and ends the task
        drop(coordinator);
        handle.await.unwrap().unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<SelectionEvent> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(matches!(lines[0], SelectionEvent::SessionStarted { .. }));
        match &lines[2] {
            SelectionEvent::GalaxySelected {
                sequence, galaxy, ..
            } => {
                assert_eq!(*sequence, 2);
                assert_eq!(galaxy, "B");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
