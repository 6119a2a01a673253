//! JSONL file writer for workflow events.
//!
//! One line per event: `at`, `kind`, then `form_id`, `actor` and `role`
//! when the event has them, and the kind-specific `detail` object.

use award_application::ports::event_journal::{EventJournal, WorkflowEvent};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only workflow journal shared by all use cases
pub struct JsonlEventJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventJournal {
    /// Open `path` for appending, creating missing directories.
    ///
    /// `None` when the location is unusable; callers fall back to
    /// [`award_application::NoEventJournal`].
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        match Self::open(&path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path,
            }),
            Err(e) => {
                warn!("Journal {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    fn open(path: &Path) -> std::io::Result<File> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct JournalLine<'a> {
    at: String,
    #[serde(flatten)]
    event: &'a WorkflowEvent,
}

impl EventJournal for JsonlEventJournal {
    fn record(&self, event: WorkflowEvent) {
        let line = JournalLine {
            at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event: &event,
        };
        let line = match serde_json::to_string(&line) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not serialize {} event: {}", event.kind, e);
                return;
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush()) {
            warn!(
                "Could not append {} event to {}: {}",
                event.kind,
                self.path.display(),
                e
            );
        }
    }
}

impl Drop for JsonlEventJournal {
    fn drop(&mut self) {
        if let Ok(writer) = self.writer.get_mut() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_domain::{Actor, FormId, FormStatus, Role, UserId};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_form_and_actor_are_top_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let journal = JsonlEventJournal::new(&path).unwrap();

        journal.record(WorkflowEvent::nomination_signed(
            FormId(12),
            Actor::new(30u64, Role::Committee),
            FormStatus::ChairmanSigned,
        ));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line["at"].is_string());
        assert_eq!(line["kind"], "nomination_signed");
        assert_eq!(line["form_id"], 12);
        assert_eq!(line["actor"], 30);
        assert_eq!(line["role"], serde_json::to_value(Role::Committee).unwrap());
        assert_eq!(line["detail"]["signed_status"], 12);
    }

    #[test]
    fn test_committee_events_omit_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/journal.jsonl");

        for member in [1u64, 2] {
            let journal = JsonlEventJournal::new(&path).unwrap();
            journal.record(WorkflowEvent::chairman_changed(UserId(member), member == 2));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["kind"], "chairman_changed");
        assert!(lines[1].get("form_id").is_none());
        assert!(lines[1].get("actor").is_none());
        assert_eq!(lines[1]["detail"]["member"], 2);
        assert_eq!(lines[1]["detail"]["is_chairman"], true);
    }

    #[test]
    fn test_unwritable_location_disables_journal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        assert!(JsonlEventJournal::new(blocker.join("journal.jsonl")).is_none());
    }
}
