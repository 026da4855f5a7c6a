#![warn(missing_docs)]
//! Deterministic testing surfaces: a JSONL event stream for headless runs
//! and a recording health-meter sink for assertions.

use anyhow::Result;
use flatwalk_core::MeterSink;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Fixed-step index when the event occurred.
    pub step: u64,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload for smoke tests.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// A [`MeterSink`] that records every percentage it is notified with.
///
/// Clones share the same buffer, so a test can hand one clone to a health
/// model and read the notifications back through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingMeter {
    notifications: std::rc::Rc<std::cell::RefCell<Vec<f32>>>,
}

impl RecordingMeter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification received so far, in order.
    pub fn notifications(&self) -> Vec<f32> {
        self.notifications.borrow().clone()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<f32> {
        self.notifications.borrow().last().copied()
    }
}

impl MeterSink for RecordingMeter {
    fn health_changed(&mut self, percent: f32) {
        self.notifications.borrow_mut().push(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_event_per_line() {
        let path = std::env::temp_dir().join(format!(
            "flatwalk-events-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        sink.write(&EventRecord {
            step: 0,
            kind: "click",
            payload: "bed",
        })
        .expect("write succeeds");
        sink.write(&EventRecord {
            step: 20,
            kind: "health",
            payload: "99",
        })
        .expect("write succeeds");

        let contents = std::fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"kind\":\"click\""));
        assert!(lines[1].contains("\"step\":20"));
    }

    #[test]
    fn recording_meter_keeps_notification_order() {
        let mut meter = RecordingMeter::new();
        let mut handle = meter.clone();
        handle.health_changed(100.0);
        handle.health_changed(99.0);
        assert_eq!(meter.notifications(), vec![100.0, 99.0]);
        assert_eq!(meter.last(), Some(99.0));
    }
}
