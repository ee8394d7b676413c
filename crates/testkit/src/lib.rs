#![warn(missing_docs)]
//! Test surfaces: JSONL event logs and run metrics for headless sessions.

mod metrics;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use timberfall_core::SimTick;

pub use metrics::*;

/// Primary event record captured by headless runs and worldtests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Frame tick when the event occurred.
    pub tick: SimTick,
    /// Session time in milliseconds.
    pub time_ms: u64,
    /// Event kind label (`Strike`, `Felled`, `Removed`, ...).
    pub kind: &'a str,
    /// Free-form payload.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = std::env::temp_dir().join(format!(
            "timberfall-events-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for kind in ["Strike", "Felled"] {
            sink.write(&EventRecord {
                tick: SimTick::ZERO.advance(3),
                time_ms: 50,
                kind,
                payload: "tree#1",
            })
            .expect("write");
        }
        sink.flush().expect("flush");
        assert_eq!(sink.written(), 2);

        let contents = fs::read_to_string(&path).expect("readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"Felled\""));
        let _ = fs::remove_file(&path);
    }
}
