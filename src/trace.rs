//! Optional JSON-lines trace of a session.
//!
//! Set `BLOCKFALL_TRACE_PATH` to append one record per applied event, plus a
//! start record when the process opens the file. Seed plus ordered event names
//! are enough to replay the whole session.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameState;
use crate::types::GameEvent;

pub const TRACE_PATH_ENV: &str = "BLOCKFALL_TRACE_PATH";

#[derive(Debug, Clone, Copy, Serialize)]
struct StartRecord {
    #[serde(rename = "type")]
    msg_type: &'static str,
    ts: u64,
    seed: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct EventRecord<'a> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    ts: u64,
    event: &'a str,
    score: u32,
    high_score: u32,
    ended: bool,
}

pub struct TraceWriter {
    out: BufWriter<File>,
}

impl TraceWriter {
    /// Open the sink named by `BLOCKFALL_TRACE_PATH`, if set.
    pub fn from_env(seed: u32) -> Result<Option<Self>> {
        let path = match env::var(TRACE_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => path,
            _ => return Ok(None),
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open trace file {}", path))?;
        let mut writer = Self {
            out: BufWriter::new(file),
        };
        writer.write_line(&StartRecord {
            msg_type: "start",
            ts: now_ms(),
            seed,
        })?;
        Ok(Some(writer))
    }

    /// Append one record for an applied event and the state it produced.
    pub fn record(&mut self, event: GameEvent, state: &GameState) -> Result<()> {
        self.write_line(&EventRecord {
            msg_type: "event",
            ts: now_ms(),
            event: event.as_str(),
            score: state.score(),
            high_score: state.high_score(),
            ended: state.ended(),
        })
    }

    fn write_line<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_record_serializes_with_type_tag() {
        let record = EventRecord {
            msg_type: "event",
            ts: 12,
            event: "tick",
            score: 30,
            high_score: 90,
            ended: false,
        };
        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(
            line,
            r#"{"type":"event","ts":12,"event":"tick","score":30,"high_score":90,"ended":false}"#
        );
    }

    #[test]
    fn test_start_record_serializes_seed() {
        let record = StartRecord {
            msg_type: "start",
            ts: 7,
            seed: 42,
        };
        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(line, r#"{"type":"start","ts":7,"seed":42}"#);
    }
}
